//! Payout table.
//!
//! Every figure here is WINNINGS ONLY. The stake comes back with any win and
//! is added by [rollsim_types::craps::BetResolution::returned].

use rollsim_types::craps::{
    BetKind, Credits, Point, BPS_DENOMINATOR, COMMISSION_BPS, MAX_PAYOUT_TO_ONE,
};

/// Odds quoted as "`to` for `per`": 9 to 5 pays 9 for every 5 wagered.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Odds {
    pub to: u64,
    pub per: u64,
}

impl Odds {
    pub const fn new(to: u64, per: u64) -> Self {
        Self { to, per }
    }

    pub const fn to_one(to: u64) -> Self {
        Self { to, per: 1 }
    }

    fn apply(self, amount: u64) -> Credits {
        Credits::from_frac(amount, self.to, self.per)
    }
}

/// Shape of a payout.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PayoutRule {
    /// `amount * odds`
    Flat(Odds),
    /// `amount * odds - amount * rate`; the commission is only charged on a win.
    Commission { odds: Odds, rate_bps: u64 },
    /// Field: `base` unless the total is 2 or 12.
    Field { base: Odds, two: Odds, twelve: Odds },
}

impl PayoutRule {
    pub fn payout(&self, amount: u64, total: u8) -> Credits {
        match self {
            PayoutRule::Flat(odds) => odds.apply(amount),
            PayoutRule::Commission { odds, rate_bps } => {
                let commission = Credits::from_frac(amount, *rate_bps, BPS_DENOMINATOR);
                odds.apply(amount) - commission
            }
            PayoutRule::Field { base, two, twelve } => match total {
                2 => two.apply(amount),
                12 => twelve.apply(amount),
                _ => base.apply(amount),
            },
        }
    }
}

/// Calculate place bet odds
fn place_odds(point: Point) -> Odds {
    match point.get() {
        4 | 10 => Odds::new(9, 5),
        5 | 9 => Odds::new(7, 5),
        _ => Odds::new(7, 6), // 6 or 8
    }
}

/// True odds of the number against a seven
fn true_odds(point: Point) -> Odds {
    match point.get() {
        4 | 10 => Odds::to_one(2),
        5 | 9 => Odds::new(3, 2),
        _ => Odds::new(6, 5), // 6 or 8
    }
}

/// True odds of a seven against the number
fn lay_odds(point: Point) -> Odds {
    let odds = true_odds(point);
    Odds::new(odds.per, odds.to)
}

fn hard_way_odds(point: Point) -> Odds {
    match point.get() {
        4 | 10 => Odds::to_one(8),
        _ => Odds::to_one(10), // 6 or 8
    }
}

fn single_number_odds(number: u8) -> Odds {
    match number {
        2 | 12 => Odds::to_one(30),
        _ => Odds::to_one(15), // 3 or 11
    }
}

/// Payouts for every bet kind.
///
/// Only the house-configurable entries are fields; everything else is the
/// standard layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PayoutTable {
    any_seven: Odds,
    any_craps: Odds,
    field_base: Odds,
    field_two: Odds,
    field_twelve: Odds,
    commission_bps: u64,
}

impl Default for PayoutTable {
    fn default() -> Self {
        Self::standard()
    }
}

impl PayoutTable {
    pub const fn standard() -> Self {
        Self {
            any_seven: Odds::to_one(4),
            any_craps: Odds::to_one(8),
            field_base: Odds::to_one(1),
            field_two: Odds::to_one(2),
            field_twelve: Odds::to_one(3),
            commission_bps: COMMISSION_BPS,
        }
    }

    /// Set Any Seven to `to_one` to 1, capped at [MAX_PAYOUT_TO_ONE].
    pub fn with_any_seven(mut self, to_one: u64) -> Self {
        self.any_seven = Odds::to_one(to_one.min(MAX_PAYOUT_TO_ONE));
        self
    }

    /// Set the Field 12 to `to_one` to 1, capped at [MAX_PAYOUT_TO_ONE].
    pub fn with_field_twelve(mut self, to_one: u64) -> Self {
        self.field_twelve = Odds::to_one(to_one.min(MAX_PAYOUT_TO_ONE));
        self
    }

    pub fn any_seven(&self) -> Odds {
        self.any_seven
    }

    pub fn field_twelve(&self) -> Odds {
        self.field_twelve
    }

    pub fn rule(&self, kind: BetKind) -> PayoutRule {
        let even = Odds::to_one(1);
        match kind {
            BetKind::PassLine
            | BetKind::DontPass
            | BetKind::Come
            | BetKind::DontCome
            | BetKind::ComePoint(_)
            | BetKind::DontComePoint(_) => PayoutRule::Flat(even),
            BetKind::Place(point) => PayoutRule::Flat(place_odds(point)),
            BetKind::Buy(point) => PayoutRule::Commission {
                odds: true_odds(point),
                rate_bps: self.commission_bps,
            },
            BetKind::Lay(point) => PayoutRule::Commission {
                odds: lay_odds(point),
                rate_bps: self.commission_bps,
            },
            BetKind::Field => PayoutRule::Field {
                base: self.field_base,
                two: self.field_two,
                twelve: self.field_twelve,
            },
            BetKind::AnySeven => PayoutRule::Flat(self.any_seven),
            BetKind::AnyCraps => PayoutRule::Flat(self.any_craps),
            BetKind::HardWay(point) => PayoutRule::Flat(hard_way_odds(point)),
            BetKind::SingleNumber(number) => PayoutRule::Flat(single_number_odds(number)),
        }
    }

    /// Winnings for a winning bet of `kind` on a roll totalling `total`.
    pub fn payout(&self, kind: BetKind, amount: u64, total: u8) -> Credits {
        self.rule(kind).payout(amount, total)
    }
}

/// Winnings under the standard table.
pub fn payout(kind: BetKind, amount: u64, total: u8) -> Credits {
    PayoutTable::standard().payout(kind, amount, total)
}
