//! Roll processing.
//!
//! [resolve] is a pure function of the table and the roll. It runs in four
//! steps, and every step reads the phase as it was before the roll:
//!
//! 1. classify the roll ([classify])
//! 2. give every bet exactly one [Disposition], one rule group at a time
//! 3. build the next table: remove winners, losers and traveling bets, then
//!    insert the traveled bets with the same amounts
//! 4. advance the phase ([next_phase])

use super::{PayoutTable, TableState};
use rollsim_types::craps::{
    Bet, BetHandle, BetKind, BetResolution, Disposition, Point, Roll, RollOutcome, RuleGroup,
    TablePhase, BAR_NUMBER, CRAPS_NUMBERS, FIELD_NUMBERS, NATURAL_NUMBERS, SEVEN,
};
use std::collections::BTreeMap;

/// Output of [resolve].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Resolution {
    pub outcome: RollOutcome,
    /// One entry per bet on the table before the roll, in handle order.
    pub resolutions: Vec<BetResolution>,
    pub phase_before: TablePhase,
    pub phase_after: TablePhase,
    pub next: TableState,
}

/// Classify a roll against the phase it was rolled in.
pub fn classify(phase: TablePhase, roll: Roll) -> RollOutcome {
    let total = roll.total();
    match phase {
        TablePhase::ComingOut => {
            if let Ok(point) = Point::new(total) {
                RollOutcome::PointSet(point)
            } else if NATURAL_NUMBERS.contains(&total) {
                RollOutcome::Natural
            } else {
                RollOutcome::Craps
            }
        }
        TablePhase::PointEstablished(point) => {
            if total == SEVEN {
                RollOutcome::SevenOut
            } else if total == point.get() {
                RollOutcome::PointMade(point)
            } else {
                RollOutcome::Normal
            }
        }
    }
}

/// Phase after a roll with `outcome`.
pub fn next_phase(phase: TablePhase, outcome: RollOutcome) -> TablePhase {
    match outcome {
        RollOutcome::PointSet(point) => TablePhase::PointEstablished(point),
        RollOutcome::PointMade(_) | RollOutcome::SevenOut => TablePhase::ComingOut,
        RollOutcome::Natural | RollOutcome::Craps | RollOutcome::Normal => phase,
    }
}

/// Rule verdict before the payout is attached.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Verdict {
    Win,
    Lose,
    Push,
    Move(BetKind),
    Unresolved,
}

fn win_if(won: bool) -> Verdict {
    if won {
        Verdict::Win
    } else {
        Verdict::Lose
    }
}

/// Pass Line / Don't Pass: only the outcome classification matters.
fn line_verdict(kind: BetKind, outcome: RollOutcome, total: u8) -> Verdict {
    let pass = kind == BetKind::PassLine;
    match outcome {
        RollOutcome::Natural | RollOutcome::PointMade(_) => win_if(pass),
        RollOutcome::SevenOut => win_if(!pass),
        RollOutcome::Craps if !pass && total == BAR_NUMBER => Verdict::Push,
        RollOutcome::Craps => win_if(!pass),
        RollOutcome::PointSet(_) | RollOutcome::Normal => Verdict::Unresolved,
    }
}

/// Place/Buy: number before seven.
fn place_buy_verdict(number: Point, total: u8) -> Verdict {
    if total == number.get() {
        Verdict::Win
    } else if total == SEVEN {
        Verdict::Lose
    } else {
        Verdict::Unresolved
    }
}

/// Lay: seven before number.
fn lay_verdict(number: Point, total: u8) -> Verdict {
    if total == SEVEN {
        Verdict::Win
    } else if total == number.get() {
        Verdict::Lose
    } else {
        Verdict::Unresolved
    }
}

/// Come / Don't Come before traveling: a private come-out roll.
fn come_base_verdict(kind: BetKind, total: u8) -> Verdict {
    let come = kind == BetKind::Come;
    if let Ok(point) = Point::new(total) {
        return Verdict::Move(if come {
            BetKind::ComePoint(point)
        } else {
            BetKind::DontComePoint(point)
        });
    }
    if NATURAL_NUMBERS.contains(&total) {
        win_if(come)
    } else if !come && total == BAR_NUMBER {
        Verdict::Push
    } else {
        win_if(!come)
    }
}

/// Come / Don't Come after traveling to `number`.
fn come_point_verdict(kind: BetKind, number: Point, total: u8) -> Verdict {
    let come = matches!(kind, BetKind::ComePoint(_));
    if total == SEVEN {
        win_if(!come)
    } else if total == number.get() {
        win_if(come)
    } else {
        Verdict::Unresolved
    }
}

/// Single-roll bets always resolve.
fn one_roll_verdict(kind: BetKind, total: u8) -> Verdict {
    let won = match kind {
        BetKind::Field => FIELD_NUMBERS.contains(&total),
        BetKind::AnySeven => total == SEVEN,
        BetKind::AnyCraps => CRAPS_NUMBERS.contains(&total),
        BetKind::SingleNumber(number) => total == number,
        _ => false,
    };
    win_if(won)
}

/// Hard way: the pair before a seven or the easy way.
fn hard_way_verdict(number: Point, roll: Roll) -> Verdict {
    let total = roll.total();
    if total == number.get() {
        win_if(roll.is_hard())
    } else if total == SEVEN {
        Verdict::Lose
    } else {
        Verdict::Unresolved
    }
}

/// Dispositions keyed by bet handle. Each handle is written at most once.
#[derive(Default)]
struct Ledger {
    entries: BTreeMap<BetHandle, Disposition>,
}

impl Ledger {
    fn record(&mut self, handle: BetHandle, disposition: Disposition) {
        let previous = self.entries.insert(handle, disposition);
        debug_assert!(
            previous.is_none(),
            "bet {handle} resolved twice: {previous:?} then {disposition:?}"
        );
    }
}

fn group_verdict(bet: &Bet, phase: TablePhase, outcome: RollOutcome, roll: Roll) -> Verdict {
    let total = roll.total();
    // Place, Buy and Lay are off without a point.
    if bet.kind.needs_point() && phase.is_coming_out() {
        return Verdict::Unresolved;
    }
    match (bet.kind.group(), bet.kind) {
        (RuleGroup::Line, kind) => line_verdict(kind, outcome, total),
        (RuleGroup::PlaceBuy, BetKind::Place(number) | BetKind::Buy(number)) => {
            place_buy_verdict(number, total)
        }
        (RuleGroup::Lay, BetKind::Lay(number)) => lay_verdict(number, total),
        (RuleGroup::ComeBase, kind) => come_base_verdict(kind, total),
        (
            RuleGroup::ComePoint,
            kind @ (BetKind::ComePoint(number) | BetKind::DontComePoint(number)),
        ) => come_point_verdict(kind, number, total),
        (RuleGroup::OneRoll, kind) => one_roll_verdict(kind, total),
        (RuleGroup::HardWay, BetKind::HardWay(number)) => hard_way_verdict(number, roll),
        // Group and kind disagree; BetKind::group rules this out.
        _ => Verdict::Unresolved,
    }
}

/// Resolve `roll` against `state`.
pub fn resolve(state: &TableState, roll: Roll, payouts: &PayoutTable) -> Resolution {
    let total = roll.total();
    let phase_before = state.phase();

    // 1. Classify
    let outcome = classify(phase_before, roll);

    // 2. Dispositions, one rule group at a time
    let mut ledger = Ledger::default();
    for group in [
        RuleGroup::Line,
        RuleGroup::PlaceBuy,
        RuleGroup::Lay,
        RuleGroup::ComeBase,
        RuleGroup::ComePoint,
        RuleGroup::OneRoll,
        RuleGroup::HardWay,
    ] {
        for bet in state.bets().filter(|bet| bet.kind.group() == group) {
            let disposition = match group_verdict(bet, phase_before, outcome, roll) {
                Verdict::Win => Disposition::Win(payouts.payout(bet.kind, bet.amount, total)),
                Verdict::Lose => Disposition::Lose,
                Verdict::Push => Disposition::Push,
                Verdict::Move(kind) => Disposition::Move(kind),
                Verdict::Unresolved => Disposition::Unresolved,
            };
            ledger.record(bet.handle, disposition);
        }
    }
    debug_assert_eq!(ledger.entries.len(), state.len(), "every bet resolves once");

    // 3. Apply: removals first so a traveled bet never merges into one leaving this roll
    let mut next = state.clone();
    for (handle, disposition) in &ledger.entries {
        if disposition.removes_bet() {
            next.take(*handle);
        }
    }
    let mut resolutions = Vec::with_capacity(ledger.entries.len());
    for bet in state.bets() {
        let disposition = ledger
            .entries
            .get(&bet.handle)
            .copied()
            .unwrap_or(Disposition::Unresolved);
        let successor = match disposition {
            Disposition::Move(kind) => Some(next.insert(kind, bet.amount)),
            _ => None,
        };
        resolutions.push(BetResolution {
            handle: bet.handle,
            kind: bet.kind,
            amount: bet.amount,
            disposition,
            successor,
        });
    }

    // 4. Advance the phase
    let phase_after = next_phase(phase_before, outcome);
    next.set_phase(phase_after);

    Resolution {
        outcome,
        resolutions,
        phase_before,
        phase_after,
        next,
    }
}
