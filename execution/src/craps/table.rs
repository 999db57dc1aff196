//! Bets on the layout.

use super::{PlacementError, RemovalError};
use rollsim_types::craps::{
    Bet, BetHandle, BetKind, Credits, RuleGroup, TablePhase, MAX_BET_AMOUNT,
};
use std::collections::BTreeMap;
use tracing::debug;

/// Whether `kind` may be put down in `phase`.
pub fn can_place(kind: BetKind, phase: TablePhase) -> bool {
    match kind.group() {
        RuleGroup::Line => phase.is_coming_out(),
        RuleGroup::ComeBase => !phase.is_coming_out(),
        // Only reachable by traveling from Come/Don't Come.
        RuleGroup::ComePoint => false,
        // Place/Buy/Lay go down in either phase but are off until a point is set.
        RuleGroup::PlaceBuy | RuleGroup::Lay => true,
        RuleGroup::OneRoll | RuleGroup::HardWay => true,
    }
}

/// Whether a bet of `kind` is locked (cannot be taken down) in `phase`.
pub fn is_locked(kind: BetKind, phase: TablePhase) -> bool {
    match kind.group() {
        RuleGroup::Line => !phase.is_coming_out(),
        RuleGroup::ComePoint => true,
        _ => false,
    }
}

/// Phase, bets and handle allocator of a single table.
///
/// Holds at most one bet per [BetKind]; placing a kind that is already down
/// adds to the existing bet and keeps its handle.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TableState {
    phase: TablePhase,
    bets: BTreeMap<BetHandle, Bet>,
    next_handle: u64,
}

impl TableState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty table in the given phase.
    pub fn with_phase(phase: TablePhase) -> Self {
        Self {
            phase,
            ..Self::default()
        }
    }

    pub fn phase(&self) -> TablePhase {
        self.phase
    }

    /// Active bets in handle order.
    pub fn bets(&self) -> impl Iterator<Item = &Bet> {
        self.bets.values()
    }

    pub fn bet(&self, handle: BetHandle) -> Option<&Bet> {
        self.bets.get(&handle)
    }

    pub fn find(&self, kind: BetKind) -> Option<&Bet> {
        self.bets.values().find(|bet| bet.kind == kind)
    }

    pub fn len(&self) -> usize {
        self.bets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bets.is_empty()
    }

    /// Sum of all amounts on the layout.
    pub fn total_wagered(&self) -> u64 {
        self.bets
            .values()
            .fold(0u64, |acc, bet| acc.saturating_add(bet.amount))
    }

    /// Put down `amount` on `kind`, given the bettor's `available` balance.
    pub fn place(
        &mut self,
        kind: BetKind,
        amount: u64,
        available: Credits,
    ) -> Result<BetHandle, PlacementError> {
        kind.validate()?;
        if amount == 0 {
            return Err(PlacementError::ZeroAmount);
        }
        let total = self
            .find(kind)
            .map_or(0, |bet| bet.amount)
            .saturating_add(amount);
        if total > MAX_BET_AMOUNT {
            return Err(PlacementError::AmountTooLarge {
                kind,
                total,
                max: MAX_BET_AMOUNT,
            });
        }
        if !can_place(kind, self.phase) {
            return Err(PlacementError::IllegalPlacement {
                kind,
                phase: self.phase,
            });
        }
        if !available.covers(amount) {
            return Err(PlacementError::InsufficientFunds {
                required: amount,
                available,
            });
        }
        let handle = self.insert(kind, amount);
        debug!(%kind, amount, %handle, "placed bet");
        Ok(handle)
    }

    /// Take down a bet, returning its amount.
    pub fn remove(&mut self, handle: BetHandle) -> Result<u64, RemovalError> {
        let bet = self
            .bets
            .get(&handle)
            .ok_or(RemovalError::UnknownBetHandle(handle))?;
        if is_locked(bet.kind, self.phase) {
            return Err(RemovalError::BetLocked {
                handle,
                kind: bet.kind,
            });
        }
        let amount = self.take(handle).map(|bet| bet.amount).unwrap_or_default();
        debug!(%handle, amount, "removed bet");
        Ok(amount)
    }

    /// Take down every unlocked bet, returning the total amount.
    pub fn clear(&mut self) -> u64 {
        let phase = self.phase;
        let mut refunded = 0u64;
        self.bets.retain(|_, bet| {
            if is_locked(bet.kind, phase) {
                return true;
            }
            refunded = refunded.saturating_add(bet.amount);
            false
        });
        debug!(refunded, remaining = self.bets.len(), "cleared bets");
        refunded
    }

    /// Insert without legality checks, merging into an existing bet of the same kind.
    pub(crate) fn insert(&mut self, kind: BetKind, amount: u64) -> BetHandle {
        if let Some(existing) = self.bets.values_mut().find(|bet| bet.kind == kind) {
            existing.amount = existing.amount.saturating_add(amount);
            return existing.handle;
        }
        let handle = BetHandle(self.next_handle);
        self.next_handle += 1;
        self.bets.insert(
            handle,
            Bet {
                handle,
                kind,
                amount,
            },
        );
        handle
    }

    pub(crate) fn take(&mut self, handle: BetHandle) -> Option<Bet> {
        self.bets.remove(&handle)
    }

    pub(crate) fn set_phase(&mut self, phase: TablePhase) {
        self.phase = phase;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rollsim_types::craps::Point;

    const BANK: Credits = Credits::from_raw(1_000 * 10_000);

    fn point_table(point: Point) -> TableState {
        TableState::with_phase(TablePhase::PointEstablished(point))
    }

    #[test]
    fn test_can_place_line_bets() {
        let point = TablePhase::PointEstablished(Point::SIX);
        assert!(can_place(BetKind::PassLine, TablePhase::ComingOut));
        assert!(can_place(BetKind::DontPass, TablePhase::ComingOut));
        assert!(!can_place(BetKind::PassLine, point));
        assert!(!can_place(BetKind::DontPass, point));

        assert!(!can_place(BetKind::Come, TablePhase::ComingOut));
        assert!(!can_place(BetKind::DontCome, TablePhase::ComingOut));
        assert!(can_place(BetKind::Come, point));
        assert!(can_place(BetKind::DontCome, point));
    }

    #[test]
    fn test_can_place_anytime_bets() {
        for phase in [TablePhase::ComingOut, TablePhase::PointEstablished(Point::FOUR)] {
            for kind in [
                BetKind::Place(Point::FIVE),
                BetKind::Buy(Point::TEN),
                BetKind::Lay(Point::FOUR),
                BetKind::Field,
                BetKind::AnySeven,
                BetKind::AnyCraps,
                BetKind::HardWay(Point::EIGHT),
                BetKind::SingleNumber(11),
            ] {
                assert!(can_place(kind, phase), "{kind} in {phase}");
            }
            assert!(!can_place(BetKind::ComePoint(Point::FIVE), phase));
            assert!(!can_place(BetKind::DontComePoint(Point::FIVE), phase));
        }
    }

    #[test]
    fn test_place_merges_same_kind() {
        let mut table = TableState::new();
        let first = table.place(BetKind::Field, 5, BANK).unwrap();
        let second = table.place(BetKind::Field, 10, BANK).unwrap();
        assert_eq!(first, second);
        assert_eq!(table.len(), 1);
        assert_eq!(table.bet(first).unwrap().amount, 15);

        let other = table.place(BetKind::AnySeven, 5, BANK).unwrap();
        assert_ne!(other, first);
        assert_eq!(table.total_wagered(), 20);
    }

    #[test]
    fn test_place_errors_leave_table_unchanged() {
        let mut table = point_table(Point::SIX);
        table.place(BetKind::Field, 5, BANK).unwrap();
        let before = table.clone();

        assert_eq!(
            table.place(BetKind::PassLine, 10, BANK),
            Err(PlacementError::IllegalPlacement {
                kind: BetKind::PassLine,
                phase: TablePhase::PointEstablished(Point::SIX),
            })
        );
        assert_eq!(
            table.place(BetKind::Field, 0, BANK),
            Err(PlacementError::ZeroAmount)
        );
        assert!(matches!(
            table.place(BetKind::HardWay(Point::FIVE), 5, BANK),
            Err(PlacementError::InvalidBetKind(_))
        ));
        assert_eq!(
            table.place(BetKind::Come, 50, Credits::from_units(49)),
            Err(PlacementError::InsufficientFunds {
                required: 50,
                available: Credits::from_units(49),
            })
        );
        assert_eq!(table, before);
    }

    #[test]
    fn test_place_rejects_amounts_above_limit() {
        let unlimited = Credits::from_raw(i64::MAX);
        let mut table = TableState::new();
        let before = table.clone();
        assert_eq!(
            table.place(BetKind::Field, MAX_BET_AMOUNT + 1, unlimited),
            Err(PlacementError::AmountTooLarge {
                kind: BetKind::Field,
                total: MAX_BET_AMOUNT + 1,
                max: MAX_BET_AMOUNT,
            })
        );
        assert_eq!(
            table.place(BetKind::Field, u64::MAX, unlimited),
            Err(PlacementError::AmountTooLarge {
                kind: BetKind::Field,
                total: u64::MAX,
                max: MAX_BET_AMOUNT,
            })
        );
        assert_eq!(table, before);

        // Merging counts toward the limit too.
        let handle = table.place(BetKind::Field, MAX_BET_AMOUNT, unlimited).unwrap();
        assert_eq!(
            table.place(BetKind::Field, 1, unlimited),
            Err(PlacementError::AmountTooLarge {
                kind: BetKind::Field,
                total: MAX_BET_AMOUNT + 1,
                max: MAX_BET_AMOUNT,
            })
        );
        assert_eq!(table.bet(handle).unwrap().amount, MAX_BET_AMOUNT);
    }

    #[test]
    fn test_remove_returns_amount() {
        let mut table = TableState::new();
        let handle = table.place(BetKind::Place(Point::SIX), 12, BANK).unwrap();
        assert_eq!(table.remove(handle), Ok(12));
        assert!(table.is_empty());
        assert_eq!(
            table.remove(handle),
            Err(RemovalError::UnknownBetHandle(handle))
        );
    }

    #[test]
    fn test_pass_line_locked_once_point_is_on() {
        let mut table = TableState::new();
        let pass = table.place(BetKind::PassLine, 10, BANK).unwrap();
        // Removable on the come-out roll.
        assert!(!is_locked(BetKind::PassLine, table.phase()));

        table.set_phase(TablePhase::PointEstablished(Point::NINE));
        assert_eq!(
            table.remove(pass),
            Err(RemovalError::BetLocked {
                handle: pass,
                kind: BetKind::PassLine,
            })
        );
        assert!(table.bet(pass).is_some());
    }

    #[test]
    fn test_come_points_always_locked() {
        for phase in [TablePhase::ComingOut, TablePhase::PointEstablished(Point::FOUR)] {
            assert!(is_locked(BetKind::ComePoint(Point::FIVE), phase));
            assert!(is_locked(BetKind::DontComePoint(Point::FIVE), phase));
            assert!(!is_locked(BetKind::Come, phase));
            assert!(!is_locked(BetKind::Place(Point::FIVE), phase));
        }
    }

    #[test]
    fn test_clear_keeps_locked_bets() {
        let mut table = point_table(Point::EIGHT);
        let come_point = table.insert(BetKind::ComePoint(Point::FIVE), 10);
        let pass = table.insert(BetKind::PassLine, 10);
        table.place(BetKind::Place(Point::SIX), 12, BANK).unwrap();
        table.place(BetKind::Field, 5, BANK).unwrap();

        assert_eq!(table.clear(), 17);
        assert_eq!(table.len(), 2);
        assert!(table.bet(come_point).is_some());
        assert!(table.bet(pass).is_some());
    }
}
