//! Test helpers shared by this crate and its dependents (`mocks` feature).

use crate::craps::CrapsTable;
use rollsim_types::craps::{Credits, Point, ResolutionReport, RollId};

/// Balance large enough to cover any bet in a test.
///
/// Placement still rejects amounts above
/// [rollsim_types::craps::MAX_BET_AMOUNT], whatever the balance.
pub const UNLIMITED: Credits = Credits::from_raw(i64::MAX);

/// Dice showing `total`, rolled the easy way when there is one.
pub fn dice_for(total: u8) -> (u8, u8) {
    assert!((2..=12).contains(&total), "no dice total {total}");
    match total {
        2 => (1, 1),
        12 => (6, 6),
        t if t <= 7 => (1, t - 1),
        t => (6, t - 6),
    }
}

/// Dice showing `total` as a pair.
pub fn hard_dice(total: u8) -> (u8, u8) {
    assert!(
        total % 2 == 0 && (2..=12).contains(&total),
        "{total} cannot be rolled hard"
    );
    (total / 2, total / 2)
}

/// Feeds rolls to a table with increasing roll ids.
#[derive(Debug)]
pub struct ScriptedDice {
    next_id: RollId,
}

impl Default for ScriptedDice {
    fn default() -> Self {
        Self::starting_at(1)
    }
}

impl ScriptedDice {
    pub fn starting_at(next_id: RollId) -> Self {
        Self { next_id }
    }

    /// Id the next roll will use.
    pub fn next_id(&self) -> RollId {
        self.next_id
    }

    /// Roll `(die1, die2)` under the next id.
    pub fn roll(&mut self, table: &mut CrapsTable, dice: (u8, u8)) -> ResolutionReport {
        let id = self.next_id;
        self.next_id += 1;
        table
            .resolve(id, dice.0, dice.1)
            .expect("scripted roll failed")
    }

    /// Roll `total` the easy way.
    pub fn total(&mut self, table: &mut CrapsTable, total: u8) -> ResolutionReport {
        self.roll(table, dice_for(total))
    }

    /// Roll each total in turn.
    pub fn totals(&mut self, table: &mut CrapsTable, totals: &[u8]) -> Vec<ResolutionReport> {
        totals.iter().map(|total| self.total(table, *total)).collect()
    }
}

/// Empty table with `point` established, plus the dice that will drive it.
pub fn table_with_point(point: Point) -> (CrapsTable, ScriptedDice) {
    let mut table = CrapsTable::new();
    let mut dice = ScriptedDice::default();
    dice.total(&mut table, point.get());
    (table, dice)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rollsim_types::craps::{Roll, TablePhase};

    #[test]
    fn test_dice_for_every_total() {
        for total in 2..=12 {
            let (die1, die2) = dice_for(total);
            let roll = Roll::new(die1, die2).unwrap();
            assert_eq!(roll.total(), total);
            if ![2, 12].contains(&total) {
                assert!(!roll.is_hard(), "{total}");
            }
        }
        for total in [4, 6, 8, 10] {
            let (die1, die2) = hard_dice(total);
            assert!(Roll::new(die1, die2).unwrap().is_hard());
        }
    }

    #[test]
    fn test_table_with_point() {
        let (table, dice) = table_with_point(Point::NINE);
        assert_eq!(
            table.current_phase(),
            TablePhase::PointEstablished(Point::NINE)
        );
        assert_eq!(dice.next_id(), 2);
    }
}
