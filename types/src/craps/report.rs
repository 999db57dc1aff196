use super::{BetHandle, BetKind, Credits, Roll, RollId, RollOutcome, TablePhase};
use serde::Serialize;

/// What happened to a single bet on a single roll.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Disposition {
    /// The bet won. The value is the payout only; the stake comes back with it.
    Win(Credits),
    /// The bet lost and was taken down.
    Lose,
    /// Standoff: the bet stays where it is.
    Push,
    /// The bet travels to a new kind with the same amount.
    Move(BetKind),
    /// The roll does not affect this bet.
    Unresolved,
}

impl Disposition {
    /// The bet leaves its current spot on the layout.
    pub fn removes_bet(&self) -> bool {
        matches!(
            self,
            Disposition::Win(_) | Disposition::Lose | Disposition::Move(_)
        )
    }
}

/// Resolution of one active bet.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct BetResolution {
    pub handle: BetHandle,
    pub kind: BetKind,
    pub amount: u64,
    pub disposition: Disposition,
    /// Handle of the bet created by a [Disposition::Move].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub successor: Option<BetHandle>,
}

impl BetResolution {
    /// Amount the caller credits back to the bettor (stake + payout on a win).
    pub fn returned(&self) -> Credits {
        match self.disposition {
            Disposition::Win(payout) => Credits::from_units(self.amount) + payout,
            _ => Credits::ZERO,
        }
    }
}

/// Everything a caller needs to settle one roll.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ResolutionReport {
    pub roll_id: RollId,
    pub roll: Roll,
    pub outcome: RollOutcome,
    /// One entry per bet that was on the table before the roll, in handle order.
    pub resolutions: Vec<BetResolution>,
    pub phase_before: TablePhase,
    pub phase_after: TablePhase,
}

impl ResolutionReport {
    pub fn resolution(&self, handle: BetHandle) -> Option<&BetResolution> {
        self.resolutions.iter().find(|r| r.handle == handle)
    }

    /// Find the resolution of the bet that was of `kind` before the roll.
    pub fn resolution_for(&self, kind: BetKind) -> Option<&BetResolution> {
        self.resolutions.iter().find(|r| r.kind == kind)
    }

    /// Total to credit back to the bettor for this roll.
    pub fn total_returned(&self) -> Credits {
        self.resolutions.iter().map(BetResolution::returned).sum()
    }

    /// Resolutions other than [Disposition::Unresolved].
    pub fn settled(&self) -> impl Iterator<Item = &BetResolution> {
        self.resolutions
            .iter()
            .filter(|r| r.disposition != Disposition::Unresolved)
    }
}
