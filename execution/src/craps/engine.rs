use super::{
    resolve, PayoutTable, PlacementError, RemovalError, ResolutionError, RollSequencer,
    SequenceError, TableState,
};
use rollsim_types::craps::{
    Bet, BetHandle, BetKind, Credits, ResolutionReport, Roll, RollId, TablePhase,
};
use tracing::{debug, info, warn};

/// A single craps table.
///
/// Every change to the table goes through `&mut self`, so callers sharing a
/// table across threads wrap it in their own lock. [CrapsTable::resolve]
/// either applies a roll completely or not at all.
#[derive(Clone, Debug, Default)]
pub struct CrapsTable {
    state: TableState,
    sequencer: RollSequencer,
    payouts: PayoutTable,
}

impl CrapsTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_payouts(payouts: PayoutTable) -> Self {
        Self {
            payouts,
            ..Self::default()
        }
    }

    /// Keep the last `window` reports for replayed roll ids.
    pub fn with_replay_window(mut self, window: usize) -> Self {
        self.sequencer = RollSequencer::new(window);
        self
    }

    pub fn place(
        &mut self,
        kind: BetKind,
        amount: u64,
        available: Credits,
    ) -> Result<BetHandle, PlacementError> {
        self.state.place(kind, amount, available)
    }

    pub fn remove(&mut self, handle: BetHandle) -> Result<u64, RemovalError> {
        self.state.remove(handle)
    }

    /// Take down every bet that is not locked. Returns the refunded amount.
    pub fn clear(&mut self) -> u64 {
        self.state.clear()
    }

    /// Resolve the roll `(die1, die2)` identified by `roll_id`.
    ///
    /// An id that already resolved returns the report it produced the first
    /// time and changes nothing.
    pub fn resolve(
        &mut self,
        roll_id: RollId,
        die1: u8,
        die2: u8,
    ) -> Result<ResolutionReport, ResolutionError> {
        let roll = Roll::new(die1, die2)?;
        let ticket = match self.sequencer.begin(roll_id) {
            Ok(ticket) => ticket,
            Err(SequenceError::DuplicateRollId { id, report }) => {
                if report.roll != roll {
                    warn!(id, cached = %report.roll, replayed = %roll, "replayed roll with different dice");
                } else {
                    debug!(id, "replayed roll");
                }
                return Ok(*report);
            }
            Err(SequenceError::StaleRollId { id, last }) => {
                warn!(id, last, "stale roll id");
                return Err(ResolutionError::StaleRollId { id, last });
            }
            Err(SequenceError::RollInFlight { in_flight }) => {
                return Err(ResolutionError::RollInFlight { in_flight });
            }
        };

        let resolution = resolve(&self.state, roll, &self.payouts);
        let report = ResolutionReport {
            roll_id,
            roll,
            outcome: resolution.outcome,
            resolutions: resolution.resolutions,
            phase_before: resolution.phase_before,
            phase_after: resolution.phase_after,
        };
        self.state = resolution.next;
        self.sequencer.complete(ticket, report.clone());

        for settled in report.settled() {
            debug!(
                handle = %settled.handle,
                kind = %settled.kind,
                amount = settled.amount,
                disposition = ?settled.disposition,
                "settled bet"
            );
        }
        debug!(
            roll_id,
            %roll,
            outcome = %report.outcome,
            bets = self.state.len(),
            returned = %report.total_returned(),
            "resolved roll"
        );
        if report.phase_before != report.phase_after {
            info!(roll_id, from = %report.phase_before, to = %report.phase_after, "phase changed");
        }
        Ok(report)
    }

    pub fn current_phase(&self) -> TablePhase {
        self.state.phase()
    }

    /// Active bets in handle order.
    pub fn active_bets(&self) -> Vec<Bet> {
        self.state.bets().cloned().collect()
    }

    pub fn bet(&self, handle: BetHandle) -> Option<&Bet> {
        self.state.bet(handle)
    }

    pub fn state(&self) -> &TableState {
        &self.state
    }

    pub fn last_roll_id(&self) -> Option<RollId> {
        self.sequencer.last_id()
    }

    pub fn payouts(&self) -> &PayoutTable {
        &self.payouts
    }

    /// Whether `kind` may be placed right now.
    pub fn can_place(&self, kind: BetKind) -> bool {
        kind.validate().is_ok() && super::can_place(kind, self.state.phase())
    }
}
