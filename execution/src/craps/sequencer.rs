//! At-most-once admission of rolls.
//!
//! Roll ids play the part of an account nonce: each id resolves once, ids
//! must increase, and an id that already resolved is answered from a bounded
//! cache of recent reports instead of being applied again.

use rollsim_types::craps::{ResolutionReport, RollId, DEFAULT_REPLAY_WINDOW};
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SequencerState {
    /// No roll has been admitted yet.
    Idle,
    /// `id` was admitted and has neither completed nor aborted.
    RollInFlight { id: RollId, last: Option<RollId> },
    /// The most recent roll to complete.
    Resolved(RollId),
}

/// Why a roll id was not admitted.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SequenceError {
    /// Already resolved; carries the report produced the first time.
    #[error("roll {id} was already resolved")]
    DuplicateRollId {
        id: RollId,
        report: Box<ResolutionReport>,
    },
    #[error("roll {id} is not after the last resolved roll {last}")]
    StaleRollId { id: RollId, last: RollId },
    #[error("roll {in_flight} is still being resolved")]
    RollInFlight { in_flight: RollId },
}

/// Permission to resolve one roll. Consumed by [RollSequencer::complete] or
/// [RollSequencer::abort].
#[derive(Debug, PartialEq, Eq)]
pub struct Ticket {
    id: RollId,
}

impl Ticket {
    pub fn id(&self) -> RollId {
        self.id
    }
}

/// Admits roll ids in increasing order and caches recent reports.
///
/// [CrapsTable](super::CrapsTable) admits and completes each roll within one
/// `&mut self` call, so it never sees a roll in flight or needs [Self::abort].
/// Callers that resolve in separate steps (admit, compute with
/// [resolve](super::resolve), then commit) drive a sequencer directly and
/// rely on both.
#[derive(Clone, Debug)]
pub struct RollSequencer {
    state: SequencerState,
    window: usize,
    reports: BTreeMap<RollId, ResolutionReport>,
}

impl Default for RollSequencer {
    fn default() -> Self {
        Self::new(DEFAULT_REPLAY_WINDOW)
    }
}

impl RollSequencer {
    /// Sequencer that keeps the last `window` reports (at least one).
    pub fn new(window: usize) -> Self {
        Self {
            state: SequencerState::Idle,
            window: window.max(1),
            reports: BTreeMap::new(),
        }
    }

    pub fn state(&self) -> SequencerState {
        self.state
    }

    pub fn window(&self) -> usize {
        self.window
    }

    /// Id of the most recently completed roll.
    pub fn last_id(&self) -> Option<RollId> {
        match self.state {
            SequencerState::Idle => None,
            SequencerState::RollInFlight { last, .. } => last,
            SequencerState::Resolved(last) => Some(last),
        }
    }

    pub fn cached(&self, id: RollId) -> Option<&ResolutionReport> {
        self.reports.get(&id)
    }

    /// Admit `id` for resolution.
    pub fn begin(&mut self, id: RollId) -> Result<Ticket, SequenceError> {
        let last = match self.state {
            SequencerState::RollInFlight { id: in_flight, .. } => {
                return Err(SequenceError::RollInFlight { in_flight });
            }
            SequencerState::Idle => None,
            SequencerState::Resolved(last) => Some(last),
        };
        if let Some(last) = last {
            if id <= last {
                return Err(match self.reports.get(&id) {
                    Some(report) => SequenceError::DuplicateRollId {
                        id,
                        report: Box::new(report.clone()),
                    },
                    None => SequenceError::StaleRollId { id, last },
                });
            }
        }
        self.state = SequencerState::RollInFlight { id, last };
        Ok(Ticket { id })
    }

    /// Record the report for an admitted roll.
    pub fn complete(&mut self, ticket: Ticket, report: ResolutionReport) {
        debug_assert_eq!(
            self.state,
            SequencerState::RollInFlight {
                id: ticket.id,
                last: self.last_id()
            }
        );
        self.reports.insert(ticket.id, report);
        while self.reports.len() > self.window {
            self.reports.pop_first();
        }
        self.state = SequencerState::Resolved(ticket.id);
    }

    /// Give up an admitted roll without consuming its id.
    pub fn abort(&mut self, ticket: Ticket) {
        if let SequencerState::RollInFlight { id, last } = self.state {
            debug_assert_eq!(id, ticket.id);
            self.state = match last {
                Some(last) => SequencerState::Resolved(last),
                None => SequencerState::Idle,
            };
        }
    }
}
