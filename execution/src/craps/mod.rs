//! Craps bet resolution.
//!
//! - [table]: bets on the layout and the legality of placing/removing them
//! - [payouts]: winnings per bet kind
//! - [resolution]: pure `(table, roll) -> (report, next table)` transition
//! - [sequencer]: at-most-once admission of caller-identified rolls
//! - [engine]: [CrapsTable], the call boundary used by callers

pub mod engine;
pub mod payouts;
pub mod resolution;
pub mod sequencer;
pub mod table;


pub use engine::CrapsTable;
pub use payouts::{payout, Odds, PayoutRule, PayoutTable};
pub use resolution::{classify, next_phase, resolve, Resolution};
pub use sequencer::{RollSequencer, SequenceError, SequencerState, Ticket};
pub use table::{can_place, is_locked, TableState};

use rollsim_types::craps::{
    BetHandle, BetKind, Credits, InvalidBetKind, InvalidRoll, RollId, TablePhase,
};
use thiserror::Error;

/// Error placing a bet. The table is left unchanged.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PlacementError {
    #[error(transparent)]
    InvalidBetKind(#[from] InvalidBetKind),
    #[error("bet amount must be positive")]
    ZeroAmount,
    #[error("{kind} would carry {total}, above the {max} limit")]
    AmountTooLarge { kind: BetKind, total: u64, max: u64 },
    #[error("{kind} cannot be placed while {phase}")]
    IllegalPlacement { kind: BetKind, phase: TablePhase },
    #[error("insufficient funds: {required} required, {available} available")]
    InsufficientFunds { required: u64, available: Credits },
}

/// Error taking a bet down. The table is left unchanged.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum RemovalError {
    #[error("no bet with handle {0}")]
    UnknownBetHandle(BetHandle),
    #[error("{kind} ({handle}) is locked until it resolves")]
    BetLocked { handle: BetHandle, kind: BetKind },
}

/// Error resolving a roll. Nothing is applied when one is returned.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionError {
    #[error(transparent)]
    InvalidRoll(#[from] InvalidRoll),
    #[error("roll {id} is not after the last resolved roll {last} and is no longer cached")]
    StaleRollId { id: RollId, last: RollId },
    /// An earlier [CrapsTable::resolve] unwound before completing `in_flight`.
    #[error("roll {in_flight} is still being resolved")]
    RollInFlight { in_flight: RollId },
}
