use super::{Point, MAX_DIE, MIN_DIE};
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Caller-supplied identifier of a physical roll. Must strictly increase.
pub type RollId = u64;

/// A pair of dice.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Roll {
    die1: u8,
    die2: u8,
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("invalid roll ({die1}, {die2}): dice must be between 1 and 6")]
pub struct InvalidRoll {
    pub die1: u8,
    pub die2: u8,
}

impl Roll {
    pub fn new(die1: u8, die2: u8) -> Result<Self, InvalidRoll> {
        let face = MIN_DIE..=MAX_DIE;
        if face.contains(&die1) && face.contains(&die2) {
            Ok(Roll { die1, die2 })
        } else {
            Err(InvalidRoll { die1, die2 })
        }
    }

    pub fn die1(&self) -> u8 {
        self.die1
    }

    pub fn die2(&self) -> u8 {
        self.die2
    }

    /// Sum of both dice, always in 2..=12.
    pub fn total(&self) -> u8 {
        self.die1 + self.die2
    }

    /// Both dice show the same face.
    pub fn is_hard(&self) -> bool {
        self.die1 == self.die2
    }

    /// Every one of the 36 ordered dice combinations.
    pub fn all() -> impl Iterator<Item = Roll> {
        (MIN_DIE..=MAX_DIE)
            .flat_map(|die1| (MIN_DIE..=MAX_DIE).map(move |die2| Roll { die1, die2 }))
    }
}

impl fmt::Display for Roll {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}+{}={}", self.die1, self.die2, self.total())
    }
}

/// Classification of a roll against the phase it was rolled in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "type", content = "point", rename_all = "kebab-case")]
pub enum RollOutcome {
    /// 7 or 11 on a come-out roll
    Natural,
    /// 2, 3 or 12 on a come-out roll
    Craps,
    /// A point number on a come-out roll
    PointSet(Point),
    /// The point repeated before a seven
    PointMade(Point),
    /// A seven while a point is on
    SevenOut,
    /// Anything else during a point round
    Normal,
}

impl RollOutcome {
    /// The outcome ends the current round and returns the table to a come-out roll.
    pub fn ends_round(&self) -> bool {
        matches!(self, RollOutcome::PointMade(_) | RollOutcome::SevenOut)
    }
}

impl fmt::Display for RollOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RollOutcome::Natural => write!(f, "natural"),
            RollOutcome::Craps => write!(f, "craps"),
            RollOutcome::PointSet(point) => write!(f, "point set ({point})"),
            RollOutcome::PointMade(point) => write!(f, "point made ({point})"),
            RollOutcome::SevenOut => write!(f, "seven out"),
            RollOutcome::Normal => write!(f, "normal"),
        }
    }
}
