use super::Point;
use serde::Serialize;
use std::fmt;

/// Craps phases.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "phase", content = "point", rename_all = "snake_case")]
pub enum TablePhase {
    /// No point; the next roll is a come-out roll.
    #[default]
    ComingOut,
    /// A point is on; the round ends when it is made or a seven is rolled.
    PointEstablished(Point),
}

impl TablePhase {
    /// The point, present iff the phase is [TablePhase::PointEstablished].
    pub fn point(&self) -> Option<Point> {
        match self {
            TablePhase::ComingOut => None,
            TablePhase::PointEstablished(point) => Some(*point),
        }
    }

    pub fn is_coming_out(&self) -> bool {
        matches!(self, TablePhase::ComingOut)
    }
}

impl fmt::Display for TablePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TablePhase::ComingOut => write!(f, "coming out"),
            TablePhase::PointEstablished(point) => write!(f, "point {point}"),
        }
    }
}
