use super::{HARD_WAY_NUMBERS, POINT_NUMBERS, SINGLE_NUMBERS};
use serde::{Serialize, Serializer};
use std::{fmt, str::FromStr};
use thiserror::Error;

/// One of the six totals that can become a point: 4, 5, 6, 8, 9 or 10.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Point(u8);

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("{0} is not a point number")]
pub struct InvalidPoint(pub u8);

impl Point {
    pub const FOUR: Point = Point(4);
    pub const FIVE: Point = Point(5);
    pub const SIX: Point = Point(6);
    pub const EIGHT: Point = Point(8);
    pub const NINE: Point = Point(9);
    pub const TEN: Point = Point(10);

    pub fn new(number: u8) -> Result<Self, InvalidPoint> {
        if POINT_NUMBERS.contains(&number) {
            Ok(Point(number))
        } else {
            Err(InvalidPoint(number))
        }
    }

    /// The total as a plain number.
    pub fn get(self) -> u8 {
        self.0
    }

    /// All six points in ascending order.
    pub fn all() -> impl Iterator<Item = Point> {
        POINT_NUMBERS.into_iter().map(Point)
    }
}

impl TryFrom<u8> for Point {
    type Error = InvalidPoint;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Point::new(value)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Every wager offered on the layout.
///
/// Number-carrying variants resolve on their own number. `ComePoint` and
/// `DontComePoint` are never placed directly; they are what a Come or Don't
/// Come bet becomes after it travels to a number.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BetKind {
    PassLine,
    DontPass,
    Come,
    DontCome,
    ComePoint(Point),
    DontComePoint(Point),
    Place(Point),
    Buy(Point),
    Lay(Point),
    Field,
    AnySeven,
    AnyCraps,
    HardWay(Point),
    SingleNumber(u8),
}

/// The rule group that resolves a bet kind. Every kind belongs to exactly one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RuleGroup {
    /// Pass Line / Don't Pass
    Line,
    /// Place and Buy: number before seven
    PlaceBuy,
    /// Lay: seven before number
    Lay,
    /// Come / Don't Come before they travel
    ComeBase,
    /// Come / Don't Come after they travel
    ComePoint,
    /// Field, Any Seven, Any Craps, single numbers
    OneRoll,
    /// Hard 4, 6, 8 and 10
    HardWay,
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("`{0}` is not a valid bet")]
pub struct InvalidBetKind(pub BetKind);

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseBetKindError {
    #[error("unknown bet `{0}`")]
    Unknown(String),
    #[error("invalid number in bet `{value}`")]
    InvalidNumber {
        value: String,
        #[source]
        source: InvalidPoint,
    },
    #[error(transparent)]
    Invalid(#[from] InvalidBetKind),
}

impl BetKind {
    pub fn group(&self) -> RuleGroup {
        match self {
            BetKind::PassLine | BetKind::DontPass => RuleGroup::Line,
            BetKind::Place(_) | BetKind::Buy(_) => RuleGroup::PlaceBuy,
            BetKind::Lay(_) => RuleGroup::Lay,
            BetKind::Come | BetKind::DontCome => RuleGroup::ComeBase,
            BetKind::ComePoint(_) | BetKind::DontComePoint(_) => RuleGroup::ComePoint,
            BetKind::Field | BetKind::AnySeven | BetKind::AnyCraps | BetKind::SingleNumber(_) => {
                RuleGroup::OneRoll
            }
            BetKind::HardWay(_) => RuleGroup::HardWay,
        }
    }

    /// Check the number carried by the kind (points are checked by [Point]).
    pub fn validate(&self) -> Result<(), InvalidBetKind> {
        let valid = match self {
            BetKind::HardWay(point) => HARD_WAY_NUMBERS.contains(&point.get()),
            BetKind::SingleNumber(number) => SINGLE_NUMBERS.contains(number),
            _ => true,
        };
        if valid {
            Ok(())
        } else {
            Err(InvalidBetKind(*self))
        }
    }

    /// Bets that resolve on the very next roll, whatever it is.
    pub fn is_one_roll(&self) -> bool {
        self.group() == RuleGroup::OneRoll
    }

    /// Bets that are off (cannot win or lose) until a point is established.
    pub fn needs_point(&self) -> bool {
        matches!(self.group(), RuleGroup::PlaceBuy | RuleGroup::Lay)
    }
}

impl fmt::Display for BetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BetKind::PassLine => write!(f, "pass-line"),
            BetKind::DontPass => write!(f, "dont-pass"),
            BetKind::Come => write!(f, "come"),
            BetKind::DontCome => write!(f, "dont-come"),
            BetKind::ComePoint(point) => write!(f, "come-{point}"),
            BetKind::DontComePoint(point) => write!(f, "dont-come-{point}"),
            BetKind::Place(point) => write!(f, "place-{point}"),
            BetKind::Buy(point) => write!(f, "buy-{point}"),
            BetKind::Lay(point) => write!(f, "lay-{point}"),
            BetKind::Field => write!(f, "field"),
            BetKind::AnySeven => write!(f, "any-7"),
            BetKind::AnyCraps => write!(f, "any-craps"),
            BetKind::HardWay(point) => write!(f, "hard-{point}"),
            BetKind::SingleNumber(number) => write!(f, "roll-{number}"),
        }
    }
}

fn parse_point(value: &str, number: &str) -> Result<Point, ParseBetKindError> {
    let number: u8 = number
        .parse()
        .map_err(|_| ParseBetKindError::Unknown(value.to_string()))?;
    Point::new(number).map_err(|source| ParseBetKindError::InvalidNumber {
        value: value.to_string(),
        source,
    })
}

impl FromStr for BetKind {
    type Err = ParseBetKindError;

    /// Parse a layout area id such as `pass-line`, `place-6` or `hard-8`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let kind = match s {
            "pass-line" => BetKind::PassLine,
            "dont-pass" => BetKind::DontPass,
            "come" => BetKind::Come,
            "dont-come" => BetKind::DontCome,
            "field" => BetKind::Field,
            "any-7" => BetKind::AnySeven,
            "any-craps" => BetKind::AnyCraps,
            _ => {
                if let Some(n) = s.strip_prefix("dont-come-") {
                    BetKind::DontComePoint(parse_point(s, n)?)
                } else if let Some(n) = s.strip_prefix("come-") {
                    BetKind::ComePoint(parse_point(s, n)?)
                } else if let Some(n) = s.strip_prefix("place-") {
                    BetKind::Place(parse_point(s, n)?)
                } else if let Some(n) = s.strip_prefix("buy-") {
                    BetKind::Buy(parse_point(s, n)?)
                } else if let Some(n) = s.strip_prefix("lay-") {
                    BetKind::Lay(parse_point(s, n)?)
                } else if let Some(n) = s.strip_prefix("hard-") {
                    BetKind::HardWay(parse_point(s, n)?)
                } else if let Some(n) = s.strip_prefix("roll-") {
                    let number = n
                        .parse()
                        .map_err(|_| ParseBetKindError::Unknown(s.to_string()))?;
                    BetKind::SingleNumber(number)
                } else {
                    return Err(ParseBetKindError::Unknown(s.to_string()));
                }
            }
        };
        kind.validate()?;
        Ok(kind)
    }
}

impl Serialize for BetKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Opaque handle a caller uses to refer to a bet on the table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct BetHandle(pub u64);

impl fmt::Display for BetHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A wager on the table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Bet {
    pub handle: BetHandle,
    pub kind: BetKind,
    /// Whole currency units, always positive.
    pub amount: u64,
}
