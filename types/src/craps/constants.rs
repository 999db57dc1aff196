/// Lowest face of a die
pub const MIN_DIE: u8 = 1;

/// Highest face of a die
pub const MAX_DIE: u8 = 6;

/// The total that ends a point round (and wins on a come-out roll)
pub const SEVEN: u8 = 7;

/// Totals that win line bets on a come-out roll
pub const NATURAL_NUMBERS: [u8; 2] = [7, 11];

/// Totals that lose line bets on a come-out roll
pub const CRAPS_NUMBERS: [u8; 3] = [2, 3, 12];

/// Totals that establish a point
pub const POINT_NUMBERS: [u8; 6] = [4, 5, 6, 8, 9, 10];

/// Totals that can be rolled the hard way
pub const HARD_WAY_NUMBERS: [u8; 4] = [4, 6, 8, 10];

/// Totals offered as single-number proposition bets
pub const SINGLE_NUMBERS: [u8; 4] = [2, 3, 11, 12];

/// Totals that win the Field
pub const FIELD_NUMBERS: [u8; 7] = [2, 3, 4, 9, 10, 11, 12];

/// Don't Pass and Don't Come bar this total on a come-out roll (push instead of win)
pub const BAR_NUMBER: u8 = 12;

/// Buy/Lay commission in basis points (5.00%)
pub const COMMISSION_BPS: u64 = 500;

/// Basis point denominator
pub const BPS_DENOMINATOR: u64 = 10_000;

/// Largest `N` to 1 a configurable payout may be set to
pub const MAX_PAYOUT_TO_ONE: u64 = 100;

/// Largest amount a single bet may carry, in whole units.
///
/// `MAX_BET_AMOUNT * (MAX_PAYOUT_TO_ONE + 1)` scaled credits fits in an `i64`
/// with room for every bet on the layout winning at once.
pub const MAX_BET_AMOUNT: u64 = 10_000_000_000;

/// Starting bank for a new session
pub const STARTING_BANK: u64 = 1_000;

/// Number of resolved rolls whose reports are kept for replay
pub const DEFAULT_REPLAY_WINDOW: usize = 64;

/// Number of ways to roll each total with 2d6
pub const WAYS: [u8; 13] = [0, 0, 1, 2, 3, 4, 5, 6, 5, 4, 3, 2, 1];
//                          0  1  2  3  4  5  6  7  8  9 10 11 12
