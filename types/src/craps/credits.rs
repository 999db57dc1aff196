use serde::{Serialize, Serializer};
use std::fmt;

// Scaling factor for fixed-point arithmetic
// Using 10000 for easy decimal representation (4 decimal places)
pub const SCALE: i64 = 10_000;

/// Fixed-point money with 4 decimal places of precision.
///
/// Bet amounts are whole units, but payouts are not (a $30 Buy on the six
/// returns 34.5), so bankrolls and payouts are carried as `Credits`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Credits(i64);

impl Credits {
    pub const ZERO: Credits = Credits(0);

    /// Create from a whole number of units
    pub fn from_units(units: u64) -> Self {
        let units = i64::try_from(units).unwrap_or(i64::MAX);
        Credits(units.saturating_mul(SCALE))
    }

    /// Create from `amount * numerator / denominator`, truncated to 4 decimal places
    pub fn from_frac(amount: u64, numerator: u64, denominator: u64) -> Self {
        if denominator == 0 {
            return Credits(0);
        }
        let scaled = (amount as i128) * (numerator as i128) * (SCALE as i128);
        let value = scaled / denominator as i128;
        Credits(i64::try_from(value).unwrap_or(i64::MAX))
    }

    /// Create from a raw scaled value
    pub const fn from_raw(raw: i64) -> Self {
        Credits(raw)
    }

    /// Get the raw scaled value
    pub fn raw(self) -> i64 {
        self.0
    }

    pub fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// True if at least `units` whole units are available
    pub fn covers(self, units: u64) -> bool {
        self >= Credits::from_units(units)
    }

    pub fn saturating_add(self, other: Self) -> Self {
        Credits(self.0.saturating_add(other.0))
    }

    pub fn saturating_sub(self, other: Self) -> Self {
        Credits(self.0.saturating_sub(other.0))
    }

    pub fn to_f64(self) -> f64 {
        self.0 as f64 / SCALE as f64
    }
}

impl std::ops::Add for Credits {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        self.saturating_add(other)
    }
}

impl std::ops::Sub for Credits {
    type Output = Self;
    fn sub(self, other: Self) -> Self {
        self.saturating_sub(other)
    }
}

impl std::ops::AddAssign for Credits {
    fn add_assign(&mut self, other: Self) {
        *self = self.saturating_add(other);
    }
}

impl std::ops::SubAssign for Credits {
    fn sub_assign(&mut self, other: Self) {
        *self = self.saturating_sub(other);
    }
}

impl std::ops::Neg for Credits {
    type Output = Self;
    fn neg(self) -> Self {
        Credits(self.0.saturating_neg())
    }
}

impl std::iter::Sum for Credits {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Credits::ZERO, |acc, c| acc + c)
    }
}

impl From<u64> for Credits {
    fn from(units: u64) -> Self {
        Credits::from_units(units)
    }
}

impl fmt::Display for Credits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let whole = abs / SCALE as u64;
        let frac = abs % SCALE as u64;
        if frac == 0 {
            return write!(f, "{sign}{whole}");
        }
        let digits = format!("{frac:04}");
        write!(f, "{sign}{whole}.{}", digits.trim_end_matches('0'))
    }
}

impl Serialize for Credits {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.to_f64())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_units() {
        assert_eq!(Credits::from_units(5).raw(), 50_000);
        assert_eq!(Credits::from_units(0), Credits::ZERO);
    }

    #[test]
    fn test_from_frac() {
        // 6:5 on 30
        assert_eq!(Credits::from_frac(30, 6, 5), Credits::from_units(36));
        // 5% of 30
        assert_eq!(Credits::from_frac(30, 500, 10_000).raw(), 15_000);
        // 7:6 on 10 truncates
        assert_eq!(Credits::from_frac(10, 7, 6).raw(), 116_666);
        assert_eq!(Credits::from_frac(1, 1, 0), Credits::ZERO);
    }

    #[test]
    fn test_arithmetic_saturates() {
        let max = Credits::from_raw(i64::MAX);
        assert_eq!(max + Credits::from_units(1), max);
        let min = Credits::from_raw(i64::MIN);
        assert_eq!(min - Credits::from_units(1), min);
        assert_eq!(-Credits::from_units(3), Credits::from_raw(-30_000));
    }

    #[test]
    fn test_covers() {
        let bank = Credits::from_raw(99_999);
        assert!(bank.covers(9));
        assert!(!bank.covers(10));
    }

    #[test]
    fn test_display() {
        assert_eq!(Credits::from_units(12).to_string(), "12");
        assert_eq!(Credits::from_raw(345_000).to_string(), "34.5");
        assert_eq!(Credits::from_raw(116_666).to_string(), "11.6666");
        assert_eq!(Credits::from_raw(-5_000).to_string(), "-0.5");
    }

    #[test]
    fn test_sum() {
        let total: Credits = [1u64, 2, 3].into_iter().map(Credits::from_units).sum();
        assert_eq!(total, Credits::from_units(6));
    }
}
