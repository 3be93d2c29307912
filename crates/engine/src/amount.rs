use std::{cmp::Ordering, fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::EngineError;

/// Signed monetary amount.
///
/// The value is any **finite** decimal number; there is no currency and no
/// sign constraint (expenses and income are both plain numbers). It is
/// persisted as a bare JSON number.
///
/// # Examples
///
/// ```rust
/// use engine::Amount;
///
/// let amount: Amount = "12,5".parse().unwrap();
/// assert_eq!(amount.value(), 12.5);
/// assert_eq!(amount.to_string(), "12.5");
/// assert_eq!(Amount::new(10.0).unwrap().to_string(), "10.0");
/// ```
///
/// Non-numeric and non-finite input is rejected:
///
/// ```rust
/// use engine::Amount;
///
/// assert!("twelve".parse::<Amount>().is_err());
/// assert!("inf".parse::<Amount>().is_err());
/// assert!(Amount::new(f64::NAN).is_err());
/// ```
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Amount(f64);

impl Amount {
    pub const ZERO: Amount = Amount(0.0);

    /// Creates an amount, rejecting NaN and infinities.
    pub fn new(value: f64) -> Result<Self, EngineError> {
        if !value.is_finite() {
            return Err(EngineError::InvalidAmount(format!(
                "{value} is not a finite number"
            )));
        }
        Ok(Self(value))
    }

    /// Returns the raw value.
    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }

    /// Checked addition (returns `None` when the sum is not finite).
    #[must_use]
    pub fn checked_add(self, rhs: Amount) -> Option<Amount> {
        Self::new(self.0 + rhs.0).ok()
    }

    /// Adds every amount, stopping at the first sum that is not finite.
    pub fn checked_sum(amounts: impl IntoIterator<Item = Amount>) -> Option<Amount> {
        amounts.into_iter().try_fold(Self::ZERO, Self::checked_add)
    }
}

/// Shortest round-trip form, with `.0` kept on integral values. This is the
/// same text the JSON file holds, so substring search sees what the user sees.
impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.0)
    }
}

impl PartialEq for Amount {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Amount {}

impl PartialOrd for Amount {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Amount {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl TryFrom<f64> for Amount {
    type Error = EngineError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Amount> for f64 {
    fn from(value: Amount) -> Self {
        value.0
    }
}

impl FromStr for Amount {
    type Err = EngineError;

    /// Parses user input into an amount.
    ///
    /// Accepts `.` or `,` as decimal separator and an optional leading `+`/`-`.
    ///
    /// Validation rules:
    /// - digits with at most one separator, at least one digit
    /// - a comma followed by exactly three digits is read as a thousands
    ///   separator and refused
    /// - no exponents, no `inf`/`NaN`
    /// - the result must be finite
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || EngineError::InvalidAmount(format!("\"{}\" is not a number", s.trim()));

        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(EngineError::InvalidAmount("empty amount".to_string()));
        }

        let (negative, rest) = if let Some(stripped) = trimmed.strip_prefix('-') {
            (true, stripped)
        } else if let Some(stripped) = trimmed.strip_prefix('+') {
            (false, stripped)
        } else {
            (false, trimmed)
        };

        if let Some((_, fraction)) = rest.split_once(',')
            && fraction.len() == 3
            && fraction.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(EngineError::InvalidAmount(format!(
                "\"{trimmed}\" uses ',' as a thousands separator"
            )));
        }

        let rest = rest.replace(',', ".");
        let mut separators = 0;
        let mut digits = 0;
        for c in rest.chars() {
            match c {
                '.' => separators += 1,
                c if c.is_ascii_digit() => digits += 1,
                _ => return Err(invalid()),
            }
        }
        if separators > 1 || digits == 0 {
            return Err(invalid());
        }

        let value: f64 = rest.parse().map_err(|_| invalid())?;
        let value = if negative { -value } else { value };
        Self::new(value).map_err(|_| EngineError::InvalidAmount("amount too large".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_keeps_fraction_on_whole_numbers() {
        assert_eq!(Amount(0.0).to_string(), "0.0");
        assert_eq!(Amount(10.0).to_string(), "10.0");
        assert_eq!(Amount(12.5).to_string(), "12.5");
        assert_eq!(Amount(-3.25).to_string(), "-3.25");
    }

    #[test]
    fn parse_accepts_dot_or_comma() {
        assert_eq!("10".parse::<Amount>().unwrap().value(), 10.0);
        assert_eq!("10.5".parse::<Amount>().unwrap().value(), 10.5);
        assert_eq!("10,50".parse::<Amount>().unwrap().value(), 10.5);
        assert_eq!("-0.01".parse::<Amount>().unwrap().value(), -0.01);
        assert_eq!("+1.00".parse::<Amount>().unwrap().value(), 1.0);
        assert_eq!("  2.30 ".parse::<Amount>().unwrap().value(), 2.3);
        assert_eq!(".5".parse::<Amount>().unwrap().value(), 0.5);
    }

    #[test]
    fn parse_rejects_garbage() {
        for input in ["", "  ", "-", "abc", "1.2.3", "1e3", "inf", "NaN", "1,000.5", "1,000", "-2,500", "12€"] {
            assert!(input.parse::<Amount>().is_err(), "accepted {input:?}");
        }
    }

    #[test]
    fn parse_rejects_overflow() {
        let huge = "9".repeat(400);
        assert_eq!(
            huge.parse::<Amount>(),
            Err(EngineError::InvalidAmount("amount too large".to_string()))
        );
    }

    #[test]
    fn thousands_separator_is_named_in_the_error() {
        assert_eq!(
            "1,000".parse::<Amount>(),
            Err(EngineError::InvalidAmount(
                "\"1,000\" uses ',' as a thousands separator".to_string()
            ))
        );
        assert_eq!("1,00".parse::<Amount>().unwrap().value(), 1.0);
        assert_eq!("1.000".parse::<Amount>().unwrap().value(), 1.0);
    }

    #[test]
    fn sums_amounts() {
        let amounts = [Amount(10.0), Amount(20.0), Amount(-5.5)];
        assert_eq!(Amount::checked_sum(amounts), Some(Amount(24.5)));
        assert_eq!(Amount::checked_sum([]), Some(Amount::ZERO));
    }

    #[test]
    fn checked_add_refuses_infinite_results() {
        assert_eq!(Amount(1e308).checked_add(Amount(1e308)), None);
        assert_eq!(Amount(-1e308).checked_add(Amount(-1e308)), None);
        assert_eq!(Amount(1e308).checked_add(Amount(-1e308)), Some(Amount::ZERO));
        assert_eq!(Amount::checked_sum([Amount(1e308), Amount(1e308), Amount(-1e308)]), None);
    }

    #[test]
    fn orders_numerically() {
        let mut amounts = vec![Amount(10.0), Amount(5.0), Amount(-1.0), Amount(100.0)];
        amounts.sort();
        assert_eq!(
            amounts,
            vec![Amount(-1.0), Amount(5.0), Amount(10.0), Amount(100.0)]
        );
    }

    #[test]
    fn deserialize_accepts_integers_and_floats() {
        let a: Amount = serde_json::from_str("500").unwrap();
        let b: Amount = serde_json::from_str("12.5").unwrap();
        assert_eq!(a.value(), 500.0);
        assert_eq!(b.value(), 12.5);
        assert_eq!(serde_json::to_string(&b).unwrap(), "12.5");
    }
}
