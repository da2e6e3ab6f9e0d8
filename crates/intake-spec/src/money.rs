use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;
use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MoneyError {
    #[error("'{0}' is not a money amount")]
    Malformed(String),
    #[error("amount is too large to compute")]
    Overflow,
}

/// A non-negative dollar amount as typed by an applicant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(Decimal);

fn money_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^\d*(\.\d+)?$").expect("money pattern is valid"))
}

impl Money {
    pub const ZERO: Money = Money(Decimal::ZERO);

    pub fn from_cents(cents: i64) -> Self {
        Money(Decimal::new(cents, 2))
    }

    pub fn from_dollars(dollars: i64) -> Self {
        Money(Decimal::from(dollars))
    }

    /// Parses an amount, tolerating a leading `$`, thousands separators and surrounding spaces.
    pub fn parse(raw: &str) -> Result<Self, MoneyError> {
        let cleaned: String = raw
            .trim()
            .trim_start_matches('$')
            .chars()
            .filter(|ch| *ch != ',')
            .collect();
        if cleaned.is_empty() || !money_pattern().is_match(&cleaned) {
            return Err(MoneyError::Malformed(raw.to_string()));
        }
        let normalized = if cleaned.starts_with('.') {
            format!("0{cleaned}")
        } else {
            cleaned
        };
        Decimal::from_str(&normalized)
            .map(Money)
            .map_err(|_| MoneyError::Malformed(raw.to_string()))
    }

    /// Parses an optional answer, using `default` when it is absent or blank.
    pub fn parse_or(raw: Option<&str>, default: Money) -> Result<Self, MoneyError> {
        match raw {
            Some(text) if !text.trim().is_empty() => Money::parse(text),
            _ => Ok(default),
        }
    }

    pub fn amount(&self) -> Decimal {
        self.0
    }

    pub fn checked_add(self, rhs: Money) -> Result<Money, MoneyError> {
        self.0.checked_add(rhs.0).map(Money).ok_or(MoneyError::Overflow)
    }

    pub fn checked_mul(self, factor: Decimal) -> Result<Money, MoneyError> {
        self.0.checked_mul(factor).map(Money).ok_or(MoneyError::Overflow)
    }

    /// Sum of all amounts, failing instead of wrapping or panicking.
    pub fn checked_sum(amounts: impl IntoIterator<Item = Money>) -> Result<Money, MoneyError> {
        amounts
            .into_iter()
            .try_fold(Money::ZERO, |total, amount| total.checked_add(amount))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}
