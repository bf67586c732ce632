//! Type-safe price representation using decimal arithmetic.
//!
//! All prices are Sri Lankan rupees. A [`Price`] is never negative: negative
//! inputs are clamped to zero at construction.

use core::fmt;
use core::iter::Sum;
use core::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Currency prefix used when displaying prices.
pub const CURRENCY_PREFIX: &str = "LKR";

/// A non-negative amount in rupees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Price(Decimal);

impl Price {
    /// A zero price.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a price, clamping negative amounts to zero.
    #[must_use]
    pub fn new(amount: Decimal) -> Self {
        if amount.is_sign_negative() {
            Self::ZERO
        } else {
            Self(amount)
        }
    }

    /// Create a price from a whole number of rupees.
    #[must_use]
    pub fn from_rupees(rupees: u64) -> Self {
        Self(Decimal::from(rupees))
    }

    /// Get the underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Price of `qty` units at this price.
    #[must_use]
    pub fn times(&self, qty: u32) -> Self {
        Self(self.0.saturating_mul(Decimal::from(qty)))
    }

    /// Parse a price leniently: numeric strings and numbers are accepted,
    /// anything else yields zero.
    #[must_use]
    pub fn lenient(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::Number(n) => Decimal::from_str(&n.to_string())
                .ok()
                .or_else(|| n.as_f64().and_then(saturating_from_f64))
                .map_or(Self::ZERO, Self::new),
            serde_json::Value::String(s) => parse_decimal(s).map_or(Self::ZERO, Self::new),
            _ => Self::ZERO,
        }
    }

    /// Format for display (e.g., "LKR 12,500").
    #[must_use]
    pub fn display(&self) -> String {
        format!("{CURRENCY_PREFIX} {}", group_thousands(self.0))
    }
}

/// Parse a decimal from user or wire input.
///
/// Accepts plain decimals and float notation (`1e3`). Blank or non-numeric
/// input yields `None`.
#[must_use]
pub fn parse_decimal(input: &str) -> Option<Decimal> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }
    Decimal::from_str(trimmed).ok().or_else(|| {
        trimmed
            .parse::<f64>()
            .ok()
            .filter(|f| f.is_finite())
            .and_then(saturating_from_f64)
    })
}

/// Convert a float, clamping magnitudes beyond `Decimal`'s range to
/// `Decimal::MAX`/`Decimal::MIN`.
fn saturating_from_f64(value: f64) -> Option<Decimal> {
    if !value.is_finite() {
        return None;
    }
    Decimal::from_f64(value).or(Some(if value.is_sign_negative() {
        Decimal::MIN
    } else {
        Decimal::MAX
    }))
}

/// Render an amount with `,` thousands separators and at most two
/// fractional digits, trailing zeros trimmed.
fn group_thousands(amount: Decimal) -> String {
    let rounded = amount.round_dp(2).normalize();
    let text = rounded.to_string();
    let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), ""));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if frac_part.is_empty() {
        grouped
    } else {
        format!("{grouped}.{frac_part}")
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.display())
    }
}

impl From<Decimal> for Price {
    fn from(amount: Decimal) -> Self {
        Self::new(amount)
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        Self(iter.fold(Decimal::ZERO, |acc, p| acc.saturating_add(p.0)))
    }
}

// Prices travel as JSON numbers so persisted carts stay readable by other
// clients of the same store.
impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.0.fract().is_zero()
            && let Some(whole) = self.0.to_i64()
        {
            return serializer.serialize_i64(whole);
        }
        serializer.serialize_f64(self.0.to_f64().unwrap_or_default())
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        Ok(Self::lenient(&value))
    }
}
