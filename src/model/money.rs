//! Rupiah amounts for the RAB table.
//!
//! This module provides the `Rupiah` type, which wraps a whole-rupiah `u64` and
//! handles the forgiving numeric input that the editor accepts for price cells.

use serde::de::Visitor;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::fmt::{Display, Formatter};

/// Represents a whole-rupiah amount.
///
/// RAB documents track prices in whole rupiah, so this type wraps `u64` and
/// provides custom serialization: on the wire a `Rupiah` is a bare JSON number,
/// but anything loosely numeric (a negative number, a float, a digit-prefixed
/// string) is accepted on the way in and clamped to a non-negative integer.
///
/// # Examples
///
/// ```
/// # use rab_maker::Rupiah;
/// let price: Rupiah = serde_json::from_str("15000").unwrap();
/// assert_eq!(price.value(), 15_000);
/// assert_eq!(price.to_string(), "15.000");
///
/// let clamped: Rupiah = serde_json::from_str("\"-250\"").unwrap();
/// assert!(clamped.is_zero());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Rupiah(u64);

impl Rupiah {
    /// Creates a new Rupiah amount from a whole-rupiah value.
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the underlying whole-rupiah value.
    pub fn value(&self) -> u64 {
        self.0
    }

    /// Returns true if the amount is zero.
    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Parses user input the way the editor treats numeric cells: the leading
    /// integer digits count and everything else, including a negative sign,
    /// becomes zero.
    pub fn parse_loose(s: &str) -> Self {
        Self(parse_loose_int(s))
    }

    /// Multiplies by a count, saturating at the numeric bounds.
    pub fn saturating_mul(self, count: u64) -> Self {
        Self(self.0.saturating_mul(count))
    }

    /// Adds another amount, saturating at the numeric bounds.
    pub fn saturating_add(self, other: Rupiah) -> Self {
        Self(self.0.saturating_add(other.0))
    }
}

impl Display for Rupiah {
    /// Formats with Indonesian thousands grouping, e.g. `1.050.000`.
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let grouped = format_num::format_num!(",.0f", self.0 as f64);
        write!(f, "{}", grouped.replace(',', "."))
    }
}

impl From<u64> for Rupiah {
    fn from(value: u64) -> Self {
        Rupiah::new(value)
    }
}

impl From<Rupiah> for u64 {
    fn from(amount: Rupiah) -> Self {
        amount.value()
    }
}

impl Serialize for Rupiah {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(self.0)
    }
}

impl<'de> Deserialize<'de> for Rupiah {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        lenient_count(deserializer).map(Rupiah)
    }
}

/// Deserializes a count the way documents are read: numbers, numeric strings
/// and nulls are all accepted, with negatives and garbage clamped to zero and
/// floats rounded down.
pub(crate) fn lenient_count<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(LooseIntVisitor)
}

struct LooseIntVisitor;

impl<'de> Visitor<'de> for LooseIntVisitor {
    type Value = u64;

    fn expecting(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str("a non-negative integer, a number, or a numeric string")
    }

    fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E> {
        Ok(v)
    }

    fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E> {
        Ok(v.try_into().unwrap_or(0))
    }

    fn visit_f64<E>(self, v: f64) -> Result<Self::Value, E> {
        if !v.is_finite() || v.is_sign_negative() {
            Ok(0)
        } else if v >= u64::MAX as f64 {
            Ok(u64::MAX)
        } else {
            Ok(v as u64)
        }
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E> {
        Ok(parse_loose_int(v))
    }

    fn visit_bool<E>(self, _v: bool) -> Result<Self::Value, E> {
        Ok(0)
    }

    fn visit_unit<E>(self) -> Result<Self::Value, E> {
        Ok(0)
    }
}

/// Integer parse for numeric cells. Takes the run of leading ASCII digits
/// after optional whitespace and a sign. Negative input, garbage and an empty
/// string all clamp to zero; an overflowing run saturates.
pub(crate) fn parse_loose_int(s: &str) -> u64 {
    let trimmed = s.trim();
    let (negative, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    let run = &digits[..end];
    if negative || run.is_empty() {
        return 0;
    }
    run.parse::<u64>().unwrap_or(u64::MAX)
}
