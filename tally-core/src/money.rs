//! Fixed-point money stored as integer cents.
//!
//! Statement figures are always rendered with exactly two decimal places and
//! no thousands separators, so cents are the natural unit.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::ops::{Neg, Sub};

/// A signed amount in cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    pub const fn cents(&self) -> i64 {
        self.0
    }

    pub const fn abs(&self) -> Self {
        Self(self.0.abs())
    }

    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Parse a statement token such as `2,000.00`, `45.5`, `1004` or `-12.30`.
    ///
    /// Thousands separators are dropped. More than two fractional digits, any
    /// other character, or an overflow yields `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        let s = raw.trim().replace(',', "");
        let (negative, s) = match s.strip_prefix('-') {
            Some(rest) => (true, rest.to_string()),
            None => (false, s),
        };
        if s.is_empty() {
            return None;
        }

        let (int_part, frac_part) = match s.split_once('.') {
            Some((i, f)) => (i, f),
            None => (s.as_str(), ""),
        };
        let int_part = if int_part.is_empty() { "0" } else { int_part };
        if !int_part.chars().all(|c| c.is_ascii_digit())
            || !frac_part.chars().all(|c| c.is_ascii_digit())
            || frac_part.len() > 2
        {
            return None;
        }

        let whole: i64 = int_part.parse().ok()?;
        let frac: i64 = match frac_part.len() {
            0 => 0,
            1 => frac_part.parse::<i64>().ok()? * 10,
            _ => frac_part.parse().ok()?,
        };
        let cents = whole.checked_mul(100)?.checked_add(frac)?;
        Some(Self(if negative { -cents } else { cents }))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{}{}.{:02}", sign, abs / 100, abs % 100)
    }
}

impl Neg for Money {
    type Output = Money;

    fn neg(self) -> Money {
        Money(-self.0)
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, rhs: Money) -> Money {
        Money(self.0 - rhs.0)
    }
}

// Serialized as the two-decimal string used at the output boundary, so a
// config file can say `materiality_threshold = "1.00"`. Bare numbers are
// accepted on the way in as well.
impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Text(String),
            Int(i64),
            Float(f64),
        }

        let text = match Repr::deserialize(deserializer)? {
            Repr::Text(s) => s,
            Repr::Int(i) => i.to_string(),
            Repr::Float(f) => format!("{:.2}", f),
        };
        Money::parse(&text)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid amount: {text}")))
    }
}
