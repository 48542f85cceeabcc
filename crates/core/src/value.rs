use std::{cmp::Ordering, fmt};

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::{Decimal, prelude::ToPrimitive};

use crate::ValueKind;

#[derive(Debug, Clone)]
pub enum Value {
    Null,
    Integer(i64),
    BigInt(i128),
    Decimal(Decimal),
    Float(f64),
    Boolean(bool),
    String(String),
    Binary(Vec<u8>),
    Date(NaiveDate),
    Time(NaiveTime),
    DateTime(NaiveDateTime),
}

impl Value {
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[must_use]
    pub const fn kind(&self) -> Option<ValueKind> {
        Some(match self {
            Self::Null => return None,
            Self::Integer(_) => ValueKind::Integer,
            Self::BigInt(_) => ValueKind::BigInt,
            Self::Decimal(_) => ValueKind::Decimal,
            Self::Float(_) => ValueKind::Float,
            Self::Boolean(_) => ValueKind::Boolean,
            Self::String(_) => ValueKind::String,
            Self::Binary(_) => ValueKind::Binary,
            Self::Date(_) => ValueKind::Date,
            Self::Time(_) => ValueKind::Time,
            Self::DateTime(_) => ValueKind::DateTime,
        })
    }

    /// Total order used to sort rows before comparison. `Null` sorts first,
    /// values of different kinds order by kind.
    ///
    /// Floats compare numerically, so `0.0 == -0.0`. `NaN` equals `NaN` and
    /// sorts after every other float.
    #[must_use]
    pub fn total_cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Null, Self::Null) => Ordering::Equal,
            (Self::Null, _) => Ordering::Less,
            (_, Self::Null) => Ordering::Greater,
            (Self::Integer(left), Self::Integer(right)) => left.cmp(right),
            (Self::BigInt(left), Self::BigInt(right)) => left.cmp(right),
            (Self::Decimal(left), Self::Decimal(right)) => left.cmp(right),
            (Self::Float(left), Self::Float(right)) => float_cmp(*left, *right),
            (Self::Boolean(left), Self::Boolean(right)) => left.cmp(right),
            (Self::String(left), Self::String(right)) => left.cmp(right),
            (Self::Binary(left), Self::Binary(right)) => left.cmp(right),
            (Self::Date(left), Self::Date(right)) => left.cmp(right),
            (Self::Time(left), Self::Time(right)) => left.cmp(right),
            (Self::DateTime(left), Self::DateTime(right)) => left.cmp(right),
            _ => self.kind().cmp(&other.kind()),
        }
    }

    /// Like [`Value::total_cmp`], but integers, decimals and floats compare by
    /// numeric value whatever their kind, so `Integer(1)` equals `BigInt(1)`
    /// and `Float(1.5)` equals `Decimal(1.5)`.
    #[must_use]
    pub fn numeric_cmp(&self, other: &Self) -> Ordering {
        match (self.as_number(), other.as_number()) {
            (Some(left), Some(right)) => left.compare(right),
            _ => self.total_cmp(other),
        }
    }

    fn as_number(&self) -> Option<Number> {
        match self {
            Self::Integer(value) => Some(Number::Exact(i128::from(*value))),
            Self::BigInt(value) => Some(Number::Exact(*value)),
            Self::Decimal(value) => Some(Number::Decimal(*value)),
            Self::Float(value) => Some(Number::Float(*value)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Number {
    Exact(i128),
    Decimal(Decimal),
    Float(f64),
}

impl Number {
    fn compare(self, other: Self) -> Ordering {
        match (self, other) {
            (Self::Exact(left), Self::Exact(right)) => left.cmp(&right),
            (Self::Decimal(left), Self::Decimal(right)) => left.cmp(&right),
            (Self::Exact(left), Self::Decimal(right)) => exact_decimal_cmp(left, right),
            (Self::Decimal(left), Self::Exact(right)) => exact_decimal_cmp(right, left).reverse(),
            (left, right) => float_cmp(left.to_f64(), right.to_f64()),
        }
    }

    fn to_f64(self) -> f64 {
        match self {
            Self::Exact(value) => value as f64,
            Self::Decimal(value) => value.to_f64().unwrap_or(f64::NAN),
            Self::Float(value) => value,
        }
    }
}

// i128 values beyond the decimal's 96-bit mantissa fall back to floats.
fn exact_decimal_cmp(left: i128, right: Decimal) -> Ordering {
    match Decimal::try_from_i128_with_scale(left, 0) {
        Ok(left) => left.cmp(&right),
        Err(_) => float_cmp(left as f64, right.to_f64().unwrap_or(f64::NAN)),
    }
}

fn float_cmp(left: f64, right: f64) -> Ordering {
    match (left.is_nan(), right.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => left.partial_cmp(&right).unwrap_or(Ordering::Equal),
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.total_cmp(other).is_eq()
    }
}

impl Eq for Value {}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("NULL"),
            Self::Integer(value) => write!(f, "{value}"),
            Self::BigInt(value) => write!(f, "{value}"),
            Self::Decimal(value) => write!(f, "{value}"),
            Self::Float(value) => write!(f, "{value}"),
            Self::Boolean(value) => write!(f, "{value}"),
            Self::String(value) => write!(f, "{value:?}"),
            Self::Binary(bytes) => {
                f.write_str("x'")?;
                for byte in bytes {
                    write!(f, "{byte:02x}")?;
                }
                f.write_str("'")
            }
            Self::Date(value) => write!(f, "{value}"),
            Self::Time(value) => write!(f, "{value}"),
            Self::DateTime(value) => write!(f, "{value}"),
        }
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl<T> From<Option<T>> for Value
where
    T: Into<Value>,
{
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}
