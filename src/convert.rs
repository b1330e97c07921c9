//! Conversion of driver output values into plain application types.
//!
//! [`convert`] is total for the supported type set: database NULL maps to the
//! target's default (or `None` for `Option` targets), driver-native boxed
//! nullable primitives are unwrapped first, and arrays convert element-wise.

use crate::error::{Error, Result};
use crate::value::DbValue;
use chrono::NaiveDateTime;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use uuid::Uuid;

/// Convert a raw driver value into `T`.
///
/// Rules, in order: NULL (or a native wrapper whose null flag is set) becomes
/// the default of `T`, or `None` for `Option<T>`; a native wrapper is
/// unwrapped and conversion recurses on its payload; convertible primitives
/// coerce with standard numeric/string rules; array targets convert
/// element-wise; anything else fails with [`Error::InvalidCast`] naming the
/// source and target types.
pub fn convert<T: FromDb>(value: DbValue) -> Result<T> {
    T::from_db(value)
}

/// Strip native wrappers, normalizing a null wrapper to [`DbValue::Null`].
fn unwrap_native(value: DbValue) -> DbValue {
    match value {
        DbValue::Native(native) => match native.into_inner() {
            DbValue::Null => DbValue::Null,
            inner => unwrap_native(inner),
        },
        other => other,
    }
}

fn cast_err<T>(value: &DbValue) -> Error {
    Error::invalid_cast(value.kind_name(), std::any::type_name::<T>())
}

/// Conversion target for [`convert`].
pub trait FromDb: Sized {
    /// Result for a database NULL read as a top-level value.
    fn from_null() -> Result<Self>;

    /// Convert a non-null, non-native value.
    fn from_some(value: DbValue) -> Result<Self>;

    /// Convert one element of an array target. A NULL element is an error for
    /// non-nullable element types; `Option<T>` overrides this to yield `None`.
    fn from_element(value: DbValue) -> Result<Self> {
        match unwrap_native(value) {
            DbValue::Null => Err(Error::invalid_cast("Null", std::any::type_name::<Self>())),
            v => Self::from_some(v),
        }
    }

    fn from_db(value: DbValue) -> Result<Self> {
        match unwrap_native(value) {
            DbValue::Null => Self::from_null(),
            v => Self::from_some(v),
        }
    }
}

fn value_to_i64(value: &DbValue) -> Result<i64> {
    match value {
        DbValue::Bool(b) => Ok(i64::from(*b)),
        DbValue::Int16(n) => Ok(i64::from(*n)),
        DbValue::Int32(n) => Ok(i64::from(*n)),
        DbValue::Int64(n) => Ok(*n),
        // i64::MAX as f64 rounds up to 2^63, so the upper bound is exclusive
        DbValue::Float(f) if f.fract() == 0.0 && *f >= i64::MIN as f64 && *f < i64::MAX as f64 => {
            Ok(*f as i64)
        }
        DbValue::Decimal(d) if d.fract().is_zero() => {
            d.to_i64().ok_or_else(|| cast_err::<i64>(value))
        }
        DbValue::Text(s) => s.trim().parse().map_err(|_| cast_err::<i64>(value)),
        _ => Err(cast_err::<i64>(value)),
    }
}

impl FromDb for i64 {
    fn from_null() -> Result<Self> {
        Ok(0)
    }

    fn from_some(value: DbValue) -> Result<Self> {
        value_to_i64(&value)
    }
}

macro_rules! narrow_int_from_db {
    ($($ty:ty),*) => {
        $(
            impl FromDb for $ty {
                fn from_null() -> Result<Self> {
                    Ok(0)
                }

                fn from_some(value: DbValue) -> Result<Self> {
                    let wide = value_to_i64(&value)?;
                    wide.try_into().map_err(|_| cast_err::<$ty>(&value))
                }
            }
        )*
    };
}

narrow_int_from_db!(i16, i32);

impl FromDb for f64 {
    fn from_null() -> Result<Self> {
        Ok(0.0)
    }

    fn from_some(value: DbValue) -> Result<Self> {
        match &value {
            DbValue::Int16(n) => Ok(f64::from(*n)),
            DbValue::Int32(n) => Ok(f64::from(*n)),
            DbValue::Int64(n) => Ok(*n as f64),
            DbValue::Float(f) => Ok(*f),
            DbValue::Decimal(d) => d.to_f64().ok_or_else(|| cast_err::<f64>(&value)),
            DbValue::Text(s) => s.trim().parse().map_err(|_| cast_err::<f64>(&value)),
            _ => Err(cast_err::<f64>(&value)),
        }
    }
}

impl FromDb for Decimal {
    fn from_null() -> Result<Self> {
        Ok(Decimal::ZERO)
    }

    fn from_some(value: DbValue) -> Result<Self> {
        match &value {
            DbValue::Bool(b) => Ok(Decimal::from(i32::from(*b))),
            DbValue::Int16(n) => Ok(Decimal::from(*n)),
            DbValue::Int32(n) => Ok(Decimal::from(*n)),
            DbValue::Int64(n) => Ok(Decimal::from(*n)),
            DbValue::Float(f) => Decimal::from_f64_retain(*f).ok_or_else(|| cast_err::<Decimal>(&value)),
            DbValue::Decimal(d) => Ok(*d),
            DbValue::Text(s) => s.trim().parse().map_err(|_| cast_err::<Decimal>(&value)),
            _ => Err(cast_err::<Decimal>(&value)),
        }
    }
}

impl FromDb for bool {
    fn from_null() -> Result<Self> {
        Ok(false)
    }

    fn from_some(value: DbValue) -> Result<Self> {
        match &value {
            DbValue::Bool(b) => Ok(*b),
            DbValue::Int16(n) => Ok(*n != 0),
            DbValue::Int32(n) => Ok(*n != 0),
            DbValue::Int64(n) => Ok(*n != 0),
            DbValue::Decimal(d) => Ok(!d.is_zero()),
            DbValue::Text(s) if s.eq_ignore_ascii_case("true") => Ok(true),
            DbValue::Text(s) if s.eq_ignore_ascii_case("false") => Ok(false),
            _ => Err(cast_err::<bool>(&value)),
        }
    }
}

impl FromDb for String {
    fn from_null() -> Result<Self> {
        Ok(String::new())
    }

    fn from_some(value: DbValue) -> Result<Self> {
        match value {
            DbValue::Text(s) => Ok(s),
            DbValue::Bool(_)
            | DbValue::Int16(_)
            | DbValue::Int32(_)
            | DbValue::Int64(_)
            | DbValue::Float(_)
            | DbValue::Decimal(_)
            | DbValue::DateTime(_) => Ok(value.to_string()),
            other => Err(cast_err::<String>(&other)),
        }
    }
}

impl FromDb for NaiveDateTime {
    fn from_null() -> Result<Self> {
        // No meaningful default date exists; read nullable dates as
        // Option<NaiveDateTime>.
        Err(Error::invalid_state(
            "database NULL cannot be read as a non-nullable date/time",
        ))
    }

    fn from_some(value: DbValue) -> Result<Self> {
        match &value {
            DbValue::DateTime(dt) => Ok(*dt),
            DbValue::Text(s) => NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
                .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S"))
                .map_err(|_| cast_err::<NaiveDateTime>(&value)),
            _ => Err(cast_err::<NaiveDateTime>(&value)),
        }
    }
}

impl FromDb for Vec<u8> {
    fn from_null() -> Result<Self> {
        Ok(Vec::new())
    }

    fn from_some(value: DbValue) -> Result<Self> {
        match value {
            DbValue::Bytes(b) => Ok(b),
            other => Err(cast_err::<Vec<u8>>(&other)),
        }
    }
}

impl FromDb for Uuid {
    fn from_null() -> Result<Self> {
        Ok(Uuid::nil())
    }

    fn from_some(value: DbValue) -> Result<Self> {
        match &value {
            DbValue::Bytes(b) => Uuid::from_slice(b).map_err(|_| cast_err::<Uuid>(&value)),
            DbValue::Text(s) => s.parse().map_err(|_| cast_err::<Uuid>(&value)),
            _ => Err(cast_err::<Uuid>(&value)),
        }
    }
}

impl<T: FromDb> FromDb for Option<T> {
    fn from_null() -> Result<Self> {
        Ok(None)
    }

    fn from_some(value: DbValue) -> Result<Self> {
        T::from_some(value).map(Some)
    }

    fn from_element(value: DbValue) -> Result<Self> {
        match unwrap_native(value) {
            DbValue::Null => Ok(None),
            v => T::from_some(v).map(Some),
        }
    }
}

impl<T: FromDb> FromDb for Vec<T> {
    fn from_null() -> Result<Self> {
        Ok(Vec::new())
    }

    fn from_some(value: DbValue) -> Result<Self> {
        match value {
            DbValue::Array(items) => items.into_iter().map(T::from_element).collect(),
            other => Err(cast_err::<Vec<T>>(&other)),
        }
    }
}
