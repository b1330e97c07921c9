//! Dynamic value domain passed between the bag, accessors and drivers.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use std::fmt;

/// A dynamically-typed database value.
///
/// This is the exchange currency between the parameter bag and whatever
/// driver family the command belongs to: parameter values, member accessor
/// payloads and output values all travel as `DbValue`.
#[derive(Debug, Clone, PartialEq)]
pub enum DbValue {
    /// Database NULL sentinel.
    Null,
    /// Boolean value.
    Bool(bool),
    /// 16-bit integer.
    Int16(i16),
    /// 32-bit integer.
    Int32(i32),
    /// 64-bit integer.
    Int64(i64),
    /// Floating-point value.
    Float(f64),
    /// Exact NUMBER value.
    Decimal(Decimal),
    /// String value (VARCHAR2, CHAR, CLOB content).
    Text(String),
    /// Raw binary value (RAW, BLOB content).
    Bytes(Vec<u8>),
    /// Date/time value (DATE type, no timezone).
    DateTime(NaiveDateTime),
    /// Array value for bulk/array binding.
    Array(Vec<DbValue>),
    /// Driver-native boxed nullable primitive.
    Native(NativeValue),
}

/// A driver-native "boxed nullable primitive": a value type living under a
/// driver's `Types` namespace that carries a payload plus an explicit null
/// flag, distinct from [`DbValue::Null`].
#[derive(Debug, Clone, PartialEq)]
pub struct NativeValue {
    type_path: String,
    value: Option<Box<DbValue>>,
}

impl NativeValue {
    /// Wrap a payload under the given driver type path
    /// (e.g. `Oracle.ManagedDataAccess.Types.OracleDecimal`).
    pub fn new(type_path: impl Into<String>, value: DbValue) -> Self {
        Self {
            type_path: type_path.into(),
            value: Some(Box::new(value)),
        }
    }

    /// A null instance of the given driver wrapper type.
    pub fn null(type_path: impl Into<String>) -> Self {
        Self {
            type_path: type_path.into(),
            value: None,
        }
    }

    /// Full driver type path of the wrapper.
    pub fn type_path(&self) -> &str {
        &self.type_path
    }

    /// Whether the wrapper's explicit null flag is set.
    pub fn is_null(&self) -> bool {
        self.value.is_none()
    }

    /// The wrapped payload, if any.
    pub fn inner(&self) -> Option<&DbValue> {
        self.value.as_deref()
    }

    /// Consume the wrapper, yielding the payload or [`DbValue::Null`].
    pub fn into_inner(self) -> DbValue {
        match self.value {
            Some(inner) => *inner,
            None => DbValue::Null,
        }
    }
}

impl DbValue {
    /// Check whether the value is NULL, including a native wrapper whose
    /// null flag is set.
    pub fn is_null(&self) -> bool {
        match self {
            DbValue::Null => true,
            DbValue::Native(native) => native.is_null(),
            _ => false,
        }
    }

    /// Short name of the value's kind, used in error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            DbValue::Null => "Null",
            DbValue::Bool(_) => "Bool",
            DbValue::Int16(_) => "Int16",
            DbValue::Int32(_) => "Int32",
            DbValue::Int64(_) => "Int64",
            DbValue::Float(_) => "Float",
            DbValue::Decimal(_) => "Decimal",
            DbValue::Text(_) => "Text",
            DbValue::Bytes(_) => "Bytes",
            DbValue::DateTime(_) => "DateTime",
            DbValue::Array(_) => "Array",
            DbValue::Native(_) => "Native",
        }
    }

    /// Try to get the value as a string reference.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            DbValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for DbValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DbValue::Null => write!(f, "NULL"),
            DbValue::Bool(b) => write!(f, "{}", b),
            DbValue::Int16(n) => write!(f, "{}", n),
            DbValue::Int32(n) => write!(f, "{}", n),
            DbValue::Int64(n) => write!(f, "{}", n),
            DbValue::Float(n) => write!(f, "{}", n),
            DbValue::Decimal(n) => write!(f, "{}", n),
            DbValue::Text(s) => write!(f, "{}", s),
            DbValue::Bytes(b) => write!(f, "<RAW: {} bytes>", b.len()),
            DbValue::DateTime(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S")),
            DbValue::Array(items) => write!(f, "<ARRAY: {} elements>", items.len()),
            DbValue::Native(native) => {
                if native.is_null() {
                    write!(f, "<{}: NULL>", native.type_path())
                } else {
                    write!(f, "<{}>", native.type_path())
                }
            }
        }
    }
}

impl From<bool> for DbValue {
    fn from(v: bool) -> Self {
        DbValue::Bool(v)
    }
}

impl From<i16> for DbValue {
    fn from(v: i16) -> Self {
        DbValue::Int16(v)
    }
}

impl From<i32> for DbValue {
    fn from(v: i32) -> Self {
        DbValue::Int32(v)
    }
}

impl From<i64> for DbValue {
    fn from(v: i64) -> Self {
        DbValue::Int64(v)
    }
}

impl From<f64> for DbValue {
    fn from(v: f64) -> Self {
        DbValue::Float(v)
    }
}

impl From<Decimal> for DbValue {
    fn from(v: Decimal) -> Self {
        DbValue::Decimal(v)
    }
}

impl From<&str> for DbValue {
    fn from(v: &str) -> Self {
        DbValue::Text(v.to_string())
    }
}

impl From<String> for DbValue {
    fn from(v: String) -> Self {
        DbValue::Text(v)
    }
}

impl From<Vec<u8>> for DbValue {
    fn from(v: Vec<u8>) -> Self {
        DbValue::Bytes(v)
    }
}

impl From<NaiveDateTime> for DbValue {
    fn from(v: NaiveDateTime) -> Self {
        DbValue::DateTime(v)
    }
}

impl From<NativeValue> for DbValue {
    fn from(v: NativeValue) -> Self {
        DbValue::Native(v)
    }
}

impl From<Vec<DbValue>> for DbValue {
    fn from(v: Vec<DbValue>) -> Self {
        DbValue::Array(v)
    }
}

impl From<Vec<i32>> for DbValue {
    fn from(v: Vec<i32>) -> Self {
        DbValue::Array(v.into_iter().map(DbValue::Int32).collect())
    }
}

impl From<Vec<i64>> for DbValue {
    fn from(v: Vec<i64>) -> Self {
        DbValue::Array(v.into_iter().map(DbValue::Int64).collect())
    }
}

impl From<Vec<String>> for DbValue {
    fn from(v: Vec<String>) -> Self {
        DbValue::Array(v.into_iter().map(DbValue::Text).collect())
    }
}

impl From<Vec<Decimal>> for DbValue {
    fn from(v: Vec<Decimal>) -> Self {
        DbValue::Array(v.into_iter().map(DbValue::Decimal).collect())
    }
}
