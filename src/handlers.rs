//! Bind/parse helpers for application types Oracle has no native shape for.

use crate::error::{Error, Result};
use crate::mapping::OracleMappingType;
use crate::params::ParamInfo;
use crate::value::DbValue;
use uuid::Uuid;

/// Conversion between `bool` and NUMBER(1): 0 is false, any other value true.
#[derive(Debug, Clone, Copy, Default)]
pub struct BooleanNumericHandler;

impl BooleanNumericHandler {
    pub fn bind(&self, param: &mut ParamInfo, value: bool) {
        param.db_type = Some(OracleMappingType::Int16);
        param.value = Some(DbValue::Int32(i32::from(value)));
    }

    pub fn parse(&self, value: DbValue) -> Result<bool> {
        match value {
            DbValue::Int16(n) => Ok(n != 0),
            DbValue::Int32(n) => Ok(n != 0),
            DbValue::Int64(n) => Ok(n != 0),
            DbValue::Decimal(d) => Ok(!d.is_zero()),
            other => Err(Error::invalid_cast(other.kind_name(), "bool")),
        }
    }
}

/// Conversion between `bool` and a VARCHAR2 pair such as `"Y"`/`"N"`.
#[derive(Debug, Clone)]
pub struct BooleanStringHandler {
    true_value: String,
    false_value: String,
    ignore_case: bool,
}

impl BooleanStringHandler {
    pub fn new(true_value: impl Into<String>, false_value: impl Into<String>) -> Self {
        Self {
            true_value: true_value.into(),
            false_value: false_value.into(),
            ignore_case: false,
        }
    }

    /// Compare stored text case-insensitively when parsing.
    pub fn ignore_case(mut self) -> Self {
        self.ignore_case = true;
        self
    }

    pub fn bind(&self, param: &mut ParamInfo, value: bool) {
        param.db_type = Some(OracleMappingType::Varchar2);
        param.value = Some(DbValue::Text(if value {
            self.true_value.clone()
        } else {
            self.false_value.clone()
        }));
    }

    pub fn parse(&self, value: DbValue) -> Result<bool> {
        let text = match &value {
            DbValue::Text(s) => s,
            other => return Err(Error::invalid_cast(other.kind_name(), "bool")),
        };
        if self.matches(text, &self.true_value) {
            Ok(true)
        } else if self.matches(text, &self.false_value) {
            Ok(false)
        } else {
            Err(Error::invalid_cast(
                format!("'{}' (expected '{}' or '{}')", text, self.true_value, self.false_value),
                "bool",
            ))
        }
    }

    fn matches(&self, text: &str, expected: &str) -> bool {
        if self.ignore_case {
            text.eq_ignore_ascii_case(expected)
        } else {
            text == expected
        }
    }
}

/// Conversion between [`Uuid`] and the RAW(16) Oracle data type.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidRaw16Handler;

impl UuidRaw16Handler {
    pub fn bind(&self, param: &mut ParamInfo, value: Uuid) {
        param.db_type = Some(OracleMappingType::Raw);
        param.size = Some(16);
        param.value = Some(DbValue::Bytes(value.as_bytes().to_vec()));
    }

    pub fn parse(&self, value: DbValue) -> Result<Uuid> {
        match &value {
            DbValue::Bytes(bytes) => {
                Uuid::from_slice(bytes).map_err(|_| Error::invalid_cast("Bytes", "Uuid"))
            }
            other => Err(Error::invalid_cast(other.kind_name(), "Uuid")),
        }
    }
}
