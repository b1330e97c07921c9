//! Canonical enums for Oracle parameter metadata.
//!
//! These enums are this crate's own stable integer representation, decoupled
//! from any single driver's enum identities. Each recognized driver family
//! registers a table mapping these canonical variants onto its own integer
//! values (see [`crate::adapter::registry`]).

use std::fmt;

/// Oracle native DB type tags. Integer values are in the reserved 100s range
/// so they can be mapped onto any recognized driver's own enumeration by
/// integer value or by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum OracleMappingType {
    BFile = 101,
    Blob = 102,
    Byte = 103,
    Char = 104,
    Clob = 105,
    Date = 106,
    Decimal = 107,
    Double = 108,
    Long = 109,
    LongRaw = 110,
    Int16 = 111,
    Int32 = 112,
    Int64 = 113,
    IntervalDS = 114,
    IntervalYM = 115,
    NClob = 116,
    NChar = 117,
    NVarchar2 = 119,
    Raw = 120,
    RefCursor = 121,
    Single = 122,
    TimeStamp = 123,
    TimeStampLTZ = 124,
    TimeStampTZ = 125,
    Varchar2 = 126,
    XmlType = 127,
    BinaryDouble = 132,
    BinaryFloat = 133,
}

impl OracleMappingType {
    /// All variants, in declaration order.
    pub const ALL: [OracleMappingType; 28] = [
        Self::BFile,
        Self::Blob,
        Self::Byte,
        Self::Char,
        Self::Clob,
        Self::Date,
        Self::Decimal,
        Self::Double,
        Self::Long,
        Self::LongRaw,
        Self::Int16,
        Self::Int32,
        Self::Int64,
        Self::IntervalDS,
        Self::IntervalYM,
        Self::NClob,
        Self::NChar,
        Self::NVarchar2,
        Self::Raw,
        Self::RefCursor,
        Self::Single,
        Self::TimeStamp,
        Self::TimeStampLTZ,
        Self::TimeStampTZ,
        Self::Varchar2,
        Self::XmlType,
        Self::BinaryDouble,
        Self::BinaryFloat,
    ];

    /// The canonical integer value.
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Look up a variant from its canonical integer value.
    pub fn from_i32(value: i32) -> Option<Self> {
        Self::ALL.iter().copied().find(|t| t.as_i32() == value)
    }

    /// The canonical variant name, used for per-family enum table lookups.
    pub fn name(self) -> &'static str {
        match self {
            Self::BFile => "BFile",
            Self::Blob => "Blob",
            Self::Byte => "Byte",
            Self::Char => "Char",
            Self::Clob => "Clob",
            Self::Date => "Date",
            Self::Decimal => "Decimal",
            Self::Double => "Double",
            Self::Long => "Long",
            Self::LongRaw => "LongRaw",
            Self::Int16 => "Int16",
            Self::Int32 => "Int32",
            Self::Int64 => "Int64",
            Self::IntervalDS => "IntervalDS",
            Self::IntervalYM => "IntervalYM",
            Self::NClob => "NClob",
            Self::NChar => "NChar",
            Self::NVarchar2 => "NVarchar2",
            Self::Raw => "Raw",
            Self::RefCursor => "RefCursor",
            Self::Single => "Single",
            Self::TimeStamp => "TimeStamp",
            Self::TimeStampLTZ => "TimeStampLTZ",
            Self::TimeStampTZ => "TimeStampTZ",
            Self::Varchar2 => "Varchar2",
            Self::XmlType => "XmlType",
            Self::BinaryDouble => "BinaryDouble",
            Self::BinaryFloat => "BinaryFloat",
        }
    }

    /// Look up a variant from its canonical name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|t| t.name() == name)
    }
}

impl fmt::Display for OracleMappingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Collection type for a parameter, used for PL/SQL associative array binding
/// without referencing a driver crate directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(i32)]
pub enum OracleCollectionType {
    #[default]
    None = 0,
    PlsqlAssociativeArray = 1,
}

impl OracleCollectionType {
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    pub fn from_i32(value: i32) -> Option<Self> {
        match value {
            0 => Some(Self::None),
            1 => Some(Self::PlsqlAssociativeArray),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::None => "None",
            Self::PlsqlAssociativeArray => "PLSQLAssociativeArray",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "None" => Some(Self::None),
            "PLSQLAssociativeArray" => Some(Self::PlsqlAssociativeArray),
            _ => None,
        }
    }
}

impl fmt::Display for OracleCollectionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Per-parameter status reported by the driver after execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(i32)]
pub enum ParameterStatus {
    #[default]
    Success = 0,
    NullFetched = 1,
    NullInsert = 2,
    Truncation = 3,
}

impl ParameterStatus {
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    pub fn from_i32(value: i32) -> Option<Self> {
        match value {
            0 => Some(Self::Success),
            1 => Some(Self::NullFetched),
            2 => Some(Self::NullInsert),
            3 => Some(Self::Truncation),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Success => "Success",
            Self::NullFetched => "NullFetched",
            Self::NullInsert => "NullInsert",
            Self::Truncation => "Truncation",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "Success" => Some(Self::Success),
            "NullFetched" => Some(Self::NullFetched),
            "NullInsert" => Some(Self::NullInsert),
            "Truncation" => Some(Self::Truncation),
            _ => None,
        }
    }
}

/// Direction of a parameter relative to the statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ParameterDirection {
    #[default]
    Input,
    Output,
    InputOutput,
    ReturnValue,
}

impl ParameterDirection {
    /// True for directions whose value is readable after execution.
    pub fn is_readable(self) -> bool {
        !matches!(self, Self::Input)
    }
}

/// Row version a parameter's source column refers to, for disconnected
/// dataset scenarios.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SourceVersion {
    Original,
    #[default]
    Current,
    Proposed,
    DefaultVersion,
}
