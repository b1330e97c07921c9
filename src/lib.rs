//! Dynamic Oracle parameter binding for data-access layers.
//!
//! Binds strongly-typed application values onto command/parameter objects of
//! an arbitrary, not-statically-known Oracle driver, and converts
//! driver-native wrapped values back into plain application types. Driver
//! families register themselves at startup (see [`adapter::registry`]); the
//! parameter bag then works against any of them through capability traits,
//! including commands wrapped in pass-through decorators.
//!
//! # Example
//!
//! ```
//! use oracle_params_rs::{OracleMappingType, OracleParams, ParamInfo, ParameterDirection};
//!
//! let mut params = OracleParams::new();
//! params.bind_by_name = true;
//! params.add(ParamInfo::new(":id").value(42).db_type(OracleMappingType::Int32));
//! params.add(
//!     ParamInfo::new("result")
//!         .db_type(OracleMappingType::RefCursor)
//!         .direction(ParameterDirection::ReturnValue),
//! );
//!
//! // marker characters are stripped; @id, :id and id are the same parameter
//! assert_eq!(params.parameter_names(), vec!["id", "result"]);
//! // params.apply(&mut command)? runs just before the statement executes;
//! // params.get::<T>("result") reads output values back afterwards.
//! ```

pub mod adapter;
pub mod command;
pub mod convert;
pub mod error;
pub mod handlers;
pub mod mapping;
pub mod params;
pub mod value;

// Re-export main types
pub use adapter::probe::{probe_command, probe_parameter, CommandCaps, ParameterCaps};
pub use adapter::registry::{DriverFamily, EnumTable, MemberDef, TypeInfo};
pub use adapter::unwrap::with_terminal;
pub use command::{into_handle, AsAny, DbCommand, DbParameter, ParameterHandle};
pub use convert::{convert, FromDb};
pub use error::{Error, Result};
pub use handlers::{BooleanNumericHandler, BooleanStringHandler, UuidRaw16Handler};
pub use mapping::{
    OracleCollectionType, OracleMappingType, ParameterDirection, ParameterStatus, SourceVersion,
};
pub use params::{clean, OracleParams, ParamInfo, ParamSource};
pub use value::{DbValue, NativeValue};
