//! Capability probe for concrete command and parameter types.
//!
//! Validates that a concrete type belongs to a recognized driver family and
//! builds the fixed set of member accessors this crate depends on, cached per
//! type. Enum identities resolve through the family owning the concrete type,
//! never a hard-coded table.

use crate::adapter::accessor::{self, MemberAccessor, ValueKind};
use crate::adapter::registry;
use crate::command::{DbCommand, DbParameter};
use crate::error::{Error, Result};
use crate::mapping::{OracleCollectionType, OracleMappingType, ParameterStatus};
use crate::value::DbValue;
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::Arc;

/// Member names a driver command must register.
pub const MEMBER_BIND_BY_NAME: &str = "bind_by_name";
pub const MEMBER_ARRAY_BIND_COUNT: &str = "array_bind_count";
pub const MEMBER_INITIAL_LOB_FETCH_SIZE: &str = "initial_lob_fetch_size";

/// Member names a driver parameter must register.
pub const MEMBER_ORACLE_DB_TYPE: &str = "oracle_db_type";
pub const MEMBER_COLLECTION_TYPE: &str = "collection_type";
pub const MEMBER_STATUS: &str = "status";
pub const MEMBER_ARRAY_BIND_SIZE: &str = "array_bind_size";
pub const MEMBER_IS_NULLABLE: &str = "is_nullable";

/// Enum table keys a driver family must register.
pub const ENUM_DB_TYPE: &str = "OracleDbType";
pub const ENUM_COLLECTION_TYPE: &str = "OracleCollectionType";
pub const ENUM_STATUS: &str = "Status";

/// Compiled accessors for the command-level members.
pub struct CommandCaps {
    type_path: &'static str,
    bind_by_name: Arc<MemberAccessor>,
    array_bind_count: Arc<MemberAccessor>,
    initial_lob_fetch_size: Arc<MemberAccessor>,
}

impl CommandCaps {
    pub fn type_path(&self) -> &'static str {
        self.type_path
    }

    pub fn set_bind_by_name(&self, command: &mut dyn Any, bind_by_name: bool) -> Result<()> {
        self.bind_by_name.set_value(command, DbValue::Bool(bind_by_name))
    }

    pub fn set_array_bind_count(&self, command: &mut dyn Any, count: i32) -> Result<()> {
        self.array_bind_count.set_value(command, DbValue::Int32(count))
    }

    pub fn set_initial_lob_fetch_size(&self, command: &mut dyn Any, size: i64) -> Result<()> {
        self.initial_lob_fetch_size.set_value(command, DbValue::Int64(size))
    }
}

/// Compiled accessors for the parameter-level members.
pub struct ParameterCaps {
    type_path: &'static str,
    db_type: Arc<MemberAccessor>,
    collection_type: Arc<MemberAccessor>,
    status: Arc<MemberAccessor>,
    array_bind_size: Arc<MemberAccessor>,
    is_nullable: Arc<MemberAccessor>,
}

impl ParameterCaps {
    pub fn type_path(&self) -> &'static str {
        self.type_path
    }

    pub fn set_db_type(&self, parameter: &mut dyn Any, db_type: OracleMappingType) -> Result<()> {
        self.db_type.set_enum_name(parameter, db_type.name())
    }

    pub fn db_type(&self, parameter: &dyn Any) -> Result<OracleMappingType> {
        let name = self.db_type.get_enum_name(parameter)?;
        OracleMappingType::from_name(name).ok_or_else(|| Error::UnknownEnumVariant {
            enum_path: "OracleMappingType".to_string(),
            variant: name.to_string(),
        })
    }

    pub fn set_collection_type(
        &self,
        parameter: &mut dyn Any,
        collection_type: OracleCollectionType,
    ) -> Result<()> {
        self.collection_type.set_enum_name(parameter, collection_type.name())
    }

    pub fn collection_type(&self, parameter: &dyn Any) -> Result<OracleCollectionType> {
        let name = self.collection_type.get_enum_name(parameter)?;
        OracleCollectionType::from_name(name).ok_or_else(|| Error::UnknownEnumVariant {
            enum_path: "OracleCollectionType".to_string(),
            variant: name.to_string(),
        })
    }

    pub fn status(&self, parameter: &dyn Any) -> Result<ParameterStatus> {
        let name = self.status.get_enum_name(parameter)?;
        ParameterStatus::from_name(name).ok_or_else(|| Error::UnknownEnumVariant {
            enum_path: "ParameterStatus".to_string(),
            variant: name.to_string(),
        })
    }

    pub fn set_is_nullable(&self, parameter: &mut dyn Any, nullable: bool) -> Result<()> {
        self.is_nullable.set_value(parameter, DbValue::Bool(nullable))
    }

    pub fn is_nullable(&self, parameter: &dyn Any) -> Result<bool> {
        match self.is_nullable.get_value(parameter)? {
            DbValue::Bool(b) => Ok(b),
            other => Err(Error::invalid_cast(other.kind_name(), "bool")),
        }
    }

    pub fn set_array_bind_size(&self, parameter: &mut dyn Any, sizes: &[i32]) -> Result<()> {
        self.array_bind_size
            .set_value(parameter, DbValue::from(sizes.to_vec()))
    }

    pub fn array_bind_size(&self, parameter: &dyn Any) -> Result<Option<Vec<i32>>> {
        match self.array_bind_size.get_value(parameter)? {
            DbValue::Null => Ok(None),
            DbValue::Array(items) => {
                let mut sizes = Vec::with_capacity(items.len());
                for item in items {
                    match item {
                        DbValue::Int32(v) => sizes.push(v),
                        other => return Err(Error::invalid_cast(other.kind_name(), "i32")),
                    }
                }
                Ok(Some(sizes))
            }
            other => Err(Error::invalid_cast(other.kind_name(), "Vec<i32>")),
        }
    }
}

static COMMAND_CAPS: Lazy<RwLock<HashMap<TypeId, Arc<CommandCaps>>>> =
    Lazy::new(|| RwLock::new(HashMap::new()));

static PARAMETER_CAPS: Lazy<RwLock<HashMap<TypeId, Arc<ParameterCaps>>>> =
    Lazy::new(|| RwLock::new(HashMap::new()));

/// Probe a concrete command type, building and caching its capability set.
pub fn probe_command(command: &dyn DbCommand) -> Result<Arc<CommandCaps>> {
    let type_id = command.as_any().type_id();
    if let Some(cached) = COMMAND_CAPS.read().get(&type_id) {
        return Ok(Arc::clone(cached));
    }

    let info = recognized_type_info(type_id, command.type_name())?;
    let caps = Arc::new(CommandCaps {
        type_path: info.type_path(),
        bind_by_name: accessor::accessor(&info, MEMBER_BIND_BY_NAME, ValueKind::Bool)?,
        array_bind_count: accessor::accessor(&info, MEMBER_ARRAY_BIND_COUNT, ValueKind::Int32)?,
        initial_lob_fetch_size: accessor::accessor(
            &info,
            MEMBER_INITIAL_LOB_FETCH_SIZE,
            ValueKind::Int64,
        )?,
    });
    tracing::debug!(type_path = info.type_path(), "probed command capabilities");
    Ok(Arc::clone(
        COMMAND_CAPS.write().entry(type_id).or_insert(caps),
    ))
}

/// Probe a concrete parameter type, building and caching its capability set.
pub fn probe_parameter(parameter: &dyn DbParameter) -> Result<Arc<ParameterCaps>> {
    let type_id = parameter.as_any().type_id();
    if let Some(cached) = PARAMETER_CAPS.read().get(&type_id) {
        return Ok(Arc::clone(cached));
    }

    let info = recognized_type_info(type_id, parameter.type_name())?;
    let caps = Arc::new(ParameterCaps {
        type_path: info.type_path(),
        db_type: accessor::accessor(&info, MEMBER_ORACLE_DB_TYPE, ValueKind::Enum)?,
        collection_type: accessor::accessor(&info, MEMBER_COLLECTION_TYPE, ValueKind::Enum)?,
        status: accessor::accessor(&info, MEMBER_STATUS, ValueKind::Enum)?,
        array_bind_size: accessor::accessor(&info, MEMBER_ARRAY_BIND_SIZE, ValueKind::IntArray)?,
        is_nullable: accessor::accessor(&info, MEMBER_IS_NULLABLE, ValueKind::Bool)?,
    });
    tracing::debug!(type_path = info.type_path(), "probed parameter capabilities");
    Ok(Arc::clone(
        PARAMETER_CAPS.write().entry(type_id).or_insert(caps),
    ))
}

/// Resolve the registration record for a type and enforce the namespace
/// allow-list. Unregistered types report their Rust type name; registered
/// types outside every recognized family report their declared path.
fn recognized_type_info(
    type_id: TypeId,
    fallback_name: &'static str,
) -> Result<Arc<registry::TypeInfo>> {
    let info = registry::type_info(type_id)
        .ok_or_else(|| Error::unsupported_driver_type(fallback_name))?;
    if registry::recognized_family_for(info.type_path()).is_none() {
        return Err(Error::unsupported_driver_type(info.type_path()));
    }
    Ok(info)
}
