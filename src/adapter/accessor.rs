//! Member accessor compiler and cache.
//!
//! Resolves `(concrete type, member name, value kind)` against the driver
//! type registry on first use and caches the resulting get/set pair. Cached
//! accessors are immutable pure functions of the type; a race that builds the
//! same accessor twice is wasteful but safe, so population uses a plain
//! get-or-insert under the lock.

use crate::adapter::registry::{self, EnumTable, Getter, Setter, TypeInfo};
use crate::error::{Error, Result};
use crate::value::DbValue;
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::Arc;

/// Value shape a compiled accessor carries, part of the cache key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Bool,
    Int32,
    Int64,
    IntArray,
    /// Enum-typed member; values convert through the owning family's enum
    /// table because the driver's enum is a distinct type mirroring ours.
    Enum,
}

/// A compiled getter/setter pair for one named member of one concrete driver
/// type. Immutable after build; shared through the process-wide cache.
#[derive(Debug)]
pub struct MemberAccessor {
    type_path: &'static str,
    member: &'static str,
    kind: ValueKind,
    get: Option<Getter>,
    set: Option<Setter>,
    enum_table: Option<EnumTable>,
}

impl MemberAccessor {
    /// Owning type's declared path.
    pub fn type_path(&self) -> &'static str {
        self.type_path
    }

    /// Member name this accessor is bound to.
    pub fn member(&self) -> &'static str {
        self.member
    }

    /// Value shape the accessor was compiled for.
    pub fn kind(&self) -> ValueKind {
        self.kind
    }

    /// Read the member's raw value.
    pub fn get_value(&self, target: &dyn Any) -> Result<DbValue> {
        let get = self
            .get
            .ok_or_else(|| Error::member_not_found(self.type_path, self.member))?;
        get(target)
    }

    /// Write the member's raw value.
    pub fn set_value(&self, target: &mut dyn Any, value: DbValue) -> Result<()> {
        let set = self
            .set
            .ok_or_else(|| Error::member_not_found(self.type_path, self.member))?;
        set(target, value)
    }

    /// Write an enum-typed member from a canonical variant name. The driver
    /// integer resolved through the family table travels to the setter as the
    /// underlying integral representation.
    pub fn set_enum_name(&self, target: &mut dyn Any, canonical_name: &str) -> Result<()> {
        let table = self.require_enum_table()?;
        let driver_value = table
            .value_of(canonical_name)
            .ok_or_else(|| Error::UnknownEnumVariant {
                enum_path: table.enum_path().to_string(),
                variant: canonical_name.to_string(),
            })?;
        self.set_value(target, DbValue::Int32(driver_value))
    }

    /// Read an enum-typed member back as a canonical variant name.
    pub fn get_enum_name(&self, target: &dyn Any) -> Result<&'static str> {
        let table = self.require_enum_table()?;
        let raw = self.get_value(target)?;
        let driver_value = match raw {
            DbValue::Int32(v) => v,
            DbValue::Int64(v) => {
                v.try_into().map_err(|_| Error::invalid_cast(raw.kind_name(), "i32"))?
            }
            other => return Err(Error::invalid_cast(other.kind_name(), "i32")),
        };
        table.name_of(driver_value).ok_or_else(|| Error::UnknownEnumVariant {
            enum_path: table.enum_path().to_string(),
            variant: driver_value.to_string(),
        })
    }

    fn require_enum_table(&self) -> Result<&EnumTable> {
        self.enum_table
            .as_ref()
            .ok_or_else(|| Error::member_not_found(self.type_path, self.member))
    }
}

type AccessorKey = (TypeId, &'static str, ValueKind);

static ACCESSORS: Lazy<RwLock<HashMap<AccessorKey, Arc<MemberAccessor>>>> =
    Lazy::new(|| RwLock::new(HashMap::new()));

/// Get or compile the accessor for a member of a registered type.
///
/// Fails with [`Error::MemberNotFound`] at first access if the member is
/// absent, which indicates a driver/version mismatch and propagates as a
/// fatal configuration error.
pub fn accessor(
    info: &TypeInfo,
    member: &'static str,
    kind: ValueKind,
) -> Result<Arc<MemberAccessor>> {
    let key = (info.type_id(), member, kind);
    if let Some(cached) = ACCESSORS.read().get(&key) {
        return Ok(Arc::clone(cached));
    }

    let built = Arc::new(build(info, member, kind)?);
    Ok(Arc::clone(
        ACCESSORS.write().entry(key).or_insert(built),
    ))
}

fn build(info: &TypeInfo, member: &'static str, kind: ValueKind) -> Result<MemberAccessor> {
    let def = info
        .member(member)
        .ok_or_else(|| Error::member_not_found(info.type_path(), member))?;

    let enum_table = match kind {
        ValueKind::Enum => {
            let enum_key = def
                .enum_key()
                .ok_or_else(|| Error::member_not_found(info.type_path(), member))?;
            let family = registry::family(info.family())
                .ok_or_else(|| Error::unsupported_driver_type(info.type_path()))?;
            let table = family
                .enum_table(enum_key)
                .cloned()
                .ok_or_else(|| Error::member_not_found(info.type_path(), enum_key))?;
            Some(table)
        }
        _ => None,
    };

    tracing::trace!(
        type_path = info.type_path(),
        member,
        kind = ?kind,
        "compiled member accessor"
    );

    Ok(MemberAccessor {
        type_path: info.type_path(),
        member,
        kind,
        get: def.getter(),
        set: def.setter(),
        enum_table,
    })
}
