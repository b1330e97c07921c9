//! Process-wide registry of recognized driver families and their types.
//!
//! This is the Rust stand-in for runtime reflection: every driver family a
//! deployment supports registers its namespace prefix, its enum value tables
//! and a member table per concrete command/parameter type. Registration is
//! append-only and lives for the process lifetime; the maps are bounded by
//! the number of distinct driver types, not by request volume. Adding support
//! for a new driver family is a registration call, not a structural change.

use crate::error::{Error, Result};
use crate::value::DbValue;
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::Arc;

/// Getter over a type-erased driver object.
pub type Getter = fn(&dyn Any) -> Result<DbValue>;

/// Setter over a type-erased driver object.
pub type Setter = fn(&mut dyn Any, DbValue) -> Result<()>;

/// Mapping between canonical enum variant names and one driver's own integer
/// values for the same logical enum.
#[derive(Debug, Clone)]
pub struct EnumTable {
    enum_path: &'static str,
    by_name: HashMap<&'static str, i32>,
    by_value: HashMap<i32, &'static str>,
}

impl EnumTable {
    /// Build a table from `(canonical variant name, driver integer)` pairs.
    pub fn new(enum_path: &'static str, entries: &[(&'static str, i32)]) -> Self {
        let by_name = entries.iter().copied().collect();
        let by_value = entries.iter().map(|&(name, value)| (value, name)).collect();
        Self {
            enum_path,
            by_name,
            by_value,
        }
    }

    /// Full driver path of the enum this table mirrors.
    pub fn enum_path(&self) -> &'static str {
        self.enum_path
    }

    /// Driver integer for a canonical variant name.
    pub fn value_of(&self, name: &str) -> Option<i32> {
        self.by_name.get(name).copied()
    }

    /// Canonical variant name for a driver integer.
    pub fn name_of(&self, value: i32) -> Option<&'static str> {
        self.by_value.get(&value).copied()
    }
}

/// A recognized driver family: its namespace prefix (the allow-list entry)
/// and the enum identities its types use.
#[derive(Debug, Clone)]
pub struct DriverFamily {
    name: &'static str,
    namespace_prefix: &'static str,
    enums: HashMap<&'static str, EnumTable>,
}

impl DriverFamily {
    pub fn new(name: &'static str, namespace_prefix: &'static str) -> Self {
        Self {
            name,
            namespace_prefix,
            enums: HashMap::new(),
        }
    }

    /// Attach an enum table under a logical key such as
    /// [`crate::adapter::probe::ENUM_DB_TYPE`].
    pub fn with_enum(mut self, key: &'static str, table: EnumTable) -> Self {
        self.enums.insert(key, table);
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn namespace_prefix(&self) -> &'static str {
        self.namespace_prefix
    }

    pub fn enum_table(&self, key: &str) -> Option<&EnumTable> {
        self.enums.get(key)
    }
}

/// One named member of a registered driver type.
pub struct MemberDef {
    name: &'static str,
    get: Option<Getter>,
    set: Option<Setter>,
    enum_key: Option<&'static str>,
}

impl MemberDef {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            get: None,
            set: None,
            enum_key: None,
        }
    }

    pub fn with_get(mut self, get: Getter) -> Self {
        self.get = Some(get);
        self
    }

    pub fn with_set(mut self, set: Setter) -> Self {
        self.set = Some(set);
        self
    }

    /// Mark the member as enum-typed; the key names the family enum table
    /// the accessor converts through.
    pub fn with_enum(mut self, enum_key: &'static str) -> Self {
        self.enum_key = Some(enum_key);
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn getter(&self) -> Option<Getter> {
        self.get
    }

    pub fn setter(&self) -> Option<Setter> {
        self.set
    }

    pub fn enum_key(&self) -> Option<&'static str> {
        self.enum_key
    }
}

/// Registration record for one concrete driver type.
pub struct TypeInfo {
    type_id: TypeId,
    type_path: &'static str,
    family: &'static str,
    members: HashMap<&'static str, MemberDef>,
}

impl TypeInfo {
    /// Describe concrete type `T` living at the given dotted namespace path,
    /// owned by the named family.
    pub fn of<T: Any>(type_path: &'static str, family: &'static str) -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            type_path,
            family,
            members: HashMap::new(),
        }
    }

    pub fn with_member(mut self, member: MemberDef) -> Self {
        self.members.insert(member.name(), member);
        self
    }

    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    pub fn type_path(&self) -> &'static str {
        self.type_path
    }

    pub fn family(&self) -> &'static str {
        self.family
    }

    pub fn member(&self, name: &str) -> Option<&MemberDef> {
        self.members.get(name)
    }
}

static FAMILIES: Lazy<RwLock<HashMap<&'static str, Arc<DriverFamily>>>> =
    Lazy::new(|| RwLock::new(HashMap::new()));

static TYPES: Lazy<RwLock<HashMap<TypeId, Arc<TypeInfo>>>> =
    Lazy::new(|| RwLock::new(HashMap::new()));

/// Register a driver family. Re-registering the same name replaces the entry;
/// in practice registration happens once at startup.
pub fn register_family(family: DriverFamily) {
    tracing::debug!(family = family.name(), prefix = family.namespace_prefix(), "registering driver family");
    FAMILIES.write().insert(family.name(), Arc::new(family));
}

/// Register a concrete driver type.
pub fn register_type(info: TypeInfo) {
    tracing::debug!(type_path = info.type_path(), family = info.family(), "registering driver type");
    TYPES.write().insert(info.type_id(), Arc::new(info));
}

/// Look up the registration record for a runtime type.
pub fn type_info(type_id: TypeId) -> Option<Arc<TypeInfo>> {
    TYPES.read().get(&type_id).cloned()
}

/// Look up a family by name.
pub fn family(name: &str) -> Option<Arc<DriverFamily>> {
    FAMILIES.read().get(name).cloned()
}

/// The namespace allow-list check: the family whose prefix matches the given
/// type path, if any.
pub fn recognized_family_for(type_path: &str) -> Option<Arc<DriverFamily>> {
    FAMILIES
        .read()
        .values()
        .find(|f| type_path.starts_with(f.namespace_prefix()))
        .cloned()
}

/// Downcast helper for member getter implementations.
pub fn downcast_ref<'a, T: Any>(target: &'a dyn Any, type_path: &str) -> Result<&'a T> {
    target.downcast_ref::<T>().ok_or_else(|| {
        Error::invalid_state(format!("accessor for {} applied to a different type", type_path))
    })
}

/// Downcast helper for member setter implementations.
pub fn downcast_mut<'a, T: Any>(target: &'a mut dyn Any, type_path: &str) -> Result<&'a mut T> {
    target.downcast_mut::<T>().ok_or_else(|| {
        Error::invalid_state(format!("accessor for {} applied to a different type", type_path))
    })
}
