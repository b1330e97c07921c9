//! The parameter bag: declarative parameter attributes applied onto a
//! runtime-unknown driver command just before execution.
//!
//! # Lifecycle
//!
//! 1. Built and mutated by the caller via [`OracleParams::add`] and friends.
//! 2. [`OracleParams::apply`] runs exactly once per physical execution, after
//!    the command's text and connection are set and before the statement runs.
//! 3. Output values are read back through [`OracleParams::get`] after
//!    execution, going through the value converter.
//!
//! A bag is not safe for concurrent mutation; apply is synchronous on the
//! caller's thread.

use crate::adapter::{probe, unwrap};
use crate::command::{into_handle, DbCommand, DbParameter, ParameterHandle};
use crate::convert::{convert, FromDb};
use crate::error::{Error, Result};
use crate::mapping::{
    OracleCollectionType, OracleMappingType, ParameterDirection, ParameterStatus, SourceVersion,
};
use crate::value::DbValue;
use std::sync::Arc;
use tracing::{debug, trace};

/// Strip a leading `@`, `:` or `?` marker so `@id`, `:id` and `id` address
/// the same logical parameter. Idempotent; everything else passes through
/// unchanged (case-sensitive).
pub fn clean(name: &str) -> &str {
    match name.as_bytes().first() {
        Some(b'@') | Some(b':') | Some(b'?') => &name[1..],
        _ => name,
    }
}

/// A logical parameter descriptor. Identity is the normalized name;
/// re-adding the same name overwrites the prior descriptor entirely.
#[derive(Clone, Default)]
pub struct ParamInfo {
    /// Name as supplied; normalized on lookup and bind.
    pub name: String,
    /// Scalar value, or an array for bulk binding. `None` binds NULL.
    pub value: Option<DbValue>,
    pub direction: ParameterDirection,
    /// Engine type tag. Left `None`, the driver infers from the value type.
    pub db_type: Option<OracleMappingType>,
    /// Explicit size; always wins over the default size policy.
    pub size: Option<i32>,
    pub is_nullable: bool,
    pub precision: Option<u8>,
    pub scale: Option<u8>,
    pub source_column: Option<String>,
    pub source_version: SourceVersion,
    pub collection_type: OracleCollectionType,
    /// Per-element sizes for PL/SQL associative array binding.
    pub array_bind_size: Option<Vec<i32>>,
    /// Driver parameter status, populated by read-back only.
    pub status: Option<ParameterStatus>,
    attached: Option<ParameterHandle>,
}

impl ParamInfo {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn value(mut self, value: impl Into<DbValue>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn direction(mut self, direction: ParameterDirection) -> Self {
        self.direction = direction;
        self
    }

    pub fn db_type(mut self, db_type: OracleMappingType) -> Self {
        self.db_type = Some(db_type);
        self
    }

    pub fn size(mut self, size: i32) -> Self {
        self.size = Some(size);
        self
    }

    pub fn nullable(mut self, nullable: bool) -> Self {
        self.is_nullable = nullable;
        self
    }

    pub fn precision(mut self, precision: u8) -> Self {
        self.precision = Some(precision);
        self
    }

    pub fn scale(mut self, scale: u8) -> Self {
        self.scale = Some(scale);
        self
    }

    pub fn source_column(mut self, column: impl Into<String>) -> Self {
        self.source_column = Some(column.into());
        self
    }

    pub fn source_version(mut self, version: SourceVersion) -> Self {
        self.source_version = version;
        self
    }

    pub fn collection_type(mut self, collection_type: OracleCollectionType) -> Self {
        self.collection_type = collection_type;
        self
    }

    pub fn array_bind_size(mut self, sizes: Vec<i32>) -> Self {
        self.array_bind_size = Some(sizes);
        self
    }

    /// Normalized name used as the lookup/bind key.
    pub fn normalized_name(&self) -> &str {
        clean(&self.name)
    }

    /// The driver parameter this descriptor was bound to, once applied.
    pub fn attached(&self) -> Option<&ParameterHandle> {
        self.attached.as_ref()
    }
}

/// A template object whose fields expand into ad hoc input parameters at
/// apply time. How fields are discovered is up to the implementation (the
/// ORM layer typically derives this); the bag only consumes the pairs.
pub trait ParamSource {
    fn bind_fields(&self) -> Vec<(String, DbValue)>;
}

impl ParamSource for Vec<(String, DbValue)> {
    fn bind_fields(&self) -> Vec<(String, DbValue)> {
        self.clone()
    }
}

/// Ordered, name-keyed collection of parameter descriptors plus bag-level
/// execution options.
#[derive(Default)]
pub struct OracleParams {
    parameters: Vec<ParamInfo>,
    templates: Vec<Box<dyn ParamSource>>,
    /// Bulk array-bind row count; > 0 switches the command to array binding.
    pub array_bind_count: i32,
    /// Initial LOB fetch size pushed onto the command when > 0.
    pub initial_lob_fetch_size: i64,
    /// Bind parameters by name instead of position. Left `false`, the
    /// driver's order-based default is preserved untouched.
    pub bind_by_name: bool,
}

impl OracleParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Construct a bag pre-populated from a template object.
    pub fn from_source(source: impl ParamSource + 'static) -> Self {
        let mut bag = Self::new();
        bag.add_source(source);
        bag
    }

    /// Add a parameter descriptor. A leading `@`, `:` or `?` on the name is
    /// stripped before keying; a descriptor with the same normalized name is
    /// replaced wholesale.
    pub fn add(&mut self, param: ParamInfo) {
        let key = param.normalized_name().to_string();
        match self
            .parameters
            .iter_mut()
            .find(|p| p.normalized_name() == key)
        {
            Some(existing) => *existing = param,
            None => self.parameters.push(param),
        }
    }

    /// Shorthand for adding a plain input value.
    pub fn add_value(&mut self, name: &str, value: impl Into<DbValue>) {
        self.add(ParamInfo::new(name).value(value));
    }

    /// Add `(name, value)` pairs as plain input parameters.
    pub fn add_pairs(&mut self, pairs: impl IntoIterator<Item = (String, DbValue)>) {
        for (name, value) in pairs {
            self.add_value(&name, value);
        }
    }

    /// Register a template object for expansion at apply time.
    pub fn add_source(&mut self, source: impl ParamSource + 'static) {
        self.templates.push(Box::new(source));
    }

    /// Merge another bag's descriptors and templates into this one.
    pub fn merge(&mut self, other: OracleParams) {
        for param in other.parameters {
            self.add(param);
        }
        self.templates.extend(other.templates);
    }

    /// Normalized names of all descriptors, in insertion order.
    pub fn parameter_names(&self) -> Vec<String> {
        self.parameters
            .iter()
            .map(|p| p.normalized_name().to_string())
            .collect()
    }

    /// Look up a descriptor by (any form of) its name.
    pub fn param(&self, name: &str) -> Option<&ParamInfo> {
        let key = clean(name);
        self.parameters.iter().find(|p| p.normalized_name() == key)
    }

    /// Apply the bag onto a command: unwrap decorators, push bag-level
    /// options, expand templates, then bind every descriptor in insertion
    /// order. Idempotent for descriptors already bound to an existing
    /// command parameter of the same name (updates in place); creates new
    /// driver parameters otherwise. There is no partial-apply rollback:
    /// parameters attached before a failure stay attached.
    pub fn apply(&mut self, command: &mut dyn DbCommand) -> Result<()> {
        unwrap::with_terminal(command, |actual| self.apply_to_terminal(actual))
    }

    fn apply_to_terminal(&mut self, command: &mut dyn DbCommand) -> Result<()> {
        debug!(
            parameters = self.parameters.len(),
            templates = self.templates.len(),
            array_bind_count = self.array_bind_count,
            "applying parameter bag"
        );

        if self.array_bind_count > 0 {
            let caps = probe::probe_command(command)?;
            caps.set_array_bind_count(command.as_any_mut(), self.array_bind_count)?;
        }

        if self.initial_lob_fetch_size > 0 {
            let caps = probe::probe_command(command)?;
            caps.set_initial_lob_fetch_size(command.as_any_mut(), self.initial_lob_fetch_size)?;
        }

        if self.bind_by_name {
            let caps = probe::probe_command(command)?;
            caps.set_bind_by_name(command.as_any_mut(), true)?;
        }

        for template in &self.templates {
            for (name, value) in template.bind_fields() {
                bind_template_field(command, &name, value);
            }
        }

        for info in self.parameters.iter_mut() {
            let name = info.normalized_name().to_string();
            let (handle, added) = match command.find_parameter(&name) {
                Some(existing) => (existing, false),
                None => {
                    let mut created = command.create_parameter();
                    created.set_name(&name);
                    (into_handle(created), true)
                }
            };

            {
                let mut guard = handle.lock();
                let param: &mut dyn DbParameter = &mut **guard;
                let caps = probe::probe_parameter(&*param)?;

                if let Some(db_type) = info.db_type {
                    caps.set_db_type(param.as_any_mut(), db_type)?;
                }
                caps.set_is_nullable(param.as_any_mut(), info.is_nullable)?;
                if let Some(scale) = info.scale {
                    param.set_scale(scale);
                }
                if let Some(precision) = info.precision {
                    param.set_precision(precision);
                }
                param.set_source_version(info.source_version);
                if let Some(column) = &info.source_column {
                    param.set_source_column(column);
                }
                if info.collection_type != OracleCollectionType::None {
                    caps.set_collection_type(param.as_any_mut(), info.collection_type)?;
                }
                if let Some(sizes) = &info.array_bind_size {
                    caps.set_array_bind_size(param.as_any_mut(), sizes)?;
                }

                let value = info.value.clone().unwrap_or(DbValue::Null);
                param.set_value(value.clone());
                param.set_direction(info.direction);
                apply_size_policy(param, &value, info.size);

                trace!(name = %name, direction = ?info.direction, "bound parameter");
            }

            if added {
                command.attach_parameter(Arc::clone(&handle));
            }
            info.attached = Some(handle);
        }

        Ok(())
    }

    /// Read an (output) parameter's current value, converted to `T`.
    ///
    /// A driver NULL is not surfaced as an error for nullable targets; read
    /// through `Option<T>` to distinguish NULL from the default.
    pub fn get<T: FromDb>(&self, name: &str) -> Result<T> {
        let value = {
            let handle = self.attached_handle(name)?;
            let guard = handle.lock();
            if !guard.direction().is_readable() {
                trace!(name = %clean(name), "reading back an input-direction parameter");
            }
            guard.value()
        };
        convert(value)
    }

    /// Snapshot the attached driver parameter back into a descriptor,
    /// including driver-side status.
    pub fn parameter_info(&self, name: &str) -> Result<ParamInfo> {
        let handle = self.attached_handle(name)?;
        let guard = handle.lock();
        let param: &dyn DbParameter = &**guard;
        let caps = probe::probe_parameter(param)?;

        let mut snapshot = ParamInfo::new(param.name());
        snapshot.value = Some(param.value());
        snapshot.direction = param.direction();
        snapshot.size = Some(param.size());
        snapshot.precision = Some(param.precision());
        snapshot.scale = Some(param.scale());
        snapshot.source_column = Some(param.source_column().to_string());
        snapshot.source_version = param.source_version();
        snapshot.db_type = Some(caps.db_type(param.as_any())?);
        snapshot.collection_type = caps.collection_type(param.as_any())?;
        snapshot.array_bind_size = caps.array_bind_size(param.as_any())?;
        snapshot.is_nullable = caps.is_nullable(param.as_any())?;
        snapshot.status = Some(caps.status(param.as_any())?);
        Ok(snapshot)
    }

    fn attached_handle(&self, name: &str) -> Result<ParameterHandle> {
        let info = self.param(name).ok_or_else(|| Error::ParameterNotFound {
            name: clean(name).to_string(),
        })?;
        let handle = info.attached.as_ref().ok_or_else(|| {
            Error::invalid_state(format!(
                "parameter '{}' has not been applied to a command",
                clean(name)
            ))
        })?;
        Ok(Arc::clone(handle))
    }
}

/// Bind one expanded template field as a plain input parameter.
fn bind_template_field(command: &mut dyn DbCommand, name: &str, value: DbValue) {
    let name = clean(name);
    if let Some(existing) = command.find_parameter(name) {
        let mut guard = existing.lock();
        let param: &mut dyn DbParameter = &mut **guard;
        param.set_value(value.clone());
        apply_size_policy(param, &value, None);
        return;
    }

    let mut created = command.create_parameter();
    created.set_name(name);
    created.set_value(value.clone());
    created.set_direction(ParameterDirection::Input);
    apply_size_policy(created.as_mut(), &value, None);
    command.attach_parameter(into_handle(created));
}

/// Default size policy: short variable-length text gets size 4000 to work
/// around driver truncation defects in metadata inference; an explicit size
/// always overrides, including on re-apply.
fn apply_size_policy(param: &mut dyn DbParameter, value: &DbValue, explicit: Option<i32>) {
    if let Some(s) = value.as_str() {
        if s.chars().count() <= 4000 {
            param.set_size(4000);
        }
    }
    if let Some(size) = explicit {
        param.set_size(size);
    }
}
