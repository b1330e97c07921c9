//! Shared driver fakes for the integration tests.
//!
//! Two registered driver families whose enum integer identities differ, so
//! canonical-name mapping is observable; a pass-through command decorator; and
//! types outside every recognized namespace.

#![allow(dead_code)]

use oracle_params_rs::{DbCommand, DbParameter, DbValue, ParameterHandle};
use std::sync::Once;

macro_rules! fake_driver_family {
    ($mod_name:ident, $family:literal, $prefix:literal, $offset:expr) => {
        pub mod $mod_name {
            use oracle_params_rs::adapter::probe::{
                ENUM_COLLECTION_TYPE, ENUM_DB_TYPE, ENUM_STATUS, MEMBER_ARRAY_BIND_COUNT,
                MEMBER_ARRAY_BIND_SIZE, MEMBER_BIND_BY_NAME, MEMBER_COLLECTION_TYPE,
                MEMBER_INITIAL_LOB_FETCH_SIZE, MEMBER_IS_NULLABLE, MEMBER_ORACLE_DB_TYPE,
                MEMBER_STATUS,
            };
            use oracle_params_rs::adapter::registry::{
                self, DriverFamily, EnumTable, MemberDef, TypeInfo,
            };
            use oracle_params_rs::{
                DbCommand, DbParameter, DbValue, Error, OracleMappingType, ParameterDirection,
                ParameterHandle, Result, SourceVersion,
            };
            use std::any::Any;

            pub const COMMAND_PATH: &str = concat!($prefix, ".Client.OracleCommand");
            pub const PARAMETER_PATH: &str = concat!($prefix, ".Client.OracleParameter");
            /// Offset between canonical enum integers and this driver's own.
            pub const ENUM_OFFSET: i32 = $offset;

            #[derive(Default)]
            pub struct Command {
                pub bind_by_name: bool,
                pub array_bind_count: i32,
                pub initial_lob_fetch_size: i64,
                parameters: Vec<ParameterHandle>,
            }

            impl DbCommand for Command {
                fn create_parameter(&self) -> Box<dyn DbParameter> {
                    Box::new(Parameter::default())
                }

                fn find_parameter(&self, name: &str) -> Option<ParameterHandle> {
                    self.parameters
                        .iter()
                        .find(|h| h.lock().name() == name)
                        .cloned()
                }

                fn attach_parameter(&mut self, parameter: ParameterHandle) {
                    self.parameters.push(parameter);
                }

                fn parameter_handles(&self) -> Vec<ParameterHandle> {
                    self.parameters.clone()
                }
            }

            pub struct Parameter {
                pub name: String,
                pub value: DbValue,
                pub direction: ParameterDirection,
                pub size: i32,
                pub precision: u8,
                pub scale: u8,
                pub source_column: String,
                pub source_version: SourceVersion,
                /// Driver-local enum integers, offset from the canonical ones.
                pub oracle_db_type: i32,
                pub collection_type: i32,
                pub status: i32,
                pub array_bind_size: Option<Vec<i32>>,
                pub is_nullable: bool,
            }

            impl Default for Parameter {
                fn default() -> Self {
                    Self {
                        name: String::new(),
                        value: DbValue::Null,
                        direction: ParameterDirection::Input,
                        size: 0,
                        precision: 0,
                        scale: 0,
                        source_column: String::new(),
                        source_version: SourceVersion::Current,
                        oracle_db_type: OracleMappingType::Varchar2.as_i32() + ENUM_OFFSET,
                        collection_type: ENUM_OFFSET,
                        status: ENUM_OFFSET,
                        array_bind_size: None,
                        is_nullable: false,
                    }
                }
            }

            impl DbParameter for Parameter {
                fn name(&self) -> &str {
                    &self.name
                }

                fn set_name(&mut self, name: &str) {
                    self.name = name.to_string();
                }

                fn value(&self) -> DbValue {
                    self.value.clone()
                }

                fn set_value(&mut self, value: DbValue) {
                    self.value = value;
                }

                fn direction(&self) -> ParameterDirection {
                    self.direction
                }

                fn set_direction(&mut self, direction: ParameterDirection) {
                    self.direction = direction;
                }

                fn size(&self) -> i32 {
                    self.size
                }

                fn set_size(&mut self, size: i32) {
                    self.size = size;
                }

                fn precision(&self) -> u8 {
                    self.precision
                }

                fn set_precision(&mut self, precision: u8) {
                    self.precision = precision;
                }

                fn scale(&self) -> u8 {
                    self.scale
                }

                fn set_scale(&mut self, scale: u8) {
                    self.scale = scale;
                }

                fn source_column(&self) -> &str {
                    &self.source_column
                }

                fn set_source_column(&mut self, column: &str) {
                    self.source_column = column.to_string();
                }

                fn source_version(&self) -> SourceVersion {
                    self.source_version
                }

                fn set_source_version(&mut self, version: SourceVersion) {
                    self.source_version = version;
                }
            }

            fn expect_bool(value: DbValue) -> Result<bool> {
                match value {
                    DbValue::Bool(b) => Ok(b),
                    other => Err(Error::invalid_cast(other.kind_name(), "bool")),
                }
            }

            fn expect_i32(value: DbValue) -> Result<i32> {
                match value {
                    DbValue::Int32(v) => Ok(v),
                    other => Err(Error::invalid_cast(other.kind_name(), "i32")),
                }
            }

            fn expect_i64(value: DbValue) -> Result<i64> {
                match value {
                    DbValue::Int64(v) => Ok(v),
                    other => Err(Error::invalid_cast(other.kind_name(), "i64")),
                }
            }

            fn cmd_bind_by_name(target: &dyn Any) -> Result<DbValue> {
                let cmd = registry::downcast_ref::<Command>(target, COMMAND_PATH)?;
                Ok(DbValue::Bool(cmd.bind_by_name))
            }

            fn cmd_set_bind_by_name(target: &mut dyn Any, value: DbValue) -> Result<()> {
                registry::downcast_mut::<Command>(target, COMMAND_PATH)?.bind_by_name =
                    expect_bool(value)?;
                Ok(())
            }

            fn cmd_array_bind_count(target: &dyn Any) -> Result<DbValue> {
                let cmd = registry::downcast_ref::<Command>(target, COMMAND_PATH)?;
                Ok(DbValue::Int32(cmd.array_bind_count))
            }

            fn cmd_set_array_bind_count(target: &mut dyn Any, value: DbValue) -> Result<()> {
                registry::downcast_mut::<Command>(target, COMMAND_PATH)?.array_bind_count =
                    expect_i32(value)?;
                Ok(())
            }

            fn cmd_initial_lob_fetch_size(target: &dyn Any) -> Result<DbValue> {
                let cmd = registry::downcast_ref::<Command>(target, COMMAND_PATH)?;
                Ok(DbValue::Int64(cmd.initial_lob_fetch_size))
            }

            fn cmd_set_initial_lob_fetch_size(target: &mut dyn Any, value: DbValue) -> Result<()> {
                registry::downcast_mut::<Command>(target, COMMAND_PATH)?.initial_lob_fetch_size =
                    expect_i64(value)?;
                Ok(())
            }

            fn par_db_type(target: &dyn Any) -> Result<DbValue> {
                let p = registry::downcast_ref::<Parameter>(target, PARAMETER_PATH)?;
                Ok(DbValue::Int32(p.oracle_db_type))
            }

            fn par_set_db_type(target: &mut dyn Any, value: DbValue) -> Result<()> {
                registry::downcast_mut::<Parameter>(target, PARAMETER_PATH)?.oracle_db_type =
                    expect_i32(value)?;
                Ok(())
            }

            fn par_collection_type(target: &dyn Any) -> Result<DbValue> {
                let p = registry::downcast_ref::<Parameter>(target, PARAMETER_PATH)?;
                Ok(DbValue::Int32(p.collection_type))
            }

            fn par_set_collection_type(target: &mut dyn Any, value: DbValue) -> Result<()> {
                registry::downcast_mut::<Parameter>(target, PARAMETER_PATH)?.collection_type =
                    expect_i32(value)?;
                Ok(())
            }

            fn par_status(target: &dyn Any) -> Result<DbValue> {
                let p = registry::downcast_ref::<Parameter>(target, PARAMETER_PATH)?;
                Ok(DbValue::Int32(p.status))
            }

            fn par_array_bind_size(target: &dyn Any) -> Result<DbValue> {
                let p = registry::downcast_ref::<Parameter>(target, PARAMETER_PATH)?;
                Ok(match &p.array_bind_size {
                    Some(sizes) => DbValue::from(sizes.clone()),
                    None => DbValue::Null,
                })
            }

            fn par_set_array_bind_size(target: &mut dyn Any, value: DbValue) -> Result<()> {
                let p = registry::downcast_mut::<Parameter>(target, PARAMETER_PATH)?;
                p.array_bind_size = match value {
                    DbValue::Null => None,
                    DbValue::Array(items) => {
                        let mut sizes = Vec::with_capacity(items.len());
                        for item in items {
                            sizes.push(expect_i32(item)?);
                        }
                        Some(sizes)
                    }
                    other => return Err(Error::invalid_cast(other.kind_name(), "Vec<i32>")),
                };
                Ok(())
            }

            fn par_is_nullable(target: &dyn Any) -> Result<DbValue> {
                let p = registry::downcast_ref::<Parameter>(target, PARAMETER_PATH)?;
                Ok(DbValue::Bool(p.is_nullable))
            }

            fn par_set_is_nullable(target: &mut dyn Any, value: DbValue) -> Result<()> {
                registry::downcast_mut::<Parameter>(target, PARAMETER_PATH)?.is_nullable =
                    expect_bool(value)?;
                Ok(())
            }

            pub fn register() {
                let db_type_entries: Vec<(&'static str, i32)> = OracleMappingType::ALL
                    .iter()
                    .map(|t| (t.name(), t.as_i32() + ENUM_OFFSET))
                    .collect();
                registry::register_family(
                    DriverFamily::new($family, $prefix)
                        .with_enum(
                            ENUM_DB_TYPE,
                            EnumTable::new(
                                concat!($prefix, ".Client.OracleDbType"),
                                &db_type_entries,
                            ),
                        )
                        .with_enum(
                            ENUM_COLLECTION_TYPE,
                            EnumTable::new(
                                concat!($prefix, ".Client.OracleCollectionType"),
                                &[
                                    ("None", ENUM_OFFSET),
                                    ("PLSQLAssociativeArray", ENUM_OFFSET + 1),
                                ],
                            ),
                        )
                        .with_enum(
                            ENUM_STATUS,
                            EnumTable::new(
                                concat!($prefix, ".Client.OracleParameterStatus"),
                                &[
                                    ("Success", ENUM_OFFSET),
                                    ("NullFetched", ENUM_OFFSET + 1),
                                    ("NullInsert", ENUM_OFFSET + 2),
                                    ("Truncation", ENUM_OFFSET + 3),
                                ],
                            ),
                        ),
                );
                registry::register_type(
                    TypeInfo::of::<Command>(COMMAND_PATH, $family)
                        .with_member(
                            MemberDef::new(MEMBER_BIND_BY_NAME)
                                .with_get(cmd_bind_by_name)
                                .with_set(cmd_set_bind_by_name),
                        )
                        .with_member(
                            MemberDef::new(MEMBER_ARRAY_BIND_COUNT)
                                .with_get(cmd_array_bind_count)
                                .with_set(cmd_set_array_bind_count),
                        )
                        .with_member(
                            MemberDef::new(MEMBER_INITIAL_LOB_FETCH_SIZE)
                                .with_get(cmd_initial_lob_fetch_size)
                                .with_set(cmd_set_initial_lob_fetch_size),
                        ),
                );
                registry::register_type(
                    TypeInfo::of::<Parameter>(PARAMETER_PATH, $family)
                        .with_member(
                            MemberDef::new(MEMBER_ORACLE_DB_TYPE)
                                .with_get(par_db_type)
                                .with_set(par_set_db_type)
                                .with_enum(ENUM_DB_TYPE),
                        )
                        .with_member(
                            MemberDef::new(MEMBER_COLLECTION_TYPE)
                                .with_get(par_collection_type)
                                .with_set(par_set_collection_type)
                                .with_enum(ENUM_COLLECTION_TYPE),
                        )
                        .with_member(
                            MemberDef::new(MEMBER_STATUS)
                                .with_get(par_status)
                                .with_enum(ENUM_STATUS),
                        )
                        .with_member(
                            MemberDef::new(MEMBER_ARRAY_BIND_SIZE)
                                .with_get(par_array_bind_size)
                                .with_set(par_set_array_bind_size),
                        )
                        .with_member(
                            MemberDef::new(MEMBER_IS_NULLABLE)
                                .with_get(par_is_nullable)
                                .with_set(par_set_is_nullable),
                        ),
                );
            }
        }
    };
}

fake_driver_family!(managed, "fake-managed", "Oracle.ManagedDataAccess", 0);
fake_driver_family!(unmanaged, "fake-unmanaged", "Oracle.DataAccess", 1000);

/// Types registered under a namespace no recognized family claims.
pub mod foreign {
    use oracle_params_rs::adapter::registry::{self, TypeInfo};
    use oracle_params_rs::{
        DbCommand, DbParameter, DbValue, ParameterDirection, ParameterHandle, SourceVersion,
    };

    pub const COMMAND_PATH: &str = "System.Data.SqlClient.SqlCommand";
    pub const PARAMETER_PATH: &str = "System.Data.SqlClient.SqlParameter";

    #[derive(Default)]
    pub struct Command {
        parameters: Vec<ParameterHandle>,
    }

    impl DbCommand for Command {
        fn create_parameter(&self) -> Box<dyn DbParameter> {
            Box::new(Parameter::default())
        }

        fn find_parameter(&self, name: &str) -> Option<ParameterHandle> {
            self.parameters
                .iter()
                .find(|h| h.lock().name() == name)
                .cloned()
        }

        fn attach_parameter(&mut self, parameter: ParameterHandle) {
            self.parameters.push(parameter);
        }

        fn parameter_handles(&self) -> Vec<ParameterHandle> {
            self.parameters.clone()
        }
    }

    pub struct Parameter {
        name: String,
        value: DbValue,
        direction: ParameterDirection,
        size: i32,
        precision: u8,
        scale: u8,
        source_column: String,
        source_version: SourceVersion,
    }

    impl Default for Parameter {
        fn default() -> Self {
            Self {
                name: String::new(),
                value: DbValue::Null,
                direction: ParameterDirection::Input,
                size: 0,
                precision: 0,
                scale: 0,
                source_column: String::new(),
                source_version: SourceVersion::Current,
            }
        }
    }

    impl DbParameter for Parameter {
        fn name(&self) -> &str {
            &self.name
        }

        fn set_name(&mut self, name: &str) {
            self.name = name.to_string();
        }

        fn value(&self) -> DbValue {
            self.value.clone()
        }

        fn set_value(&mut self, value: DbValue) {
            self.value = value;
        }

        fn direction(&self) -> ParameterDirection {
            self.direction
        }

        fn set_direction(&mut self, direction: ParameterDirection) {
            self.direction = direction;
        }

        fn size(&self) -> i32 {
            self.size
        }

        fn set_size(&mut self, size: i32) {
            self.size = size;
        }

        fn precision(&self) -> u8 {
            self.precision
        }

        fn set_precision(&mut self, precision: u8) {
            self.precision = precision;
        }

        fn scale(&self) -> u8 {
            self.scale
        }

        fn set_scale(&mut self, scale: u8) {
            self.scale = scale;
        }

        fn source_column(&self) -> &str {
            &self.source_column
        }

        fn set_source_column(&mut self, column: &str) {
            self.source_column = column.to_string();
        }

        fn source_version(&self) -> SourceVersion {
            self.source_version
        }

        fn set_source_version(&mut self, version: SourceVersion) {
            self.source_version = version;
        }
    }

    pub fn register() {
        registry::register_type(TypeInfo::of::<Command>(COMMAND_PATH, "sqlclient"));
        registry::register_type(TypeInfo::of::<Parameter>(PARAMETER_PATH, "sqlclient"));
    }
}

/// A command type that never registers with the driver registry at all.
pub mod unregistered {
    use oracle_params_rs::{DbCommand, DbParameter, ParameterHandle};

    #[derive(Default)]
    pub struct Command {
        parameters: Vec<ParameterHandle>,
    }

    impl DbCommand for Command {
        fn create_parameter(&self) -> Box<dyn DbParameter> {
            Box::new(super::foreign::Parameter::default())
        }

        fn find_parameter(&self, name: &str) -> Option<ParameterHandle> {
            self.parameters
                .iter()
                .find(|h| h.lock().name() == name)
                .cloned()
        }

        fn attach_parameter(&mut self, parameter: ParameterHandle) {
            self.parameters.push(parameter);
        }

        fn parameter_handles(&self) -> Vec<ParameterHandle> {
            self.parameters.clone()
        }
    }
}

/// Pass-through decorator in the style of profiling/logging command wrappers.
pub struct DecoratedCommand {
    inner: Box<dyn DbCommand>,
}

impl DecoratedCommand {
    pub fn new(inner: Box<dyn DbCommand>) -> Self {
        Self { inner }
    }
}

impl DbCommand for DecoratedCommand {
    fn inner_command(&mut self) -> Option<&mut dyn DbCommand> {
        Some(self.inner.as_mut())
    }

    fn create_parameter(&self) -> Box<dyn DbParameter> {
        self.inner.create_parameter()
    }

    fn find_parameter(&self, name: &str) -> Option<ParameterHandle> {
        self.inner.find_parameter(name)
    }

    fn attach_parameter(&mut self, parameter: ParameterHandle) {
        self.inner.attach_parameter(parameter)
    }

    fn parameter_handles(&self) -> Vec<ParameterHandle> {
        self.inner.parameter_handles()
    }
}

static INIT: Once = Once::new();

/// Register every fake family exactly once per test binary.
pub fn setup() {
    INIT.call_once(|| {
        managed::register();
        unmanaged::register();
        foreign::register();
    });
}

/// Stand-in for statement execution: the driver writes an output value onto
/// an attached parameter.
pub fn simulate_output(command: &dyn DbCommand, name: &str, value: DbValue) {
    let handle = command.find_parameter(name).expect("parameter is attached");
    let mut guard = handle.lock();
    let param: &mut dyn DbParameter = &mut **guard;
    param.set_value(value);
}
