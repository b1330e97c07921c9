//! Capability traits for driver commands and parameters.
//!
//! This crate never references a driver library at compile time. Drivers (or
//! their test doubles) expose their command/parameter objects through these
//! trait objects; everything driver-specific beyond this surface goes through
//! the member accessor machinery in [`crate::adapter`].

use crate::mapping::{ParameterDirection, SourceVersion};
use crate::value::DbValue;
use parking_lot::Mutex;
use std::any::Any;
use std::sync::Arc;

/// Upcast to [`Any`] plus a readable runtime type name.
///
/// Blanket-implemented for every `'static` type; the capability probe uses
/// `as_any().type_id()` to key its caches and `type_name()` in diagnostics
/// for types that never made it into the registry.
pub trait AsAny: Any {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
    fn type_name(&self) -> &'static str;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }
}

/// Shared handle to an attached driver parameter.
///
/// The bag keeps one of these per applied descriptor so output values can be
/// read back after execution without another walk through the command.
pub type ParameterHandle = Arc<Mutex<Box<dyn DbParameter>>>;

/// Capability interface for a driver command.
///
/// Decorator/proxy commands (profilers, loggers) implement this trait by
/// delegation and expose the wrapped instance through [`inner_command`];
/// terminal driver commands leave the default `None`.
///
/// [`inner_command`]: DbCommand::inner_command
pub trait DbCommand: AsAny {
    /// The wrapped command, for pass-through decorators. `None` marks a
    /// terminal driver command.
    fn inner_command(&mut self) -> Option<&mut dyn DbCommand> {
        None
    }

    /// Create a new, unattached parameter of this command's driver family.
    fn create_parameter(&self) -> Box<dyn DbParameter>;

    /// Find an already-attached parameter by (normalized) name.
    fn find_parameter(&self, name: &str) -> Option<ParameterHandle>;

    /// Attach a parameter to this command's parameter collection.
    fn attach_parameter(&mut self, parameter: ParameterHandle);

    /// All attached parameters, in attach order.
    fn parameter_handles(&self) -> Vec<ParameterHandle>;
}

/// Capability interface for a driver parameter: the members every supported
/// driver exposes with identical shape. Driver-specific members (engine type
/// enum, collection type, array-bind size, nullability, status) are reached
/// through the capability probe instead.
pub trait DbParameter: AsAny {
    fn name(&self) -> &str;
    fn set_name(&mut self, name: &str);

    fn value(&self) -> DbValue;
    fn set_value(&mut self, value: DbValue);

    fn direction(&self) -> ParameterDirection;
    fn set_direction(&mut self, direction: ParameterDirection);

    fn size(&self) -> i32;
    fn set_size(&mut self, size: i32);

    fn precision(&self) -> u8;
    fn set_precision(&mut self, precision: u8);

    fn scale(&self) -> u8;
    fn set_scale(&mut self, scale: u8);

    fn source_column(&self) -> &str;
    fn set_source_column(&mut self, column: &str);

    fn source_version(&self) -> SourceVersion;
    fn set_source_version(&mut self, version: SourceVersion);
}

/// Wrap a freshly created parameter into a shareable handle.
pub fn into_handle(parameter: Box<dyn DbParameter>) -> ParameterHandle {
    Arc::new(Mutex::new(parameter))
}
