//! Error types for dynamic parameter binding.

use thiserror::Error;

/// Result type alias for binding operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for dynamic parameter binding operations.
///
/// All of these are programming or configuration errors: none are retried
/// internally, and all surface synchronously to the caller.
#[derive(Error, Debug)]
pub enum Error {
    /// The concrete command/parameter type does not belong to a recognized
    /// driver family.
    #[error("Unsupported driver type: {type_path} is not in a recognized driver family")]
    UnsupportedDriverType { type_path: String },

    /// An expected member is absent on a type that passed the driver-family
    /// check. Usually a driver version mismatch.
    #[error("Member not found: {type_path} has no member '{member}'")]
    MemberNotFound { type_path: String, member: String },

    /// A canonical enum variant has no counterpart in the driver's enum table.
    #[error("Enum variant '{variant}' not found in driver enum {enum_path}")]
    UnknownEnumVariant { enum_path: String, variant: String },

    /// The value converter cannot produce the requested type from the given
    /// runtime value.
    #[error("Invalid cast from {from} to {to}")]
    InvalidCast { from: String, to: String },

    /// Operation attempted in a state that cannot satisfy it, e.g. reading a
    /// parameter back before the bag was applied.
    #[error("Invalid state: {message}")]
    InvalidState { message: String },

    /// No parameter with the given (normalized) name exists in the bag.
    #[error("Parameter not found: {name}")]
    ParameterNotFound { name: String },
}

impl Error {
    /// Create an unsupported-driver-type error.
    pub fn unsupported_driver_type(type_path: impl Into<String>) -> Self {
        Self::UnsupportedDriverType {
            type_path: type_path.into(),
        }
    }

    /// Create a member-not-found error.
    pub fn member_not_found(type_path: impl Into<String>, member: impl Into<String>) -> Self {
        Self::MemberNotFound {
            type_path: type_path.into(),
            member: member.into(),
        }
    }

    /// Create an invalid-cast error naming source and target types.
    pub fn invalid_cast(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self::InvalidCast {
            from: from.into(),
            to: to.into(),
        }
    }

    /// Create an invalid-state error.
    pub fn invalid_state(message: impl Into<String>) -> Self {
        Self::InvalidState {
            message: message.into(),
        }
    }
}
