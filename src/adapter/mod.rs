//! Dynamic adaptation layer for runtime-unknown driver types.
//!
//! The registry holds what a reflective host would discover at runtime: which
//! driver families are recognized, which enum identities they use, and which
//! members their concrete types expose. The accessor compiler and capability
//! probe build and cache fast typed bindings on top of it; the unwrapper
//! strips decorator commands down to the real driver object.

pub mod accessor;
pub mod probe;
pub mod registry;
pub mod unwrap;
