//! Shared value objects used across domain modules.

mod clearable;

pub use clearable::Clearable;
