//! Command implementations.

pub mod generate;
pub mod providers;
pub mod validate;
