//! Adapters for the domain ports plus process-level concerns (environment,
//! wall clock, client address resolution).

pub mod clock;
pub mod env;
pub mod in_memory;
pub mod ip;
