//! Gateway protocol types: amounts, references, canonical encoding, signatures
//! and callback outcomes. Nothing in here performs I/O.

pub mod amount;
pub mod callback;
pub mod canonical;
pub mod codes;
pub mod config;
pub mod description;
pub mod fields;
pub mod intent;
pub mod ports;
pub mod reference;
pub mod signature;
pub mod timestamp;
