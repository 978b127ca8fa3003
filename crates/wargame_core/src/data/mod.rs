//! Data structures for unit configuration.
//!
//! All structs are designed to be deserialized from RON files. Loading
//! helpers take either a RON string or a path.

mod unit_defaults;

pub use unit_defaults::UnitDefaults;
