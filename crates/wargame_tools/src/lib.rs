//! # Wargame Development Tools
//!
//! Command-line tools for development:
//! - Scenario runner
//! - Data validators

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]

pub mod runner;
pub mod scenario;
pub mod validate;
