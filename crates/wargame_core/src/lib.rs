//! # Wargame Core
//!
//! Combat and ownership rules for armies, units and weapons.
//!
//! This crate contains **only** deterministic logic:
//! - No rendering
//! - No network IO
//! - No randomness
//!
//! Storage is a collaborator behind the [`repository::Repository`] trait; an
//! in-memory implementation ships with the crate.
//!
//! ## Crate Structure
//!
//! - [`battlefield`] - The entry point owning a repository and unit defaults
//! - [`combat`] - Unit attacks and damage
//! - [`equipment`] - Equipping and removing weapons
//! - [`army`] - Membership and army attacks
//! - [`unit`], [`weapon`], [`entity`] - Entity records
//! - [`data`] - RON-loadable unit stats

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]

pub mod army;
pub mod battlefield;
pub mod combat;
pub mod data;
pub mod entity;
pub mod equipment;
pub mod error;
pub mod repository;
pub mod unit;
pub mod weapon;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::army::{Army, Strike};
    pub use crate::battlefield::Battlefield;
    pub use crate::data::UnitDefaults;
    pub use crate::entity::{Entity, EntityId, EntityKind, NewEntity};
    pub use crate::equipment::EquipOutcome;
    pub use crate::error::{Result, WargameError};
    pub use crate::repository::{EntityFilter, MemoryRepository, Repository};
    pub use crate::unit::{Unit, UnitClass, UnitKind, UnitSpec, UnitStats};
    pub use crate::weapon::Weapon;
}
