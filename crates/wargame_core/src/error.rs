//! Error types for combat, equipment and ownership rules.

use thiserror::Error;

use crate::entity::{EntityId, EntityKind};

/// Result type alias using [`WargameError`].
pub type Result<T, E = WargameError> = std::result::Result<T, E>;

/// Top-level error type for all wargame errors.
///
/// Business outcomes that callers are expected to handle (a weapon already
/// taken, a unit already armed) are not errors; see
/// [`EquipOutcome`](crate::equipment::EquipOutcome).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WargameError {
    /// The attack target is not a unit.
    #[error("The selected target cannot be attacked, select another target: {0}")]
    InvalidAttackTarget(String),

    /// The attacking unit is dead.
    #[error("Unit {0} cannot attack, it has no hit points left")]
    UnitCannotAttack(EntityId),

    /// An argument referenced an entity of the wrong kind.
    #[error("Parameter '{parameter}' must be of type {expected}, got {found}")]
    InvalidArgumentType {
        /// Name of the offending parameter.
        parameter: &'static str,
        /// Kind the operation requires.
        expected: EntityKind,
        /// Kind that was supplied.
        found: EntityKind,
    },

    /// The unit variant has no weapon slot.
    #[error("{kind} units cannot use {operation}")]
    CapabilityNotSupported {
        /// Variant name of the unit.
        kind: &'static str,
        /// Operation that was attempted.
        operation: &'static str,
    },

    /// Generic business rule violation.
    #[error("{0}")]
    Rule(String),

    /// An argument value is not acceptable.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The repository has no entity with this identity.
    #[error("Entity not found: {0}")]
    EntityNotFound(EntityId),

    /// Data file parsing error.
    #[error("Failed to parse data file '{path}': {message}")]
    DataParse {
        /// Path to the file that failed to parse.
        path: String,
        /// Error message.
        message: String,
    },

    /// Snapshot encoding or decoding failed.
    #[error("Snapshot error: {0}")]
    Snapshot(String),
}

impl WargameError {
    /// Whether an army attack may skip this failure and carry on with the
    /// remaining members.
    #[must_use]
    pub const fn is_recoverable_strike(&self) -> bool {
        matches!(self, Self::UnitCannotAttack(_))
    }
}
