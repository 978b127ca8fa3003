//! The battlefield: every rule operates through here.
//!
//! A [`Battlefield`] owns a [`Repository`] and the configured
//! [`UnitDefaults`]. Each operation loads the entities it needs, checks the
//! rules, mutates the values and writes them back before returning. Taking
//! `&mut self` for every mutation means one writer at a time per battlefield.
//!
//! The operations are split by concern:
//! - [`combat`](crate::combat) - unit attacks and damage
//! - [`equipment`](crate::equipment) - equip and unequip
//! - [`army`](crate::army) - membership and army attacks
//!
//! # Example
//!
//! ```
//! use wargame_core::prelude::*;
//!
//! let mut field = Battlefield::new();
//! let knight = field.spawn_unit(UnitKind::Knight);
//! let archer = field.spawn_unit(UnitKind::Archer);
//! let sword = field.create_weapon(10);
//!
//! assert!(field.equip(knight, sword).unwrap().is_success());
//! assert_eq!(field.attack(knight, archer).unwrap(), 30);
//! assert_eq!(field.unit(archer).unwrap().hit_points, 20);
//! ```

use serde::{Deserialize, Serialize};

use crate::army::Army;
use crate::data::UnitDefaults;
use crate::entity::{Entity, EntityId, EntityKind, NewEntity};
use crate::error::{Result, WargameError};
use crate::repository::{EntityFilter, MemoryRepository, Repository};
use crate::unit::{Unit, UnitSpec};
use crate::weapon::Weapon;

/// Combat and ownership rules over a repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Battlefield<R = MemoryRepository> {
    repository: R,
    defaults: UnitDefaults,
}

impl Battlefield<MemoryRepository> {
    /// Create an empty in-memory battlefield with canonical unit stats.
    #[must_use]
    pub fn new() -> Self {
        Self::with_defaults(UnitDefaults::default())
    }

    /// Create an empty in-memory battlefield with custom unit stats.
    #[must_use]
    pub fn with_defaults(defaults: UnitDefaults) -> Self {
        Self::with_repository(MemoryRepository::new(), defaults)
    }

    /// Encode the whole battlefield state.
    ///
    /// # Errors
    ///
    /// Returns [`WargameError::Snapshot`] if serialization fails.
    pub fn snapshot(&self) -> Result<Vec<u8>> {
        bincode::serialize(self)
            .map_err(|e| WargameError::Snapshot(format!("Failed to serialize battlefield: {e}")))
    }

    /// Decode a battlefield produced by [`snapshot`](Self::snapshot).
    ///
    /// # Errors
    ///
    /// Returns [`WargameError::Snapshot`] if the bytes are not a valid snapshot.
    pub fn restore(bytes: &[u8]) -> Result<Self> {
        bincode::deserialize(bytes)
            .map_err(|e| WargameError::Snapshot(format!("Failed to deserialize battlefield: {e}")))
    }
}

impl Default for Battlefield<MemoryRepository> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Repository> Battlefield<R> {
    /// Run the rules against an existing repository.
    pub fn with_repository(repository: R, defaults: UnitDefaults) -> Self {
        Self {
            repository,
            defaults,
        }
    }

    /// The underlying repository.
    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// Consume the battlefield and hand back its repository.
    pub fn into_repository(self) -> R {
        self.repository
    }

    /// Unit stats used when a spec leaves them unset.
    pub fn defaults(&self) -> &UnitDefaults {
        &self.defaults
    }

    // ========================================================================
    // Creation
    // ========================================================================

    /// Create an unowned, unarmed unit.
    pub fn spawn_unit(&mut self, spec: impl Into<UnitSpec>) -> EntityId {
        let spec = spec.into();
        let stats = spec.resolve(self.defaults.stats_for(spec.kind));
        let id = self.repository.create(NewEntity::Unit {
            kind: spec.kind,
            hit_points: stats.hit_points,
            attack_damage: stats.attack_damage,
        });
        tracing::debug!(
            unit = id,
            kind = %spec.kind,
            hit_points = stats.hit_points,
            attack_damage = stats.attack_damage,
            "Unit spawned"
        );
        id
    }

    /// Create an unattached weapon.
    pub fn create_weapon(&mut self, damage_value: u32) -> EntityId {
        self.repository.create(NewEntity::Weapon { damage_value })
    }

    /// Create an empty army without a parent.
    pub fn create_army(&mut self) -> EntityId {
        self.repository.create(NewEntity::Army)
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Fetch any entity.
    ///
    /// # Errors
    ///
    /// Returns [`WargameError::EntityNotFound`] for unknown identities.
    pub fn entity(&self, id: EntityId) -> Result<Entity> {
        self.repository.get(id)
    }

    /// Fetch a unit.
    ///
    /// # Errors
    ///
    /// Fails if `id` is unknown or is not a unit.
    pub fn unit(&self, id: EntityId) -> Result<Unit> {
        self.load_unit(id, "unit")
    }

    /// Fetch an army.
    ///
    /// # Errors
    ///
    /// Fails if `id` is unknown or is not an army.
    pub fn army(&self, id: EntityId) -> Result<Army> {
        self.load_army(id, "army")
    }

    /// Fetch a weapon.
    ///
    /// # Errors
    ///
    /// Fails if `id` is unknown or is not a weapon.
    pub fn weapon(&self, id: EntityId) -> Result<Weapon> {
        self.load_weapon(id, "weapon")
    }

    /// Whether a unit still has hit points.
    ///
    /// # Errors
    ///
    /// Fails if `unit` is unknown or is not a unit.
    pub fn is_alive(&self, unit: EntityId) -> Result<bool> {
        Ok(self.unit(unit)?.is_alive())
    }

    /// The weapon a unit holds, if any.
    ///
    /// # Errors
    ///
    /// Fails if `unit` is unknown or is not a unit.
    pub fn weapon_of(&self, unit: EntityId) -> Result<Option<Weapon>> {
        let unit = self.unit(unit)?;
        unit.weapon()
            .map(|weapon| self.load_weapon(weapon, "weapon"))
            .transpose()
    }

    // ========================================================================
    // Destruction
    // ========================================================================

    /// Delete an entity, clearing every reference that points at it.
    ///
    /// Members of a destroyed army become unowned, the weapon of a destroyed
    /// unit becomes unattached, and a destroyed weapon empties its holder's
    /// slot. Nothing else is deleted.
    ///
    /// # Errors
    ///
    /// Returns [`WargameError::EntityNotFound`] for unknown identities.
    pub fn destroy(&mut self, id: EntityId) -> Result<Entity> {
        match self.repository.get(id)? {
            Entity::Unit(unit) => {
                if let Some(weapon) = unit.weapon() {
                    let mut weapon = self.load_weapon(weapon, "weapon")?;
                    weapon.unit = None;
                    self.store(weapon.into())?;
                }
            }
            Entity::Weapon(weapon) => {
                if let Some(holder) = weapon.unit {
                    let mut holder = self.load_unit(holder, "unit")?;
                    *holder.weapon_slot_mut("destroy")? = None;
                    self.store(holder.into())?;
                }
            }
            Entity::Army(_) => {
                for mut member in self.repository.list(&EntityFilter::owned_by(id)) {
                    self.assign_owner(&mut member, None)?;
                }
            }
        }
        let removed = self.repository.delete(id)?;
        tracing::debug!(entity = id, kind = %removed.kind(), "Entity destroyed");
        Ok(removed)
    }

    // ========================================================================
    // Internal helpers shared by the rule modules
    // ========================================================================

    pub(crate) fn load_unit(&self, id: EntityId, parameter: &'static str) -> Result<Unit> {
        match self.repository.get(id)? {
            Entity::Unit(unit) => Ok(unit),
            other => Err(wrong_kind(parameter, EntityKind::Unit, other.kind())),
        }
    }

    pub(crate) fn load_army(&self, id: EntityId, parameter: &'static str) -> Result<Army> {
        match self.repository.get(id)? {
            Entity::Army(army) => Ok(army),
            other => Err(wrong_kind(parameter, EntityKind::Army, other.kind())),
        }
    }

    pub(crate) fn load_weapon(&self, id: EntityId, parameter: &'static str) -> Result<Weapon> {
        match self.repository.get(id)? {
            Entity::Weapon(weapon) => Ok(weapon),
            other => Err(wrong_kind(parameter, EntityKind::Weapon, other.kind())),
        }
    }

    pub(crate) fn store(&mut self, entity: Entity) -> Result<()> {
        self.repository.update(entity)
    }
}

const fn wrong_kind(parameter: &'static str, expected: EntityKind, found: EntityKind) -> WargameError {
    WargameError::InvalidArgumentType {
        parameter,
        expected,
        found,
    }
}
