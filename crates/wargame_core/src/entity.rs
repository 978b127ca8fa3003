//! Entity identity and the tagged union stored by repositories.
//!
//! Every record a [`Repository`](crate::repository::Repository) holds is an
//! [`Entity`]: a unit, an army or a weapon. Operations receive identities and
//! check the kind at runtime, which is how "the target must be a unit" and
//! "the argument must be a weapon" rules are enforced.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::army::Army;
use crate::unit::{Unit, UnitClass, UnitKind};
use crate::weapon::Weapon;

/// Unique identifier for entities, shared across all entity kinds.
pub type EntityId = u64;

/// Discriminant of an [`Entity`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    /// A combatant.
    Unit,
    /// An aggregate of units and sub-armies.
    Army,
    /// A detachable damage modifier.
    Weapon,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Unit => "Unit",
            Self::Army => "Army",
            Self::Weapon => "Weapon",
        };
        f.write_str(name)
    }
}

/// A stored record of any kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Entity {
    /// A unit record.
    Unit(Unit),
    /// An army record.
    Army(Army),
    /// A weapon record.
    Weapon(Weapon),
}

impl Entity {
    /// Identity of the record.
    #[must_use]
    pub const fn id(&self) -> EntityId {
        match self {
            Self::Unit(unit) => unit.id,
            Self::Army(army) => army.id,
            Self::Weapon(weapon) => weapon.id,
        }
    }

    /// Kind of the record.
    #[must_use]
    pub const fn kind(&self) -> EntityKind {
        match self {
            Self::Unit(_) => EntityKind::Unit,
            Self::Army(_) => EntityKind::Army,
            Self::Weapon(_) => EntityKind::Weapon,
        }
    }

    /// Army that directly owns this record. Weapons are never owned by armies.
    #[must_use]
    pub const fn owner(&self) -> Option<EntityId> {
        match self {
            Self::Unit(unit) => unit.army,
            Self::Army(army) => army.army,
            Self::Weapon(_) => None,
        }
    }

    /// Borrow as a unit, if it is one.
    #[must_use]
    pub const fn as_unit(&self) -> Option<&Unit> {
        match self {
            Self::Unit(unit) => Some(unit),
            _ => None,
        }
    }

    /// Borrow as an army, if it is one.
    #[must_use]
    pub const fn as_army(&self) -> Option<&Army> {
        match self {
            Self::Army(army) => Some(army),
            _ => None,
        }
    }

    /// Borrow as a weapon, if it is one.
    #[must_use]
    pub const fn as_weapon(&self) -> Option<&Weapon> {
        match self {
            Self::Weapon(weapon) => Some(weapon),
            _ => None,
        }
    }
}

impl From<Unit> for Entity {
    fn from(unit: Unit) -> Self {
        Self::Unit(unit)
    }
}

impl From<Army> for Entity {
    fn from(army: Army) -> Self {
        Self::Army(army)
    }
}

impl From<Weapon> for Entity {
    fn from(weapon: Weapon) -> Self {
        Self::Weapon(weapon)
    }
}

/// Fields of a record that has not been assigned an identity yet.
///
/// Passed to [`Repository::create`](crate::repository::Repository::create),
/// which picks the identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum NewEntity {
    /// A unit with fully resolved stats.
    Unit {
        /// Variant of the unit.
        kind: UnitKind,
        /// Starting hit points.
        hit_points: u32,
        /// Base attack damage.
        attack_damage: u32,
    },
    /// An empty army without a parent.
    Army,
    /// An unattached weapon.
    Weapon {
        /// Damage bonus granted when equipped.
        damage_value: u32,
    },
}

impl NewEntity {
    /// Kind of record this will become.
    #[must_use]
    pub const fn kind(&self) -> EntityKind {
        match self {
            Self::Unit { .. } => EntityKind::Unit,
            Self::Army => EntityKind::Army,
            Self::Weapon { .. } => EntityKind::Weapon,
        }
    }

    /// Materialize the record under the given identity.
    #[must_use]
    pub fn into_entity(self, id: EntityId) -> Entity {
        match self {
            Self::Unit {
                kind,
                hit_points,
                attack_damage,
            } => Entity::Unit(Unit {
                id,
                class: UnitClass::unarmed(kind),
                hit_points,
                attack_damage,
                army: None,
            }),
            Self::Army => Entity::Army(Army { id, army: None }),
            Self::Weapon { damage_value } => Entity::Weapon(Weapon {
                id,
                damage_value,
                unit: None,
            }),
        }
    }
}
