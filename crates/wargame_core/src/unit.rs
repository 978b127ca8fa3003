//! Units: the combatants.
//!
//! A [`Unit`] is a common record (hit points, base damage, owning army) plus a
//! [`UnitClass`] tag. The tag decides which variant the unit is and whether it
//! carries a weapon slot:
//!
//! | Variant  | Hit points | Attack | Weapon slot |
//! |----------|-----------:|-------:|:-----------:|
//! | Knight   | 100        | 20     | yes         |
//! | Archer   | 50         | 25     | yes         |
//! | Catapult | 200        | 50     | no          |

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::entity::EntityId;
use crate::error::{Result, WargameError};
use crate::weapon::Weapon;

/// Plain variant tag, used for defaults and data files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum UnitKind {
    /// Melee infantry, can hold a weapon.
    Knight,
    /// Ranged infantry, can hold a weapon.
    Archer,
    /// Siege engine, cannot hold a weapon.
    Catapult,
}

impl UnitKind {
    /// All variants in declaration order.
    pub const ALL: [Self; 3] = [Self::Knight, Self::Archer, Self::Catapult];

    /// Display name of the variant.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Knight => "Knight",
            Self::Archer => "Archer",
            Self::Catapult => "Catapult",
        }
    }

    /// Whether units of this variant can equip weapons.
    #[must_use]
    pub const fn is_equippable(self) -> bool {
        matches!(self, Self::Knight | Self::Archer)
    }

    /// Canonical base stats for the variant.
    #[must_use]
    pub const fn base_stats(self) -> UnitStats {
        match self {
            Self::Knight => UnitStats::new(100, 20),
            Self::Archer => UnitStats::new(50, 25),
            Self::Catapult => UnitStats::new(200, 50),
        }
    }
}

impl fmt::Display for UnitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Hit points and base attack damage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UnitStats {
    /// Starting hit points.
    pub hit_points: u32,
    /// Base attack damage.
    pub attack_damage: u32,
}

impl UnitStats {
    /// Create a stat block.
    #[must_use]
    pub const fn new(hit_points: u32, attack_damage: u32) -> Self {
        Self {
            hit_points,
            attack_damage,
        }
    }
}

/// Variant tag carrying the variant-specific state.
///
/// Equippable variants hold a weapon slot; a filled slot names the weapon
/// whose `unit` field points back at this unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnitClass {
    /// A knight and its weapon slot.
    Knight {
        /// Equipped weapon.
        weapon: Option<EntityId>,
    },
    /// An archer and its weapon slot.
    Archer {
        /// Equipped weapon.
        weapon: Option<EntityId>,
    },
    /// A catapult.
    Catapult,
}

impl UnitClass {
    /// Class for a freshly created unit of the given variant.
    #[must_use]
    pub const fn unarmed(kind: UnitKind) -> Self {
        match kind {
            UnitKind::Knight => Self::Knight { weapon: None },
            UnitKind::Archer => Self::Archer { weapon: None },
            UnitKind::Catapult => Self::Catapult,
        }
    }

    /// Variant tag.
    #[must_use]
    pub const fn kind(&self) -> UnitKind {
        match self {
            Self::Knight { .. } => UnitKind::Knight,
            Self::Archer { .. } => UnitKind::Archer,
            Self::Catapult => UnitKind::Catapult,
        }
    }
}

/// Request to create a unit; unset stats fall back to the variant defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitSpec {
    /// Variant to create.
    pub kind: UnitKind,
    /// Explicit hit points.
    #[serde(default)]
    pub hit_points: Option<u32>,
    /// Explicit base attack damage.
    #[serde(default)]
    pub attack_damage: Option<u32>,
}

impl UnitSpec {
    /// A unit of the given variant with default stats.
    #[must_use]
    pub const fn new(kind: UnitKind) -> Self {
        Self {
            kind,
            hit_points: None,
            attack_damage: None,
        }
    }

    /// Builder method to set hit points.
    #[must_use]
    pub const fn with_hit_points(mut self, hit_points: u32) -> Self {
        self.hit_points = Some(hit_points);
        self
    }

    /// Builder method to set base attack damage.
    #[must_use]
    pub const fn with_attack_damage(mut self, attack_damage: u32) -> Self {
        self.attack_damage = Some(attack_damage);
        self
    }

    /// Fill unset stats from `defaults`.
    #[must_use]
    pub fn resolve(&self, defaults: UnitStats) -> UnitStats {
        UnitStats {
            hit_points: self.hit_points.unwrap_or(defaults.hit_points),
            attack_damage: self.attack_damage.unwrap_or(defaults.attack_damage),
        }
    }
}

impl From<UnitKind> for UnitSpec {
    fn from(kind: UnitKind) -> Self {
        Self::new(kind)
    }
}

/// A combatant record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Unit {
    /// Identity assigned by the repository.
    pub id: EntityId,
    /// Variant and variant-specific state.
    pub class: UnitClass,
    /// Remaining hit points. Never negative.
    pub hit_points: u32,
    /// Base attack damage.
    pub attack_damage: u32,
    /// Army that owns this unit.
    pub army: Option<EntityId>,
}

impl Unit {
    /// Variant tag.
    #[must_use]
    pub const fn kind(&self) -> UnitKind {
        self.class.kind()
    }

    /// A unit is alive while it has hit points left.
    #[must_use]
    pub const fn is_alive(&self) -> bool {
        self.hit_points > 0
    }

    /// Equipped weapon, if any. Always `None` for non-equippable variants.
    #[must_use]
    pub const fn weapon(&self) -> Option<EntityId> {
        match self.class {
            UnitClass::Knight { weapon } | UnitClass::Archer { weapon } => weapon,
            UnitClass::Catapult => None,
        }
    }

    /// Mutable access to the weapon slot.
    ///
    /// # Errors
    ///
    /// Returns [`WargameError::CapabilityNotSupported`] for variants without a
    /// slot. `operation` names the attempted call in the error.
    pub fn weapon_slot_mut(&mut self, operation: &'static str) -> Result<&mut Option<EntityId>> {
        match &mut self.class {
            UnitClass::Knight { weapon } | UnitClass::Archer { weapon } => Ok(weapon),
            UnitClass::Catapult => Err(WargameError::CapabilityNotSupported {
                kind: UnitKind::Catapult.name(),
                operation,
            }),
        }
    }

    /// Base damage plus the bonus of `weapon`.
    ///
    /// The bonus only counts when `weapon` is the one this unit holds.
    #[must_use]
    pub fn effective_damage(&self, weapon: Option<&Weapon>) -> u32 {
        match (self.weapon(), weapon) {
            (Some(held), Some(weapon)) if held == weapon.id => {
                self.attack_damage.saturating_add(weapon.damage_value)
            }
            _ => self.attack_damage,
        }
    }

    /// Subtract `amount` from hit points, flooring at zero.
    ///
    /// Returns `amount` unchanged: the reported figure is the force of the
    /// attack, not the hit points actually lost.
    pub fn receive_damage(&mut self, amount: u32) -> u32 {
        self.hit_points = self.hit_points.saturating_sub(amount);
        amount
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit(kind: UnitKind) -> Unit {
        let stats = kind.base_stats();
        Unit {
            id: 1,
            class: UnitClass::unarmed(kind),
            hit_points: stats.hit_points,
            attack_damage: stats.attack_damage,
            army: None,
        }
    }

    #[test]
    fn test_base_stats() {
        assert_eq!(UnitKind::Knight.base_stats(), UnitStats::new(100, 20));
        assert_eq!(UnitKind::Archer.base_stats(), UnitStats::new(50, 25));
        assert_eq!(UnitKind::Catapult.base_stats(), UnitStats::new(200, 50));
    }

    #[test]
    fn test_equippable_variants() {
        assert!(UnitKind::Knight.is_equippable());
        assert!(UnitKind::Archer.is_equippable());
        assert!(!UnitKind::Catapult.is_equippable());
    }

    #[test]
    fn test_spec_resolve_overrides_field_by_field() {
        let defaults = UnitKind::Knight.base_stats();
        let stats = UnitSpec::new(UnitKind::Knight)
            .with_hit_points(0)
            .resolve(defaults);
        assert_eq!(stats, UnitStats::new(0, 20));
    }

    #[test]
    fn test_receive_damage_floors_at_zero() {
        let mut archer = unit(UnitKind::Archer);
        assert_eq!(archer.receive_damage(30), 30);
        assert_eq!(archer.hit_points, 20);
        assert_eq!(archer.receive_damage(500), 500);
        assert_eq!(archer.hit_points, 0);
        assert!(!archer.is_alive());
    }

    #[test]
    fn test_effective_damage_counts_only_held_weapon() {
        let mut knight = unit(UnitKind::Knight);
        let sword = Weapon {
            id: 9,
            damage_value: 10,
            unit: Some(knight.id),
        };
        assert_eq!(knight.effective_damage(Some(&sword)), 20);

        *knight.weapon_slot_mut("equip").unwrap() = Some(sword.id);
        assert_eq!(knight.effective_damage(Some(&sword)), 30);
        assert_eq!(knight.effective_damage(None), 20);
    }

    #[test]
    fn test_catapult_has_no_slot() {
        let mut catapult = unit(UnitKind::Catapult);
        let err = catapult.weapon_slot_mut("unequip").unwrap_err();
        assert_eq!(
            err,
            WargameError::CapabilityNotSupported {
                kind: "Catapult",
                operation: "unequip",
            }
        );
        assert_eq!(catapult.weapon(), None);
    }
}
