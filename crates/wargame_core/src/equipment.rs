//! Equipping and removing weapons.
//!
//! Only Knights and Archers carry a weapon slot. The unit/weapon relation is
//! one-to-one in both directions: the unit's slot and the weapon's `unit`
//! field are always written together, after every check has passed.
//!
//! Rule rejections (weapon already taken, unit already armed, nothing to
//! remove) come back as an [`EquipOutcome`] rather than an error. Errors are
//! reserved for contract violations: a missing slot or a non-weapon argument.

use std::fmt;

use crate::battlefield::Battlefield;
use crate::entity::EntityId;
use crate::error::Result;
use crate::repository::Repository;

/// Result of an equip or unequip request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EquipOutcome {
    /// The weapon is now held by the unit.
    Equipped,
    /// The unit's weapon was detached.
    Removed,
    /// The weapon is already held by some unit.
    WeaponTaken,
    /// The unit already holds a weapon.
    AlreadyEquipped,
    /// The unit holds no weapon to remove.
    NotEquipped,
}

impl EquipOutcome {
    /// Whether the request changed anything.
    #[must_use]
    pub const fn is_success(self) -> bool {
        matches!(self, Self::Equipped | Self::Removed)
    }

    /// Human-readable explanation.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::Equipped => "Weapon equipped.",
            Self::Removed => "Weapon removed.",
            Self::WeaponTaken => "Weapon belongs to another unit.",
            Self::AlreadyEquipped => "Unit is already equipped, remove the current weapon first.",
            Self::NotEquipped => "Unit is not equipped with a weapon.",
        }
    }

    /// The `(success, message)` pair.
    #[must_use]
    pub const fn as_pair(self) -> (bool, &'static str) {
        (self.is_success(), self.message())
    }
}

impl fmt::Display for EquipOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl<R: Repository> Battlefield<R> {
    /// Give `weapon` to `unit`.
    ///
    /// # Errors
    ///
    /// - [`WargameError::CapabilityNotSupported`] if the unit variant has no
    ///   weapon slot.
    /// - [`WargameError::InvalidArgumentType`] if `weapon` is not a weapon or
    ///   `unit` is not a unit.
    ///
    /// [`WargameError::CapabilityNotSupported`]: crate::error::WargameError::CapabilityNotSupported
    /// [`WargameError::InvalidArgumentType`]: crate::error::WargameError::InvalidArgumentType
    pub fn equip(&mut self, unit: EntityId, weapon: EntityId) -> Result<EquipOutcome> {
        let mut unit = self.load_unit(unit, "unit")?;
        let slot = *unit.weapon_slot_mut("equip")?;
        let mut weapon = self.load_weapon(weapon, "weapon")?;

        if weapon.is_attached() {
            return Ok(EquipOutcome::WeaponTaken);
        }
        if slot.is_some() {
            return Ok(EquipOutcome::AlreadyEquipped);
        }

        *unit.weapon_slot_mut("equip")? = Some(weapon.id);
        weapon.unit = Some(unit.id);
        let (unit_id, weapon_id) = (unit.id, weapon.id);
        self.store(weapon.into())?;
        self.store(unit.into())?;

        tracing::debug!(unit = unit_id, weapon = weapon_id, "Weapon equipped");
        Ok(EquipOutcome::Equipped)
    }

    /// Detach whatever weapon `unit` holds, making it available elsewhere.
    ///
    /// # Errors
    ///
    /// - [`WargameError::CapabilityNotSupported`] if the unit variant has no
    ///   weapon slot.
    /// - [`WargameError::InvalidArgumentType`] if `unit` is not a unit.
    ///
    /// [`WargameError::CapabilityNotSupported`]: crate::error::WargameError::CapabilityNotSupported
    /// [`WargameError::InvalidArgumentType`]: crate::error::WargameError::InvalidArgumentType
    pub fn unequip(&mut self, unit: EntityId) -> Result<EquipOutcome> {
        let mut unit = self.load_unit(unit, "unit")?;
        let Some(held) = *unit.weapon_slot_mut("unequip")? else {
            return Ok(EquipOutcome::NotEquipped);
        };
        let mut weapon = self.load_weapon(held, "weapon")?;

        *unit.weapon_slot_mut("unequip")? = None;
        weapon.unit = None;
        let unit_id = unit.id;
        self.store(weapon.into())?;
        self.store(unit.into())?;

        tracing::debug!(unit = unit_id, weapon = held, "Weapon removed");
        Ok(EquipOutcome::Removed)
    }
}
