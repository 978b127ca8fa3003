//! Unit-versus-unit attack resolution.
//!
//! An attack resolves the attacker's effective damage (base plus the bonus of
//! a held weapon), validates the target and applies the damage to the target's
//! hit points, flooring at zero.
//!
//! ```text
//! Alive --receive_damage(hp reaches 0)--> Dead
//! Dead: cannot attack, can still be attacked (stays at 0)
//! ```

use crate::battlefield::Battlefield;
use crate::entity::{Entity, EntityId};
use crate::error::{Result, WargameError};
use crate::repository::Repository;
use crate::unit::Unit;

impl<R: Repository> Battlefield<R> {
    /// Damage `unit` deals per attack: base damage plus the bonus of its
    /// equipped weapon, if any.
    ///
    /// # Errors
    ///
    /// Fails if `unit` is unknown or is not a unit.
    pub fn effective_damage(&self, unit: EntityId) -> Result<u32> {
        let unit = self.load_unit(unit, "unit")?;
        self.damage_of(&unit)
    }

    /// Have `attacker` strike `target` once.
    ///
    /// Returns the damage dealt, which is the attacker's effective damage even
    /// when the target had fewer hit points left.
    ///
    /// # Errors
    ///
    /// - [`WargameError::InvalidAttackTarget`] if `target` is not a unit, or is
    ///   the attacker itself.
    /// - [`WargameError::UnitCannotAttack`] if the attacker is dead. The target
    ///   is left untouched.
    /// - [`WargameError::InvalidArgumentType`] if `attacker` is not a unit.
    pub fn attack(&mut self, attacker: EntityId, target: EntityId) -> Result<u32> {
        let attacker = self.load_unit(attacker, "attacker")?;
        let mut target = self.attack_target(target)?;
        if target.id == attacker.id {
            return Err(WargameError::InvalidAttackTarget(format!(
                "unit {} cannot attack itself",
                attacker.id
            )));
        }
        if !attacker.is_alive() {
            return Err(WargameError::UnitCannotAttack(attacker.id));
        }

        let damage = self.damage_of(&attacker)?;
        let dealt = target.receive_damage(damage);
        let (target_id, remaining) = (target.id, target.hit_points);
        self.store(target.into())?;

        tracing::debug!(
            attacker = attacker.id,
            target = target_id,
            damage = dealt,
            remaining,
            "Attack resolved"
        );
        Ok(dealt)
    }

    /// Apply `amount` damage to `unit`, flooring its hit points at zero.
    ///
    /// Dead units can still receive damage. Returns `amount`, not the hit
    /// points actually lost.
    ///
    /// # Errors
    ///
    /// Fails if `unit` is unknown or is not a unit.
    pub fn receive_damage(&mut self, unit: EntityId, amount: u32) -> Result<u32> {
        let mut unit = self.load_unit(unit, "unit")?;
        let dealt = unit.receive_damage(amount);
        self.store(unit.into())?;
        Ok(dealt)
    }

    /// Resolve an attack target, rejecting anything that is not a unit.
    pub(crate) fn attack_target(&self, target: EntityId) -> Result<Unit> {
        match self.entity(target)? {
            Entity::Unit(unit) => Ok(unit),
            other => Err(WargameError::InvalidAttackTarget(format!(
                "{} {} is not a unit",
                other.kind(),
                other.id()
            ))),
        }
    }

    fn damage_of(&self, unit: &Unit) -> Result<u32> {
        let weapon = unit
            .weapon()
            .map(|weapon| self.load_weapon(weapon, "weapon"))
            .transpose()?;
        Ok(unit.effective_damage(weapon.as_ref()))
    }
}
