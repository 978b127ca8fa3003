//! Armies: ownership of units and sub-armies, and group attacks.
//!
//! Membership is stored on the member side: a unit or sub-army names its
//! owning army in its `army` field. Every change of that field goes through
//! one helper, so adding a member to a new army is what removes it from the
//! old one.

use serde::{Deserialize, Serialize};

use crate::battlefield::Battlefield;
use crate::entity::{Entity, EntityId, EntityKind};
use crate::error::{Result, WargameError};
use crate::repository::{EntityFilter, Repository};

/// An aggregate owner of units and sub-armies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Army {
    /// Identity assigned by the repository.
    pub id: EntityId,
    /// Parent army, if this army is itself a member.
    pub army: Option<EntityId>,
}

/// What one member contributed to an army attack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strike {
    /// The member attacked and dealt this much damage.
    Dealt(u32),
    /// The member is dead, or is the target itself, and sat the attack out.
    Skipped,
}

impl Strike {
    /// Damage this strike adds to the army total.
    #[must_use]
    pub const fn damage(self) -> u32 {
        match self {
            Self::Dealt(amount) => amount,
            Self::Skipped => 0,
        }
    }
}

impl<R: Repository> Battlefield<R> {
    /// Make `member` a direct member of `army`, taking it from any previous
    /// owner. Re-adding a current member changes nothing.
    ///
    /// Returns the number of direct members `army` now has, sub-armies
    /// included.
    ///
    /// # Errors
    ///
    /// - [`WargameError::InvalidArgument`] if `member` is `army` itself.
    /// - [`WargameError::InvalidArgumentType`] if `member` is a weapon or
    ///   `army` is not an army.
    pub fn add_unit(&mut self, army: EntityId, member: EntityId) -> Result<usize> {
        let army = self.load_army(army, "army")?;
        let mut member = self.load_member(member)?;
        if member.id() == army.id {
            return Err(self_parent(army.id));
        }

        let previous = member.owner();
        self.assign_owner(&mut member, Some(army.id))?;
        tracing::debug!(
            army = army.id,
            member = member.id(),
            previous_army = ?previous,
            "Member added to army"
        );
        self.member_count(army.id)
    }

    /// Release a direct member of `army`.
    ///
    /// Returns the number of direct members `army` has left, sub-armies
    /// included.
    ///
    /// # Errors
    ///
    /// - [`WargameError::Rule`] if `member` does not belong to `army`; nothing
    ///   changes.
    /// - [`WargameError::InvalidArgumentType`] if `army` is not an army or
    ///   `member` is a weapon.
    pub fn remove_unit(&mut self, army: EntityId, member: EntityId) -> Result<usize> {
        let army = self.load_army(army, "army")?;
        let mut member = self.load_member(member)?;
        if member.owner() != Some(army.id) {
            return Err(WargameError::Rule(
                "Selected unit does not belong to the army.".to_string(),
            ));
        }

        self.assign_owner(&mut member, None)?;
        tracing::debug!(army = army.id, member = member.id(), "Member removed from army");
        self.member_count(army.id)
    }

    /// Set or clear the parent of `army`.
    ///
    /// # Errors
    ///
    /// - [`WargameError::InvalidArgument`] if `parent` is `army` itself.
    /// - [`WargameError::InvalidArgumentType`] if either id is not an army.
    pub fn set_parent(&mut self, army: EntityId, parent: Option<EntityId>) -> Result<()> {
        let army = self.load_army(army, "army")?;
        if let Some(parent) = parent {
            if parent == army.id {
                return Err(self_parent(army.id));
            }
            self.load_army(parent, "parent")?;
        }
        self.assign_owner(&mut Entity::Army(army), parent)
    }

    /// Direct members of `army` (units and sub-armies), in ascending id order.
    ///
    /// # Errors
    ///
    /// Fails if `army` is unknown or is not an army.
    pub fn members(&self, army: EntityId) -> Result<Vec<Entity>> {
        let army = self.load_army(army, "army")?;
        Ok(self.repository().list(&EntityFilter::owned_by(army.id)))
    }

    /// Number of direct members of `army`.
    ///
    /// # Errors
    ///
    /// Fails if `army` is unknown or is not an army.
    pub fn member_count(&self, army: EntityId) -> Result<usize> {
        Ok(self.members(army)?.len())
    }

    /// Every unit directly owned by `army` attacks `target` once.
    ///
    /// Dead members are skipped and logged, as is a member that is itself
    /// the target. Sub-armies do not take part. Returns the total damage
    /// dealt.
    ///
    /// Damage is applied member by member; if a member fails for any other
    /// reason, the attack stops there and damage already dealt stays applied.
    ///
    /// # Errors
    ///
    /// - [`WargameError::InvalidAttackTarget`] if `target` is not a unit.
    /// - [`WargameError::InvalidArgumentType`] if `army` is not an army.
    pub fn attack_unit(&mut self, army: EntityId, target: EntityId) -> Result<u32> {
        let army = self.load_army(army, "army")?;
        self.attack_target(target)?;

        let attackers: Vec<EntityId> = self
            .repository()
            .list(&EntityFilter::owned_by(army.id).with_kind(EntityKind::Unit))
            .iter()
            .map(Entity::id)
            .collect();

        let total = attackers.into_iter().try_fold(0u32, |total, member| {
            let strike = self.strike(member, target)?;
            Ok::<_, WargameError>(total.saturating_add(strike.damage()))
        })?;

        tracing::debug!(army = army.id, target, total, "Army attack resolved");
        Ok(total)
    }

    /// One member's part in an army attack.
    fn strike(&mut self, member: EntityId, target: EntityId) -> Result<Strike> {
        if member == target {
            tracing::warn!(member, target, "Skipping army member: it is the target");
            return Ok(Strike::Skipped);
        }
        match self.attack(member, target) {
            Ok(amount) => Ok(Strike::Dealt(amount)),
            Err(err) if err.is_recoverable_strike() => {
                tracing::warn!(member, target, "Skipping army member: {err}");
                Ok(Strike::Skipped)
            }
            Err(err) => Err(err),
        }
    }

    /// The single place where ownership changes.
    pub(crate) fn assign_owner(
        &mut self,
        member: &mut Entity,
        owner: Option<EntityId>,
    ) -> Result<()> {
        match member {
            Entity::Unit(unit) => unit.army = owner,
            Entity::Army(army) => army.army = owner,
            Entity::Weapon(_) => {
                return Err(WargameError::InvalidArgumentType {
                    parameter: "member",
                    expected: EntityKind::Unit,
                    found: EntityKind::Weapon,
                })
            }
        }
        self.store(member.clone())
    }

    fn load_member(&self, member: EntityId) -> Result<Entity> {
        let entity = self.entity(member)?;
        if entity.kind() == EntityKind::Weapon {
            return Err(WargameError::InvalidArgumentType {
                parameter: "member",
                expected: EntityKind::Unit,
                found: EntityKind::Weapon,
            });
        }
        Ok(entity)
    }
}

fn self_parent(army: EntityId) -> WargameError {
    WargameError::InvalidArgument(format!("Army {army} cannot have itself as a unit."))
}
