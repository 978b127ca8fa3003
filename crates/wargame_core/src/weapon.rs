//! Weapons: detachable damage modifiers.

use serde::{Deserialize, Serialize};

use crate::entity::EntityId;

/// A damage bonus that can be held by one equippable unit at a time.
///
/// The `unit` back reference is only ever changed by equip/unequip on the
/// unit side, so the exclusivity rule lives in one place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Weapon {
    /// Identity assigned by the repository.
    pub id: EntityId,
    /// Damage added to the holder's base attack.
    pub damage_value: u32,
    /// Unit currently holding the weapon.
    pub unit: Option<EntityId>,
}

impl Weapon {
    /// Whether some unit currently holds this weapon.
    #[must_use]
    pub const fn is_attached(&self) -> bool {
        self.unit.is_some()
    }
}
