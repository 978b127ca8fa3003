//! Test fixtures and helpers.
//!
//! Pre-built battlefields for consistent testing.

use wargame_core::prelude::*;

/// A battlefield in a known state, with every entity id exposed.
///
/// Layout:
/// - `army_1`: `knight_1`, `archer_1`, `catapult_1`
/// - `army_2`: `knight_2`, `archer_2`, `catapult_2`
/// - `empty_army`: no members
/// - `equipped_knight` holds `sword` (10), `equipped_archer` holds `longbow` (5)
/// - `longsword` (20) and `recurve_bow` (15) are unattached
/// - `dead_knight`, `dead_archer` and `destroyed_catapult` have 0 hit points
/// - units outside the two armies are unowned
#[derive(Debug, Clone)]
#[allow(missing_docs)]
pub struct Skirmish {
    pub field: Battlefield,
    pub knight_1: EntityId,
    pub knight_2: EntityId,
    pub equipped_knight: EntityId,
    pub dead_knight: EntityId,
    pub archer_1: EntityId,
    pub archer_2: EntityId,
    pub equipped_archer: EntityId,
    pub dead_archer: EntityId,
    pub catapult_1: EntityId,
    pub catapult_2: EntityId,
    pub destroyed_catapult: EntityId,
    pub army_1: EntityId,
    pub army_2: EntityId,
    pub empty_army: EntityId,
    pub sword: EntityId,
    pub longbow: EntityId,
    pub longsword: EntityId,
    pub recurve_bow: EntityId,
}

impl Skirmish {
    /// Build the fixture.
    ///
    /// # Panics
    ///
    /// Panics if the fixture cannot be assembled, which means the rules under
    /// test are broken.
    #[must_use]
    pub fn new() -> Self {
        let mut field = Battlefield::new();

        let knight_1 = field.spawn_unit(UnitKind::Knight);
        let knight_2 = field.spawn_unit(UnitKind::Knight);
        let equipped_knight = field.spawn_unit(UnitKind::Knight);
        let dead_knight = field.spawn_unit(UnitSpec::new(UnitKind::Knight).with_hit_points(0));

        let archer_1 = field.spawn_unit(UnitKind::Archer);
        let archer_2 = field.spawn_unit(UnitKind::Archer);
        let equipped_archer = field.spawn_unit(UnitKind::Archer);
        let dead_archer = field.spawn_unit(UnitSpec::new(UnitKind::Archer).with_hit_points(0));

        let catapult_1 = field.spawn_unit(UnitKind::Catapult);
        let catapult_2 = field.spawn_unit(UnitKind::Catapult);
        let destroyed_catapult =
            field.spawn_unit(UnitSpec::new(UnitKind::Catapult).with_hit_points(0));

        let army_1 = field.create_army();
        let army_2 = field.create_army();
        let empty_army = field.create_army();

        let sword = field.create_weapon(10);
        let longbow = field.create_weapon(5);
        let longsword = field.create_weapon(20);
        let recurve_bow = field.create_weapon(15);

        for (unit, weapon) in [(equipped_knight, sword), (equipped_archer, longbow)] {
            let outcome = field.equip(unit, weapon).expect("fixture equip");
            assert!(outcome.is_success(), "fixture equip: {outcome}");
        }
        for unit in [knight_1, archer_1, catapult_1] {
            field.add_unit(army_1, unit).expect("fixture army_1");
        }
        for unit in [knight_2, archer_2, catapult_2] {
            field.add_unit(army_2, unit).expect("fixture army_2");
        }

        tracing::trace!("Skirmish fixture assembled");

        Self {
            field,
            knight_1,
            knight_2,
            equipped_knight,
            dead_knight,
            archer_1,
            archer_2,
            equipped_archer,
            dead_archer,
            catapult_1,
            catapult_2,
            destroyed_catapult,
            army_1,
            army_2,
            empty_army,
            sword,
            longbow,
            longsword,
            recurve_bow,
        }
    }

    /// Hit points of a unit.
    ///
    /// # Panics
    ///
    /// Panics if `unit` is not a unit.
    #[must_use]
    pub fn hp(&self, unit: EntityId) -> u32 {
        self.field.unit(unit).expect("unit").hit_points
    }

    /// Number of direct members of an army.
    ///
    /// # Panics
    ///
    /// Panics if `army` is not an army.
    #[must_use]
    pub fn count(&self, army: EntityId) -> usize {
        self.field.member_count(army).expect("army")
    }
}

impl Default for Skirmish {
    fn default() -> Self {
        Self::new()
    }
}
