//! Property-based tests for the combat and ownership invariants.

use proptest::prelude::*;
use wargame_core::prelude::*;
use wargame_test_utils::strategies::{
    damage_amount, equippable_kind, unit_kind, unit_spec, weapon_damage,
};

proptest! {
    /// Hit points floor at zero and the reported figure is always the input.
    #[test]
    fn prop_receive_damage_floors_and_reports_force(
        spec in unit_spec(),
        hits in prop::collection::vec(damage_amount(), 1..6),
    ) {
        let mut field = Battlefield::new();
        let unit = field.spawn_unit(spec);
        let mut expected = spec.hit_points.unwrap_or_default();

        for amount in hits {
            prop_assert_eq!(field.receive_damage(unit, amount).unwrap(), amount);
            expected = expected.saturating_sub(amount);
            prop_assert_eq!(field.unit(unit).unwrap().hit_points, expected);
        }
    }

    /// An army attack deals exactly the effective damage of its living units.
    #[test]
    fn prop_army_attack_totals_living_members(
        specs in prop::collection::vec(unit_spec(), 0..8),
        target_kind in unit_kind(),
    ) {
        let mut field = Battlefield::new();
        let army = field.create_army();
        let target = field.spawn_unit(target_kind);

        let mut expected = 0u32;
        for spec in specs {
            let unit = field.spawn_unit(spec);
            field.add_unit(army, unit).unwrap();
            if field.is_alive(unit).unwrap() {
                expected += field.effective_damage(unit).unwrap();
            }
        }

        prop_assert_eq!(field.attack_unit(army, target).unwrap(), expected);
    }

    /// A dead attacker never changes its target.
    #[test]
    fn prop_dead_attacker_leaves_target_untouched(
        attacker in unit_kind(),
        target in unit_spec(),
    ) {
        let mut field = Battlefield::new();
        let attacker = field.spawn_unit(UnitSpec::new(attacker).with_hit_points(0));
        let target = field.spawn_unit(target);
        let before = field.unit(target).unwrap();

        prop_assert_eq!(
            field.attack(attacker, target),
            Err(WargameError::UnitCannotAttack(attacker))
        );
        prop_assert_eq!(field.unit(target).unwrap(), before);
    }

    /// Equip then unequip returns both sides to their unattached state, and
    /// effective damage tracks the weapon in between.
    #[test]
    fn prop_equip_cycle_restores_state(
        kind in equippable_kind(),
        bonus in weapon_damage(),
    ) {
        let mut field = Battlefield::new();
        let unit = field.spawn_unit(kind);
        let weapon = field.create_weapon(bonus);
        let base = kind.base_stats().attack_damage;

        prop_assert_eq!(field.equip(unit, weapon).unwrap(), EquipOutcome::Equipped);
        prop_assert_eq!(field.effective_damage(unit).unwrap(), base + bonus);

        prop_assert_eq!(field.unequip(unit).unwrap(), EquipOutcome::Removed);
        prop_assert_eq!(field.effective_damage(unit).unwrap(), base);
        prop_assert_eq!(field.weapon(weapon).unwrap().unit, None);
        prop_assert_eq!(field.unit(unit).unwrap().weapon(), None);
    }

    /// A weapon and a unit never hold more than one partner each, whatever
    /// order equip requests arrive in.
    #[test]
    fn prop_weapon_unit_relation_stays_exclusive(
        requests in prop::collection::vec((0usize..3, 0usize..3, any::<bool>()), 1..20),
    ) {
        let mut field = Battlefield::new();
        let units: Vec<_> = (0..3).map(|_| field.spawn_unit(UnitKind::Knight)).collect();
        let weapons: Vec<_> = (0..3).map(|i| field.create_weapon(i * 5)).collect();

        for (u, w, unequip) in requests {
            if unequip {
                field.unequip(units[u]).unwrap();
            } else {
                field.equip(units[u], weapons[w]).unwrap();
            }

            for &unit in &units {
                if let Some(held) = field.unit(unit).unwrap().weapon() {
                    prop_assert_eq!(field.weapon(held).unwrap().unit, Some(unit));
                }
            }
            for &weapon in &weapons {
                if let Some(holder) = field.weapon(weapon).unwrap().unit {
                    prop_assert_eq!(field.unit(holder).unwrap().weapon(), Some(weapon));
                }
            }
        }
    }

    /// Adding a unit to a sequence of armies leaves it in exactly one.
    #[test]
    fn prop_membership_is_exclusive(moves in prop::collection::vec(0usize..4, 1..12)) {
        let mut field = Battlefield::new();
        let armies: Vec<_> = (0..4).map(|_| field.create_army()).collect();
        let unit = field.spawn_unit(UnitKind::Archer);

        for &index in &moves {
            field.add_unit(armies[index], unit).unwrap();
        }

        let last = armies[*moves.last().unwrap()];
        for &army in &armies {
            let expected = usize::from(army == last);
            prop_assert_eq!(field.member_count(army).unwrap(), expected);
        }
    }
}
