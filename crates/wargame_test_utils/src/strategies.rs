//! Property-based testing strategies.

use proptest::prelude::*;
use wargame_core::prelude::*;

/// Any unit variant.
pub fn unit_kind() -> impl Strategy<Value = UnitKind> {
    prop::sample::select(UnitKind::ALL.to_vec())
}

/// A variant that can hold a weapon.
pub fn equippable_kind() -> impl Strategy<Value = UnitKind> {
    prop::sample::select(vec![UnitKind::Knight, UnitKind::Archer])
}

/// Unit creation requests with stats around the interesting range,
/// including dead units.
pub fn unit_spec() -> impl Strategy<Value = UnitSpec> {
    (unit_kind(), 0u32..300, 0u32..120).prop_map(|(kind, hit_points, attack_damage)| {
        UnitSpec::new(kind)
            .with_hit_points(hit_points)
            .with_attack_damage(attack_damage)
    })
}

/// Damage amounts, weighted towards values that overshoot hit points.
pub fn damage_amount() -> impl Strategy<Value = u32> {
    prop_oneof![
        3 => 0u32..300,
        1 => Just(u32::MAX),
    ]
}

/// Weapon bonuses.
pub fn weapon_damage() -> impl Strategy<Value = u32> {
    0u32..100
}
