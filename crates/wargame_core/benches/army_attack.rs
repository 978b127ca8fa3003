//! Army attack benchmarks for wargame_core.
//!
//! Run with: `cargo bench -p wargame_core`

// Benchmark binaries don't need docs on macro-generated functions
#![allow(missing_docs)]

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use wargame_core::prelude::*;

fn muster(size: usize) -> (Battlefield, EntityId, EntityId) {
    let mut field = Battlefield::new();
    let army = field.create_army();
    for i in 0..size {
        let kind = UnitKind::ALL[i % UnitKind::ALL.len()];
        let unit = field.spawn_unit(kind);
        if kind.is_equippable() {
            let weapon = field.create_weapon(10);
            field.equip(unit, weapon).expect("equip");
        }
        field.add_unit(army, unit).expect("add");
    }
    let target = field.spawn_unit(UnitSpec::new(UnitKind::Catapult).with_hit_points(u32::MAX));
    (field, army, target)
}

/// Benchmarks a single army attack at a few army sizes.
pub fn army_attack_benchmark(c: &mut Criterion) {
    for size in [10, 100, 1000] {
        c.bench_function(&format!("army_attack_{size}"), |b| {
            b.iter_batched(
                || muster(size),
                |(mut field, army, target)| black_box(field.attack_unit(army, target)),
                BatchSize::SmallInput,
            )
        });
    }
}

criterion_group!(benches, army_attack_benchmark);
criterion_main!(benches);
