//! Runs the bundled scenarios from disk.

use std::path::PathBuf;

use wargame_core::prelude::*;
use wargame_tools::runner::{run, ActionOutcome};
use wargame_tools::scenario::Scenario;
use wargame_tools::validate::{validate_file, DataFile};

fn scenario_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("scenarios")
        .join(name)
}

#[test]
fn test_bundled_scenario_is_valid() {
    validate_file(&scenario_path("bridge_ambush.ron"), DataFile::Scenario).unwrap();
}

#[test]
fn test_bridge_ambush_outcome() {
    let scenario = Scenario::load(scenario_path("bridge_ambush.ron")).unwrap();
    let (report, field) = run(&scenario, None).unwrap();

    // lancelot 20 + 20, gawain 20, robin 25 + 5
    assert_eq!(report.actions[1].outcome, ActionOutcome::Damage { dealt: 90 });
    // onager hits gawain for 50, leaving 10
    assert_eq!(report.actions[2].outcome, ActionOutcome::Damage { dealt: 50 });
    assert_eq!(report.actions[3].outcome, ActionOutcome::Damage { dealt: 90 });
    assert!(matches!(
        report.actions[4].outcome,
        ActionOutcome::Failed { .. }
    ));

    let onager = report.units.iter().find(|u| u.name == "onager").unwrap();
    assert_eq!(onager.hit_points, 20);
    assert!(onager.alive);
    let gawain = report.units.iter().find(|u| u.name == "gawain").unwrap();
    assert_eq!(gawain.hit_points, 10);

    let restored = Battlefield::restore(&field.snapshot().unwrap()).unwrap();
    assert_eq!(restored.repository().len(), field.repository().len());
}

#[test]
fn test_defaults_override_scenario() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("defaults.ron");
    std::fs::write(&path, "(knight: (hit_points: 100, attack_damage: 30))").unwrap();
    let defaults = UnitDefaults::load(&path).unwrap();

    let scenario = Scenario::load(scenario_path("bridge_ambush.ron")).unwrap();
    let (report, _) = run(&scenario, Some(defaults)).unwrap();

    // lancelot 30 + 20, gawain 30, robin 25 + 5
    assert_eq!(report.actions[1].outcome, ActionOutcome::Damage { dealt: 110 });
}
