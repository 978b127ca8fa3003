//! Runs scenario actions against a deployed battlefield.
//!
//! Rule failures inside an action are recorded in the report and the run
//! moves on to the next action; only setup problems abort a run.

use serde::Serialize;
use wargame_core::prelude::*;

use crate::scenario::{Action, Deployment, Scenario, ScenarioError};

/// What a single action produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum ActionOutcome {
    /// Damage dealt by an attack.
    Damage {
        /// Total damage reported.
        dealt: u32,
    },
    /// Army size after a membership change.
    Members {
        /// Direct members of the army.
        count: usize,
    },
    /// Equip or unequip result.
    Equipment {
        /// Whether anything changed.
        success: bool,
        /// Rule message.
        message: String,
    },
    /// The entity was deleted.
    Destroyed,
    /// The action broke a rule.
    Failed {
        /// Error message.
        error: String,
    },
}

/// One executed action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionRecord {
    /// Position in the scenario's action list.
    pub index: usize,
    /// The action as written.
    pub action: String,
    /// What happened.
    pub outcome: ActionOutcome,
}

/// Final state of a unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnitReport {
    /// Scenario name of the unit.
    pub name: String,
    /// Variant.
    pub kind: String,
    /// Remaining hit points.
    pub hit_points: u32,
    /// Whether the unit can still attack.
    pub alive: bool,
    /// Damage per attack.
    pub effective_damage: u32,
}

/// Everything a run produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunReport {
    /// Scenario name.
    pub scenario: String,
    /// Executed actions, in order.
    pub actions: Vec<ActionRecord>,
    /// Surviving units (not destroyed), in declaration order.
    pub units: Vec<UnitReport>,
}

impl RunReport {
    /// Number of actions that broke a rule.
    #[must_use]
    pub fn failures(&self) -> usize {
        self.actions
            .iter()
            .filter(|record| matches!(record.outcome, ActionOutcome::Failed { .. }))
            .count()
    }

    /// Encode the report as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ScenarioError::Report`] if encoding fails.
    pub fn to_json(&self) -> Result<String, ScenarioError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Deploy `scenario` and run all its actions.
///
/// Returns the report and the final battlefield.
pub fn run(
    scenario: &Scenario,
    defaults: Option<UnitDefaults>,
) -> Result<(RunReport, Battlefield), ScenarioError> {
    let mut deployment = scenario.build(defaults)?;
    let mut actions = Vec::with_capacity(scenario.actions.len());

    for (index, action) in scenario.actions.iter().enumerate() {
        let outcome = match perform(&mut deployment, action) {
            Ok(outcome) => outcome,
            Err(err) => ActionOutcome::Failed {
                error: err.to_string(),
            },
        };
        tracing::info!(index, ?action, ?outcome, "Action executed");
        actions.push(ActionRecord {
            index,
            action: format!("{action:?}"),
            outcome,
        });
    }

    let units = unit_reports(&deployment);
    let report = RunReport {
        scenario: scenario.name.clone(),
        actions,
        units,
    };
    Ok((report, deployment.field))
}

fn perform(deployment: &mut Deployment, action: &Action) -> Result<ActionOutcome, ScenarioError> {
    let outcome = match action {
        Action::Attack { attacker, target } => {
            let (attacker, target) = (deployment.resolve(attacker)?, deployment.resolve(target)?);
            let dealt = deployment.field.attack(attacker, target)?;
            ActionOutcome::Damage { dealt }
        }
        Action::ArmyAttack { army, target } => {
            let (army, target) = (deployment.resolve(army)?, deployment.resolve(target)?);
            let dealt = deployment.field.attack_unit(army, target)?;
            ActionOutcome::Damage { dealt }
        }
        Action::Equip { unit, weapon } => {
            let (unit, weapon) = (deployment.resolve(unit)?, deployment.resolve(weapon)?);
            equipment(deployment.field.equip(unit, weapon)?)
        }
        Action::Unequip { unit } => {
            let unit = deployment.resolve(unit)?;
            equipment(deployment.field.unequip(unit)?)
        }
        Action::AddUnit { army, member } => {
            let (army, member) = (deployment.resolve(army)?, deployment.resolve(member)?);
            let count = deployment.field.add_unit(army, member)?;
            ActionOutcome::Members { count }
        }
        Action::RemoveUnit { army, member } => {
            let (army, member) = (deployment.resolve(army)?, deployment.resolve(member)?);
            let count = deployment.field.remove_unit(army, member)?;
            ActionOutcome::Members { count }
        }
        Action::Destroy { name } => {
            let id = deployment.resolve(name)?;
            deployment.field.destroy(id)?;
            ActionOutcome::Destroyed
        }
    };
    Ok(outcome)
}

fn equipment(outcome: EquipOutcome) -> ActionOutcome {
    ActionOutcome::Equipment {
        success: outcome.is_success(),
        message: outcome.message().to_string(),
    }
}

fn unit_reports(deployment: &Deployment) -> Vec<UnitReport> {
    deployment
        .names()
        .iter()
        .filter_map(|name| {
            let id = deployment.resolve(name).ok()?;
            let unit = deployment.field.unit(id).ok()?;
            let effective_damage = deployment.field.effective_damage(id).ok()?;
            Some(UnitReport {
                name: name.clone(),
                kind: unit.kind().to_string(),
                hit_points: unit.hit_points,
                alive: unit.is_alive(),
                effective_damage,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SIEGE: &str = r#"
Scenario(
    name: "Siege",
    units: [
        (name: "gawain", kind: Knight),
        (name: "tristan", kind: Archer),
        (name: "fallen", kind: Knight, hit_points: Some(0)),
        (name: "trebuchet", kind: Catapult),
    ],
    weapons: [
        (name: "sword", damage_value: 10),
        (name: "bow", damage_value: 15, equipped_by: Some("tristan")),
    ],
    armies: [
        (name: "host", members: ["gawain", "tristan", "fallen"]),
        (name: "reserve"),
    ],
    actions: [
        Equip(unit: "gawain", weapon: "sword"),
        ArmyAttack(army: "host", target: "trebuchet"),
        Attack(attacker: "fallen", target: "trebuchet"),
        Attack(attacker: "gawain", target: "host"),
        Equip(unit: "trebuchet", weapon: "sword"),
        Equip(unit: "gawain", weapon: "bow"),
        RemoveUnit(army: "reserve", member: "gawain"),
        AddUnit(army: "reserve", member: "gawain"),
        Destroy(name: "bow"),
        Unequip(unit: "tristan"),
    ],
)
"#;

    fn siege() -> RunReport {
        let scenario = Scenario::from_ron_str(SIEGE).unwrap();
        run(&scenario, None).unwrap().0
    }

    #[test]
    fn test_army_attack_counts_living_members() {
        let report = siege();
        // gawain 20 + 10, tristan 25 + 15, fallen skipped
        assert_eq!(report.actions[1].outcome, ActionOutcome::Damage { dealt: 70 });
        let trebuchet = report.units.iter().find(|u| u.name == "trebuchet").unwrap();
        assert_eq!(trebuchet.hit_points, 130);
    }

    #[test]
    fn test_rule_failures_are_recorded_and_run_continues() {
        let report = siege();
        assert!(matches!(report.actions[2].outcome, ActionOutcome::Failed { .. }));
        assert!(matches!(report.actions[3].outcome, ActionOutcome::Failed { .. }));
        assert!(matches!(report.actions[4].outcome, ActionOutcome::Failed { .. }));
        assert!(matches!(report.actions[6].outcome, ActionOutcome::Failed { .. }));
        assert_eq!(report.failures(), 4);
        assert_eq!(report.actions.len(), 10);
    }

    #[test]
    fn test_soft_equipment_results_are_not_failures() {
        let report = siege();
        assert_eq!(
            report.actions[5].outcome,
            ActionOutcome::Equipment {
                success: false,
                message: "Weapon belongs to another unit.".to_string(),
            }
        );
        assert_eq!(report.actions[7].outcome, ActionOutcome::Members { count: 1 });
        assert_eq!(report.actions[8].outcome, ActionOutcome::Destroyed);
        assert_eq!(
            report.actions[9].outcome,
            ActionOutcome::Equipment {
                success: false,
                message: "Unit is not equipped with a weapon.".to_string(),
            }
        );
    }

    #[test]
    fn test_destroyed_entities_leave_the_report() {
        let ron = r#"
Scenario(
    name: "Gone",
    units: [(name: "a", kind: Archer), (name: "b", kind: Knight)],
    actions: [Destroy(name: "a")],
)
"#;
        let scenario = Scenario::from_ron_str(ron).unwrap();
        let (report, field) = run(&scenario, None).unwrap();
        let names: Vec<_> = report.units.iter().map(|u| u.name.as_str()).collect();
        assert_eq!(names, vec!["b"]);
        assert_eq!(field.repository().len(), 1);
    }

    #[test]
    fn test_report_serializes_to_json() {
        let text = siege().to_json().unwrap();
        let json: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(json["scenario"], "Siege");
        assert_eq!(json["actions"][1]["outcome"]["result"], "damage");
        assert_eq!(json["actions"][1]["outcome"]["dealt"], 70);
    }

    #[test]
    fn test_encoding_failure_is_an_error() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = ScenarioError::from(source);
        assert!(matches!(err, ScenarioError::Report(_)));
        assert!(err.to_string().starts_with("Failed to encode report"));
    }
}
