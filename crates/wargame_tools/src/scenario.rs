//! Scenario loading and setup.
//!
//! A scenario names every unit, weapon and army it creates, then lists the
//! actions to perform against them. Names share one namespace, so an action
//! can point a unit-only operation at an army and see the rule reject it.
//!
//! # Example RON
//!
//! ```ron
//! Scenario(
//!     name: "Bridge ambush",
//!     units: [
//!         (name: "lancelot", kind: Knight),
//!         (name: "robin", kind: Archer, hit_points: Some(40)),
//!         (name: "onager", kind: Catapult),
//!     ],
//!     weapons: [(name: "excalibur", damage_value: 10, equipped_by: Some("lancelot"))],
//!     armies: [(name: "camelot", members: ["lancelot", "robin"])],
//!     actions: [
//!         ArmyAttack(army: "camelot", target: "onager"),
//!         Unequip(unit: "lancelot"),
//!     ],
//! )
//! ```

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use wargame_core::prelude::*;

/// Error type for scenario operations.
#[derive(Error, Debug)]
pub enum ScenarioError {
    /// File not found.
    #[error("Scenario file not found: {0}")]
    FileNotFound(String),
    /// Failed to read file.
    #[error("Failed to read scenario file: {0}")]
    ReadError(#[from] std::io::Error),
    /// Failed to parse RON.
    #[error("Failed to parse scenario: {0}")]
    ParseError(#[from] ron::error::SpannedError),
    /// Two entities share a name.
    #[error("Name '{0}' is declared more than once")]
    DuplicateName(String),
    /// A name is used but never declared.
    #[error("Unknown name '{0}'")]
    UnknownName(String),
    /// Setting up the initial state broke a rule.
    #[error("Setup failed for '{name}': {source}")]
    Setup {
        /// Entity being set up.
        name: String,
        /// Rule violation.
        #[source]
        source: WargameError,
    },
    /// An action broke a rule.
    #[error(transparent)]
    Rule(#[from] WargameError),
    /// The run report could not be encoded.
    #[error("Failed to encode report: {0}")]
    Report(#[from] serde_json::Error),
    /// A pre-equipped weapon could not be equipped.
    #[error("Cannot equip '{weapon}' on '{unit}': {message}")]
    EquipRejected {
        /// Weapon name.
        weapon: String,
        /// Unit name.
        unit: String,
        /// Rule message.
        message: &'static str,
    },
}

/// A unit to create.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitSetup {
    /// Scenario-wide name.
    pub name: String,
    /// Variant.
    pub kind: UnitKind,
    /// Explicit hit points; variant default otherwise.
    #[serde(default)]
    pub hit_points: Option<u32>,
    /// Explicit base damage; variant default otherwise.
    #[serde(default)]
    pub attack_damage: Option<u32>,
}

impl UnitSetup {
    /// Creation request for the battlefield.
    #[must_use]
    pub fn spec(&self) -> UnitSpec {
        UnitSpec {
            kind: self.kind,
            hit_points: self.hit_points,
            attack_damage: self.attack_damage,
        }
    }
}

/// A weapon to create.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeaponSetup {
    /// Scenario-wide name.
    pub name: String,
    /// Damage bonus.
    pub damage_value: u32,
    /// Unit that starts holding the weapon.
    #[serde(default)]
    pub equipped_by: Option<String>,
}

/// An army to create.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArmySetup {
    /// Scenario-wide name.
    pub name: String,
    /// Units and armies that start as direct members.
    #[serde(default)]
    pub members: Vec<String>,
}

/// One step of a scenario.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    /// A single unit attacks.
    Attack {
        /// Attacking unit.
        attacker: String,
        /// Target unit.
        target: String,
    },
    /// Every unit of an army attacks.
    ArmyAttack {
        /// Attacking army.
        army: String,
        /// Target unit.
        target: String,
    },
    /// Give a weapon to a unit.
    Equip {
        /// Receiving unit.
        unit: String,
        /// Weapon to hand over.
        weapon: String,
    },
    /// Take a unit's weapon away.
    Unequip {
        /// Unit to disarm.
        unit: String,
    },
    /// Move a unit or army into an army.
    AddUnit {
        /// Receiving army.
        army: String,
        /// Unit or army to move.
        member: String,
    },
    /// Release a member from an army.
    RemoveUnit {
        /// Owning army.
        army: String,
        /// Member to release.
        member: String,
    },
    /// Delete an entity.
    Destroy {
        /// Entity to delete.
        name: String,
    },
}

impl Action {
    /// Names the action refers to.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        match self {
            Self::Attack { attacker, target } => vec![attacker.as_str(), target.as_str()],
            Self::ArmyAttack { army, target } => vec![army.as_str(), target.as_str()],
            Self::Equip { unit, weapon } => vec![unit.as_str(), weapon.as_str()],
            Self::Unequip { unit } => vec![unit.as_str()],
            Self::AddUnit { army, member } | Self::RemoveUnit { army, member } => {
                vec![army.as_str(), member.as_str()]
            }
            Self::Destroy { name } => vec![name.as_str()],
        }
    }
}

/// A complete scenario configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    /// Scenario name.
    pub name: String,
    /// Human-readable description.
    #[serde(default)]
    pub description: String,
    /// Unit stats; canonical defaults when omitted.
    #[serde(default)]
    pub defaults: Option<UnitDefaults>,
    /// Units to create, in order.
    #[serde(default)]
    pub units: Vec<UnitSetup>,
    /// Weapons to create, in order.
    #[serde(default)]
    pub weapons: Vec<WeaponSetup>,
    /// Armies to create, in order. Members are added after all armies exist.
    #[serde(default)]
    pub armies: Vec<ArmySetup>,
    /// Steps to run.
    #[serde(default)]
    pub actions: Vec<Action>,
}

impl Scenario {
    /// Load a scenario from a RON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ScenarioError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ScenarioError::FileNotFound(path.display().to_string()));
        }
        let contents = std::fs::read_to_string(path)?;
        let scenario: Scenario = ron::from_str(&contents)?;
        Ok(scenario)
    }

    /// Load from a RON string (useful for embedded scenarios).
    pub fn from_ron_str(ron: &str) -> Result<Self, ScenarioError> {
        let scenario: Scenario = ron::from_str(ron)?;
        Ok(scenario)
    }

    /// Create the declared entities and return the battlefield with its name
    /// table. Actions are not run.
    pub fn build(&self, defaults: Option<UnitDefaults>) -> Result<Deployment, ScenarioError> {
        let defaults = defaults.or(self.defaults).unwrap_or_default();
        let mut deployment = Deployment {
            field: Battlefield::with_defaults(defaults),
            names: HashMap::new(),
            order: Vec::new(),
        };

        for unit in &self.units {
            let id = deployment.field.spawn_unit(unit.spec());
            deployment.declare(&unit.name, id)?;
        }
        for weapon in &self.weapons {
            let id = deployment.field.create_weapon(weapon.damage_value);
            deployment.declare(&weapon.name, id)?;
        }
        for army in &self.armies {
            let id = deployment.field.create_army();
            deployment.declare(&army.name, id)?;
        }

        for weapon in &self.weapons {
            let Some(holder) = &weapon.equipped_by else {
                continue;
            };
            let unit = deployment.resolve(holder)?;
            let id = deployment.resolve(&weapon.name)?;
            let outcome = deployment
                .field
                .equip(unit, id)
                .map_err(|source| ScenarioError::Setup {
                    name: weapon.name.clone(),
                    source,
                })?;
            if !outcome.is_success() {
                return Err(ScenarioError::EquipRejected {
                    weapon: weapon.name.clone(),
                    unit: holder.clone(),
                    message: outcome.message(),
                });
            }
        }
        for army in &self.armies {
            let id = deployment.resolve(&army.name)?;
            for member in &army.members {
                let member_id = deployment.resolve(member)?;
                deployment
                    .field
                    .add_unit(id, member_id)
                    .map_err(|source| ScenarioError::Setup {
                        name: member.clone(),
                        source,
                    })?;
            }
        }

        for action in &self.actions {
            for name in action.names() {
                deployment.resolve(name)?;
            }
        }

        tracing::debug!(
            scenario = %self.name,
            entities = deployment.order.len(),
            "Scenario deployed"
        );
        Ok(deployment)
    }
}

/// A built scenario: the battlefield plus the name of every entity.
#[derive(Debug, Clone)]
pub struct Deployment {
    /// The battlefield holding the declared entities.
    pub field: Battlefield,
    names: HashMap<String, EntityId>,
    order: Vec<String>,
}

impl Deployment {
    /// Identity behind a name.
    pub fn resolve(&self, name: &str) -> Result<EntityId, ScenarioError> {
        self.names
            .get(name)
            .copied()
            .ok_or_else(|| ScenarioError::UnknownName(name.to_string()))
    }

    /// Declared names in declaration order.
    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.order
    }

    fn declare(&mut self, name: &str, id: EntityId) -> Result<(), ScenarioError> {
        if self.names.insert(name.to_string(), id).is_some() {
            return Err(ScenarioError::DuplicateName(name.to_string()));
        }
        self.order.push(name.to_string());
        Ok(())
    }
}
