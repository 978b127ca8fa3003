//! Per-variant base stats.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, WargameError};
use crate::unit::{UnitKind, UnitStats};

/// Base stats applied to units created without explicit values.
///
/// # Example RON
///
/// ```ron
/// UnitDefaults(
///     knight: (hit_points: 100, attack_damage: 20),
///     archer: (hit_points: 50, attack_damage: 25),
///     catapult: (hit_points: 200, attack_damage: 50),
/// )
/// ```
///
/// Omitted variants keep their canonical stats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UnitDefaults {
    /// Knight stats.
    pub knight: UnitStats,
    /// Archer stats.
    pub archer: UnitStats,
    /// Catapult stats.
    pub catapult: UnitStats,
}

impl Default for UnitDefaults {
    fn default() -> Self {
        Self {
            knight: UnitKind::Knight.base_stats(),
            archer: UnitKind::Archer.base_stats(),
            catapult: UnitKind::Catapult.base_stats(),
        }
    }
}

impl UnitDefaults {
    /// Stats for one variant.
    #[must_use]
    pub const fn stats_for(&self, kind: UnitKind) -> UnitStats {
        match kind {
            UnitKind::Knight => self.knight,
            UnitKind::Archer => self.archer,
            UnitKind::Catapult => self.catapult,
        }
    }

    /// Parse defaults from a RON string.
    ///
    /// # Errors
    ///
    /// Returns [`WargameError::DataParse`] if the string is not valid RON for
    /// this structure.
    pub fn from_ron_str(ron: &str) -> Result<Self> {
        ron::from_str(ron).map_err(|e| WargameError::DataParse {
            path: "<inline>".to_string(),
            message: e.to_string(),
        })
    }

    /// Load defaults from a RON file.
    ///
    /// # Errors
    ///
    /// Returns [`WargameError::DataParse`] if the file cannot be read or parsed.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| WargameError::DataParse {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        ron::from_str(&contents).map_err(|e| WargameError::DataParse {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }
}
