//! Skill configuration: database location and per-tool shaping thresholds

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::Result;
use crate::tools::ShapePolicy;

/// Top-level skill configuration, loaded from a TOML file when present
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SkillConfig {
    /// Path to the SQLite knowledge base file
    pub database_path: PathBuf,

    /// Per-tool settings
    pub tools: ToolsConfig,
}

impl Default for SkillConfig {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from("tradewinds.db"),
            tools: ToolsConfig::default(),
        }
    }
}

impl SkillConfig {
    /// Load configuration from a TOML file
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read or parsed
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&text)?)
    }

    /// Load configuration from a TOML file, falling back to defaults when
    /// no path is given
    ///
    /// # Errors
    ///
    /// Returns error if a given file cannot be read or parsed
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        path.map_or_else(|| Ok(Self::default()), Self::load)
    }
}

/// Per-tool configuration
///
/// Shaping thresholds are deliberately tool-specific: the commodity tool
/// tolerates larger result sets than the item tool before degrading.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolsConfig {
    /// Commodity tool thresholds
    pub commodity: ShapePolicy,

    /// Item tool thresholds
    pub item: ShapePolicy,

    /// Route tool settings
    pub route: RouteConfig,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            commodity: ShapePolicy::new(10, 30, 60),
            item: ShapePolicy::new(10, 20, 50),
            route: RouteConfig::default(),
        }
    }
}

/// Route tool settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RouteConfig {
    /// Maximum number of routes returned per call
    pub max_routes: usize,
}

impl Default for RouteConfig {
    fn default() -> Self {
        Self { max_routes: 3 }
    }
}
