//! Runtime configuration, loaded from .mate/config.yaml

use std::path::Path;

use anyhow::{Context, Result};
use mate_behavior::BehaviorConfig;
use mate_exec::ExecutorConfig;
use mate_nav::NavGrid;
use mate_perception::PerceptionConfig;
use serde::{Deserialize, Serialize};

pub const PROJECT_CONFIG: &str = ".mate/config.yaml";

/// A configured value is out of range.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("`{field}` must be positive, got {value}")]
    NotPositive { field: &'static str, value: f32 },
    #[error("`{field}` must not be empty")]
    Empty { field: &'static str },
}

/// Main configuration. Every section falls back to its defaults when omitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MateConfig {
    /// Config version
    pub version: Option<String>,

    /// Simulation step in seconds
    #[serde(default = "default_tick_seconds")]
    pub tick_seconds: f32,

    pub perception: PerceptionConfig,
    pub executor: ExecutorConfig,
    pub behavior: BehaviorConfig,
    pub nav: NavConfig,
}

/// Movement and navigation backend for the reference world.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavConfig {
    /// Agent walking speed, units per second
    #[serde(default = "default_agent_speed")]
    pub agent_speed: f32,

    /// Speed of a scripted reference entity
    #[serde(default = "default_reference_speed")]
    pub reference_speed: f32,

    /// Walkability grid; an open field when absent
    #[serde(default)]
    pub grid: Option<GridConfig>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridConfig {
    pub width: u32,
    pub depth: u32,
    #[serde(default = "default_cell_size")]
    pub cell_size: f32,
    /// World position of cell (0, 0)'s corner
    #[serde(default)]
    pub origin: [f32; 3],
}

fn default_tick_seconds() -> f32 {
    0.1
}
fn default_agent_speed() -> f32 {
    3.5
}
fn default_reference_speed() -> f32 {
    3.0
}
fn default_cell_size() -> f32 {
    1.0
}

impl Default for MateConfig {
    fn default() -> Self {
        Self {
            version: None,
            tick_seconds: default_tick_seconds(),
            perception: PerceptionConfig::default(),
            executor: ExecutorConfig::default(),
            behavior: BehaviorConfig::default(),
            nav: NavConfig::default(),
        }
    }
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            agent_speed: default_agent_speed(),
            reference_speed: default_reference_speed(),
            grid: None,
        }
    }
}

impl GridConfig {
    pub fn build(&self) -> NavGrid {
        let [x, y, z] = self.origin;
        NavGrid::with_origin(
            self.width,
            self.depth,
            self.cell_size,
            mate_core::Vec3::new(x, y, z),
        )
    }
}

impl MateConfig {
    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;
        let config: Self = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;
        config
            .validate()
            .with_context(|| format!("Invalid config in {}", path.display()))?;
        Ok(config)
    }

    /// Load from project root (looks for .mate/config.yaml)
    pub fn load_from_project(project_root: &Path) -> Result<Self> {
        let config_path = project_root.join(PROJECT_CONFIG);
        if config_path.exists() {
            Self::load(&config_path)
        } else {
            Ok(Self::default())
        }
    }

    /// Write the defaults to .mate/config.yaml under `project_root`. Returns the written path.
    pub fn write_default(project_root: &Path, force: bool) -> Result<std::path::PathBuf> {
        let config_path = project_root.join(PROJECT_CONFIG);
        if config_path.exists() && !force {
            anyhow::bail!("{} already exists", config_path.display());
        }
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let yaml = serde_yaml::to_string(&Self::default()).context("Failed to render config")?;
        std::fs::write(&config_path, yaml)
            .with_context(|| format!("Failed to write {}", config_path.display()))?;
        Ok(config_path)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("tick_seconds", self.tick_seconds),
            ("perception.sample_interval", self.perception.sample_interval),
            ("perception.fallback_interval", self.perception.fallback_interval),
            ("perception.scan_radius", self.perception.scan_radius),
            ("executor.timeout", self.executor.timeout),
            ("nav.agent_speed", self.nav.agent_speed),
        ];
        for (field, value) in positive {
            if value.is_nan() || value <= 0.0 {
                return Err(ConfigError::NotPositive { field, value });
            }
        }
        if self.perception.reference_name.trim().is_empty() {
            return Err(ConfigError::Empty {
                field: "perception.reference_name",
            });
        }
        Ok(())
    }
}
