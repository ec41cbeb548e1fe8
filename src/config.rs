//! Configuration parsing and management for morphlab

use serde::{Deserialize, Serialize};
use std::f32::consts::{FRAC_PI_8, PI};
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, MorphlabError};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub model: ModelConfig,
    pub placement: PlacementConfig,
    pub presets: PresetConfig,
    pub controls: ControlsConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model: ModelConfig::default(),
            placement: PlacementConfig::default(),
            presets: PresetConfig::default(),
            controls: ControlsConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, MorphlabError> {
        let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            ConfigError::ReadFile(format!("{}: {}", path.as_ref().display(), e))
        })?;

        Self::from_str(&contents)
    }

    /// Parse configuration from a TOML string
    pub fn from_str(s: &str) -> Result<Self, MorphlabError> {
        toml::from_str(s).map_err(|e| ConfigError::Parse(e.to_string()).into())
    }

    /// Load configuration from default paths
    pub fn load() -> Result<Self, MorphlabError> {
        // Try config paths in order
        let paths = [
            PathBuf::from("config.toml"),
            PathBuf::from("config/default.toml"),
            dirs_path().join("config.toml"),
        ];

        for path in &paths {
            if path.exists() {
                tracing::info!("Loading config from: {}", path.display());
                return Self::from_file(path);
            }
        }

        tracing::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), MorphlabError> {
        if self.model.path.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "model.path".to_string(),
                message: "Model path must not be empty".to_string(),
            }
            .into());
        }

        if !(self.placement.scale > 0.0) {
            return Err(ConfigError::InvalidValue {
                field: "placement.scale".to_string(),
                message: "Scale must be greater than 0".to_string(),
            }
            .into());
        }

        for (field, step) in [
            ("controls.step_x_plus", self.controls.step_x_plus),
            ("controls.step_x_minus", self.controls.step_x_minus),
            ("controls.step_y_plus", self.controls.step_y_plus),
            ("controls.step_y_minus", self.controls.step_y_minus),
            ("controls.step_z_plus", self.controls.step_z_plus),
            ("controls.step_z_minus", self.controls.step_z_minus),
        ] {
            if !(step > 0.0) || !step.is_finite() {
                return Err(ConfigError::InvalidValue {
                    field: field.to_string(),
                    message: "Rotation step must be a positive finite angle".to_string(),
                }
                .into());
            }
        }

        Ok(())
    }
}

/// Avatar model configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Path to the rigged GLB/glTF model file
    pub path: String,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            path: "assets/models/avatar.glb".to_string(),
        }
    }
}

/// Placement of the avatar inside the host scene
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlacementConfig {
    /// Uniform model scale
    pub scale: f32,
    /// Vertical offset of the wrapper transform
    pub lift: f32,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            scale: 1.5,
            lift: -1.5,
        }
    }
}

/// Preset save/load configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PresetConfig {
    /// Directory for headless preset save/load
    pub dir: PathBuf,
    /// Clamp expression values to [0, 1] when decoding preset files
    pub clamp_on_decode: bool,
}

impl Default for PresetConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("presets"),
            clamp_on_decode: true,
        }
    }
}

/// Per-button bone rotation steps, in radians.
///
/// Each of the six rotate buttons carries its own step so the panel can be
/// tuned per axis and direction.
// TODO: step_z_minus differs from the other five axes; confirm whether the
// asymmetry is intended before unifying.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlsConfig {
    pub step_x_plus: f32,
    pub step_x_minus: f32,
    pub step_y_plus: f32,
    pub step_y_minus: f32,
    pub step_z_plus: f32,
    pub step_z_minus: f32,
}

impl Default for ControlsConfig {
    fn default() -> Self {
        Self {
            step_x_plus: FRAC_PI_8,
            step_x_minus: FRAC_PI_8,
            step_y_plus: FRAC_PI_8,
            step_y_minus: FRAC_PI_8,
            step_z_plus: FRAC_PI_8,
            step_z_minus: PI / 15.0,
        }
    }
}

/// Get the platform-specific configuration directory
fn dirs_path() -> PathBuf {
    #[cfg(target_os = "linux")]
    {
        if let Some(config_dir) = std::env::var_os("XDG_CONFIG_HOME") {
            return PathBuf::from(config_dir).join("morphlab");
        }
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home).join(".config/morphlab");
        }
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home).join("Library/Application Support/morphlab");
        }
    }

    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            return PathBuf::from(appdata).join("morphlab");
        }
    }

    PathBuf::from(".")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.placement.scale, 1.5);
        assert_eq!(config.placement.lift, -1.5);
        assert!(config.presets.clamp_on_decode);
    }

    #[test]
    fn test_default_rotation_steps() {
        let controls = ControlsConfig::default();
        assert_eq!(controls.step_x_plus, FRAC_PI_8);
        assert_eq!(controls.step_x_minus, FRAC_PI_8);
        assert_eq!(controls.step_y_plus, FRAC_PI_8);
        assert_eq!(controls.step_y_minus, FRAC_PI_8);
        assert_eq!(controls.step_z_plus, FRAC_PI_8);
        // The minus-Z button uses a finer step than its five siblings.
        assert_eq!(controls.step_z_minus, PI / 15.0);
    }

    #[test]
    fn test_config_validation() {
        let config = Config::default();
        assert!(config.validate().is_ok());

        let mut bad = Config::default();
        bad.placement.scale = 0.0;
        assert!(bad.validate().is_err());

        let mut bad = Config::default();
        bad.controls.step_y_plus = -0.1;
        assert!(bad.validate().is_err());

        let mut bad = Config::default();
        bad.model.path = String::new();
        assert!(bad.validate().is_err());
    }

    #[test]
    fn test_parse_toml() {
        let toml = r#"
            [model]
            path = "models/test.glb"

            [placement]
            scale = 2.0

            [presets]
            clamp_on_decode = false
        "#;

        let config = Config::from_str(toml).unwrap();
        assert_eq!(config.model.path, "models/test.glb");
        assert_eq!(config.placement.scale, 2.0);
        // Missing fields fall back to defaults
        assert_eq!(config.placement.lift, -1.5);
        assert!(!config.presets.clamp_on_decode);
        assert_eq!(config.controls.step_z_minus, PI / 15.0);
    }
}
