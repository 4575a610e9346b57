use serde::Deserialize;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use zx_screen::{DitherAlgorithm, ZxPalette};

use crate::error::ConfigError;

/// How the BRIGHT attribute of each block is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BrightMode {
    /// Every block bright
    #[default]
    On,
    /// Every block dim
    Off,
    /// Per block, from the source colors
    Auto,
}

impl FromStr for BrightMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "on" => Ok(BrightMode::On),
            "off" => Ok(BrightMode::Off),
            "auto" => Ok(BrightMode::Auto),
            _ => Err(ConfigError::InvalidValue {
                field: "bright",
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for BrightMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            BrightMode::On => "on",
            BrightMode::Off => "off",
            BrightMode::Auto => "auto",
        })
    }
}

/// Conversion settings loaded from a YAML file
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ConvertConfig {
    /// Dither algorithm key (see `zxscr algorithms`)
    #[serde(default = "default_algorithm")]
    pub algorithm: String,

    /// Dither strength, 0.0 to 1.0
    #[serde(default = "default_strength")]
    pub strength: f32,

    #[serde(default)]
    pub bright: BrightMode,

    /// Channel intensity of non-bright colors
    #[serde(default = "default_dim_level")]
    pub dim_level: u8,

    /// Put the darker color of each block in INK
    #[serde(default)]
    pub prefer_dark_ink: bool,

    /// Push colors to full saturation before dithering
    #[serde(default = "default_saturate")]
    pub saturate: bool,

    /// Largest accepted image
    #[serde(default = "default_max_width")]
    pub max_width: usize,

    #[serde(default = "default_max_height")]
    pub max_height: usize,
}

fn default_algorithm() -> String {
    "fs".to_string()
}

fn default_strength() -> f32 {
    0.5
}

fn default_dim_level() -> u8 {
    zx_screen::palette::DEFAULT_DIM_LEVEL
}

fn default_saturate() -> bool {
    true
}

fn default_max_width() -> usize {
    512
}

fn default_max_height() -> usize {
    384
}

impl ConvertConfig {
    /// Load configuration from `path`, or defaults when no path is given.
    ///
    /// A file that cannot be read is an error; a file that does not parse
    /// is reported and replaced by defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            tracing::debug!("No config file, using defaults");
            return Ok(Self::default());
        };

        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        match serde_yaml::from_str::<Self>(&content) {
            Ok(config) => {
                tracing::info!(
                    path = %path.display(),
                    algorithm = %config.algorithm,
                    bright = %config.bright,
                    "Loaded configuration"
                );
                Ok(config)
            }
            Err(e) => {
                tracing::warn!(%e, path = %path.display(), "Failed to parse config, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Resolve the configured dither algorithm.
    pub fn dither_algorithm(&self) -> Result<DitherAlgorithm, ConfigError> {
        self.algorithm
            .parse()
            .map_err(|_| ConfigError::InvalidValue {
                field: "algorithm",
                value: self.algorithm.clone(),
            })
    }

    /// Check value ranges that the YAML types cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.strength) {
            return Err(ConfigError::InvalidValue {
                field: "strength",
                value: self.strength.to_string(),
            });
        }
        if self.max_width == 0 || self.max_height == 0 {
            return Err(ConfigError::InvalidValue {
                field: "max_width/max_height",
                value: format!("{}x{}", self.max_width, self.max_height),
            });
        }
        self.dither_algorithm()?;
        Ok(())
    }

    /// The palette for the configured dim level.
    pub fn palette(&self) -> ZxPalette {
        ZxPalette::new(self.dim_level)
    }
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            algorithm: default_algorithm(),
            strength: default_strength(),
            bright: BrightMode::default(),
            dim_level: default_dim_level(),
            prefer_dark_ink: false,
            saturate: default_saturate(),
            max_width: default_max_width(),
            max_height: default_max_height(),
        }
    }
}
