//! Comparison configuration and layered resolution.
//!
//! Every setting is resolved with the precedence
//! command-line override > JSON config file > built-in default.

use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::ConfigError;

/// Default perceptual tolerance, in percent.
pub const DEFAULT_TOLERANCE: f64 = 3.0;
/// Default number of differing pixels an image may have and still pass.
pub const DEFAULT_MAX_FAILED_PIXELS: u64 = 10;
/// Default top crop, in logical pixels.
pub const DEFAULT_CROP_TOP_PX: u32 = 0;

/// Effective settings for a comparison run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DiffConfig {
    /// Maximum perceptual distance (0-100) before a pixel counts as differing
    pub tolerance: f64,
    /// Maximum number of differing pixels tolerated per image
    pub max_failed_pixels: u64,
    /// Rows to remove from the top of both images, in logical (1x) pixels
    pub crop_top_px: u32,
}

impl Default for DiffConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            max_failed_pixels: DEFAULT_MAX_FAILED_PIXELS,
            crop_top_px: DEFAULT_CROP_TOP_PX,
        }
    }
}

/// Contents of a JSON config file. Absent keys fall back to the defaults.
///
/// Counts accept any whole number, including float spellings like `10.0`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub tolerance: Option<f64>,
    #[serde(default, deserialize_with = "whole_number")]
    pub max_failed_pixels: Option<u64>,
    #[serde(default, deserialize_with = "whole_number")]
    pub crop_top_px: Option<u32>,
}

fn whole_number<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: TryFrom<u64>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Number {
        Int(u64),
        Float(f64),
    }

    let value = match Option::<Number>::deserialize(deserializer)? {
        None => return Ok(None),
        Some(Number::Int(n)) => n,
        Some(Number::Float(f))
            if f.is_finite() && f >= 0.0 && f.fract() == 0.0 && f < u64::MAX as f64 =>
        {
            f as u64
        }
        Some(Number::Float(f)) => {
            return Err(D::Error::custom(format!(
                "expected a non-negative whole number, found {}",
                f
            )))
        }
    };

    T::try_from(value)
        .map(Some)
        .map_err(|_| D::Error::custom(format!("{} is out of range", value)))
}

impl ConfigFile {
    /// Parse a config file from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Load a config file from disk.
    ///
    /// A path that does not exist yields an empty config; any other read
    /// failure, and malformed JSON, are errors.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::debug!("config file {} not found, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        Self::from_json(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Values supplied explicitly on the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ConfigOverrides {
    pub tolerance: Option<f64>,
    pub max_failed_pixels: Option<u64>,
    pub crop_top_px: Option<u32>,
}

/// Where a resolved setting came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueSource {
    Cli,
    ConfigFile,
    Default,
}

impl ValueSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueSource::Cli => "CLI",
            ValueSource::ConfigFile => "config",
            ValueSource::Default => "default",
        }
    }
}

impl fmt::Display for ValueSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A resolved configuration together with the provenance of each setting.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResolvedConfig {
    pub config: DiffConfig,
    pub tolerance_source: ValueSource,
    pub max_failed_pixels_source: ValueSource,
    pub crop_top_px_source: ValueSource,
}

fn pick<T>(cli: Option<T>, file: Option<T>, default: T) -> (T, ValueSource) {
    match (cli, file) {
        (Some(value), _) => (value, ValueSource::Cli),
        (None, Some(value)) => (value, ValueSource::ConfigFile),
        (None, None) => (default, ValueSource::Default),
    }
}

/// Resolve the effective configuration from overrides and a config file.
pub fn resolve(
    overrides: &ConfigOverrides,
    file: &ConfigFile,
) -> Result<ResolvedConfig, ConfigError> {
    let (tolerance, tolerance_source) =
        pick(overrides.tolerance, file.tolerance, DEFAULT_TOLERANCE);
    let (max_failed_pixels, max_failed_pixels_source) = pick(
        overrides.max_failed_pixels,
        file.max_failed_pixels,
        DEFAULT_MAX_FAILED_PIXELS,
    );
    let (crop_top_px, crop_top_px_source) =
        pick(overrides.crop_top_px, file.crop_top_px, DEFAULT_CROP_TOP_PX);

    if !tolerance.is_finite() || !(0.0..=100.0).contains(&tolerance) {
        return Err(ConfigError::InvalidTolerance(tolerance));
    }

    Ok(ResolvedConfig {
        config: DiffConfig {
            tolerance,
            max_failed_pixels,
            crop_top_px,
        },
        tolerance_source,
        max_failed_pixels_source,
        crop_top_px_source,
    })
}
