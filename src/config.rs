use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Knobs for one comparison run.
///
/// Every field has a default, so a TOML config file only needs to name the
/// settings it overrides:
///
/// ```toml
/// change_threshold = 0.005
/// external_ceiling = 0.05
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CompareConfig {
    /// Center both point sets at their own centroid before matching.
    pub align: bool,
    /// Rescale baseline coordinates before region classification so the
    /// classifier's bounds apply to captures of any scale.
    pub normalize_region_coordinates: bool,
    /// Smallest normal projection treated as a meaningful change; anything
    /// below maps to the neutral color.
    pub change_threshold: f64,
    /// Fixed color-normalization ceiling. `None` derives the ceiling from the
    /// projection field itself.
    pub external_ceiling: Option<f64>,
}

impl Default for CompareConfig {
    fn default() -> Self {
        CompareConfig {
            align: true,
            normalize_region_coordinates: true,
            change_threshold: 0.001,
            external_ceiling: None,
        }
    }
}

impl CompareConfig {
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let raw = fs::read_to_string(&path)
            .with_context(|| format!("failed to read config file {:?}", path.as_ref()))?;
        let config = toml::from_str(&raw)
            .with_context(|| format!("failed to parse config file {:?}", path.as_ref()))?;
        Ok(config)
    }
}
