//! Reflow configuration.
//!
//! Defaults can be overridden from a JSON file or from `REFLOW_*` environment
//! variables (the binary loads a `.env` file first).

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;
use tracing::info;

use crate::error::{ReflowError, Result};

/// Canonical line-gap threshold, paired with [`AnchorEdge::Top`].
pub const DEFAULT_LINE_GAP: f64 = 10.0;
/// Line-gap threshold of the bottom-edge configuration.
pub const BOTTOM_EDGE_LINE_GAP: f64 = 15.0;
/// Binarization cut-off applied before OCR.
pub const DEFAULT_BINARIZE_THRESHOLD: u8 = 150;

/// Which edge of a fragment's region provides its vertical anchor.
///
/// The same edge drives sorting and paragraph gap measurement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnchorEdge {
    /// Minimum y among the region's points.
    #[default]
    Top,
    /// Maximum y among the region's points.
    Bottom,
}

impl AnchorEdge {
    /// Line-gap threshold paired with this edge when none is given.
    pub fn default_line_gap(self) -> f64 {
        match self {
            Self::Top => DEFAULT_LINE_GAP,
            Self::Bottom => BOTTOM_EDGE_LINE_GAP,
        }
    }
}

impl FromStr for AnchorEdge {
    type Err = ReflowError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "top" => Ok(Self::Top),
            "bottom" => Ok(Self::Bottom),
            other => Err(ReflowError::InvalidConfig(format!(
                "unknown anchor edge '{}', expected 'top' or 'bottom'",
                other
            ))),
        }
    }
}

/// When deserialized, a missing `line_gap_threshold` follows the anchor:
/// `{"anchor": "bottom"}` yields the 15 px bottom-edge gap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "ConfigFile")]
pub struct ReflowConfig {
    /// Maximum vertical anchor distance (pixels) between consecutive
    /// fragments of the same paragraph.
    pub line_gap_threshold: f64,
    pub anchor: AnchorEdge,
    /// Binarize images before handing them to the engine.
    pub binarize: bool,
    pub binarize_threshold: u8,
}

/// On-disk shape of [`ReflowConfig`]; every field is optional.
#[derive(Deserialize)]
struct ConfigFile {
    #[serde(default)]
    line_gap_threshold: Option<f64>,
    #[serde(default)]
    anchor: AnchorEdge,
    #[serde(default = "default_true")]
    binarize: bool,
    #[serde(default = "default_binarize_threshold")]
    binarize_threshold: u8,
}

impl From<ConfigFile> for ReflowConfig {
    fn from(file: ConfigFile) -> Self {
        Self {
            line_gap_threshold: file
                .line_gap_threshold
                .unwrap_or_else(|| file.anchor.default_line_gap()),
            anchor: file.anchor,
            binarize: file.binarize,
            binarize_threshold: file.binarize_threshold,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_binarize_threshold() -> u8 {
    DEFAULT_BINARIZE_THRESHOLD
}

impl Default for ReflowConfig {
    fn default() -> Self {
        Self {
            line_gap_threshold: DEFAULT_LINE_GAP,
            anchor: AnchorEdge::Top,
            binarize: true,
            binarize_threshold: DEFAULT_BINARIZE_THRESHOLD,
        }
    }
}

impl ReflowConfig {
    /// Alternate configuration: bottom-edge anchors with a 15 px gap.
    pub fn bottom_edge() -> Self {
        Self {
            line_gap_threshold: BOTTOM_EDGE_LINE_GAP,
            anchor: AnchorEdge::Bottom,
            ..Self::default()
        }
    }

    pub fn with_line_gap(mut self, threshold: f64) -> Self {
        self.line_gap_threshold = threshold;
        self
    }

    pub fn with_anchor(mut self, anchor: AnchorEdge) -> Self {
        self.anchor = anchor;
        self
    }

    /// Reject thresholds that would make gap comparisons meaningless.
    pub fn validate(&self) -> Result<()> {
        if !self.line_gap_threshold.is_finite() || self.line_gap_threshold < 0.0 {
            return Err(ReflowError::InvalidConfig(format!(
                "line_gap_threshold must be a finite, non-negative number (got {})",
                self.line_gap_threshold
            )));
        }
        Ok(())
    }

    /// Load a config from a JSON file. Missing fields take their defaults; the
    /// line gap defaults from the anchor edge.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: ReflowConfig = serde_json::from_str(&content)?;
        config.validate()?;
        info!("Loaded reflow config from {:?}", path);
        Ok(config)
    }

    /// Build a config from `REFLOW_*` environment variables over the defaults.
    ///
    /// Setting `REFLOW_ANCHOR=bottom` without `REFLOW_LINE_GAP` selects the
    /// bottom-edge configuration as a whole.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = match lookup("REFLOW_ANCHOR") {
            Some(raw) => {
                let anchor = raw.parse::<AnchorEdge>()?;
                Self::default()
                    .with_anchor(anchor)
                    .with_line_gap(anchor.default_line_gap())
            }
            None => Self::default(),
        };

        if let Some(raw) = lookup("REFLOW_LINE_GAP") {
            config.line_gap_threshold = raw.trim().parse().map_err(|_| {
                ReflowError::InvalidConfig(format!("REFLOW_LINE_GAP is not a number: {}", raw))
            })?;
        }

        if let Some(raw) = lookup("REFLOW_BINARIZE") {
            config.binarize = match raw.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => true,
                "0" | "false" | "no" | "off" => false,
                _ => {
                    return Err(ReflowError::InvalidConfig(format!(
                        "REFLOW_BINARIZE is not a boolean: {}",
                        raw
                    )))
                }
            };
        }

        if let Some(raw) = lookup("REFLOW_BINARIZE_THRESHOLD") {
            config.binarize_threshold = raw.trim().parse().map_err(|_| {
                ReflowError::InvalidConfig(format!(
                    "REFLOW_BINARIZE_THRESHOLD must be 0-255: {}",
                    raw
                ))
            })?;
        }

        config.validate()?;
        Ok(config)
    }
}
