//! Explorer configuration: where the dataset lives and how the charts are laid out and animated.
//!
//! Every field carries a default, so a partial JSON document (or none at all) is valid:
//!
//! ```json
//! { "data_source": "data/other.csv", "chart": { "per_category_delay_ms": 80 } }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::record::Frequency;

/// Default relative location of the purchase dataset.
pub const DEFAULT_DATA_SOURCE: &str = "data/shopping_behavior_updated.csv";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("couldn't read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("couldn't parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExplorerConfig {
    /// File path (desktop) or URL (web) of the CSV dataset.
    pub data_source: String,
    pub chart: ChartConfig,
    pub loyalty: LoyaltyConfig,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            data_source: DEFAULT_DATA_SOURCE.to_string(),
            chart: ChartConfig::default(),
            loyalty: LoyaltyConfig::default(),
        }
    }
}

impl ExplorerConfig {
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Margin {
    pub const fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }
}

/// Overview (grouped bar chart) geometry and animation timing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// Outer SVG view box width, margins included.
    pub width: f64,
    pub height: f64,
    pub margin: Margin,
    /// Padding of the category band scale.
    pub category_padding: f64,
    /// Padding of the per-category group band scale.
    pub group_padding: f64,
    /// Multiplier applied to the largest value for the y domain.
    pub y_headroom: f64,
    pub y_ticks: usize,
    pub enter_duration_ms: f64,
    pub exit_duration_ms: f64,
    pub per_category_delay_ms: f64,
    pub per_group_delay_ms: f64,
    pub legend_column_spacing: f64,
    pub legend_row_offset: f64,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: 1000.0,
            height: 520.0,
            margin: Margin::new(84.0, 24.0, 64.0, 72.0),
            category_padding: 0.2,
            group_padding: 0.12,
            y_headroom: 1.1,
            y_ticks: 6,
            enter_duration_ms: 800.0,
            exit_duration_ms: 400.0,
            per_category_delay_ms: 120.0,
            per_group_delay_ms: 60.0,
            legend_column_spacing: 110.0,
            legend_row_offset: 22.0,
        }
    }
}

impl ChartConfig {
    pub fn inner_width(&self) -> f64 {
        (self.width - self.margin.left - self.margin.right).max(0.0)
    }

    pub fn inner_height(&self) -> f64 {
        (self.height - self.margin.top - self.margin.bottom).max(0.0)
    }
}

/// Loyalty (scatter) geometry, animation timing, and point styling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoyaltyConfig {
    pub width: f64,
    pub height: f64,
    pub margin: Margin,
    pub enter_duration_ms: f64,
    pub exit_duration_ms: f64,
    pub start_opacity: f64,
    pub end_opacity: f64,
    pub sizes: FrequencySizes,
}

impl Default for LoyaltyConfig {
    fn default() -> Self {
        Self {
            width: 1000.0,
            height: 520.0,
            margin: Margin::new(72.0, 28.0, 56.0, 68.0),
            enter_duration_ms: 700.0,
            exit_duration_ms: 400.0,
            start_opacity: 0.10,
            end_opacity: 0.85,
            sizes: FrequencySizes::default(),
        }
    }
}

impl LoyaltyConfig {
    pub fn inner_width(&self) -> f64 {
        (self.width - self.margin.left - self.margin.right).max(0.0)
    }

    pub fn inner_height(&self) -> f64 {
        (self.height - self.margin.top - self.margin.bottom).max(0.0)
    }
}

/// Point radius per purchase frequency. Frequent shoppers draw larger.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrequencySizes {
    pub weekly: f64,
    pub fortnightly: f64,
    pub monthly: f64,
    pub quarterly: f64,
    pub annually: f64,
    /// Radius for missing or unrecognised frequencies.
    pub fallback: f64,
}

impl Default for FrequencySizes {
    fn default() -> Self {
        Self {
            weekly: 7.0,
            fortnightly: 6.0,
            monthly: 5.0,
            quarterly: 4.5,
            annually: 4.0,
            fallback: 5.0,
        }
    }
}

impl FrequencySizes {
    pub fn radius(&self, frequency: Option<Frequency>) -> f64 {
        match frequency {
            Some(Frequency::Weekly) => self.weekly,
            Some(Frequency::Fortnightly) => self.fortnightly,
            Some(Frequency::Monthly) => self.monthly,
            Some(Frequency::Quarterly) => self.quarterly,
            Some(Frequency::Annually) => self.annually,
            None => self.fallback,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg = ExplorerConfig::from_json_str(
            r#"{ "data_source": "custom.csv", "chart": { "per_category_delay_ms": 80 } }"#,
        )
        .unwrap();
        assert_eq!(cfg.data_source, "custom.csv");
        assert_eq!(cfg.chart.per_category_delay_ms, 80.0);
        assert_eq!(cfg.chart.per_group_delay_ms, 60.0);
        assert_eq!(cfg.loyalty, LoyaltyConfig::default());
    }

    #[test]
    fn empty_document_is_default() {
        let cfg = ExplorerConfig::from_json_str("{}").unwrap();
        assert_eq!(cfg, ExplorerConfig::default());
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = ExplorerConfig::from_json_str("{ nope").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn inner_extent_subtracts_margins() {
        let chart = ChartConfig::default();
        assert_eq!(chart.inner_width(), 904.0);
        assert_eq!(chart.inner_height(), 372.0);
    }

    #[test]
    fn unknown_frequency_uses_fallback_radius() {
        let sizes = FrequencySizes::default();
        assert_eq!(sizes.radius(None), sizes.fallback);
        assert_eq!(sizes.radius(Some(Frequency::Weekly)), 7.0);
    }
}
