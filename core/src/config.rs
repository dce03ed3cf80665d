use crate::types::Millis;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Storage key for the statistics blob.
pub const STATISTICS_KEY: &str = "wheelStatistics";
/// Storage key for the item list.
pub const ITEMS_KEY: &str = "wheelItems";
/// Storage key for the selected theme.
pub const THEME_KEY: &str = "selectedTheme";

/// Timing of the reveal sequence.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TimingConfig {
    /// Shortest possible spin animation.
    pub min_spin_ms:     Millis,
    /// Random extra on top of `min_spin_ms`, drawn uniformly.
    pub spin_jitter_ms:  Millis,
    /// Pause between the wheel settling and the winner being shown.
    pub reveal_delay_ms: Millis,
    /// How long the winner stays on screen.
    pub auto_hide_ms:    Millis,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            min_spin_ms:     500,
            spin_jitter_ms:  1000,
            reveal_delay_ms: 500,
            auto_hide_ms:    3000,
        }
    }
}

impl TimingConfig {
    pub fn reveal_delay(&self) -> Duration {
        Duration::from_millis(self.reveal_delay_ms)
    }

    pub fn auto_hide(&self) -> Duration {
        Duration::from_millis(self.auto_hide_ms)
    }
}

/// Range of full turns drawn for every spin: `[min, min + extra)`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RotationConfig {
    pub min_rotations:   f64,
    pub extra_rotations: f64,
}

impl Default for RotationConfig {
    fn default() -> Self {
        Self {
            min_rotations:   3.0,
            extra_rotations: 4.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WheelConfig {
    pub timing:        TimingConfig,
    pub rotation:      RotationConfig,
    /// Segment colours, assigned by item index modulo the palette length.
    pub palette:       Vec<String>,
    /// Items placed on a fresh wheel when nothing was stored yet.
    pub sample_items:  Vec<String>,
    pub default_theme: String,
}

impl Default for WheelConfig {
    fn default() -> Self {
        Self {
            timing:        TimingConfig::default(),
            rotation:      RotationConfig::default(),
            palette:       default_palette(),
            sample_items:  ["Pizza", "Hamburger", "Sushi", "Saláta", "Pasta", "Steak"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            default_theme: "default".to_string(),
        }
    }
}

impl WheelConfig {
    /// Load from a JSON file. Absent fields keep their defaults.
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        let config: WheelConfig = serde_json::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Cannot parse {path}: {e}"))?;
        if config.palette.is_empty() {
            anyhow::bail!("{path}: palette must contain at least one colour");
        }
        Ok(config)
    }
}

fn default_palette() -> Vec<String> {
    [
        "#FF6B6B", "#4ECDC4", "#45B7D1", "#96CEB4", "#FFEAA7",
        "#DDA0DD", "#98D8C8", "#F7DC6F", "#BB8FCE", "#85C1E9",
        "#F8C471", "#82E0AA", "#F1948A", "#85C1E9", "#D7BDE2",
    ]
    .iter()
    .map(|c| c.to_string())
    .collect()
}
