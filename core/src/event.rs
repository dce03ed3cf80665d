//! Events emitted by the engine.
//!
//! RULE: Renderers and other collaborators learn about state changes
//! ONLY through these events. They never reach into engine state to
//! decide what to animate.

use crate::types::{Degrees, Item, Millis};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WheelEvent {
    // ── Item list ──────────────────────────────────
    ItemAdded {
        item: Item,
    },
    ItemRemoved {
        item: Item,
    },
    ItemsCleared,

    // ── Spin sequence ──────────────────────────────
    /// Apply a timed rotation of `final_angle` over `duration_ms`.
    SpinStarted {
        final_angle:   Degrees,
        winning_index: usize,
        duration_ms:   Millis,
    },
    /// Wheel at rest; statistics updated; highlight `winning_index`.
    SpinSettled {
        winner:        Item,
        winning_index: usize,
        total_spins:   u64,
    },
    WinnerShown {
        winner: Item,
    },
    /// Winner display dismissed; remove the highlight.
    WinnerHidden {
        winner: Item,
    },

    // ── Settings and statistics ────────────────────
    StatisticsCleared,
    ThemeChanged {
        theme: String,
    },
}

impl WheelEvent {
    /// Stable name of the variant, for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ItemAdded { .. }    => "item_added",
            Self::ItemRemoved { .. }  => "item_removed",
            Self::ItemsCleared        => "items_cleared",
            Self::SpinStarted { .. }  => "spin_started",
            Self::SpinSettled { .. }  => "spin_settled",
            Self::WinnerShown { .. }  => "winner_shown",
            Self::WinnerHidden { .. } => "winner_hidden",
            Self::StatisticsCleared   => "statistics_cleared",
            Self::ThemeChanged { .. } => "theme_changed",
        }
    }
}
