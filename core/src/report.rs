//! Statistics view models for the stats screen and charts.
//!
//! Pure consumers of `Statistics`; nothing here feeds back into it.

use crate::{
    items::{color_for, ItemList},
    statistics::{round1, Statistics},
    types::Item,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// How long ago an item last won, in calendar days.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LastWinLabel {
    Never,
    Today,
    Yesterday,
    /// Two to seven days ago.
    ThisWeek,
    Older,
}

impl LastWinLabel {
    pub fn classify(last_win: Option<DateTime<Utc>>, now: DateTime<Utc>) -> Self {
        let Some(last_win) = last_win else {
            return Self::Never;
        };
        let days = (now.date_naive() - last_win.date_naive()).num_days();
        match days {
            d if d <= 0 => Self::Today,
            1           => Self::Yesterday,
            2..=7       => Self::ThisWeek,
            _           => Self::Older,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StatsRow {
    pub item:            Item,
    /// `None` when the item is no longer on the wheel.
    pub color:           Option<String>,
    pub wins:            u64,
    pub percentage:      f64,
    pub wins_this_week:  u64,
    pub wins_this_month: u64,
    pub wins_this_year:  u64,
    pub last_win:        Option<DateTime<Utc>>,
    pub last_win_label:  LastWinLabel,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StatsSummary {
    pub total_spins:    u64,
    /// Items currently on the wheel.
    pub unique_items:   usize,
    pub most_frequent:  Option<Item>,
    /// Chance of any single item, `100 / N`, one decimal. 0 until the
    /// first spin is recorded.
    pub average_chance: f64,
    /// Sorted by wins, most first.
    pub rows:           Vec<StatsRow>,
}

/// Data for the distribution charts, in display order.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ChartSeries {
    pub labels: Vec<Item>,
    pub wins:   Vec<u64>,
    pub colors: Vec<Option<String>>,
}

impl StatsSummary {
    pub fn build(
        stats: &Statistics,
        items: &ItemList,
        palette: &[String],
        now: DateTime<Utc>,
    ) -> Self {
        let mut rows: Vec<StatsRow> = stats
            .item_stats
            .iter()
            .map(|(item, stat)| StatsRow {
                item:            item.clone(),
                color:           items.position(item).map(|i| color_for(i, palette)),
                wins:            stat.wins,
                percentage:      stat.percentage,
                wins_this_week:  stat.wins_this_week,
                wins_this_month: stat.wins_this_month,
                wins_this_year:  stat.wins_this_year,
                last_win:        stat.last_win,
                last_win_label:  LastWinLabel::classify(stat.last_win, now),
            })
            .collect();
        // Stable: ties keep key order.
        rows.sort_by(|a, b| b.wins.cmp(&a.wins));

        let average_chance = if items.is_empty() || stats.is_empty() {
            0.0
        } else {
            round1(100.0 / items.len() as f64)
        };

        Self {
            total_spins: stats.total_spins,
            unique_items: items.len(),
            most_frequent: rows.first().map(|r| r.item.clone()),
            average_chance,
            rows,
        }
    }

    pub fn chart(&self) -> ChartSeries {
        ChartSeries {
            labels: self.rows.iter().map(|r| r.item.clone()).collect(),
            wins:   self.rows.iter().map(|r| r.wins).collect(),
            colors: self.rows.iter().map(|r| r.color.clone()).collect(),
        }
    }
}
