//! Win statistics: per-item counts, percentages, time windows, history.
//!
//! RULES:
//!   - `spin_history` is append-only. Only `clear()` removes entries.
//!   - `total_spins == spin_history.len()` after every operation.
//!   - Window counters (week/month/year) are derived from the history
//!     relative to the timestamp of the most recent win.

use crate::types::Item;
use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ItemStat {
    pub wins:            u64,
    /// `wins / total_spins * 100`, one decimal.
    #[serde(default)]
    pub percentage:      f64,
    #[serde(default)]
    pub last_win:        Option<DateTime<Utc>>,
    #[serde(default)]
    pub wins_this_week:  u64,
    #[serde(default)]
    pub wins_this_month: u64,
    #[serde(default)]
    pub wins_this_year:  u64,
}

/// One completed spin. Never mutated once recorded.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SpinEvent {
    pub winner:    Item,
    pub date:      DateTime<Utc>,
    /// `date` as epoch milliseconds.
    pub timestamp: i64,
}

impl SpinEvent {
    pub fn new(winner: Item, date: DateTime<Utc>) -> Self {
        Self {
            winner,
            timestamp: date.timestamp_millis(),
            date,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    pub total_spins:  u64,
    pub item_stats:   BTreeMap<Item, ItemStat>,
    pub spin_history: Vec<SpinEvent>,
}

impl Statistics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one win at `now`.
    ///
    /// Window counters of every other tracked item are reset to zero; only
    /// the winner's counters are recomputed from history. `refresh_windows`
    /// recomputes everyone.
    pub fn record_win(&mut self, winner: &str, now: DateTime<Utc>) {
        self.total_spins += 1;

        let stat = self.item_stats.entry(winner.to_string()).or_default();
        stat.wins += 1;
        stat.last_win = Some(now);

        self.spin_history.push(SpinEvent::new(winner.to_string(), now));

        for (item, stat) in self.item_stats.iter_mut() {
            if item != winner {
                stat.wins_this_week = 0;
                stat.wins_this_month = 0;
                stat.wins_this_year = 0;
            }
        }
        let counts = WindowCounts::scan(&self.spin_history, winner, now);
        if let Some(stat) = self.item_stats.get_mut(winner) {
            counts.apply(stat);
        }

        self.recompute_percentages();

        log::debug!(
            "recorded win for {winner:?}: total_spins={} wins={}",
            self.total_spins,
            self.item_stats.get(winner).map_or(0, |s| s.wins)
        );
    }

    /// Pure form of `record_win`.
    pub fn with_win(mut self, winner: &str, now: DateTime<Utc>) -> Self {
        self.record_win(winner, now);
        self
    }

    /// Recompute the window counters of every tracked item relative to `now`.
    /// Used when the statistics view is refreshed.
    pub fn refresh_windows(&mut self, now: DateTime<Utc>) {
        for (item, stat) in self.item_stats.iter_mut() {
            WindowCounts::scan(&self.spin_history, item, now).apply(stat);
        }
    }

    /// Drop everything: counts, percentages and history.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_empty(&self) -> bool {
        self.total_spins == 0
    }

    pub fn stat(&self, item: &str) -> Option<&ItemStat> {
        self.item_stats.get(item)
    }

    /// Number of history entries won by `item`.
    pub fn history_count(&self, item: &str) -> u64 {
        self.spin_history.iter().filter(|e| e.winner == item).count() as u64
    }

    /// Sum of all per-item wins. Equals `total_spins` for consistent data.
    pub fn total_wins(&self) -> u64 {
        self.item_stats.values().map(|s| s.wins).sum()
    }

    /// Check the structural invariants. Used after loading persisted data.
    pub fn is_consistent(&self) -> bool {
        self.total_spins == self.spin_history.len() as u64
            && self.total_wins() == self.total_spins
            && self
                .item_stats
                .iter()
                .all(|(item, stat)| stat.wins == self.history_count(item))
    }

    fn recompute_percentages(&mut self) {
        let total = self.total_spins;
        for stat in self.item_stats.values_mut() {
            stat.percentage = if total == 0 {
                0.0
            } else {
                round1(stat.wins as f64 / total as f64 * 100.0)
            };
        }
    }
}

/// Calendar buckets of one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct WindowKey {
    year:  i32,
    month: u32,
    week:  u32,
}

impl WindowKey {
    fn of(at: DateTime<Utc>) -> Self {
        Self {
            year:  at.year(),
            month: at.month(),
            week:  week_number(at),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct WindowCounts {
    week:  u64,
    month: u64,
    year:  u64,
}

impl WindowCounts {
    /// Count `item`'s wins in `now`'s year, in its year and month, and in
    /// its year, month and week.
    fn scan(history: &[SpinEvent], item: &str, now: DateTime<Utc>) -> Self {
        let current = WindowKey::of(now);
        let mut counts = Self::default();
        for event in history.iter().filter(|e| e.winner == item) {
            let key = WindowKey::of(event.date);
            if key.year != current.year {
                continue;
            }
            counts.year += 1;
            if key.month == current.month {
                counts.month += 1;
                // A week straddling a month boundary only counts this month's part.
                if key.week == current.week {
                    counts.week += 1;
                }
            }
        }
        counts
    }

    fn apply(self, stat: &mut ItemStat) {
        stat.wins_this_week = self.week;
        stat.wins_this_month = self.month;
        stat.wins_this_year = self.year;
    }
}

/// Week of year: `ceil((day_of_year0 + jan1_weekday + 1) / 7)`,
/// weekdays counted from Sunday = 0.
pub fn week_number(at: DateTime<Utc>) -> u32 {
    let day_of_year = at.ordinal0();
    let jan1_weekday = NaiveDate::from_yo_opt(at.year(), 1)
        .map_or(0, |d| d.weekday().num_days_from_sunday());
    (day_of_year + jan1_weekday + 1).div_ceil(7)
}

/// Round to one decimal place.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
    }

    #[test]
    fn week_number_starts_at_one_on_january_first() {
        // 2023-01-01 is a Sunday.
        assert_eq!(week_number(at(2023, 1, 1)), 1);
        assert_eq!(week_number(at(2023, 1, 7)), 1);
        assert_eq!(week_number(at(2023, 1, 8)), 2);
        // 2024-01-01 is a Monday: Saturday the 6th closes week 1.
        assert_eq!(week_number(at(2024, 1, 6)), 1);
        assert_eq!(week_number(at(2024, 1, 7)), 2);
    }

    #[test]
    fn week_number_uses_whole_days() {
        // Saturday 2023-01-07: the time of day never pushes it into week 2.
        assert_eq!(week_number(Utc.with_ymd_and_hms(2023, 1, 7, 0, 0, 0).unwrap()), 1);
        assert_eq!(week_number(Utc.with_ymd_and_hms(2023, 1, 7, 12, 0, 0).unwrap()), 1);
        assert_eq!(week_number(Utc.with_ymd_and_hms(2023, 1, 7, 23, 59, 59).unwrap()), 1);
        assert_eq!(week_number(Utc.with_ymd_and_hms(2023, 1, 8, 0, 0, 0).unwrap()), 2);
    }

    #[test]
    fn round1_keeps_one_decimal() {
        assert_eq!(round1(33.333_333), 33.3);
        assert_eq!(round1(66.666_666), 66.7);
        assert_eq!(round1(50.0), 50.0);
    }

    #[test]
    fn window_scan_respects_calendar_boundaries() {
        let history = vec![
            SpinEvent::new("A".into(), at(2023, 12, 31)),
            SpinEvent::new("A".into(), at(2024, 1, 2)),
            SpinEvent::new("A".into(), at(2024, 2, 20)),
            SpinEvent::new("B".into(), at(2024, 2, 21)),
        ];
        let counts = WindowCounts::scan(&history, "A", at(2024, 2, 21));
        assert_eq!(counts, WindowCounts { week: 1, month: 1, year: 2 });
    }
}
