//! The wheel engine: the single owner of application state.
//!
//! One WheelEngine is built at startup and handed by reference to
//! whichever layer needs it (UI handlers, IPC loop, tests). There is no
//! global instance.
//!
//! RULES:
//!   - Only the engine mutates items, statistics and the spin session.
//!   - Every mutation is persisted immediately, best-effort: a storage
//!     failure is logged and never undoes the in-memory change.
//!   - All randomness flows through the engine's WheelRng.

use crate::{
    config::WheelConfig,
    event::WheelEvent,
    items::{ItemList, Segment},
    report::StatsSummary,
    resolver::{resolve_with, spin_duration},
    rng::WheelRng,
    session::{SpinPhase, SpinSession, SpinTicket, Transition},
    statistics::Statistics,
    store::WheelStore,
};
use chrono::{DateTime, Utc};
use std::time::Duration;

pub struct WheelEngine {
    pub config:     WheelConfig,
    pub items:      ItemList,
    pub statistics: Statistics,
    pub theme:      String,
    session:        SpinSession,
    rng:            WheelRng,
    store:          WheelStore,
}

impl WheelEngine {
    /// Restore persisted state from `store`. Anything missing or unreadable
    /// falls back to defaults: empty statistics, the sample item list, the
    /// default theme.
    pub fn open(store: WheelStore, config: WheelConfig, rng: WheelRng) -> Self {
        let statistics = store.load_statistics().unwrap_or_else(|e| {
            log::warn!("engine: cannot load statistics, starting empty: {e}");
            Statistics::new()
        });

        let items = match store.load_items() {
            Ok(Some(items)) => items,
            Ok(None) => ItemList::from_items(&config.sample_items),
            Err(e) => {
                log::warn!("engine: cannot load items, using samples: {e}");
                ItemList::from_items(&config.sample_items)
            }
        };

        let theme = match store.load_theme() {
            Ok(Some(theme)) => theme,
            Ok(None) => config.default_theme.clone(),
            Err(e) => {
                log::warn!("engine: cannot load theme: {e}");
                config.default_theme.clone()
            }
        };

        log::info!(
            "engine: opened with {} items, {} recorded spins, theme={theme}",
            items.len(),
            statistics.total_spins
        );

        Self {
            session: SpinSession::new(config.timing.clone()),
            config,
            items,
            statistics,
            theme,
            rng,
            store,
        }
    }

    /// Engine over a fresh in-memory store with a fixed seed.
    pub fn build_test(seed: u64) -> crate::error::WheelResult<Self> {
        let store = WheelStore::in_memory()?;
        store.migrate()?;
        Ok(Self::open(store, WheelConfig::default(), WheelRng::new(seed)))
    }

    pub fn store(&self) -> &WheelStore {
        &self.store
    }

    pub fn phase(&self) -> &SpinPhase {
        self.session.phase()
    }

    pub fn is_busy(&self) -> bool {
        self.session.is_busy()
    }

    pub fn layout(&self) -> Vec<Segment> {
        self.items.layout(&self.config.palette)
    }

    // ── Items ──────────────────────────────────────────────────

    /// Blank or duplicate input is silently ignored.
    pub fn add_item(&mut self, raw: &str) -> Option<WheelEvent> {
        if !self.items.add(raw) {
            return None;
        }
        self.persist_items();
        Some(WheelEvent::ItemAdded { item: raw.trim().to_string() })
    }

    pub fn remove_item(&mut self, item: &str) -> Option<WheelEvent> {
        if !self.items.remove(item) {
            return None;
        }
        self.persist_items();
        Some(WheelEvent::ItemRemoved { item: item.to_string() })
    }

    pub fn clear_items(&mut self) -> WheelEvent {
        self.items.clear();
        self.persist_items();
        WheelEvent::ItemsCleared
    }

    // ── Spin ───────────────────────────────────────────────────

    /// Start a spin. A no-op (no events) while another spin is in flight
    /// or when the wheel is empty.
    pub fn spin(&mut self) -> Vec<WheelEvent> {
        if self.session.is_busy() {
            log::debug!("engine: spin ignored, already spinning");
            return vec![];
        }
        if self.items.is_empty() {
            log::debug!("engine: spin ignored, no items");
            return vec![];
        }

        let duration = spin_duration(&self.config.timing, self.rng.next_f64());
        let rng = &mut self.rng;
        let outcome = resolve_with(&self.config.rotation, self.items.len(), || rng.next_f64());

        let Some(winner) = self.items.get(outcome.winning_index).cloned() else {
            log::warn!("engine: winning index {} out of range", outcome.winning_index);
            return vec![];
        };

        let ticket = SpinTicket { outcome, winner };
        let mut events = Vec::new();
        match self.session.start(ticket, duration) {
            Ok(Some(Transition::Hidden(previous))) => {
                events.push(WheelEvent::WinnerHidden { winner: previous.winner });
            }
            Ok(_) => {}
            Err(e) => {
                log::debug!("engine: spin rejected: {e}");
                return vec![];
            }
        }

        log::debug!(
            "engine: spin started angle={:.2} index={} duration={}ms",
            outcome.final_angle,
            outcome.winning_index,
            duration.as_millis()
        );
        events.push(WheelEvent::SpinStarted {
            final_angle:   outcome.final_angle,
            winning_index: outcome.winning_index,
            duration_ms:   duration.as_millis() as u64,
        });
        events
    }

    /// Let `elapsed` pass on the reveal sequence. When the wheel settles the
    /// win is recorded at `now` and persisted.
    pub fn advance(&mut self, elapsed: Duration, now: DateTime<Utc>) -> Vec<WheelEvent> {
        self.session
            .advance(elapsed)
            .into_iter()
            .map(|transition| self.apply(transition, now))
            .collect()
    }

    /// Spin and play the whole reveal sequence at once.
    pub fn spin_to_completion(&mut self, now: DateTime<Utc>) -> Vec<WheelEvent> {
        let mut events = self.spin();
        if events.is_empty() {
            return events;
        }
        let remaining = self.session.time_to_idle();
        events.extend(self.advance(remaining, now));
        events
    }

    fn apply(&mut self, transition: Transition, now: DateTime<Utc>) -> WheelEvent {
        match transition {
            Transition::Settled(ticket) => {
                self.statistics.record_win(&ticket.winner, now);
                self.persist_statistics();
                log::info!(
                    "engine: {:?} won (spin #{})",
                    ticket.winner,
                    self.statistics.total_spins
                );
                WheelEvent::SpinSettled {
                    winner:        ticket.winner,
                    winning_index: ticket.outcome.winning_index,
                    total_spins:   self.statistics.total_spins,
                }
            }
            Transition::Shown(ticket) => WheelEvent::WinnerShown { winner: ticket.winner },
            Transition::Hidden(ticket) => WheelEvent::WinnerHidden { winner: ticket.winner },
        }
    }

    // ── Statistics and settings ────────────────────────────────

    pub fn clear_statistics(&mut self) -> WheelEvent {
        self.statistics.clear();
        self.persist_statistics();
        log::info!("engine: statistics cleared");
        WheelEvent::StatisticsCleared
    }

    pub fn set_theme(&mut self, theme: &str) -> WheelEvent {
        self.theme = theme.to_string();
        if let Err(e) = self.store.save_theme(theme) {
            log::warn!("engine: failed to save theme: {e}");
        }
        WheelEvent::ThemeChanged { theme: theme.to_string() }
    }

    /// Statistics view with every item's windows recomputed against `now`.
    /// Stored statistics are left untouched.
    pub fn summary(&self, now: DateTime<Utc>) -> StatsSummary {
        let mut refreshed = self.statistics.clone();
        refreshed.refresh_windows(now);
        StatsSummary::build(&refreshed, &self.items, &self.config.palette, now)
    }

    fn persist_statistics(&self) {
        if let Err(e) = self.store.save_statistics(&self.statistics) {
            log::warn!("engine: failed to save statistics: {e}");
        }
    }

    fn persist_items(&self) {
        if let Err(e) = self.store.save_items(&self.items) {
            log::warn!("engine: failed to save items: {e}");
        }
    }
}
