//! SQLite persistence layer.
//!
//! RULE: Only store.rs talks to the database.
//! Everything is stored as JSON blobs under well-known keys in a single
//! key/value table, so a row can be read back exactly as it was written.

use crate::{
    config::{ITEMS_KEY, STATISTICS_KEY, THEME_KEY},
    error::WheelResult,
    items::ItemList,
    statistics::Statistics,
};
use rusqlite::{params, Connection, OptionalExtension};

pub struct WheelStore {
    conn: Connection,
}

impl WheelStore {
    /// Open (or create) the wheel database at `path`.
    pub fn open(path: &str) -> WheelResult<Self> {
        let conn = Connection::open(path)?;
        // WAL is ignored for in-memory databases.
        let _ = conn.execute_batch("PRAGMA journal_mode=WAL;");
        Ok(Self { conn })
    }

    /// Open an in-memory database (used in tests).
    pub fn in_memory() -> WheelResult<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self { conn })
    }

    /// Apply all schema migrations in order.
    pub fn migrate(&self) -> WheelResult<()> {
        self.conn.execute_batch(include_str!("../migrations/001_kv.sql"))?;
        Ok(())
    }

    // ── Raw key/value ──────────────────────────────────────────

    pub fn get(&self, key: &str) -> WheelResult<Option<String>> {
        let value = self
            .conn
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| row.get(0))
            .optional()?;
        Ok(value)
    }

    pub fn set(&self, key: &str, value: &str) -> WheelResult<()> {
        self.conn.execute(
            "INSERT INTO kv (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET
                 value = excluded.value,
                 updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')",
            params![key, value],
        )?;
        Ok(())
    }

    pub fn remove(&self, key: &str) -> WheelResult<()> {
        self.conn.execute("DELETE FROM kv WHERE key = ?1", params![key])?;
        Ok(())
    }

    // ── Statistics ─────────────────────────────────────────────

    /// Load the statistics blob. A missing or unparseable blob yields
    /// empty statistics; only database failures are returned as errors.
    pub fn load_statistics(&self) -> WheelResult<Statistics> {
        let Some(json) = self.get(STATISTICS_KEY)? else {
            return Ok(Statistics::new());
        };
        match serde_json::from_str::<Statistics>(&json) {
            Ok(stats) => {
                if !stats.is_consistent() {
                    log::warn!(
                        "store: loaded statistics are inconsistent (total_spins={}, history={})",
                        stats.total_spins,
                        stats.spin_history.len()
                    );
                }
                Ok(stats)
            }
            Err(e) => {
                log::warn!("store: corrupt statistics blob, starting empty: {e}");
                Ok(Statistics::new())
            }
        }
    }

    pub fn save_statistics(&self, stats: &Statistics) -> WheelResult<()> {
        let json = serde_json::to_string(stats)?;
        self.set(STATISTICS_KEY, &json)
    }

    // ── Items ──────────────────────────────────────────────────

    /// `None` when no list was ever saved (or the saved one is corrupt).
    pub fn load_items(&self) -> WheelResult<Option<ItemList>> {
        let Some(json) = self.get(ITEMS_KEY)? else {
            return Ok(None);
        };
        match serde_json::from_str::<Vec<String>>(&json) {
            Ok(raw) => Ok(Some(ItemList::from_items(raw))),
            Err(e) => {
                log::warn!("store: corrupt item list, ignoring: {e}");
                Ok(None)
            }
        }
    }

    pub fn save_items(&self, items: &ItemList) -> WheelResult<()> {
        let json = serde_json::to_string(items)?;
        self.set(ITEMS_KEY, &json)
    }

    // ── Theme ──────────────────────────────────────────────────

    pub fn load_theme(&self) -> WheelResult<Option<String>> {
        self.get(THEME_KEY)
    }

    pub fn save_theme(&self, theme: &str) -> WheelResult<()> {
        self.set(THEME_KEY, theme)
    }
}
