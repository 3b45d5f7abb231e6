//! Named persistent counters with delta-based flushing
//!
//! A [`Counter`] is a short-lived read-modify-write session handle: it
//! caches the value it last saw in the database and, on every mutating
//! call, flushes the difference as a relative update
//! (`value = value + delta`) rather than an absolute overwrite. Two
//! overlapping sessions that each perform a single mutation therefore
//! converge to the correct sum regardless of flush order.
//!
//! That is the extent of the guarantee: a session that performs several
//! mutations before another session's flush lands, or concurrent `set`
//! calls, can still lose writes. Callers are expected to hold a handle
//! for one logical mutation and then drop it.

use rusqlite::{params, OptionalExtension};
use tracing::debug;

use crate::db::LedgerDb;
use crate::error::Result;

/// Deterministic name for a per-user scoped counter
pub fn user_counter_name(base: &str, user_id: &str) -> String {
    format!("peruser-{base}-{user_id}")
}

/// A single read-modify-write session on one named counter.
///
/// Obtained from [`CounterLedger`]; holds the value read at open time and
/// an in-memory working value. Mutating calls flush immediately; `get`
/// reads the working value without touching storage.
pub struct Counter {
    db: LedgerDb,
    name: String,
    /// Value as currently believed stored
    persisted: i64,
    /// Working value, mutated in memory before flush
    value: i64,
}

impl Counter {
    fn new(db: LedgerDb, name: String, value: i64) -> Self {
        Self {
            db,
            name,
            persisted: value,
            value,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current working value (no I/O)
    pub fn get(&self) -> i64 {
        self.value
    }

    pub fn add_one(&mut self) -> Result<()> {
        self.add(1)
    }

    pub fn add(&mut self, amount: i64) -> Result<()> {
        self.value += amount;
        self.flush()
    }

    pub fn sub_one(&mut self) -> Result<()> {
        self.subtract(1)
    }

    pub fn subtract(&mut self, amount: i64) -> Result<()> {
        self.value -= amount;
        self.flush()
    }

    pub fn set(&mut self, amount: i64) -> Result<()> {
        self.value = amount;
        self.flush()
    }

    /// Persist the pending delta.
    ///
    /// On failure the working value is left as mutated and `persisted` is
    /// not advanced, so a retry recomputes the identical delta.
    fn flush(&mut self) -> Result<()> {
        let delta = self.value - self.persisted;
        {
            let conn = self.db.conn();
            conn.execute(
                "UPDATE counters SET value = value + ?1 WHERE name = ?2",
                params![delta, self.name],
            )?;
        }
        debug!(counter = %self.name, delta, value = self.value, "flushed counter");
        self.persisted = self.value;
        Ok(())
    }
}

/// Access to the durable counter table
#[derive(Clone)]
pub struct CounterLedger {
    db: LedgerDb,
}

impl CounterLedger {
    pub fn new(db: LedgerDb) -> Self {
        Self { db }
    }

    /// Get a session handle for `name`, lazily creating the row at 0.
    ///
    /// Creation races with another writer are harmless: the insert is
    /// `OR IGNORE` and the value is re-read afterwards.
    pub fn get_counter(&self, name: &str) -> Result<Counter> {
        let value = {
            let conn = self.db.conn();
            let existing: Option<i64> = conn
                .query_row(
                    "SELECT value FROM counters WHERE name = ?1",
                    [name],
                    |row| row.get(0),
                )
                .optional()?;
            match existing {
                Some(v) => v,
                None => {
                    conn.execute(
                        "INSERT OR IGNORE INTO counters (name, value) VALUES (?1, 0)",
                        [name],
                    )?;
                    conn.query_row(
                        "SELECT value FROM counters WHERE name = ?1",
                        [name],
                        |row| row.get(0),
                    )?
                }
            }
        };
        Ok(Counter::new(self.db.clone(), name.to_string(), value))
    }

    /// Get a session handle for the per-user variant of `base`
    pub fn get_user_counter(&self, base: &str, user_id: &str) -> Result<Counter> {
        self.get_counter(&user_counter_name(base, user_id))
    }

    /// Create the counter row at 0 if it does not exist. Idempotent.
    pub fn create_counter(&self, name: &str) -> Result<()> {
        let conn = self.db.conn();
        conn.execute(
            "INSERT OR IGNORE INTO counters (name, value) VALUES (?1, 0)",
            [name],
        )?;
        Ok(())
    }

    pub fn create_user_counter(&self, base: &str, user_id: &str) -> Result<()> {
        self.create_counter(&user_counter_name(base, user_id))
    }

    /// Add one to `name` and return the post-increment handle
    pub fn increment_counter(&self, name: &str) -> Result<Counter> {
        let mut counter = self.get_counter(name)?;
        counter.add_one()?;
        Ok(counter)
    }

    pub fn increment_user_counter(&self, base: &str, user_id: &str) -> Result<Counter> {
        self.increment_counter(&user_counter_name(base, user_id))
    }

    /// Force `name` back to zero and return the handle
    pub fn reset_counter(&self, name: &str) -> Result<Counter> {
        let mut counter = self.get_counter(name)?;
        counter.set(0)?;
        Ok(counter)
    }
}
