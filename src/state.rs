//! Durable named state variables
//!
//! A flat string key/value store used as the substrate for streak
//! bookkeeping. `set` is an upsert; there is no delete. An unset
//! variable reads as `None`, not an error.

use rusqlite::OptionalExtension;

use crate::db::LedgerDb;
use crate::error::Result;

/// Read/write access to the `simple_state` table
#[derive(Clone)]
pub struct StateStore {
    db: LedgerDb,
}

impl StateStore {
    pub fn new(db: LedgerDb) -> Self {
        Self { db }
    }

    /// Read a state variable. Returns `None` if it has never been set.
    pub fn get(&self, name: &str) -> Result<Option<String>> {
        let conn = self.db.conn();
        let value = conn
            .query_row(
                "SELECT value FROM simple_state WHERE name = ?1",
                [name],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    /// Upsert a state variable
    pub fn set(&self, name: &str, value: &str) -> Result<()> {
        let conn = self.db.conn();
        conn.execute(
            "INSERT OR REPLACE INTO simple_state (name, value) VALUES (?1, ?2)",
            [name, value],
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> StateStore {
        StateStore::new(LedgerDb::open_in_memory().unwrap())
    }

    #[test]
    fn test_get_unset_is_none() {
        let state = store();
        assert_eq!(state.get("never-set").unwrap(), None);
    }

    #[test]
    fn test_set_then_get() {
        let state = store();
        state.set("greeting", "hello").unwrap();
        assert_eq!(state.get("greeting").unwrap().as_deref(), Some("hello"));
    }

    #[test]
    fn test_set_replaces() {
        let state = store();
        state.set("marker", "2024-01-01").unwrap();
        state.set("marker", "2024-01-02").unwrap();
        assert_eq!(state.get("marker").unwrap().as_deref(), Some("2024-01-02"));
    }
}
