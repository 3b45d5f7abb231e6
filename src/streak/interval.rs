//! Interval-reset streak with a one-shot repair window
//!
//! Tracks, per user, participation across discrete intervals (stream
//! sessions, days). A user who participated in the interval immediately
//! before the current one extends their streak; anyone else restarts at
//! 1. Users whose streak just broke because of the latest rollover get a
//! single chance to repair it, valid until the next rollover.
//!
//! Durable state: the current interval marker, the previous one (frozen
//! at rollover), a repair marker (the interval displaced by the latest
//! rollover), and each user's last participation marker. The map of
//! repairable streak values is in-memory only and is rebuilt empty on
//! every rollover, so repair eligibility does not survive a restart.

use std::collections::HashMap;

use tracing::debug;

use crate::counter::{Counter, CounterLedger};
use crate::db::LedgerDb;
use crate::error::Result;
use crate::marker::current_day_marker;
use crate::state::StateStore;

const VAR_CURRENT_INTERVAL: &str = "interval.current";
const VAR_PREVIOUS_INTERVAL: &str = "interval.previous";
const VAR_REPAIR_MARKER: &str = "interval.repair";
const STREAK_COUNTER_BASE: &str = "streak";

fn user_interval_var(user_id: &str) -> String {
    format!("interval.user.{user_id}")
}

/// Interval-reset streak engine
pub struct IntervalStreak {
    state: StateStore,
    ledger: CounterLedger,
    /// user -> streak value before it was reset by the latest rollover
    repairable: HashMap<String, i64>,
}

impl IntervalStreak {
    pub fn new(db: LedgerDb, ledger: CounterLedger) -> Self {
        Self {
            state: StateStore::new(db),
            ledger,
            repairable: HashMap::new(),
        }
    }

    /// Roll over to a new interval.
    ///
    /// Call when a new interval is detected (stream start, day change).
    /// A marker equal to the current interval is a spurious duplicate
    /// (e.g. a restart within the same interval) and changes nothing,
    /// including the repair map.
    pub fn advance_interval(&mut self, marker: &str) -> Result<()> {
        let current = self.state.get(VAR_CURRENT_INTERVAL)?;
        if current.as_deref() == Some(marker) {
            debug!(marker, "duplicate interval rollover ignored");
            return Ok(());
        }
        let previous = self.state.get(VAR_PREVIOUS_INTERVAL)?;

        self.repairable.clear();

        // The interval being displaced out of the "previous" slot is the
        // one repair candidates must have last participated in.
        if let Some(p) = &previous {
            self.state.set(VAR_REPAIR_MARKER, p)?;
        }
        if let Some(c) = &current {
            self.state.set(VAR_PREVIOUS_INTERVAL, c)?;
        }
        self.state.set(VAR_CURRENT_INTERVAL, marker)?;

        debug!(
            marker,
            previous = current.as_deref().unwrap_or("<none>"),
            "interval rolled over"
        );
        Ok(())
    }

    /// Roll over using today's UTC day marker
    pub fn advance_to_today(&mut self) -> Result<()> {
        self.advance_interval(&current_day_marker())
    }

    /// Record that `user_id` participated in the current interval and
    /// return their streak counter.
    ///
    /// Consecutive-interval participation increments; anything else
    /// resets to 1. A user whose last participation was in the interval
    /// displaced by the latest rollover is remembered as repairable
    /// before the reset lands.
    pub fn record_participation(&mut self, user_id: &str) -> Result<Counter> {
        let user_var = user_interval_var(user_id);
        let user_last = self.state.get(&user_var)?;
        let repair_marker = self.state.get(VAR_REPAIR_MARKER)?;
        let previous = self.state.get(VAR_PREVIOUS_INTERVAL)?;

        let mut counter = self.ledger.get_user_counter(STREAK_COUNTER_BASE, user_id)?;

        // An unset variable never matches anything
        if user_last.is_some() && user_last == repair_marker {
            self.repairable.insert(user_id.to_string(), counter.get());
            debug!(user = user_id, streak = counter.get(), "streak repairable");
        }

        if user_last.is_some() && user_last == previous {
            counter.add_one()?;
        } else {
            counter.set(1)?;
        }

        if let Some(current) = self.state.get(VAR_CURRENT_INTERVAL)? {
            self.state.set(&user_var, &current)?;
        }

        Ok(counter)
    }

    /// Whether `user_id` lost their streak in the latest rollover and can
    /// still repair it
    pub fn can_repair(&self, user_id: &str) -> bool {
        self.repairable.contains_key(user_id)
    }

    /// Restore a streak broken by the latest rollover.
    ///
    /// Sets the user's counter to their pre-reset value plus one (the
    /// participation that triggered the reset still counts) and consumes
    /// the repair entry. Returns `None` when no repair is available.
    pub fn repair_streak(&mut self, user_id: &str) -> Result<Option<Counter>> {
        let Some(stashed) = self.repairable.get(user_id).copied() else {
            return Ok(None);
        };
        let mut counter = self.ledger.get_user_counter(STREAK_COUNTER_BASE, user_id)?;
        counter.set(stashed + 1)?;
        self.repairable.remove(user_id);
        debug!(user = user_id, streak = counter.get(), "streak repaired");
        Ok(Some(counter))
    }

    /// Marker of the latest known interval
    pub fn current_interval(&self) -> Result<Option<String>> {
        self.state.get(VAR_CURRENT_INTERVAL)
    }

    /// Marker of the interval immediately before the current one
    pub fn previous_interval(&self) -> Result<Option<String>> {
        self.state.get(VAR_PREVIOUS_INTERVAL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> IntervalStreak {
        let db = LedgerDb::open_in_memory().unwrap();
        let ledger = CounterLedger::new(db.clone());
        IntervalStreak::new(db, ledger)
    }

    #[test]
    fn test_consecutive_intervals_increment() {
        let mut streak = engine();
        streak.advance_interval("d1").unwrap();
        assert_eq!(streak.record_participation("u").unwrap().get(), 1);

        streak.advance_interval("d2").unwrap();
        assert_eq!(streak.record_participation("u").unwrap().get(), 2);

        streak.advance_interval("d3").unwrap();
        assert_eq!(streak.record_participation("u").unwrap().get(), 3);
    }

    #[test]
    fn test_missed_interval_resets() {
        let mut streak = engine();
        streak.advance_interval("d1").unwrap();
        streak.record_participation("u").unwrap();

        streak.advance_interval("d2").unwrap();
        streak.advance_interval("d3").unwrap();
        assert_eq!(streak.record_participation("u").unwrap().get(), 1);
    }

    #[test]
    fn test_duplicate_rollover_changes_nothing() {
        let mut streak = engine();
        streak.advance_interval("d1").unwrap();
        streak.record_participation("u").unwrap();
        streak.advance_interval("d2").unwrap();

        // Restart within the same interval
        streak.advance_interval("d2").unwrap();

        assert_eq!(streak.current_interval().unwrap().as_deref(), Some("d2"));
        assert_eq!(streak.previous_interval().unwrap().as_deref(), Some("d1"));
        assert_eq!(streak.record_participation("u").unwrap().get(), 2);
    }
}
