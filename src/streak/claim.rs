//! Global-claim streak
//!
//! One shared streak that grows while the same identity keeps claiming
//! it and resets to 1 the moment anyone else claims. Used for "first in
//! chat" style rewards.

use tracing::debug;

use crate::counter::{Counter, CounterLedger};
use crate::db::LedgerDb;
use crate::error::Result;
use crate::state::StateStore;

const VAR_LAST_CLAIMANT: &str = "last_claimant";
const STREAK_COUNTER: &str = "first-streak";

/// Global claim streak engine
pub struct ClaimStreak {
    state: StateStore,
    ledger: CounterLedger,
}

impl ClaimStreak {
    pub fn new(db: LedgerDb, ledger: CounterLedger) -> Self {
        Self {
            state: StateStore::new(db),
            ledger,
        }
    }

    /// Register a claim by `claimant_id` and return the streak counter.
    ///
    /// A repeat claim by the current claimant extends the streak; any
    /// other claimant (including the very first claim ever) takes it
    /// over at 1.
    pub fn claim(&self, claimant_id: &str) -> Result<Counter> {
        let last = self.state.get(VAR_LAST_CLAIMANT)?;
        if last.as_deref() == Some(claimant_id) {
            self.ledger.increment_counter(STREAK_COUNTER)
        } else {
            debug!(
                from = last.as_deref().unwrap_or("<none>"),
                to = claimant_id,
                "claim streak taken over"
            );
            self.state.set(VAR_LAST_CLAIMANT, claimant_id)?;
            let mut counter = self.ledger.get_counter(STREAK_COUNTER)?;
            counter.set(1)?;
            Ok(counter)
        }
    }

    /// Identity of the current streak holder, if anyone has ever claimed
    pub fn last_claimant(&self) -> Result<Option<String>> {
        self.state.get(VAR_LAST_CLAIMANT)
    }
}
