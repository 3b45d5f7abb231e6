//! tally - persistent counter and streak ledger
//!
//! The state-keeping core of a chat-event bot: durable named integer
//! counters (including per-user scoped variants) and two streak policies
//! built on top of them, backed by a single SQLite database.
//!
//! - [`CounterLedger`] hands out [`Counter`] session handles that flush
//!   mutations as relative deltas.
//! - [`ClaimStreak`] tracks a global streak that resets whenever a
//!   different claimant shows up.
//! - [`IntervalStreak`] tracks per-user streaks across interval
//!   rollovers, with a one-shot repair window for streaks the latest
//!   rollover broke.
//!
//! Everything is constructed from an explicit [`LedgerDb`]; there are no
//! process-wide singletons.
//!
//! ```no_run
//! use tally::{ClaimStreak, CounterLedger, LedgerDb};
//!
//! # fn main() -> tally::Result<()> {
//! let db = LedgerDb::open(std::path::Path::new("bot.db"))?;
//! let ledger = CounterLedger::new(db.clone());
//!
//! let gottem = ledger.increment_counter("gottem")?;
//! println!("gottem count: {}", gottem.get());
//!
//! let first = ClaimStreak::new(db, ledger);
//! let streak = first.claim("alice")?;
//! println!("first streak: {}", streak.get());
//! # Ok(())
//! # }
//! ```

pub mod counter;
pub mod db;
pub mod error;
pub mod marker;
pub mod state;
pub mod streak;

pub use counter::{user_counter_name, Counter, CounterLedger};
pub use db::LedgerDb;
pub use error::{LedgerError, Result};
pub use marker::{current_day_marker, day_marker};
pub use state::StateStore;
pub use streak::{ClaimStreak, IntervalStreak};
