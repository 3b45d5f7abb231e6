//! Streak engines
//!
//! Two independent streak policies built on the state store and counter
//! ledger. They share no behavior beyond the storage substrate, so they
//! are deliberately separate types rather than variants of a common
//! trait.

mod claim;
mod interval;

pub use claim::ClaimStreak;
pub use interval::IntervalStreak;
