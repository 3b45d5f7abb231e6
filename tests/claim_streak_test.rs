//! Integration tests for the global-claim streak

mod common;

use tally::{ClaimStreak, CounterLedger, LedgerDb};

use common::open_test_db;

fn engine(db: LedgerDb) -> ClaimStreak {
    let ledger = CounterLedger::new(db.clone());
    ClaimStreak::new(db, ledger)
}

#[test]
fn test_consecutive_claims_count_up() {
    let (_dir, _path, db) = open_test_db();
    let streak = engine(db);

    for expected in 1..=5 {
        assert_eq!(
            streak.claim("alice").unwrap().get(),
            expected,
            "claim #{expected} by the same claimant should extend the streak"
        );
    }
}

#[test]
fn test_takeover_scenario() {
    let (_dir, _path, db) = open_test_db();
    let streak = engine(db);

    // A claims, claims again, B takes over, A takes it back
    assert_eq!(streak.claim("a").unwrap().get(), 1);
    assert_eq!(streak.claim("a").unwrap().get(), 2);
    assert_eq!(streak.claim("b").unwrap().get(), 1);
    assert_eq!(
        streak.claim("a").unwrap().get(),
        1,
        "returning claimant starts over, the old streak is gone"
    );
    assert_eq!(streak.last_claimant().unwrap().as_deref(), Some("a"));
}

#[test]
fn test_streak_survives_restart() {
    let (_dir, path, db) = open_test_db();
    {
        let streak = engine(db);
        streak.claim("alice").unwrap();
        streak.claim("alice").unwrap();
    }

    // Both the claimant and the count are durable
    let db = LedgerDb::open(&path).unwrap();
    let streak = engine(db);
    assert_eq!(streak.last_claimant().unwrap().as_deref(), Some("alice"));
    assert_eq!(streak.claim("alice").unwrap().get(), 3);
}
