mod common;

use alloy::primitives::U256;

use common::{owner_address, recipient_address, TestClock};
use rusty_txlist_adapters::{FeatureFlagStore, TransactionStore};
use rusty_txlist_core::{
    FeatureFlagPort, PortError, TransactionKind, TransactionSource, TransactionStatus,
};

fn submit(store: &TransactionStore, clock: &TestClock) -> u64 {
    clock.advance(1_000);
    store
        .submit(owner_address(), recipient_address(), U256::from(7u64), clock)
        .unwrap()
        .nonce
}

#[test]
fn submissions_take_consecutive_nonces() {
    let store = TransactionStore::default();
    let clock = TestClock::at(0);

    assert_eq!(submit(&store, &clock), 0);
    assert_eq!(submit(&store, &clock), 1);
    assert_eq!(submit(&store, &clock), 2);

    let pending = store.pending_transactions().unwrap();
    let nonces: Vec<u64> = pending.iter().map(|g| g.nonce).collect();
    assert_eq!(nonces, vec![0, 1, 2]);
    assert!(store.completed_transactions().unwrap().is_empty());
    assert!(pending.iter().all(|g| g.primary_transaction.hash.is_some()));
}

#[test]
fn speed_up_becomes_the_primary_transaction() {
    let store = TransactionStore::default();
    let clock = TestClock::at(0);
    let nonce = submit(&store, &clock);

    clock.advance(500);
    let retry = store.speed_up(owner_address(), nonce, &clock).unwrap();

    let group = store.pending_transactions().unwrap().remove(0);
    assert_eq!(group.transactions.len(), 2);
    assert!(group.has_retried);
    assert_eq!(group.primary_transaction.id, retry.id);
    assert_eq!(group.initial_transaction.kind, TransactionKind::Standard);
    assert_eq!(retry.value, U256::from(7u64));
}

#[test]
fn cancel_sends_zero_value_to_self() {
    let store = TransactionStore::default();
    let clock = TestClock::at(0);
    let nonce = submit(&store, &clock);

    clock.advance(500);
    let cancel = store.cancel(owner_address(), nonce, &clock).unwrap();

    assert_eq!(cancel.kind, TransactionKind::Cancel);
    assert_eq!(cancel.value, U256::ZERO);
    assert_eq!(cancel.to, Some(owner_address()));
    assert!(store.pending_transactions().unwrap()[0].has_cancelled);
}

#[test]
fn confirm_moves_the_group_to_history_and_drops_replacements() {
    let store = TransactionStore::default();
    let clock = TestClock::at(0);
    let first = submit(&store, &clock);
    let second = submit(&store, &clock);
    clock.advance(500);
    let retry = store.speed_up(owner_address(), first, &clock).unwrap();

    store.confirm(owner_address(), first).unwrap();

    let pending = store.pending_transactions().unwrap();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].nonce, second);

    let completed = store.completed_transactions().unwrap();
    assert_eq!(completed.len(), 1);
    let group = &completed[0];
    assert_eq!(group.primary_transaction.id, retry.id);
    assert_eq!(group.primary_transaction.status, TransactionStatus::Confirmed);
    assert_eq!(group.initial_transaction.status, TransactionStatus::Dropped);
}

#[test]
fn failing_a_settled_nonce_is_not_found() {
    let store = TransactionStore::default();
    let clock = TestClock::at(0);
    let nonce = submit(&store, &clock);
    store.fail(owner_address(), nonce).unwrap();

    let completed = store.completed_transactions().unwrap();
    assert_eq!(completed[0].primary_transaction.status, TransactionStatus::Failed);

    let err = store.confirm(owner_address(), nonce).unwrap_err();
    assert!(matches!(err, PortError::NotFound(_)), "{err:?}");
    assert!(matches!(
        store.speed_up(owner_address(), nonce, &clock),
        Err(PortError::NotFound(_))
    ));
}

#[test]
fn records_load_from_json() {
    let json = r#"[
        {
            "id": 4,
            "nonce": 9,
            "status": "confirmed",
            "from": "0x1000000000000000000000000000000000000001",
            "to": null,
            "value": "0x0",
            "hash": null,
            "time": 1700000000000
        },
        {
            "id": 5,
            "nonce": 10,
            "status": "submitted",
            "kind": "retry",
            "from": "0x1000000000000000000000000000000000000001",
            "to": "0x000000000000000000000000000000000000cafe",
            "value": "0x1",
            "hash": null,
            "time": 1700000001000
        }
    ]"#;

    let store = TransactionStore::from_json(json).unwrap();

    assert_eq!(store.records().unwrap().len(), 2);
    assert_eq!(store.completed_transactions().unwrap()[0].nonce, 9);
    assert!(store.pending_transactions().unwrap()[0].has_retried);
    assert_eq!(store.next_nonce(owner_address()).unwrap(), 11);
    assert!(matches!(
        TransactionStore::from_json("{}"),
        Err(PortError::Validation(_))
    ));
}

#[test]
fn feature_flags_parse_and_toggle() {
    let flags = FeatureFlagStore::from_json(r#"{"transactionTime": false, "showFiat": true}"#)
        .unwrap();

    let parsed = flags.feature_flags().unwrap();
    assert!(!parsed.transaction_time);
    assert_eq!(parsed.other.get("showFiat"), Some(&true));

    flags.set_flag("transactionTime", true).unwrap();
    flags.set_flag("showFiat", false).unwrap();
    let toggled = flags.feature_flags().unwrap();
    assert!(toggled.transaction_time);
    assert_eq!(toggled.other.get("showFiat"), Some(&false));

    flags.set_transaction_time(false).unwrap();
    assert!(!flags.feature_flags().unwrap().transaction_time);
    assert!(!FeatureFlagStore::default()
        .feature_flags()
        .unwrap()
        .transaction_time);
}

#[test]
fn senders_sharing_a_nonce_are_settled_independently() {
    let store = TransactionStore::default();
    let clock = TestClock::at(0);
    let other = recipient_address();
    assert_eq!(submit(&store, &clock), 0);
    clock.advance(1_000);
    let foreign = store
        .submit(other, owner_address(), U256::from(1u64), &clock)
        .unwrap();
    assert_eq!(foreign.nonce, 0);

    let pending = store.pending_transactions().unwrap();
    assert_eq!(pending.len(), 2);
    assert!(pending.iter().all(|g| g.transactions.len() == 1));

    store.confirm(owner_address(), 0).unwrap();

    let still_pending = store.pending_transactions().unwrap();
    assert_eq!(still_pending.len(), 1);
    assert_eq!(still_pending[0].primary_transaction.id, foreign.id);
    assert_eq!(
        still_pending[0].primary_transaction.status,
        TransactionStatus::Submitted
    );
    assert!(store.pending_for(owner_address()).unwrap().is_empty());
    assert_eq!(store.pending_for(other).unwrap().len(), 1);
}
