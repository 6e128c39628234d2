//! Nonce grouping over raw transaction records.

use std::collections::BTreeMap;

use alloy::primitives::Address;

use crate::domain::{TransactionGroup, TransactionKind, TransactionRecord, TransactionStatus};

/// Groups records by sender and nonce, ascending by nonce. Within a group
/// records are ordered by time, so the first one is the initial transaction.
pub fn group_by_nonce(records: &[TransactionRecord]) -> Vec<TransactionGroup> {
    let mut sorted: Vec<&TransactionRecord> = records.iter().collect();
    sorted.sort_by_key(|record| (record.time, record.id));

    let mut by_nonce: BTreeMap<(u64, Address), Vec<TransactionRecord>> = BTreeMap::new();
    for record in sorted {
        by_nonce
            .entry((record.nonce, record.from))
            .or_default()
            .push(record.clone());
    }

    by_nonce
        .into_iter()
        .filter_map(|((nonce, _), transactions)| build_group(nonce, transactions))
        .collect()
}

pub fn nonce_sorted_pending(records: &[TransactionRecord]) -> Vec<TransactionGroup> {
    group_by_nonce(records)
        .into_iter()
        .filter(TransactionGroup::is_pending)
        .collect()
}

pub fn nonce_sorted_completed(records: &[TransactionRecord]) -> Vec<TransactionGroup> {
    group_by_nonce(records)
        .into_iter()
        .filter(|group| !group.is_pending())
        .collect()
}

fn build_group(nonce: u64, transactions: Vec<TransactionRecord>) -> Option<TransactionGroup> {
    let initial_transaction = transactions.first()?.clone();
    let primary_transaction = transactions
        .iter()
        .find(|tx| tx.status == TransactionStatus::Confirmed)
        .or_else(|| transactions.iter().rev().find(|tx| !tx.status.is_abandoned()))
        .or_else(|| transactions.last())?
        .clone();
    let has_retried = transactions
        .iter()
        .any(|tx| tx.kind == TransactionKind::Retry);
    let has_cancelled = transactions
        .iter()
        .any(|tx| tx.kind == TransactionKind::Cancel);

    Some(TransactionGroup {
        nonce,
        transactions,
        initial_transaction,
        primary_transaction,
        has_retried,
        has_cancelled,
    })
}
