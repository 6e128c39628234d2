use std::collections::BTreeMap;

use alloy::primitives::{Address, B256, U256};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TimestampMs(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    Unapproved,
    Approved,
    Signed,
    Submitted,
    Confirmed,
    Failed,
    Dropped,
    Rejected,
}

impl TransactionStatus {
    /// Submitted but not yet final.
    pub fn is_pending(self) -> bool {
        matches!(
            self,
            TransactionStatus::Unapproved
                | TransactionStatus::Approved
                | TransactionStatus::Signed
                | TransactionStatus::Submitted
        )
    }

    /// Final states that never become the primary transaction of a nonce
    /// while a better candidate exists.
    pub fn is_abandoned(self) -> bool {
        matches!(
            self,
            TransactionStatus::Failed | TransactionStatus::Dropped | TransactionStatus::Rejected
        )
    }

    pub fn i18n_key(self) -> &'static str {
        match self {
            TransactionStatus::Unapproved => "unapproved",
            TransactionStatus::Approved => "approved",
            TransactionStatus::Signed => "signed",
            TransactionStatus::Submitted => "pending",
            TransactionStatus::Confirmed => "confirmed",
            TransactionStatus::Failed => "failed",
            TransactionStatus::Dropped => "dropped",
            TransactionStatus::Rejected => "rejected",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    #[default]
    Standard,
    Retry,
    Cancel,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub id: u64,
    pub nonce: u64,
    pub status: TransactionStatus,
    #[serde(default)]
    pub kind: TransactionKind,
    pub from: Address,
    pub to: Option<Address>,
    pub value: U256,
    pub hash: Option<B256>,
    pub time: TimestampMs,
}

/// All transactions sharing one nonce, as produced by the nonce selectors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionGroup {
    pub nonce: u64,
    pub transactions: Vec<TransactionRecord>,
    pub initial_transaction: TransactionRecord,
    pub primary_transaction: TransactionRecord,
    pub has_retried: bool,
    pub has_cancelled: bool,
}

impl TransactionGroup {
    pub fn is_pending(&self) -> bool {
        self.primary_transaction.status.is_pending()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FeatureFlags {
    #[serde(rename = "transactionTime", default)]
    pub transaction_time: bool,
    #[serde(flatten)]
    pub other: BTreeMap<String, bool>,
}

/// Per-render input of the estimate-refresh watcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PendingSnapshot {
    pub pending_count: usize,
    pub transaction_time_feature_active: bool,
}

impl PendingSnapshot {
    pub fn new(pending_count: usize, transaction_time_feature_active: bool) -> Self {
        Self {
            pending_count,
            transaction_time_feature_active,
        }
    }
}

/// Gas prices in gwei, waits in minutes.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BasicGasEstimates {
    pub safe_low: f64,
    pub average: f64,
    pub fast: f64,
    pub fastest: f64,
    pub safe_low_wait: f64,
    pub avg_wait: f64,
    pub fast_wait: f64,
    pub fastest_wait: f64,
    pub block_time_secs: f64,
    pub block_num: u64,
    pub speed: f64,
}

/// One row of the gas-station prediction table. `expected_wait` is in blocks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionRow {
    pub expected_time: f64,
    pub expected_wait: f64,
    pub gasprice: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceAndTimeEstimate {
    pub expected_time_secs: f64,
    pub gas_price_gwei: f64,
}
