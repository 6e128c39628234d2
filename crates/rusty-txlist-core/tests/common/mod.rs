#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use alloy::primitives::{Address, B256, U256};
use tokio_util::sync::CancellationToken;

use rusty_txlist_core::{
    group_by_nonce, BasicGasEstimates, FeatureFlagPort, FeatureFlags, GasEstimatePort,
    ListItemRenderer, PortError, PriceAndTimeEstimate, RefreshDispatcher, TimestampMs,
    TransactionGroup, TransactionKind, TransactionList, TransactionRecord, TransactionSource,
    TransactionStatus, Translator, ViewNode,
};

pub fn record(id: u64, nonce: u64, status: TransactionStatus, time: u64) -> TransactionRecord {
    TransactionRecord {
        id,
        nonce,
        status,
        kind: TransactionKind::Standard,
        from: owner_address(),
        to: Some(Address::ZERO),
        value: U256::from(1_000u64),
        hash: Some(B256::repeat_byte(id as u8)),
        time: TimestampMs(time),
    }
}

pub fn group(nonce: u64, status: TransactionStatus) -> TransactionGroup {
    group_by_nonce(&[record(nonce, nonce, status, nonce * 10)])
        .pop()
        .expect("one group")
}

pub fn pending_groups(count: u64) -> Vec<TransactionGroup> {
    (0..count)
        .map(|nonce| group(nonce, TransactionStatus::Submitted))
        .collect()
}

pub fn owner_address() -> Address {
    "0x1000000000000000000000000000000000000001"
        .parse()
        .expect("valid owner address")
}

#[derive(Debug, Default)]
pub struct FakeSource {
    pub pending: Vec<TransactionGroup>,
    pub completed: Vec<TransactionGroup>,
}

impl TransactionSource for FakeSource {
    fn pending_transactions(&self) -> Result<Vec<TransactionGroup>, PortError> {
        Ok(self.pending.clone())
    }

    fn completed_transactions(&self) -> Result<Vec<TransactionGroup>, PortError> {
        Ok(self.completed.clone())
    }
}

#[derive(Debug, Default)]
pub struct FakeFlags {
    pub transaction_time: bool,
}

impl FeatureFlagPort for FakeFlags {
    fn feature_flags(&self) -> Result<FeatureFlags, PortError> {
        Ok(FeatureFlags {
            transaction_time: self.transaction_time,
            ..FeatureFlags::default()
        })
    }
}

/// Translates to the English strings of the extension's catalog.
#[derive(Debug, Default)]
pub struct EnglishTranslator;

impl Translator for EnglishTranslator {
    fn translate(&self, key: &str) -> String {
        match key {
            "queue" => "Queue",
            "history" => "History",
            "noTransactions" => "You have no transactions",
            other => other,
        }
        .to_owned()
    }
}

#[derive(Debug, Default)]
pub struct StubItems;

impl ListItemRenderer for StubItems {
    fn render_item(&self, group: &TransactionGroup, is_earliest_nonce: bool) -> ViewNode {
        let marker = if is_earliest_nonce { " earliest" } else { "" };
        ViewNode::element(
            "stub-item",
            vec![ViewNode::text(format!("#{}{marker}", group.nonce))],
        )
    }
}

#[derive(Debug, Clone, Default)]
pub struct RecordingDispatcher {
    pub tokens: Arc<Mutex<Vec<CancellationToken>>>,
}

impl RecordingDispatcher {
    pub fn count(&self) -> usize {
        self.tokens.lock().expect("tokens lock").len()
    }

    pub fn token(&self, index: usize) -> CancellationToken {
        self.tokens.lock().expect("tokens lock")[index].clone()
    }
}

impl RefreshDispatcher for RecordingDispatcher {
    fn dispatch(&self, cancel: CancellationToken) {
        self.tokens.lock().expect("tokens lock").push(cancel);
    }
}

pub type TestList =
    TransactionList<FakeSource, FakeFlags, EnglishTranslator, StubItems, RecordingDispatcher>;

pub fn new_list(pending: u64, feature_active: bool) -> (TestList, RecordingDispatcher) {
    let dispatcher = RecordingDispatcher::default();
    let list = TransactionList::new(
        FakeSource {
            pending: pending_groups(pending),
            completed: Vec::new(),
        },
        FakeFlags {
            transaction_time: feature_active,
        },
        EnglishTranslator,
        StubItems,
        dispatcher.clone(),
    );
    (list, dispatcher)
}

pub fn basic_estimates(block_time_secs: f64) -> BasicGasEstimates {
    BasicGasEstimates {
        safe_low: 10.0,
        average: 15.0,
        fast: 20.0,
        fastest: 30.0,
        safe_low_wait: 10.0,
        avg_wait: 3.0,
        fast_wait: 0.5,
        fastest_wait: 0.4,
        block_time_secs,
        block_num: 9_000_000,
        speed: 0.9,
    }
}

/// Gas port that answers from fixed data and counts calls. When
/// `block_until` is set the basic fetch waits for that token.
#[derive(Debug, Default)]
pub struct ScriptedGas {
    pub basic_calls: AtomicUsize,
    pub estimate_calls: AtomicUsize,
    pub fail_basic: bool,
    pub fail_estimates: bool,
    pub block_until: Option<CancellationToken>,
    pub seen_block_time: Mutex<Option<f64>>,
}

impl ScriptedGas {
    pub fn basic_calls(&self) -> usize {
        self.basic_calls.load(Ordering::SeqCst)
    }

    pub fn estimate_calls(&self) -> usize {
        self.estimate_calls.load(Ordering::SeqCst)
    }
}

impl GasEstimatePort for ScriptedGas {
    async fn fetch_basic_gas_and_time_estimates(&self) -> Result<BasicGasEstimates, PortError> {
        self.basic_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.block_until {
            gate.cancelled().await;
        }
        if self.fail_basic {
            return Err(PortError::Transport("gas station unreachable".to_owned()));
        }
        Ok(basic_estimates(14.0))
    }

    async fn fetch_gas_estimates(
        &self,
        block_time_secs: f64,
    ) -> Result<Vec<PriceAndTimeEstimate>, PortError> {
        self.estimate_calls.fetch_add(1, Ordering::SeqCst);
        *self.seen_block_time.lock().expect("block time lock") = Some(block_time_secs);
        if self.fail_estimates {
            return Err(PortError::Transport("prediction table unavailable".to_owned()));
        }
        Ok(vec![PriceAndTimeEstimate {
            expected_time_secs: 3.0 * block_time_secs,
            gas_price_gwei: 20.0,
        }])
    }
}
