//! In-memory transaction store behind the nonce selectors.

use std::sync::{Arc, Mutex, MutexGuard};

use alloy::primitives::{keccak256, Address, U256};

use rusty_txlist_core::{
    nonce_sorted_completed, nonce_sorted_pending, ClockPort, PortError, TimestampMs,
    TransactionGroup, TransactionKind, TransactionRecord, TransactionSource, TransactionStatus,
};

#[derive(Debug, Clone, Default)]
pub struct TransactionStore {
    records: Arc<Mutex<Vec<TransactionRecord>>>,
}

impl TransactionStore {
    pub fn from_records(records: Vec<TransactionRecord>) -> Self {
        Self {
            records: Arc::new(Mutex::new(records)),
        }
    }

    pub fn from_json(json: &str) -> Result<Self, PortError> {
        let records: Vec<TransactionRecord> = serde_json::from_str(json)
            .map_err(|e| PortError::Validation(format!("transaction records: {e}")))?;
        Ok(Self::from_records(records))
    }

    pub fn records(&self) -> Result<Vec<TransactionRecord>, PortError> {
        Ok(self.lock()?.clone())
    }

    /// Inserts `record`, replacing any record with the same id.
    pub fn upsert(&self, record: TransactionRecord) -> Result<(), PortError> {
        let mut records = self.lock()?;
        match records.iter_mut().find(|existing| existing.id == record.id) {
            Some(existing) => *existing = record,
            None => records.push(record),
        }
        Ok(())
    }

    /// Lowest nonce above every nonce `from` has used.
    pub fn next_nonce(&self, from: Address) -> Result<u64, PortError> {
        Ok(self
            .lock()?
            .iter()
            .filter(|record| record.from == from)
            .map(|record| record.nonce + 1)
            .max()
            .unwrap_or(0))
    }

    /// Submits a new standard transaction at the next free nonce.
    pub fn submit(
        &self,
        from: Address,
        to: Address,
        value: U256,
        clock: &impl ClockPort,
    ) -> Result<TransactionRecord, PortError> {
        let nonce = self.next_nonce(from)?;
        let record = TransactionRecord {
            id: self.next_id()?,
            nonce,
            status: TransactionStatus::Submitted,
            kind: TransactionKind::Standard,
            from,
            to: Some(to),
            value,
            hash: None,
            time: TimestampMs(clock.now_ms()?),
        };
        let record = with_hash(record);
        self.upsert(record.clone())?;
        Ok(record)
    }

    /// Adds a speed-up replacement for the primary transaction of `from`'s
    /// `nonce`.
    pub fn speed_up(
        &self,
        from: Address,
        nonce: u64,
        clock: &impl ClockPort,
    ) -> Result<TransactionRecord, PortError> {
        self.replace(from, nonce, TransactionKind::Retry, clock)
    }

    /// Adds a zero-value cancel replacement for `from`'s `nonce`.
    pub fn cancel(
        &self,
        from: Address,
        nonce: u64,
        clock: &impl ClockPort,
    ) -> Result<TransactionRecord, PortError> {
        self.replace(from, nonce, TransactionKind::Cancel, clock)
    }

    /// Confirms the latest live transaction of `from`'s `nonce` and drops the
    /// rest.
    pub fn confirm(&self, from: Address, nonce: u64) -> Result<(), PortError> {
        self.settle(from, nonce, TransactionStatus::Confirmed)
    }

    /// Fails the latest live transaction of `from`'s `nonce` and drops the rest.
    pub fn fail(&self, from: Address, nonce: u64) -> Result<(), PortError> {
        self.settle(from, nonce, TransactionStatus::Failed)
    }

    /// Pending groups sent by `from`.
    pub fn pending_for(&self, from: Address) -> Result<Vec<TransactionGroup>, PortError> {
        let records: Vec<TransactionRecord> = self
            .records()?
            .into_iter()
            .filter(|record| record.from == from)
            .collect();
        Ok(nonce_sorted_pending(&records))
    }

    fn replace(
        &self,
        from: Address,
        nonce: u64,
        kind: TransactionKind,
        clock: &impl ClockPort,
    ) -> Result<TransactionRecord, PortError> {
        let original = self.pending_group(from, nonce)?.primary_transaction;
        let value = match kind {
            TransactionKind::Cancel => U256::ZERO,
            TransactionKind::Standard | TransactionKind::Retry => original.value,
        };
        let to = match kind {
            TransactionKind::Cancel => Some(original.from),
            TransactionKind::Standard | TransactionKind::Retry => original.to,
        };
        let record = with_hash(TransactionRecord {
            id: self.next_id()?,
            kind,
            to,
            value,
            hash: None,
            status: TransactionStatus::Submitted,
            time: TimestampMs(clock.now_ms()?),
            ..original
        });
        self.upsert(record.clone())?;
        Ok(record)
    }

    fn settle(
        &self,
        from: Address,
        nonce: u64,
        outcome: TransactionStatus,
    ) -> Result<(), PortError> {
        let winner = self.pending_group(from, nonce)?.primary_transaction.id;
        let mut records = self.lock()?;
        for record in records
            .iter_mut()
            .filter(|record| record.nonce == nonce && record.from == from)
        {
            if record.id == winner {
                record.status = outcome;
            } else if record.status.is_pending() {
                record.status = TransactionStatus::Dropped;
            }
        }
        Ok(())
    }

    fn pending_group(&self, from: Address, nonce: u64) -> Result<TransactionGroup, PortError> {
        self.pending_for(from)?
            .into_iter()
            .find(|group| group.nonce == nonce)
            .ok_or_else(|| {
                PortError::NotFound(format!("no pending transaction with nonce {nonce}"))
            })
    }

    fn next_id(&self) -> Result<u64, PortError> {
        Ok(self
            .lock()?
            .iter()
            .map(|record| record.id + 1)
            .max()
            .unwrap_or(1))
    }

    fn lock(&self) -> Result<MutexGuard<'_, Vec<TransactionRecord>>, PortError> {
        self.records
            .lock()
            .map_err(|_| PortError::Poisoned("transactions.records"))
    }
}

impl TransactionSource for TransactionStore {
    fn pending_transactions(&self) -> Result<Vec<TransactionGroup>, PortError> {
        Ok(nonce_sorted_pending(&self.records()?))
    }

    fn completed_transactions(&self) -> Result<Vec<TransactionGroup>, PortError> {
        Ok(nonce_sorted_completed(&self.records()?))
    }
}

/// Stand-in transaction hash for locally simulated submissions.
fn with_hash(mut record: TransactionRecord) -> TransactionRecord {
    let seed = format!("{}:{}:{}:{}", record.from, record.id, record.nonce, record.time.0);
    record.hash = Some(keccak256(seed.as_bytes()));
    record
}
