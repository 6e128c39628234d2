use std::sync::{Arc, Mutex, MutexGuard};

use rusty_txlist_core::{FeatureFlagPort, FeatureFlags, PortError};

#[derive(Debug, Clone, Default)]
pub struct FeatureFlagStore {
    flags: Arc<Mutex<FeatureFlags>>,
}

impl FeatureFlagStore {
    pub fn new(flags: FeatureFlags) -> Self {
        Self {
            flags: Arc::new(Mutex::new(flags)),
        }
    }

    /// Parses preferences of the form `{"transactionTime": true, ...}`.
    pub fn from_json(json: &str) -> Result<Self, PortError> {
        let flags: FeatureFlags = serde_json::from_str(json)
            .map_err(|e| PortError::Validation(format!("feature flags: {e}")))?;
        Ok(Self::new(flags))
    }

    pub fn set_transaction_time(&self, active: bool) -> Result<(), PortError> {
        self.lock()?.transaction_time = active;
        Ok(())
    }

    pub fn set_flag(&self, name: &str, active: bool) -> Result<(), PortError> {
        let mut flags = self.lock()?;
        if name == "transactionTime" {
            flags.transaction_time = active;
        } else {
            flags.other.insert(name.to_owned(), active);
        }
        Ok(())
    }

    fn lock(&self) -> Result<MutexGuard<'_, FeatureFlags>, PortError> {
        self.flags
            .lock()
            .map_err(|_| PortError::Poisoned("feature_flags"))
    }
}

impl FeatureFlagPort for FeatureFlagStore {
    fn feature_flags(&self) -> Result<FeatureFlags, PortError> {
        Ok(self.lock()?.clone())
    }
}
