use tokio_util::sync::CancellationToken;
use thiserror::Error;

use crate::domain::{BasicGasEstimates, FeatureFlags, PriceAndTimeEstimate, TransactionGroup};
use crate::view::ViewNode;

#[derive(Debug, Error)]
pub enum PortError {
    #[error("port not implemented: {0}")]
    NotImplemented(&'static str),
    #[error("transport error: {0}")]
    Transport(String),
    #[error("validation error: {0}")]
    Validation(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("lock poisoned: {0}")]
    Poisoned(&'static str),
}

/// Nonce-sorted views over the wallet's transactions.
pub trait TransactionSource {
    fn pending_transactions(&self) -> Result<Vec<TransactionGroup>, PortError>;
    fn completed_transactions(&self) -> Result<Vec<TransactionGroup>, PortError>;
}

pub trait FeatureFlagPort {
    fn feature_flags(&self) -> Result<FeatureFlags, PortError>;
}

#[allow(async_fn_in_trait)]
pub trait GasEstimatePort {
    async fn fetch_basic_gas_and_time_estimates(&self) -> Result<BasicGasEstimates, PortError>;
    async fn fetch_gas_estimates(
        &self,
        block_time_secs: f64,
    ) -> Result<Vec<PriceAndTimeEstimate>, PortError>;
}

pub trait Translator {
    fn translate(&self, key: &str) -> String;
}

pub trait ListItemRenderer {
    fn render_item(&self, group: &TransactionGroup, is_earliest_nonce: bool) -> ViewNode;
}

/// Starts a refresh chain in the background. The chain must stop once
/// `cancel` fires.
pub trait RefreshDispatcher {
    fn dispatch(&self, cancel: CancellationToken);
}

pub trait ClockPort {
    fn now_ms(&self) -> Result<u64, PortError>;
}

impl<T: TransactionSource + ?Sized> TransactionSource for &T {
    fn pending_transactions(&self) -> Result<Vec<TransactionGroup>, PortError> {
        (**self).pending_transactions()
    }

    fn completed_transactions(&self) -> Result<Vec<TransactionGroup>, PortError> {
        (**self).completed_transactions()
    }
}

impl<T: FeatureFlagPort + ?Sized> FeatureFlagPort for &T {
    fn feature_flags(&self) -> Result<FeatureFlags, PortError> {
        (**self).feature_flags()
    }
}

impl<T: Translator + ?Sized> Translator for &T {
    fn translate(&self, key: &str) -> String {
        (**self).translate(key)
    }
}

impl<T: ListItemRenderer + ?Sized> ListItemRenderer for &T {
    fn render_item(&self, group: &TransactionGroup, is_earliest_nonce: bool) -> ViewNode {
        (**self).render_item(group, is_earliest_nonce)
    }
}

impl<T: RefreshDispatcher + ?Sized> RefreshDispatcher for &T {
    fn dispatch(&self, cancel: CancellationToken) {
        (**self).dispatch(cancel)
    }
}
