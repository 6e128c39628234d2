use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use rusty_txlist_core::{
    run_estimate_refresh, GasEstimatePort, RefreshDispatcher, RefreshError, RefreshOutcome,
};

pub type SettledHook = Arc<dyn Fn(&Result<RefreshOutcome, RefreshError>) + Send + Sync>;

/// Runs each refresh chain on its own thread and runtime. Failures are
/// logged here and go no further.
#[derive(Clone)]
pub struct ThreadedRefreshDispatcher<G> {
    gas: G,
    on_settled: Option<SettledHook>,
}

impl<G> ThreadedRefreshDispatcher<G> {
    pub fn new(gas: G) -> Self {
        Self {
            gas,
            on_settled: None,
        }
    }

    /// Called on the worker thread once a chain completes, fails or is
    /// cancelled.
    pub fn with_on_settled(mut self, hook: SettledHook) -> Self {
        self.on_settled = Some(hook);
        self
    }

    pub fn gas(&self) -> &G {
        &self.gas
    }
}

impl<G> RefreshDispatcher for ThreadedRefreshDispatcher<G>
where
    G: GasEstimatePort + Clone + Send + 'static,
{
    fn dispatch(&self, cancel: CancellationToken) {
        let gas = self.gas.clone();
        let on_settled = self.on_settled.clone();

        std::thread::spawn(move || {
            let rt = match tokio::runtime::Runtime::new() {
                Ok(rt) => rt,
                Err(e) => {
                    tracing::warn!(error = %e, "cannot start runtime for gas estimate refresh");
                    return;
                }
            };
            let result = rt.block_on(run_estimate_refresh(&gas, &cancel));
            match &result {
                Ok(RefreshOutcome::Completed { basic, estimates }) => tracing::info!(
                    block_num = basic.block_num,
                    average_gwei = basic.average,
                    estimates = estimates.len(),
                    "gas estimates refreshed"
                ),
                Ok(RefreshOutcome::Cancelled) => {
                    tracing::debug!("gas estimate refresh cancelled")
                }
                Err(e) => tracing::warn!(error = %e, "gas estimate refresh failed"),
            }
            if let Some(hook) = on_settled {
                hook(&result);
            }
        });
    }
}
