//! The transaction list component: renders the list and refreshes gas/time
//! estimates when pending transactions show up under the `transactionTime`
//! feature flag.

use tokio_util::sync::{CancellationToken, DropGuard};

use crate::domain::PendingSnapshot;
use crate::ports::{
    FeatureFlagPort, ListItemRenderer, PortError, RefreshDispatcher, TransactionSource,
    Translator,
};
use crate::view::{render_transaction_list, ViewNode};
use crate::watcher::{EstimateRefreshWatcher, TriggerReason};

pub struct TransactionList<S, F, T, R, D>
where
    S: TransactionSource,
    F: FeatureFlagPort,
    T: Translator,
    R: ListItemRenderer,
    D: RefreshDispatcher,
{
    pub source: S,
    pub flags: F,
    pub translator: T,
    pub items: R,
    pub dispatcher: D,
    watcher: EstimateRefreshWatcher,
    teardown: CancellationToken,
    in_flight: Option<CancellationToken>,
    _teardown_guard: DropGuard,
}

impl<S, F, T, R, D> TransactionList<S, F, T, R, D>
where
    S: TransactionSource,
    F: FeatureFlagPort,
    T: Translator,
    R: ListItemRenderer,
    D: RefreshDispatcher,
{
    pub fn new(source: S, flags: F, translator: T, items: R, dispatcher: D) -> Self {
        let teardown = CancellationToken::new();
        Self {
            source,
            flags,
            translator,
            items,
            dispatcher,
            watcher: EstimateRefreshWatcher::new(),
            _teardown_guard: teardown.clone().drop_guard(),
            teardown,
            in_flight: None,
        }
    }

    /// Renders the list, then runs the estimate-refresh effect for this render.
    pub fn render(&mut self, is_wide_viewport: bool) -> Result<ViewNode, PortError> {
        let pending = self.source.pending_transactions()?;
        let completed = self.source.completed_transactions()?;
        let feature_active = self.flags.feature_flags()?.transaction_time;

        let view = render_transaction_list(
            &pending,
            &completed,
            is_wide_viewport,
            &self.translator,
            &self.items,
        );

        self.run_effect(PendingSnapshot::new(pending.len(), feature_active));
        Ok(view)
    }

    pub fn watcher(&self) -> &EstimateRefreshWatcher {
        &self.watcher
    }

    /// Token of the most recently dispatched chain, if any.
    pub fn in_flight(&self) -> Option<&CancellationToken> {
        self.in_flight.as_ref()
    }

    fn run_effect(&mut self, snapshot: PendingSnapshot) -> Option<TriggerReason> {
        let reason = self.watcher.observe(snapshot)?;
        tracing::debug!(
            reason = reason.as_str(),
            pending = snapshot.pending_count,
            "refreshing gas/time estimates"
        );

        if let Some(stale) = self.in_flight.take() {
            stale.cancel();
        }
        let token = self.teardown.child_token();
        self.in_flight = Some(token.clone());
        self.dispatcher.dispatch(token);
        Some(reason)
    }
}
