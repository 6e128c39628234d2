use crate::domain::PendingSnapshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerReason {
    FirstRun,
    FeatureActivated,
    PendingAppeared,
}

impl TriggerReason {
    pub fn as_str(self) -> &'static str {
        match self {
            TriggerReason::FirstRun => "first_run",
            TriggerReason::FeatureActivated => "feature_activated",
            TriggerReason::PendingAppeared => "pending_appeared",
        }
    }
}

/// Decides once per render whether gas/time estimates must be refetched.
///
/// The record of the previous render is `None` until the first observation,
/// which is the "not loaded" state.
#[derive(Debug, Clone, Default)]
pub struct EstimateRefreshWatcher {
    previous: Option<PendingSnapshot>,
}

impl EstimateRefreshWatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_loaded(&self) -> bool {
        self.previous.is_some()
    }

    pub fn previous(&self) -> Option<PendingSnapshot> {
        self.previous
    }

    /// Compares `current` with the retained snapshot, then retains `current`.
    pub fn observe(&mut self, current: PendingSnapshot) -> Option<TriggerReason> {
        let reason = trigger_reason(self.previous, current);
        self.previous = Some(current);
        reason
    }
}

pub fn trigger_reason(
    previous: Option<PendingSnapshot>,
    current: PendingSnapshot,
) -> Option<TriggerReason> {
    if !current.transaction_time_feature_active || current.pending_count == 0 {
        return None;
    }
    let Some(previous) = previous else {
        return Some(TriggerReason::FirstRun);
    };
    if !previous.transaction_time_feature_active {
        return Some(TriggerReason::FeatureActivated);
    }
    if previous.pending_count == 0 {
        return Some(TriggerReason::PendingAppeared);
    }
    None
}
