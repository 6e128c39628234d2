pub mod component;
pub mod domain;
pub mod estimates;
pub mod ports;
pub mod refresh;
pub mod selectors;
pub mod view;
pub mod watcher;

pub use component::TransactionList;
pub use domain::{
    BasicGasEstimates, FeatureFlags, PendingSnapshot, PredictionRow, PriceAndTimeEstimate,
    TimestampMs, TransactionGroup, TransactionKind, TransactionRecord, TransactionStatus,
};
pub use estimates::{price_and_time_estimates, scale_gas_station_price};
pub use ports::{
    ClockPort, FeatureFlagPort, GasEstimatePort, ListItemRenderer, PortError, RefreshDispatcher,
    TransactionSource, Translator,
};
pub use refresh::{run_estimate_refresh, RefreshError, RefreshOutcome};
pub use selectors::{group_by_nonce, nonce_sorted_completed, nonce_sorted_pending};
pub use view::{render_transaction_list, ViewNode};
pub use watcher::{EstimateRefreshWatcher, TriggerReason};
