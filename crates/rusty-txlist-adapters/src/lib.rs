pub mod clock;
pub mod config;
pub mod dispatch;
pub mod feature_flags;
pub mod gas_station;
pub mod i18n;
pub mod item_renderer;
pub mod transactions;

pub use clock::SystemClockAdapter;
pub use config::TxListAdapterConfig;
pub use dispatch::{SettledHook, ThreadedRefreshDispatcher};
pub use feature_flags::FeatureFlagStore;
pub use gas_station::{GasState, GasStationAdapter};
pub use i18n::{LocaleCatalog, LocaleMessage, LocaleMessages};
pub use item_renderer::DefaultItemRenderer;
pub use transactions::TransactionStore;
