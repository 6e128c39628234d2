//! Gas-station client backing the two-step estimate refresh.
//!
//! Both endpoints are cached for `estimates_cache_ttl_ms`; a fresh cache is
//! served without touching the network. Loading flags are only raised while a
//! request is actually in flight.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use serde::Deserialize;

use rusty_txlist_core::{
    price_and_time_estimates, scale_gas_station_price, BasicGasEstimates, ClockPort,
    GasEstimatePort, PortError, PredictionRow, PriceAndTimeEstimate,
};

use crate::clock::SystemClockAdapter;
use crate::config::TxListAdapterConfig;

/// Shared estimate state, read by the UI and written by refresh chains.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GasState {
    pub basic: Option<BasicGasEstimates>,
    pub basic_retrieved_at_ms: Option<u64>,
    pub basic_loading: bool,
    pub price_and_time: Vec<PriceAndTimeEstimate>,
    pub price_and_time_retrieved_at_ms: Option<u64>,
    /// Block time the cached `price_and_time` were computed with.
    pub price_and_time_block_time_secs: Option<f64>,
    pub estimates_loading: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BasicResponse {
    safe_low: f64,
    average: f64,
    fast: f64,
    fastest: f64,
    safe_low_wait: f64,
    avg_wait: f64,
    fast_wait: f64,
    fastest_wait: f64,
    #[serde(rename = "block_time")]
    block_time: f64,
    block_num: u64,
    speed: f64,
}

impl BasicResponse {
    fn into_estimates(self) -> BasicGasEstimates {
        BasicGasEstimates {
            safe_low: scale_gas_station_price(self.safe_low),
            average: scale_gas_station_price(self.average),
            fast: scale_gas_station_price(self.fast),
            fastest: scale_gas_station_price(self.fastest),
            safe_low_wait: self.safe_low_wait,
            avg_wait: self.avg_wait,
            fast_wait: self.fast_wait,
            fastest_wait: self.fastest_wait,
            block_time_secs: self.block_time,
            block_num: self.block_num,
            speed: self.speed,
        }
    }
}

#[derive(Debug, Clone)]
pub struct GasStationAdapter<C: ClockPort = SystemClockAdapter> {
    config: TxListAdapterConfig,
    client: reqwest::Client,
    clock: C,
    state: Arc<Mutex<GasState>>,
}

impl GasStationAdapter<SystemClockAdapter> {
    pub fn with_config(config: TxListAdapterConfig) -> Result<Self, PortError> {
        Self::with_clock(config, SystemClockAdapter)
    }
}

impl<C: ClockPort> GasStationAdapter<C> {
    pub fn with_clock(config: TxListAdapterConfig, clock: C) -> Result<Self, PortError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.gas_station_timeout_ms))
            .build()
            .map_err(|e| PortError::Transport(format!("http client: {e}")))?;
        Ok(Self {
            config,
            client,
            clock,
            state: Arc::new(Mutex::new(GasState::default())),
        })
    }

    /// Copy of the current estimate state.
    pub fn snapshot(&self) -> Result<GasState, PortError> {
        Ok(self.lock_state()?.clone())
    }

    fn lock_state(&self) -> Result<MutexGuard<'_, GasState>, PortError> {
        self.state
            .lock()
            .map_err(|_| PortError::Poisoned("gas_station.state"))
    }

    fn is_fresh(&self, retrieved_at_ms: Option<u64>, now_ms: u64) -> bool {
        retrieved_at_ms
            .is_some_and(|at| now_ms.saturating_sub(at) <= self.config.estimates_cache_ttl_ms)
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T, PortError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| PortError::Transport(format!("{url}: {e}")))?;
        let status = response.status();
        if !status.is_success() {
            return Err(PortError::Transport(format!("{url}: status {status}")));
        }
        response
            .json::<T>()
            .await
            .map_err(|e| PortError::Validation(format!("{url}: {e}")))
    }

    async fn fetch_external_basic(&self) -> Result<BasicGasEstimates, PortError> {
        let url = self.config.basic_estimates_url();
        tracing::info!(%url, "fetching basic gas/time estimates");
        let body: BasicResponse = self.get_json(&url).await?;
        Ok(body.into_estimates())
    }

    async fn fetch_external_estimates(
        &self,
        block_time_secs: f64,
    ) -> Result<Vec<PriceAndTimeEstimate>, PortError> {
        let url = self.config.prediction_table_url();
        tracing::info!(%url, block_time_secs, "fetching gas price prediction table");
        let rows: Vec<PredictionRow> = self.get_json(&url).await?;
        Ok(price_and_time_estimates(&rows, block_time_secs))
    }
}

impl<C: ClockPort> GasEstimatePort for GasStationAdapter<C> {
    async fn fetch_basic_gas_and_time_estimates(&self) -> Result<BasicGasEstimates, PortError> {
        let now = self.clock.now_ms()?;
        let cached = {
            let state = self.lock_state()?;
            if self.is_fresh(state.basic_retrieved_at_ms, now) {
                state.basic.clone()
            } else {
                None
            }
        };
        if let Some(basic) = cached {
            tracing::debug!("serving cached basic gas/time estimates");
            return Ok(basic);
        }

        let _loading = LoadingFlag::raise(&self.state, |state| &mut state.basic_loading)?;
        let basic = self.fetch_external_basic().await?;

        let mut state = self.lock_state()?;
        state.basic_retrieved_at_ms = Some(now);
        state.basic = Some(basic.clone());
        Ok(basic)
    }

    /// Cached estimates are only reused for the block time they were
    /// computed with.
    async fn fetch_gas_estimates(
        &self,
        block_time_secs: f64,
    ) -> Result<Vec<PriceAndTimeEstimate>, PortError> {
        let now = self.clock.now_ms()?;
        let cached = {
            let state = self.lock_state()?;
            let fresh = self.is_fresh(state.price_and_time_retrieved_at_ms, now)
                && state.price_and_time_block_time_secs == Some(block_time_secs)
                && !state.price_and_time.is_empty();
            fresh.then(|| state.price_and_time.clone())
        };
        if let Some(estimates) = cached {
            tracing::debug!("serving cached gas price estimates");
            return Ok(estimates);
        }

        let _loading = LoadingFlag::raise(&self.state, |state| &mut state.estimates_loading)?;
        let estimates = self.fetch_external_estimates(block_time_secs).await?;

        let mut state = self.lock_state()?;
        state.price_and_time_retrieved_at_ms = Some(now);
        state.price_and_time_block_time_secs = Some(block_time_secs);
        state.price_and_time = estimates.clone();
        Ok(estimates)
    }
}

/// Holds a loading flag up while a fetch is in flight. Lowered on drop, so a
/// fetch dropped mid-request by a cancelled chain still clears it.
struct LoadingFlag<'a> {
    state: &'a Mutex<GasState>,
    flag: fn(&mut GasState) -> &mut bool,
}

impl<'a> LoadingFlag<'a> {
    fn raise(
        state: &'a Mutex<GasState>,
        flag: fn(&mut GasState) -> &mut bool,
    ) -> Result<Self, PortError> {
        let mut guard = state
            .lock()
            .map_err(|_| PortError::Poisoned("gas_station.state"))?;
        *flag(&mut *guard) = true;
        Ok(Self { state, flag })
    }
}

impl Drop for LoadingFlag<'_> {
    fn drop(&mut self) {
        if let Ok(mut state) = self.state.lock() {
            *(self.flag)(&mut *state) = false;
        }
    }
}
