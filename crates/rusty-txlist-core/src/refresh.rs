use thiserror::Error;
use tokio_util::sync::CancellationToken;

use crate::domain::{BasicGasEstimates, PriceAndTimeEstimate};
use crate::ports::{GasEstimatePort, PortError};

#[derive(Debug, Clone, PartialEq)]
pub enum RefreshOutcome {
    Completed {
        basic: BasicGasEstimates,
        estimates: Vec<PriceAndTimeEstimate>,
    },
    Cancelled,
}

#[derive(Debug, Error)]
pub enum RefreshError {
    #[error("basic gas/time estimate fetch failed: {0}")]
    Basic(#[source] PortError),
    #[error("gas estimate fetch failed: {0}")]
    Estimates(#[source] PortError),
}

/// Fetches basic estimates, then the block-time qualified estimates.
///
/// Both steps race `cancel`; a cancelled chain issues no further request.
pub async fn run_estimate_refresh<G>(
    gas: &G,
    cancel: &CancellationToken,
) -> Result<RefreshOutcome, RefreshError>
where
    G: GasEstimatePort,
{
    if cancel.is_cancelled() {
        return Ok(RefreshOutcome::Cancelled);
    }

    let basic = tokio::select! {
        biased;
        _ = cancel.cancelled() => return Ok(RefreshOutcome::Cancelled),
        basic = gas.fetch_basic_gas_and_time_estimates() => basic.map_err(RefreshError::Basic)?,
    };

    if cancel.is_cancelled() {
        return Ok(RefreshOutcome::Cancelled);
    }

    let estimates = tokio::select! {
        biased;
        _ = cancel.cancelled() => return Ok(RefreshOutcome::Cancelled),
        estimates = gas.fetch_gas_estimates(basic.block_time_secs) => {
            estimates.map_err(RefreshError::Estimates)?
        }
    };

    Ok(RefreshOutcome::Completed { basic, estimates })
}
