//! Gas-station prediction table to price/time estimates.

use crate::domain::{PredictionRow, PriceAndTimeEstimate};

/// Gas-station reports prices in tenths of a gwei.
pub const GAS_STATION_PRICE_SCALE: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq)]
struct WaitPoint {
    expected_wait: f64,
    gasprice: f64,
}

pub fn price_and_time_estimates(
    rows: &[PredictionRow],
    block_time_secs: f64,
) -> Vec<PriceAndTimeEstimate> {
    let unique = unique_by_expected_time(rows);
    let supplemented = with_supplemental_points(&unique);
    inliers_by_iqr(&supplemented)
        .into_iter()
        .map(|point| PriceAndTimeEstimate {
            expected_time_secs: point.expected_wait * block_time_secs,
            gas_price_gwei: point.gasprice,
        })
        .collect()
}

pub fn scale_gas_station_price(raw: f64) -> f64 {
    raw / GAS_STATION_PRICE_SCALE
}

fn unique_by_expected_time(rows: &[PredictionRow]) -> Vec<WaitPoint> {
    let mut seen: Vec<f64> = Vec::with_capacity(rows.len());
    let mut points = Vec::with_capacity(rows.len());
    for row in rows {
        if seen.contains(&row.expected_time) {
            continue;
        }
        seen.push(row.expected_time);
        points.push(WaitPoint {
            expected_wait: row.expected_wait,
            gasprice: row.gasprice,
        });
    }
    points
}

fn with_supplemental_points(points: &[WaitPoint]) -> Vec<WaitPoint> {
    let mut out = Vec::with_capacity(points.len() * 3);
    for (index, point) in points.iter().enumerate() {
        out.push(*point);
        let Some(next) = points.get(index + 1) else {
            continue;
        };
        if next.gasprice == point.gasprice {
            continue;
        }
        for fraction in [1.0 / 3.0, 2.0 / 3.0] {
            let gasprice = point.gasprice + (next.gasprice - point.gasprice) * fraction;
            out.push(WaitPoint {
                expected_wait: extrapolate_y(*point, *next, gasprice),
                gasprice,
            });
        }
    }
    out
}

/// Point on the line through `lower` and `higher` at gas price `x`.
pub(crate) fn extrapolate_y_at(
    lower: (f64, f64),
    higher: (f64, f64),
    x: f64,
) -> f64 {
    let (lower_x, lower_y) = lower;
    let (higher_x, higher_y) = higher;
    let slope = (higher_y - lower_y) / (higher_x - lower_x);
    higher_y - slope * (higher_x - x)
}

fn extrapolate_y(lower: WaitPoint, higher: WaitPoint, x: f64) -> f64 {
    extrapolate_y_at(
        (lower.gasprice, lower.expected_wait),
        (higher.gasprice, higher.expected_wait),
        x,
    )
}

fn inliers_by_iqr(points: &[WaitPoint]) -> Vec<WaitPoint> {
    let mut waits: Vec<f64> = points.iter().map(|p| p.expected_wait).collect();
    if waits.is_empty() {
        return Vec::new();
    }
    waits.sort_by(f64::total_cmp);
    let q1 = quartile(&waits, 0.25);
    let q3 = quartile(&waits, 0.75);
    let iqr = q3 - q1;
    let lower_fence = q1 - 1.5 * iqr;
    let upper_fence = q3 + 1.5 * iqr;
    points
        .iter()
        .copied()
        .filter(|p| p.expected_wait >= lower_fence && p.expected_wait <= upper_fence)
        .collect()
}

/// Linear-interpolated quantile of an ascending, non-empty slice.
pub(crate) fn quartile(sorted: &[f64], q: f64) -> f64 {
    let pos = (sorted.len() - 1) as f64 * q;
    let base = pos.floor() as usize;
    let rest = pos - base as f64;
    match sorted.get(base + 1) {
        Some(next) => sorted[base] + rest * (next - sorted[base]),
        None => sorted[base],
    }
}
