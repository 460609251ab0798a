//! Shared baseline-versus-scenario delta helper.

use serde::{Deserialize, Serialize};

use crate::guard::pct_change;

/// Whether an increase in a metric is good or bad for the business.
/// Risk-type metrics (stockout risk) are the only ones where an increase
/// is unfavorable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MetricDirection {
    HigherIsBetter,
    LowerIsBetter,
}

/// A paired baseline/scenario metric with its delta and favorability.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MetricDelta {
    pub name: String,
    pub baseline: f64,
    pub scenario: f64,
    /// `scenario - baseline`, always.
    pub delta: f64,
    /// Percent change over baseline; 0 when the baseline is zero.
    pub pct: f64,
    /// True when the delta moves the metric in its good direction.
    pub favorable: bool,
}

/// Build a delta record for one paired metric.
pub fn metric_delta(
    name: &str,
    baseline: f64,
    scenario: f64,
    direction: MetricDirection,
) -> MetricDelta {
    let delta = scenario - baseline;
    let favorable = match direction {
        MetricDirection::HigherIsBetter => delta >= 0.0,
        MetricDirection::LowerIsBetter => delta <= 0.0,
    };
    MetricDelta {
        name: name.to_string(),
        baseline,
        scenario,
        delta,
        pct: pct_change(baseline, scenario),
        favorable,
    }
}
