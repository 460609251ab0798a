//! Aggregate impact calculator.
//!
//! Applies the composed scenario multipliers to a fixed set of baseline
//! aggregates. The service-degradation curves are keyed only to the POS
//! growth magnitude. That is a deliberate business rule carried over from
//! the planning reference model, not an approximation to improve on.

use serde::{Deserialize, Serialize};

use crate::delta::{metric_delta, MetricDelta, MetricDirection};
use crate::drivers::ScenarioComposite;
use crate::guard::finite_or;
use crate::tunables::{
    CASH_BUFFER, FILL_RATE_DEGRADATION, INVENTORY_BUFFER, PREMIUM_REVENUE_LIFT,
    SERVICE_FLOOR, SERVICE_LEVEL_DEGRADATION, STOCKOUT_RISK_CAP, STOCKOUT_RISK_DEGRADATION,
};

/// Fixed reference aggregates for a planning scope. Never derived; supplied
/// by the baseline-facts provider.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BaselineMetrics {
    pub total_pos: f64,
    pub total_revenue: f64,
    pub fg_inventory_req: f64,
    pub component_req: f64,
    pub cash_impact: f64,
    /// Percent, 0–100.
    pub fill_rate: f64,
    /// Percent, 0–100.
    pub service_level: f64,
    /// Percent, 0–100.
    pub stockout_risk: f64,
}

/// Recomputed scenario aggregates. Ephemeral by contract: recomputed on
/// every input change and never persisted as a new baseline.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ScenarioMetrics {
    pub total_pos: f64,
    pub total_revenue: f64,
    pub fg_inventory_req: f64,
    pub component_req: f64,
    pub cash_impact: f64,
    pub fill_rate: f64,
    pub service_level: f64,
    pub stockout_risk: f64,
}

impl ScenarioMetrics {
    /// Pair every scenario field against its baseline. Stockout risk is the
    /// one risk-type field where an increase is unfavorable.
    pub fn deltas(&self, baseline: &BaselineMetrics) -> Vec<MetricDelta> {
        use MetricDirection::{HigherIsBetter, LowerIsBetter};
        vec![
            metric_delta("total_pos", baseline.total_pos, self.total_pos, HigherIsBetter),
            metric_delta("total_revenue", baseline.total_revenue, self.total_revenue, HigherIsBetter),
            metric_delta("fg_inventory_req", baseline.fg_inventory_req, self.fg_inventory_req, HigherIsBetter),
            metric_delta("component_req", baseline.component_req, self.component_req, HigherIsBetter),
            metric_delta("cash_impact", baseline.cash_impact, self.cash_impact, HigherIsBetter),
            metric_delta("fill_rate", baseline.fill_rate, self.fill_rate, HigherIsBetter),
            metric_delta("service_level", baseline.service_level, self.service_level, HigherIsBetter),
            metric_delta("stockout_risk", baseline.stockout_risk, self.stockout_risk, LowerIsBetter),
        ]
    }
}

/// Project baseline aggregates under a composed scenario.
///
/// `pos_growth` is the (already clamped) POS growth driver in percent; its
/// magnitude alone drives the fill-rate/service-level/stockout curves.
pub fn project_aggregates(
    baseline: &BaselineMetrics,
    composite: &ScenarioComposite,
    pos_growth: f64,
) -> ScenarioMetrics {
    let m = composite.demand_multiplier;
    let revenue_lift = 1.0 + composite.premium_mix_fraction * PREMIUM_REVENUE_LIFT;
    let stress = pos_growth.abs();

    ScenarioMetrics {
        total_pos: round_finite(baseline.total_pos * m),
        total_revenue: round_finite(baseline.total_revenue * m * revenue_lift),
        fg_inventory_req: round_finite(baseline.fg_inventory_req * m * INVENTORY_BUFFER),
        component_req: round_finite(baseline.component_req * m * INVENTORY_BUFFER),
        cash_impact: round_finite(baseline.cash_impact * m * CASH_BUFFER),
        fill_rate: finite_or(
            (baseline.fill_rate - stress * FILL_RATE_DEGRADATION).max(SERVICE_FLOOR),
            SERVICE_FLOOR,
        ),
        service_level: finite_or(
            (baseline.service_level - stress * SERVICE_LEVEL_DEGRADATION).max(SERVICE_FLOOR),
            SERVICE_FLOOR,
        ),
        stockout_risk: finite_or(
            (baseline.stockout_risk + stress * STOCKOUT_RISK_DEGRADATION).min(STOCKOUT_RISK_CAP),
            STOCKOUT_RISK_CAP,
        ),
    }
}

fn round_finite(value: f64) -> f64 {
    finite_or(value, 0.0).round()
}
