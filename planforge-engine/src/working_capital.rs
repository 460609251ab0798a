//! Working capital decomposition engine.
//!
//! Pure per-record transform: one inventory fact in, one decomposition out.
//! The inventory value is split into cycle, safety, pipeline and excess
//! stock so that the four parts reconstruct the total exactly, then scored
//! for productivity (WCP), days outstanding (DIO), reduction potential and
//! a health bucket.
//!
//! Excess stock value is a source fact, never derived here. The cycle,
//! safety and pipeline parts are carved out of `(total - excess)`, which is
//! what keeps the sum invariant exact.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::guard::{finite_or_zero, ratio_or_zero};
use crate::tunables::{
    CYCLE_SHARE_FINISHED, CYCLE_SHARE_RAW, CYCLE_SHARE_SEMI_FINISHED, DEAD_STOCK_DOS,
    DIO_SENTINEL, EXCESS_RATIO_AT_RISK, EXCESS_RATIO_CRITICAL, OPTIMAL_CYCLE_FACTOR,
    OPTIMAL_SAFETY_FACTOR, PIPELINE_LEAD_OFFSET, TARGET_TURNS_FINISHED, TARGET_TURNS_RAW,
    TARGET_TURNS_SEMI_FINISHED, WCP_AT_RISK, WCP_EXCELLENT,
};

/// Material tier of an inventory position. Drives the cycle/safety split
/// and the turns target used by health classification.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MaterialTier {
    Finished,
    SemiFinished,
    Raw,
}

impl MaterialTier {
    /// Cycle share of the reducible base net of pipeline stock. The safety
    /// share is the complement, so the two always sum to 1.
    pub fn cycle_share(&self) -> f64 {
        match self {
            MaterialTier::Finished => CYCLE_SHARE_FINISHED,
            MaterialTier::SemiFinished => CYCLE_SHARE_SEMI_FINISHED,
            MaterialTier::Raw => CYCLE_SHARE_RAW,
        }
    }

    /// Annual turns a healthy position of this tier should achieve.
    pub fn target_turns(&self) -> f64 {
        match self {
            MaterialTier::Finished => TARGET_TURNS_FINISHED,
            MaterialTier::SemiFinished => TARGET_TURNS_SEMI_FINISHED,
            MaterialTier::Raw => TARGET_TURNS_RAW,
        }
    }
}

/// ABC value class of a position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AbcClass {
    A,
    B,
    C,
}

/// XYZ demand-variability class of a position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum XyzClass {
    X,
    Y,
    Z,
}

/// Source inventory fact for one SKU at one plant.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct InventoryRecord {
    pub sku: String,
    pub plant: String,
    /// Total inventory value on hand, in currency units.
    pub total_stock: f64,
    /// Annual inventory turns.
    pub turns: f64,
    pub days_of_supply: f64,
    pub fill_rate: f64,
    pub abc_class: AbcClass,
    pub xyz_class: XyzClass,
    pub lead_time_days: f64,
    pub lot_size: f64,
    pub daily_demand: f64,
    pub unit_cost: f64,
    /// Gross margin rate on the item, 0.0–1.0.
    pub margin_rate: f64,
    /// Annual carrying cost rate, 0.0–1.0.
    pub carrying_cost_rate: f64,
    /// Excess/obsolete value, a source fact — never derived here.
    pub excess_stock_value: f64,
    pub material_tier: MaterialTier,
}

/// Health bucket for a decomposed position. Classification is strict
/// first-match in declaration order: DeadStock wins over Critical, and so
/// on down to Good.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HealthStatus {
    DeadStock,
    Critical,
    AtRisk,
    Excellent,
    Good,
}

impl fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HealthStatus::DeadStock => write!(f, "Dead Stock"),
            HealthStatus::Critical => write!(f, "Critical"),
            HealthStatus::AtRisk => write!(f, "At Risk"),
            HealthStatus::Excellent => write!(f, "Excellent"),
            HealthStatus::Good => write!(f, "Good"),
        }
    }
}

/// Working capital decomposition for one SKU×plant position.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WcDecomposition {
    pub sku: String,
    pub plant: String,

    pub cycle_stock_value: f64,
    pub safety_stock_value: f64,
    pub pipeline_stock_value: f64,
    pub excess_stock_value: f64,
    /// Always `cycle + safety + pipeline + excess`.
    pub total_wc_value: f64,

    pub cycle_pct: f64,
    pub safety_pct: f64,
    pub pipeline_pct: f64,
    pub excess_pct: f64,

    pub health_status: HealthStatus,
    /// Annual gross margin per currency unit of working capital.
    pub wcp: f64,
    /// Days inventory outstanding; 999 sentinel when turns are zero.
    pub dio: u32,

    pub optimal_cycle_stock: f64,
    pub optimal_safety_stock: f64,
    /// Optimal cycle + optimal safety + pipeline. Pipeline stock is in
    /// transit and treated as non-reducible.
    pub optimal_total_wc: f64,
    pub savings_opportunity: f64,
    pub carrying_cost_savings: f64,
}

/// Decompose one inventory fact into its working capital structure.
///
/// Degradations instead of failures: non-finite inputs are zeroed, a zero
/// total produces an all-zero decomposition with zero-sentinel ratios, zero
/// turns produce the DIO sentinel, and excess beyond the recorded total is
/// capped at the total so the sum invariant still holds.
pub fn decompose(record: &InventoryRecord) -> WcDecomposition {
    let total = finite_or_zero(record.total_stock).max(0.0);
    let excess = finite_or_zero(record.excess_stock_value).clamp(0.0, total);
    let lead = finite_or_zero(record.lead_time_days).max(0.0);

    // Cycle/safety/pipeline carve up the reducible base (total - excess).
    let reducible = total - excess;
    let pipeline_share = ratio_or_zero(lead, lead + PIPELINE_LEAD_OFFSET);
    let pipeline = reducible * pipeline_share;
    let remainder = reducible - pipeline;
    let cycle = remainder * record.material_tier.cycle_share();
    // Exact complement, so cycle + safety == remainder to the last bit.
    let safety = remainder - cycle;

    let total_wc = cycle + safety + pipeline + excess;

    let annual_gross_margin = finite_or_zero(
        record.daily_demand * 365.0 * record.unit_cost * record.margin_rate,
    );
    let wcp = ratio_or_zero(annual_gross_margin, total_wc);

    let turns = finite_or_zero(record.turns);
    let dio = if turns > 0.0 {
        finite_or_zero(365.0 / turns).round() as u32
    } else {
        DIO_SENTINEL
    };

    let optimal_safety = safety * OPTIMAL_SAFETY_FACTOR;
    let optimal_cycle = cycle * OPTIMAL_CYCLE_FACTOR;
    let optimal_total = optimal_cycle + optimal_safety + pipeline;
    let savings = (total_wc - optimal_total).max(0.0);
    let carrying_savings =
        finite_or_zero(savings * finite_or_zero(record.carrying_cost_rate).max(0.0));

    let excess_ratio = ratio_or_zero(excess, total_wc);
    let health_status = classify_health(record, turns, wcp, excess_ratio);

    WcDecomposition {
        sku: record.sku.clone(),
        plant: record.plant.clone(),
        cycle_stock_value: cycle,
        safety_stock_value: safety,
        pipeline_stock_value: pipeline,
        excess_stock_value: excess,
        total_wc_value: total_wc,
        cycle_pct: ratio_or_zero(cycle, total_wc) * 100.0,
        safety_pct: ratio_or_zero(safety, total_wc) * 100.0,
        pipeline_pct: ratio_or_zero(pipeline, total_wc) * 100.0,
        excess_pct: excess_ratio * 100.0,
        health_status,
        wcp,
        dio,
        optimal_cycle_stock: optimal_cycle,
        optimal_safety_stock: optimal_safety,
        optimal_total_wc: optimal_total,
        savings_opportunity: savings,
        carrying_cost_savings: carrying_savings,
    }
}

/// Strict first-match health classification.
fn classify_health(
    record: &InventoryRecord,
    turns: f64,
    wcp: f64,
    excess_ratio: f64,
) -> HealthStatus {
    if finite_or_zero(record.days_of_supply) > DEAD_STOCK_DOS {
        HealthStatus::DeadStock
    } else if excess_ratio > EXCESS_RATIO_CRITICAL || turns < 1.0 {
        HealthStatus::Critical
    } else if excess_ratio > EXCESS_RATIO_AT_RISK || turns < 2.0 || wcp < WCP_AT_RISK {
        HealthStatus::AtRisk
    } else if wcp >= WCP_EXCELLENT && turns >= record.material_tier.target_turns() {
        HealthStatus::Excellent
    } else {
        HealthStatus::Good
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_record(total: f64, excess: f64, turns: f64) -> InventoryRecord {
        InventoryRecord {
            sku: "FG-1000".to_string(),
            plant: "plant-01".to_string(),
            total_stock: total,
            turns,
            days_of_supply: 60.0,
            fill_rate: 96.0,
            abc_class: AbcClass::A,
            xyz_class: XyzClass::X,
            lead_time_days: 30.0,
            lot_size: 500.0,
            daily_demand: 120.0,
            unit_cost: 4.0,
            margin_rate: 0.35,
            carrying_cost_rate: 0.22,
            excess_stock_value: excess,
            material_tier: MaterialTier::Finished,
        }
    }

    #[test]
    fn parts_reconstruct_total_exactly() {
        let d = decompose(&make_record(100_000.0, 12_000.0, 5.0));
        let sum = d.cycle_stock_value
            + d.safety_stock_value
            + d.pipeline_stock_value
            + d.excess_stock_value;
        assert!((sum - d.total_wc_value).abs() < 1e-9);
        assert!((d.total_wc_value - 100_000.0).abs() < 1e-9);
        // Percentages sum to 100 within rounding tolerance of 4 terms.
        let pct = d.cycle_pct + d.safety_pct + d.pipeline_pct + d.excess_pct;
        assert!((pct - 100.0).abs() < 1e-6);
    }

    #[test]
    fn excess_is_carried_verbatim() {
        let d = decompose(&make_record(100_000.0, 12_000.0, 5.0));
        assert_eq!(d.excess_stock_value, 12_000.0);
    }

    #[test]
    fn pipeline_share_saturates_with_lead_time() {
        let mut short = make_record(100_000.0, 0.0, 5.0);
        short.lead_time_days = 10.0;
        let mut long = make_record(100_000.0, 0.0, 5.0);
        long.lead_time_days = 180.0;
        let d_short = decompose(&short);
        let d_long = decompose(&long);
        // lead/(lead+60): 10 days -> 1/7 of reducible; 180 days -> 3/4.
        assert!((d_short.pipeline_stock_value - 100_000.0 / 7.0).abs() < 1e-6);
        assert!((d_long.pipeline_stock_value - 75_000.0).abs() < 1e-6);
        assert!(d_long.pipeline_stock_value > d_short.pipeline_stock_value);
    }

    #[test]
    fn finished_tier_splits_cycle_sixty_forty() {
        let mut record = make_record(100_000.0, 0.0, 5.0);
        record.lead_time_days = 0.0; // no pipeline stock
        let d = decompose(&record);
        assert!((d.cycle_stock_value - 60_000.0).abs() < 1e-9);
        assert!((d.safety_stock_value - 40_000.0).abs() < 1e-9);
    }

    #[test]
    fn high_excess_ratio_is_critical_regardless_of_turns() {
        // 25,000 / 100,000 = 0.25 > 0.20
        let d = decompose(&make_record(100_000.0, 25_000.0, 12.0));
        assert_eq!(d.health_status, HealthStatus::Critical);
    }

    #[test]
    fn zero_turns_yields_dio_sentinel_without_error() {
        let d = decompose(&make_record(100_000.0, 0.0, 0.0));
        assert_eq!(d.dio, 999);
        // Zero turns also means Critical (turns < 1).
        assert_eq!(d.health_status, HealthStatus::Critical);
    }

    #[test]
    fn dead_stock_wins_over_critical() {
        let mut record = make_record(100_000.0, 30_000.0, 0.5);
        record.days_of_supply = 400.0;
        let d = decompose(&record);
        assert_eq!(d.health_status, HealthStatus::DeadStock);
    }

    #[test]
    fn moderate_excess_or_low_wcp_is_at_risk() {
        // excess ratio 0.15 sits between the 0.10 and 0.20 thresholds.
        let d = decompose(&make_record(100_000.0, 15_000.0, 5.0));
        assert_eq!(d.health_status, HealthStatus::AtRisk);

        // Low-margin position: wcp below 2 despite clean stock.
        let mut thin = make_record(100_000.0, 0.0, 3.0);
        thin.daily_demand = 10.0;
        thin.margin_rate = 0.10;
        let d = decompose(&thin);
        assert!(d.wcp < 2.0);
        assert_eq!(d.health_status, HealthStatus::AtRisk);
    }

    #[test]
    fn excellent_needs_wcp_and_tier_turns() {
        // daily 120 x 365 x $4 x 0.35 = $61,320 annual margin on $10,000 WC
        let mut record = make_record(10_000.0, 0.0, 5.0);
        record.daily_demand = 120.0;
        let d = decompose(&record);
        assert!(d.wcp >= 4.0);
        assert_eq!(d.health_status, HealthStatus::Excellent);

        // Same economics on a raw-material position: target turns are 8,
        // so 5 turns only rates Good.
        let mut raw = make_record(10_000.0, 0.0, 5.0);
        raw.material_tier = MaterialTier::Raw;
        let d = decompose(&raw);
        assert_eq!(d.health_status, HealthStatus::Good);
    }

    #[test]
    fn wcp_formula_matches_definition() {
        let record = make_record(100_000.0, 0.0, 5.0);
        let d = decompose(&record);
        let expected = 120.0 * 365.0 * 4.0 * 0.35 / 100_000.0;
        assert!((d.wcp - expected).abs() < 1e-9);
    }

    #[test]
    fn dio_rounds_from_turns() {
        let d = decompose(&make_record(100_000.0, 0.0, 6.0));
        assert_eq!(d.dio, 61); // 365/6 = 60.83
        let d = decompose(&make_record(100_000.0, 0.0, 4.0));
        assert_eq!(d.dio, 91);
    }

    #[test]
    fn savings_hold_pipeline_fixed() {
        let d = decompose(&make_record(100_000.0, 10_000.0, 5.0));
        let expected_optimal = d.cycle_stock_value * 0.90
            + d.safety_stock_value * 0.85
            + d.pipeline_stock_value;
        assert!((d.optimal_total_wc - expected_optimal).abs() < 1e-9);
        assert!((d.savings_opportunity - (d.total_wc_value - expected_optimal)).abs() < 1e-9);
        assert!((d.carrying_cost_savings - d.savings_opportunity * 0.22).abs() < 1e-9);
        assert!(d.savings_opportunity >= 0.0);
    }

    #[test]
    fn zero_total_degrades_to_all_zero() {
        let d = decompose(&make_record(0.0, 0.0, 5.0));
        assert_eq!(d.total_wc_value, 0.0);
        assert_eq!(d.cycle_pct, 0.0);
        assert_eq!(d.wcp, 0.0);
        assert_eq!(d.savings_opportunity, 0.0);
    }

    #[test]
    fn excess_beyond_total_is_capped_to_preserve_invariant() {
        let d = decompose(&make_record(50_000.0, 80_000.0, 5.0));
        assert_eq!(d.excess_stock_value, 50_000.0);
        let sum = d.cycle_stock_value
            + d.safety_stock_value
            + d.pipeline_stock_value
            + d.excess_stock_value;
        assert!((sum - d.total_wc_value).abs() < 1e-9);
    }

    #[test]
    fn non_finite_inputs_never_reach_output() {
        let mut record = make_record(100_000.0, 10_000.0, 5.0);
        record.daily_demand = f64::NAN;
        record.lead_time_days = f64::INFINITY;
        let d = decompose(&record);
        for v in [
            d.cycle_stock_value,
            d.safety_stock_value,
            d.pipeline_stock_value,
            d.total_wc_value,
            d.wcp,
            d.savings_opportunity,
            d.carrying_cost_savings,
        ] {
            assert!(v.is_finite());
        }
    }

    #[test]
    fn decomposition_is_idempotent() {
        let record = make_record(123_456.0, 7_890.0, 3.3);
        assert_eq!(decompose(&record), decompose(&record));
    }
}
