//! Portfolio rollup over working capital decompositions.

use serde::{Deserialize, Serialize};

use crate::guard::finite_or_zero;
use crate::working_capital::{HealthStatus, WcDecomposition};

/// Portfolio totals over a set of decompositions. Critical and DeadStock
/// positions are merged into one critical count; dead stock is the most
/// critical state a position can be in.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct WcSummary {
    pub record_count: usize,

    pub total_wc_value: f64,
    pub total_cycle_stock: f64,
    pub total_safety_stock: f64,
    pub total_pipeline_stock: f64,
    pub total_excess_stock: f64,
    pub total_savings_opportunity: f64,
    pub total_carrying_cost_savings: f64,

    pub avg_wcp: f64,
    /// Rounded mean DIO across all records.
    pub avg_dio: u32,

    pub excellent_count: usize,
    pub good_count: usize,
    pub at_risk_count: usize,
    /// Critical + DeadStock.
    pub critical_count: usize,
}

/// Roll a decomposition collection into portfolio totals.
///
/// Empty input yields the all-zero summary; the averages never divide by
/// zero.
pub fn summarize(rows: &[WcDecomposition]) -> WcSummary {
    if rows.is_empty() {
        return WcSummary::default();
    }

    let mut summary = WcSummary {
        record_count: rows.len(),
        ..WcSummary::default()
    };
    let mut wcp_sum = 0.0;
    let mut dio_sum = 0u64;

    for row in rows {
        summary.total_wc_value += row.total_wc_value;
        summary.total_cycle_stock += row.cycle_stock_value;
        summary.total_safety_stock += row.safety_stock_value;
        summary.total_pipeline_stock += row.pipeline_stock_value;
        summary.total_excess_stock += row.excess_stock_value;
        summary.total_savings_opportunity += row.savings_opportunity;
        summary.total_carrying_cost_savings += row.carrying_cost_savings;
        wcp_sum += row.wcp;
        dio_sum += u64::from(row.dio);

        match row.health_status {
            HealthStatus::Excellent => summary.excellent_count += 1,
            HealthStatus::Good => summary.good_count += 1,
            HealthStatus::AtRisk => summary.at_risk_count += 1,
            HealthStatus::Critical | HealthStatus::DeadStock => summary.critical_count += 1,
        }
    }

    let n = rows.len() as f64;
    summary.avg_wcp = finite_or_zero(wcp_sum / n);
    summary.avg_dio = (dio_sum as f64 / n).round() as u32;
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::working_capital::{decompose, AbcClass, InventoryRecord, MaterialTier, XyzClass};

    fn make_record(sku: &str, total: f64, excess: f64, turns: f64, dos: f64) -> InventoryRecord {
        InventoryRecord {
            sku: sku.to_string(),
            plant: "plant-01".to_string(),
            total_stock: total,
            turns,
            days_of_supply: dos,
            fill_rate: 96.0,
            abc_class: AbcClass::B,
            xyz_class: XyzClass::Y,
            lead_time_days: 30.0,
            lot_size: 500.0,
            daily_demand: 50.0,
            unit_cost: 3.0,
            margin_rate: 0.30,
            carrying_cost_rate: 0.20,
            excess_stock_value: excess,
            material_tier: MaterialTier::Finished,
        }
    }

    #[test]
    fn empty_input_yields_all_zero_summary() {
        let summary = summarize(&[]);
        assert_eq!(summary, WcSummary::default());
        assert_eq!(summary.avg_dio, 0);
        assert_eq!(summary.avg_wcp, 0.0);
    }

    #[test]
    fn totals_are_component_sums() {
        let rows: Vec<WcDecomposition> = vec![
            decompose(&make_record("A", 100_000.0, 5_000.0, 5.0, 60.0)),
            decompose(&make_record("B", 50_000.0, 2_000.0, 4.0, 80.0)),
        ];
        let summary = summarize(&rows);
        assert_eq!(summary.record_count, 2);
        assert!((summary.total_wc_value - 150_000.0).abs() < 1e-6);
        assert!((summary.total_excess_stock - 7_000.0).abs() < 1e-6);
        let parts = summary.total_cycle_stock
            + summary.total_safety_stock
            + summary.total_pipeline_stock
            + summary.total_excess_stock;
        assert!((parts - summary.total_wc_value).abs() < 1e-6);
    }

    #[test]
    fn critical_and_dead_stock_share_one_bucket() {
        let rows = vec![
            // excess ratio 0.25 -> Critical
            decompose(&make_record("A", 100_000.0, 25_000.0, 5.0, 60.0)),
            // days of supply 400 -> DeadStock
            decompose(&make_record("B", 100_000.0, 0.0, 5.0, 400.0)),
            // clean position -> Good or Excellent
            decompose(&make_record("C", 100_000.0, 0.0, 5.0, 60.0)),
        ];
        let summary = summarize(&rows);
        assert_eq!(summary.critical_count, 2);
        assert_eq!(
            summary.excellent_count + summary.good_count + summary.at_risk_count,
            1
        );
    }

    #[test]
    fn averages_are_means_over_records() {
        let rows = vec![
            decompose(&make_record("A", 100_000.0, 0.0, 5.0, 60.0)), // dio 73
            decompose(&make_record("B", 100_000.0, 0.0, 4.0, 60.0)), // dio 91
        ];
        let summary = summarize(&rows);
        assert_eq!(summary.avg_dio, 82);
        let expected_wcp = (rows[0].wcp + rows[1].wcp) / 2.0;
        assert!((summary.avg_wcp - expected_wcp).abs() < 1e-9);
    }
}
