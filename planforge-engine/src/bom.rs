//! BOM explosion aggregator.
//!
//! Explodes per-SKU scenario demand into component-level demand via each
//! SKU's bill of materials. The correctness property that matters here is
//! additive accumulation: a component consumed by several parent SKUs must
//! end up with the exact sum of `demand x qty_per_unit` over all parents.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::guard::pct_change;
use crate::sku::SkuImpact;

/// One line of a SKU's bill of materials.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BomLine {
    pub component_id: String,
    pub description: String,
    /// Component units consumed per finished unit.
    pub qty_per_unit: f64,
    pub supplier: String,
    pub unit_cost: f64,
}

/// Aggregated component demand across all parent SKUs.
///
/// Supplier and unit cost attribution is single-valued: the first parent
/// SKU to reference a component wins. A component sourced from several
/// suppliers keeps only the first one seen. Known simplification, kept
/// intentionally.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ComponentImpact {
    pub component_id: String,
    pub description: String,
    pub baseline_req: f64,
    pub scenario_req: f64,
    pub delta: f64,
    /// Percent change over baseline; 0 when the baseline requirement is 0.
    pub delta_pct: f64,
    pub supplier: String,
    pub unit_cost: f64,
}

/// Explosion output: aggregated component impacts plus the SKUs that had
/// no BOM entry and were skipped.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ExplosionResult {
    pub impacts: Vec<ComponentImpact>,
    pub skipped_skus: Vec<String>,
}

/// Explode SKU impacts into component impacts.
///
/// SKUs missing from the BOM map are skipped and listed in the result;
/// partial reference data degrades the output, it never fails it.
/// Component order is first-encounter order, which makes the output
/// deterministic for a given input order.
pub fn explode(impacts: &[SkuImpact], boms: &HashMap<String, Vec<BomLine>>) -> ExplosionResult {
    let mut order: Vec<String> = Vec::new();
    let mut acc: HashMap<String, ComponentImpact> = HashMap::new();
    let mut skipped_skus = Vec::new();

    for sku in impacts {
        let Some(lines) = boms.get(&sku.sku) else {
            skipped_skus.push(sku.sku.clone());
            continue;
        };
        for line in lines {
            let entry = acc.entry(line.component_id.clone()).or_insert_with(|| {
                order.push(line.component_id.clone());
                ComponentImpact {
                    component_id: line.component_id.clone(),
                    description: line.description.clone(),
                    baseline_req: 0.0,
                    scenario_req: 0.0,
                    delta: 0.0,
                    delta_pct: 0.0,
                    // First-writer attribution.
                    supplier: line.supplier.clone(),
                    unit_cost: line.unit_cost,
                }
            });
            entry.baseline_req += sku.baseline_demand * line.qty_per_unit;
            entry.scenario_req += sku.scenario_demand * line.qty_per_unit;
        }
    }

    let impacts = order
        .into_iter()
        .filter_map(|component_id| acc.remove(&component_id))
        .map(|mut impact| {
            impact.delta = impact.scenario_req - impact.baseline_req;
            impact.delta_pct = pct_change(impact.baseline_req, impact.scenario_req);
            impact
        })
        .collect();

    ExplosionResult {
        impacts,
        skipped_skus,
    }
}
