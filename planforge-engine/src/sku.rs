//! SKU impact expander.
//!
//! Distributes the composed demand multiplier across individual products.
//! Each product carries its own independent baseline demand; the aggregate
//! baseline is not apportioned down to SKUs.

use serde::{Deserialize, Serialize};

use crate::drivers::ScenarioComposite;
use crate::guard::finite_or_zero;
use crate::tunables::{PREMIUM_DEMAND_KICKER, SKU_INVENTORY_FACTOR};

/// Demand-elasticity class of a product. Premium SKUs respond to the
/// premium mix driver on top of the base multiplier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElasticityClass {
    Premium,
    Standard,
}

/// A finished product in the planning scope.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Product {
    pub sku: String,
    pub name: String,
    pub category: String,
    pub unit_price: f64,
    /// Units per planning horizon, independent of the aggregate baseline.
    pub baseline_demand: f64,
    pub elasticity: ElasticityClass,
}

/// Scenario impact for a single SKU. Feeds the BOM explosion stage.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SkuImpact {
    pub sku: String,
    pub name: String,
    pub category: String,
    pub baseline_demand: f64,
    pub scenario_demand: f64,
    pub delta: f64,
    /// Required finished-goods inventory to cover the scenario demand.
    pub inventory_req: f64,
    /// Revenue effect of the demand delta at list price.
    pub revenue_impact: f64,
}

/// Expand the composed multipliers across a product subset.
///
/// Output order matches input order.
pub fn expand_sku_impacts(products: &[Product], composite: &ScenarioComposite) -> Vec<SkuImpact> {
    products
        .iter()
        .map(|product| {
            let product_multiplier = match product.elasticity {
                ElasticityClass::Premium => {
                    composite.demand_multiplier
                        * (1.0 + composite.premium_mix_fraction * PREMIUM_DEMAND_KICKER)
                }
                ElasticityClass::Standard => composite.demand_multiplier,
            };
            let scenario_demand =
                finite_or_zero(product.baseline_demand * product_multiplier).round();
            let delta = scenario_demand - product.baseline_demand;
            SkuImpact {
                sku: product.sku.clone(),
                name: product.name.clone(),
                category: product.category.clone(),
                baseline_demand: product.baseline_demand,
                scenario_demand,
                delta,
                inventory_req: finite_or_zero(scenario_demand * SKU_INVENTORY_FACTOR).round(),
                revenue_impact: finite_or_zero(delta * product.unit_price),
            }
        })
        .collect()
}
