//! Procurement impact deriver.
//!
//! Turns aggregated component deltas into purchase-requirement records.
//! Negative deltas never produce negative quantities; they come through as
//! "No Change" records with zero additional quantity.
//!
//! The unit rate applied to additional quantity is injected through the
//! `UnitRateSource` trait. The planning reference model sampled a random
//! rate here; `JitteredUnitRate` reproduces that behavior from a seeded
//! generator so repeated runs stay bit-identical.

use std::collections::HashMap;
use std::sync::Mutex;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::bom::ComponentImpact;
use crate::guard::finite_or_zero;

/// Supplier master attributes consumed by the deriver.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SupplierInfo {
    pub name: String,
    pub lead_time_days: u32,
    /// Negotiated base rate per component unit.
    pub base_unit_rate: f64,
    /// 0.0–1.0 incoming quality score.
    pub quality_rating: f64,
}

/// Purchase-requirement status for a component.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PrStatus {
    Required,
    NoChange,
}

impl std::fmt::Display for PrStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PrStatus::Required => write!(f, "Required"),
            PrStatus::NoChange => write!(f, "No Change"),
        }
    }
}

/// One purchase-requirement record, 1:1 with a component impact.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProcurementRecord {
    pub component_id: String,
    pub additional_qty: f64,
    pub pr_status: PrStatus,
    pub estimated_cost: f64,
    pub lead_time_days: u32,
    pub supplier: String,
}

/// Deriver output plus the components skipped for missing supplier data.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ProcurementResult {
    pub records: Vec<ProcurementRecord>,
    pub skipped_components: Vec<String>,
}

/// Source of the per-unit rate used for cost estimation. Implementations
/// must be deterministic for a fixed construction (seeds included) so that
/// scenario recomputation stays idempotent.
pub trait UnitRateSource: Send + Sync {
    fn unit_rate(&self, impact: &ComponentImpact, supplier: &SupplierInfo) -> f64;
}

/// Uses the unit cost attributed during BOM explosion. The default,
/// fully deterministic source.
pub struct BomUnitRate;

impl UnitRateSource for BomUnitRate {
    fn unit_rate(&self, impact: &ComponentImpact, _supplier: &SupplierInfo) -> f64 {
        impact.unit_cost
    }
}

/// Applies a bounded, seeded jitter to the supplier's base rate. Replaces
/// the reference model's unseeded random cost sampler: the same seed always
/// yields the same rate for the same call sequence.
pub struct JitteredUnitRate {
    rng: Mutex<StdRng>,
    /// Maximum relative deviation from the base rate (0.1 = ±10%).
    spread: f64,
}

impl JitteredUnitRate {
    pub fn new(seed: u64, spread: f64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
            spread: spread.abs(),
        }
    }
}

impl UnitRateSource for JitteredUnitRate {
    fn unit_rate(&self, _impact: &ComponentImpact, supplier: &SupplierInfo) -> f64 {
        let jitter = match self.rng.lock() {
            Ok(mut rng) => rng.gen_range(-self.spread..=self.spread),
            // A poisoned lock only happens after a panic elsewhere; fall
            // back to the unjittered base rate.
            Err(_) => 0.0,
        };
        finite_or_zero(supplier.base_unit_rate * (1.0 + jitter))
    }
}

/// Derive purchase requirements from aggregated component impacts.
///
/// Components whose attributed supplier is missing from the master are
/// skipped and reported, keeping the rest of the output intact.
pub fn derive_procurement(
    impacts: &[ComponentImpact],
    suppliers: &HashMap<String, SupplierInfo>,
    rates: &dyn UnitRateSource,
) -> ProcurementResult {
    let mut records = Vec::with_capacity(impacts.len());
    let mut skipped_components = Vec::new();

    for impact in impacts {
        let Some(supplier) = suppliers.get(&impact.supplier) else {
            skipped_components.push(impact.component_id.clone());
            continue;
        };
        let additional_qty = impact.delta.max(0.0);
        let pr_status = if impact.delta > 0.0 {
            PrStatus::Required
        } else {
            PrStatus::NoChange
        };
        records.push(ProcurementRecord {
            component_id: impact.component_id.clone(),
            additional_qty,
            pr_status,
            estimated_cost: finite_or_zero(additional_qty * rates.unit_rate(impact, supplier)),
            lead_time_days: supplier.lead_time_days,
            supplier: supplier.name.clone(),
        });
    }

    ProcurementResult {
        records,
        skipped_components,
    }
}
