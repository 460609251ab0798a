//! Scenario impact pipeline driver.
//!
//! Chains the five engine stages: clamp + compose drivers, project the
//! aggregates, expand SKU impacts, explode BOMs, derive procurement. The
//! stages themselves are pure; this driver only acquires facts, feeds them
//! through, and logs what was skipped along the way.

use rayon::prelude::*;

use planforge_engine::{
    compose, derive_procurement, expand_sku_impacts, explode, project_aggregates,
    BaselineMetrics, BomLine, DriverBounds, Product, SupplierInfo, UnitRateSource,
};
use std::collections::HashMap;

use crate::error::{PlanError, PlanResult};
use crate::providers::{BaselineFacts, BomRepository, SupplierMaster};
use crate::types::{ScenarioOutcome, ScenarioQuery};

/// Pre-fetched facts for one planning scope. Immutable once assembled,
/// which is what makes scenario sweeps embarrassingly parallel.
#[derive(Clone, Debug)]
pub struct ScenarioFacts {
    pub baseline: BaselineMetrics,
    pub products: Vec<Product>,
    pub boms: HashMap<String, Vec<BomLine>>,
    pub suppliers: HashMap<String, SupplierInfo>,
}

/// Evaluate one scenario against pre-fetched facts. Pure: identical inputs
/// (rate source construction included) produce identical outcomes.
pub fn evaluate(
    facts: &ScenarioFacts,
    query: &ScenarioQuery,
    bounds: &DriverBounds,
    rates: &dyn UnitRateSource,
) -> ScenarioOutcome {
    let clamped = bounds.clamp(&query.drivers);
    let composite = compose(&clamped);
    let metrics = project_aggregates(&facts.baseline, &composite, clamped.pos_growth);
    let deltas = metrics.deltas(&facts.baseline);
    let sku_impacts = expand_sku_impacts(&facts.products, &composite);
    let explosion = explode(&sku_impacts, &facts.boms);
    let procurement = derive_procurement(&explosion.impacts, &facts.suppliers, rates);

    ScenarioOutcome {
        request_id: query.request_id.clone(),
        scope: query.scope.clone(),
        clamped_drivers: clamped,
        composite,
        baseline: facts.baseline.clone(),
        metrics,
        deltas,
        sku_impacts,
        component_impacts: explosion.impacts,
        procurement: procurement.records,
        skipped_skus: explosion.skipped_skus,
        skipped_components: procurement.skipped_components,
    }
}

/// Evaluate a batch of driver sets over the same facts in parallel.
///
/// Each query gets its own rate source from the factory so seeded jitter
/// stays deterministic per query regardless of scheduling order. Output
/// order matches input order.
pub fn sweep<F>(
    facts: &ScenarioFacts,
    queries: &[ScenarioQuery],
    bounds: &DriverBounds,
    rate_factory: F,
) -> Vec<ScenarioOutcome>
where
    F: Fn() -> Box<dyn UnitRateSource> + Sync,
{
    queries
        .par_iter()
        .map(|query| evaluate(facts, query, bounds, rate_factory().as_ref()))
        .collect()
}

/// The scenario pipeline: fact providers plus driver bounds and an
/// injected unit-rate source.
pub struct ScenarioPipeline {
    baseline: Box<dyn BaselineFacts>,
    boms: Box<dyn BomRepository>,
    suppliers: Box<dyn SupplierMaster>,
    rates: Box<dyn UnitRateSource>,
    bounds: DriverBounds,
}

impl ScenarioPipeline {
    pub fn new(
        baseline: Box<dyn BaselineFacts>,
        boms: Box<dyn BomRepository>,
        suppliers: Box<dyn SupplierMaster>,
        rates: Box<dyn UnitRateSource>,
    ) -> Self {
        Self {
            baseline,
            boms,
            suppliers,
            rates,
            bounds: DriverBounds::default(),
        }
    }

    /// Override the default driver clamp ranges.
    pub fn with_bounds(mut self, bounds: DriverBounds) -> Self {
        self.bounds = bounds;
        self
    }

    /// Fetch facts for the query scope.
    pub async fn fetch_facts(&self, query: &ScenarioQuery) -> PlanResult<ScenarioFacts> {
        if !self.baseline.enable(&query.scope) {
            log::warn!(
                "request_id={} provider '{}' cannot serve scope '{}'",
                query.request_id,
                self.baseline.name(),
                query.scope
            );
            return Err(PlanError::MissingBaseline(query.scope.clone()));
        }
        let baseline = self.baseline.baseline(&query.scope).await?;
        let products = self.baseline.products(&query.scope).await?;
        let skus: Vec<String> = products.iter().map(|p| p.sku.clone()).collect();
        let boms = self.boms.lines_for(&skus).await?;
        let suppliers = self.suppliers.suppliers().await?;
        log::info!(
            "request_id={} scope={} facts: {} products, {} BOMs, {} suppliers",
            query.request_id,
            query.scope,
            products.len(),
            boms.len(),
            suppliers.len()
        );
        Ok(ScenarioFacts {
            baseline,
            products,
            boms,
            suppliers,
        })
    }

    /// Run the full pipeline for one query.
    pub async fn run(&self, query: &ScenarioQuery) -> PlanResult<ScenarioOutcome> {
        let facts = self.fetch_facts(query).await?;
        let outcome = evaluate(&facts, query, &self.bounds, self.rates.as_ref());

        if !outcome.skipped_skus.is_empty() {
            log::warn!(
                "request_id={} {} SKUs skipped (no BOM entry): {}",
                query.request_id,
                outcome.skipped_skus.len(),
                outcome.skipped_skus.join(", ")
            );
        }
        if !outcome.skipped_components.is_empty() {
            log::warn!(
                "request_id={} {} components skipped (no supplier entry): {}",
                query.request_id,
                outcome.skipped_components.len(),
                outcome.skipped_components.join(", ")
            );
        }
        log::info!(
            "request_id={} multiplier={:.4} {} SKU impacts -> {} components -> {} PRs",
            query.request_id,
            outcome.composite.demand_multiplier,
            outcome.sku_impacts.len(),
            outcome.component_impacts.len(),
            outcome.procurement.len()
        );
        Ok(outcome)
    }
}
