//! Query and result types for the two pipelines.

use serde::{Deserialize, Serialize};

use planforge_engine::{
    BaselineMetrics, ComponentImpact, DriverSet, MetricDelta, ProcurementRecord,
    ScenarioComposite, ScenarioMetrics, SkuImpact, WcDecomposition, WcSummary,
};

/// A scenario evaluation request: which scope to plan, over what horizon,
/// with which driver adjustments.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ScenarioQuery {
    pub request_id: String,
    /// Planning scope label, resolved by the fact providers (e.g. a
    /// category, region or business unit).
    pub scope: String,
    pub horizon_months: u32,
    pub drivers: DriverSet,
}

/// Everything the scenario pipeline produced for one query. Plain
/// serializable records, ready for a presentation layer or export.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ScenarioOutcome {
    pub request_id: String,
    pub scope: String,
    /// Drivers after clamping to their configured bounds.
    pub clamped_drivers: DriverSet,
    pub composite: ScenarioComposite,
    pub baseline: BaselineMetrics,
    pub metrics: ScenarioMetrics,
    pub deltas: Vec<MetricDelta>,
    pub sku_impacts: Vec<SkuImpact>,
    pub component_impacts: Vec<ComponentImpact>,
    pub procurement: Vec<ProcurementRecord>,
    /// SKUs skipped during explosion for lack of a BOM entry.
    pub skipped_skus: Vec<String>,
    /// Components skipped during procurement for lack of a supplier entry.
    pub skipped_components: Vec<String>,
}

/// A saved scenario: name, driver snapshot and the metrics they produced.
/// Serialized as an opaque blob for whatever store the caller uses; the
/// resulting metrics are a convenience copy and are never promoted to a
/// baseline.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SavedScenario {
    pub name: String,
    pub scope: String,
    pub drivers: DriverSet,
    pub metrics: ScenarioMetrics,
}

/// Working capital pipeline output: one decomposition per inventory fact
/// plus the portfolio rollup.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WorkingCapitalReport {
    pub scope: String,
    pub rows: Vec<WcDecomposition>,
    pub summary: WcSummary,
}
