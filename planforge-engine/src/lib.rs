//! Deterministic calculation engines for scenario planning and working
//! capital analytics.
//!
//! Two independent pipelines share this crate's vocabulary but no state:
//!
//! 1. **Scenario impact**: driver percentages → demand multiplier →
//!    aggregate metrics → per-SKU demand → component demand (BOM
//!    explosion) → procurement requirements.
//! 2. **Working capital**: per SKU×plant inventory value split into
//!    cycle/safety/pipeline/excess stock, productivity scoring, and a
//!    portfolio rollup.
//!
//! Every function here is a pure transform of its inputs. Failures never
//! surface as errors: out-of-range drivers are clamped, zero denominators
//! produce documented sentinels, and rows with missing reference data are
//! skipped and reported alongside the results.

pub mod aggregate;
pub mod bom;
pub mod delta;
pub mod drivers;
pub mod guard;
pub mod procurement;
pub mod sku;
pub mod summary;
pub mod tunables;
pub mod working_capital;

pub use aggregate::{project_aggregates, BaselineMetrics, ScenarioMetrics};
pub use bom::{explode, BomLine, ComponentImpact, ExplosionResult};
pub use delta::{metric_delta, MetricDelta, MetricDirection};
pub use drivers::{compose, DriverBounds, DriverSet, ScenarioComposite};
pub use procurement::{
    derive_procurement, BomUnitRate, JitteredUnitRate, PrStatus, ProcurementRecord,
    ProcurementResult, SupplierInfo, UnitRateSource,
};
pub use sku::{expand_sku_impacts, ElasticityClass, Product, SkuImpact};
pub use summary::{summarize, WcSummary};
pub use working_capital::{decompose, HealthStatus, InventoryRecord, MaterialTier, WcDecomposition};
