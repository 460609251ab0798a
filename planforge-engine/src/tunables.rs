//! Centralized planning constants for scenario projection and working
//! capital decomposition.
//!
//! These values are calibrated for consumer-goods supply chains. Changing a
//! constant here affects BOTH the aggregate projection (in `aggregate.rs`)
//! and the downstream SKU/component expansion, so keep them in one place.

/// Revenue lift applied per unit of premium mix shift. A 10% shift toward
/// premium products lifts revenue 3% on top of the volume multiplier.
pub const PREMIUM_REVENUE_LIFT: f64 = 0.3;

/// Demand kicker for premium-elasticity SKUs: half of the premium mix
/// fraction is added to their volume multiplier.
pub const PREMIUM_DEMAND_KICKER: f64 = 0.5;

/// Safety buffer on finished-goods and component requirements (10%).
pub const INVENTORY_BUFFER: f64 = 1.1;

/// Buffer on the cash impact projection (15%).
pub const CASH_BUFFER: f64 = 1.15;

/// Per-SKU inventory requirement factor over scenario demand (20% cover).
pub const SKU_INVENTORY_FACTOR: f64 = 1.2;

/// Fill rate lost per absolute point of POS growth.
pub const FILL_RATE_DEGRADATION: f64 = 0.2;

/// Service level lost per absolute point of POS growth.
pub const SERVICE_LEVEL_DEGRADATION: f64 = 0.15;

/// Stockout risk gained per absolute point of POS growth.
pub const STOCKOUT_RISK_DEGRADATION: f64 = 0.3;

/// Floor for projected fill rate and service level (percent).
pub const SERVICE_FLOOR: f64 = 85.0;

/// Cap for projected stockout risk (percent).
pub const STOCKOUT_RISK_CAP: f64 = 25.0;

// ---------------------------------------------------------------------------
// Working capital decomposition
// ---------------------------------------------------------------------------

/// Lead-time denominator offset for the pipeline stock share:
/// `pipeline_share = lead / (lead + PIPELINE_LEAD_OFFSET)`. Saturates toward
/// 1.0 as lead time grows.
pub const PIPELINE_LEAD_OFFSET: f64 = 60.0;

/// Sentinel DIO for items with zero turns (never divide by zero).
pub const DIO_SENTINEL: u32 = 999;

/// Achievable safety stock after variability reduction (15% cut).
pub const OPTIMAL_SAFETY_FACTOR: f64 = 0.85;

/// Achievable cycle stock after lot-size optimization (10% cut).
pub const OPTIMAL_CYCLE_FACTOR: f64 = 0.90;

/// Excess ratio above which a position is classified Critical.
pub const EXCESS_RATIO_CRITICAL: f64 = 0.20;

/// Excess ratio above which a position is classified At Risk.
pub const EXCESS_RATIO_AT_RISK: f64 = 0.10;

/// Days of supply beyond which a position is dead stock.
pub const DEAD_STOCK_DOS: f64 = 365.0;

/// Working capital productivity below which a position is At Risk.
pub const WCP_AT_RISK: f64 = 2.0;

/// Working capital productivity at or above which a position can be
/// classified Excellent (together with the tier turns target).
pub const WCP_EXCELLENT: f64 = 4.0;

/// Cycle share of the reducible base (total minus excess, minus the
/// pipeline share) per material tier. Cycle and safety shares sum to 1 so
/// the decomposition reconstructs the total exactly.
pub const CYCLE_SHARE_FINISHED: f64 = 0.60;
pub const CYCLE_SHARE_SEMI_FINISHED: f64 = 0.55;
pub const CYCLE_SHARE_RAW: f64 = 0.50;

/// Annual turns target per material tier, used by the Excellent bucket.
pub const TARGET_TURNS_FINISHED: f64 = 4.0;
pub const TARGET_TURNS_SEMI_FINISHED: f64 = 6.0;
pub const TARGET_TURNS_RAW: f64 = 8.0;
