//! Demand scenario compositor.
//!
//! Turns a set of user-editable driver percentages into the multipliers the
//! rest of the scenario pipeline consumes. Channel-shift and premium-mix
//! drivers are kept separate from the volume multiplier on purpose: they
//! move mix and revenue, not raw unit volume.

use serde::{Deserialize, Serialize};

use crate::guard::finite_or_zero;

/// A named combination of percentage adjustments applied to baseline
/// demand and mix. All fields are signed percentages (10.0 = +10%).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DriverSet {
    /// Point-of-sale demand growth.
    pub pos_growth: f64,
    /// Promotional volume lift.
    pub promo_lift: f64,
    /// Share of demand shifting to the online channel.
    pub channel_shift_online: f64,
    /// Share of demand shifting to the B2B channel.
    pub channel_shift_b2b: f64,
    /// Mix shift toward premium products.
    pub product_mix_premium: f64,
    /// Seasonal demand adjustment.
    pub seasonal_factor: f64,
}

/// Configured `[min, max]` range for each driver. Out-of-range input is
/// clamped silently, never rejected.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DriverBounds {
    pub pos_growth: (f64, f64),
    pub promo_lift: (f64, f64),
    pub channel_shift_online: (f64, f64),
    pub channel_shift_b2b: (f64, f64),
    pub product_mix_premium: (f64, f64),
    pub seasonal_factor: (f64, f64),
}

impl Default for DriverBounds {
    fn default() -> Self {
        Self {
            pos_growth: (-50.0, 100.0),
            promo_lift: (-30.0, 50.0),
            channel_shift_online: (-20.0, 40.0),
            channel_shift_b2b: (-20.0, 40.0),
            product_mix_premium: (-20.0, 30.0),
            seasonal_factor: (-30.0, 30.0),
        }
    }
}

impl DriverBounds {
    /// Clamp every driver into its configured range. Non-finite input
    /// degrades to the neutral 0% driver.
    pub fn clamp(&self, drivers: &DriverSet) -> DriverSet {
        DriverSet {
            pos_growth: clamp_one(drivers.pos_growth, self.pos_growth),
            promo_lift: clamp_one(drivers.promo_lift, self.promo_lift),
            channel_shift_online: clamp_one(drivers.channel_shift_online, self.channel_shift_online),
            channel_shift_b2b: clamp_one(drivers.channel_shift_b2b, self.channel_shift_b2b),
            product_mix_premium: clamp_one(drivers.product_mix_premium, self.product_mix_premium),
            seasonal_factor: clamp_one(drivers.seasonal_factor, self.seasonal_factor),
        }
    }
}

fn clamp_one(value: f64, (min, max): (f64, f64)) -> f64 {
    finite_or_zero(value).clamp(min, max)
}

/// Composed multipliers derived from a driver set. Plain numbers, no
/// side effects.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScenarioComposite {
    /// Total unit-volume multiplier, floored at 0.
    pub demand_multiplier: f64,
    /// Fraction of demand shifting online.
    pub online_shift: f64,
    /// Fraction of demand shifting to B2B.
    pub b2b_shift: f64,
    /// Fraction of mix shifting toward premium products.
    pub premium_mix_fraction: f64,
}

/// Compose a driver set into scenario multipliers.
///
/// The volume multiplier compounds POS growth, promo lift and the seasonal
/// factor. Channel shifts and premium mix stay as separate fractions.
pub fn compose(drivers: &DriverSet) -> ScenarioComposite {
    let multiplier = (1.0 + drivers.pos_growth / 100.0)
        * (1.0 + drivers.promo_lift / 100.0)
        * (1.0 + drivers.seasonal_factor / 100.0);

    ScenarioComposite {
        demand_multiplier: finite_or_zero(multiplier).max(0.0),
        online_shift: finite_or_zero(drivers.channel_shift_online / 100.0),
        b2b_shift: finite_or_zero(drivers.channel_shift_b2b / 100.0),
        premium_mix_fraction: finite_or_zero(drivers.product_mix_premium / 100.0),
    }
}
