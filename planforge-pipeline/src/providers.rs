//! Provider traits for the external fact collaborators.
//!
//! The core imports data from these seams, never behavior: a baseline
//! facts provider, a BOM repository, a supplier master and an inventory
//! facts provider. Implementations may hit a warehouse or a file; the
//! pipelines only see the trait.

use std::collections::HashMap;

use async_trait::async_trait;

use planforge_engine::{BaselineMetrics, BomLine, InventoryRecord, Product, SupplierInfo};

use crate::error::PlanResult;

/// Last segment of a fully qualified type name, used as the default
/// provider label in logs.
fn type_basename(full: &'static str) -> &'static str {
    full.rsplit_once("::").map_or(full, |(_, tail)| tail)
}

/// Supplies the fixed reference aggregates and the product list for a
/// planning scope.
#[async_trait]
pub trait BaselineFacts: Send + Sync {
    /// Decide if this provider can serve the given scope.
    fn enable(&self, _scope: &str) -> bool {
        true
    }

    async fn baseline(&self, scope: &str) -> PlanResult<BaselineMetrics>;

    async fn products(&self, scope: &str) -> PlanResult<Vec<Product>>;

    /// Returns a stable name for logging/metrics.
    fn name(&self) -> &str {
        type_basename(std::any::type_name::<Self>())
    }
}

/// Maps each SKU to its bill of materials.
#[async_trait]
pub trait BomRepository: Send + Sync {
    /// Fetch the BOM table for a set of SKUs. SKUs without a BOM are
    /// simply absent from the map; the explosion stage skips them.
    async fn lines_for(&self, skus: &[String]) -> PlanResult<HashMap<String, Vec<BomLine>>>;

    fn name(&self) -> &str {
        type_basename(std::any::type_name::<Self>())
    }
}

/// Supplier master: lead times, negotiated rates, quality.
#[async_trait]
pub trait SupplierMaster: Send + Sync {
    async fn suppliers(&self) -> PlanResult<HashMap<String, SupplierInfo>>;

    fn name(&self) -> &str {
        type_basename(std::any::type_name::<Self>())
    }
}

/// Supplies inventory facts (one record per SKU x plant) for a scope.
#[async_trait]
pub trait InventoryFacts: Send + Sync {
    fn enable(&self, _scope: &str) -> bool {
        true
    }

    async fn records(&self, scope: &str) -> PlanResult<Vec<InventoryRecord>>;

    fn name(&self) -> &str {
        type_basename(std::any::type_name::<Self>())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_label_is_the_type_basename() {
        assert_eq!(type_basename("planforge_pipeline::memory::MemoryBoms"), "MemoryBoms");
        assert_eq!(type_basename("Unqualified"), "Unqualified");
    }
}
