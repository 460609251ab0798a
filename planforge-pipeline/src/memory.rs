//! In-memory provider implementations backed by loaded fact tables.
//!
//! These are the production providers for file-driven runs and the
//! fixture providers for tests. Scope resolution is simple: the literal
//! `"all"` matches everything, otherwise products match on category and
//! inventory records match on plant.

use std::collections::HashMap;

use async_trait::async_trait;

use planforge_engine::{BaselineMetrics, BomLine, InventoryRecord, Product, SupplierInfo};

use crate::error::{PlanError, PlanResult};
use crate::providers::{BaselineFacts, BomRepository, InventoryFacts, SupplierMaster};

/// Scope label that matches every record.
pub const SCOPE_ALL: &str = "all";

/// Baseline aggregates and product list held in memory, keyed by scope.
pub struct MemoryBaseline {
    baselines: HashMap<String, BaselineMetrics>,
    products: Vec<Product>,
}

impl MemoryBaseline {
    pub fn new(baselines: HashMap<String, BaselineMetrics>, products: Vec<Product>) -> Self {
        Self {
            baselines,
            products,
        }
    }

    /// Single-scope convenience constructor.
    pub fn single(scope: &str, baseline: BaselineMetrics, products: Vec<Product>) -> Self {
        let mut baselines = HashMap::new();
        baselines.insert(scope.to_string(), baseline);
        Self {
            baselines,
            products,
        }
    }
}

#[async_trait]
impl BaselineFacts for MemoryBaseline {
    fn enable(&self, scope: &str) -> bool {
        scope == SCOPE_ALL || self.baselines.contains_key(scope)
    }

    async fn baseline(&self, scope: &str) -> PlanResult<BaselineMetrics> {
        if scope == SCOPE_ALL {
            if let Some(metrics) = self.baselines.get(SCOPE_ALL) {
                return Ok(metrics.clone());
            }
        }
        self.baselines
            .get(scope)
            .cloned()
            .ok_or_else(|| PlanError::MissingBaseline(scope.to_string()))
    }

    async fn products(&self, scope: &str) -> PlanResult<Vec<Product>> {
        Ok(self
            .products
            .iter()
            .filter(|p| scope == SCOPE_ALL || p.category == scope)
            .cloned()
            .collect())
    }
}

/// BOM table held in memory.
pub struct MemoryBoms {
    lines: HashMap<String, Vec<BomLine>>,
}

impl MemoryBoms {
    pub fn new(lines: HashMap<String, Vec<BomLine>>) -> Self {
        Self { lines }
    }
}

#[async_trait]
impl BomRepository for MemoryBoms {
    async fn lines_for(&self, skus: &[String]) -> PlanResult<HashMap<String, Vec<BomLine>>> {
        Ok(skus
            .iter()
            .filter_map(|sku| self.lines.get(sku).map(|l| (sku.clone(), l.clone())))
            .collect())
    }
}

/// Supplier master held in memory.
pub struct MemorySuppliers {
    suppliers: HashMap<String, SupplierInfo>,
}

impl MemorySuppliers {
    pub fn new(suppliers: HashMap<String, SupplierInfo>) -> Self {
        Self { suppliers }
    }
}

#[async_trait]
impl SupplierMaster for MemorySuppliers {
    async fn suppliers(&self) -> PlanResult<HashMap<String, SupplierInfo>> {
        Ok(self.suppliers.clone())
    }
}

/// Inventory facts held in memory.
pub struct MemoryInventory {
    records: Vec<InventoryRecord>,
}

impl MemoryInventory {
    pub fn new(records: Vec<InventoryRecord>) -> Self {
        Self { records }
    }
}

#[async_trait]
impl InventoryFacts for MemoryInventory {
    fn enable(&self, _scope: &str) -> bool {
        !self.records.is_empty()
    }

    async fn records(&self, scope: &str) -> PlanResult<Vec<InventoryRecord>> {
        Ok(self
            .records
            .iter()
            .filter(|r| scope == SCOPE_ALL || r.plant == scope)
            .cloned()
            .collect())
    }
}
