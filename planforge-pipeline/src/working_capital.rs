//! Working capital pipeline driver.
//!
//! Independent of the scenario pipeline; shares vocabulary but no state.
//! Decomposes every inventory fact in scope and rolls the results into a
//! portfolio summary. Records are immutable, so the per-record transform
//! runs in parallel with zero coordination.

use rayon::prelude::*;

use planforge_engine::{decompose, summarize, InventoryRecord, WcDecomposition, WcSummary};

use crate::error::PlanResult;
use crate::providers::InventoryFacts;
use crate::types::WorkingCapitalReport;

/// Decompose a batch of inventory records. Output order matches input
/// order.
pub fn decompose_batch(records: &[InventoryRecord]) -> Vec<WcDecomposition> {
    records.par_iter().map(decompose).collect()
}

/// The working capital pipeline over an inventory facts provider.
pub struct WorkingCapitalPipeline {
    inventory: Box<dyn InventoryFacts>,
}

impl WorkingCapitalPipeline {
    pub fn new(inventory: Box<dyn InventoryFacts>) -> Self {
        Self { inventory }
    }

    /// Decompose every record in scope and roll up the summary.
    pub async fn run(&self, scope: &str) -> PlanResult<WorkingCapitalReport> {
        if !self.inventory.enable(scope) {
            log::warn!(
                "scope={} inventory provider '{}' disabled, reporting empty",
                scope,
                self.inventory.name()
            );
            return Ok(WorkingCapitalReport {
                scope: scope.to_string(),
                rows: Vec::new(),
                summary: WcSummary::default(),
            });
        }
        let records = self.inventory.records(scope).await?;
        let rows = decompose_batch(&records);
        let summary = summarize(&rows);
        log::info!(
            "scope={} decomposed {} positions: {} critical, {} at-risk, savings {:.0}",
            scope,
            summary.record_count,
            summary.critical_count,
            summary.at_risk_count,
            summary.total_savings_opportunity
        );
        Ok(WorkingCapitalReport {
            scope: scope.to_string(),
            rows,
            summary,
        })
    }
}
