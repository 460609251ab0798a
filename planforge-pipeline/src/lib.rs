//! Orchestration layer around the pure calculation engines.
//!
//! This crate owns everything the engines deliberately do not: acquiring
//! facts from external collaborators (baseline provider, BOM repository,
//! supplier master, inventory facts), the CSV/JSON loaders behind the
//! in-memory providers, and the two pipeline drivers that chain the engine
//! stages together. The engines stay pure; only fact acquisition can fail.

pub mod error;
pub mod facts;
pub mod memory;
pub mod providers;
pub mod scenario;
pub mod types;
pub mod working_capital;

pub use error::PlanError;
pub use scenario::ScenarioPipeline;
pub use types::{ScenarioOutcome, ScenarioQuery, SavedScenario, WorkingCapitalReport};
pub use working_capital::WorkingCapitalPipeline;
