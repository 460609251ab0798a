use std::env;
use std::process;
use std::time::Instant;

use chrono::Utc;
use serde::Serialize;

use planforge_engine::{BomUnitRate, DriverSet, JitteredUnitRate, UnitRateSource};
use planforge_pipeline::facts::{
    load_baselines_file, load_bom_lines_file, load_inventory_file, load_products_file,
    load_suppliers_file,
};
use planforge_pipeline::memory::{
    MemoryBaseline, MemoryBoms, MemoryInventory, MemorySuppliers, SCOPE_ALL,
};
use planforge_pipeline::types::{SavedScenario, ScenarioOutcome, ScenarioQuery, WorkingCapitalReport};
use planforge_pipeline::{ScenarioPipeline, WorkingCapitalPipeline};

// ---------------------------------------------------------------------------
// JSON output contract
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct ReportJson {
    generated_at: String,
    scope: String,
    drivers: DriverSet,
    load_ms: u128,
    pipeline_ms: u128,
    scenario: ScenarioOutcome,
    working_capital: WorkingCapitalReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    saved_scenario: Option<SavedScenario>,
}

// ---------------------------------------------------------------------------
// CLI options
// ---------------------------------------------------------------------------

struct Options {
    data_dir: String,
    scope: String,
    drivers: DriverSet,
    seed: Option<u64>,
    json: bool,
    save_as: Option<String>,
    top: usize,
}

fn usage() -> ! {
    eprintln!(
        "Usage: planforge <data-dir> [options]\n\
         \n\
         Options:\n\
           --scope <label>        planning scope (default: all)\n\
           --pos-growth <pct>     POS demand growth driver\n\
           --promo-lift <pct>     promotional lift driver\n\
           --seasonal <pct>       seasonal factor driver\n\
           --online-shift <pct>   channel shift to online\n\
           --b2b-shift <pct>      channel shift to B2B\n\
           --premium-mix <pct>    mix shift toward premium\n\
           --seed <n>             seeded unit-rate jitter (default: BOM costs)\n\
           --top <n>              procurement rows to display (default: 10)\n\
           --save <name>          attach a named scenario snapshot to the output\n\
           --json                 machine-readable output"
    );
    process::exit(2);
}

fn parse_args() -> Options {
    let mut args = env::args().skip(1);
    let Some(data_dir) = args.next() else { usage() };
    if data_dir.starts_with("--") {
        usage();
    }

    let mut opts = Options {
        data_dir,
        scope: SCOPE_ALL.to_string(),
        drivers: DriverSet::default(),
        seed: None,
        json: false,
        save_as: None,
        top: 10,
    };

    while let Some(flag) = args.next() {
        match flag.as_str() {
            "--json" => opts.json = true,
            "--scope" => opts.scope = next_value(&mut args, &flag),
            "--save" => opts.save_as = Some(next_value(&mut args, &flag)),
            "--pos-growth" => opts.drivers.pos_growth = next_number(&mut args, &flag),
            "--promo-lift" => opts.drivers.promo_lift = next_number(&mut args, &flag),
            "--seasonal" => opts.drivers.seasonal_factor = next_number(&mut args, &flag),
            "--online-shift" => opts.drivers.channel_shift_online = next_number(&mut args, &flag),
            "--b2b-shift" => opts.drivers.channel_shift_b2b = next_number(&mut args, &flag),
            "--premium-mix" => opts.drivers.product_mix_premium = next_number(&mut args, &flag),
            "--seed" => opts.seed = Some(next_number(&mut args, &flag) as u64),
            "--top" => opts.top = next_number(&mut args, &flag) as usize,
            _ => usage(),
        }
    }
    opts
}

fn next_value(args: &mut impl Iterator<Item = String>, flag: &str) -> String {
    match args.next() {
        Some(value) => value,
        None => {
            eprintln!("Missing value for {flag}");
            process::exit(2);
        }
    }
}

fn next_number(args: &mut impl Iterator<Item = String>, flag: &str) -> f64 {
    let raw = next_value(args, flag);
    match raw.parse() {
        Ok(value) => value,
        Err(_) => {
            eprintln!("Invalid number '{raw}' for {flag}");
            process::exit(2);
        }
    }
}

// ---------------------------------------------------------------------------
// Human-readable output
// ---------------------------------------------------------------------------

/// Format a number with comma thousands separators.
fn format_dollars(amount: f64) -> String {
    let whole = amount.abs() as u64;
    let sign = if amount < 0.0 { "-" } else { "" };

    if whole < 1_000 {
        return format!("{}{}", sign, whole);
    }

    let s = whole.to_string();
    let mut result = String::new();
    for (i, ch) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(ch);
    }
    format!("{}{}", sign, result.chars().rev().collect::<String>())
}

fn print_human(
    scenario: &ScenarioOutcome,
    wc: &WorkingCapitalReport,
    top: usize,
    load_ms: u128,
    pipeline_ms: u128,
) {
    println!();
    println!("  {:=<66}", "");
    println!("  PLANFORGE \u{2014} Scenario Impact & Working Capital Digest");
    println!("  {:=<66}", "");
    println!();

    println!(
        "  scope {}  \u{00b7}  demand multiplier {:.4}  \u{00b7}  premium mix {:+.0}%",
        scenario.scope,
        scenario.composite.demand_multiplier,
        scenario.composite.premium_mix_fraction * 100.0
    );
    println!();

    println!("  Scenario vs baseline");
    println!("  {:-<66}", "");
    for delta in &scenario.deltas {
        let marker = if delta.favorable { " " } else { "!" };
        println!(
            "  {} {:18} {:>14} -> {:>14}  ({:+.1}%)",
            marker,
            delta.name,
            format_dollars(delta.baseline),
            format_dollars(delta.scenario),
            delta.pct,
        );
    }
    println!();

    if !scenario.skipped_skus.is_empty() {
        println!(
            "  {} SKUs without BOM coverage: {}",
            scenario.skipped_skus.len(),
            scenario.skipped_skus.join(", ")
        );
    }
    if !scenario.skipped_components.is_empty() {
        println!(
            "  {} components without supplier data: {}",
            scenario.skipped_components.len(),
            scenario.skipped_components.join(", ")
        );
    }

    let required: Vec<_> = scenario
        .procurement
        .iter()
        .filter(|r| r.additional_qty > 0.0)
        .collect();
    println!(
        "  {} components exploded  \u{00b7}  {} purchase requirements",
        scenario.component_impacts.len(),
        required.len()
    );
    for record in required.iter().take(top) {
        println!(
            "    {:12} {:>12} units  ${:>12}  lead {:>3}d  {}",
            record.component_id,
            format_dollars(record.additional_qty),
            format_dollars(record.estimated_cost),
            record.lead_time_days,
            record.supplier,
        );
    }
    println!();

    let s = &wc.summary;
    println!("  Working capital \u{2014} {} positions", s.record_count);
    println!("  {:-<66}", "");
    println!(
        "    cycle ${}  safety ${}  pipeline ${}  excess ${}",
        format_dollars(s.total_cycle_stock),
        format_dollars(s.total_safety_stock),
        format_dollars(s.total_pipeline_stock),
        format_dollars(s.total_excess_stock),
    );
    println!(
        "    total ${}  \u{00b7}  avg WCP {:.2}  \u{00b7}  avg DIO {}d",
        format_dollars(s.total_wc_value),
        s.avg_wcp,
        s.avg_dio,
    );
    println!(
        "    health: {} excellent / {} good / {} at risk / {} critical",
        s.excellent_count, s.good_count, s.at_risk_count, s.critical_count,
    );
    println!(
        "    savings opportunity ${}  (carrying cost ${}/yr)",
        format_dollars(s.total_savings_opportunity),
        format_dollars(s.total_carrying_cost_savings),
    );
    println!();
    println!(
        "  \u{23f1}  facts loaded in {}ms \u{00b7} pipelines ran in {}ms",
        load_ms, pipeline_ms
    );
    println!();
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() {
    env_logger::init();
    let opts = parse_args();

    let load_start = Instant::now();
    let facts = load_facts(&opts.data_dir);
    let load_ms = load_start.elapsed().as_millis();
    log::info!(
        "loaded facts from {} in {}ms: {} products, {} BOMs, {} suppliers, {} inventory records",
        opts.data_dir,
        load_ms,
        facts.products.len(),
        facts.boms.len(),
        facts.suppliers.len(),
        facts.inventory.len()
    );

    let rates: Box<dyn UnitRateSource> = match opts.seed {
        Some(seed) => Box::new(JitteredUnitRate::new(seed, 0.1)),
        None => Box::new(BomUnitRate),
    };

    let scenario_pipeline = ScenarioPipeline::new(
        Box::new(MemoryBaseline::new(facts.baselines, facts.products)),
        Box::new(MemoryBoms::new(facts.boms)),
        Box::new(MemorySuppliers::new(facts.suppliers)),
        rates,
    );
    let wc_pipeline = WorkingCapitalPipeline::new(Box::new(MemoryInventory::new(facts.inventory)));

    let query = ScenarioQuery {
        request_id: format!("cli-{}", Utc::now().timestamp()),
        scope: opts.scope.clone(),
        horizon_months: 12,
        drivers: opts.drivers.clone(),
    };

    let pipeline_start = Instant::now();
    let scenario = match scenario_pipeline.run(&query).await {
        Ok(outcome) => outcome,
        Err(err) => {
            eprintln!("Scenario pipeline failed: {err}");
            process::exit(1);
        }
    };
    let wc = match wc_pipeline.run(&opts.scope).await {
        Ok(report) => report,
        Err(err) => {
            eprintln!("Working capital pipeline failed: {err}");
            process::exit(1);
        }
    };
    let pipeline_ms = pipeline_start.elapsed().as_millis();
    log::info!(
        "scope={} pipelines done in {}ms: {} procurement records, {} WC positions",
        opts.scope,
        pipeline_ms,
        scenario.procurement.len(),
        wc.summary.record_count
    );

    if opts.json {
        let saved_scenario = opts.save_as.map(|name| SavedScenario {
            name,
            scope: scenario.scope.clone(),
            drivers: scenario.clamped_drivers.clone(),
            metrics: scenario.metrics.clone(),
        });
        let report = ReportJson {
            generated_at: Utc::now().to_rfc3339(),
            scope: opts.scope,
            drivers: query.drivers,
            load_ms,
            pipeline_ms,
            scenario,
            working_capital: wc,
            saved_scenario,
        };
        match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{json}"),
            Err(err) => {
                eprintln!("Failed to serialize report: {err}");
                process::exit(1);
            }
        }
    } else {
        print_human(&scenario, &wc, opts.top, load_ms, pipeline_ms);
    }
}

struct LoadedFacts {
    baselines: std::collections::HashMap<String, planforge_engine::BaselineMetrics>,
    products: Vec<planforge_engine::Product>,
    boms: std::collections::HashMap<String, Vec<planforge_engine::BomLine>>,
    suppliers: std::collections::HashMap<String, planforge_engine::SupplierInfo>,
    inventory: Vec<planforge_engine::InventoryRecord>,
}

fn load_facts(data_dir: &str) -> LoadedFacts {
    let path = |name: &str| format!("{data_dir}/{name}");

    macro_rules! load_or_exit {
        ($loader:expr) => {
            match $loader {
                Ok(value) => value,
                Err(err) => {
                    eprintln!("{err}");
                    process::exit(1);
                }
            }
        };
    }

    LoadedFacts {
        baselines: load_or_exit!(load_baselines_file(&path("baselines.json"))),
        products: load_or_exit!(load_products_file(&path("products.csv"))),
        boms: load_or_exit!(load_bom_lines_file(&path("bom.csv"))),
        suppliers: load_or_exit!(load_suppliers_file(&path("suppliers.csv"))),
        inventory: load_or_exit!(load_inventory_file(&path("inventory.csv"))),
    }
}
