//! CSV and JSON fact loaders.
//!
//! Parses the four fact tables behind the in-memory providers. Expected
//! CSV columns:
//!   products:  sku, name, category, unit_price, baseline_demand, elasticity
//!   bom:       sku, component_id, description, qty_per_unit, supplier, unit_cost
//!   suppliers: supplier, lead_time_days, base_unit_rate, quality_rating
//!   inventory: sku, plant, total_stock, turns, days_of_supply, fill_rate,
//!              abc_class, xyz_class, lead_time_days, lot_size, daily_demand,
//!              unit_cost, margin_rate, carrying_cost_rate, excess_stock_value,
//!              material_tier
//!
//! Baseline aggregates arrive as a JSON object keyed by scope label.

use std::collections::HashMap;
use std::io::Read;

use serde::Deserialize;

use planforge_engine::working_capital::{AbcClass, XyzClass};
use planforge_engine::{
    BaselineMetrics, BomLine, ElasticityClass, InventoryRecord, MaterialTier, Product,
    SupplierInfo,
};

use crate::error::{PlanError, PlanResult};

// ---------------------------------------------------------------------------
// Products
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct ProductRow {
    sku: String,
    name: String,
    category: String,
    unit_price: f64,
    baseline_demand: f64,
    elasticity: String,
}

/// Load the product table from a CSV reader.
pub fn load_products<R: Read>(reader: R, path: &str) -> PlanResult<Vec<Product>> {
    let mut products = Vec::new();
    for (line, row) in csv_rows::<ProductRow, R>(reader) {
        let row = row.map_err(|reason| csv_error(path, line, reason))?;
        let elasticity = parse_elasticity(&row.elasticity)
            .ok_or_else(|| csv_error(path, line, format!("unknown elasticity '{}'", row.elasticity)))?;
        products.push(Product {
            sku: row.sku,
            name: row.name,
            category: row.category,
            unit_price: row.unit_price,
            baseline_demand: row.baseline_demand,
            elasticity,
        });
    }
    Ok(products)
}

/// Load the product table from a CSV file path.
pub fn load_products_file(path: &str) -> PlanResult<Vec<Product>> {
    load_products(open(path)?, path)
}

// ---------------------------------------------------------------------------
// BOM lines
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct BomRow {
    sku: String,
    component_id: String,
    description: String,
    qty_per_unit: f64,
    supplier: String,
    unit_cost: f64,
}

/// Load BOM lines grouped by parent SKU. Line order within a SKU is file
/// order, which keeps explosion output deterministic.
pub fn load_bom_lines<R: Read>(reader: R, path: &str) -> PlanResult<HashMap<String, Vec<BomLine>>> {
    let mut boms: HashMap<String, Vec<BomLine>> = HashMap::new();
    for (line, row) in csv_rows::<BomRow, R>(reader) {
        let row = row.map_err(|reason| csv_error(path, line, reason))?;
        boms.entry(row.sku).or_default().push(BomLine {
            component_id: row.component_id,
            description: row.description,
            qty_per_unit: row.qty_per_unit,
            supplier: row.supplier,
            unit_cost: row.unit_cost,
        });
    }
    Ok(boms)
}

/// Load BOM lines from a CSV file path.
pub fn load_bom_lines_file(path: &str) -> PlanResult<HashMap<String, Vec<BomLine>>> {
    load_bom_lines(open(path)?, path)
}

// ---------------------------------------------------------------------------
// Suppliers
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct SupplierRow {
    supplier: String,
    lead_time_days: u32,
    base_unit_rate: f64,
    quality_rating: f64,
}

/// Load the supplier master keyed by supplier name.
pub fn load_suppliers<R: Read>(reader: R, path: &str) -> PlanResult<HashMap<String, SupplierInfo>> {
    let mut suppliers = HashMap::new();
    for (line, row) in csv_rows::<SupplierRow, R>(reader) {
        let row = row.map_err(|reason| csv_error(path, line, reason))?;
        suppliers.insert(
            row.supplier.clone(),
            SupplierInfo {
                name: row.supplier,
                lead_time_days: row.lead_time_days,
                base_unit_rate: row.base_unit_rate,
                quality_rating: row.quality_rating,
            },
        );
    }
    Ok(suppliers)
}

/// Load the supplier master from a CSV file path.
pub fn load_suppliers_file(path: &str) -> PlanResult<HashMap<String, SupplierInfo>> {
    load_suppliers(open(path)?, path)
}

// ---------------------------------------------------------------------------
// Inventory facts
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct InventoryRow {
    sku: String,
    plant: String,
    total_stock: f64,
    turns: f64,
    days_of_supply: f64,
    fill_rate: f64,
    abc_class: String,
    xyz_class: String,
    lead_time_days: f64,
    lot_size: f64,
    daily_demand: f64,
    unit_cost: f64,
    margin_rate: f64,
    carrying_cost_rate: f64,
    excess_stock_value: f64,
    material_tier: String,
}

/// Load inventory facts from a CSV reader.
pub fn load_inventory<R: Read>(reader: R, path: &str) -> PlanResult<Vec<InventoryRecord>> {
    let mut records = Vec::new();
    for (line, row) in csv_rows::<InventoryRow, R>(reader) {
        let row = row.map_err(|reason| csv_error(path, line, reason))?;
        let abc_class = parse_abc(&row.abc_class)
            .ok_or_else(|| csv_error(path, line, format!("unknown ABC class '{}'", row.abc_class)))?;
        let xyz_class = parse_xyz(&row.xyz_class)
            .ok_or_else(|| csv_error(path, line, format!("unknown XYZ class '{}'", row.xyz_class)))?;
        let material_tier = parse_tier(&row.material_tier).ok_or_else(|| {
            csv_error(path, line, format!("unknown material tier '{}'", row.material_tier))
        })?;
        records.push(InventoryRecord {
            sku: row.sku,
            plant: row.plant,
            total_stock: row.total_stock,
            turns: row.turns,
            days_of_supply: row.days_of_supply,
            fill_rate: row.fill_rate,
            abc_class,
            xyz_class,
            lead_time_days: row.lead_time_days,
            lot_size: row.lot_size,
            daily_demand: row.daily_demand,
            unit_cost: row.unit_cost,
            margin_rate: row.margin_rate,
            carrying_cost_rate: row.carrying_cost_rate,
            excess_stock_value: row.excess_stock_value,
            material_tier,
        });
    }
    Ok(records)
}

/// Load inventory facts from a CSV file path.
pub fn load_inventory_file(path: &str) -> PlanResult<Vec<InventoryRecord>> {
    load_inventory(open(path)?, path)
}

// ---------------------------------------------------------------------------
// Baseline aggregates (JSON, keyed by scope)
// ---------------------------------------------------------------------------

/// Load baseline aggregates from a JSON reader. The document is an object
/// mapping scope labels to metric sets.
pub fn load_baselines<R: Read>(reader: R) -> PlanResult<HashMap<String, BaselineMetrics>> {
    Ok(serde_json::from_reader(reader)?)
}

/// Load baseline aggregates from a JSON file path.
pub fn load_baselines_file(path: &str) -> PlanResult<HashMap<String, BaselineMetrics>> {
    load_baselines(open(path)?)
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn open(path: &str) -> PlanResult<std::fs::File> {
    std::fs::File::open(path).map_err(|source| PlanError::FileOpen {
        path: path.to_string(),
        source,
    })
}

fn csv_error(path: &str, line: usize, reason: impl ToString) -> PlanError {
    PlanError::CsvParse {
        path: path.to_string(),
        line,
        reason: reason.to_string(),
    }
}

/// Deserialize CSV rows with 1-based data line numbers (header is line 1).
fn csv_rows<T, R>(reader: R) -> impl Iterator<Item = (usize, Result<T, csv::Error>)>
where
    T: for<'de> Deserialize<'de>,
    R: Read,
{
    csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader)
        .into_deserialize()
        .enumerate()
        .map(|(i, row)| (i + 2, row))
}

fn parse_elasticity(value: &str) -> Option<ElasticityClass> {
    match value.to_lowercase().as_str() {
        "premium" => Some(ElasticityClass::Premium),
        "standard" => Some(ElasticityClass::Standard),
        _ => None,
    }
}

fn parse_abc(value: &str) -> Option<AbcClass> {
    match value.to_uppercase().as_str() {
        "A" => Some(AbcClass::A),
        "B" => Some(AbcClass::B),
        "C" => Some(AbcClass::C),
        _ => None,
    }
}

fn parse_xyz(value: &str) -> Option<XyzClass> {
    match value.to_uppercase().as_str() {
        "X" => Some(XyzClass::X),
        "Y" => Some(XyzClass::Y),
        "Z" => Some(XyzClass::Z),
        _ => None,
    }
}

fn parse_tier(value: &str) -> Option<MaterialTier> {
    match value.to_lowercase().replace('_', "-").as_str() {
        "finished" | "fg" => Some(MaterialTier::Finished),
        "semi-finished" | "semifinished" | "sfg" => Some(MaterialTier::SemiFinished),
        "raw" | "rm" => Some(MaterialTier::Raw),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PRODUCTS_CSV: &str = "\
sku,name,category,unit_price,baseline_demand,elasticity
FG-100,Cola 6-pack,beverages,12.50,8000,standard
FG-200,Craft Tonic,beverages,24.00,2500,premium
FG-300,Table Water,beverages,6.00,15000,standard
";

    const BOM_CSV: &str = "\
sku,component_id,description,qty_per_unit,supplier,unit_cost
FG-100,CAN-330,330ml can,6,canco,0.12
FG-100,TRAY-6,6-pack tray,1,packwell,0.30
FG-200,BTL-200,200ml bottle,4,glassworks,0.45
FG-200,CAN-330,330ml can,2,canco,0.12
";

    const SUPPLIERS_CSV: &str = "\
supplier,lead_time_days,base_unit_rate,quality_rating
canco,21,0.12,0.98
packwell,14,0.30,0.95
glassworks,35,0.45,0.97
";

    const INVENTORY_CSV: &str = "\
sku,plant,total_stock,turns,days_of_supply,fill_rate,abc_class,xyz_class,lead_time_days,lot_size,daily_demand,unit_cost,margin_rate,carrying_cost_rate,excess_stock_value,material_tier
FG-100,plant-01,100000,5,60,96,A,X,30,500,120,4.0,0.35,0.22,12000,finished
SF-210,plant-01,40000,3,90,94,B,Y,45,1000,60,2.0,0.25,0.20,6000,semi-finished
RM-330,plant-02,25000,8,30,98,C,Z,15,5000,400,0.1,0.15,0.18,0,raw
";

    #[test]
    fn products_load_with_elasticity() {
        let products = load_products(PRODUCTS_CSV.as_bytes(), "products.csv").unwrap();
        assert_eq!(products.len(), 3);
        assert_eq!(products[0].sku, "FG-100");
        assert_eq!(products[0].elasticity, ElasticityClass::Standard);
        assert_eq!(products[1].elasticity, ElasticityClass::Premium);
        assert!((products[1].unit_price - 24.0).abs() < 1e-9);
    }

    #[test]
    fn bom_lines_group_by_parent_sku() {
        let boms = load_bom_lines(BOM_CSV.as_bytes(), "bom.csv").unwrap();
        assert_eq!(boms.len(), 2);
        assert_eq!(boms["FG-100"].len(), 2);
        assert_eq!(boms["FG-200"].len(), 2);
        // File order is preserved within a SKU.
        assert_eq!(boms["FG-100"][0].component_id, "CAN-330");
        assert_eq!(boms["FG-100"][1].component_id, "TRAY-6");
    }

    #[test]
    fn suppliers_key_by_name() {
        let suppliers = load_suppliers(SUPPLIERS_CSV.as_bytes(), "suppliers.csv").unwrap();
        assert_eq!(suppliers.len(), 3);
        assert_eq!(suppliers["canco"].lead_time_days, 21);
        assert!((suppliers["glassworks"].base_unit_rate - 0.45).abs() < 1e-9);
    }

    #[test]
    fn inventory_parses_tiers_and_classes() {
        let records = load_inventory(INVENTORY_CSV.as_bytes(), "inventory.csv").unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].material_tier, MaterialTier::Finished);
        assert_eq!(records[1].material_tier, MaterialTier::SemiFinished);
        assert_eq!(records[2].material_tier, MaterialTier::Raw);
        assert_eq!(records[0].abc_class, AbcClass::A);
        assert_eq!(records[2].xyz_class, XyzClass::Z);
        assert!((records[0].excess_stock_value - 12_000.0).abs() < 1e-9);
    }

    #[test]
    fn unknown_tier_reports_line_number() {
        let bad = "\
sku,plant,total_stock,turns,days_of_supply,fill_rate,abc_class,xyz_class,lead_time_days,lot_size,daily_demand,unit_cost,margin_rate,carrying_cost_rate,excess_stock_value,material_tier
FG-100,plant-01,100000,5,60,96,A,X,30,500,120,4.0,0.35,0.22,12000,plutonium
";
        let err = load_inventory(bad.as_bytes(), "inventory.csv").unwrap_err();
        match err {
            PlanError::CsvParse { line, .. } => assert_eq!(line, 2),
            other => panic!("expected CsvParse, got {other:?}"),
        }
    }

    #[test]
    fn tier_parsing_handles_variants() {
        assert_eq!(parse_tier("Semi_Finished"), Some(MaterialTier::SemiFinished));
        assert_eq!(parse_tier("FG"), Some(MaterialTier::Finished));
        assert_eq!(parse_tier("rm"), Some(MaterialTier::Raw));
        assert_eq!(parse_tier("unknown"), None);
    }

    #[test]
    fn baselines_load_from_json() {
        let json = r#"{
            "beverages": {
                "total_pos": 10000,
                "total_revenue": 2500000,
                "fg_inventory_req": 1200,
                "component_req": 4800,
                "cash_impact": 850000,
                "fill_rate": 95,
                "service_level": 97,
                "stockout_risk": 5
            }
        }"#;
        let baselines = load_baselines(json.as_bytes()).unwrap();
        assert_eq!(baselines["beverages"].total_pos, 10_000.0);
        assert_eq!(baselines["beverages"].fill_rate, 95.0);
    }
}
