use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub unit: String,
}

/// An equipment type joined with the name of its category.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct EquipmentType {
    pub id: i64,
    pub category_id: i64,
    pub category_name: String,
    pub name: String,
    pub average_power_kw: f64,
    pub min_power_kw: f64,
    pub max_power_kw: f64,
    pub load_factor_pct: f64,
    pub operating_hours_per_day: f64,
}

/// A manufacturer model joined with the name of its equipment type.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct EquipmentModel {
    pub id: i64,
    pub type_id: i64,
    pub type_name: String,
    pub brand: String,
    pub model: String,
    pub rated_power_kw: f64,
    pub year: Option<i64>,
    pub energy_class: Option<String>,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct SeasonalCoefficient {
    pub month: i64,
    pub category_id: i64,
    pub coefficient: f64,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct SearchHit {
    pub type_id: i64,
    pub type_name: String,
    pub average_power_kw: f64,
    pub min_power_kw: f64,
    pub max_power_kw: f64,
    pub category_name: String,
    pub unit: String,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct CategoryPowerStats {
    pub category: String,
    pub type_count: i64,
    pub average_power_kw: f64,
    pub min_power_kw: f64,
    pub max_power_kw: f64,
    pub total_power_kw: f64,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogCounts {
    pub categories: i64,
    pub equipment_types: i64,
    pub equipment_models: i64,
    pub seasonal_coefficients: i64,
}

/// A new equipment type to add to the catalog. Load factor and daily operating hours fall back to
/// the catalog defaults when omitted.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEquipmentType {
    pub category_id: i64,
    pub name: String,
    pub average_power_kw: f64,
    pub min_power_kw: f64,
    pub max_power_kw: f64,
    pub load_factor_pct: Option<f64>,
    pub operating_hours_per_day: Option<f64>,
}

pub const DEFAULT_LOAD_FACTOR_PCT: f64 = 70.0;
pub const DEFAULT_OPERATING_HOURS_PER_DAY: f64 = 10.0;
