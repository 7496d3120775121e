use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::catalog::models::{CatalogCounts, CategoryPowerStats, SearchHit};
use shared::worksheet::summary::{ChartSeries, WorksheetSummary};
use shared::worksheet::{WorksheetEntry, default_quantity};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponseDto {
    pub term: String,
    pub count: usize,
    pub results: Vec<SearchHit>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogStatsDto {
    pub requested_at: DateTime<Utc>,
    pub categories: Vec<CategoryPowerStats>,
    /// Total power per category, in the same order as `categories`.
    pub chart: ChartSeries,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogRefreshDto {
    pub refreshed_at: DateTime<Utc>,
    pub seeded: bool,
    pub counts: CatalogCounts,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddFromCatalogRequest {
    pub type_id: i64,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddFromSearchRequest {
    pub type_id: i64,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
    pub search_term: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorksheetDto {
    pub count: usize,
    pub entries: Vec<WorksheetEntry>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorksheetSummaryDto {
    pub requested_at: DateTime<Utc>,
    #[serde(flatten)]
    pub summary: WorksheetSummary,
}
