use crate::state::Db;
use crate::v1::api_models::{CatalogRefreshDto, CatalogStatsDto, SearchResponseDto};
use crate::v1::error::ApiError;
use crate::v1::extractors::json::JsonBody;
use crate::v1::extractors::metadata::RequestMetadata;
use crate::v1::extractors::params::SearchTerm;
use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use chrono::Utc;
use shared::catalog::models::{
    Category, EquipmentModel, EquipmentType, NewEquipmentType, SeasonalCoefficient,
};
use shared::catalog::queries;
use shared::worksheet::summary::ChartSeries;
use tracing::info;

pub async fn list_categories(State(db): State<Db>) -> Result<Json<Vec<Category>>, ApiError> {
    Ok(Json(queries::list_categories(&db.pool).await?))
}

pub async fn get_category_types(
    State(db): State<Db>,
    Path(category_id): Path<i64>,
) -> Result<Json<Vec<EquipmentType>>, ApiError> {
    Ok(Json(queries::types_by_category(&db.pool, category_id).await?))
}

pub async fn get_category_seasonal(
    State(db): State<Db>,
    Path(category_id): Path<i64>,
) -> Result<Json<Vec<SeasonalCoefficient>>, ApiError> {
    Ok(Json(
        queries::seasonal_coefficients(&db.pool, category_id).await?,
    ))
}

pub async fn get_type_models(
    State(db): State<Db>,
    Path(type_id): Path<i64>,
) -> Result<Json<Vec<EquipmentModel>>, ApiError> {
    Ok(Json(queries::models_by_type(&db.pool, type_id).await?))
}

/// On success, returns [`StatusCode::CREATED`] and the stored [`EquipmentType`] as JSON
pub async fn create_equipment_type(
    State(db): State<Db>,
    JsonBody(new_type): JsonBody<NewEquipmentType>,
) -> Result<impl IntoResponse, ApiError> {
    let created = queries::insert_equipment_type(&db.pool, &new_type).await?;
    info!(
        type_id = created.id,
        type_name = %created.name,
        category = %created.category_name,
        "added equipment type to catalog"
    );
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn search(
    State(db): State<Db>,
    SearchTerm(term): SearchTerm,
) -> Result<Json<SearchResponseDto>, ApiError> {
    let results = queries::search_equipment(&db.pool, &term).await?;
    Ok(Json(SearchResponseDto {
        term,
        count: results.len(),
        results,
    }))
}

pub async fn get_stats(
    State(db): State<Db>,
    meta: RequestMetadata,
) -> Result<Json<CatalogStatsDto>, ApiError> {
    let categories = queries::power_stats_by_category(&db.pool).await?;
    let chart: ChartSeries = categories
        .iter()
        .map(|s| (s.category.as_str(), s.total_power_kw))
        .collect();

    Ok(Json(CatalogStatsDto {
        requested_at: meta.requested_at,
        categories,
        chart,
    }))
}

/// Re-applies migrations and seeding. Existing catalog rows are left untouched.
pub async fn refresh_catalog(State(db): State<Db>) -> Result<Json<CatalogRefreshDto>, ApiError> {
    let seeded = shared::prepare_catalog(&db.pool).await?;
    let counts = queries::catalog_counts(&db.pool).await?;
    info!(seeded, ?counts, "catalog refreshed");

    Ok(Json(CatalogRefreshDto {
        refreshed_at: Utc::now(),
        seeded,
        counts,
    }))
}
