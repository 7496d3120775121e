use crate::state::{Db, SharedWorksheet};
use crate::v1::api_models::{
    AddFromCatalogRequest, AddFromSearchRequest, WorksheetDto, WorksheetSummaryDto,
};
use crate::v1::error::ApiError;
use crate::v1::extractors::json::JsonBody;
use crate::v1::extractors::metadata::RequestMetadata;
use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use shared::catalog::queries;
use shared::worksheet::ManualEntry;
use shared::worksheet::bacs::BacsThresholds;
use tracing::info;

pub async fn list_entries(State(worksheet): State<SharedWorksheet>) -> Json<WorksheetDto> {
    let entries = worksheet.lock().entries().to_vec();
    Json(WorksheetDto {
        count: entries.len(),
        entries,
    })
}

/// On success, returns [`StatusCode::CREATED`] and the new worksheet entry as JSON
pub async fn add_from_catalog(
    State(db): State<Db>,
    State(worksheet): State<SharedWorksheet>,
    JsonBody(request): JsonBody<AddFromCatalogRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let equipment_type = queries::get_equipment_type(&db.pool, request.type_id).await?;
    let entry = worksheet
        .lock()
        .add_from_catalog(&equipment_type, request.quantity)?;

    info!(
        id = entry.id,
        equipment = %entry.name,
        quantity = entry.quantity,
        "added catalog equipment"
    );
    Ok((StatusCode::CREATED, Json(entry)))
}

/// On success, returns [`StatusCode::CREATED`] and the new worksheet entry as JSON
pub async fn add_from_search(
    State(db): State<Db>,
    State(worksheet): State<SharedWorksheet>,
    JsonBody(request): JsonBody<AddFromSearchRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let equipment_type = queries::get_equipment_type(&db.pool, request.type_id).await?;
    let entry = worksheet.lock().add_from_search(
        &equipment_type,
        request.quantity,
        &request.search_term,
    )?;

    info!(
        id = entry.id,
        equipment = %entry.name,
        quantity = entry.quantity,
        "added searched equipment"
    );
    Ok((StatusCode::CREATED, Json(entry)))
}

/// On success, returns [`StatusCode::CREATED`] and the new worksheet entry as JSON
pub async fn add_manual(
    State(worksheet): State<SharedWorksheet>,
    JsonBody(manual): JsonBody<ManualEntry>,
) -> Result<impl IntoResponse, ApiError> {
    let entry = worksheet.lock().add_manual(manual)?;

    info!(
        id = entry.id,
        equipment = %entry.name,
        quantity = entry.quantity,
        "added manual equipment"
    );
    Ok((StatusCode::CREATED, Json(entry)))
}

pub async fn get_summary(
    State(worksheet): State<SharedWorksheet>,
    State(bacs): State<BacsThresholds>,
    meta: RequestMetadata,
) -> Json<WorksheetSummaryDto> {
    let summary = worksheet.lock().summary(&bacs);
    Json(WorksheetSummaryDto {
        requested_at: meta.requested_at,
        summary,
    })
}
