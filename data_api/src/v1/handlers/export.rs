use crate::state::{Db, SharedWorksheet};
use crate::v1::error::ApiError;
use axum::extract::{Path, State};
use axum::http::header;
use axum::response::IntoResponse;
use chrono::Local;
use shared::catalog::queries;
use shared::export::{
    CSV_CONTENT_TYPE, CatalogSheet, WorksheetSheet, catalog_file_name, to_csv,
    worksheet_file_name, worksheet_sheet_csv,
};
use shared::worksheet::bacs::BacsThresholds;

fn csv_attachment(file_name: String, body: Vec<u8>) -> impl IntoResponse {
    (
        [
            (header::CONTENT_TYPE, CSV_CONTENT_TYPE.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{file_name}\""),
            ),
        ],
        body,
    )
}

pub async fn export_catalog_sheet(
    State(db): State<Db>,
    Path(sheet): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let sheet: CatalogSheet = sheet.parse()?;
    let body = match sheet {
        CatalogSheet::Categories => to_csv(&queries::list_categories(&db.pool).await?)?,
        CatalogSheet::Types => to_csv(&queries::all_equipment_types(&db.pool).await?)?,
        CatalogSheet::Models => to_csv(&queries::all_equipment_models(&db.pool).await?)?,
    };

    Ok(csv_attachment(catalog_file_name(sheet), body))
}

pub async fn export_worksheet_sheet(
    State(worksheet): State<SharedWorksheet>,
    State(bacs): State<BacsThresholds>,
    Path(sheet): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let sheet: WorksheetSheet = sheet.parse()?;
    let body = {
        let worksheet = worksheet.lock();
        let summary = worksheet.summary(&bacs);
        worksheet_sheet_csv(sheet, worksheet.entries(), &summary)?
    };

    Ok(csv_attachment(
        worksheet_file_name(&Local::now(), sheet),
        body,
    ))
}
