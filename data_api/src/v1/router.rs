use crate::state::AppState;
use crate::v1::handlers::catalog::{
    create_equipment_type, get_category_seasonal, get_category_types, get_stats, get_type_models,
    list_categories, refresh_catalog, search,
};
use crate::v1::handlers::export::{export_catalog_sheet, export_worksheet_sheet};
use crate::v1::handlers::worksheet::{
    add_from_catalog, add_from_search, add_manual, get_summary, list_entries,
};
use axum::Router;
use axum::routing::{get, post};

pub fn router(state: AppState) -> Router {
    Router::<AppState>::new()
        .merge(catalog_routes())
        .merge(worksheet_routes())
        .with_state(state)
}

fn catalog_routes() -> Router<AppState> {
    Router::<AppState>::new()
        .route("/categories", get(list_categories))
        .route("/categories/{id}/types", get(get_category_types))
        .route("/categories/{id}/seasonal", get(get_category_seasonal))
        .route("/types", post(create_equipment_type))
        .route("/types/{id}/models", get(get_type_models))
        .route("/search", get(search))
        .route("/stats", get(get_stats))
        .route("/catalog/refresh", post(refresh_catalog))
        .route("/catalog/export/{sheet}", get(export_catalog_sheet))
}

fn worksheet_routes() -> Router<AppState> {
    Router::<AppState>::new()
        .route("/worksheet", get(list_entries))
        .route("/worksheet/catalog", post(add_from_catalog))
        .route("/worksheet/search", post(add_from_search))
        .route("/worksheet/manual", post(add_manual))
        .route("/worksheet/summary", get(get_summary))
        .route("/worksheet/export/{sheet}", get(export_worksheet_sheet))
}
