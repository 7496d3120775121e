use crate::state::AppState;
use crate::v1::router;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use shared::{Config, DatabaseConfig, initialize_db};
use tower::ServiceExt;

async fn test_state() -> AppState {
    let pool = initialize_db(&DatabaseConfig::in_memory())
        .await
        .expect("in-memory catalog");
    AppState::new(pool, &Config::default())
}

fn app(state: &AppState) -> Router {
    router(state.clone())
}

async fn send(state: &AppState, request: Request<Body>) -> (StatusCode, Vec<u8>) {
    let response = app(state).oneshot(request).await.expect("infallible");
    let status = response.status();
    let body = response
        .into_body()
        .collect()
        .await
        .expect("body")
        .to_bytes()
        .to_vec();
    (status, body)
}

async fn get_json(state: &AppState, uri: &str) -> (StatusCode, Value) {
    let request = Request::get(uri).body(Body::empty()).unwrap();
    let (status, body) = send(state, request).await;
    (status, serde_json::from_slice(&body).expect("json body"))
}

async fn post_json(state: &AppState, uri: &str, payload: Value) -> (StatusCode, Value) {
    let request = Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(payload.to_string()))
        .unwrap();
    let (status, body) = send(state, request).await;
    (status, serde_json::from_slice(&body).expect("json body"))
}

async fn daikin_type_id(state: &AppState) -> i64 {
    let (_, body) = get_json(state, "/search?q=daikin").await;
    body["results"][0]["typeId"].as_i64().expect("seeded Daikin type")
}

#[tokio::test]
async fn lists_seeded_categories() {
    let state = test_state().await;
    let (status, body) = get_json(&state, "/categories").await;

    assert_eq!(status, StatusCode::OK);
    let categories = body.as_array().unwrap();
    assert_eq!(categories.len(), 12);
    assert_eq!(categories[0]["name"], "Ascenseur");
    assert_eq!(categories[0]["unit"], "kW");
}

#[tokio::test]
async fn unknown_category_is_404() {
    let state = test_state().await;
    let (status, body) = get_json(&state, "/categories/999/types").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["statusCode"], 404);
    assert!(body["message"].as_str().unwrap().ends_with("does not exist"));
}

#[tokio::test]
async fn search_requires_a_term() {
    let state = test_state().await;

    let (status, body) = get_json(&state, "/search?q=%20%20").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["statusCode"], 400);

    let (status, _) = get_json(&state, "/search").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = get_json(&state, "/search?q=%20led%20").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["term"], "led");
    assert_eq!(body["count"], 4);
}

#[tokio::test]
async fn models_for_daikin_type() {
    let state = test_state().await;
    let type_id = daikin_type_id(&state).await;

    let (status, body) = get_json(&state, &format!("/types/{type_id}/models")).await;
    assert_eq!(status, StatusCode::OK);
    let models: Vec<_> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["model"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(models, vec!["RXYQ14P7W1B", "RXYQ8P7W1B"]);
}

#[tokio::test]
async fn stats_chart_follows_category_order() {
    let state = test_state().await;
    let (status, body) = get_json(&state, "/stats").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["categories"][0]["category"], "CVC - VRV/DRV");
    assert_eq!(body["chart"]["labels"][0], "CVC - VRV/DRV");
    assert_eq!(body["chart"]["labels"].as_array().unwrap().len(), 12);
    assert!(body["requestedAt"].is_string());
}

#[tokio::test]
async fn creates_equipment_type() {
    let state = test_state().await;
    let (_, categories) = get_json(&state, "/categories").await;
    let category_id = categories[0]["id"].as_i64().unwrap();

    let (status, body) = post_json(
        &state,
        "/types",
        json!({
            "categoryId": category_id,
            "name": "Ascenseur 6 personnes",
            "averagePowerKw": 6.5,
            "minPowerKw": 5.2,
            "maxPowerKw": 7.8
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["categoryName"], "Ascenseur");
    assert_eq!(body["loadFactorPct"], 70.0);

    let (status, body) = post_json(&state, "/types", json!({ "name": "incomplete" })).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["statusCode"], 422);
}

#[tokio::test]
async fn refresh_does_not_reseed() {
    let state = test_state().await;
    let (status, body) = post_json(&state, "/catalog/refresh", json!({})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["seeded"], false);
    assert_eq!(body["counts"]["equipmentTypes"], 35);
}

#[tokio::test]
async fn empty_worksheet_summary() {
    let state = test_state().await;

    let (_, entries) = get_json(&state, "/worksheet").await;
    assert_eq!(entries["count"], 0);

    let (status, summary) = get_json(&state, "/worksheet/summary").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(summary["empty"], true);
    assert_eq!(summary["totalPowerKw"], 0.0);
    assert_eq!(summary["bacs"]["label"], "NON ASSUJETTI");
    assert!(summary["bacs"]["largestEquipmentKw"].is_null());
}

#[tokio::test]
async fn worksheet_collects_catalog_and_manual_equipment() {
    let state = test_state().await;
    let type_id = daikin_type_id(&state).await;

    let (status, entry) = post_json(
        &state,
        "/worksheet/catalog",
        json!({ "typeId": type_id, "quantity": 2 }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(entry["id"], 1);
    assert_eq!(entry["fromCatalog"], true);
    assert_eq!(entry["notes"], format!("Imported from catalog - ID: {type_id}"));

    let (status, entry) = post_json(
        &state,
        "/worksheet/search",
        json!({ "typeId": type_id, "searchTerm": "daikin" }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(entry["quantity"], 1);
    assert_eq!(entry["notes"], "Catalog search: daikin");

    let (status, entry) = post_json(
        &state,
        "/worksheet/manual",
        json!({ "name": "Chaudière gaz", "category": "CVC", "powerKw": 75.0 }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(entry["id"], 3);
    assert_eq!(entry["category"], "CVC");

    let (_, entries) = get_json(&state, "/worksheet").await;
    assert_eq!(entries["count"], 3);

    let (_, summary) = get_json(&state, "/worksheet/summary").await;
    let total = summary["totalPowerKw"].as_f64().unwrap();
    assert!((total - (7.1 * 3.0 + 75.0)).abs() < 1e-9);
    assert_eq!(summary["equipmentCount"], 3);
    assert_eq!(summary["catalogCount"], 2);
    assert_eq!(summary["bacs"]["largestEquipmentKw"], 75.0);
    assert_eq!(summary["bacs"]["singleThresholdExceeded"], true);
    assert_eq!(summary["bacs"]["label"], "ASSUJETTI");
}

#[tokio::test]
async fn rejects_invalid_worksheet_entries() {
    let state = test_state().await;

    let (status, body) = post_json(
        &state,
        "/worksheet/manual",
        json!({ "name": "Veilleuse", "category": "Éclairage", "powerKw": 0.001 }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["statusCode"], 400);

    let (status, _) = post_json(
        &state,
        "/worksheet/catalog",
        json!({ "typeId": 10_000, "quantity": 1 }),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let type_id = daikin_type_id(&state).await;
    let (status, _) = post_json(
        &state,
        "/worksheet/catalog",
        json!({ "typeId": type_id, "quantity": 0 }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, entries) = get_json(&state, "/worksheet").await;
    assert_eq!(entries["count"], 0);
}

#[tokio::test]
async fn exports_csv_sheets() {
    let state = test_state().await;

    let request = Request::get("/catalog/export/categories")
        .body(Body::empty())
        .unwrap();
    let response = app(&state).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "text/csv; charset=utf-8"
    );
    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=\"base_equipements_categories.csv\""
    );
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let text = String::from_utf8(body.to_vec()).unwrap();
    assert_eq!(text.lines().count(), 13);

    for (sheet, lines, header) in [
        ("types", 36, "id,categoryId,categoryName,name,averagePowerKw"),
        ("models", 14, "id,typeId,typeName,brand,model,ratedPowerKw"),
    ] {
        let request = Request::get(format!("/catalog/export/{sheet}"))
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(&state, request).await;
        assert_eq!(status, StatusCode::OK);
        let text = String::from_utf8(body).unwrap();
        assert_eq!(text.lines().count(), lines, "{sheet}");
        assert!(text.starts_with(header), "{sheet}");
    }

    let (status, _) = get_json(&state, "/catalog/export/sheet1").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = get_json(&state, "/worksheet/export/summary").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    post_json(
        &state,
        "/worksheet/manual",
        json!({ "name": "Pompe", "category": "Autre", "powerKw": 1.5, "quantity": 2 }),
    )
    .await;
    let request = Request::get("/worksheet/export/summary")
        .body(Body::empty())
        .unwrap();
    let response = app(&state).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let disposition = response.headers()[header::CONTENT_DISPOSITION]
        .to_str()
        .unwrap()
        .to_string();
    assert!(disposition.starts_with("attachment; filename=\"bilan_puissance_"));
    assert!(disposition.ends_with("_summary.csv\""));
    // bilan_puissance_YYYYMMDD_HHMM_summary.csv
    let file_name = disposition
        .trim_start_matches("attachment; filename=\"")
        .trim_end_matches('"');
    assert_eq!(file_name.len(), "bilan_puissance_20250309_1405_summary.csv".len());

    let body = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(
        String::from_utf8(body.to_vec()).unwrap(),
        "metric,value\nTotal power,3.0 kW\nEquipment count,1\nBACS compliance,NON ASSUJETTI\n"
    );
}
