mod common;

use axum::http::StatusCode;
use serde_json::{Value, json};

use common::TestApp;

fn entry() -> Value {
    json!({
        "title": "Consultant",
        "company": "Acme",
        "period": "2012 - 2015",
        "location": "Lisbon",
        "desc": "Integration work.",
        "skills": ["Java"],
        "thumbnail": "/exp3.svg"
    })
}

#[tokio::test]
async fn add_returns_201_with_assigned_id() {
    let app = TestApp::new().await;
    let (status, body) = app.post("/content/experience", &entry()).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Experience added successfully");
    assert_eq!(body["experience"]["id"], 3);
    assert_eq!(body["experience"]["company"], "Acme");

    let (_, list) = app.get("/content/experience").await;
    assert_eq!(list.as_array().unwrap().len(), 3);
    assert_eq!(list[2]["id"], 3);
}

#[tokio::test]
async fn add_with_id_zero_is_assigned() {
    let app = TestApp::new().await;
    let mut body = entry();
    body["id"] = json!(0);
    let (status, created) = app.post("/content/experience", &body).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["experience"]["id"], 3);
}

#[tokio::test]
async fn missing_required_field_names_it() {
    let app = TestApp::new().await;
    for field in ["title", "company", "period", "location", "desc"] {
        let mut body = entry();
        body[field] = json!("   ");
        let (status, err) = app.post("/content/experience", &body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{field}");
        assert_eq!(err["error"], format!("Missing required field: {field}"));
    }

    let (_, list) = app.get("/content/experience").await;
    assert_eq!(list.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn update_with_mismatched_id_is_400() {
    let app = TestApp::new().await;
    let mut body = entry();
    body["id"] = json!(2);
    let (status, err) = app.put("/content/experience/1", &body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(err["error"], "ID mismatch: path has 1, body has 2");
}

#[tokio::test]
async fn update_without_body_id_takes_path_id() {
    let app = TestApp::new().await;
    let (status, body) = app.put("/content/experience/2", &entry()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    let (_, fetched) = app.get("/content/experience/2").await;
    assert_eq!(fetched["id"], 2);
    assert_eq!(fetched["company"], "Acme");
}

#[tokio::test]
async fn update_unknown_id_is_404() {
    let app = TestApp::new().await;
    let (status, _) = app.put("/content/experience/42", &entry()).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_then_add_never_reuses_a_live_id() {
    let app = TestApp::new().await;
    let (status, _) = app.delete("/content/experience/2").await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = app.delete("/content/experience/2").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, created) = app.post("/content/experience", &entry()).await;
    assert_eq!(created["experience"]["id"], 2);
    let (_, list) = app.get("/content/experience").await;
    let ids: Vec<u64> = list
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["id"].as_u64().unwrap())
        .collect();
    assert_eq!(ids, vec![1, 2]);
}

#[tokio::test]
async fn whole_section_put_is_not_routed() {
    let app = TestApp::new().await;
    let (status, _) = app.put("/content/experience", &json!([])).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
}
