use super::*;
use axum::{
    body::{self, Body},
    http::Request,
    response::Response,
};
use serde_json::{json, Value};
use tower::ServiceExt;

async fn test_app() -> Router {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    build_router(Arc::new(AppState {
        api: ApiContext { storage },
    }))
}

async fn json_body(response: Response) -> Value {
    let bytes = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    serde_json::from_slice(&bytes).expect("json")
}

fn post_employee(payload: Value) -> Request<Body> {
    Request::post("/api/employees")
        .header("content-type", "application/json")
        .body(Body::from(payload.to_string()))
        .expect("request")
}

fn ada() -> Value {
    json!({
        "name": "Ada",
        "extension": "100",
        "email": "ada@example.com",
        "title": "Engineer",
        "dateHired": "2019-03-04",
        "currentlyEmployed": true
    })
}

#[tokio::test]
async fn healthz_reports_ok_when_storage_is_ready() {
    let app = test_app().await;
    let request = Request::get("/healthz")
        .body(Body::empty())
        .expect("request");
    let response = app.oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::OK);

    let body = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    assert_eq!(body.as_ref(), b"ok");
}

#[tokio::test]
async fn create_then_list_and_fetch_employee() {
    let app = test_app().await;

    let response = app.clone().oneshot(post_employee(ada())).await.expect("response");
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = json_body(response).await;
    let id = created["employee"]["_id"].as_str().expect("id").to_string();
    assert_eq!(created["employee"]["dateHired"], "2019-03-04");

    let list = Request::get("/api/employees")
        .body(Body::empty())
        .expect("request");
    let response = app.clone().oneshot(list).await.expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    let listed: EmployeeListResponse =
        serde_json::from_value(json_body(response).await).expect("list body");
    assert_eq!(listed.count, 1);
    assert_eq!(listed.employees[0].id.as_str(), id);

    let fetch = Request::get(format!("/api/employees/{id}"))
        .body(Body::empty())
        .expect("request");
    let response = app.oneshot(fetch).await.expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["employee"]["name"], "Ada");
}

#[tokio::test]
async fn invalid_draft_is_rejected_with_api_error() {
    let app = test_app().await;
    let mut payload = ada();
    payload["email"] = json!("nobody");

    let response = app.oneshot(post_employee(payload)).await.expect("response");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let error: ApiError = serde_json::from_value(json_body(response).await).expect("error");
    assert_eq!(error.code, shared::error::ErrorCode::Validation);
}

#[tokio::test]
async fn delete_returns_no_content_then_not_found() {
    let app = test_app().await;
    let response = app.clone().oneshot(post_employee(ada())).await.expect("response");
    let id = json_body(response).await["employee"]["_id"]
        .as_str()
        .expect("id")
        .to_string();

    let delete = || {
        Request::delete(format!("/api/employees/{id}"))
            .body(Body::empty())
            .expect("request")
    };
    let response = app.clone().oneshot(delete()).await.expect("response");
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app.oneshot(delete()).await.expect("response");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
