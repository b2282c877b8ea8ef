use super::*;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get},
    Json, Router,
};
use chrono::NaiveDate;
use serde_json::{json, Value};
use shared::{domain::EmployeeId, protocol::EmployeeDraft};
use std::sync::{
    atomic::{AtomicBool, AtomicUsize, Ordering},
    Arc,
};
use tokio::{net::TcpListener, sync::Mutex};

#[derive(Clone)]
struct ServerState {
    employees: Arc<Mutex<Vec<Value>>>,
    posted: Arc<Mutex<Vec<Value>>>,
    list_calls: Arc<AtomicUsize>,
    fail_list: Arc<AtomicBool>,
    reject_deletes: Arc<AtomicBool>,
    next_id: Arc<AtomicUsize>,
}

async fn handle_list(State(state): State<ServerState>) -> Result<Json<Value>, StatusCode> {
    state.list_calls.fetch_add(1, Ordering::SeqCst);
    if state.fail_list.load(Ordering::SeqCst) {
        return Err(StatusCode::SERVICE_UNAVAILABLE);
    }
    let employees = state.employees.lock().await.clone();
    Ok(Json(json!({ "count": employees.len(), "employees": employees })))
}

async fn handle_create(
    State(state): State<ServerState>,
    Json(mut payload): Json<Value>,
) -> (StatusCode, Json<Value>) {
    state.posted.lock().await.push(payload.clone());
    let id = state.next_id.fetch_add(1, Ordering::SeqCst);
    payload["_id"] = json!(id);
    let hired = payload["dateHired"].as_str().unwrap_or_default().to_string();
    payload["dateHired"] = json!(format!("{hired}T00:00:00.000Z"));
    state.employees.lock().await.push(payload.clone());
    (StatusCode::CREATED, Json(json!({ "employee": payload })))
}

async fn handle_delete(State(state): State<ServerState>, Path(id): Path<String>) -> StatusCode {
    if state.reject_deletes.load(Ordering::SeqCst) {
        return StatusCode::INTERNAL_SERVER_ERROR;
    }
    let mut employees = state.employees.lock().await;
    let before = employees.len();
    employees.retain(|employee| employee["_id"].to_string().trim_matches('"') != id);
    if employees.len() == before {
        StatusCode::NOT_FOUND
    } else {
        StatusCode::NO_CONTENT
    }
}

async fn spawn_employee_server(seed: Vec<Value>) -> (String, ServerState) {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    let state = ServerState {
        next_id: Arc::new(AtomicUsize::new(seed.len() + 1)),
        employees: Arc::new(Mutex::new(seed)),
        posted: Arc::new(Mutex::new(Vec::new())),
        list_calls: Arc::new(AtomicUsize::new(0)),
        fail_list: Arc::new(AtomicBool::new(false)),
        reject_deletes: Arc::new(AtomicBool::new(false)),
    };
    let app = Router::new()
        .route("/api/employees", get(handle_list).post(handle_create))
        .route("/api/employees/:id", delete(handle_delete))
        .with_state(state.clone());
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    (format!("http://{addr}"), state)
}

fn seed() -> Vec<Value> {
    vec![
        json!({
            "_id": 1,
            "name": "Ada",
            "extension": "100",
            "email": "ada@example.com",
            "title": "Engineer",
            "dateHired": "2019-03-04T00:00:00.000Z",
            "currentlyEmployed": true
        }),
        json!({
            "_id": 2,
            "name": "Bob",
            "extension": "101",
            "email": "bob@example.com",
            "title": "Analyst",
            "dateHired": "2020-07-15",
            "currentlyEmployed": false
        }),
    ]
}

fn controller_for(server_url: &str) -> Arc<ListController> {
    let api = HttpEmployeeApi::new(server_url).expect("api");
    ListController::new(Arc::new(api))
}

#[tokio::test]
async fn load_parses_hire_dates_and_keeps_server_order() {
    let (server_url, state) = spawn_employee_server(seed()).await;
    let controller = controller_for(&server_url);

    controller.load().await;

    let employees = controller.employees().await;
    assert_eq!(employees.len(), 2);
    assert_eq!(employees[0].id, EmployeeId::from("1"));
    assert_eq!(employees[0].date_hired, NaiveDate::from_ymd_opt(2019, 3, 4));
    assert_eq!(employees[1].date_hired, NaiveDate::from_ymd_opt(2020, 7, 15));
    assert!(!employees[1].currently_employed);
    assert_eq!(state.list_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn create_posts_draft_and_appends_returned_record() {
    let (server_url, state) = spawn_employee_server(seed()).await;
    let controller = controller_for(&server_url);
    controller.load().await;

    controller
        .create(EmployeeDraft {
            name: "A".to_string(),
            extension: "300".to_string(),
            email: "a@example.com".to_string(),
            title: "Clerk".to_string(),
            date_hired: NaiveDate::from_ymd_opt(2024, 1, 1).expect("date"),
            currently_employed: true,
        })
        .await;

    let employees = controller.employees().await;
    assert_eq!(employees.len(), 3);
    let last = employees.last().expect("appended");
    assert_eq!(last.id, EmployeeId::from("3"));
    assert_eq!(last.name, "A");
    assert_eq!(last.date_hired, NaiveDate::from_ymd_opt(2024, 1, 1));

    let posted = state.posted.lock().await;
    assert_eq!(posted[0]["dateHired"], "2024-01-01");
    assert!(posted[0].get("_id").is_none());
    assert_eq!(state.list_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn delete_reloads_from_backend() {
    let (server_url, state) = spawn_employee_server(seed()).await;
    let controller = controller_for(&server_url);
    controller.load().await;

    controller.delete(&EmployeeId::from("1")).await;

    assert_eq!(state.list_calls.load(Ordering::SeqCst), 2);
    let employees = controller.employees().await;
    assert!(!employees.contains(&EmployeeId::from("1")));
    assert_eq!(employees.len(), 1);
}

#[tokio::test]
async fn rejected_delete_keeps_rows_and_skips_reload() {
    let (server_url, state) = spawn_employee_server(seed()).await;
    let controller = controller_for(&server_url);
    controller.load().await;
    state.reject_deletes.store(true, Ordering::SeqCst);

    controller.delete(&EmployeeId::from("1")).await;

    assert_eq!(state.list_calls.load(Ordering::SeqCst), 1);
    assert_eq!(controller.employees().await.len(), 2);
}

#[tokio::test]
async fn delete_of_unknown_id_is_a_rejection() {
    let (server_url, state) = spawn_employee_server(seed()).await;
    let controller = controller_for(&server_url);
    controller.load().await;
    let mut events = controller.subscribe();

    controller.delete(&EmployeeId::from("404")).await;

    assert_eq!(state.list_calls.load(Ordering::SeqCst), 1);
    assert!(matches!(
        events.try_recv(),
        Ok(ListEvent::Failed {
            operation: Operation::Delete,
            ..
        })
    ));
}

#[tokio::test]
async fn server_error_on_load_leaves_state_unchanged() {
    let (server_url, state) = spawn_employee_server(seed()).await;
    let controller = controller_for(&server_url);
    controller.load().await;
    state.fail_list.store(true, Ordering::SeqCst);

    controller.load().await;

    assert_eq!(controller.employees().await.len(), 2);
}

#[tokio::test]
async fn unreachable_backend_is_logged_not_applied() {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let controller = controller_for(&format!("http://{addr}"));
    let mut events = controller.subscribe();
    controller.load().await;

    assert!(controller.employees().await.is_empty());
    match events.try_recv() {
        Ok(ListEvent::Failed { operation, message }) => {
            assert_eq!(operation, Operation::Load);
            assert!(message.contains("transport"), "unexpected message: {message}");
        }
        other => panic!("expected load failure, got {other:?}"),
    }
}

#[test]
fn api_urls_keep_base_path_prefix() {
    let api = HttpEmployeeApi::new("http://example.com/hr/").expect("api");
    assert_eq!(
        api.employees_url(None).expect("url").as_str(),
        "http://example.com/hr/api/employees"
    );
    assert_eq!(
        api.employees_url(Some(&EmployeeId::from("a b")))
            .expect("url")
            .as_str(),
        "http://example.com/hr/api/employees/a%20b"
    );

    let root = HttpEmployeeApi::new("http://127.0.0.1:8080").expect("api");
    assert_eq!(
        root.employees_url(None).expect("url").as_str(),
        "http://127.0.0.1:8080/api/employees"
    );
}

#[test]
fn rejects_unusable_server_urls() {
    assert!(matches!(
        HttpEmployeeApi::new("not a url"),
        Err(ClientError::InvalidServerUrl { .. })
    ));
    assert!(matches!(
        HttpEmployeeApi::new("mailto:hr@example.com"),
        Err(ClientError::CannotBeBase(_))
    ));
}
