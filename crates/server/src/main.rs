use std::{net::SocketAddr, sync::Arc};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use shared::{
    domain::EmployeeId,
    error::ApiError,
    protocol::{employee_route, employees_route, EmployeeDraft, EmployeeListResponse, EmployeeResponse},
};
use storage::Storage;
use tower_http::trace::TraceLayer;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod api;
mod app_state;
mod config;

use api::ApiContext;
use app_state::AppState;
use config::{load_settings, prepare_database_url};

type ApiResult<T> = Result<T, (StatusCode, Json<ApiError>)>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let settings = load_settings();
    let database_url = prepare_database_url(&settings.database_url)?;
    let storage = Storage::new(&database_url).await.map_err(|error| {
        error!(
            %database_url,
            %error,
            "failed to open SQLite database; verify parent directory exists and permissions are correct"
        );
        error
    })?;
    let state = AppState {
        api: ApiContext { storage },
    };
    let app = build_router(Arc::new(state));

    let addr: SocketAddr = settings.server_bind.parse()?;
    info!(%addr, "server listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route(
            employees_route(),
            get(http_list_employees).post(http_create_employee),
        )
        .route(
            employee_route(),
            get(http_get_employee).delete(http_delete_employee),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn healthz(State(state): State<Arc<AppState>>) -> Result<&'static str, StatusCode> {
    state.api.storage.health_check().await.map_err(|error| {
        error!(%error, "health check failed");
        StatusCode::SERVICE_UNAVAILABLE
    })?;
    Ok("ok")
}

async fn http_list_employees(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<EmployeeListResponse>> {
    let response = api::list_employees(&state.api).await.map_err(reject)?;
    Ok(Json(response))
}

async fn http_get_employee(
    State(state): State<Arc<AppState>>,
    Path(employee_id): Path<String>,
) -> ApiResult<Json<EmployeeResponse>> {
    let employee = api::get_employee(&state.api, &EmployeeId::new(employee_id))
        .await
        .map_err(reject)?;
    Ok(Json(EmployeeResponse { employee }))
}

async fn http_create_employee(
    State(state): State<Arc<AppState>>,
    Json(draft): Json<EmployeeDraft>,
) -> ApiResult<(StatusCode, Json<EmployeeResponse>)> {
    let employee = api::create_employee(&state.api, draft)
        .await
        .map_err(reject)?;
    Ok((StatusCode::CREATED, Json(EmployeeResponse { employee })))
}

async fn http_delete_employee(
    State(state): State<Arc<AppState>>,
    Path(employee_id): Path<String>,
) -> ApiResult<StatusCode> {
    api::delete_employee(&state.api, &EmployeeId::new(employee_id))
        .await
        .map_err(reject)?;
    Ok(StatusCode::NO_CONTENT)
}

fn reject(e: ApiError) -> (StatusCode, Json<ApiError>) {
    let status =
        StatusCode::from_u16(e.code.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(e))
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
