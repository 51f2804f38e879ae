//! API Handlers
//!
//! HTTP request handlers for each task service endpoint.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    http::StatusCode,
    Json,
};
use tracing::debug;

use crate::api::extract::LenientJson;
use crate::error::{Result, TaskError};
use crate::models::{
    CreateTaskRequest, DataResponse, HealthResponse, ListQuery, ListResponse, Task, TaskSummary,
    UpdateTaskRequest,
};
use crate::store::TaskStore;

/// Application state shared across all handlers.
///
/// Contains the task store wrapped in Arc<RwLock<>> for thread-safe access.
#[derive(Clone)]
pub struct AppState {
    /// Thread-safe task store
    pub store: Arc<RwLock<TaskStore>>,
    /// Delay applied before answering listings
    pub list_delay: Duration,
    /// Whether 500 responses may carry the underlying error message
    pub expose_error_details: bool,
}

impl AppState {
    /// Creates a new AppState around the given store, with no listing delay
    /// and error details exposed.
    pub fn new(store: TaskStore) -> Self {
        Self {
            store: Arc::new(RwLock::new(store)),
            list_delay: Duration::ZERO,
            expose_error_details: true,
        }
    }

    /// Creates a new AppState from configuration.
    ///
    /// Starts from the seeded store.
    pub fn from_config(config: &crate::config::Config) -> Self {
        Self {
            list_delay: config.list_delay(),
            expose_error_details: !config.production,
            ..Self::new(TaskStore::seeded())
        }
    }

    pub fn with_list_delay(mut self, delay: Duration) -> Self {
        self.list_delay = delay;
        self
    }

    pub fn with_error_details(mut self, expose: bool) -> Self {
        self.expose_error_details = expose;
        self
    }
}

/// Parses a path id. Only plain decimal digits name a task; signs, spaces
/// and anything else are not found.
fn parse_task_id(raw: &str) -> Result<u64> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(TaskError::NotFound(raw.to_string()));
    }
    raw.parse()
        .map_err(|_| TaskError::NotFound(raw.to_string()))
}

/// Raw listing query pairs, in request order.
type QueryPairs = std::result::Result<Query<Vec<(String, String)>>, QueryRejection>;

/// Handler for GET /api/health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}

/// Handler for GET /api/tasks
///
/// Lists tasks with optional status filter and ordering. Listing never
/// fails: a query string that cannot be read lists everything.
pub async fn list_tasks_handler(
    State(state): State<AppState>,
    pairs: QueryPairs,
) -> Json<ListResponse> {
    let query = match pairs {
        Ok(Query(pairs)) => ListQuery::from_pairs(pairs),
        Err(rejection) => {
            debug!("Ignoring unreadable query: {}", rejection.body_text());
            ListQuery::default()
        }
    };

    if !state.list_delay.is_zero() {
        debug!("Delaying listing by {:?}", state.list_delay);
        tokio::time::sleep(state.list_delay).await;
    }

    let store = state.store.read().await;
    Json(ListResponse::new(store.list(&query)))
}

/// Handler for GET /api/tasks/:id
pub async fn get_task_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DataResponse<Task>>> {
    let id = parse_task_id(&id)?;
    let store = state.store.read().await;
    let task = store.get(id)?.clone();

    Ok(Json(DataResponse::new(task)))
}

/// Handler for POST /api/tasks
///
/// Creates a task and answers 201 with the stored record.
pub async fn create_task_handler(
    State(state): State<AppState>,
    LenientJson(req): LenientJson<CreateTaskRequest>,
) -> Result<(StatusCode, Json<DataResponse<Task>>)> {
    let mut store = state.store.write().await;
    let task = store.create(req)?;

    Ok((
        StatusCode::CREATED,
        Json(DataResponse::with_message(task, "Task created successfully")),
    ))
}

/// Handler for PUT /api/tasks/:id
pub async fn update_task_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    LenientJson(req): LenientJson<UpdateTaskRequest>,
) -> Result<Json<DataResponse<Task>>> {
    let id = parse_task_id(&id)?;

    let mut store = state.store.write().await;
    let task = store.update(id, req)?;

    Ok(Json(DataResponse::with_message(task, "Task updated successfully")))
}

/// Handler for DELETE /api/tasks/:id
pub async fn delete_task_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DataResponse<Task>>> {
    let id = parse_task_id(&id)?;

    let mut store = state.store.write().await;
    let task = store.delete(id)?;

    Ok(Json(DataResponse::with_message(task, "Task deleted successfully")))
}

/// Handler for GET /api/tasks/stats/summary
pub async fn summary_handler(State(state): State<AppState>) -> Json<DataResponse<TaskSummary>> {
    let store = state.store.read().await;
    Json(DataResponse::new(store.summary()))
}

/// Fallback for unmatched routes and unsupported methods.
pub async fn route_not_found() -> TaskError {
    TaskError::RouteNotFound
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TaskStatus;

    fn seeded_state() -> AppState {
        AppState::new(TaskStore::seeded())
    }

    #[tokio::test]
    async fn test_create_and_get_handler() {
        let state = seeded_state();

        let body = LenientJson(CreateTaskRequest::new("X", "Y"));
        let (status, created) = create_task_handler(State(state.clone()), body)
            .await
            .unwrap();
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created.data.id, 4);

        let fetched = get_task_handler(State(state), Path("4".to_string()))
            .await
            .unwrap();
        assert_eq!(fetched.data.title, "X");
    }

    #[tokio::test]
    async fn test_get_non_numeric_id_is_not_found() {
        let result = get_task_handler(State(seeded_state()), Path("abc".to_string())).await;
        assert!(matches!(result, Err(TaskError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_signed_or_padded_id_is_not_found() {
        let state = seeded_state();

        for raw in ["+1", "-1", " 1", "1 ", ""] {
            let result = get_task_handler(State(state.clone()), Path(raw.to_string())).await;
            assert!(
                matches!(result, Err(TaskError::NotFound(_))),
                "{raw:?} should not name a task"
            );
        }

        let fetched = get_task_handler(State(state), Path("01".to_string()))
            .await
            .unwrap();
        assert_eq!(fetched.data.id, 1);
    }

    #[test]
    fn test_parse_task_id() {
        assert_eq!(parse_task_id("4"), Ok(4));
        assert!(parse_task_id("+4").is_err());
        assert!(parse_task_id("4.0").is_err());
        assert!(parse_task_id("99999999999999999999999").is_err());
    }

    #[tokio::test]
    async fn test_update_handler() {
        let state = seeded_state();
        let body = LenientJson(UpdateTaskRequest::status(TaskStatus::Done));

        let response = update_task_handler(State(state), Path("1".to_string()), body)
            .await
            .unwrap();
        assert_eq!(response.data.status, TaskStatus::Done);
        assert!(response.data.updated_at.is_some());
    }

    #[tokio::test]
    async fn test_delete_handler() {
        let state = seeded_state();

        let response = delete_task_handler(State(state.clone()), Path("3".to_string()))
            .await
            .unwrap();
        assert_eq!(response.data.id, 3);

        let result = get_task_handler(State(state), Path("3".to_string())).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_list_and_summary_handlers() {
        let state = seeded_state();

        let listed = list_tasks_handler(
            State(state.clone()),
            Ok(Query(vec![("status".to_string(), "done".to_string())])),
        )
        .await;
        assert_eq!(listed.count, 1);

        let summary = summary_handler(State(state)).await;
        assert_eq!(summary.data.total, 3);
    }

    #[tokio::test]
    async fn test_list_handler_ignores_repeated_parameters() {
        let pairs = vec![
            ("status".to_string(), "done".to_string()),
            ("status".to_string(), "todo".to_string()),
        ];

        let listed = list_tasks_handler(State(seeded_state()), Ok(Query(pairs))).await;
        assert_eq!(listed.count, 3);
    }

    #[tokio::test]
    async fn test_list_handler_honours_delay() {
        let state = seeded_state().with_list_delay(Duration::from_millis(50));

        let started = std::time::Instant::now();
        list_tasks_handler(State(state), Ok(Query(Vec::new()))).await;
        assert!(started.elapsed() >= Duration::from_millis(50));
    }

    #[tokio::test]
    async fn test_health_handler() {
        let response = health_handler().await;
        assert_eq!(response.status, "OK");
        assert!(response.success);
    }

    #[test]
    fn test_from_config_hides_details_in_production() {
        let config = crate::config::Config {
            production: true,
            ..Default::default()
        };
        let state = AppState::from_config(&config);
        assert!(!state.expose_error_details);
    }
}
