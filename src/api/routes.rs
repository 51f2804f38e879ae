//! API Routes
//!
//! Configures the Axum router with all task service endpoints.

use axum::{
    middleware,
    routing::{get, MethodRouter},
    Router,
};
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    create_task_handler, delete_task_handler, get_task_handler, health_handler,
    list_tasks_handler, route_not_found, summary_handler, update_task_handler, AppState,
};
use super::middleware::{panic_response, redact_internal_errors};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /api/health` - Liveness check
/// - `GET /api/tasks` - List tasks (`status`, `sortBy`, `order` query params)
/// - `POST /api/tasks` - Create a task
/// - `GET /api/tasks/:id` - Fetch one task
/// - `PUT /api/tasks/:id` - Update a task
/// - `DELETE /api/tasks/:id` - Delete a task
/// - `GET /api/tasks/stats/summary` - Per-status counts
///
/// # Middleware
/// - Panic catching and production-mode redaction of 500 bodies
/// - CORS: Allows any origin
/// - Tracing: Logs all requests
pub fn create_router(state: AppState) -> Router {
    let routes = Router::new()
        .route("/api/health", not_found_fallback(get(health_handler)))
        .route(
            "/api/tasks",
            not_found_fallback(get(list_tasks_handler).post(create_task_handler)),
        )
        .route(
            "/api/tasks/stats/summary",
            not_found_fallback(get(summary_handler)),
        )
        .route(
            "/api/tasks/:id",
            not_found_fallback(
                get(get_task_handler)
                    .put(update_task_handler)
                    .delete(delete_task_handler),
            ),
        );

    with_middleware(routes, state)
}

/// Unsupported methods on a known path answer like an unknown route.
fn not_found_fallback(router: MethodRouter<AppState>) -> MethodRouter<AppState> {
    router.fallback(route_not_found)
}

/// Wraps routes with the fallback, error handling, CORS and tracing layers.
fn with_middleware(routes: Router<AppState>, state: AppState) -> Router {
    // Configure CORS middleware
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    routes
        .fallback(route_not_found)
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            redact_internal_errors,
        ))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
