//! API Module
//!
//! HTTP handlers and routing for the task service REST API.
//!
//! # Endpoints
//! - `GET /api/health` - Health check endpoint
//! - `GET /api/tasks` - List, filter and sort tasks
//! - `POST /api/tasks` - Create a task
//! - `GET|PUT|DELETE /api/tasks/:id` - Fetch, update or delete one task
//! - `GET /api/tasks/stats/summary` - Per-status counts

pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod routes;

pub use handlers::*;
pub use extract::LenientJson;
pub use routes::create_router;
