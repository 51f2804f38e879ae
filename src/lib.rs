//! Task Board - An in-memory task tracking service
//!
//! Provides a REST API over an owned task collection and a caching client
//! that mirrors the collection into a snapshot with a freshness window.

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod store;

pub use api::{create_router, AppState};
pub use client::{HttpTaskApi, LocalTaskApi, SnapshotCache, TaskApi, TaskClient};
pub use config::Config;
pub use error::{ClientError, TaskError};
pub use store::TaskStore;
