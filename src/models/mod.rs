//! Request and Response models for the task API
//!
//! This module defines the task record and the DTOs (Data Transfer Objects)
//! used for serializing/deserializing HTTP request and response bodies.

pub mod requests;
pub mod responses;
pub mod task;

// Re-export commonly used types
pub use requests::{CreateTaskRequest, ListQuery, SortField, SortOrder, UpdateTaskRequest};
pub use responses::{DataResponse, ErrorResponse, HealthResponse, ListResponse, TaskSummary};
pub use task::{Task, TaskStatus, UnknownStatus};
