//! Store Module
//!
//! Provides the in-memory task collection with validation, filtering and
//! ordering.

pub mod query;
mod task_store;
pub mod validation;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use task_store::TaskStore;
pub use validation::TaskDraft;
