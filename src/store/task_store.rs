//! Task Store Module
//!
//! Owned, ordered in-memory task collection with CRUD, listing and summary.

use chrono::Utc;
use serde_json::Value;
use tracing::{debug, info};

use crate::error::{Result, TaskError};
use crate::models::{
    CreateTaskRequest, ListQuery, Task, TaskStatus, TaskSummary, UpdateTaskRequest,
};
use crate::store::{query, validation};

// == Seed Data ==
const SEED_TASKS: [(&str, &str, TaskStatus); 3] = [
    ("Finish report", "Complete Q3 summary", TaskStatus::Todo),
    ("Team meeting", "Discuss project goals", TaskStatus::Done),
    ("Code review", "Review pull requests from team", TaskStatus::InProgress),
];

// == Task Store ==
/// In-memory task collection in insertion order.
///
/// Identifiers are assigned sequentially and never reused, even after the
/// task holding one is deleted.
#[derive(Debug, Clone)]
pub struct TaskStore {
    /// Tasks in insertion order
    tasks: Vec<Task>,
    /// Identifier the next created task receives
    next_id: u64,
}

impl TaskStore {
    // == Constructors ==
    /// Creates an empty store whose first task gets id 1.
    pub fn new() -> Self {
        Self {
            tasks: Vec::new(),
            next_id: 1,
        }
    }

    /// Creates a store holding the three seed tasks, sharing one creation
    /// timestamp. The next created task gets id 4.
    pub fn seeded() -> Self {
        let created_at = Utc::now();
        let tasks: Vec<Task> = SEED_TASKS
            .iter()
            .zip(1u64..)
            .map(|(&(title, description, status), id)| Task {
                id,
                title: title.to_string(),
                description: description.to_string(),
                status,
                created_at,
                updated_at: None,
            })
            .collect();
        let next_id = tasks.len() as u64 + 1;
        Self { tasks, next_id }
    }

    // == List ==
    /// Returns the filtered, ordered tasks for a query.
    pub fn list(&self, query: &ListQuery) -> Vec<Task> {
        let tasks = query::apply(&self.tasks, query);
        debug!(
            "Listing {} of {} tasks (status={:?}, sortBy={}, order={})",
            tasks.len(),
            self.tasks.len(),
            query.status_filter(),
            query.sort_field().as_str(),
            query.sort_order().as_str()
        );
        tasks
    }

    // == Get ==
    /// Retrieves a task by id.
    pub fn get(&self, id: u64) -> Result<&Task> {
        self.tasks
            .iter()
            .find(|t| t.id == id)
            .ok_or_else(|| TaskError::NotFound(id.to_string()))
    }

    // == Create ==
    /// Validates and appends a new task.
    ///
    /// Status defaults to `todo` when the request omits it.
    pub fn create(&mut self, req: CreateTaskRequest) -> Result<Task> {
        let draft = validation::validate(
            req.title.as_ref().and_then(Value::as_str),
            req.description.as_ref().and_then(Value::as_str),
            supplied_or(req.status.as_ref(), TaskStatus::Todo.as_str()),
        )?;

        let task = Task {
            id: self.next_id,
            title: draft.title,
            description: draft.description,
            status: draft.status,
            created_at: Utc::now(),
            updated_at: None,
        };
        self.next_id += 1;
        self.tasks.push(task.clone());

        info!("Created task {} ({})", task.id, task.status);
        Ok(task)
    }

    // == Update ==
    /// Merges supplied fields over an existing task.
    ///
    /// The merged record is validated as a whole; on failure the stored task
    /// is left untouched.
    pub fn update(&mut self, id: u64, req: UpdateTaskRequest) -> Result<Task> {
        let index = self.position(id)?;
        let current = &self.tasks[index];

        let draft = validation::validate(
            supplied_or(req.title.as_ref(), &current.title),
            supplied_or(req.description.as_ref(), &current.description),
            supplied_or(req.status.as_ref(), current.status.as_str()),
        )?;

        let task = &mut self.tasks[index];
        task.title = draft.title;
        task.description = draft.description;
        task.status = draft.status;
        task.updated_at = Some(Utc::now());

        info!("Updated task {} ({})", task.id, task.status);
        Ok(task.clone())
    }

    // == Delete ==
    /// Removes a task and returns it.
    pub fn delete(&mut self, id: u64) -> Result<Task> {
        let index = self.position(id)?;
        let removed = self.tasks.remove(index);
        info!("Deleted task {}", removed.id);
        Ok(removed)
    }

    // == Summary ==
    /// Counts tasks in total and per status.
    pub fn summary(&self) -> TaskSummary {
        self.tasks
            .iter()
            .fold(TaskSummary::default(), |mut summary, task| {
                summary.total += 1;
                match task.status {
                    TaskStatus::Todo => summary.todo += 1,
                    TaskStatus::InProgress => summary.in_progress += 1,
                    TaskStatus::Done => summary.done += 1,
                }
                summary
            })
    }

    /// All tasks in insertion order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    fn position(&self, id: u64) -> Result<usize> {
        self.tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| TaskError::NotFound(id.to_string()))
    }
}

/// Resolves a request field against a fallback.
///
/// An omitted or `null` field takes the fallback; a string is used as is;
/// any other JSON type yields `None` so validation reports its rule.
fn supplied_or<'a>(supplied: Option<&'a Value>, fallback: &'a str) -> Option<&'a str> {
    match supplied {
        None | Some(Value::Null) => Some(fallback),
        Some(value) => value.as_str(),
    }
}

impl Default for TaskStore {
    fn default() -> Self {
        Self::new()
    }
}
