//! Task Client Module
//!
//! Keeps a local view of the task collection, loads it through the snapshot
//! cache, and mirrors every successful mutation into the view and the cache.

use tracing::{debug, info, warn};

use crate::client::api::{ClientResult, TaskApi};
use crate::client::cache::{CacheState, SnapshotCache};
use crate::client::clock::{Clock, SystemClock};
use crate::client::metrics::ClientMetrics;
use crate::client::storage::SnapshotStorage;
use crate::error::ClientError;
use crate::models::{CreateTaskRequest, ListQuery, Task, TaskStatus, UpdateTaskRequest};

/// How a load was served.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadSource {
    Cache,
    Api,
}

// == Task Client ==
/// Caching client for the task service.
///
/// Mutations take `&mut self`, so a client never has two requests in flight.
/// A failed request leaves the local view and the cache untouched.
#[derive(Debug)]
pub struct TaskClient<A, S, C = SystemClock> {
    api: A,
    cache: SnapshotCache<S, C>,
    tasks: Vec<Task>,
    metrics: ClientMetrics,
}

impl<A: TaskApi, S: SnapshotStorage, C: Clock> TaskClient<A, S, C> {
    pub fn new(api: A, cache: SnapshotCache<S, C>) -> Self {
        Self {
            api,
            cache,
            tasks: Vec::new(),
            metrics: ClientMetrics::new(),
        }
    }

    /// Local view of the collection.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn metrics(&self) -> ClientMetrics {
        self.metrics
    }

    pub fn cache_state(&self) -> CacheState {
        self.cache.state()
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    // == Load ==
    /// Loads the collection from a fresh snapshot, or from the service when
    /// the snapshot is stale or absent.
    pub async fn load(&mut self) -> ClientResult<LoadSource> {
        if let Some(cached) = self.cache.get() {
            self.tasks = cached;
            self.metrics.record_hit();
            debug!("Cache hit: loaded {} tasks from cache", self.tasks.len());
            return Ok(LoadSource::Cache);
        }

        self.metrics.record_miss();
        self.metrics.record_api_call();
        let tasks = self.api.list_tasks(&ListQuery::new()).await?;
        info!("Cache miss: loaded {} tasks from service", tasks.len());

        self.tasks = tasks;
        self.write_through();
        Ok(LoadSource::Api)
    }

    // == Refresh ==
    /// Clears the cache and reloads, which always fetches from the service.
    pub async fn refresh(&mut self) -> ClientResult<LoadSource> {
        self.cache.invalidate();
        self.load().await
    }

    // == Create ==
    pub async fn create(
        &mut self,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> ClientResult<Task> {
        let req = CreateTaskRequest::new(title, description);
        self.metrics.record_api_call();
        let task = self.api.create_task(&req).await?;

        self.tasks.push(task.clone());
        self.write_through();
        Ok(task)
    }

    // == Set Status ==
    pub async fn set_status(&mut self, id: u64, status: TaskStatus) -> ClientResult<Task> {
        self.metrics.record_api_call();
        let task = self
            .api
            .update_task(id, &UpdateTaskRequest::status(status))
            .await?;

        self.mirror_update(&task);
        Ok(task)
    }

    // == Toggle ==
    /// Flips a task between done and not done.
    ///
    /// Fails with `UnknownTask` without contacting the service when the local
    /// view has no such task.
    pub async fn toggle(&mut self, id: u64) -> ClientResult<Task> {
        let status = self
            .tasks
            .iter()
            .find(|t| t.id == id)
            .map(|t| t.status.toggled())
            .ok_or(ClientError::UnknownTask(id))?;
        self.set_status(id, status).await
    }

    // == Delete ==
    pub async fn delete(&mut self, id: u64) -> ClientResult<Task> {
        self.metrics.record_api_call();
        let removed = self.api.delete_task(id).await?;

        self.tasks.retain(|t| t.id != removed.id);
        self.write_through();
        Ok(removed)
    }

    fn mirror_update(&mut self, task: &Task) {
        match self.tasks.iter_mut().find(|t| t.id == task.id) {
            Some(slot) => *slot = task.clone(),
            None => self.tasks.push(task.clone()),
        }
        self.write_through();
    }

    /// Copies the local view into the cache. A failed cache write is logged
    /// and otherwise ignored.
    fn write_through(&mut self) {
        if let Err(e) = self.cache.set(&self.tasks) {
            warn!("Failed to cache tasks: {}", e);
        }
    }
}
