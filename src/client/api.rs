//! Task API Module
//!
//! The request/response seam between the client and the task service, with
//! an HTTP implementation and an in-process one.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tokio::sync::RwLock;

use crate::error::ClientError;
use crate::models::{
    CreateTaskRequest, DataResponse, ErrorResponse, HealthResponse, ListQuery, ListResponse,
    Task, TaskSummary, UpdateTaskRequest,
};
use crate::store::TaskStore;

/// Result type for client operations.
pub type ClientResult<T> = std::result::Result<T, ClientError>;

// == Task API ==
/// Operations the task service exposes.
#[async_trait]
pub trait TaskApi: Send + Sync {
    async fn health(&self) -> ClientResult<HealthResponse>;

    async fn list_tasks(&self, query: &ListQuery) -> ClientResult<Vec<Task>>;

    async fn get_task(&self, id: u64) -> ClientResult<Task>;

    async fn create_task(&self, req: &CreateTaskRequest) -> ClientResult<Task>;

    async fn update_task(&self, id: u64, req: &UpdateTaskRequest) -> ClientResult<Task>;

    /// Deletes a task and returns the removed record.
    async fn delete_task(&self, id: u64) -> ClientResult<Task>;

    async fn summary(&self) -> ClientResult<TaskSummary>;
}

// == HTTP Implementation ==
/// Talks to a running task service over HTTP.
#[derive(Debug, Clone)]
pub struct HttpTaskApi {
    /// Service root, without trailing slash (e.g. `http://localhost:5000`)
    base_url: String,
    http: reqwest::Client,
}

impl HttpTaskApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, reqwest::Client::new())
    }

    pub fn with_client(base_url: impl Into<String>, http: reqwest::Client) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url, http }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send<T: DeserializeOwned>(request: RequestBuilder) -> ClientResult<T> {
        let response = request.send().await?;
        Self::decode(response).await
    }

    /// Decodes a success body, or turns an error status into `ClientError::Api`.
    async fn decode<T: DeserializeOwned>(response: Response) -> ClientResult<T> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.json::<T>().await?);
        }

        let bytes = response.bytes().await?;
        let (message, details) = match serde_json::from_slice::<ErrorResponse>(&bytes) {
            Ok(body) => (body.error, body.details.unwrap_or_default()),
            Err(_) => (
                status
                    .canonical_reason()
                    .unwrap_or("Request failed")
                    .to_string(),
                Vec::new(),
            ),
        };

        Err(ClientError::Api {
            status: status.as_u16(),
            message,
            details,
        })
    }
}

#[async_trait]
impl TaskApi for HttpTaskApi {
    async fn health(&self) -> ClientResult<HealthResponse> {
        Self::send(self.http.get(self.url("/api/health"))).await
    }

    async fn list_tasks(&self, query: &ListQuery) -> ClientResult<Vec<Task>> {
        let request = self.http.get(self.url("/api/tasks")).query(query);
        let body: ListResponse = Self::send(request).await?;
        Ok(body.data)
    }

    async fn get_task(&self, id: u64) -> ClientResult<Task> {
        let request = self.http.get(self.url(&format!("/api/tasks/{id}")));
        let body: DataResponse<Task> = Self::send(request).await?;
        Ok(body.data)
    }

    async fn create_task(&self, req: &CreateTaskRequest) -> ClientResult<Task> {
        let request = self.http.post(self.url("/api/tasks")).json(req);
        let body: DataResponse<Task> = Self::send(request).await?;
        Ok(body.data)
    }

    async fn update_task(&self, id: u64, req: &UpdateTaskRequest) -> ClientResult<Task> {
        let request = self
            .http
            .put(self.url(&format!("/api/tasks/{id}")))
            .json(req);
        let body: DataResponse<Task> = Self::send(request).await?;
        Ok(body.data)
    }

    async fn delete_task(&self, id: u64) -> ClientResult<Task> {
        let request = self.http.delete(self.url(&format!("/api/tasks/{id}")));
        let body: DataResponse<Task> = Self::send(request).await?;
        Ok(body.data)
    }

    async fn summary(&self) -> ClientResult<TaskSummary> {
        let request = self.http.get(self.url("/api/tasks/stats/summary"));
        let body: DataResponse<TaskSummary> = Self::send(request).await?;
        Ok(body.data)
    }
}

// == In-Process Implementation ==
/// Calls a shared store directly, reporting failures the way the HTTP
/// service would.
#[derive(Debug, Clone)]
pub struct LocalTaskApi {
    store: Arc<RwLock<TaskStore>>,
}

impl LocalTaskApi {
    pub fn new(store: Arc<RwLock<TaskStore>>) -> Self {
        Self { store }
    }

    /// Wraps a store that nothing else shares.
    pub fn from_store(store: TaskStore) -> Self {
        Self::new(Arc::new(RwLock::new(store)))
    }

    pub fn store(&self) -> &Arc<RwLock<TaskStore>> {
        &self.store
    }
}

#[async_trait]
impl TaskApi for LocalTaskApi {
    async fn health(&self) -> ClientResult<HealthResponse> {
        Ok(HealthResponse::ok())
    }

    async fn list_tasks(&self, query: &ListQuery) -> ClientResult<Vec<Task>> {
        Ok(self.store.read().await.list(query))
    }

    async fn get_task(&self, id: u64) -> ClientResult<Task> {
        Ok(self.store.read().await.get(id)?.clone())
    }

    async fn create_task(&self, req: &CreateTaskRequest) -> ClientResult<Task> {
        Ok(self.store.write().await.create(req.clone())?)
    }

    async fn update_task(&self, id: u64, req: &UpdateTaskRequest) -> ClientResult<Task> {
        Ok(self.store.write().await.update(id, req.clone())?)
    }

    async fn delete_task(&self, id: u64) -> ClientResult<Task> {
        Ok(self.store.write().await.delete(id)?)
    }

    async fn summary(&self) -> ClientResult<TaskSummary> {
        Ok(self.store.read().await.summary())
    }
}
