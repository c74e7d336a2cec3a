//! HTTP client for the task API.
//!
//! Thin wrapper over the REST endpoints: no business logic, no caching.
//! Every call either succeeds with the resource or fails with a single
//! [`ApiError`] whose message is what the caller displays; a failed write
//! must not be applied anywhere.
//!
//! Endpoints:
//!   GET    /api/tasks
//!   POST   /api/tasks
//!   PUT    /api/tasks/{id}
//!   DELETE /api/tasks/{id}
//!
//! Plain JSON bodies, 2xx is success, anything else is failure. No envelope.

use reqwest::Client;
use url::Url;

use crate::error::ApiError;
use crate::task::{NewTask, Task, TaskPatch};

const TASKS_PATH: &str = "api/tasks";

pub struct TasksClient {
    http: Client,
    base_url: Url,
}

impl TasksClient {
    /// Build a client against the given base URL (e.g. `http://localhost:3000`).
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let base_url = Url::parse(base_url).map_err(|e| ApiError::InvalidUrl {
            url: base_url.to_string(),
            message: e.to_string(),
        })?;
        Ok(Self {
            http: Client::new(),
            base_url,
        })
    }

    fn collection_url(&self) -> Result<Url, ApiError> {
        self.base_url
            .join(TASKS_PATH)
            .map_err(|e| ApiError::InvalidUrl {
                url: self.base_url.to_string(),
                message: e.to_string(),
            })
    }

    fn resource_url(&self, id: &str) -> Result<Url, ApiError> {
        self.base_url
            .join(&format!("{TASKS_PATH}/{id}"))
            .map_err(|e| ApiError::InvalidUrl {
                url: self.base_url.to_string(),
                message: e.to_string(),
            })
    }

    /// Fetch the full task list.
    pub async fn fetch_tasks(&self) -> Result<Vec<Task>, ApiError> {
        let response = self.http.get(self.collection_url()?).send().await?;
        if !response.status().is_success() {
            return Err(ApiError::Status {
                operation: "fetching tasks",
                status: response.status().as_u16(),
            });
        }
        Ok(response.json().await?)
    }

    /// Create a task; the server assigns id and createdAt.
    pub async fn create_task(&self, new_task: &NewTask) -> Result<Task, ApiError> {
        let response = self
            .http
            .post(self.collection_url()?)
            .json(new_task)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(ApiError::Status {
                operation: "creating task",
                status: response.status().as_u16(),
            });
        }
        Ok(response.json().await?)
    }

    /// Apply a partial update; returns the updated resource.
    pub async fn update_task(&self, id: &str, patch: &TaskPatch) -> Result<Task, ApiError> {
        let response = self
            .http
            .put(self.resource_url(id)?)
            .json(patch)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(ApiError::Status {
                operation: "updating task",
                status: response.status().as_u16(),
            });
        }
        Ok(response.json().await?)
    }

    /// Delete a task. No response body.
    pub async fn delete_task(&self, id: &str) -> Result<(), ApiError> {
        let response = self.http.delete(self.resource_url(id)?).send().await?;
        if !response.status().is_success() {
            return Err(ApiError::Status {
                operation: "deleting task",
                status: response.status().as_u16(),
            });
        }
        Ok(())
    }
}
