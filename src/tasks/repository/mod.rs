//! Storage contract for tasks.
//!
//! Every operation receives a [`Deadline`] chosen by the caller. Implementations
//! run the whole storage interaction under it and report [`RepositoryError::Timeout`]
//! once it passes.

pub mod in_memory;
pub mod mongo;

use std::future::Future;
use std::time::Duration;

use futures::future::BoxFuture;
use thiserror::Error;
use tokio::time::Instant;

use super::model::{NewTask, Task, TaskId, TaskPatch};

pub use in_memory::InMemoryTaskRepository;
pub use mongo::MongoTaskRepository;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("task {0} not found")]
    NotFound(TaskId),

    #[error("storage operation exceeded its deadline")]
    Timeout,

    #[error("storage error: {0}")]
    Storage(#[from] mongodb::error::Error),

    #[error("storage did not return an identifier for the inserted task")]
    MissingInsertedId,
}

/// Absolute point in time after which a storage call is abandoned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deadline(Instant);

impl Deadline {
    pub fn after(timeout: Duration) -> Self {
        Self(Instant::now() + timeout)
    }

    pub fn instant(&self) -> Instant {
        self.0
    }

    /// Drives `operation` to completion unless the deadline passes first.
    pub async fn run<F, T, E>(self, operation: F) -> Result<T, RepositoryError>
    where
        F: Future<Output = Result<T, E>>,
        E: Into<RepositoryError>,
    {
        match tokio::time::timeout_at(self.0, operation).await {
            Ok(result) => result.map_err(Into::into),
            Err(_) => Err(RepositoryError::Timeout),
        }
    }
}

pub trait TaskRepository: Send + Sync {
    /// Persists a new task, stamping its creation time, and returns the generated id.
    fn create(&self, deadline: Deadline, task: NewTask) -> BoxFuture<'_, Result<TaskId, RepositoryError>>;

    /// Returns every stored task in storage order.
    fn get_all(&self, deadline: Deadline) -> BoxFuture<'_, Result<Vec<Task>, RepositoryError>>;

    /// Overwrites the supplied fields and refreshes `updated_at`.
    ///
    /// Fails with [`RepositoryError::NotFound`] when no task matches `id`.
    fn update(
        &self,
        deadline: Deadline,
        id: TaskId,
        patch: TaskPatch,
    ) -> BoxFuture<'_, Result<(), RepositoryError>>;

    /// Fails with [`RepositoryError::NotFound`] when no task matches `id`.
    fn delete(&self, deadline: Deadline, id: TaskId) -> BoxFuture<'_, Result<(), RepositoryError>>;
}
