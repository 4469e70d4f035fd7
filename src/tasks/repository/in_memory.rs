//! In-memory task repository.
//!
//! Used for local runs without MongoDB and as the backing store for the HTTP
//! tests. Tasks are kept in id order, which is also creation order.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use futures::future::BoxFuture;
use tokio::sync::RwLock;

use super::{Deadline, RepositoryError, TaskRepository};
use crate::tasks::model::{NewTask, Task, TaskId, TaskPatch};

#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRepository {
    tasks: Arc<RwLock<BTreeMap<TaskId, Task>>>,
    latency: Duration,
}

impl InMemoryTaskRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delays every operation by `latency`, still bounded by the caller's deadline.
    pub fn with_latency(latency: Duration) -> Self {
        Self {
            latency,
            ..Self::default()
        }
    }

    async fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }
}

impl TaskRepository for InMemoryTaskRepository {
    fn create(&self, deadline: Deadline, task: NewTask) -> BoxFuture<'_, Result<TaskId, RepositoryError>> {
        Box::pin(deadline.run(async move {
            self.simulate_latency().await;
            let id = TaskId::generate();
            let task = task.into_task(id, Utc::now());
            self.tasks.write().await.insert(id, task);
            Ok::<_, RepositoryError>(id)
        }))
    }

    fn get_all(&self, deadline: Deadline) -> BoxFuture<'_, Result<Vec<Task>, RepositoryError>> {
        Box::pin(deadline.run(async move {
            self.simulate_latency().await;
            let tasks = self.tasks.read().await;
            Ok::<_, RepositoryError>(tasks.values().cloned().collect())
        }))
    }

    fn update(
        &self,
        deadline: Deadline,
        id: TaskId,
        patch: TaskPatch,
    ) -> BoxFuture<'_, Result<(), RepositoryError>> {
        Box::pin(deadline.run(async move {
            self.simulate_latency().await;
            let mut tasks = self.tasks.write().await;
            let task = tasks.get_mut(&id).ok_or(RepositoryError::NotFound(id))?;
            patch.apply_to(task, Utc::now());
            Ok::<_, RepositoryError>(())
        }))
    }

    fn delete(&self, deadline: Deadline, id: TaskId) -> BoxFuture<'_, Result<(), RepositoryError>> {
        Box::pin(deadline.run(async move {
            self.simulate_latency().await;
            match self.tasks.write().await.remove(&id) {
                Some(_) => Ok(()),
                None => Err(RepositoryError::NotFound(id)),
            }
        }))
    }
}
