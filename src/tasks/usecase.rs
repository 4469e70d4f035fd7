use std::sync::Arc;

use futures::future::BoxFuture;

use super::model::{NewTask, Task, TaskId, TaskPatch};
use super::repository::{Deadline, RepositoryError, TaskRepository};

/// Operations the HTTP layer can perform on tasks.
///
/// Sits between the handlers and storage; business rules on tasks belong here.
pub trait TaskUseCase: Send + Sync {
    fn create_task(&self, deadline: Deadline, task: NewTask) -> BoxFuture<'_, Result<TaskId, RepositoryError>>;

    fn get_tasks(&self, deadline: Deadline) -> BoxFuture<'_, Result<Vec<Task>, RepositoryError>>;

    fn update_task(
        &self,
        deadline: Deadline,
        id: TaskId,
        patch: TaskPatch,
    ) -> BoxFuture<'_, Result<(), RepositoryError>>;

    fn delete_task(&self, deadline: Deadline, id: TaskId) -> BoxFuture<'_, Result<(), RepositoryError>>;
}

pub struct TaskService {
    repository: Arc<dyn TaskRepository>,
}

impl TaskService {
    pub fn new(repository: Arc<dyn TaskRepository>) -> Self {
        Self { repository }
    }
}

impl TaskUseCase for TaskService {
    fn create_task(&self, deadline: Deadline, task: NewTask) -> BoxFuture<'_, Result<TaskId, RepositoryError>> {
        self.repository.create(deadline, task)
    }

    fn get_tasks(&self, deadline: Deadline) -> BoxFuture<'_, Result<Vec<Task>, RepositoryError>> {
        self.repository.get_all(deadline)
    }

    fn update_task(
        &self,
        deadline: Deadline,
        id: TaskId,
        patch: TaskPatch,
    ) -> BoxFuture<'_, Result<(), RepositoryError>> {
        self.repository.update(deadline, id, patch)
    }

    fn delete_task(&self, deadline: Deadline, id: TaskId) -> BoxFuture<'_, Result<(), RepositoryError>> {
        self.repository.delete(deadline, id)
    }
}
