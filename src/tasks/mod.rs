pub mod model;
pub mod repository;
pub mod usecase;

pub use model::{NewTask, Task, TaskId, TaskPatch};
pub use repository::{Deadline, RepositoryError, TaskRepository};
pub use usecase::{TaskService, TaskUseCase};
