use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::tasks::{self, CreatedResponse, ErrorResponse, MessageResponse};
use crate::tasks::{NewTask, Task, TaskPatch};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "TodoList API",
        version = "1.0",
        description = "Simple task list API backed by MongoDB."
    ),
    paths(
        tasks::routes::create,
        tasks::routes::list,
        tasks::routes::update,
        tasks::routes::delete,
    ),
    components(schemas(
        Task,
        NewTask,
        TaskPatch,
        CreatedResponse,
        MessageResponse,
        ErrorResponse,
    )),
    tags((name = "tasks", description = "Task management"))
)]
pub struct ApiDoc;

/// Interactive docs at `/swagger`, reading the document from `/docs/openapi.json`.
pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/swagger").url("/docs/openapi.json", ApiDoc::openapi())
}
