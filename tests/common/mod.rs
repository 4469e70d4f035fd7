//! Shared helpers for the HTTP tests.
//!
//! Each integration test file is compiled as its own crate, so helpers used by
//! only one of them would otherwise warn.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use futures::future::BoxFuture;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use task_service::config::Timeouts;
use task_service::routes;
use task_service::state::AppState;
use task_service::tasks::repository::InMemoryTaskRepository;
use task_service::tasks::{
    Deadline, NewTask, RepositoryError, Task, TaskId, TaskPatch, TaskRepository, TaskService,
    TaskUseCase,
};

pub fn app_with_repository(repository: Arc<dyn TaskRepository>, timeouts: Timeouts) -> Router {
    let usecase = TaskService::new(repository);
    routes::app(AppState::new(Arc::new(usecase), timeouts))
}

/// App backed by a fresh in-memory repository.
pub fn test_app() -> Router {
    app_with_repository(Arc::new(InMemoryTaskRepository::new()), Timeouts::default())
}

pub fn json_request(method: Method, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn raw_request(method: Method, uri: &str, content_type: Option<&str>, body: &str) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(content_type) = content_type {
        builder = builder.header(header::CONTENT_TYPE, content_type);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub fn empty_request(method: Method, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

/// Sends one request and returns the status with the body parsed as JSON
/// (`Value::Null` for an empty body).
pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

pub async fn create_task(app: &Router, body: &Value) -> String {
    let (status, response) = send(app, json_request(Method::POST, "/task", body)).await;
    assert_eq!(status, StatusCode::CREATED, "unexpected body: {response}");
    response["id"].as_str().unwrap().to_string()
}

pub async fn list_tasks(app: &Router) -> Vec<Task> {
    let (status, body) = send(app, empty_request(Method::GET, "/tasks")).await;
    assert_eq!(status, StatusCode::OK);
    serde_json::from_value(body).unwrap()
}

pub fn buy_milk() -> Value {
    serde_json::json!({
        "title": "Buy milk",
        "description": "2%",
        "completed": false,
        "due_date": "2025-01-01T00:00:00Z"
    })
}

/// Use case that only counts how often it was reached.
#[derive(Debug, Default)]
pub struct CountingUseCase {
    calls: AtomicUsize,
}

impl CountingUseCase {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn hit(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

impl TaskUseCase for CountingUseCase {
    fn create_task(&self, _deadline: Deadline, _task: NewTask) -> BoxFuture<'_, Result<TaskId, RepositoryError>> {
        self.hit();
        Box::pin(async { Ok(TaskId::generate()) })
    }

    fn get_tasks(&self, _deadline: Deadline) -> BoxFuture<'_, Result<Vec<Task>, RepositoryError>> {
        self.hit();
        Box::pin(async { Ok(Vec::new()) })
    }

    fn update_task(
        &self,
        _deadline: Deadline,
        _id: TaskId,
        _patch: TaskPatch,
    ) -> BoxFuture<'_, Result<(), RepositoryError>> {
        self.hit();
        Box::pin(async { Ok(()) })
    }

    fn delete_task(&self, _deadline: Deadline, _id: TaskId) -> BoxFuture<'_, Result<(), RepositoryError>> {
        self.hit();
        Box::pin(async { Ok(()) })
    }
}
