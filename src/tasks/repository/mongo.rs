use chrono::{DateTime, Utc};
use futures::future::BoxFuture;
use futures::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId, DateTime as BsonDateTime, Document};
use mongodb::Collection;
use serde::{Deserialize, Serialize};

use super::{Deadline, RepositoryError, TaskRepository};
use crate::tasks::model::{NewTask, Task, TaskId, TaskPatch};

/// Stored shape of a task. `_id` is left out on insert so the driver assigns it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub due_date: Option<BsonDateTime>,
    pub created_at: BsonDateTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<BsonDateTime>,
}

impl TaskDocument {
    pub fn from_new(task: NewTask, created_at: DateTime<Utc>) -> Self {
        Self {
            id: None,
            title: task.title,
            description: task.description,
            completed: task.completed,
            due_date: task.due_date.map(to_bson),
            created_at: to_bson(created_at),
            updated_at: None,
        }
    }
}

impl From<TaskDocument> for Task {
    fn from(document: TaskDocument) -> Self {
        Self {
            id: document.id.map(TaskId::from),
            title: document.title,
            description: document.description,
            completed: document.completed,
            due_date: document.due_date.map(to_chrono),
            created_at: to_chrono(document.created_at),
            updated_at: document.updated_at.map(to_chrono),
        }
    }
}

fn to_bson(value: DateTime<Utc>) -> BsonDateTime {
    BsonDateTime::from_millis(value.timestamp_millis())
}

fn to_chrono(value: BsonDateTime) -> DateTime<Utc> {
    let millis = value.timestamp_millis();
    DateTime::from_timestamp_millis(millis).unwrap_or(if millis < 0 {
        DateTime::<Utc>::MIN_UTC
    } else {
        DateTime::<Utc>::MAX_UTC
    })
}

/// Builds the `$set` body for an update. `updated_at` is always refreshed.
fn set_document(patch: TaskPatch, now: DateTime<Utc>) -> Document {
    let mut set = Document::new();
    if let Some(title) = patch.title {
        set.insert("title", title);
    }
    if let Some(description) = patch.description {
        set.insert("description", description);
    }
    if let Some(completed) = patch.completed {
        set.insert("completed", completed);
    }
    if let Some(due_date) = patch.due_date {
        set.insert("due_date", to_bson(due_date));
    }
    set.insert("updated_at", to_bson(now));
    set
}

#[derive(Debug, Clone)]
pub struct MongoTaskRepository {
    collection: Collection<TaskDocument>,
}

impl MongoTaskRepository {
    pub fn new(collection: Collection<TaskDocument>) -> Self {
        Self { collection }
    }
}

impl TaskRepository for MongoTaskRepository {
    fn create(&self, deadline: Deadline, task: NewTask) -> BoxFuture<'_, Result<TaskId, RepositoryError>> {
        Box::pin(deadline.run(async move {
            let document = TaskDocument::from_new(task, Utc::now());
            let result = self.collection.insert_one(document).await?;

            result
                .inserted_id
                .as_object_id()
                .map(TaskId::from)
                .ok_or(RepositoryError::MissingInsertedId)
        }))
    }

    fn get_all(&self, deadline: Deadline) -> BoxFuture<'_, Result<Vec<Task>, RepositoryError>> {
        Box::pin(deadline.run(async move {
            let cursor = self.collection.find(doc! {}).await?;
            let documents: Vec<TaskDocument> = cursor.try_collect().await?;

            Ok::<_, RepositoryError>(documents.into_iter().map(Task::from).collect())
        }))
    }

    fn update(
        &self,
        deadline: Deadline,
        id: TaskId,
        patch: TaskPatch,
    ) -> BoxFuture<'_, Result<(), RepositoryError>> {
        Box::pin(deadline.run(async move {
            let filter = doc! { "_id": id.as_object_id() };
            let update = doc! { "$set": set_document(patch, Utc::now()) };
            let result = self.collection.update_one(filter, update).await?;

            if result.matched_count == 0 {
                return Err(RepositoryError::NotFound(id));
            }
            Ok::<_, RepositoryError>(())
        }))
    }

    fn delete(&self, deadline: Deadline, id: TaskId) -> BoxFuture<'_, Result<(), RepositoryError>> {
        Box::pin(deadline.run(async move {
            let result = self
                .collection
                .delete_one(doc! { "_id": id.as_object_id() })
                .await?;

            if result.deleted_count == 0 {
                return Err(RepositoryError::NotFound(id));
            }
            Ok::<_, RepositoryError>(())
        }))
    }
}
