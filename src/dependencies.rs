//! Builds the handler → use case → repository → storage graph once at startup.

use std::sync::Arc;

use thiserror::Error;

use crate::config::{Config, ConfigError, StorageMode};
use crate::state::AppState;
use crate::storage::{MongoStore, StorageError};
use crate::tasks::repository::{InMemoryTaskRepository, MongoTaskRepository};
use crate::tasks::{TaskRepository, TaskService};

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        source: std::io::Error,
    },

    #[error("server error: {0}")]
    Serve(std::io::Error),
}

pub async fn build(config: &Config) -> Result<AppState, StartupError> {
    let repository: Arc<dyn TaskRepository> = match config.storage_mode {
        StorageMode::Mongo => {
            let store = MongoStore::connect(&config.mongo).await?;
            Arc::new(MongoTaskRepository::new(store.tasks()))
        }
        StorageMode::InMemory => {
            tracing::warn!("Using in-memory task storage, data is lost on restart");
            Arc::new(InMemoryTaskRepository::new())
        }
    };

    Ok(with_repository(repository, config))
}

pub fn with_repository(repository: Arc<dyn TaskRepository>, config: &Config) -> AppState {
    let usecase = TaskService::new(repository);
    AppState::new(Arc::new(usecase), config.timeouts)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_build_in_memory() {
        let config = Config::from_lookup(|name| match name {
            "STORAGE_MODE" => Some("in_memory".to_string()),
            _ => None,
        })
        .unwrap();

        let state = build(&config).await.unwrap();
        let tasks = state.tasks.get_tasks(state.read_deadline()).await.unwrap();

        assert!(tasks.is_empty());
        assert_eq!(state.timeouts, config.timeouts);
    }
}
