//! MongoDB connection owned by the process.

use mongodb::bson::doc;
use mongodb::{Client, Collection, Database};
use thiserror::Error;

use crate::config::MongoConfig;
use crate::tasks::repository::mongo::TaskDocument;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to connect to MongoDB: {0}")]
    Connect(#[from] mongodb::error::Error),

    #[error("MongoDB did not answer a ping within {0:?}")]
    PingTimeout(std::time::Duration),
}

/// Database handle built once at startup and shared through the repository.
#[derive(Debug, Clone)]
pub struct MongoStore {
    database: Database,
    collection: String,
}

impl MongoStore {
    /// Connects and pings the server. The driver pools connections internally;
    /// nothing here retries.
    pub async fn connect(config: &MongoConfig) -> Result<Self, StorageError> {
        let client = Client::with_uri_str(&config.uri).await?;
        let database = client.database(&config.database);

        tokio::time::timeout(
            config.connect_timeout,
            client.database("admin").run_command(doc! { "ping": 1 }),
        )
        .await
        .map_err(|_| StorageError::PingTimeout(config.connect_timeout))??;

        tracing::info!(database = %config.database, "Connected to MongoDB");

        Ok(Self {
            database,
            collection: config.collection.clone(),
        })
    }

    pub fn tasks(&self) -> Collection<TaskDocument> {
        self.database.collection(&self.collection)
    }
}
