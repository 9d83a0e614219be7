//! Integration tests for Mersiv store maintenance.
//!
//! # Running Tests
//!
//! ```bash
//! # Start a local MongoDB (a single-node replica set exercises transactions)
//! docker run -d -p 27017:27017 mongo:7 --replSet rs0
//! docker exec <container> mongosh --eval 'rs.initiate()'
//!
//! # Run the ignored tests
//! cargo test -p mersiv-integration-tests -- --ignored
//! ```
//!
//! Each test gets its own `mersiv_test_<uuid>` database, dropped afterwards.
//! `MONGODB_URI` selects the server (default: `mongodb://localhost:27017`).

#![cfg_attr(not(test), forbid(unsafe_code))]

use mersiv_admin::DatabaseConfig;
use mersiv_admin::config::DEFAULT_MONGODB_URI;
use mersiv_admin::db::StoreDatabase;
use mongodb::bson::Document;
use mongodb::{Client, Collection};
use secrecy::SecretString;
use uuid::Uuid;

/// A throwaway database on the test server.
pub struct TestContext {
    /// Points the maintenance code at the throwaway database.
    pub config: DatabaseConfig,
    client: Client,
}

impl TestContext {
    /// Connect and pick a unique database name.
    ///
    /// # Errors
    ///
    /// Returns an error if the server cannot be reached.
    pub async fn new() -> mongodb::error::Result<Self> {
        let uri = std::env::var("MONGODB_URI").unwrap_or_else(|_| DEFAULT_MONGODB_URI.to_owned());
        let client = Client::with_uri_str(&uri).await?;

        let config = DatabaseConfig {
            uri: SecretString::from(uri),
            database_name: format!("mersiv_test_{}", Uuid::new_v4().simple()),
            ..DatabaseConfig::default()
        };

        Ok(Self { config, client })
    }

    /// Open the repository the way a maintenance run does.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection fails.
    pub async fn open(&self) -> Result<StoreDatabase, mersiv_admin::db::RepositoryError> {
        StoreDatabase::connect(&self.config).await
    }

    /// Untyped view of the collection, for writing and reading raw documents.
    #[must_use]
    pub fn raw_stores(&self) -> Collection<Document> {
        self.client
            .database(&self.config.database_name)
            .collection(&self.config.collection_name)
    }

    /// Drop the database and shut the client down.
    ///
    /// # Errors
    ///
    /// Returns an error if the drop fails.
    pub async fn cleanup(self) -> mongodb::error::Result<()> {
        self.client
            .database(&self.config.database_name)
            .drop()
            .await?;
        self.client.shutdown().await;
        Ok(())
    }
}
