//! `MongoDB`-backed store repository.
//!
//! [`StoreDatabase`] owns the client for the length of one maintenance run.
//! Call [`StoreDatabase::close`] on every path once the run is over.

use futures::TryStreamExt;
use mongodb::bson::{Document, doc, to_bson};
use mongodb::options::ClientOptions;
use mongodb::{Client, Collection};
use secrecy::ExposeSecret;
use tracing::{debug, info, instrument, warn};

use mersiv_core::{LinkUpdate, Store, StoreModel};

use super::{ReplaceOutcome, RepositoryError, StoreLinks, StoreRepository, UpdateOutcome};
use crate::config::DatabaseConfig;

/// Application name reported to the server in the connection handshake.
const APP_NAME: &str = "mersiv-cli";

/// An open connection to the database holding the `stores` collection.
#[derive(Debug)]
pub struct StoreDatabase {
    client: Client,
    stores: MongoStoreRepository,
}

impl StoreDatabase {
    /// Connect and verify the server is reachable.
    ///
    /// Sends a `hello` command, which also reveals whether the deployment
    /// supports multi-document transactions. If the command fails the client
    /// is shut down before the error is returned.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the connection string is
    /// invalid or the server cannot be reached.
    #[instrument(skip(config), fields(database = %config.database_name, collection = %config.collection_name))]
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, RepositoryError> {
        let mut options = ClientOptions::parse(config.uri.expose_secret()).await?;
        options.app_name = Some(APP_NAME.to_owned());
        let client = Client::with_options(options)?;

        let hello = match client.database("admin").run_command(doc! { "hello": 1 }).await {
            Ok(reply) => reply,
            Err(e) => {
                client.shutdown().await;
                return Err(e.into());
            }
        };

        let transactions = supports_transactions(&hello);
        info!(transactions, "Connected to MongoDB");

        let collection = client
            .database(&config.database_name)
            .collection::<Store>(&config.collection_name);

        Ok(Self {
            stores: MongoStoreRepository {
                client: client.clone(),
                collection,
                transactions,
            },
            client,
        })
    }

    /// Repository over the configured collection.
    #[must_use]
    pub const fn stores(&self) -> &MongoStoreRepository {
        &self.stores
    }

    /// Shut the client down, waiting for in-flight operations to finish.
    pub async fn close(self) {
        let Self { client, stores } = self;
        drop(stores);
        client.shutdown().await;
        info!("MongoDB connection closed");
    }
}

/// Whether a `hello` reply comes from a replica set member or a `mongos`.
///
/// Standalone servers reject multi-document transactions.
fn supports_transactions(hello: &Document) -> bool {
    hello.contains_key("setName") || hello.get_str("msg").is_ok_and(|msg| msg == "isdbgrid")
}

/// Pick the media links out of a projected store document.
fn links_from_document(doc: &Document) -> StoreLinks {
    let text = |key: &str| doc.get_str(key).ok().map(str::to_owned);

    StoreLinks {
        name: text("name").unwrap_or_default(),
        video_url: text("videoUrl"),
        clickable_link: text("clickableLink"),
    }
}

/// Store repository over a typed `MongoDB` collection.
#[derive(Debug, Clone)]
pub struct MongoStoreRepository {
    client: Client,
    collection: Collection<Store>,
    transactions: bool,
}

impl MongoStoreRepository {
    /// Delete and insert inside one transaction.
    async fn replace_in_transaction(&self, stores: &[Store]) -> Result<ReplaceOutcome, RepositoryError> {
        let mut session = self.client.start_session().await?;
        session.start_transaction().await?;

        let result = async {
            let deleted = self
                .collection
                .delete_many(doc! {})
                .session(&mut session)
                .await?
                .deleted_count;
            let inserted = if stores.is_empty() {
                0
            } else {
                self.collection
                    .insert_many(stores)
                    .session(&mut session)
                    .await?
                    .inserted_ids
                    .len() as u64
            };
            Ok::<_, mongodb::error::Error>((deleted, inserted))
        }
        .await;

        match result {
            Ok((deleted, inserted)) => {
                session.commit_transaction().await?;
                Ok(ReplaceOutcome {
                    deleted,
                    inserted,
                    atomic: true,
                })
            }
            Err(e) => {
                if let Err(abort) = session.abort_transaction().await {
                    warn!(error = %abort, "Failed to abort reseed transaction");
                }
                Err(e.into())
            }
        }
    }

    /// Delete then insert as two separate writes.
    async fn replace_sequentially(&self, stores: &[Store]) -> Result<ReplaceOutcome, RepositoryError> {
        warn!("Server does not support transactions; clear and insert are not atomic");

        let deleted = self.collection.delete_many(doc! {}).await?.deleted_count;
        debug!(deleted, "Cleared collection");

        let inserted = if stores.is_empty() {
            0
        } else {
            self.collection.insert_many(stores).await?.inserted_ids.len() as u64
        };

        Ok(ReplaceOutcome {
            deleted,
            inserted,
            atomic: false,
        })
    }
}

impl StoreRepository for MongoStoreRepository {
    #[instrument(skip(self))]
    async fn find_all(&self) -> Result<Vec<Store>, RepositoryError> {
        let cursor = self.collection.find(doc! {}).await?;
        let stores: Vec<Store> = cursor.try_collect().await?;

        debug!(count = stores.len(), "Fetched stores");
        Ok(stores)
    }

    #[instrument(skip(self))]
    async fn find_links(&self) -> Result<Vec<StoreLinks>, RepositoryError> {
        let cursor = self
            .collection
            .clone_with_type::<Document>()
            .find(doc! {})
            .projection(doc! { "_id": 0, "name": 1, "videoUrl": 1, "clickableLink": 1 })
            .await?;
        let docs: Vec<Document> = cursor.try_collect().await?;

        debug!(count = docs.len(), "Fetched store links");
        Ok(docs.iter().map(links_from_document).collect())
    }

    #[instrument(skip(self, update), fields(store = %update.name))]
    async fn set_media_links(&self, update: &LinkUpdate) -> Result<UpdateOutcome, RepositoryError> {
        let result = self
            .collection
            .update_one(
                doc! { "name": update.name.as_str() },
                doc! {
                    "$set": {
                        "videoUrl": update.video_url.as_str(),
                        "clickableLink": update.clickable_link.as_str(),
                    }
                },
            )
            .await?;

        Ok(UpdateOutcome {
            matched: result.matched_count,
            modified: result.modified_count,
        })
    }

    #[instrument(skip(self, models), fields(models = models.len()))]
    async fn set_models(
        &self,
        name: &str,
        models: &[StoreModel],
    ) -> Result<UpdateOutcome, RepositoryError> {
        let models = to_bson(models)?;

        let result = self
            .collection
            .update_many(doc! { "name": name }, doc! { "$set": { "models": models } })
            .await?;

        Ok(UpdateOutcome {
            matched: result.matched_count,
            modified: result.modified_count,
        })
    }

    #[instrument(skip(self, stores), fields(stores = stores.len(), transactions = self.transactions))]
    async fn replace_all(&self, stores: &[Store]) -> Result<ReplaceOutcome, RepositoryError> {
        if self.transactions {
            self.replace_in_transaction(stores).await
        } else {
            self.replace_sequentially(stores).await
        }
    }
}
