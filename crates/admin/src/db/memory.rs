//! In-process store repository.

use std::sync::{Mutex, MutexGuard, PoisonError};

use mersiv_core::{LinkUpdate, Store, StoreModel};

use super::{ReplaceOutcome, RepositoryError, StoreLinks, StoreRepository, UpdateOutcome};

/// A `stores` collection held in memory.
///
/// Follows the same update rules as [`super::MongoStoreRepository`]: link
/// updates touch the first match only, model updates touch every match, and
/// neither creates documents. Replacement is always atomic.
#[derive(Debug, Default)]
pub struct InMemoryStoreRepository {
    stores: Mutex<Vec<Store>>,
}

impl InMemoryStoreRepository {
    /// Create a repository holding `stores`.
    #[must_use]
    pub const fn new(stores: Vec<Store>) -> Self {
        Self {
            stores: Mutex::new(stores),
        }
    }

    /// Copy of the current contents.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Store> {
        self.lock().clone()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Store>> {
        self.stores.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl StoreRepository for InMemoryStoreRepository {
    async fn find_all(&self) -> Result<Vec<Store>, RepositoryError> {
        Ok(self.snapshot())
    }

    async fn find_links(&self) -> Result<Vec<StoreLinks>, RepositoryError> {
        Ok(self
            .lock()
            .iter()
            .map(|s| StoreLinks {
                name: s.name.clone(),
                video_url: s.video_url.clone(),
                clickable_link: s.clickable_link.clone(),
            })
            .collect())
    }

    async fn set_media_links(&self, update: &LinkUpdate) -> Result<UpdateOutcome, RepositoryError> {
        let mut stores = self.lock();
        let Some(store) = stores.iter_mut().find(|s| s.name == update.name) else {
            return Ok(UpdateOutcome::default());
        };

        let changed = store.video_url.as_deref() != Some(update.video_url.as_str())
            || store.clickable_link.as_deref() != Some(update.clickable_link.as_str());
        store.video_url = Some(update.video_url.clone());
        store.clickable_link = Some(update.clickable_link.clone());

        Ok(UpdateOutcome {
            matched: 1,
            modified: u64::from(changed),
        })
    }

    async fn set_models(
        &self,
        name: &str,
        models: &[StoreModel],
    ) -> Result<UpdateOutcome, RepositoryError> {
        let mut outcome = UpdateOutcome::default();

        for store in self.lock().iter_mut().filter(|s| s.name == name) {
            outcome.matched += 1;
            if store.models != models {
                store.models = models.to_vec();
                outcome.modified += 1;
            }
        }

        Ok(outcome)
    }

    async fn replace_all(&self, stores: &[Store]) -> Result<ReplaceOutcome, RepositoryError> {
        let mut current = self.lock();
        let deleted = current.len() as u64;
        *current = stores.to_vec();

        Ok(ReplaceOutcome {
            deleted,
            inserted: stores.len() as u64,
            atomic: true,
        })
    }
}
