use indexmap::IndexMap;
use tokio::sync::RwLock;

use crate::student::Enrolled;

pub trait Identifiable {
    fn key(&self) -> String;
}

impl<T: Enrolled> Identifiable for T {
    fn key(&self) -> String {
        self.student().student_id().to_string()
    }
}

/// Keyed store of whole entities. Lookups hand back clones.
#[allow(async_fn_in_trait)]
pub trait Repository<T: Identifiable> {
    /// Inserts or replaces by key.
    async fn save(&self, entity: T) -> T;

    async fn find_by_id(&self, id: &str) -> Option<T>;

    async fn find_all(&self) -> Vec<T>;

    /// Applies `change` in place; `None` when the id is unknown.
    async fn update<F>(&self, id: &str, change: F) -> Option<T>
    where
        F: FnOnce(&mut T) + Send;

    async fn delete(&self, id: &str) -> bool;
}

/// Process-local repository. Nothing survives the process.
#[derive(Debug)]
pub struct InMemoryRepository<T> {
    entities: RwLock<IndexMap<String, T>>,
}

impl<T> Default for InMemoryRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> InMemoryRepository<T> {
    pub fn new() -> Self {
        InMemoryRepository {
            entities: RwLock::new(IndexMap::new()),
        }
    }

    pub async fn len(&self) -> usize {
        self.entities.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entities.read().await.is_empty()
    }
}

impl<T: Identifiable + Clone + Send + Sync> Repository<T> for InMemoryRepository<T> {
    async fn save(&self, entity: T) -> T {
        let key = entity.key();
        tracing::debug!(key = %key, "saving entity");
        self.entities.write().await.insert(key, entity.clone());
        entity
    }

    async fn find_by_id(&self, id: &str) -> Option<T> {
        self.entities.read().await.get(id).cloned()
    }

    async fn find_all(&self) -> Vec<T> {
        self.entities.read().await.values().cloned().collect()
    }

    async fn update<F>(&self, id: &str, change: F) -> Option<T>
    where
        F: FnOnce(&mut T) + Send,
    {
        let mut entities = self.entities.write().await;
        let entity = entities.get_mut(id)?;
        change(entity);
        Some(entity.clone())
    }

    async fn delete(&self, id: &str) -> bool {
        self.entities.write().await.shift_remove(id).is_some()
    }
}
