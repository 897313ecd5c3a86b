use std::sync::Arc;
use async_trait::async_trait;
use tokio::sync::RwLock;
use crate::books::domain::model::BookEntity;
use crate::core::library::LibraryResult;

#[async_trait]
pub trait Repository<Entity>: Sync + Send {
    // create an entity
    async fn create(&self, entity: &Entity) -> LibraryResult<usize>;

    // updates an entity
    async fn update(&self, entity: &Entity) -> LibraryResult<usize>;

    // get an entity
    async fn get(&self, id: &str) -> LibraryResult<Entity>;

    // delete an entity
    async fn delete(&self, id: &str) -> LibraryResult<usize>;
}

pub(crate) type Table<Entity> = Arc<RwLock<Vec<Entity>>>;

// RepositoryStore owns the in-memory tables, clones share the same tables.
#[derive(Debug, Clone, Default)]
pub struct RepositoryStore {
    books: Table<BookEntity>,
}

impl RepositoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn books(&self) -> Table<BookEntity> {
        self.books.clone()
    }
}
