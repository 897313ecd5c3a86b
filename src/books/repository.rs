pub mod memory_book_repository;

use async_trait::async_trait;
use crate::books::domain::model::{BookEntity, BookFilter};
use crate::core::library::LibraryResult;
use crate::core::repository::Repository;

// update replaces every field of the stored book except id and inserted_at.
#[async_trait]
pub(crate) trait BookRepository: Repository<BookEntity> {
    // returns matching books in insertion order
    async fn query(&self, filter: &BookFilter) -> LibraryResult<Vec<BookEntity>>;
}
