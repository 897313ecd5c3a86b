use async_trait::async_trait;
use crate::books::domain::model::{BookEntity, BookFilter};
use crate::books::repository::BookRepository;
use crate::core::domain::Identifiable;
use crate::core::library::{LibraryError, LibraryResult};
use crate::core::repository::{Repository, Table};

// MemoryBookRepository keeps books in a vector shared through the RepositoryStore. Each
// operation holds the table lock for its whole lookup and mutation.
#[derive(Debug)]
pub struct MemoryBookRepository {
    books: Table<BookEntity>,
}

impl MemoryBookRepository {
    pub(crate) fn new(books: Table<BookEntity>) -> Self {
        Self {
            books,
        }
    }
}

fn position(books: &[BookEntity], id: &str) -> Option<usize> {
    books.iter().position(|b| b.id() == id)
}

#[async_trait]
impl Repository<BookEntity> for MemoryBookRepository {
    async fn create(&self, entity: &BookEntity) -> LibraryResult<usize> {
        let mut books = self.books.write().await;
        if position(&books, entity.id.as_str()).is_some() {
            return Err(LibraryError::duplicate_key(format!("book already exists for {}", entity.id).as_str()));
        }
        books.push(entity.clone());
        Ok(1)
    }

    async fn update(&self, entity: &BookEntity) -> LibraryResult<usize> {
        let mut books = self.books.write().await;
        let ndx = position(&books, entity.id.as_str())
            .ok_or_else(|| LibraryError::not_found(format!("book not found for {}", entity.id).as_str()))?;
        let inserted_at = books[ndx].inserted_at;
        books[ndx] = BookEntity {
            inserted_at,
            ..entity.clone()
        };
        Ok(1)
    }

    async fn get(&self, id: &str) -> LibraryResult<BookEntity> {
        let books = self.books.read().await;
        books.iter()
            .find(|b| b.id == id)
            .cloned()
            .ok_or_else(|| LibraryError::not_found(format!("book not found for {}", id).as_str()))
    }

    async fn delete(&self, id: &str) -> LibraryResult<usize> {
        let mut books = self.books.write().await;
        let ndx = position(&books, id)
            .ok_or_else(|| LibraryError::not_found(format!("book not found for {}", id).as_str()))?;
        // Vec::remove keeps the order of the remaining books
        books.remove(ndx);
        Ok(1)
    }
}

#[async_trait]
impl BookRepository for MemoryBookRepository {
    async fn query(&self, filter: &BookFilter) -> LibraryResult<Vec<BookEntity>> {
        let books = self.books.read().await;
        Ok(books.iter().filter(|b| filter.matches(*b)).cloned().collect())
    }
}
