use crate::books::repository::BookRepository;
use crate::books::repository::memory_book_repository::MemoryBookRepository;
use crate::core::repository::RepositoryStore;

pub(crate) async fn create_book_repository(store: &RepositoryStore) -> Box<dyn BookRepository> {
    Box::new(MemoryBookRepository::new(store.books()))
}
