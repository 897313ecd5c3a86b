use async_trait::async_trait;
use tracing::{debug, error, info};
use crate::books::domain::model::BookFilter;
use crate::books::dto::{BookDetailsDto, BookDto, BookSummaryDto, BookViolation};
use crate::books::repository::BookRepository;
use crate::catalog::domain::CatalogService;
use crate::catalog::domain::messages::*;
use crate::core::domain::Configuration;
use crate::core::library::{LibraryError, LibraryResult};
use crate::utils::date::Clock;
use crate::utils::ids::IdGenerator;

pub(crate) struct CatalogServiceImpl {
    branch_id: String,
    book_repository: Box<dyn BookRepository>,
    id_generator: Box<dyn IdGenerator>,
    clock: Box<dyn Clock>,
}

impl CatalogServiceImpl {
    pub(crate) fn new(config: &Configuration, book_repository: Box<dyn BookRepository>,
                      id_generator: Box<dyn IdGenerator>, clock: Box<dyn Clock>) -> Self {
        Self {
            branch_id: config.branch_id.to_string(),
            book_repository,
            id_generator,
            clock,
        }
    }

    fn validate(&self, details: &BookDetailsDto, name_required: &str, read_page_exceeded: &str) -> LibraryResult<()> {
        details.check().map_err(|violation| {
            debug!(branch = self.branch_id.as_str(), reason = violation.reason_code(), "rejected book details");
            let message = match violation {
                BookViolation::NameRequired => name_required,
                BookViolation::ReadPageExceedsPageCount => read_page_exceeded,
            };
            LibraryError::validation(message, Some(violation.reason_code().to_string()))
        })
    }
}

// replaces the repository's not-found message with the one meant for callers
fn not_found_as(message: &'static str) -> impl Fn(LibraryError) -> LibraryError {
    move |err| {
        if err.is_not_found() {
            LibraryError::not_found(message)
        } else {
            err
        }
    }
}

#[async_trait]
impl CatalogService for CatalogServiceImpl {
    async fn add_book(&self, details: &BookDetailsDto) -> LibraryResult<BookDto> {
        self.validate(details, ADD_NAME_REQUIRED, ADD_READ_PAGE_EXCEEDED)?;
        let book = details.build_entity(self.id_generator.generate().as_str(), self.clock.now());
        let _ = self.book_repository.create(&book).await.map_err(|err| {
            error!(branch = self.branch_id.as_str(), book_id = book.id.as_str(), error = %err, "failed to store book");
            LibraryError::runtime(ADD_FAILED, Some("create_failed".to_string()))
        })?;
        // the new book must be readable before its id is handed out
        let created = self.book_repository.get(book.id.as_str()).await.map_err(|err| {
            error!(branch = self.branch_id.as_str(), book_id = book.id.as_str(), error = %err, "stored book is missing");
            LibraryError::runtime(ADD_FAILED, Some("post_insert_check".to_string()))
        })?;
        info!(branch = self.branch_id.as_str(), book_id = created.id.as_str(), finished = created.finished, "added book");
        Ok(BookDto::from(&created))
    }

    async fn find_books(&self, filter: &BookFilter) -> LibraryResult<Vec<BookSummaryDto>> {
        let res = self.book_repository.query(filter).await?;
        debug!(branch = self.branch_id.as_str(), filtered = !filter.is_empty(), count = res.len(), "listed books");
        Ok(res.iter().map(BookSummaryDto::from).collect())
    }

    async fn find_book_by_id(&self, id: &str) -> LibraryResult<BookDto> {
        self.book_repository.get(id).await
            .map(|b| BookDto::from(&b))
            .map_err(not_found_as(BOOK_NOT_FOUND))
    }

    async fn update_book(&self, id: &str, details: &BookDetailsDto) -> LibraryResult<()> {
        self.validate(details, UPDATE_NAME_REQUIRED, UPDATE_READ_PAGE_EXCEEDED)?;
        let book = details.build_entity(id, self.clock.now());
        let _ = self.book_repository.update(&book).await.map_err(not_found_as(UPDATE_NOT_FOUND))?;
        info!(branch = self.branch_id.as_str(), book_id = id, finished = book.finished, "updated book");
        Ok(())
    }

    async fn remove_book(&self, id: &str) -> LibraryResult<()> {
        let _ = self.book_repository.delete(id).await.map_err(not_found_as(DELETE_NOT_FOUND))?;
        info!(branch = self.branch_id.as_str(), book_id = id, "removed book");
        Ok(())
    }
}
