use async_trait::async_trait;
use serde::Serialize;
use crate::books::domain::model::BookFilter;
use crate::books::dto::BookSummaryDto;
use crate::catalog::domain::CatalogService;
use crate::core::command::{Command, CommandError};

pub(crate) struct ListBooksCommand {
    catalog_service: Box<dyn CatalogService>,
}

impl ListBooksCommand {
    pub(crate) fn new(catalog_service: Box<dyn CatalogService>) -> Self {
        Self {
            catalog_service,
        }
    }
}

// Query string predicates as they arrive, reading/finished use "0" for false and any
// other text for true. Empty values count as absent.
#[derive(Debug, Default)]
pub(crate) struct ListBooksCommandRequest {
    pub(crate) name: Option<String>,
    pub(crate) reading: Option<String>,
    pub(crate) finished: Option<String>,
}

fn flag(value: &Option<String>) -> Option<bool> {
    match value.as_deref() {
        None | Some("") => None,
        Some("0") => Some(false),
        Some(_) => Some(true),
    }
}

// Built from raw query pairs, the first value of a repeated key wins and unknown keys are ignored.
impl FromIterator<(String, String)> for ListBooksCommandRequest {
    fn from_iter<I: IntoIterator<Item=(String, String)>>(pairs: I) -> Self {
        let mut req = ListBooksCommandRequest::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "name" => &mut req.name,
                "reading" => &mut req.reading,
                "finished" => &mut req.finished,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value);
            }
        }
        req
    }
}

impl ListBooksCommandRequest {
    pub fn build_filter(&self) -> BookFilter {
        BookFilter {
            name: self.name.clone().filter(|n| !n.is_empty()),
            reading: flag(&self.reading),
            finished: flag(&self.finished),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct ListBooksCommandResponse {
    pub books: Vec<BookSummaryDto>,
}

impl ListBooksCommandResponse {
    pub fn new(books: Vec<BookSummaryDto>) -> Self {
        Self {
            books,
        }
    }
}

#[async_trait]
impl Command<ListBooksCommandRequest, ListBooksCommandResponse> for ListBooksCommand {
    async fn execute(&self, req: ListBooksCommandRequest) -> Result<ListBooksCommandResponse, CommandError> {
        self.catalog_service.find_books(&req.build_filter())
            .await.map_err(CommandError::from).map(ListBooksCommandResponse::new)
    }
}
