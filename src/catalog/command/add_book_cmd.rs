use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::books::dto::BookDetailsDto;
use crate::catalog::domain::CatalogService;
use crate::core::command::{Command, CommandError};

pub(crate) struct AddBookCommand {
    catalog_service: Box<dyn CatalogService>,
}

impl AddBookCommand {
    pub(crate) fn new(catalog_service: Box<dyn CatalogService>) -> Self {
        Self {
            catalog_service,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(transparent)]
pub(crate) struct AddBookCommandRequest {
    pub(crate) details: BookDetailsDto,
}

impl AddBookCommandRequest {
    pub fn new(details: BookDetailsDto) -> Self {
        Self {
            details,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AddBookCommandResponse {
    pub book_id: String,
}

impl AddBookCommandResponse {
    pub fn new(book_id: String) -> Self {
        Self {
            book_id,
        }
    }
}

#[async_trait]
impl Command<AddBookCommandRequest, AddBookCommandResponse> for AddBookCommand {
    async fn execute(&self, req: AddBookCommandRequest) -> Result<AddBookCommandResponse, CommandError> {
        self.catalog_service.add_book(&req.details).await
            .map_err(CommandError::from).map(|book| AddBookCommandResponse::new(book.id))
    }
}
