use async_trait::async_trait;
use serde::Serialize;
use crate::books::dto::BookDetailsDto;
use crate::catalog::domain::CatalogService;
use crate::core::command::{Command, CommandError};

pub(crate) struct UpdateBookCommand {
    catalog_service: Box<dyn CatalogService>,
}

impl UpdateBookCommand {
    pub(crate) fn new(catalog_service: Box<dyn CatalogService>) -> Self {
        Self {
            catalog_service,
        }
    }
}

#[derive(Debug)]
pub(crate) struct UpdateBookCommandRequest {
    pub book_id: String,
    pub details: BookDetailsDto,
}

impl UpdateBookCommandRequest {
    pub fn new(book_id: &str, details: BookDetailsDto) -> Self {
        Self {
            book_id: book_id.to_string(),
            details,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct UpdateBookCommandResponse {}

impl UpdateBookCommandResponse {
    pub fn new() -> Self {
        Self {}
    }
}

#[async_trait]
impl Command<UpdateBookCommandRequest, UpdateBookCommandResponse> for UpdateBookCommand {
    async fn execute(&self, req: UpdateBookCommandRequest) -> Result<UpdateBookCommandResponse, CommandError> {
        self.catalog_service.update_book(req.book_id.as_str(), &req.details).await
            .map_err(CommandError::from).map(|_| UpdateBookCommandResponse::new())
    }
}
