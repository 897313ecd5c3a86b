pub mod service;

use async_trait::async_trait;
use crate::books::domain::model::BookFilter;
use crate::books::dto::{BookDetailsDto, BookDto, BookSummaryDto};
use crate::core::library::LibraryResult;

// Messages handed back to callers, one per outcome.
pub(crate) mod messages {
    pub const BOOK_ADDED: &str = "Buku berhasil ditambahkan";
    pub const ADD_NAME_REQUIRED: &str = "Gagal menambahkan buku. Mohon isi nama buku";
    pub const ADD_READ_PAGE_EXCEEDED: &str = "Gagal menambahkan buku. readPage tidak boleh lebih besar dari pageCount";
    pub const ADD_FAILED: &str = "Buku gagal ditambahkan";
    pub const BOOK_NOT_FOUND: &str = "Buku tidak ditemukan";
    pub const BOOK_UPDATED: &str = "Buku berhasil diperbarui";
    pub const UPDATE_NAME_REQUIRED: &str = "Gagal memperbarui buku. Mohon isi nama buku";
    pub const UPDATE_READ_PAGE_EXCEEDED: &str = "Gagal memperbarui buku. readPage tidak boleh lebih besar dari pageCount";
    pub const UPDATE_NOT_FOUND: &str = "Gagal memperbarui buku. Id tidak ditemukan";
    pub const BOOK_DELETED: &str = "Buku berhasil dihapus";
    pub const DELETE_NOT_FOUND: &str = "Buku gagal dihapus. Id tidak ditemukan";
}

#[async_trait]
pub(crate) trait CatalogService: Sync + Send {
    async fn add_book(&self, details: &BookDetailsDto) -> LibraryResult<BookDto>;
    async fn find_books(&self, filter: &BookFilter) -> LibraryResult<Vec<BookSummaryDto>>;
    async fn find_book_by_id(&self, id: &str) -> LibraryResult<BookDto>;
    async fn update_book(&self, id: &str, details: &BookDetailsDto) -> LibraryResult<()>;
    async fn remove_book(&self, id: &str) -> LibraryResult<()>;
}
