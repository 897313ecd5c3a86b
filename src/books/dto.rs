use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use crate::books::domain::model::BookEntity;
use crate::utils::date::serializer;

// BookDto is the full book record returned by the Catalog service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct BookDto {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,
    pub page_count: u32,
    pub read_page: u32,
    pub finished: bool,
    pub reading: bool,
    #[serde(with = "serializer")]
    pub inserted_at: DateTime<Utc>,
    #[serde(with = "serializer")]
    pub updated_at: DateTime<Utc>,
}

// BookSummaryDto is the projection used when listing books
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct BookSummaryDto {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,
}

// BookDetailsDto carries the caller supplied fields of a book, i.e. everything except
// id, finished and the timestamps. Missing or null name, counts and reading flag read as
// their empty values so that validation can report them.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct BookDetailsDto {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    pub year: Option<i32>,
    pub author: Option<String>,
    pub summary: Option<String>,
    pub publisher: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub page_count: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub read_page: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub reading: bool,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
    where D: Deserializer<'de>, T: Default + Deserialize<'de> {
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum BookViolation {
    NameRequired,
    ReadPageExceedsPageCount,
}

impl BookViolation {
    pub fn reason_code(&self) -> &'static str {
        match self {
            BookViolation::NameRequired => "name_required",
            BookViolation::ReadPageExceedsPageCount => "read_page_exceeds_page_count",
        }
    }
}

impl BookDetailsDto {
    // rules are checked in order, the first one broken is reported
    pub fn check(&self) -> Result<(), BookViolation> {
        if self.name.is_empty() {
            return Err(BookViolation::NameRequired);
        }
        if self.read_page > self.page_count {
            return Err(BookViolation::ReadPageExceedsPageCount);
        }
        Ok(())
    }

    pub fn is_finished(&self) -> bool {
        self.page_count == self.read_page
    }

    pub fn build_entity(&self, id: &str, now: DateTime<Utc>) -> BookEntity {
        BookEntity {
            id: id.to_string(),
            name: self.name.to_string(),
            year: self.year,
            author: self.author.clone(),
            summary: self.summary.clone(),
            publisher: self.publisher.clone(),
            page_count: self.page_count,
            read_page: self.read_page,
            finished: self.is_finished(),
            reading: self.reading,
            inserted_at: now,
            updated_at: now,
        }
    }
}

impl From<&BookEntity> for BookDto {
    fn from(other: &BookEntity) -> Self {
        Self {
            id: other.id.to_string(),
            name: other.name.to_string(),
            year: other.year,
            author: other.author.clone(),
            summary: other.summary.clone(),
            publisher: other.publisher.clone(),
            page_count: other.page_count,
            read_page: other.read_page,
            finished: other.finished,
            reading: other.reading,
            inserted_at: other.inserted_at,
            updated_at: other.updated_at,
        }
    }
}

impl From<&BookEntity> for BookSummaryDto {
    fn from(other: &BookEntity) -> Self {
        Self {
            id: other.id.to_string(),
            name: other.name.to_string(),
            publisher: other.publisher.clone(),
        }
    }
}
