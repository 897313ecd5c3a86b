use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::books::domain::Book;
use crate::core::domain::Identifiable;
use crate::utils::date::serializer;

// BookEntity is a book on the shelf as kept by the repository. finished is derived from
// page_count and read_page whenever the entity is written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct BookEntity {
    pub id: String,
    pub name: String,
    pub year: Option<i32>,
    pub author: Option<String>,
    pub summary: Option<String>,
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

impl Identifiable for BookEntity {
    fn id(&self) -> String {
        self.id.to_string()
    }
}

impl Book for BookEntity {
    fn title(&self) -> &str {
        self.name.as_str()
    }

    fn is_reading(&self) -> bool {
        self.reading
    }

    fn is_finished(&self) -> bool {
        self.finished
    }
}

// BookFilter narrows a listing, every predicate that is set must hold.
#[derive(Debug, Default, Clone, PartialEq)]
pub(crate) struct BookFilter {
    pub name: Option<String>,
    pub reading: Option<bool>,
    pub finished: Option<bool>,
}

impl BookFilter {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.reading.is_none() && self.finished.is_none()
    }

    pub fn matches<B: Book>(&self, book: &B) -> bool {
        if let Some(name) = &self.name {
            if !book.title().to_lowercase().contains(name.to_lowercase().as_str()) {
                return false;
            }
        }
        if let Some(reading) = self.reading {
            if book.is_reading() != reading {
                return false;
            }
        }
        if let Some(finished) = self.finished {
            if book.is_finished() != finished {
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use crate::books::domain::model::{BookEntity, BookFilter};

    fn book(name: &str, reading: bool, finished: bool) -> BookEntity {
        let now = Utc::now();
        BookEntity {
            id: name.to_string(),
            name: name.to_string(),
            year: None,
            author: None,
            summary: None,
            publisher: None,
            page_count: 10,
            read_page: if finished { 10 } else { 5 },
            finished,
            reading,
            inserted_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_should_match_everything_without_predicates() {
        let filter = BookFilter::default();
        assert!(filter.is_empty());
        assert!(filter.matches(&book("Sinking", false, false)));
        assert!(filter.matches(&book("Rowing", true, true)));
    }

    #[tokio::test]
    async fn test_should_match_name_ignoring_case() {
        let filter = BookFilter { name: Some("iNK".to_string()), ..Default::default() };
        assert!(!filter.is_empty());
        assert!(filter.matches(&book("Sinking", false, false)));
        assert!(filter.matches(&book("INKWELL", false, false)));
        assert!(!filter.matches(&book("Rowing", false, false)));
    }

    #[tokio::test]
    async fn test_should_match_all_predicates() {
        let filter = BookFilter { name: None, reading: Some(true), finished: Some(false) };
        assert!(filter.matches(&book("a", true, false)));
        assert!(!filter.matches(&book("b", true, true)));
        assert!(!filter.matches(&book("c", false, false)));
    }

    #[tokio::test]
    async fn test_should_serialize_camel_case() {
        let json = serde_json::to_value(book("Sinking", true, false)).expect("should serialize");
        assert_eq!(10, json["pageCount"]);
        assert_eq!(5, json["readPage"]);
        assert!(json["insertedAt"].is_string());
        assert!(json["updatedAt"].is_string());
    }
}
