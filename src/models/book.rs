//! Book (catalog record) model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DefaultOnError, DisplayFromStr, NoneAsEmptyString, PickFirst};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

/// Book row
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Book {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub author: String,
    pub isbn: Option<String>,
    pub publisher: Option<String>,
    pub publication_year: Option<i32>,
    pub genre: Option<String>,
    pub description: Option<String>,
    pub language: String,
    pub pages: Option<i32>,
    pub created_at: DateTime<Utc>,
}

/// Book with copy counts
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct BookWithCounts {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub book: Book,
    pub total_copies: i64,
    pub available_copies: i64,
}

/// Create/update book request.
///
/// Optional text fields treat `""` as unset; numeric fields additionally
/// accept numeric strings and ignore anything unparsable.
#[serde_as]
#[derive(Debug, Deserialize, ToSchema)]
pub struct BookInput {
    pub title: Option<String>,
    pub author: Option<String>,
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub isbn: Option<String>,
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub publisher: Option<String>,
    #[serde_as(as = "DefaultOnError<Option<PickFirst<(_, DisplayFromStr)>>>")]
    #[serde(default)]
    #[schema(value_type = Option<i32>)]
    pub publication_year: Option<i32>,
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub genre: Option<String>,
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub description: Option<String>,
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub language: Option<String>,
    #[serde_as(as = "DefaultOnError<Option<PickFirst<(_, DisplayFromStr)>>>")]
    #[serde(default)]
    #[schema(value_type = Option<i32>)]
    pub pages: Option<i32>,
}

/// Book search query
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct BookQuery {
    /// Case-insensitive substring of title, author or ISBN
    pub search: Option<String>,
}

/// Validated book fields ready to be written
#[derive(Debug, Clone)]
pub struct BookFields {
    pub title: String,
    pub author: String,
    pub isbn: Option<String>,
    pub publisher: Option<String>,
    pub publication_year: Option<i32>,
    pub genre: Option<String>,
    pub description: Option<String>,
    pub language: String,
    pub pages: Option<i32>,
}

impl TryFrom<BookInput> for BookFields {
    type Error = String;

    fn try_from(input: BookInput) -> Result<Self, Self::Error> {
        let title = required(input.title, "title")?;
        let author = required(input.author, "author")?;
        Ok(Self {
            title,
            author,
            isbn: input.isbn,
            publisher: input.publisher,
            publication_year: input.publication_year,
            genre: input.genre,
            description: input.description,
            language: input.language.unwrap_or_else(|| "English".to_string()),
            pages: input.pages,
        })
    }
}

fn required(value: Option<String>, field: &str) -> Result<String, String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| format!("{} is required", field))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_numeric_fields_become_null() {
        let input: BookInput = serde_json::from_value(json!({
            "title": "Dune",
            "author": "Frank Herbert",
            "publication_year": "",
            "pages": "412",
            "isbn": ""
        }))
        .unwrap();

        assert_eq!(input.publication_year, None);
        assert_eq!(input.pages, Some(412));
        assert_eq!(input.isbn, None);
    }

    #[test]
    fn test_language_defaults_to_english() {
        let input: BookInput =
            serde_json::from_value(json!({"title": "Dune", "author": "Frank Herbert"})).unwrap();
        let fields = BookFields::try_from(input).unwrap();
        assert_eq!(fields.language, "English");
    }

    #[test]
    fn test_title_is_required() {
        let input: BookInput =
            serde_json::from_value(json!({"title": "  ", "author": "Frank Herbert"})).unwrap();
        assert_eq!(BookFields::try_from(input).unwrap_err(), "title is required");
    }
}
