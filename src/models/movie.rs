// src/models/movie.rs
// DOCUMENTATION: Data structures for movies
// PURPOSE: Database row and request body shapes

use serde::de::{self, Deserializer, MapAccess, Visitor};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use validator::{Validate, ValidationError, ValidationErrors};

/// A row of the movies table
/// DOCUMENTATION: Serialized as `{"id": N, "title": "..."}` on every response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Movie {
    /// Assigned by storage on insert, never changes afterwards
    pub id: i64,

    /// Non-empty, already trimmed
    pub title: String,
}

/// Body accepted by POST /movies and PUT /movies/{id}
/// DOCUMENTATION: Keys match `title` case-insensitively and a repeated key
/// keeps its last value. Any other key is rejected. A missing or null title,
/// or a bare `null` body, leaves the title empty so validation reports it.
#[derive(Debug, Clone, Default, Validate)]
pub struct MovieInput {
    #[validate(custom = "validate_not_blank")]
    pub title: String,
}

const MOVIE_INPUT_FIELDS: &[&str] = &["title"];

impl<'de> Deserialize<'de> for MovieInput {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(MovieInputVisitor)
    }
}

struct MovieInputVisitor;

impl<'de> Visitor<'de> for MovieInputVisitor {
    type Value = MovieInput;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("an object with a title field")
    }

    fn visit_unit<E: de::Error>(self) -> Result<MovieInput, E> {
        Ok(MovieInput::default())
    }

    fn visit_map<A>(self, mut map: A) -> Result<MovieInput, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut input = MovieInput::default();
        while let Some(key) = map.next_key::<String>()? {
            if !key.eq_ignore_ascii_case("title") {
                return Err(de::Error::unknown_field(&key, MOVIE_INPUT_FIELDS));
            }
            // null leaves whatever an earlier key already set
            if let Some(title) = map.next_value::<Option<String>>()? {
                input.title = title;
            }
        }
        Ok(input)
    }
}

impl MovieInput {
    /// Validated, trimmed title ready for storage
    pub fn into_title(self) -> Result<String, ValidationErrors> {
        self.validate()?;
        Ok(self.title.trim().to_string())
    }
}

fn validate_not_blank(title: &str) -> Result<(), ValidationError> {
    if title.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some("title is required".into());
        return Err(err);
    }
    Ok(())
}
