use sea_orm::{ActiveValue, FromQueryResult};
use serde::{Deserialize, Deserializer, Serialize};

use crate::{
    entities::{director, genre, movie},
    error::{AppError, AppResult},
};

/// A movie joined with the names of its genre and director.
#[derive(Clone, Debug, PartialEq, FromQueryResult, Serialize)]
pub struct MovieRecord {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub rating: f64,
    pub trailer: String,
    pub genre: String,
    pub director: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DirectorRecord {
    pub id: i32,
    pub name: String,
}

impl From<director::Model> for DirectorRecord {
    fn from(model: director::Model) -> Self {
        Self { id: model.id, name: model.name }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GenreRecord {
    pub id: i32,
    pub name: String,
}

impl From<genre::Model> for GenreRecord {
    fn from(model: genre::Model) -> Self {
        Self { id: model.id, name: model.name }
    }
}

/// An empty value (`?director_id=`) means no filter.
#[derive(Debug, Default, Deserialize)]
pub struct MovieFilter {
    #[serde(default, deserialize_with = "empty_as_none")]
    pub director_id: Option<i32>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub genre_id: Option<i32>,
}

fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(raw) if !raw.is_empty() => raw.parse().map(Some).map_err(serde::de::Error::custom),
        _ => Ok(None),
    }
}

/// * JSON field absent  => `None`
/// * JSON field = null  => `Some(None)`
/// * JSON field = value => `Some(Some(v))`
fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Some(Option::deserialize(deserializer)?))
}

/// Incoming movie body. Keys are tracked separately from their values so a
/// present `null` still counts as present; each handler decides what absence
/// means.
#[derive(Debug, Default, Deserialize)]
pub struct MoviePayload {
    #[serde(default, deserialize_with = "double_option")]
    pub title: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub trailer: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub year: Option<Option<i32>>,
    #[serde(default, deserialize_with = "double_option")]
    pub rating: Option<Option<f64>>,
    #[serde(default, deserialize_with = "double_option")]
    pub genre_id: Option<Option<i32>>,
    #[serde(default, deserialize_with = "double_option")]
    pub director_id: Option<Option<i32>>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum MovieChange {
    Title(String),
    Description(String),
    Trailer(String),
    Year(i32),
    Rating(f64),
    GenreId(i32),
    DirectorId(i32),
}

impl MovieChange {
    pub fn apply(self, active: &mut movie::ActiveModel) {
        match self {
            MovieChange::Title(v) => active.title = ActiveValue::Set(v),
            MovieChange::Description(v) => active.description = ActiveValue::Set(v),
            MovieChange::Trailer(v) => active.trailer = ActiveValue::Set(v),
            MovieChange::Year(v) => active.year = ActiveValue::Set(v),
            MovieChange::Rating(v) => active.rating = ActiveValue::Set(v),
            MovieChange::GenreId(v) => active.genre_id = ActiveValue::Set(v),
            MovieChange::DirectorId(v) => active.director_id = ActiveValue::Set(v),
        }
    }
}

fn present<V>(value: Option<Option<V>>) -> ActiveValue<V>
where
    V: Into<sea_orm::Value>,
{
    value.flatten().map_or(ActiveValue::NotSet, ActiveValue::Set)
}

// Every movie column is NOT NULL.
fn non_null<V>(value: Option<V>, key: &str) -> AppResult<V> {
    value.ok_or_else(|| AppError::Payload(format!("field `{key}` cannot be null")))
}

fn required<V>(value: Option<Option<V>>, key: &str) -> AppResult<V> {
    let value = value.ok_or_else(|| AppError::Payload(format!("missing field `{key}`")))?;
    non_null(value, key)
}

impl MoviePayload {
    /// Fields left out stay unset, so the store's NOT NULL constraints decide
    /// whether the insert goes through.
    pub fn into_new_movie(self) -> movie::ActiveModel {
        movie::ActiveModel {
            id: ActiveValue::NotSet,
            title: present(self.title),
            description: present(self.description),
            trailer: present(self.trailer),
            year: present(self.year),
            rating: present(self.rating),
            genre_id: present(self.genre_id),
            director_id: present(self.director_id),
        }
    }

    /// The first key present in precedence order title, description, trailer,
    /// year, rating, genre_id, director_id. Later keys are ignored, even when
    /// the winning key carries `null`.
    pub fn first_change(self) -> AppResult<Option<MovieChange>> {
        let change = if let Some(v) = self.title {
            MovieChange::Title(non_null(v, "title")?)
        } else if let Some(v) = self.description {
            MovieChange::Description(non_null(v, "description")?)
        } else if let Some(v) = self.trailer {
            MovieChange::Trailer(non_null(v, "trailer")?)
        } else if let Some(v) = self.year {
            MovieChange::Year(non_null(v, "year")?)
        } else if let Some(v) = self.rating {
            MovieChange::Rating(non_null(v, "rating")?)
        } else if let Some(v) = self.genre_id {
            MovieChange::GenreId(non_null(v, "genre_id")?)
        } else if let Some(v) = self.director_id {
            MovieChange::DirectorId(non_null(v, "director_id")?)
        } else {
            return Ok(None);
        };
        Ok(Some(change))
    }

    pub fn into_full_update(self) -> AppResult<[MovieChange; 7]> {
        Ok([
            MovieChange::Title(required(self.title, "title")?),
            MovieChange::Description(required(self.description, "description")?),
            MovieChange::Trailer(required(self.trailer, "trailer")?),
            MovieChange::Year(required(self.year, "year")?),
            MovieChange::Rating(required(self.rating, "rating")?),
            MovieChange::GenreId(required(self.genre_id, "genre_id")?),
            MovieChange::DirectorId(required(self.director_id, "director_id")?),
        ])
    }
}
