use crate::domain::{base::Entity, Genre};
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateGenreCommand {
    pub name: Option<String>,
    pub is_active: bool,
    pub categories: Vec<String>,
}

impl CreateGenreCommand {
    pub fn with(name: Option<&str>, is_active: bool, categories: &[&str]) -> Self {
        CreateGenreCommand {
            name: name.map(str::to_string),
            is_active,
            categories: categories.iter().map(|id| id.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateGenreOutput {
    pub id: String,
}

impl From<&Genre> for CreateGenreOutput {
    fn from(genre: &Genre) -> Self {
        CreateGenreOutput {
            id: genre.id().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateGenreCommand {
    pub id: String,
    pub name: Option<String>,
    pub is_active: bool,
    pub categories: Vec<String>,
}

impl UpdateGenreCommand {
    pub fn with(id: &str, name: Option<&str>, is_active: bool, categories: &[&str]) -> Self {
        UpdateGenreCommand {
            id: id.to_string(),
            name: name.map(str::to_string),
            is_active,
            categories: categories.iter().map(|id| id.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpdateGenreOutput {
    pub id: String,
}

impl From<&Genre> for UpdateGenreOutput {
    fn from(genre: &Genre) -> Self {
        UpdateGenreOutput {
            id: genre.id().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenreOutput {
    pub id: String,
    pub name: Option<String>,
    pub is_active: bool,
    pub categories: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl From<&Genre> for GenreOutput {
    fn from(genre: &Genre) -> Self {
        GenreOutput {
            id: genre.id().to_string(),
            name: genre.name().map(str::to_string),
            is_active: genre.is_active(),
            categories: genre.categories().iter().map(|id| id.to_string()).collect(),
            created_at: genre.created_at(),
            updated_at: genre.updated_at(),
            deleted_at: genre.deleted_at(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenreListOutput {
    pub id: String,
    pub name: Option<String>,
    pub is_active: bool,
    pub categories: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl From<&Genre> for GenreListOutput {
    fn from(genre: &Genre) -> Self {
        GenreListOutput {
            id: genre.id().to_string(),
            name: genre.name().map(str::to_string),
            is_active: genre.is_active(),
            categories: genre.categories().iter().map(|id| id.to_string()).collect(),
            created_at: genre.created_at(),
            deleted_at: genre.deleted_at(),
        }
    }
}
