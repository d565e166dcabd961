use crate::domain::{base::Entity, Category, CategoryId};
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateCategoryCommand {
    pub name: Option<String>,
    pub description: Option<String>,
    pub is_active: bool,
}

impl CreateCategoryCommand {
    pub fn with(name: Option<&str>, description: Option<&str>, is_active: bool) -> Self {
        CreateCategoryCommand {
            name: name.map(str::to_string),
            description: description.map(str::to_string),
            is_active,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateCategoryOutput {
    pub id: String,
}

impl From<&Category> for CreateCategoryOutput {
    fn from(category: &Category) -> Self {
        CreateCategoryOutput {
            id: category.id().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateCategoryCommand {
    pub id: String,
    pub name: Option<String>,
    pub description: Option<String>,
    pub is_active: bool,
}

impl UpdateCategoryCommand {
    pub fn with(id: &str, name: Option<&str>, description: Option<&str>, is_active: bool) -> Self {
        UpdateCategoryCommand {
            id: id.to_string(),
            name: name.map(str::to_string),
            description: description.map(str::to_string),
            is_active,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpdateCategoryOutput {
    pub id: String,
}

impl From<&Category> for UpdateCategoryOutput {
    fn from(category: &Category) -> Self {
        UpdateCategoryOutput {
            id: category.id().to_string(),
        }
    }
}

/// Full projection of a category
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryOutput {
    pub id: CategoryId,
    pub name: Option<String>,
    pub description: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl From<&Category> for CategoryOutput {
    fn from(category: &Category) -> Self {
        CategoryOutput {
            id: category.id().clone(),
            name: category.name().map(str::to_string),
            description: category.description().map(str::to_string),
            is_active: category.is_active(),
            created_at: category.created_at(),
            updated_at: category.updated_at(),
            deleted_at: category.deleted_at(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryListOutput {
    pub id: String,
    pub name: Option<String>,
    pub description: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl From<&Category> for CategoryListOutput {
    fn from(category: &Category) -> Self {
        CategoryListOutput {
            id: category.id().to_string(),
            name: category.name().map(str::to_string),
            description: category.description().map(str::to_string),
            is_active: category.is_active(),
            created_at: category.created_at(),
            deleted_at: category.deleted_at(),
        }
    }
}
