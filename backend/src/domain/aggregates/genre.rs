use crate::domain::base::{now, AggregateRoot, DomainError, DomainResult, Entity};
use crate::domain::validation::{check_text_field, Notification};
use crate::domain::value_objects::{Activation, CategoryId, GenreId};
use chrono::{DateTime, Utc};

pub const NAME_MIN_LENGTH: usize = 3;
pub const NAME_MAX_LENGTH: usize = 255;

/// A Genre classifies videos and references the categories it belongs to
#[derive(Debug, Clone, PartialEq)]
pub struct Genre {
    id: GenreId,
    name: Option<String>,
    activation: Activation,
    categories: Vec<CategoryId>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Genre {
    /// Create a genre with no categories, failing when it is invalid
    pub fn new_genre(name: Option<String>, is_active: bool) -> DomainResult<Self> {
        let now = now();
        let genre = Genre {
            id: GenreId::unique(),
            name,
            activation: Activation::new(is_active, now),
            categories: Vec::new(),
            created_at: now,
            updated_at: now,
        };
        genre.self_validate("Failed to create a Aggregate Genre")?;
        Ok(genre)
    }

    /// Rebuild a stored genre
    pub fn with(
        id: GenreId,
        name: Option<String>,
        is_active: bool,
        categories: Vec<CategoryId>,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
        deleted_at: Option<DateTime<Utc>>,
    ) -> DomainResult<Self> {
        let mut genre = Genre {
            id,
            name,
            activation: Activation::restore(is_active, deleted_at)?,
            categories: Vec::new(),
            created_at,
            updated_at,
        };
        genre.push_categories(categories);
        Ok(genre)
    }

    /// Replace name, state and the whole category set, then re-validate
    pub fn update(
        &mut self,
        name: Option<String>,
        is_active: bool,
        categories: Vec<CategoryId>,
    ) -> DomainResult<&mut Self> {
        if is_active {
            self.activate();
        } else {
            self.deactivate();
        }
        self.name = name;
        self.categories.clear();
        self.push_categories(categories);
        self.updated_at = now();
        self.self_validate("Failed to update a Aggregate Genre")?;
        Ok(self)
    }

    pub fn activate(&mut self) -> &mut Self {
        self.activation = self.activation.activate();
        self.updated_at = now();
        self
    }

    pub fn deactivate(&mut self) -> &mut Self {
        let now = now();
        self.activation = self.activation.deactivate(now);
        self.updated_at = now;
        self
    }

    pub fn add_category(&mut self, category_id: CategoryId) -> &mut Self {
        if self.push_category(category_id) {
            self.updated_at = now();
        }
        self
    }

    pub fn add_categories(&mut self, category_ids: Vec<CategoryId>) -> &mut Self {
        if self.push_categories(category_ids) {
            self.updated_at = now();
        }
        self
    }

    pub fn remove_category(&mut self, category_id: &CategoryId) -> &mut Self {
        let before = self.categories.len();
        self.categories.retain(|id| id != category_id);
        if self.categories.len() != before {
            self.updated_at = now();
        }
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn is_active(&self) -> bool {
        self.activation.is_active()
    }

    pub fn categories(&self) -> &[CategoryId] {
        &self.categories
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn deleted_at(&self) -> Option<DateTime<Utc>> {
        self.activation.deleted_at()
    }

    fn push_category(&mut self, category_id: CategoryId) -> bool {
        if self.categories.contains(&category_id) {
            return false;
        }
        self.categories.push(category_id);
        true
    }

    fn push_categories(&mut self, category_ids: Vec<CategoryId>) -> bool {
        let mut changed = false;
        for category_id in category_ids {
            changed |= self.push_category(category_id);
        }
        changed
    }

    fn self_validate(&self, message: &str) -> DomainResult<()> {
        let mut notification = Notification::new();
        self.validate(&mut notification);
        if notification.has_error() {
            return Err(DomainError::validation(message, notification));
        }
        Ok(())
    }
}

impl Entity for Genre {
    type Id = GenreId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl AggregateRoot for Genre {
    fn validate(&self, handler: &mut Notification) {
        check_text_field(
            "name",
            self.name(),
            NAME_MIN_LENGTH,
            NAME_MAX_LENGTH,
            handler,
        );
    }
}
