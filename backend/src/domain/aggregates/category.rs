use crate::domain::base::{now, AggregateRoot, DomainResult, Entity};
use crate::domain::validation::{check_text_field, Notification};
use crate::domain::value_objects::{Activation, CategoryId};
use chrono::{DateTime, Utc};

pub const NAME_MIN_LENGTH: usize = 3;
pub const NAME_MAX_LENGTH: usize = 255;

/// A Category groups videos and genres; it can be deactivated (soft delete)
#[derive(Debug, Clone, PartialEq)]
pub struct Category {
    id: CategoryId,
    name: Option<String>,
    description: Option<String>,
    activation: Activation,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Category {
    /// Create a brand new category. Validation is left to the caller.
    pub fn new_category(
        name: Option<String>,
        description: Option<String>,
        is_active: bool,
    ) -> Self {
        let now = now();
        Category {
            id: CategoryId::unique(),
            name,
            description,
            activation: Activation::new(is_active, now),
            created_at: now,
            updated_at: now,
        }
    }

    /// Rebuild a stored category
    pub fn with(
        id: CategoryId,
        name: Option<String>,
        description: Option<String>,
        is_active: bool,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
        deleted_at: Option<DateTime<Utc>>,
    ) -> DomainResult<Self> {
        Ok(Category {
            id,
            name,
            description,
            activation: Activation::restore(is_active, deleted_at)?,
            created_at,
            updated_at,
        })
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

    pub fn update(
        &mut self,
        name: Option<String>,
        description: Option<String>,
        is_active: bool,
    ) -> &mut Self {
        if is_active {
            self.activate();
        } else {
            self.deactivate();
        }
        self.name = name;
        self.description = description;
        self.updated_at = now();
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn is_active(&self) -> bool {
        self.activation.is_active()
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
}

impl Entity for Category {
    type Id = CategoryId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl AggregateRoot for Category {
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
