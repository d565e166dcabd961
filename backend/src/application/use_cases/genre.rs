use super::validate_associations;
use crate::application::dto::{
    CreateGenreCommand, CreateGenreOutput, GenreListOutput, GenreOutput, UpdateGenreCommand,
    UpdateGenreOutput,
};
use crate::application::gateways::{CategoryGateway, GenreGateway};
use crate::domain::{
    CategoryId, DomainError, DomainResult, Entity, Genre, GenreId, Pagination, SearchQuery,
};
use tracing::{debug, info};

fn to_category_ids(ids: Vec<String>) -> Vec<CategoryId> {
    ids.into_iter().map(CategoryId::from).collect()
}

/// Use case for creating a genre together with its category links.
///
/// Missing categories and invalid fields are reported together in one
/// [`DomainError::Validation`].
pub struct CreateGenre<'a, G: GenreGateway, C: CategoryGateway> {
    genre_gateway: &'a mut G,
    category_gateway: &'a C,
}

impl<'a, G: GenreGateway, C: CategoryGateway> CreateGenre<'a, G, C> {
    pub fn new(genre_gateway: &'a mut G, category_gateway: &'a C) -> Self {
        Self {
            genre_gateway,
            category_gateway,
        }
    }

    pub fn execute(&mut self, command: CreateGenreCommand) -> DomainResult<CreateGenreOutput> {
        let categories = to_category_ids(command.categories);

        let mut notification = validate_associations("categories", &categories, |ids| {
            self.category_gateway.exists_by_ids(ids)
        })?;
        let genre = notification.validate(|| Genre::new_genre(command.name, command.is_active));

        let mut genre = match genre {
            Some(genre) if !notification.has_error() => genre,
            _ => {
                debug!("Rejected genre: {}", notification);
                return Err(DomainError::validation(
                    "Could not create Aggregate Genre",
                    notification,
                ));
            }
        };
        genre.add_categories(categories);

        let created = self.genre_gateway.create(genre)?;
        info!(genre_id = %created.id(), "Genre created");
        Ok(CreateGenreOutput::from(&created))
    }
}

/// Use case for updating a genre. The command's categories replace the
/// existing set.
pub struct UpdateGenre<'a, G: GenreGateway, C: CategoryGateway> {
    genre_gateway: &'a mut G,
    category_gateway: &'a C,
}

impl<'a, G: GenreGateway, C: CategoryGateway> UpdateGenre<'a, G, C> {
    pub fn new(genre_gateway: &'a mut G, category_gateway: &'a C) -> Self {
        Self {
            genre_gateway,
            category_gateway,
        }
    }

    pub fn execute(&mut self, command: UpdateGenreCommand) -> DomainResult<UpdateGenreOutput> {
        let id = GenreId::from(command.id);
        let mut genre = self
            .genre_gateway
            .find_by_id(&id)?
            .ok_or_else(|| DomainError::not_found("Genre", &id))?;

        let categories = to_category_ids(command.categories);
        let mut notification = validate_associations("categories", &categories, |ids| {
            self.category_gateway.exists_by_ids(ids)
        })?;
        notification.validate(|| {
            genre
                .update(command.name, command.is_active, categories)
                .map(|_| ())
        });

        if notification.has_error() {
            debug!(genre_id = %id, "Rejected genre update: {}", notification);
            return Err(DomainError::validation(
                format!("Could not update Aggregate Genre {}", id),
                notification,
            ));
        }

        let updated = self.genre_gateway.update(genre)?;
        Ok(UpdateGenreOutput::from(&updated))
    }
}

/// Use case for deleting a genre. Deleting an unknown id is a no-op.
pub struct DeleteGenre<'a, G: GenreGateway> {
    gateway: &'a mut G,
}

impl<'a, G: GenreGateway> DeleteGenre<'a, G> {
    pub fn new(gateway: &'a mut G) -> Self {
        Self { gateway }
    }

    pub fn execute(&mut self, id: &str) -> DomainResult<()> {
        self.gateway.delete_by_id(&GenreId::from(id))
    }
}

pub struct GetGenreById<'a, G: GenreGateway> {
    gateway: &'a G,
}

impl<'a, G: GenreGateway> GetGenreById<'a, G> {
    pub fn new(gateway: &'a G) -> Self {
        Self { gateway }
    }

    pub fn execute(&self, id: &str) -> DomainResult<GenreOutput> {
        let id = GenreId::from(id);
        self.gateway
            .find_by_id(&id)?
            .map(|genre| GenreOutput::from(&genre))
            .ok_or_else(|| DomainError::not_found("Genre", &id))
    }
}

pub struct ListGenres<'a, G: GenreGateway> {
    gateway: &'a G,
}

impl<'a, G: GenreGateway> ListGenres<'a, G> {
    pub fn new(gateway: &'a G) -> Self {
        Self { gateway }
    }

    pub fn execute(&self, query: &SearchQuery) -> DomainResult<Pagination<GenreListOutput>> {
        Ok(self
            .gateway
            .find_all(query)?
            .map(|genre| GenreListOutput::from(&genre)))
    }
}
