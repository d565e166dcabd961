use crate::application::dto::{
    CategoryListOutput, CategoryOutput, CreateCategoryCommand, CreateCategoryOutput,
    UpdateCategoryCommand, UpdateCategoryOutput,
};
use crate::application::gateways::CategoryGateway;
use crate::domain::{
    AggregateRoot, Category, CategoryId, DomainError, DomainResult, Entity, Notification,
    Pagination, SearchQuery,
};
use tracing::{debug, info, warn};

/// Use case for creating a category.
///
/// Unlike the other aggregates, failures come back as the `Err` side of the
/// result: validation errors, and gateway errors folded into a notification.
pub struct CreateCategory<'a, G: CategoryGateway> {
    gateway: &'a mut G,
}

impl<'a, G: CategoryGateway> CreateCategory<'a, G> {
    pub fn new(gateway: &'a mut G) -> Self {
        Self { gateway }
    }

    pub fn execute(
        &mut self,
        command: CreateCategoryCommand,
    ) -> Result<CreateCategoryOutput, Notification> {
        let category =
            Category::new_category(command.name, command.description, command.is_active);

        let mut notification = Notification::new();
        category.validate(&mut notification);
        if notification.has_error() {
            debug!("Rejected category: {}", notification);
            return Err(notification);
        }

        match self.gateway.create(category) {
            Ok(created) => {
                info!(category_id = %created.id(), "Category created");
                Ok(CreateCategoryOutput::from(&created))
            }
            Err(error) => {
                warn!("Failed to create category: {}", error);
                Err(Notification::from(error))
            }
        }
    }
}

/// Use case for updating a category.
///
/// A missing category is raised as [`DomainError::NotFound`]; everything else
/// follows the same contract as [`CreateCategory`].
pub struct UpdateCategory<'a, G: CategoryGateway> {
    gateway: &'a mut G,
}

impl<'a, G: CategoryGateway> UpdateCategory<'a, G> {
    pub fn new(gateway: &'a mut G) -> Self {
        Self { gateway }
    }

    pub fn execute(
        &mut self,
        command: UpdateCategoryCommand,
    ) -> DomainResult<Result<UpdateCategoryOutput, Notification>> {
        let id = CategoryId::from(command.id);
        let mut category = self
            .gateway
            .find_by_id(&id)?
            .ok_or_else(|| DomainError::not_found("Category", &id))?;

        category.update(command.name, command.description, command.is_active);

        let mut notification = Notification::new();
        category.validate(&mut notification);
        if notification.has_error() {
            debug!(category_id = %id, "Rejected category update: {}", notification);
            return Ok(Err(notification));
        }

        Ok(match self.gateway.update(category) {
            Ok(updated) => Ok(UpdateCategoryOutput::from(&updated)),
            Err(error) => {
                warn!(category_id = %id, "Failed to update category: {}", error);
                Err(Notification::from(error))
            }
        })
    }
}

/// Use case for deleting a category. Deleting an unknown id is a no-op.
pub struct DeleteCategory<'a, G: CategoryGateway> {
    gateway: &'a mut G,
}

impl<'a, G: CategoryGateway> DeleteCategory<'a, G> {
    pub fn new(gateway: &'a mut G) -> Self {
        Self { gateway }
    }

    pub fn execute(&mut self, id: &str) -> DomainResult<()> {
        self.gateway.delete_by_id(&CategoryId::from(id))
    }
}

pub struct GetCategoryById<'a, G: CategoryGateway> {
    gateway: &'a G,
}

impl<'a, G: CategoryGateway> GetCategoryById<'a, G> {
    pub fn new(gateway: &'a G) -> Self {
        Self { gateway }
    }

    pub fn execute(&self, id: &str) -> DomainResult<CategoryOutput> {
        let id = CategoryId::from(id);
        self.gateway
            .find_by_id(&id)?
            .map(|category| CategoryOutput::from(&category))
            .ok_or_else(|| DomainError::not_found("Category", &id))
    }
}

pub struct ListCategories<'a, G: CategoryGateway> {
    gateway: &'a G,
}

impl<'a, G: CategoryGateway> ListCategories<'a, G> {
    pub fn new(gateway: &'a G) -> Self {
        Self { gateway }
    }

    pub fn execute(&self, query: &SearchQuery) -> DomainResult<Pagination<CategoryListOutput>> {
        Ok(self
            .gateway
            .find_all(query)?
            .map(|category| CategoryListOutput::from(&category)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::fakes::FakeCategoryGateway;

    fn movies() -> Category {
        Category::new_category(
            Some("Movies".to_string()),
            Some("The most watched category".to_string()),
            true,
        )
    }

    #[test]
    fn test_create_category() {
        let mut gateway = FakeCategoryGateway::default();

        let output = CreateCategory::new(&mut gateway)
            .execute(CreateCategoryCommand::with(
                Some("Movies"),
                Some("The most watched category"),
                true,
            ))
            .unwrap();

        assert_eq!(gateway.create_calls, 1);
        let stored = &gateway.categories[0];
        assert_eq!(output.id, stored.id().as_str());
        assert_eq!(stored.name(), Some("Movies"));
        assert!(stored.is_active());
        assert!(stored.deleted_at().is_none());
        assert_eq!(stored.created_at(), stored.updated_at());
    }

    #[test]
    fn test_create_inactive_category() {
        let mut gateway = FakeCategoryGateway::default();

        CreateCategory::new(&mut gateway)
            .execute(CreateCategoryCommand::with(Some("Movies"), None, false))
            .unwrap();

        let stored = &gateway.categories[0];
        assert!(!stored.is_active());
        assert!(stored.deleted_at().is_some());
    }

    #[test]
    fn test_create_with_invalid_names_does_not_call_gateway() {
        let long_name = "x".repeat(256);
        let cases = [
            (None, "'name' should not be null"),
            (Some(""), "'name' should not be empty"),
            (Some("ab"), "'name' must be between 3 and 255 characters"),
            (
                Some(long_name.as_str()),
                "'name' must be between 3 and 255 characters",
            ),
        ];

        for (name, expected) in cases {
            let mut gateway = FakeCategoryGateway::default();
            let notification = CreateCategory::new(&mut gateway)
                .execute(CreateCategoryCommand::with(name, None, true))
                .unwrap_err();

            assert_eq!(notification.errors().len(), 1);
            assert_eq!(notification.first_error().unwrap().message(), expected);
            assert_eq!(gateway.create_calls, 0);
        }
    }

    #[test]
    fn test_create_gateway_failure_is_returned_as_notification() {
        let mut gateway = FakeCategoryGateway {
            fail_with: Some(DomainError::Persistence("Gateway error".to_string())),
            ..Default::default()
        };

        let notification = CreateCategory::new(&mut gateway)
            .execute(CreateCategoryCommand::with(Some("Movies"), None, true))
            .unwrap_err();

        assert_eq!(
            notification.first_error().unwrap().message(),
            "Persistence error: Gateway error"
        );
    }

    #[test]
    fn test_update_category() {
        let category = Category::new_category(Some("Film".to_string()), None, true);
        let id = category.id().to_string();
        let created_at = category.created_at();
        let mut gateway = FakeCategoryGateway::with(vec![category]);

        let output = UpdateCategory::new(&mut gateway)
            .execute(UpdateCategoryCommand::with(
                &id,
                Some("Movies"),
                Some("Feature films"),
                false,
            ))
            .unwrap()
            .unwrap();

        assert_eq!(output.id, id);
        assert_eq!(gateway.update_calls, 1);
        let stored = &gateway.categories[0];
        assert_eq!(stored.name(), Some("Movies"));
        assert_eq!(stored.description(), Some("Feature films"));
        assert!(!stored.is_active());
        assert!(stored.deleted_at().is_some());
        assert_eq!(stored.created_at(), created_at);
    }

    #[test]
    fn test_update_with_invalid_name_returns_notification() {
        let category = movies();
        let id = category.id().to_string();
        let mut gateway = FakeCategoryGateway::with(vec![category]);

        let notification = UpdateCategory::new(&mut gateway)
            .execute(UpdateCategoryCommand::with(&id, None, None, true))
            .unwrap()
            .unwrap_err();

        assert_eq!(
            notification.first_error().unwrap().message(),
            "'name' should not be null"
        );
        assert_eq!(gateway.update_calls, 0);
    }

    #[test]
    fn test_update_missing_category_is_not_found() {
        let mut gateway = FakeCategoryGateway::default();

        let error = UpdateCategory::new(&mut gateway)
            .execute(UpdateCategoryCommand::with("123", Some("Movies"), None, true))
            .unwrap_err();

        assert_eq!(error.to_string(), "Category with ID 123 was not found");
    }

    #[test]
    fn test_delete_is_idempotent() {
        let category = movies();
        let id = category.id().to_string();
        let mut gateway = FakeCategoryGateway::with(vec![category]);

        let mut use_case = DeleteCategory::new(&mut gateway);
        use_case.execute(&id).unwrap();
        use_case.execute(&id).unwrap();
        use_case.execute("never-existed").unwrap();

        assert!(gateway.categories.is_empty());
        assert_eq!(gateway.delete_calls, 3);
    }

    #[test]
    fn test_get_category_by_id() {
        let category = movies();
        let id = category.id().to_string();
        let gateway = FakeCategoryGateway::with(vec![category.clone()]);

        let output = GetCategoryById::new(&gateway).execute(&id).unwrap();

        assert_eq!(output, CategoryOutput::from(&category));
    }

    #[test]
    fn test_get_missing_category_is_not_found() {
        let gateway = FakeCategoryGateway::default();

        let error = GetCategoryById::new(&gateway).execute("123").unwrap_err();

        assert!(matches!(error, DomainError::NotFound { .. }));
        assert_eq!(error.to_string(), "Category with ID 123 was not found");
    }

    #[test]
    fn test_list_categories_maps_page() {
        let categories = vec![
            movies(),
            Category::new_category(Some("Series".to_string()), None, true),
        ];
        let gateway = FakeCategoryGateway::with(categories.clone());
        let query = SearchQuery::new(0, 10, "", "name", "asc");

        let page = ListCategories::new(&gateway).execute(&query).unwrap();

        assert_eq!(page.total, 2);
        assert_eq!(page.current_page, 0);
        assert_eq!(page.per_page, 10);
        assert_eq!(page.items[0], CategoryListOutput::from(&categories[0]));
    }

    #[test]
    fn test_list_categories_propagates_gateway_error() {
        let gateway = FakeCategoryGateway {
            fail_with: Some(DomainError::Persistence("Gateway error".to_string())),
            ..Default::default()
        };

        let result = ListCategories::new(&gateway).execute(&SearchQuery::default());

        assert!(matches!(result, Err(DomainError::Persistence(_))));
    }
}
