use super::database::{existing_ids, like_pattern, sort_column, SqliteDatabase};
use crate::application::gateways::CategoryGateway;
use crate::domain::{Category, CategoryId, DomainResult, Entity, Pagination, SearchQuery};
use chrono::{DateTime, Utc};
use rusqlite::{params, OptionalExtension, Result as SqliteResult, Row};

const SORT_COLUMNS: [(&str, &str); 4] = [
    ("name", "name"),
    ("description", "description"),
    ("createdAt", "created_at"),
    ("updatedAt", "updated_at"),
];

/// Raw `categories` row
struct CategoryRecord {
    id: String,
    name: Option<String>,
    description: Option<String>,
    active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    deleted_at: Option<DateTime<Utc>>,
}

impl CategoryRecord {
    const COLUMNS: &'static str =
        "id, name, description, active, created_at, updated_at, deleted_at";

    fn from_row(row: &Row) -> SqliteResult<Self> {
        Ok(CategoryRecord {
            id: row.get(0)?,
            name: row.get(1)?,
            description: row.get(2)?,
            active: row.get(3)?,
            created_at: row.get(4)?,
            updated_at: row.get(5)?,
            deleted_at: row.get(6)?,
        })
    }

    fn into_category(self) -> DomainResult<Category> {
        Category::with(
            CategoryId::from(self.id),
            self.name,
            self.description,
            self.active,
            self.created_at,
            self.updated_at,
            self.deleted_at,
        )
    }
}

/// SQLite-based implementation of the CategoryGateway trait
#[derive(Clone)]
pub struct SqliteCategoryGateway {
    db: SqliteDatabase,
}

impl SqliteCategoryGateway {
    pub fn new(db: SqliteDatabase) -> Self {
        SqliteCategoryGateway { db }
    }

    fn save(&self, category: &Category) -> DomainResult<()> {
        self.db.with_connection(|conn| {
            conn.execute(
                "INSERT INTO categories (id, name, description, active, created_at, updated_at, deleted_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
                 ON CONFLICT(id) DO UPDATE SET
                    name = excluded.name,
                    description = excluded.description,
                    active = excluded.active,
                    updated_at = excluded.updated_at,
                    deleted_at = excluded.deleted_at",
                params![
                    category.id().as_str(),
                    category.name(),
                    category.description(),
                    category.is_active(),
                    category.created_at(),
                    category.updated_at(),
                    category.deleted_at(),
                ],
            )?;
            Ok(())
        })
    }
}

impl CategoryGateway for SqliteCategoryGateway {
    fn create(&mut self, category: Category) -> DomainResult<Category> {
        self.save(&category)?;
        tracing::debug!(category_id = %category.id(), "Inserted category");
        Ok(category)
    }

    fn update(&mut self, category: Category) -> DomainResult<Category> {
        self.save(&category)?;
        Ok(category)
    }

    fn delete_by_id(&mut self, id: &CategoryId) -> DomainResult<()> {
        let rows = self.db.with_connection(|conn| {
            conn.execute("DELETE FROM categories WHERE id = ?1", params![id.as_str()])
        })?;
        if rows > 0 {
            tracing::debug!(category_id = %id, "Deleted category");
        }
        Ok(())
    }

    fn find_by_id(&self, id: &CategoryId) -> DomainResult<Option<Category>> {
        let record = self.db.with_connection(|conn| {
            conn.query_row(
                &format!(
                    "SELECT {} FROM categories WHERE id = ?1",
                    CategoryRecord::COLUMNS
                ),
                params![id.as_str()],
                CategoryRecord::from_row,
            )
            .optional()
        })?;

        record.map(CategoryRecord::into_category).transpose()
    }

    fn find_all(&self, query: &SearchQuery) -> DomainResult<Pagination<Category>> {
        let pattern = like_pattern(&query.terms);
        let filter = "WHERE ?1 = '%%' OR name LIKE ?1 OR description LIKE ?1";
        let sql = format!(
            "SELECT {} FROM categories {} ORDER BY {} {}, id ASC LIMIT ?2 OFFSET ?3",
            CategoryRecord::COLUMNS,
            filter,
            sort_column(query, &SORT_COLUMNS),
            query.direction.as_sql()
        );

        let (total, records) = self.db.with_connection(|conn| {
            let total: i64 = conn.query_row(
                &format!("SELECT COUNT(*) FROM categories {}", filter),
                params![pattern],
                |row| row.get(0),
            )?;
            let mut stmt = conn.prepare(&sql)?;
            let records = stmt
                .query_map(
                    params![pattern, query.per_page as i64, query.offset() as i64],
                    CategoryRecord::from_row,
                )?
                .collect::<SqliteResult<Vec<_>>>()?;
            Ok((total, records))
        })?;

        let items = records
            .into_iter()
            .map(CategoryRecord::into_category)
            .collect::<DomainResult<Vec<_>>>()?;
        Ok(Pagination::new(
            query.page,
            query.per_page,
            total as u64,
            items,
        ))
    }

    fn exists_by_ids(&self, ids: &[CategoryId]) -> DomainResult<Vec<CategoryId>> {
        let ids: Vec<&str> = ids.iter().map(CategoryId::as_str).collect();
        let found = self
            .db
            .with_connection(|conn| existing_ids(conn, "categories", &ids))?;
        Ok(found.into_iter().map(CategoryId::from).collect())
    }
}
