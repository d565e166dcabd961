use super::database::{existing_ids, like_pattern, sort_column, SqliteDatabase};
use crate::application::gateways::GenreGateway;
use crate::domain::{CategoryId, DomainResult, Entity, Genre, GenreId, Pagination, SearchQuery};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Result as SqliteResult, Row};

const SORT_COLUMNS: [(&str, &str); 3] = [
    ("name", "name"),
    ("createdAt", "created_at"),
    ("updatedAt", "updated_at"),
];

/// Raw `genres` row plus its category links
struct GenreRecord {
    id: String,
    name: Option<String>,
    active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    deleted_at: Option<DateTime<Utc>>,
    categories: Vec<String>,
}

impl GenreRecord {
    const COLUMNS: &'static str = "id, name, active, created_at, updated_at, deleted_at";

    fn from_row(row: &Row) -> SqliteResult<Self> {
        Ok(GenreRecord {
            id: row.get(0)?,
            name: row.get(1)?,
            active: row.get(2)?,
            created_at: row.get(3)?,
            updated_at: row.get(4)?,
            deleted_at: row.get(5)?,
            categories: Vec::new(),
        })
    }

    fn load_categories(mut self, conn: &Connection) -> SqliteResult<Self> {
        let mut stmt = conn.prepare(
            "SELECT category_id FROM genres_categories WHERE genre_id = ?1 ORDER BY position",
        )?;
        self.categories = stmt
            .query_map(params![self.id], |row| row.get(0))?
            .collect::<SqliteResult<Vec<String>>>()?;
        Ok(self)
    }

    fn into_genre(self) -> DomainResult<Genre> {
        Genre::with(
            GenreId::from(self.id),
            self.name,
            self.active,
            self.categories.into_iter().map(CategoryId::from).collect(),
            self.created_at,
            self.updated_at,
            self.deleted_at,
        )
    }
}

/// SQLite-based implementation of the GenreGateway trait
#[derive(Clone)]
pub struct SqliteGenreGateway {
    db: SqliteDatabase,
}

impl SqliteGenreGateway {
    pub fn new(db: SqliteDatabase) -> Self {
        SqliteGenreGateway { db }
    }

    /// Save the genre row and replace its category links in a single transaction
    fn save(&self, genre: &Genre) -> DomainResult<()> {
        self.db.with_connection(|conn| {
            let tx = conn.transaction()?;

            tx.execute(
                "INSERT INTO genres (id, name, active, created_at, updated_at, deleted_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                 ON CONFLICT(id) DO UPDATE SET
                    name = excluded.name,
                    active = excluded.active,
                    updated_at = excluded.updated_at,
                    deleted_at = excluded.deleted_at",
                params![
                    genre.id().as_str(),
                    genre.name(),
                    genre.is_active(),
                    genre.created_at(),
                    genre.updated_at(),
                    genre.deleted_at(),
                ],
            )?;

            tx.execute(
                "DELETE FROM genres_categories WHERE genre_id = ?1",
                params![genre.id().as_str()],
            )?;

            for (position, category_id) in genre.categories().iter().enumerate() {
                tx.execute(
                    "INSERT INTO genres_categories (genre_id, category_id, position)
                     VALUES (?1, ?2, ?3)",
                    params![genre.id().as_str(), category_id.as_str(), position as i64],
                )?;
            }

            tx.commit()
        })
    }
}

impl GenreGateway for SqliteGenreGateway {
    fn create(&mut self, genre: Genre) -> DomainResult<Genre> {
        self.save(&genre)?;
        tracing::debug!(genre_id = %genre.id(), "Inserted genre");
        Ok(genre)
    }

    fn update(&mut self, genre: Genre) -> DomainResult<Genre> {
        self.save(&genre)?;
        Ok(genre)
    }

    fn delete_by_id(&mut self, id: &GenreId) -> DomainResult<()> {
        self.db.with_connection(|conn| {
            conn.execute("DELETE FROM genres WHERE id = ?1", params![id.as_str()])
        })?;
        Ok(())
    }

    fn find_by_id(&self, id: &GenreId) -> DomainResult<Option<Genre>> {
        let record = self.db.with_connection(|conn| {
            conn.query_row(
                &format!("SELECT {} FROM genres WHERE id = ?1", GenreRecord::COLUMNS),
                params![id.as_str()],
                GenreRecord::from_row,
            )
            .optional()?
            .map(|record| record.load_categories(conn))
            .transpose()
        })?;

        record.map(GenreRecord::into_genre).transpose()
    }

    fn find_all(&self, query: &SearchQuery) -> DomainResult<Pagination<Genre>> {
        let pattern = like_pattern(&query.terms);
        let filter = "WHERE ?1 = '%%' OR name LIKE ?1";
        let sql = format!(
            "SELECT {} FROM genres {} ORDER BY {} {}, id ASC LIMIT ?2 OFFSET ?3",
            GenreRecord::COLUMNS,
            filter,
            sort_column(query, &SORT_COLUMNS),
            query.direction.as_sql()
        );

        let (total, records) = self.db.with_connection(|conn| {
            let total: i64 = conn.query_row(
                &format!("SELECT COUNT(*) FROM genres {}", filter),
                params![pattern],
                |row| row.get(0),
            )?;
            let mut stmt = conn.prepare(&sql)?;
            let records = stmt
                .query_map(
                    params![pattern, query.per_page as i64, query.offset() as i64],
                    GenreRecord::from_row,
                )?
                .collect::<SqliteResult<Vec<_>>>()?;
            let records = records
                .into_iter()
                .map(|record| record.load_categories(conn))
                .collect::<SqliteResult<Vec<_>>>()?;
            Ok((total, records))
        })?;

        let items = records
            .into_iter()
            .map(GenreRecord::into_genre)
            .collect::<DomainResult<Vec<_>>>()?;
        Ok(Pagination::new(
            query.page,
            query.per_page,
            total as u64,
            items,
        ))
    }

    fn exists_by_ids(&self, ids: &[GenreId]) -> DomainResult<Vec<GenreId>> {
        let ids: Vec<&str> = ids.iter().map(GenreId::as_str).collect();
        let found = self
            .db
            .with_connection(|conn| existing_ids(conn, "genres", &ids))?;
        Ok(found.into_iter().map(GenreId::from).collect())
    }
}
