use super::database::{existing_ids, like_pattern, sort_column, SqliteDatabase};
use crate::application::gateways::CastMemberGateway;
use crate::domain::{
    CastMember, CastMemberId, CastMemberType, DomainResult, Entity, Pagination, SearchQuery,
};
use chrono::{DateTime, Utc};
use rusqlite::{params, OptionalExtension, Result as SqliteResult, Row};

const SORT_COLUMNS: [(&str, &str); 4] = [
    ("name", "name"),
    ("type", "type"),
    ("createdAt", "created_at"),
    ("updatedAt", "updated_at"),
];

/// Raw `cast_members` row
struct CastMemberRecord {
    id: String,
    name: Option<String>,
    member_type: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl CastMemberRecord {
    const COLUMNS: &'static str = "id, name, type, created_at, updated_at";

    fn from_row(row: &Row) -> SqliteResult<Self> {
        Ok(CastMemberRecord {
            id: row.get(0)?,
            name: row.get(1)?,
            member_type: row.get(2)?,
            created_at: row.get(3)?,
            updated_at: row.get(4)?,
        })
    }

    fn into_member(self) -> CastMember {
        CastMember::with(
            CastMemberId::from(self.id),
            self.name,
            self.member_type.as_deref().and_then(CastMemberType::of),
            self.created_at,
            self.updated_at,
        )
    }
}

/// SQLite-based implementation of the CastMemberGateway trait
#[derive(Clone)]
pub struct SqliteCastMemberGateway {
    db: SqliteDatabase,
}

impl SqliteCastMemberGateway {
    pub fn new(db: SqliteDatabase) -> Self {
        SqliteCastMemberGateway { db }
    }

    fn save(&self, member: &CastMember) -> DomainResult<()> {
        self.db.with_connection(|conn| {
            conn.execute(
                "INSERT INTO cast_members (id, name, type, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)
                 ON CONFLICT(id) DO UPDATE SET
                    name = excluded.name,
                    type = excluded.type,
                    updated_at = excluded.updated_at",
                params![
                    member.id().as_str(),
                    member.name(),
                    member.member_type().map(|t| t.as_str()),
                    member.created_at(),
                    member.updated_at(),
                ],
            )?;
            Ok(())
        })
    }
}

impl CastMemberGateway for SqliteCastMemberGateway {
    fn create(&mut self, member: CastMember) -> DomainResult<CastMember> {
        self.save(&member)?;
        tracing::debug!(cast_member_id = %member.id(), "Inserted cast member");
        Ok(member)
    }

    fn update(&mut self, member: CastMember) -> DomainResult<CastMember> {
        self.save(&member)?;
        Ok(member)
    }

    fn delete_by_id(&mut self, id: &CastMemberId) -> DomainResult<()> {
        self.db.with_connection(|conn| {
            conn.execute("DELETE FROM cast_members WHERE id = ?1", params![id.as_str()])
        })?;
        Ok(())
    }

    fn find_by_id(&self, id: &CastMemberId) -> DomainResult<Option<CastMember>> {
        let record = self.db.with_connection(|conn| {
            conn.query_row(
                &format!(
                    "SELECT {} FROM cast_members WHERE id = ?1",
                    CastMemberRecord::COLUMNS
                ),
                params![id.as_str()],
                CastMemberRecord::from_row,
            )
            .optional()
        })?;

        Ok(record.map(CastMemberRecord::into_member))
    }

    fn find_all(&self, query: &SearchQuery) -> DomainResult<Pagination<CastMember>> {
        let pattern = like_pattern(&query.terms);
        let filter = "WHERE ?1 = '%%' OR name LIKE ?1";
        let sql = format!(
            "SELECT {} FROM cast_members {} ORDER BY {} {}, id ASC LIMIT ?2 OFFSET ?3",
            CastMemberRecord::COLUMNS,
            filter,
            sort_column(query, &SORT_COLUMNS),
            query.direction.as_sql()
        );

        let (total, records) = self.db.with_connection(|conn| {
            let total: i64 = conn.query_row(
                &format!("SELECT COUNT(*) FROM cast_members {}", filter),
                params![pattern],
                |row| row.get(0),
            )?;
            let mut stmt = conn.prepare(&sql)?;
            let records = stmt
                .query_map(
                    params![pattern, query.per_page as i64, query.offset() as i64],
                    CastMemberRecord::from_row,
                )?
                .collect::<SqliteResult<Vec<_>>>()?;
            Ok((total, records))
        })?;

        Ok(Pagination::new(
            query.page,
            query.per_page,
            total as u64,
            records
                .into_iter()
                .map(CastMemberRecord::into_member)
                .collect(),
        ))
    }

    fn exists_by_ids(&self, ids: &[CastMemberId]) -> DomainResult<Vec<CastMemberId>> {
        let ids: Vec<&str> = ids.iter().map(CastMemberId::as_str).collect();
        let found = self
            .db
            .with_connection(|conn| existing_ids(conn, "cast_members", &ids))?;
        Ok(found.into_iter().map(CastMemberId::from).collect())
    }
}
