use super::database::{like_pattern, placeholders, sort_column, SqliteDatabase};
use crate::application::gateways::VideoGateway;
use crate::domain::{
    AudioVideoMedia, CastMemberId, CategoryId, DomainError, DomainResult, Entity, GenreId,
    ImageMedia, MediaId, MediaStatus, Pagination, Rating, Video, VideoDetails, VideoId,
    VideoMediaType, VideoMedias, VideoRelations, VideoSearchQuery,
};
use chrono::{DateTime, Utc};
use rusqlite::types::Value;
use rusqlite::{
    params, params_from_iter, Connection, OptionalExtension, Result as SqliteResult, Row,
    Transaction,
};

const SORT_COLUMNS: [(&str, &str); 5] = [
    ("title", "title"),
    ("createdAt", "created_at"),
    ("updatedAt", "updated_at"),
    ("launchedAt", "year_launched"),
    ("duration", "duration"),
];

/// Join tables holding the video's associations: (table, id column)
const CATEGORY_LINKS: (&str, &str) = ("videos_categories", "category_id");
const GENRE_LINKS: (&str, &str) = ("videos_genres", "genre_id");
const CAST_MEMBER_LINKS: (&str, &str) = ("videos_cast_members", "cast_member_id");

/// Raw `video_media` row
struct MediaRecord {
    media_type: String,
    id: String,
    checksum: String,
    name: String,
    location: String,
    encoded_location: Option<String>,
    status: Option<String>,
}

impl MediaRecord {
    fn from_row(row: &Row) -> SqliteResult<Self> {
        Ok(MediaRecord {
            media_type: row.get(0)?,
            id: row.get(1)?,
            checksum: row.get(2)?,
            name: row.get(3)?,
            location: row.get(4)?,
            encoded_location: row.get(5)?,
            status: row.get(6)?,
        })
    }

    fn into_audio_video(self) -> DomainResult<AudioVideoMedia> {
        let status = self
            .status
            .as_deref()
            .and_then(MediaStatus::of)
            .ok_or_else(|| {
                DomainError::InvalidValue(format!(
                    "media {} has an unknown status {:?}",
                    self.id, self.status
                ))
            })?;
        AudioVideoMedia::with(
            MediaId::from(self.id),
            self.checksum,
            self.name,
            self.location,
            self.encoded_location,
            status,
        )
    }

    fn into_image(self) -> ImageMedia {
        ImageMedia::with(
            MediaId::from(self.id),
            self.checksum,
            self.name,
            self.location,
        )
    }
}

/// Raw `videos` row plus its links and media rows
struct VideoRecord {
    id: String,
    title: Option<String>,
    description: Option<String>,
    year_launched: Option<i32>,
    duration: f64,
    opened: bool,
    published: bool,
    rating: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    categories: Vec<String>,
    genres: Vec<String>,
    cast_members: Vec<String>,
    medias: Vec<MediaRecord>,
}

impl VideoRecord {
    const COLUMNS: &'static str = "id, title, description, year_launched, duration, opened, \
                                   published, rating, created_at, updated_at";

    fn from_row(row: &Row) -> SqliteResult<Self> {
        Ok(VideoRecord {
            id: row.get(0)?,
            title: row.get(1)?,
            description: row.get(2)?,
            year_launched: row.get(3)?,
            duration: row.get(4)?,
            opened: row.get(5)?,
            published: row.get(6)?,
            rating: row.get(7)?,
            created_at: row.get(8)?,
            updated_at: row.get(9)?,
            categories: Vec::new(),
            genres: Vec::new(),
            cast_members: Vec::new(),
            medias: Vec::new(),
        })
    }

    fn load_relations(mut self, conn: &Connection) -> SqliteResult<Self> {
        self.categories = linked_ids(conn, CATEGORY_LINKS, &self.id)?;
        self.genres = linked_ids(conn, GENRE_LINKS, &self.id)?;
        self.cast_members = linked_ids(conn, CAST_MEMBER_LINKS, &self.id)?;

        let mut stmt = conn.prepare(
            "SELECT media_type, id, checksum, name, location, encoded_location, status
             FROM video_media WHERE video_id = ?1",
        )?;
        self.medias = stmt
            .query_map(params![self.id], MediaRecord::from_row)?
            .collect::<SqliteResult<Vec<_>>>()?;
        Ok(self)
    }

    fn into_video(self) -> DomainResult<Video> {
        let mut medias = VideoMedias::default();
        for media in self.medias {
            match VideoMediaType::of(&media.media_type) {
                Some(VideoMediaType::Video) => medias.video = Some(media.into_audio_video()?),
                Some(VideoMediaType::Trailer) => medias.trailer = Some(media.into_audio_video()?),
                Some(VideoMediaType::Banner) => medias.banner = Some(media.into_image()),
                Some(VideoMediaType::Thumbnail) => medias.thumbnail = Some(media.into_image()),
                Some(VideoMediaType::ThumbnailHalf) => {
                    medias.thumbnail_half = Some(media.into_image())
                }
                None => {
                    return Err(DomainError::InvalidValue(format!(
                        "video {} has media of unknown type {}",
                        self.id, media.media_type
                    )))
                }
            }
        }

        let details = VideoDetails {
            title: self.title,
            description: self.description,
            launched_at: self.year_launched,
            duration: self.duration,
            opened: self.opened,
            published: self.published,
            rating: self.rating.as_deref().and_then(Rating::of),
        };
        let relations = VideoRelations {
            categories: self.categories.into_iter().map(CategoryId::from).collect(),
            genres: self.genres.into_iter().map(GenreId::from).collect(),
            cast_members: self
                .cast_members
                .into_iter()
                .map(CastMemberId::from)
                .collect(),
        };

        Ok(Video::with(
            VideoId::from(self.id),
            details,
            relations,
            medias,
            self.created_at,
            self.updated_at,
        ))
    }
}

fn linked_ids(
    conn: &Connection,
    (table, column): (&str, &str),
    video_id: &str,
) -> SqliteResult<Vec<String>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {column} FROM {table} WHERE video_id = ?1 ORDER BY position"
    ))?;
    let ids = stmt
        .query_map(params![video_id], |row| row.get(0))?
        .collect::<SqliteResult<Vec<String>>>()?;
    Ok(ids)
}

fn replace_links(
    tx: &Transaction,
    (table, column): (&str, &str),
    video_id: &str,
    ids: &[&str],
) -> SqliteResult<()> {
    tx.execute(
        &format!("DELETE FROM {table} WHERE video_id = ?1"),
        params![video_id],
    )?;
    let mut stmt = tx.prepare(&format!(
        "INSERT INTO {table} (video_id, {column}, position) VALUES (?1, ?2, ?3)"
    ))?;
    for (position, id) in ids.iter().enumerate() {
        stmt.execute(params![video_id, id, position as i64])?;
    }
    Ok(())
}

/// Row values of one occupied media slot
struct MediaRow<'a> {
    media_type: VideoMediaType,
    id: &'a str,
    checksum: &'a str,
    name: &'a str,
    location: &'a str,
    encoded_location: Option<&'a str>,
    status: Option<&'static str>,
}

impl<'a> MediaRow<'a> {
    fn audio_video(media_type: VideoMediaType, media: &'a AudioVideoMedia) -> Self {
        MediaRow {
            media_type,
            id: media.id().as_str(),
            checksum: media.checksum(),
            name: media.name(),
            location: media.raw_location(),
            encoded_location: media.encoded_location(),
            status: Some(media.status().as_str()),
        }
    }

    fn image(media_type: VideoMediaType, media: &'a ImageMedia) -> Self {
        MediaRow {
            media_type,
            id: media.id().as_str(),
            checksum: media.checksum(),
            name: media.name(),
            location: media.location(),
            encoded_location: None,
            status: None,
        }
    }
}

fn media_rows(medias: &VideoMedias) -> Vec<MediaRow<'_>> {
    let audio_video = [
        (VideoMediaType::Video, &medias.video),
        (VideoMediaType::Trailer, &medias.trailer),
    ];
    let images = [
        (VideoMediaType::Banner, &medias.banner),
        (VideoMediaType::Thumbnail, &medias.thumbnail),
        (VideoMediaType::ThumbnailHalf, &medias.thumbnail_half),
    ];

    audio_video
        .into_iter()
        .filter_map(|(t, media)| media.as_ref().map(|m| MediaRow::audio_video(t, m)))
        .chain(
            images
                .into_iter()
                .filter_map(|(t, media)| media.as_ref().map(|m| MediaRow::image(t, m))),
        )
        .collect()
}

/// SQLite-based implementation of the VideoGateway trait
#[derive(Clone)]
pub struct SqliteVideoGateway {
    db: SqliteDatabase,
}

impl SqliteVideoGateway {
    pub fn new(db: SqliteDatabase) -> Self {
        SqliteVideoGateway { db }
    }

    /// Save the video row, its links and its media rows in a single transaction
    fn save(&self, video: &Video) -> DomainResult<()> {
        let id = video.id().as_str();
        self.db.with_connection(|conn| {
            let tx = conn.transaction()?;

            tx.execute(
                "INSERT INTO videos (id, title, description, year_launched, duration, opened,
                                     published, rating, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
                 ON CONFLICT(id) DO UPDATE SET
                    title = excluded.title,
                    description = excluded.description,
                    year_launched = excluded.year_launched,
                    duration = excluded.duration,
                    opened = excluded.opened,
                    published = excluded.published,
                    rating = excluded.rating,
                    updated_at = excluded.updated_at",
                params![
                    id,
                    video.title(),
                    video.description(),
                    video.launched_at(),
                    video.duration(),
                    video.opened(),
                    video.published(),
                    video.rating().map(|r| r.name()),
                    video.created_at(),
                    video.updated_at(),
                ],
            )?;

            let categories: Vec<&str> = video.categories().iter().map(CategoryId::as_str).collect();
            let genres: Vec<&str> = video.genres().iter().map(GenreId::as_str).collect();
            let cast_members: Vec<&str> = video
                .cast_members()
                .iter()
                .map(CastMemberId::as_str)
                .collect();
            replace_links(&tx, CATEGORY_LINKS, id, &categories)?;
            replace_links(&tx, GENRE_LINKS, id, &genres)?;
            replace_links(&tx, CAST_MEMBER_LINKS, id, &cast_members)?;

            tx.execute("DELETE FROM video_media WHERE video_id = ?1", params![id])?;
            for row in media_rows(video.medias()) {
                tx.execute(
                    "INSERT INTO video_media (video_id, media_type, id, checksum, name, location,
                                              encoded_location, status)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                    params![
                        id,
                        row.media_type.as_str(),
                        row.id,
                        row.checksum,
                        row.name,
                        row.location,
                        row.encoded_location,
                        row.status,
                    ],
                )?;
            }

            tx.commit()
        })
    }
}

/// WHERE clause and its positional values for a video search
fn search_filter(query: &VideoSearchQuery) -> (String, Vec<Value>) {
    let mut clauses = Vec::new();
    let mut values = Vec::new();

    let terms = query.query.terms.trim();
    if !terms.is_empty() {
        clauses.push("(title LIKE ? OR description LIKE ?)".to_string());
        let pattern = like_pattern(terms);
        values.push(Value::Text(pattern.clone()));
        values.push(Value::Text(pattern));
    }

    let filters: [((&str, &str), Vec<&str>); 3] = [
        (
            CATEGORY_LINKS,
            query.categories.iter().map(CategoryId::as_str).collect(),
        ),
        (GENRE_LINKS, query.genres.iter().map(GenreId::as_str).collect()),
        (
            CAST_MEMBER_LINKS,
            query.cast_members.iter().map(CastMemberId::as_str).collect(),
        ),
    ];
    for ((table, column), ids) in filters {
        if ids.is_empty() {
            continue;
        }
        clauses.push(format!(
            "id IN (SELECT video_id FROM {table} WHERE {column} IN ({}))",
            placeholders(ids.len())
        ));
        values.extend(ids.into_iter().map(|id| Value::Text(id.to_string())));
    }

    if clauses.is_empty() {
        (String::new(), values)
    } else {
        (format!("WHERE {}", clauses.join(" AND ")), values)
    }
}

impl VideoGateway for SqliteVideoGateway {
    fn create(&mut self, video: Video) -> DomainResult<Video> {
        self.save(&video)?;
        tracing::debug!(video_id = %video.id(), "Inserted video");
        Ok(video)
    }

    fn update(&mut self, video: Video) -> DomainResult<Video> {
        self.save(&video)?;
        Ok(video)
    }

    fn delete_by_id(&mut self, id: &VideoId) -> DomainResult<()> {
        let rows = self.db.with_connection(|conn| {
            conn.execute("DELETE FROM videos WHERE id = ?1", params![id.as_str()])
        })?;
        if rows > 0 {
            tracing::debug!(video_id = %id, "Deleted video");
        }
        Ok(())
    }

    fn find_by_id(&self, id: &VideoId) -> DomainResult<Option<Video>> {
        let record = self.db.with_connection(|conn| {
            conn.query_row(
                &format!("SELECT {} FROM videos WHERE id = ?1", VideoRecord::COLUMNS),
                params![id.as_str()],
                VideoRecord::from_row,
            )
            .optional()?
            .map(|record| record.load_relations(conn))
            .transpose()
        })?;

        record.map(VideoRecord::into_video).transpose()
    }

    fn find_all(&self, query: &VideoSearchQuery) -> DomainResult<Pagination<Video>> {
        let search = &query.query;
        let (filter, values) = search_filter(query);
        let count_sql = format!("SELECT COUNT(*) FROM videos {}", filter);
        let sql = format!(
            "SELECT {} FROM videos {} ORDER BY {} {}, id ASC LIMIT ? OFFSET ?",
            VideoRecord::COLUMNS,
            filter,
            sort_column(search, &SORT_COLUMNS),
            search.direction.as_sql()
        );

        let mut page_values = values.clone();
        page_values.push(Value::Integer(search.per_page as i64));
        page_values.push(Value::Integer(search.offset() as i64));

        let (total, records) = self.db.with_connection(|conn| {
            let total: i64 =
                conn.query_row(&count_sql, params_from_iter(values.iter()), |row| row.get(0))?;
            let mut stmt = conn.prepare(&sql)?;
            let records = stmt
                .query_map(params_from_iter(page_values.iter()), VideoRecord::from_row)?
                .collect::<SqliteResult<Vec<_>>>()?;
            let records = records
                .into_iter()
                .map(|record| record.load_relations(conn))
                .collect::<SqliteResult<Vec<_>>>()?;
            Ok((total, records))
        })?;

        let items = records
            .into_iter()
            .map(VideoRecord::into_video)
            .collect::<DomainResult<Vec<_>>>()?;
        Ok(Pagination::new(
            search.page,
            search.per_page,
            total as u64,
            items,
        ))
    }
}
