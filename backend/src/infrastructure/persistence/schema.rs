use rusqlite::{Connection, Result};

/// Initialize the SQLite database with the catalog schema.
/// This function is idempotent and can be safely called multiple times.
pub fn initialize_database(conn: &Connection) -> Result<()> {
    // Enable foreign key constraints
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS categories (
            id TEXT PRIMARY KEY,
            name TEXT,
            description TEXT,
            active INTEGER NOT NULL,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL,
            deleted_at TEXT
        )",
        [],
    )?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_categories_name ON categories(name)",
        [],
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS genres (
            id TEXT PRIMARY KEY,
            name TEXT,
            active INTEGER NOT NULL,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL,
            deleted_at TEXT
        )",
        [],
    )?;

    // Category links keep the order they were attached in
    conn.execute(
        "CREATE TABLE IF NOT EXISTS genres_categories (
            genre_id TEXT NOT NULL,
            category_id TEXT NOT NULL,
            position INTEGER NOT NULL,
            PRIMARY KEY (genre_id, category_id),
            FOREIGN KEY (genre_id) REFERENCES genres(id) ON DELETE CASCADE
        )",
        [],
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS cast_members (
            id TEXT PRIMARY KEY,
            name TEXT,
            type TEXT,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )",
        [],
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS videos (
            id TEXT PRIMARY KEY,
            title TEXT,
            description TEXT,
            year_launched INTEGER,
            duration REAL NOT NULL,
            opened INTEGER NOT NULL,
            published INTEGER NOT NULL,
            rating TEXT,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )",
        [],
    )?;

    for (table, column) in [
        ("videos_categories", "category_id"),
        ("videos_genres", "genre_id"),
        ("videos_cast_members", "cast_member_id"),
    ] {
        conn.execute(
            &format!(
                "CREATE TABLE IF NOT EXISTS {table} (
                    video_id TEXT NOT NULL,
                    {column} TEXT NOT NULL,
                    position INTEGER NOT NULL,
                    PRIMARY KEY (video_id, {column}),
                    FOREIGN KEY (video_id) REFERENCES videos(id) ON DELETE CASCADE
                )"
            ),
            [],
        )?;

        conn.execute(
            &format!("CREATE INDEX IF NOT EXISTS idx_{table}_{column} ON {table}({column})"),
            [],
        )?;
    }

    // One row per occupied media slot; status is NULL for images
    conn.execute(
        "CREATE TABLE IF NOT EXISTS video_media (
            video_id TEXT NOT NULL,
            media_type TEXT NOT NULL,
            id TEXT NOT NULL,
            checksum TEXT NOT NULL,
            name TEXT NOT NULL,
            location TEXT NOT NULL,
            encoded_location TEXT,
            status TEXT,
            PRIMARY KEY (video_id, media_type),
            FOREIGN KEY (video_id) REFERENCES videos(id) ON DELETE CASCADE
        )",
        [],
    )?;

    Ok(())
}
