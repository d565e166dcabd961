use anyhow::Context;
use catalog::application::use_cases::{ListCastMembers, ListCategories, ListGenres, ListVideos};
use catalog::application::{EncoderResultListener, ListenerCallback, ListenerEvent};
use catalog::config::{AppConfig, DatabaseLocation};
use catalog::domain::{SearchQuery, VideoSearchQuery};
use catalog::infrastructure::media::{
    DefaultMediaResourceGateway, InMemoryStorage, LocalFileStorage, StorageService,
};
use catalog::infrastructure::persistence::{
    SqliteCastMemberGateway, SqliteCategoryGateway, SqliteDatabase, SqliteGenreGateway,
    SqliteVideoGateway,
};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::{mpsc, Mutex};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env().context("Invalid configuration")?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.log_filter))
        .with_writer(std::io::stderr)
        .init();

    let db = match &config.database {
        DatabaseLocation::InMemory => SqliteDatabase::open_in_memory()?,
        DatabaseLocation::File(path) => SqliteDatabase::open(path)
            .with_context(|| format!("Cannot open database at {}", path.display()))?,
    };
    tracing::info!("Opened catalog database: {:?}", config.database);

    let storage: Box<dyn StorageService + Send> = match &config.storage_root {
        Some(root) => Box::new(LocalFileStorage::new(root)?),
        None => Box::new(InMemoryStorage::new()),
    };
    let media = DefaultMediaResourceGateway::new(storage);

    let videos = SqliteVideoGateway::new(db.clone());
    log_catalog_totals(&db, &videos, &media)?;

    let (sender, receiver) = mpsc::channel::<String>(config.event_buffer);
    let reader = tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Some(line) = lines.next_line().await? {
            if line.trim().is_empty() {
                continue;
            }
            if sender.send(line).await.is_err() {
                break;
            }
        }
        Ok::<_, std::io::Error>(())
    });

    let callback: ListenerCallback = Arc::new(|event| match event {
        ListenerEvent::MediaCompleted {
            video_id,
            resource_id,
        } => tracing::info!(%video_id, %resource_id, "Media encoded"),
        ListenerEvent::Ignored {
            video_id,
            resource_id,
        } => tracing::info!(%video_id, %resource_id, "Encoder result changed nothing"),
        ListenerEvent::EncoderFailed { message } => {
            tracing::warn!("Encoder failed: {}", message)
        }
        ListenerEvent::Rejected { error } => tracing::warn!("Rejected message: {}", error),
    });
    let listener = EncoderResultListener::new(Arc::new(Mutex::new(videos)), Some(callback));
    let stats = listener.listen(receiver).await;

    reader.await?.context("Failed to read encoder results from stdin")?;
    tracing::info!(
        completed = stats.completed,
        ignored = stats.ignored,
        encoder_errors = stats.encoder_errors,
        rejected = stats.rejected,
        "Done"
    );
    Ok(())
}

fn log_catalog_totals<S: StorageService>(
    db: &SqliteDatabase,
    videos: &SqliteVideoGateway,
    media: &DefaultMediaResourceGateway<S>,
) -> anyhow::Result<()> {
    let query = SearchQuery::new(0, 1, "", "", "asc");
    let categories = ListCategories::new(&SqliteCategoryGateway::new(db.clone())).execute(&query)?;
    let genres = ListGenres::new(&SqliteGenreGateway::new(db.clone())).execute(&query)?;
    let cast_members =
        ListCastMembers::new(&SqliteCastMemberGateway::new(db.clone())).execute(&query)?;
    let video_page = ListVideos::new(videos).execute(&VideoSearchQuery::new(query))?;
    let stored_media = media.storage().list("")?.len();

    tracing::info!(
        categories = categories.total,
        genres = genres.total,
        cast_members = cast_members.total,
        videos = video_page.total,
        stored_media,
        "Catalog loaded"
    );
    Ok(())
}
