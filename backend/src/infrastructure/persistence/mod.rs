mod database;
mod schema;
mod sqlite_cast_member_gateway;
mod sqlite_category_gateway;
mod sqlite_genre_gateway;
mod sqlite_video_gateway;

pub use database::SqliteDatabase;
pub use schema::initialize_database;
pub use sqlite_cast_member_gateway::SqliteCastMemberGateway;
pub use sqlite_category_gateway::SqliteCategoryGateway;
pub use sqlite_genre_gateway::SqliteGenreGateway;
pub use sqlite_video_gateway::SqliteVideoGateway;
