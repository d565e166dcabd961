pub mod cast_member;
pub mod category;
pub mod genre;
pub mod media;
pub mod video;

pub use cast_member::{
    CreateCastMember, DeleteCastMember, GetCastMemberById, ListCastMembers, UpdateCastMember,
};
pub use category::{CreateCategory, DeleteCategory, GetCategoryById, ListCategories, UpdateCategory};
pub use genre::{CreateGenre, DeleteGenre, GetGenreById, ListGenres, UpdateGenre};
pub use media::{GetMedia, UpdateMediaStatus, UploadMedia};
pub use video::{
    CreateVideo, DeleteVideo, GetVideoById, ListVideos, UpdateVideo, VideoAssociations,
};

use crate::domain::{DomainResult, Notification, ValidationError};
use std::fmt::Display;

/// Check that every referenced id exists.
///
/// Ids missing from the gateway's answer are reported as one error, in input
/// order: `"Some <label> could not be found: a, b"`. Gateway failures are not
/// validation problems and propagate.
pub(crate) fn validate_associations<Id, F>(
    label: &str,
    ids: &[Id],
    exists_by_ids: F,
) -> DomainResult<Notification>
where
    Id: PartialEq + Display,
    F: FnOnce(&[Id]) -> DomainResult<Vec<Id>>,
{
    let mut notification = Notification::new();
    if ids.is_empty() {
        return Ok(notification);
    }

    let existing = exists_by_ids(ids)?;
    let missing: Vec<String> = ids
        .iter()
        .filter(|id| !existing.contains(id))
        .map(|id| id.to_string())
        .collect();

    if !missing.is_empty() {
        notification.append(ValidationError::new(format!(
            "Some {} could not be found: {}",
            label,
            missing.join(", ")
        )));
    }

    Ok(notification)
}
