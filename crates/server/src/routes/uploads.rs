//! Image upload handlers.
//!
//! Both endpoints read the multipart field named `file`. Other fields are
//! ignored.

use axum::{
    Json,
    body::Bytes,
    extract::{Multipart, State},
};
use serde::Serialize;

use crate::error::Result;
use crate::middleware::RequireAuth;
use crate::services::profile::ProfileService;
use crate::services::uploads::UploadError;
use crate::state::AppState;

/// Name of the multipart field carrying the file.
const FILE_FIELD: &str = "file";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AvatarUploaded {
    pub avatar_url: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageUploaded {
    pub image_url: String,
}

/// Replace the caller's avatar and record its URL on their profile.
pub async fn avatar(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    multipart: Multipart,
) -> Result<Json<AvatarUploaded>> {
    let (file_name, bytes) = read_file(multipart).await?;
    let avatar_url = ProfileService::new(state.store(), state.uploads())
        .set_avatar(&user.id, file_name.as_deref(), &bytes)
        .await?;
    Ok(Json(AvatarUploaded { avatar_url }))
}

/// Store a recipe image. The URL is not attached to any recipe.
pub async fn recipe_image(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    multipart: Multipart,
) -> Result<Json<ImageUploaded>> {
    let (file_name, bytes) = read_file(multipart).await?;
    let image_url = state
        .uploads()
        .save_recipe_image(file_name.as_deref(), &bytes)
        .await?;
    Ok(Json(ImageUploaded { image_url }))
}

/// The original filename and contents of the first `file` field.
async fn read_file(
    mut multipart: Multipart,
) -> std::result::Result<(Option<String>, Bytes), UploadError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() == Some(FILE_FIELD) {
            let file_name = field.file_name().map(str::to_owned);
            let bytes = field.bytes().await?;
            return Ok((file_name, bytes));
        }
    }
    Err(UploadError::MissingFile)
}
