use crate::libs::storage::database::storage_traits::StoreError;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;
use uuid::Uuid;

/// Copies a picked image into app-private storage under a fresh
/// `profile_<uuid>.jpg` name and returns where it landed.
pub fn save_profile_picture(source: &Path, files_dir: &Path) -> Result<PathBuf, StoreError> {
    fs::create_dir_all(files_dir)?;

    let target = files_dir.join(format!("profile_{}.jpg", Uuid::now_v7()));
    let bytes = fs::copy(source, &target)?;

    info!(path = %target.display(), bytes, "Saved profile picture");
    Ok(target)
}
