pub mod libs;
use crate::libs::ambient::BrightnessLevel;
use crate::libs::bridge::BridgeError;
use crate::libs::config::ChatConfig;
use crate::libs::notice::BackgroundNotice;
use crate::libs::storage::database::database;
use crate::libs::storage::database::storage_traits::StoreError;
use thiserror::Error;

uniffi::setup_scaffolding!();

#[derive(Debug, Error, uniffi::Error)]
#[uniffi(flat_error)]
pub enum DatabaseError {
    #[error("{0}")]
    InitializationError(String),
    #[error("{0}")]
    StorageError(String),
    #[error("{0}")]
    WorkerUnavailable(String),
    #[error("Invalid config: {0}")]
    ConfigError(String),
}

impl From<StoreError> for DatabaseError {
    fn from(err: StoreError) -> Self {
        DatabaseError::StorageError(err.to_string())
    }
}

impl From<BridgeError> for DatabaseError {
    fn from(err: BridgeError) -> Self {
        match err {
            BridgeError::Store(store) => store.into(),
            other => DatabaseError::WorkerUnavailable(other.to_string()),
        }
    }
}

#[uniffi::export]
pub fn init_logging(filter: Option<String>) {
    libs::logging::init_logging(filter.as_deref());
}

#[uniffi::export]
pub fn parse_config(json: String) -> Result<ChatConfig, DatabaseError> {
    ChatConfig::from_json(&json).map_err(|e| DatabaseError::ConfigError(e.to_string()))
}

#[uniffi::export]
pub fn default_config(database_dir: String) -> ChatConfig {
    ChatConfig {
        database_path: database::database_path_in(database_dir)
            .to_string_lossy()
            .into_owned(),
        ..ChatConfig::default()
    }
}

#[uniffi::export]
pub fn brightness_for_lux(lux: f32) -> BrightnessLevel {
    BrightnessLevel::from_lux(lux)
}

#[uniffi::export]
pub fn brightness_header(lux: f32) -> String {
    libs::ambient::brightness_header(lux)
}

#[uniffi::export]
pub fn background_notice() -> BackgroundNotice {
    libs::notice::background_notice()
}
