pub mod ambient;
pub mod bridge;
pub mod completion;
pub mod config;
pub mod core;
pub mod logging;
pub mod notice;
pub mod profile_image;
pub mod storage;
pub mod uniffi;
