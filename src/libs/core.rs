pub mod models;
pub mod sample;
