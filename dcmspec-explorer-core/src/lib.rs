//! Core library for DCMspec Explorer.
//!
//! Holds everything the GUI shell needs that is not rendering: the config
//! resolution chain, the persistent favorites store, the spec model types,
//! the boundary to the external specification library's cached JSON models,
//! and the background loader service.

pub mod config;
pub mod favorites;
pub mod model;
pub mod service;
pub mod store;

pub use config::{AppConfig, ConfigLoad, ConfigSource, LogLevel};
pub use favorites::FavoritesStore;
pub use model::{IodEntry, IodKind, IodList, SpecNode};
pub use service::{LoadEvent, SpecLoader};
pub use store::{JsonModelStore, Progress, ProgressStatus, SpecStore};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Spec model for {table_id} is not cached at {path}; the specification library has not built it yet")]
    ModelNotCached { table_id: String, path: std::path::PathBuf },

    #[error("IOD list is not cached at {0}; the specification library has not built it yet")]
    ListNotCached(std::path::PathBuf),
}
