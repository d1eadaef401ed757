//! egui application shell for DCMspec Explorer.
//!
//! Thin presentation layer over `dcmspec-explorer-core`: components render
//! from the shared [`state::AppState`] and emit [`GuiMessage`]s; the app
//! shell dispatches those messages and polls the background loader between
//! frames. No blocking store call ever runs on the UI thread.

pub mod app;
pub mod components;
pub mod state;
pub mod tree;

pub use app::ExplorerApp;
pub use state::AppState;

pub type GuiResult<T> = Result<T, GuiError>;

#[derive(Debug, thiserror::Error)]
pub enum GuiError {
    #[error("Core error: {0}")]
    Core(#[from] dcmspec_explorer_core::Error),

    #[error("UI error: {0}")]
    Ui(String),
}

/// User actions emitted by components during a frame and dispatched by the
/// app shell afterwards.
#[derive(Debug, Clone, PartialEq)]
pub enum GuiMessage {
    SearchChanged(String),
    SortRequested(tree::SortColumn),
    FavoritesFilterToggled(bool),
    RefreshRequested,
    IodSelected(String),
    FavoriteToggled(String),
    NodeSelected(String),
    ErrorDismissed,
    WarningsDismissed,
}
