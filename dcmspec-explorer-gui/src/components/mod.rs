//! UI components. Each renders from the shared state and emits
//! [`GuiMessage`]s; none of them mutates state or touches the filesystem
//! directly.

pub mod detail_panel;
pub mod iod_tree;
pub mod load_dialog;
pub mod status_bar;
pub mod toolbar;

pub use detail_panel::DetailPanel;
pub use iod_tree::IodTree;
pub use load_dialog::LoadDialog;
pub use status_bar::StatusBar;
pub use toolbar::Toolbar;

use egui::Ui;

use dcmspec_explorer_core::FavoritesStore;

use crate::state::AppState;
use crate::{GuiMessage, GuiResult};

/// Read-only view of the app handed to components during a frame, plus the
/// message sink for user actions.
pub struct RenderCtx<'a> {
    pub state: &'a AppState,
    pub favorites: &'a FavoritesStore,
    pub messages: &'a mut Vec<GuiMessage>,
}

impl RenderCtx<'_> {
    pub fn emit(&mut self, message: GuiMessage) {
        self.messages.push(message);
    }
}

pub trait Component {
    fn name(&self) -> &str;
    fn render(&mut self, ui: &mut Ui, ctx: &mut RenderCtx) -> GuiResult<()>;
}
