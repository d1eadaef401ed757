//! Toolbar: search field, favorites filter, reload.

use egui::Ui;

use crate::components::{Component, RenderCtx};
use crate::{GuiMessage, GuiResult};

pub struct Toolbar {
    search_buffer: String,
}

impl Toolbar {
    pub fn new() -> Self {
        Self { search_buffer: String::new() }
    }
}

impl Default for Toolbar {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for Toolbar {
    fn name(&self) -> &str {
        "toolbar"
    }

    fn render(&mut self, ui: &mut Ui, ctx: &mut RenderCtx) -> GuiResult<()> {
        ui.horizontal(|ui| {
            ui.label("🔍");
            let response = ui.text_edit_singleline(&mut self.search_buffer);
            if response.changed() {
                ctx.emit(GuiMessage::SearchChanged(self.search_buffer.clone()));
            }
            if !self.search_buffer.is_empty() && ui.small_button("✖").clicked() {
                self.search_buffer.clear();
                ctx.emit(GuiMessage::SearchChanged(String::new()));
            }

            ui.separator();

            let mut favorites_only = ctx.state.favorites_only;
            if ui.checkbox(&mut favorites_only, "♥ Favorites only").changed() {
                ctx.emit(GuiMessage::FavoritesFilterToggled(favorites_only));
            }

            ui.separator();

            let reload = ui.add_enabled(!ctx.state.is_loading(), egui::Button::new("⟳ Reload"));
            if reload.clicked() {
                ctx.emit(GuiMessage::RefreshRequested);
            }
            if ctx.state.is_loading() {
                ui.spinner();
            }
        });
        Ok(())
    }
}
