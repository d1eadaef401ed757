//! Status bar: status line, DICOM version, favorites count.

use egui::Ui;

use crate::components::{Component, RenderCtx};
use crate::GuiResult;

pub struct StatusBar;

impl StatusBar {
    pub fn new() -> Self {
        Self
    }
}

impl Default for StatusBar {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for StatusBar {
    fn name(&self) -> &str {
        "status_bar"
    }

    fn render(&mut self, ui: &mut Ui, ctx: &mut RenderCtx) -> GuiResult<()> {
        ui.horizontal(|ui| {
            ui.label(&ctx.state.status);
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(format!("♥ {}", ctx.favorites.len()));
                if let Some(version) = &ctx.state.version {
                    ui.separator();
                    ui.label(format!("DICOM {version}"));
                }
            });
        });
        Ok(())
    }
}
