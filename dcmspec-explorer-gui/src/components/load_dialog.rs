//! Progress window shown while an IOD model is being built, one bar per
//! step the specification library reports.

use egui::{Context, ProgressBar};

use dcmspec_explorer_core::store::ProgressStatus;

use crate::components::RenderCtx;

const STEPS: [ProgressStatus; 4] = [
    ProgressStatus::DownloadingDocument,
    ProgressStatus::ParsingModuleList,
    ProgressStatus::ParsingModules,
    ProgressStatus::SavingModel,
];

pub struct LoadDialog;

impl LoadDialog {
    pub fn new() -> Self {
        Self
    }

    /// Floating window, rendered only while a model load is in flight.
    pub fn render(&mut self, ctx: &Context, render_ctx: &RenderCtx) {
        let Some(table_id) = &render_ctx.state.model_loading else {
            return;
        };

        egui::Window::new("Loading IOD")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(format!("Building model for {table_id}…"));
                ui.separator();
                for step in STEPS {
                    let fraction = match render_ctx.state.load_progress.get(&step) {
                        // Indeterminate progress fills the bar, matching a
                        // step the library does not break down.
                        Some(-1) => 1.0,
                        Some(percent) => (*percent as f32 / 100.0).clamp(0.0, 1.0),
                        None => 0.0,
                    };
                    ui.horizontal(|ui| {
                        ui.label(step.label());
                        ui.add(ProgressBar::new(fraction).desired_width(180.0).show_percentage());
                    });
                }
            });
    }
}

impl Default for LoadDialog {
    fn default() -> Self {
        Self::new()
    }
}
