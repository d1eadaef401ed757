//! Detail panel for the selected IOD or model node.

use egui::{Grid, Ui};

use dcmspec_explorer_core::model::{type_text, usage_text};
use dcmspec_explorer_core::{IodEntry, SpecNode};

use crate::components::{Component, RenderCtx};
use crate::GuiResult;

pub struct DetailPanel;

impl DetailPanel {
    pub fn new() -> Self {
        Self
    }

    fn render_entry(ui: &mut Ui, entry: &IodEntry) {
        ui.heading(&entry.name);
        ui.separator();
        Grid::new("iod_details").num_columns(2).striped(true).show(ui, |ui| {
            ui.label("Kind");
            ui.label(entry.kind.as_str());
            ui.end_row();

            ui.label("Table id");
            ui.label(&entry.table_id);
            ui.end_row();

            ui.label("Standard");
            ui.hyperlink(&entry.table_url);
            ui.end_row();
        });
    }

    fn render_node(ui: &mut Ui, node: &SpecNode) {
        ui.heading(node.display_name());
        ui.separator();
        Grid::new("node_details").num_columns(2).striped(true).show(ui, |ui| {
            if node.is_module() {
                if let Some(usage) = node.attr("usage") {
                    let code: String = usage.chars().take(1).collect();
                    ui.label("Usage");
                    ui.label(usage_text(&code));
                    ui.end_row();
                }
            }
            if node.is_attribute() {
                if let Some(elem_type) = node.attr("elem_type") {
                    ui.label("Type");
                    ui.label(type_text(&elem_type));
                    ui.end_row();
                }
            }

            // Remaining attributes verbatim; the consumer decides what
            // matters.
            for (key, value) in node.details() {
                if matches!(key.as_str(), "usage" | "elem_type" | "name") {
                    continue;
                }
                ui.label(&key);
                ui.label(&value);
                ui.end_row();
            }
        });
    }
}

impl Default for DetailPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for DetailPanel {
    fn name(&self) -> &str {
        "detail_panel"
    }

    fn render(&mut self, ui: &mut Ui, ctx: &mut RenderCtx) -> GuiResult<()> {
        if let Some(node) = ctx.state.selected_node() {
            Self::render_node(ui, node);
        } else if let Some(entry) = ctx.state.selected_entry() {
            Self::render_entry(ui, entry);
        } else {
            ui.weak("Select an IOD to see its details.");
        }
        Ok(())
    }
}
