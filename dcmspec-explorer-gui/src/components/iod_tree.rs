//! The IOD tree: one row per visible IOD, expandable into the module and
//! attribute structure of its loaded model.

use egui::{CollapsingHeader, ScrollArea, Ui};

use dcmspec_explorer_core::{FavoritesStore, IodEntry, SpecNode};

use crate::components::{Component, RenderCtx};
use crate::state::AppState;
use crate::tree::{self, SortColumn};
use crate::{GuiMessage, GuiResult};

pub struct IodTree;

impl IodTree {
    pub fn new() -> Self {
        Self
    }

    fn sort_label(state: &AppState, column: SortColumn, text: &str) -> String {
        match state.sort {
            Some(sort) if sort.column == column => {
                if sort.reverse {
                    format!("{text} ⏶")
                } else {
                    format!("{text} ⏷")
                }
            }
            _ => text.to_string(),
        }
    }

    fn render_row(
        ui: &mut Ui,
        entry: &IodEntry,
        state: &AppState,
        favorites: &FavoritesStore,
        messages: &mut Vec<GuiMessage>,
    ) {
        let selected = state.selected_table_id.as_deref() == Some(entry.table_id.as_str());
        let is_favorite = favorites.is_favorite(&entry.table_id);

        ui.horizontal(|ui| {
            let heart = if is_favorite { "♥" } else { "♡" };
            if ui.small_button(heart).clicked() {
                messages.push(GuiMessage::FavoriteToggled(entry.table_id.clone()));
            }

            if ui.selectable_label(selected, &entry.name).clicked() {
                messages.push(GuiMessage::IodSelected(entry.table_id.clone()));
            }

            ui.weak(entry.kind.as_str());

            if state.model_loading.as_deref() == Some(entry.table_id.as_str()) {
                ui.spinner();
            }
        });

        if selected {
            if let Some(model) = state.models.get(&entry.table_id) {
                ui.indent(&entry.table_id, |ui| {
                    for child in &model.children {
                        Self::render_node(ui, child, &model.name, state, messages);
                    }
                });
            }
        }
    }

    fn render_node(
        ui: &mut Ui,
        node: &SpecNode,
        parent_path: &str,
        state: &AppState,
        messages: &mut Vec<GuiMessage>,
    ) {
        let path = format!("{parent_path}/{}", node.name);
        let selected = state.selected_node_path.as_deref() == Some(path.as_str());

        let code = node.usage_code();
        let label = if code.is_empty() {
            node.display_name()
        } else {
            format!("{} · {code}", node.display_name())
        };

        if node.children.is_empty() {
            if ui.selectable_label(selected, label).clicked() {
                messages.push(GuiMessage::NodeSelected(path));
            }
        } else {
            let header = CollapsingHeader::new(label)
                .id_source(&path)
                .show(ui, |ui| {
                    for child in &node.children {
                        Self::render_node(ui, child, &path, state, messages);
                    }
                });
            if header.header_response.clicked() {
                messages.push(GuiMessage::NodeSelected(path));
            }
        }
    }
}

impl Default for IodTree {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for IodTree {
    fn name(&self) -> &str {
        "iod_tree"
    }

    fn render(&mut self, ui: &mut Ui, ctx: &mut RenderCtx) -> GuiResult<()> {
        // Split the context so loaded-model borrows and message pushes do
        // not alias.
        let state = ctx.state;
        let favorites = ctx.favorites;
        let messages = &mut *ctx.messages;

        ui.horizontal(|ui| {
            if ui.small_button(Self::sort_label(state, SortColumn::Name, "Name")).clicked() {
                messages.push(GuiMessage::SortRequested(SortColumn::Name));
            }
            if ui.small_button(Self::sort_label(state, SortColumn::Kind, "Kind")).clicked() {
                messages.push(GuiMessage::SortRequested(SortColumn::Kind));
            }
        });
        ui.separator();

        let rows = tree::visible_rows(
            &state.entries,
            favorites,
            &state.search_text,
            state.sort,
            state.favorites_only,
        );

        if rows.is_empty() && !state.list_loading {
            if state.favorites_only {
                ui.weak("No favorites yet. Click ♡ on an IOD to add one.");
            } else {
                ui.weak("No IODs to show.");
            }
            return Ok(());
        }

        ScrollArea::vertical().auto_shrink([false; 2]).show(ui, |ui| {
            for entry in rows {
                Self::render_row(ui, entry, state, favorites, messages);
            }
        });

        Ok(())
    }
}
