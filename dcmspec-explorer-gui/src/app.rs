//! Application shell: panel layout, loader polling, message dispatch.

use std::sync::Arc;
use std::time::Duration;

use crossbeam_channel::Receiver;
use egui::Context;

use dcmspec_explorer_core::config::ConfigLoad;
use dcmspec_explorer_core::{FavoritesStore, JsonModelStore, LoadEvent, SpecLoader};

use crate::components::{
    Component, DetailPanel, IodTree, LoadDialog, RenderCtx, StatusBar, Toolbar,
};
use crate::state::AppState;
use crate::tree::Sort;
use crate::GuiMessage;

pub struct ExplorerApp {
    state: AppState,
    favorites: FavoritesStore,
    loader: SpecLoader,

    toolbar: Toolbar,
    iod_tree: IodTree,
    detail_panel: DetailPanel,
    status_bar: StatusBar,
    load_dialog: LoadDialog,

    list_rx: Option<Receiver<LoadEvent>>,
    model_rx: Option<Receiver<LoadEvent>>,
}

impl ExplorerApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, config_load: ConfigLoad) -> Self {
        let favorites = FavoritesStore::load(&config_load.user_data_dir());
        let store = JsonModelStore::new(&config_load.config.cache_dir);
        let loader = SpecLoader::new(Arc::new(store));

        let mut state = AppState::new(
            config_load.warnings.clone(),
            config_load.config.show_favorites_on_start,
        );
        state.list_loading = true;
        state.status = "Loading IOD modules...".to_string();

        let list_rx = Some(loader.spawn_list_load(false));

        Self {
            state,
            favorites,
            loader,
            toolbar: Toolbar::new(),
            iod_tree: IodTree::new(),
            detail_panel: DetailPanel::new(),
            status_bar: StatusBar::new(),
            load_dialog: LoadDialog::new(),
            list_rx,
            model_rx: None,
        }
    }

    fn poll_loaders(&mut self) {
        let mut list_events = Vec::new();
        if let Some(rx) = &self.list_rx {
            while let Ok(event) = rx.try_recv() {
                list_events.push(event);
            }
        }
        for event in list_events {
            self.on_list_event(event);
        }

        let mut model_events = Vec::new();
        if let Some(rx) = &self.model_rx {
            while let Ok(event) = rx.try_recv() {
                model_events.push(event);
            }
        }
        for event in model_events {
            self.on_model_event(event);
        }
    }

    fn on_list_event(&mut self, event: LoadEvent) {
        match event {
            LoadEvent::Progress(progress) => {
                if progress.percent == -1 {
                    self.state.status = "Loading IOD modules... (unknown progress)".to_string();
                } else if progress.percent % 10 == 0 || progress.percent == 100 {
                    self.state.status =
                        format!("Loading IOD modules... {}%", progress.percent);
                }
            }
            LoadEvent::ListLoaded(list) => {
                tracing::info!("Loaded {} IOD modules", list.iods.len());
                self.state.set_iod_list(list);
                self.list_rx = None;
            }
            LoadEvent::Failed(message) => {
                tracing::error!("IOD list load failed: {message}");
                self.state.error = Some(message);
                self.state.status = "Error loading IOD modules.".to_string();
                self.state.list_loading = false;
                self.list_rx = None;
            }
            LoadEvent::ModelLoaded { .. } => {}
        }
    }

    fn on_model_event(&mut self, event: LoadEvent) {
        match event {
            LoadEvent::Progress(progress) => {
                if let Some(status) = progress.status {
                    self.state.load_progress.insert(status, progress.percent);
                }
            }
            LoadEvent::ModelLoaded { table_id, model } => {
                tracing::info!("Loaded IOD model for {table_id}");
                self.state.status = format!("Loaded IOD model for {table_id}.");
                self.state.models.insert(table_id, model);
                self.state.model_loading = None;
                self.model_rx = None;
            }
            LoadEvent::Failed(message) => {
                tracing::error!("IOD model load failed: {message}");
                self.state.error = Some(message);
                self.state.status = "Error loading IOD model.".to_string();
                self.state.model_loading = None;
                self.model_rx = None;
            }
            LoadEvent::ListLoaded(_) => {}
        }
    }

    fn dispatch(&mut self, message: GuiMessage) {
        match message {
            GuiMessage::SearchChanged(text) => {
                self.state.search_text = text;
            }
            GuiMessage::SortRequested(column) => {
                self.state.sort = Some(Sort::cycle(self.state.sort, column));
            }
            GuiMessage::FavoritesFilterToggled(enabled) => {
                self.state.favorites_only = enabled;
            }
            GuiMessage::RefreshRequested => self.refresh_list(),
            GuiMessage::IodSelected(table_id) => self.select_iod(table_id),
            GuiMessage::FavoriteToggled(table_id) => self.toggle_favorite(&table_id),
            GuiMessage::NodeSelected(path) => {
                self.state.selected_node_path = Some(path);
            }
            GuiMessage::ErrorDismissed => {
                self.state.error = None;
            }
            GuiMessage::WarningsDismissed => {
                self.state.startup_warnings.clear();
            }
        }
    }

    fn refresh_list(&mut self) {
        if self.state.is_loading() {
            return;
        }
        self.state.list_loading = true;
        self.state.status = "Loading IOD modules...".to_string();
        self.list_rx = Some(self.loader.spawn_list_load(true));
    }

    fn select_iod(&mut self, table_id: String) {
        if self.state.selected_table_id.as_deref() != Some(table_id.as_str()) {
            self.state.selected_node_path = None;
        }
        self.state.selected_table_id = Some(table_id.clone());

        // Kick off a model load the first time an IOD is opened; one model
        // load at a time.
        if !self.state.models.contains_key(&table_id) && self.state.model_loading.is_none() {
            self.state.load_progress.clear();
            self.state.model_loading = Some(table_id.clone());
            self.state.status = format!("Loading IOD model for {table_id}...");
            self.model_rx = Some(self.loader.spawn_model_load(table_id));
        }
    }

    fn toggle_favorite(&mut self, table_id: &str) {
        match self.favorites.toggle(table_id) {
            Ok(true) => self.state.status = format!("Added favorite: {table_id}"),
            Ok(false) => self.state.status = format!("Removed favorite: {table_id}"),
            Err(err) => {
                tracing::error!("Failed to save favorites: {err}");
                self.state.status = format!("Failed to save favorites: {err}");
            }
        }
    }

    fn render_dialogs(&mut self, ctx: &Context, messages: &mut Vec<GuiMessage>) {
        if let Some(error) = self.state.error.clone() {
            egui::Window::new("Error")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.label(error);
                    ui.separator();
                    if ui.button("OK").clicked() {
                        messages.push(GuiMessage::ErrorDismissed);
                    }
                });
        }

        if !self.state.startup_warnings.is_empty() {
            egui::Window::new("Configuration warnings")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 40.0])
                .show(ctx, |ui| {
                    for warning in &self.state.startup_warnings {
                        ui.label(warning);
                    }
                    ui.separator();
                    if ui.button("OK").clicked() {
                        messages.push(GuiMessage::WarningsDismissed);
                    }
                });
        }
    }
}

impl eframe::App for ExplorerApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        self.poll_loaders();

        let mut messages = Vec::new();

        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            let mut rctx = RenderCtx {
                state: &self.state,
                favorites: &self.favorites,
                messages: &mut messages,
            };
            if let Err(err) = self.toolbar.render(ui, &mut rctx) {
                tracing::error!("Toolbar render error: {err}");
            }
        });

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            let mut rctx = RenderCtx {
                state: &self.state,
                favorites: &self.favorites,
                messages: &mut messages,
            };
            if let Err(err) = self.status_bar.render(ui, &mut rctx) {
                tracing::error!("Status bar render error: {err}");
            }
        });

        egui::SidePanel::right("detail_panel")
            .default_width(320.0)
            .show(ctx, |ui| {
                let mut rctx = RenderCtx {
                    state: &self.state,
                    favorites: &self.favorites,
                    messages: &mut messages,
                };
                if let Err(err) = self.detail_panel.render(ui, &mut rctx) {
                    tracing::error!("Detail panel render error: {err}");
                }
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            let mut rctx = RenderCtx {
                state: &self.state,
                favorites: &self.favorites,
                messages: &mut messages,
            };
            if let Err(err) = self.iod_tree.render(ui, &mut rctx) {
                tracing::error!("Tree render error: {err}");
            }
        });

        {
            let rctx = RenderCtx {
                state: &self.state,
                favorites: &self.favorites,
                messages: &mut messages,
            };
            self.load_dialog.render(ctx, &rctx);
        }

        self.render_dialogs(ctx, &mut messages);

        for message in messages {
            self.dispatch(message);
        }

        if self.state.is_loading() {
            ctx.request_repaint_after(Duration::from_millis(100));
        }
    }
}
