//! Shared UI state, confined to the UI thread.

use std::collections::HashMap;

use dcmspec_explorer_core::store::ProgressStatus;
use dcmspec_explorer_core::{IodEntry, IodList, SpecNode};

use crate::tree::Sort;

#[derive(Debug, Default)]
pub struct AppState {
    // IOD list
    pub entries: Vec<IodEntry>,
    /// DICOM standard version of the loaded list.
    pub version: Option<String>,

    // Filtering and sorting
    pub search_text: String,
    pub sort: Option<Sort>,
    pub favorites_only: bool,

    // Selection
    pub selected_table_id: Option<String>,
    /// Slash path of the selected node inside a loaded model.
    pub selected_node_path: Option<String>,

    /// Expanded IOD models keyed by table id.
    pub models: HashMap<String, SpecNode>,

    // Feedback surfaces
    pub status: String,
    pub error: Option<String>,
    pub startup_warnings: Vec<String>,

    // In-flight loads
    pub list_loading: bool,
    /// Table id of the model load in flight, if any.
    pub model_loading: Option<String>,
    pub load_progress: HashMap<ProgressStatus, i32>,
}

impl AppState {
    pub fn new(startup_warnings: Vec<String>, favorites_only: bool) -> Self {
        Self {
            favorites_only,
            startup_warnings,
            ..Default::default()
        }
    }

    /// Install a freshly loaded IOD list.
    pub fn set_iod_list(&mut self, list: IodList) {
        self.version = Some(list.version);
        self.entries = list.iods;
        self.list_loading = false;
        self.status = format!("Loaded {} IOD modules.", self.entries.len());
    }

    pub fn model_for_selection(&self) -> Option<&SpecNode> {
        self.models.get(self.selected_table_id.as_deref()?)
    }

    /// The node the detail panel should describe, if one is selected.
    pub fn selected_node(&self) -> Option<&SpecNode> {
        let model = self.model_for_selection()?;
        model.find(self.selected_node_path.as_deref()?)
    }

    pub fn selected_entry(&self) -> Option<&IodEntry> {
        let table_id = self.selected_table_id.as_deref()?;
        self.entries.iter().find(|entry| entry.table_id == table_id)
    }

    pub fn is_loading(&self) -> bool {
        self.list_loading || self.model_loading.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dcmspec_explorer_core::IodKind;

    fn entry(name: &str, table_id: &str) -> IodEntry {
        IodEntry {
            name: name.to_string(),
            table_id: table_id.to_string(),
            table_url: String::new(),
            kind: IodKind::classify(table_id),
        }
    }

    #[test]
    fn start_in_favorites_view_preenables_the_filter() {
        let state = AppState::new(Vec::new(), true);
        assert!(state.favorites_only);
        assert!(state.startup_warnings.is_empty());

        let state = AppState::new(vec!["bad config".to_string()], false);
        assert!(!state.favorites_only);
        assert_eq!(state.startup_warnings.len(), 1);
    }

    #[test]
    fn set_iod_list_updates_status_and_version() {
        let mut state = AppState::default();
        state.list_loading = true;
        state.set_iod_list(IodList {
            version: "2025b".to_string(),
            iods: vec![entry("CT Image", "table_A.3-1"), entry("US Image", "table_A.6-1")],
        });

        assert!(!state.list_loading);
        assert_eq!(state.version.as_deref(), Some("2025b"));
        assert_eq!(state.status, "Loaded 2 IOD modules.");
    }

    #[test]
    fn selected_node_resolves_through_loaded_model() {
        let mut state = AppState::default();
        state.entries = vec![entry("US Image", "table_A.6-1")];
        state.selected_table_id = Some("table_A.6-1".to_string());

        let model: SpecNode = serde_json::from_str(
            r#"{"name": "US Image IOD", "children": [{"name": "Patient", "module": "Patient"}]}"#,
        )
        .unwrap();
        state.models.insert("table_A.6-1".to_string(), model);
        state.selected_node_path = Some("US Image IOD/Patient".to_string());

        let node = state.selected_node().unwrap();
        assert_eq!(node.name, "Patient");
        assert_eq!(state.selected_entry().unwrap().name, "US Image");
    }
}
