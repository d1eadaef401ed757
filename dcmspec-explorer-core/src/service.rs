//! Background loading of IOD lists and models.
//!
//! Store calls can be slow (the library may hit the network when its cache
//! is cold), so they never run on the UI thread. Each load spawns a worker
//! thread that reports progress and the outcome over a channel the UI polls
//! once per frame.

use std::sync::Arc;
use std::thread;

use crossbeam_channel::{unbounded, Receiver, Sender};

use crate::model::{IodList, SpecNode};
use crate::store::{Progress, SpecStore};

/// Events a loader worker emits toward the UI thread.
#[derive(Debug, Clone)]
pub enum LoadEvent {
    Progress(Progress),
    ListLoaded(IodList),
    ModelLoaded { table_id: String, model: SpecNode },
    Failed(String),
}

/// Spawns worker threads running store operations.
#[derive(Clone)]
pub struct SpecLoader {
    store: Arc<dyn SpecStore>,
}

impl SpecLoader {
    pub fn new(store: Arc<dyn SpecStore>) -> Self {
        Self { store }
    }

    /// Load the IOD list on a worker thread.
    pub fn spawn_list_load(&self, force_refresh: bool) -> Receiver<LoadEvent> {
        let (tx, rx) = unbounded();
        let store = self.store.clone();
        thread::spawn(move || {
            tracing::debug!("IOD list worker started");
            let progress = progress_forwarder(tx.clone());
            let event = match store.load_iod_list(force_refresh, &progress) {
                Ok(list) => LoadEvent::ListLoaded(list),
                Err(err) => {
                    tracing::error!("Failed to load IOD list: {err}");
                    LoadEvent::Failed(err.to_string())
                }
            };
            // The receiver may already be gone if the app shut down.
            let _ = tx.send(event);
        });
        rx
    }

    /// Load one expanded IOD model on a worker thread.
    pub fn spawn_model_load(&self, table_id: String) -> Receiver<LoadEvent> {
        let (tx, rx) = unbounded();
        let store = self.store.clone();
        thread::spawn(move || {
            tracing::debug!("IOD model worker started for {table_id}");
            let progress = progress_forwarder(tx.clone());
            let event = match store.load_iod_model(&table_id, &progress) {
                Ok(model) => LoadEvent::ModelLoaded { table_id, model },
                Err(err) => {
                    tracing::error!("Failed to load IOD model: {err}");
                    LoadEvent::Failed(err.to_string())
                }
            };
            let _ = tx.send(event);
        });
        rx
    }
}

fn progress_forwarder(tx: Sender<LoadEvent>) -> impl Fn(Progress) + Send + Sync {
    move |progress| {
        let _ = tx.send(LoadEvent::Progress(progress));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{IodEntry, IodKind};
    use crate::store::{ProgressFn, ProgressStatus};
    use crate::{Error, Result};
    use std::time::Duration;

    struct FakeStore {
        fail: bool,
    }

    impl SpecStore for FakeStore {
        fn load_iod_list(&self, _force_refresh: bool, progress: ProgressFn) -> Result<IodList> {
            progress(Progress::new(50, ProgressStatus::ParsingModuleList));
            if self.fail {
                return Err(Error::Config("boom".to_string()));
            }
            Ok(IodList {
                version: "2025b".to_string(),
                iods: vec![IodEntry {
                    name: "US Image".to_string(),
                    table_id: "table_A.6-1".to_string(),
                    table_url: String::new(),
                    kind: IodKind::Composite,
                }],
            })
        }

        fn load_iod_model(&self, table_id: &str, _progress: ProgressFn) -> Result<SpecNode> {
            if self.fail {
                return Err(Error::Config("boom".to_string()));
            }
            Ok(SpecNode {
                name: table_id.to_string(),
                ..Default::default()
            })
        }
    }

    fn drain(rx: Receiver<LoadEvent>) -> Vec<LoadEvent> {
        let mut events = Vec::new();
        while let Ok(event) = rx.recv_timeout(Duration::from_secs(5)) {
            let done = matches!(
                event,
                LoadEvent::ListLoaded(_) | LoadEvent::ModelLoaded { .. } | LoadEvent::Failed(_)
            );
            events.push(event);
            if done {
                break;
            }
        }
        events
    }

    #[test]
    fn list_load_emits_progress_then_result() {
        let loader = SpecLoader::new(Arc::new(FakeStore { fail: false }));
        let events = drain(loader.spawn_list_load(false));

        assert!(matches!(events.first(), Some(LoadEvent::Progress(p)) if p.percent == 50));
        match events.last() {
            Some(LoadEvent::ListLoaded(list)) => assert_eq!(list.iods.len(), 1),
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn store_error_arrives_as_failed_event() {
        let loader = SpecLoader::new(Arc::new(FakeStore { fail: true }));
        let events = drain(loader.spawn_list_load(false));
        assert!(matches!(events.last(), Some(LoadEvent::Failed(msg)) if msg.contains("boom")));
    }

    #[test]
    fn model_load_carries_table_id() {
        let loader = SpecLoader::new(Arc::new(FakeStore { fail: false }));
        let events = drain(loader.spawn_model_load("table_A.6-1".to_string()));
        match events.last() {
            Some(LoadEvent::ModelLoaded { table_id, model }) => {
                assert_eq!(table_id, "table_A.6-1");
                assert_eq!(model.name, "table_A.6-1");
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }
}
