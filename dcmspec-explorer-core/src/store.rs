//! Boundary to the external specification library.
//!
//! The library downloads and parses the DICOM standard and serializes JSON
//! models into a shared cache directory. [`SpecStore`] is the seam the rest
//! of the app talks through; [`JsonModelStore`] is the production
//! implementation reading that cache. Tests substitute their own stores.

use std::fs;
use std::path::{Path, PathBuf};

use crate::model::{IodList, SpecNode};
use crate::{Error, Result};

/// Progress steps reported while a model is being produced, matching the
/// phases the specification library goes through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProgressStatus {
    DownloadingDocument,
    ParsingModuleList,
    ParsingModules,
    SavingModel,
}

impl ProgressStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::DownloadingDocument => "Downloading document",
            Self::ParsingModuleList => "Parsing module list",
            Self::ParsingModules => "Parsing modules",
            Self::SavingModel => "Saving model",
        }
    }
}

/// A progress update; `percent == -1` means indeterminate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Progress {
    pub percent: i32,
    pub status: Option<ProgressStatus>,
}

impl Progress {
    pub fn new(percent: i32, status: ProgressStatus) -> Self {
        Self { percent, status: Some(status) }
    }

    pub fn indeterminate() -> Self {
        Self { percent: -1, status: None }
    }
}

/// Progress callback handed into store operations.
pub type ProgressFn<'a> = &'a (dyn Fn(Progress) + Send + Sync);

/// Access to IOD lists and expanded IOD models.
pub trait SpecStore: Send + Sync {
    /// Load the IOD list. `force_refresh` asks the backing store to bypass
    /// whatever it already has.
    fn load_iod_list(&self, force_refresh: bool, progress: ProgressFn) -> Result<IodList>;

    /// Load the expanded model for one IOD table.
    fn load_iod_model(&self, table_id: &str, progress: ProgressFn) -> Result<SpecNode>;
}

pub const IOD_LIST_FILE_NAME: &str = "iod_list.json";

/// Store reading the JSON models the specification library cached under
/// `<cache_dir>/model/`.
#[derive(Debug, Clone)]
pub struct JsonModelStore {
    cache_dir: PathBuf,
}

impl JsonModelStore {
    pub fn new(cache_dir: impl Into<PathBuf>) -> Self {
        Self { cache_dir: cache_dir.into() }
    }

    fn model_dir(&self) -> PathBuf {
        self.cache_dir.join("model")
    }

    /// Cache path of the expanded model for `table_id`, following the
    /// library's file naming.
    pub fn model_path(&self, table_id: &str) -> PathBuf {
        self.model_dir().join(format!("Part3_{table_id}_expanded.json"))
    }

    pub fn list_path(&self) -> PathBuf {
        self.model_dir().join(IOD_LIST_FILE_NAME)
    }

    fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

impl SpecStore for JsonModelStore {
    fn load_iod_list(&self, _force_refresh: bool, progress: ProgressFn) -> Result<IodList> {
        let path = self.list_path();
        tracing::debug!("Loading IOD list from {}", path.display());
        progress(Progress::new(0, ProgressStatus::ParsingModuleList));

        if !path.is_file() {
            return Err(Error::ListNotCached(path));
        }
        let list: IodList = Self::read_json(&path)?;

        progress(Progress::new(100, ProgressStatus::ParsingModuleList));
        Ok(list)
    }

    fn load_iod_model(&self, table_id: &str, progress: ProgressFn) -> Result<SpecNode> {
        let path = self.model_path(table_id);
        tracing::debug!("Loading IOD model {table_id} from {}", path.display());
        progress(Progress::new(0, ProgressStatus::ParsingModules));

        if !path.is_file() {
            return Err(Error::ModelNotCached {
                table_id: table_id.to_string(),
                path,
            });
        }
        let model: SpecNode = Self::read_json(&path)?;

        progress(Progress::new(100, ProgressStatus::ParsingModules));
        Ok(model)
    }
}
