//! Builder for creating and configuring DataStore instances.

use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use log::debug;
use tokio::fs;
use tokio_util::sync::CancellationToken;

use super::{PlanRepository, Repository, WorkoutRepository};
use crate::{
    error::{Result, StorageError},
    maintenance::Maintenance,
    retry::RetryOptions,
    store::{FileStore, KeyLocks, KeyValueStore},
};

/// Entry point to the data layer: every repository plus maintenance, all
/// sharing one store, one lock registry and one cancellation token.
pub struct DataStore {
    store: Arc<dyn KeyValueStore>,
    plans: PlanRepository,
    workouts: WorkoutRepository,
    maintenance: Maintenance,
    cancel: CancellationToken,
}

impl DataStore {
    /// Plan repository.
    pub fn plans(&self) -> &PlanRepository {
        &self.plans
    }

    /// Workout repository.
    pub fn workouts(&self) -> &WorkoutRepository {
        &self.workouts
    }

    /// Storage maintenance utilities.
    pub fn maintenance(&self) -> &Maintenance {
        &self.maintenance
    }

    /// The underlying key-value store.
    pub fn store(&self) -> &Arc<dyn KeyValueStore> {
        &self.store
    }

    /// Abandon every pending retry loop.
    ///
    /// Operations currently waiting out a backoff return
    /// [`StorageError::Cancelled`]; new operations fail the same way.
    pub fn shutdown(&self) {
        self.cancel.cancel();
    }

    /// Whether [`shutdown`](Self::shutdown) has been called.
    pub fn is_shut_down(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

/// Builder for creating and configuring DataStore instances.
#[derive(Clone, Default)]
pub struct DataStoreBuilder {
    data_dir: Option<PathBuf>,
    store: Option<Arc<dyn KeyValueStore>>,
    retry_options: RetryOptions,
    cancel: Option<CancellationToken>,
}

impl DataStoreBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a custom data directory for the file-backed store.
    ///
    /// If not specified, uses XDG Base Directory specification:
    /// `$XDG_DATA_HOME/liftlog/store` or `~/.local/share/liftlog/store`
    pub fn with_data_dir<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.data_dir = Some(path.as_ref().to_path_buf());
        }
        self
    }

    /// Uses `store` instead of a file-backed store.
    pub fn with_store(mut self, store: Arc<dyn KeyValueStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Sets the retry options applied to every storage operation.
    pub fn with_retry_options(mut self, options: RetryOptions) -> Self {
        self.retry_options = options;
        self
    }

    /// Links retry loops to an externally owned cancellation token.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Builds the configured data store.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Configuration` if the retry options are invalid
    /// Returns `StorageError::XdgDirectory` if no default directory can be found
    /// Returns `StorageError::FileSystem` if the data directory cannot be created
    pub async fn build(self) -> Result<DataStore> {
        self.retry_options
            .validate()
            .map_err(|message| StorageError::Configuration { message })?;

        let store = match self.store {
            Some(store) => store,
            None => {
                let data_dir = match self.data_dir {
                    Some(dir) => dir,
                    None => Self::default_data_dir()?,
                };
                fs::create_dir_all(&data_dir)
                    .await
                    .map_err(|e| StorageError::FileSystem {
                        path: data_dir.clone(),
                        source: e,
                    })?;
                debug!("Using file store at {}", data_dir.display());
                Arc::new(FileStore::new(data_dir)) as Arc<dyn KeyValueStore>
            }
        };

        let locks = KeyLocks::new();
        let cancel = self.cancel.unwrap_or_else(CancellationToken::new);
        let options = self.retry_options;

        Ok(DataStore {
            plans: Repository::new(store.clone(), locks.clone(), options.clone(), cancel.clone()),
            workouts: Repository::new(
                store.clone(),
                locks.clone(),
                options.clone(),
                cancel.clone(),
            ),
            maintenance: Maintenance::new(store.clone(), locks, options, cancel.clone()),
            store,
            cancel,
        })
    }

    /// Returns the default data directory following XDG Base Directory
    /// specification.
    fn default_data_dir() -> Result<PathBuf> {
        xdg::BaseDirectories::with_prefix("liftlog")
            .create_data_directory("store")
            .map_err(|e| StorageError::XdgDirectory(e.to_string()))
    }
}
