//! Core library for the LiftLog fitness tracker.
//!
//! This crate is the local-first data layer: it persists each user's plans
//! and workouts in a key-value store, keeps that data readable when parts of
//! it are corrupt, and retries transient storage and network failures.
//!
//! # Architecture
//!
//! - **Store** ([`store`]): the [`KeyValueStore`] trait with file-backed and
//!   in-memory implementations, plus per-key locking
//! - **Retry** ([`retry`]): capped exponential backoff shared by storage and
//!   network calls
//! - **Validation** ([`validate`]): structural checks applied on every read
//!   and before every write
//! - **Repositories** ([`repository`]): per-user collections with
//!   self-healing reads
//! - **Maintenance** ([`maintenance`]): usage, bulk deletion and integrity
//!   scans
//! - **Network** ([`network`]): failure classification and a retrying client
//! - **Display** ([`display`]): markdown output for the CLI
//!
//! # Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use liftlog_core::{DataStoreBuilder, MemoryStore, Plan};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let data = DataStoreBuilder::new()
//!     .with_store(Arc::new(MemoryStore::new()))
//!     .build()
//!     .await?;
//!
//! let plan = Plan::new("p1", "Starting Strength", "u1");
//! data.plans().save("u1", &plan).await?;
//!
//! let plans = data.plans().get_all_for_user("u1").await?;
//! assert_eq!(plans.len(), 1);
//! # Ok(())
//! # }
//! ```

pub mod display;
pub mod error;
pub mod maintenance;
pub mod models;
pub mod network;
pub mod repository;
pub mod retry;
pub mod store;
pub mod validate;

// Re-export commonly used types
pub use display::{OperationStatus, Plans, RemoveResult, SaveResult, Workouts};
pub use error::{Result, StorageError};
pub use maintenance::{ClearReport, IntegrityReport, Maintenance, SystemReport, UsageReport};
pub use models::{
    Difficulty, Plan, PlanDay, PlanExercise, PlanQuery, PlanStatistics, PlanType, Workout,
};
pub use network::{NetworkError, NetworkErrorClassifier, NetworkErrorKind, ResilientClient};
pub use repository::{
    DataStore, DataStoreBuilder, PlanRepository, SaveOutcome, WorkoutRepository,
};
pub use retry::{run_with_retry, Cancelled, RetryOptions, RetryPolicy};
pub use store::{Collection, FileStore, KeyValueStore, MemoryStore};
pub use tokio_util::sync::CancellationToken;
