//! Markdown rendering for models, repository results and reports.
//!
//! Domain types get direct `Display` implementations; collections and
//! operation outcomes go through small wrapper types so each output context
//! can pick its framing.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │  Domain Models  │    │ Wrappers &      │    │   Markdown      │
//! │  (Plan, Report) │───▶│ Result Types    │───▶│   Output        │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`collections`]: collection wrappers ([`Plans`], [`Workouts`])
//! - [`results`]: repository outcomes ([`SaveResult`], [`RemoveResult`])
//! - [`reports`]: statistics and maintenance reports
//! - [`status`]: confirmation messages ([`OperationStatus`])
//! - [`datetime`]: timestamp formatting
//! - [`models`]: Display implementations for domain models
//!
//! ## Usage
//!
//! ```rust
//! use liftlog_core::{
//!     display::{Plans, SaveResult},
//!     models::Plan,
//!     repository::SaveOutcome,
//! };
//!
//! let plan = Plan::new("p1", "Push Pull Legs", "u1");
//!
//! let saved = SaveResult::new(plan.clone(), SaveOutcome::Inserted);
//! assert!(saved.to_string().contains("Saved new plan p1"));
//!
//! let listing = Plans(vec![plan]).to_string();
//! assert!(listing.contains("## Push Pull Legs (ID: p1)"));
//! assert_eq!(Plans(vec![]).to_string(), "No plans found.\n");
//! ```

pub mod collections;
pub mod datetime;
pub mod models;
pub mod reports;
pub mod results;
pub mod status;

pub use collections::{Plans, Workouts};
pub use datetime::{LocalDateTime, SessionLength};
pub use results::{RemoveResult, SaveResult};
pub use status::OperationStatus;
