//! Subcommand arguments and their conversion to core types.
//!
//! Arguments carry clap attributes and nothing else; anything the core
//! needs is produced through a `From` conversion so core types stay free of
//! CLI concerns.

use std::path::PathBuf;

use clap::{Args, Subcommand};
use liftlog_core::{Difficulty, PlanQuery, PlanType};

/// A user's whole plan collection.
#[derive(Args)]
pub struct UserArgs {
    /// Owner of the plans
    pub user_id: String,
}

/// One plan of a user.
#[derive(Args)]
pub struct PlanRefArgs {
    /// Owner of the plan
    pub user_id: String,
    /// Identifier of the plan
    pub id: String,
}

/// Insert or replace a plan from a JSON file
///
/// The file holds a single plan in the stored format (camelCase fields,
/// RFC 3339 timestamps). Its `userId` must match the given user. Saving
/// bumps `updatedAt`.
#[derive(Args)]
pub struct SavePlanArgs {
    /// Owner of the plan
    pub user_id: String,
    /// Path of the plan JSON file
    pub file: PathBuf,
}

/// Search a user's plans
///
/// All given filters must match. Without filters every plan is listed.
#[derive(Args)]
pub struct SearchPlansArgs {
    /// Owner of the plans
    pub user_id: String,

    #[arg(short, long, help = "Case-insensitive text matched against name and description")]
    pub query: Option<String>,

    #[arg(short, long, help = "Tag the plan must carry (case-insensitive)")]
    pub tag: Option<String>,

    #[arg(short, long, help = "beginner, intermediate or advanced")]
    pub difficulty: Option<Difficulty>,

    #[arg(long = "type", help = "strength, hypertrophy, cardio, endurance, flexibility or mixed")]
    pub plan_type: Option<PlanType>,
}

impl From<SearchPlansArgs> for PlanQuery {
    fn from(val: SearchPlansArgs) -> Self {
        PlanQuery {
            text: val.query,
            tag: val.tag,
            difficulty: val.difficulty,
            plan_type: val.plan_type,
        }
    }
}

#[derive(Subcommand)]
pub enum PlanCommands {
    /// List a user's plans
    #[command(aliases = ["l", "ls"])]
    List(UserArgs),
    /// Show one plan with all its days
    #[command(alias = "s")]
    Show(PlanRefArgs),
    /// Insert or replace a plan from a JSON file
    Save(SavePlanArgs),
    /// Remove one plan
    #[command(aliases = ["rm"])]
    Remove(PlanRefArgs),
    /// Search a user's plans
    #[command(alias = "f")]
    Search(SearchPlansArgs),
    /// Show statistics over a user's plans
    Stats(UserArgs),
    /// Remove every plan of a user
    Clear(UserArgs),
}

/// Delete every key in the store
#[derive(Args)]
pub struct ClearAllArgs {
    /// Confirm the deletion (required to prevent accidental data loss)
    #[arg(long)]
    pub confirm: bool,
}

#[derive(Subcommand)]
pub enum StorageCommands {
    /// Show how much space each key takes
    Usage,
    /// Check every stored collection for corruption
    Scan,
    /// Usage and integrity as one report
    Report,
    /// Delete all data of one user
    ClearUser(UserArgs),
    /// Delete all data of every user
    ClearAll(ClearAllArgs),
}
