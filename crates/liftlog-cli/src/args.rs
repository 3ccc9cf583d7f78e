use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand};
use liftlog_core::RetryOptions;

use crate::cli::{PlanCommands, StorageCommands};

/// Command-line access to the LiftLog data layer
///
/// LiftLog keeps each user's workout plans in a local store. This tool lets
/// you inspect, import and remove plans, and check the health of the store
/// itself.
#[derive(Parser)]
#[command(version, about, name = "liftlog")]
pub struct Args {
    /// Directory holding the store. Defaults to $XDG_DATA_HOME/liftlog/store
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(flatten)]
    pub retry: RetryArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Overrides for the storage retry policy.
#[derive(ClapArgs)]
pub struct RetryArgs {
    /// Retries after the first failed attempt
    #[arg(long, global = true)]
    pub max_retries: Option<u32>,

    /// Delay before the first retry, in milliseconds
    #[arg(long, global = true)]
    pub base_delay_ms: Option<u64>,

    /// Upper bound for any retry delay, in milliseconds
    #[arg(long, global = true)]
    pub max_delay_ms: Option<u64>,

    /// Multiplier applied to the delay after each retry
    #[arg(long, global = true)]
    pub backoff_factor: Option<f64>,
}

impl From<RetryArgs> for RetryOptions {
    fn from(val: RetryArgs) -> Self {
        let defaults = RetryOptions::default();
        RetryOptions {
            max_retries: val.max_retries.unwrap_or(defaults.max_retries),
            base_delay_ms: val.base_delay_ms.unwrap_or(defaults.base_delay_ms),
            max_delay_ms: val.max_delay_ms.unwrap_or(defaults.max_delay_ms),
            backoff_factor: val.backoff_factor.unwrap_or(defaults.backoff_factor),
        }
    }
}

/// Available commands
///
/// - `plan`: read and modify one user's plans
/// - `storage`: usage, integrity and bulk deletion across the whole store
#[derive(Subcommand)]
pub enum Commands {
    /// Manage plans
    #[command(alias = "p")]
    Plan {
        #[command(subcommand)]
        command: PlanCommands,
    },
    /// Inspect and maintain the store
    #[command(alias = "s")]
    Storage {
        #[command(subcommand)]
        command: StorageCommands,
    },
}
