//! Executes parsed commands against a [`DataStore`].

use anyhow::{bail, Context, Result};
use liftlog_core::{
    display::{OperationStatus, Plans, RemoveResult, SaveResult},
    DataStore, Plan, PlanQuery,
};
use log::debug;

use crate::{
    cli::{PlanCommands, StorageCommands},
    renderer::TerminalRenderer,
};

/// Runs commands and renders their results.
pub struct Handler {
    data: DataStore,
    renderer: TerminalRenderer,
}

impl Handler {
    pub fn new(data: DataStore, renderer: TerminalRenderer) -> Self {
        Self { data, renderer }
    }

    pub async fn handle_plan_command(&self, command: PlanCommands) -> Result<()> {
        match command {
            PlanCommands::List(args) => {
                let plans = self
                    .data
                    .plans()
                    .get_all_for_user(&args.user_id)
                    .await
                    .context("Failed to list plans")?;
                self.renderer.render(&Plans(plans).to_string());
            }
            PlanCommands::Show(args) => {
                let Some(plan) = self
                    .data
                    .plans()
                    .get(&args.user_id, &args.id)
                    .await
                    .context("Failed to load plan")?
                else {
                    bail!("Plan {} not found for user {}", args.id, args.user_id);
                };
                self.renderer.render(&plan.to_string());
            }
            PlanCommands::Save(args) => {
                let contents = tokio::fs::read_to_string(&args.file)
                    .await
                    .with_context(|| format!("Failed to read {}", args.file.display()))?;
                let mut plan: Plan = serde_json::from_str(&contents)
                    .with_context(|| format!("{} is not a valid plan", args.file.display()))?;
                plan.touch();
                debug!("Saving plan {} for {}", plan.id, args.user_id);

                let outcome = self
                    .data
                    .plans()
                    .save(&args.user_id, &plan)
                    .await
                    .context("Failed to save plan")?;
                self.renderer
                    .render(&SaveResult::new(plan, outcome).to_string());
            }
            PlanCommands::Remove(args) => {
                let removed = self
                    .data
                    .plans()
                    .remove(&args.user_id, &args.id)
                    .await
                    .context("Failed to remove plan")?;
                self.renderer
                    .render(&RemoveResult::new("plan", args.id, removed).to_string());
            }
            PlanCommands::Search(args) => {
                let user_id = args.user_id.clone();
                let query = PlanQuery::from(args);
                let plans = self
                    .data
                    .plans()
                    .search(&user_id, &query)
                    .await
                    .context("Failed to search plans")?;
                self.renderer.render(&Plans(plans).to_string());
            }
            PlanCommands::Stats(args) => {
                let stats = self.data.plans().statistics(&args.user_id).await;
                self.renderer.render(&stats.to_string());
            }
            PlanCommands::Clear(args) => {
                self.data
                    .plans()
                    .clear_all_for_user(&args.user_id)
                    .await
                    .context("Failed to clear plans")?;
                self.renderer.render(
                    &OperationStatus::success(format!("Cleared plans of {}", args.user_id))
                        .to_string(),
                );
            }
        }
        Ok(())
    }

    pub async fn handle_storage_command(&self, command: StorageCommands) -> Result<()> {
        let maintenance = self.data.maintenance();
        match command {
            StorageCommands::Usage => {
                let usage = maintenance
                    .usage_report()
                    .await
                    .context("Failed to compute storage usage")?;
                self.renderer.render(&usage.to_string());
            }
            StorageCommands::Scan => {
                let report = maintenance
                    .integrity_scan()
                    .await
                    .context("Failed to scan storage")?;
                self.renderer.render(&report.to_string());
            }
            StorageCommands::Report => {
                let report = maintenance
                    .system_report()
                    .await
                    .context("Failed to build storage report")?;
                self.renderer.render(&report);
            }
            StorageCommands::ClearUser(args) => {
                let report = maintenance
                    .clear_user_data(&args.user_id)
                    .await
                    .context("Failed to clear user data")?;
                self.renderer.render(&report.to_string());
                if !report.is_complete() {
                    bail!("Some data of {} could not be removed", args.user_id);
                }
            }
            StorageCommands::ClearAll(args) => {
                if !args.confirm {
                    self.renderer.render(
                        &OperationStatus::failure(
                            "Refusing to delete all data without --confirm",
                        )
                        .to_string(),
                    );
                    bail!("Deletion not confirmed");
                }
                let report = maintenance
                    .clear_all_data()
                    .await
                    .context("Failed to clear storage")?;
                self.renderer.render(&report.to_string());
                if !report.is_complete() {
                    bail!("Some keys could not be removed");
                }
            }
        }
        Ok(())
    }
}
