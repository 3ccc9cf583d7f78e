//! Display implementations for statistics and maintenance reports.

use std::fmt;

use super::datetime::LocalDateTime;
use crate::{
    maintenance::{
        ClearReport, IntegrityIssue, IntegrityReport, IssueKind, SystemReport, UsageReport,
    },
    models::PlanStatistics,
};

/// Human-readable byte count.
fn human_bytes(bytes: usize) -> String {
    const KIB: f64 = 1024.0;
    let value = bytes as f64;
    if value < KIB {
        format!("{bytes} B")
    } else if value < KIB * KIB {
        format!("{:.1} KiB", value / KIB)
    } else {
        format!("{:.1} MiB", value / (KIB * KIB))
    }
}

impl fmt::Display for PlanStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# Plan statistics")?;
        writeln!(f)?;
        writeln!(f, "- Plans: {}", self.total_plans)?;
        writeln!(f, "- Exercises: {}", self.total_exercises)?;
        writeln!(f, "- Average days per plan: {:.1}", self.average_days)?;
        match self.average_rating {
            Some(rating) => writeln!(f, "- Average rating: {rating:.1}")?,
            None => writeln!(f, "- Average rating: n/a")?,
        }

        for (title, counts) in [("Difficulty", &self.by_difficulty), ("Type", &self.by_type)] {
            if counts.is_empty() {
                continue;
            }
            writeln!(f)?;
            writeln!(f, "## By {}", title.to_lowercase())?;
            writeln!(f)?;
            writeln!(f, "| {title} | Plans |")?;
            writeln!(f, "|---|---:|")?;
            for (name, count) in counts {
                writeln!(f, "| {name} | {count} |")?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for UsageReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} key(s), {} total",
            self.key_count,
            human_bytes(self.total_bytes)
        )?;
        if self.keys.is_empty() {
            return Ok(());
        }

        writeln!(f)?;
        writeln!(f, "| Key | Size |")?;
        writeln!(f, "|---|---:|")?;
        for usage in &self.keys {
            writeln!(f, "| {} | {} |", usage.key, human_bytes(usage.bytes))?;
        }

        writeln!(f)?;
        for (collection, bytes) in &self.by_collection {
            writeln!(f, "- {collection}: {}", human_bytes(*bytes))?;
        }
        Ok(())
    }
}

impl fmt::Display for ClearReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Removed {} key(s)", self.removed.len())?;
        if !self.failed.is_empty() {
            writeln!(f)?;
            writeln!(f, "Failed to remove {} key(s):", self.failed.len())?;
            for failure in &self.failed {
                writeln!(f, "- {}: {}", failure.key, failure.error)?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for IntegrityIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            IssueKind::Corrupted => {
                write!(f, "{}: corrupted {} data", self.user_id, self.collection)
            }
            IssueKind::InvalidRecords(count) => write!(
                f,
                "{}: {count} invalid {} record(s)",
                self.user_id, self.collection
            ),
            IssueKind::DuplicateRecords(count) => write!(
                f,
                "{}: {count} duplicate {} record(s)",
                self.user_id, self.collection
            ),
            IssueKind::Unreadable => {
                write!(f, "{}: unreadable {} data", self.user_id, self.collection)
            }
        }
    }
}

impl fmt::Display for IntegrityReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Scanned {} collection(s) of {} user(s)",
            self.collections_scanned,
            self.users.len()
        )?;
        if self.is_healthy() {
            return writeln!(f, "No issues found.");
        }

        writeln!(f)?;
        for issue in &self.issues {
            writeln!(f, "- {issue}")?;
        }
        Ok(())
    }
}

impl fmt::Display for SystemReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# Storage report")?;
        writeln!(f)?;
        writeln!(f, "Generated {}", LocalDateTime::new(&self.generated_at))?;
        writeln!(f)?;
        writeln!(f, "## Usage")?;
        writeln!(f)?;
        write!(f, "{}", self.usage)?;
        writeln!(f)?;
        writeln!(f, "## Integrity")?;
        writeln!(f)?;
        write!(f, "{}", self.integrity)
    }
}
