//! Outcome accounting for best-effort batch procedures.
//!
//! A batch iterates a filtered entity set and performs one write per entity.
//! A failure on one entity is recorded and the loop moves on; nothing is
//! rolled back. The report is what a job returns and what gets logged.

use std::fmt;

use serde::Serialize;

/// What happened to a single entity in a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemOutcome {
    /// The entity was written or a record was created for it.
    Affected,
    /// The entity already had what the batch would create (idempotent skip).
    Skipped,
}

/// Per-run counters for a batch procedure.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BatchReport {
    pub affected: u32,
    pub skipped: u32,
    pub failed: u32,
}

impl BatchReport {
    /// Fold one item's result into the report.
    pub fn record<E>(&mut self, result: &Result<ItemOutcome, E>) {
        match result {
            Ok(ItemOutcome::Affected) => self.affected += 1,
            Ok(ItemOutcome::Skipped) => self.skipped += 1,
            Err(_) => self.failed += 1,
        }
    }

    /// Number of entities the batch looked at.
    pub fn total(&self) -> u32 {
        self.affected + self.skipped + self.failed
    }

    /// Combine two reports (e.g. one per school or per page).
    pub fn merge(self, other: BatchReport) -> BatchReport {
        BatchReport {
            affected: self.affected + other.affected,
            skipped: self.skipped + other.skipped,
            failed: self.failed + other.failed,
        }
    }
}

impl fmt::Display for BatchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} affected, {} skipped, {} failed",
            self.affected, self.skipped, self.failed
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failures_are_counted_not_propagated() {
        let results: Vec<Result<ItemOutcome, String>> = vec![
            Ok(ItemOutcome::Affected),
            Err("row locked".into()),
            Ok(ItemOutcome::Skipped),
            Ok(ItemOutcome::Affected),
        ];
        let mut report = BatchReport::default();
        for r in &results {
            report.record(r);
        }
        assert_eq!(
            report,
            BatchReport {
                affected: 2,
                skipped: 1,
                failed: 1
            }
        );
        assert_eq!(report.total(), 4);
    }

    #[test]
    fn merge_adds_fieldwise() {
        let a = BatchReport { affected: 1, skipped: 2, failed: 0 };
        let b = BatchReport { affected: 3, skipped: 0, failed: 1 };
        assert_eq!(a.merge(b), BatchReport { affected: 4, skipped: 2, failed: 1 });
    }

    #[test]
    fn display_is_log_friendly() {
        let r = BatchReport { affected: 5, skipped: 1, failed: 0 };
        assert_eq!(r.to_string(), "5 affected, 1 skipped, 0 failed");
    }
}
