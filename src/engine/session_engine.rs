use rust_decimal::Decimal;
use tracing::debug;

use crate::engine::classifier::classify_rows;
use crate::engine::errors::ProcessError;
use crate::models::{CommissionSummary, SessionPolicy, SessionStats};
use crate::report::parse_report;
use crate::types::{TIER_COUNT, Tier};
use crate::types::currency::parse_amount;

/// Session-scoped commission engine.
///
/// Owns the accumulator for one session. Each `process` call folds a pasted
/// report page into the running totals and returns a fresh summary; `clear`
/// starts the session over. Totals are cumulative across pages until
/// cleared, and an unchanged page is recognized and not counted twice.
pub struct SessionEngine {
    stats: SessionStats,
    policy: SessionPolicy
}

impl SessionEngine {
    pub fn new(policy: SessionPolicy) -> Self {
        Self {
            stats: SessionStats::new(),
            policy
        }
    }

    /// Processes one report page with the current deduction entries.
    ///
    /// Parsing, classification, and deduction parsing all complete before
    /// the accumulator is touched; on any error the session state is exactly
    /// what it was before the call.
    ///
    /// # Errors
    /// Returns `ProcessError` when the report boundary is missing, a row
    /// fails classification, or a deduction entry is not a valid amount.
    pub fn process(&mut self, report_text: &str, deduction_entries: &[String]) -> Result<CommissionSummary, ProcessError> {
        let rows = parse_report(report_text)?;
        let deductions = parse_deductions(deduction_entries)?;

        if self.stats.is_repeat(&rows) {
            debug!("Table unchanged since last process call, skipping re-accumulation");
            self.stats.record_customers(&rows);
        } else {
            let events = classify_rows(&rows, &self.policy)?;

            self.stats.record_customers(&rows);
            self.stats.commit(rows, &events);
        }

        self.stats.set_deductions(deductions);

        Ok(self.stats.summarize(&self.policy))
    }

    /// Resets the session to its starting state.
    pub fn clear(&mut self) {
        self.stats.clear();

        debug!("Session cleared");
    }
}

/// Parses up to [`TIER_COUNT`] positional deduction entries; blank or
/// missing entries mean zero.
fn parse_deductions(entries: &[String]) -> Result<[Decimal; TIER_COUNT], ProcessError> {
    if entries.len() > TIER_COUNT {
        return Err(ProcessError::TooManyDeductions { count: entries.len() });
    }

    let mut deductions = [Decimal::ZERO; TIER_COUNT];

    for (tier, entry) in Tier::ALL.iter().zip(entries) {
        let entry = entry.trim();

        if entry.is_empty() {
            continue;
        }

        deductions[tier.index()] = parse_amount(entry)
            .map_err(|source| ProcessError::Deduction { label: tier.label(), source })?;
    }

    Ok(deductions)
}
