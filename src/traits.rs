//! Traits for storage abstraction and extensibility

use async_trait::async_trait;

use crate::types::*;

/// Storage abstraction for reconciliation results
///
/// This trait allows the reconciliation core to work with any storage backend
/// (PostgreSQL, MySQL, SQLite, in-memory, etc.) by implementing these methods.
///
/// Implementations must treat [`save_run`](ReconciliationStorage::save_run)
/// as atomic: either the full outcome set for a run is persisted, or nothing
/// is. Saving under an existing `run_id` supersedes the previous outcomes for
/// that run; outcomes of other runs are never touched.
#[async_trait]
pub trait ReconciliationStorage: Send + Sync {
    /// Persist the complete outcome set and summary for one run,
    /// replacing any prior results stored under the same `run_id`
    async fn save_run(
        &mut self,
        summary: &RunSummary,
        outcomes: &[ReconciliationOutcome],
    ) -> ReconResult<()>;

    /// Get all outcomes for a run, in the order they were produced
    async fn get_outcomes(&self, run_id: &str) -> ReconResult<Option<Vec<ReconciliationOutcome>>>;

    /// Get the summary for a run
    async fn get_summary(&self, run_id: &str) -> ReconResult<Option<RunSummary>>;

    /// List summaries of all stored runs, oldest first
    async fn list_runs(&self) -> ReconResult<Vec<RunSummary>>;

    /// Delete a run and its outcomes
    async fn delete_run(&mut self, run_id: &str) -> ReconResult<()>;
}

/// Trait for implementing custom outcome validation rules
///
/// The engine runs every outcome through a validator before handing the set
/// to storage, so a host service can enforce additional constraints without
/// forking the aggregation logic.
pub trait OutcomeValidator: Send + Sync {
    /// Validate a single outcome before persistence
    fn validate_outcome(&self, outcome: &ReconciliationOutcome) -> ReconResult<()>;
}

/// Default validator enforcing the reference-field invariants
///
/// A matched outcome carries both references and a score; an unmatched
/// outcome carries exactly one reference and no score.
pub struct DefaultOutcomeValidator;

impl OutcomeValidator for DefaultOutcomeValidator {
    fn validate_outcome(&self, outcome: &ReconciliationOutcome) -> ReconResult<()> {
        match outcome.disposition {
            Disposition::Matched => {
                if outcome.bank_reference.is_none() || outcome.ledger_reference.is_none() {
                    return Err(ReconError::Validation(
                        "Matched outcome must carry both bank and ledger references".to_string(),
                    ));
                }
                if outcome.match_score.is_none() {
                    return Err(ReconError::Validation(
                        "Matched outcome must carry a match score".to_string(),
                    ));
                }
            }
            Disposition::UnmatchedBank => {
                if outcome.bank_reference.is_none() || outcome.ledger_reference.is_some() {
                    return Err(ReconError::Validation(
                        "Unmatched bank outcome must carry only a bank reference".to_string(),
                    ));
                }
            }
            Disposition::UnmatchedLedger => {
                if outcome.ledger_reference.is_none() || outcome.bank_reference.is_some() {
                    return Err(ReconError::Validation(
                        "Unmatched ledger outcome must carry only a ledger reference".to_string(),
                    ));
                }
            }
        }
        Ok(())
    }
}
