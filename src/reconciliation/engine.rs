//! Main reconciliation orchestrator coordinating normalization, matching,
//! aggregation and persistence

use tracing::info;
use uuid::Uuid;

use crate::reconciliation::aggregate::aggregate;
use crate::reconciliation::config::MatchConfig;
use crate::reconciliation::matcher::reconcile;
use crate::reconciliation::normalize::normalize_batch;
use crate::traits::*;
use crate::types::*;
use crate::utils::validation::validate_run_id;

/// Reconciliation engine tying the pipeline to a storage backend
///
/// The engine holds no state between runs beyond its configuration and the
/// storage handle, so distinct runs (distinct `run_id`s) may be executed
/// concurrently on separate engine instances sharing a storage backend.
pub struct ReconciliationEngine<S: ReconciliationStorage> {
    storage: S,
    config: MatchConfig,
    validator: Box<dyn OutcomeValidator>,
}

impl<S: ReconciliationStorage> ReconciliationEngine<S> {
    /// Create an engine with the default matching configuration
    pub fn new(storage: S) -> Self {
        Self::with_config(storage, MatchConfig::default())
    }

    /// Create an engine with an explicit matching configuration
    pub fn with_config(storage: S, config: MatchConfig) -> Self {
        Self {
            storage,
            config,
            validator: Box::new(DefaultOutcomeValidator),
        }
    }

    /// Create an engine with a custom outcome validator
    pub fn with_validator(
        storage: S,
        config: MatchConfig,
        validator: Box<dyn OutcomeValidator>,
    ) -> Self {
        Self {
            storage,
            config,
            validator,
        }
    }

    /// The active matching configuration
    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Execute one reconciliation run over a pair of raw record batches
    ///
    /// When `run_id` is `None` the engine generates one. Re-running under an
    /// existing `run_id` supersedes that run's previously stored outcomes.
    /// The run either completes with a full outcome set persisted, or fails
    /// with nothing stored: configuration problems, an empty side after
    /// normalization, and oversized batches all abort before any write.
    pub async fn run(
        &mut self,
        run_id: Option<String>,
        bank_rows: &[RawRecord],
        ledger_rows: &[RawRecord],
    ) -> ReconResult<RunReport> {
        self.config.validate()?;

        let run_id = match run_id {
            Some(id) => {
                validate_run_id(&id)?;
                id
            }
            None => Uuid::new_v4().to_string(),
        };

        self.check_batch_size(BatchSide::Bank, bank_rows.len())?;
        self.check_batch_size(BatchSide::Ledger, ledger_rows.len())?;

        let (bank_records, rejected_bank) = normalize_batch(bank_rows);
        let (ledger_records, rejected_ledger) = normalize_batch(ledger_rows);

        if bank_records.is_empty() {
            return Err(ReconError::EmptyBatch(BatchSide::Bank));
        }
        if ledger_records.is_empty() {
            return Err(ReconError::EmptyBatch(BatchSide::Ledger));
        }

        let match_outcome = reconcile(bank_records, ledger_records, &self.config);

        let computed_at = chrono::Utc::now().naive_utc();
        let (outcomes, summary) = aggregate(match_outcome, &run_id, computed_at);

        for outcome in &outcomes {
            self.validator.validate_outcome(outcome)?;
        }

        self.storage.save_run(&summary, &outcomes).await?;

        info!(
            run_id = %run_id,
            matched = summary.matched,
            unmatched_bank = summary.unmatched_bank,
            unmatched_ledger = summary.unmatched_ledger,
            rejected_bank = rejected_bank.len(),
            rejected_ledger = rejected_ledger.len(),
            "reconciliation run complete"
        );

        Ok(RunReport {
            run_id,
            summary,
            outcomes,
            rejected_bank,
            rejected_ledger,
        })
    }

    /// Get the stored outcomes of a prior run
    pub async fn get_outcomes(&self, run_id: &str) -> ReconResult<Vec<ReconciliationOutcome>> {
        self.storage
            .get_outcomes(run_id)
            .await?
            .ok_or_else(|| ReconError::RunNotFound(run_id.to_string()))
    }

    /// Get the stored summary of a prior run
    pub async fn get_summary(&self, run_id: &str) -> ReconResult<RunSummary> {
        self.storage
            .get_summary(run_id)
            .await?
            .ok_or_else(|| ReconError::RunNotFound(run_id.to_string()))
    }

    /// List summaries of all stored runs, oldest first
    pub async fn list_runs(&self) -> ReconResult<Vec<RunSummary>> {
        self.storage.list_runs().await
    }

    /// Delete a stored run and its outcomes
    pub async fn delete_run(&mut self, run_id: &str) -> ReconResult<()> {
        self.storage.delete_run(run_id).await
    }

    fn check_batch_size(&self, side: BatchSide, count: usize) -> ReconResult<()> {
        if count > self.config.max_batch_records {
            return Err(ReconError::BatchTooLarge {
                side,
                count,
                limit: self.config.max_batch_records,
            });
        }
        Ok(())
    }
}
