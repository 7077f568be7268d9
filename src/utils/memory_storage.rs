//! In-memory storage implementation for testing and development

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::traits::*;
use crate::types::*;

/// In-memory [`ReconciliationStorage`] backed by a shared map
///
/// Cloning yields a handle onto the same underlying store, so an engine and
/// a test can observe the same data. Run insertion order is tracked so
/// [`list_runs`](ReconciliationStorage::list_runs) is deterministic.
#[derive(Debug, Clone)]
pub struct MemoryStorage {
    runs: Arc<RwLock<HashMap<String, StoredRun>>>,
    run_order: Arc<RwLock<Vec<String>>>,
}

#[derive(Debug, Clone)]
struct StoredRun {
    summary: RunSummary,
    outcomes: Vec<ReconciliationOutcome>,
}

impl MemoryStorage {
    /// Create a new memory storage instance
    pub fn new() -> Self {
        Self {
            runs: Arc::new(RwLock::new(HashMap::new())),
            run_order: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Clear all data (useful for testing)
    pub fn clear(&self) {
        self.runs.write().unwrap().clear();
        self.run_order.write().unwrap().clear();
    }
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ReconciliationStorage for MemoryStorage {
    async fn save_run(
        &mut self,
        summary: &RunSummary,
        outcomes: &[ReconciliationOutcome],
    ) -> ReconResult<()> {
        let stored = StoredRun {
            summary: summary.clone(),
            outcomes: outcomes.to_vec(),
        };

        // Single insert under the write lock keeps the run atomic: the full
        // outcome set replaces any prior one, never a partial mix.
        let previous = self
            .runs
            .write()
            .unwrap()
            .insert(summary.run_id.clone(), stored);

        if previous.is_none() {
            self.run_order.write().unwrap().push(summary.run_id.clone());
        }

        Ok(())
    }

    async fn get_outcomes(&self, run_id: &str) -> ReconResult<Option<Vec<ReconciliationOutcome>>> {
        Ok(self
            .runs
            .read()
            .unwrap()
            .get(run_id)
            .map(|run| run.outcomes.clone()))
    }

    async fn get_summary(&self, run_id: &str) -> ReconResult<Option<RunSummary>> {
        Ok(self
            .runs
            .read()
            .unwrap()
            .get(run_id)
            .map(|run| run.summary.clone()))
    }

    async fn list_runs(&self) -> ReconResult<Vec<RunSummary>> {
        let runs = self.runs.read().unwrap();
        let order = self.run_order.read().unwrap();
        Ok(order
            .iter()
            .filter_map(|run_id| runs.get(run_id).map(|run| run.summary.clone()))
            .collect())
    }

    async fn delete_run(&mut self, run_id: &str) -> ReconResult<()> {
        if self.runs.write().unwrap().remove(run_id).is_some() {
            self.run_order.write().unwrap().retain(|id| id != run_id);
            Ok(())
        } else {
            Err(ReconError::RunNotFound(run_id.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn summary(run_id: &str, matched: usize) -> RunSummary {
        RunSummary {
            run_id: run_id.to_string(),
            matched,
            unmatched_bank: 0,
            unmatched_ledger: 0,
            computed_at: NaiveDate::from_ymd_opt(2024, 2, 1)
                .unwrap()
                .and_hms_opt(9, 0, 0)
                .unwrap(),
        }
    }

    #[tokio::test]
    async fn test_save_and_retrieve_run() {
        let mut storage = MemoryStorage::new();
        storage.save_run(&summary("run-1", 3), &[]).await.unwrap();

        let stored = storage.get_summary("run-1").await.unwrap().unwrap();
        assert_eq!(stored.matched, 3);
        assert!(storage.get_outcomes("run-1").await.unwrap().is_some());
        assert!(storage.get_outcomes("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_save_same_run_id_supersedes() {
        let mut storage = MemoryStorage::new();
        storage.save_run(&summary("run-1", 3), &[]).await.unwrap();
        storage.save_run(&summary("run-1", 7), &[]).await.unwrap();

        let stored = storage.get_summary("run-1").await.unwrap().unwrap();
        assert_eq!(stored.matched, 7);
        assert_eq!(storage.list_runs().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_list_runs_preserves_insertion_order() {
        let mut storage = MemoryStorage::new();
        storage.save_run(&summary("run-a", 1), &[]).await.unwrap();
        storage.save_run(&summary("run-b", 2), &[]).await.unwrap();
        storage.save_run(&summary("run-c", 3), &[]).await.unwrap();

        let runs = storage.list_runs().await.unwrap();
        let ids: Vec<&str> = runs.iter().map(|run| run.run_id.as_str()).collect();
        assert_eq!(ids, vec!["run-a", "run-b", "run-c"]);
    }

    #[tokio::test]
    async fn test_delete_run() {
        let mut storage = MemoryStorage::new();
        storage.save_run(&summary("run-1", 1), &[]).await.unwrap();

        storage.delete_run("run-1").await.unwrap();
        assert!(storage.get_summary("run-1").await.unwrap().is_none());
        assert!(storage.list_runs().await.unwrap().is_empty());

        assert!(matches!(
            storage.delete_run("run-1").await,
            Err(ReconError::RunNotFound(_))
        ));
    }
}
