//! Greedy bipartite assignment of bank records to ledger records
//!
//! Each bank record claims at most one ledger record and vice versa. The
//! assignment is greedy best-first rather than globally optimal: a deliberate
//! simplicity/performance tradeoff for bounded upload-sized batches. A
//! maximum-weight bipartite matcher could be substituted behind the same
//! contract, at the cost of different tie-break semantics.

use tracing::debug;

use crate::reconciliation::config::MatchConfig;
use crate::reconciliation::score::composite_score;
use crate::types::{MatchCandidatePair, RecordStatus, TransactionRecord};

/// The three record sets produced by one matching pass
#[derive(Debug, Clone, PartialEq)]
pub struct MatchOutcome {
    /// Bank/ledger pairs whose composite score cleared the threshold
    pub matched: Vec<MatchCandidatePair>,
    /// Bank records with no acceptable ledger candidate
    pub unmatched_bank: Vec<TransactionRecord>,
    /// Ledger records left unclaimed after all bank records were processed
    pub unmatched_ledger: Vec<TransactionRecord>,
}

/// Match two normalized record sets against each other
///
/// Bank records are processed in their batch insertion order, which fixes
/// tie-break behavior and makes the output fully deterministic for a given
/// input order and configuration. For each bank record every still-available
/// ledger record is scored; the strictly highest scorer wins, with ties
/// resolved in favor of the earliest remaining ledger position. A winning
/// candidate at or above `match_threshold` is paired and removed from
/// further consideration; otherwise the bank record goes unmatched and the
/// ledger side is left untouched. O(B x L) score evaluations per run.
pub fn reconcile(
    bank_records: Vec<TransactionRecord>,
    ledger_records: Vec<TransactionRecord>,
    config: &MatchConfig,
) -> MatchOutcome {
    let mut available_ledger = ledger_records;
    let mut matched = Vec::new();
    let mut unmatched_bank = Vec::new();

    for mut bank in bank_records {
        let mut best: Option<(usize, f64)> = None;
        for (index, ledger) in available_ledger.iter().enumerate() {
            let score = composite_score(&bank, ledger, config);
            // Strict `>` keeps the earliest candidate on equal scores
            match best {
                Some((_, best_score)) if score <= best_score => {}
                _ => best = Some((index, score)),
            }
        }

        match best {
            Some((index, score)) if score >= config.match_threshold => {
                let mut ledger = available_ledger.remove(index);
                bank.status = RecordStatus::Matched;
                ledger.status = RecordStatus::Matched;
                matched.push(MatchCandidatePair {
                    bank,
                    ledger,
                    score,
                });
            }
            _ => {
                bank.status = RecordStatus::Unmatched;
                unmatched_bank.push(bank);
            }
        }
    }

    let unmatched_ledger: Vec<TransactionRecord> = available_ledger
        .into_iter()
        .map(|mut ledger| {
            ledger.status = RecordStatus::Unmatched;
            ledger
        })
        .collect();

    debug!(
        matched = matched.len(),
        unmatched_bank = unmatched_bank.len(),
        unmatched_ledger = unmatched_ledger.len(),
        "matching pass complete"
    );

    MatchOutcome {
        matched,
        unmatched_bank,
        unmatched_ledger,
    }
}
