//! Conversion of matcher output into persistable outcomes and a run summary

use chrono::NaiveDateTime;

use crate::reconciliation::matcher::MatchOutcome;
use crate::types::{Disposition, ReconciliationOutcome, RunSummary};

/// Convert the matcher's record sets into one outcome per record pair/residual
///
/// Ordering is stable: matched pairs first (in matching order), then
/// unmatched bank records, then unmatched ledger records. Matched outcomes
/// carry the bank side's amount and date for audit; every outcome is stamped
/// with the same run timestamp. Scores are rounded to two decimals for
/// display and export.
pub fn aggregate(
    outcome: MatchOutcome,
    run_id: &str,
    computed_at: NaiveDateTime,
) -> (Vec<ReconciliationOutcome>, RunSummary) {
    let summary = RunSummary {
        run_id: run_id.to_string(),
        matched: outcome.matched.len(),
        unmatched_bank: outcome.unmatched_bank.len(),
        unmatched_ledger: outcome.unmatched_ledger.len(),
        computed_at,
    };

    let mut outcomes =
        Vec::with_capacity(summary.matched + summary.unmatched_bank + summary.unmatched_ledger);

    for pair in outcome.matched {
        outcomes.push(ReconciliationOutcome {
            disposition: Disposition::Matched,
            bank_reference: Some(pair.bank.source_id),
            ledger_reference: Some(pair.ledger.source_id),
            match_score: Some(round_score(pair.score)),
            amount: pair.bank.amount,
            occurred_on: pair.bank.occurred_on,
            computed_at,
        });
    }

    for record in outcome.unmatched_bank {
        outcomes.push(ReconciliationOutcome {
            disposition: Disposition::UnmatchedBank,
            bank_reference: Some(record.source_id),
            ledger_reference: None,
            match_score: None,
            amount: record.amount,
            occurred_on: record.occurred_on,
            computed_at,
        });
    }

    for record in outcome.unmatched_ledger {
        outcomes.push(ReconciliationOutcome {
            disposition: Disposition::UnmatchedLedger,
            bank_reference: None,
            ledger_reference: Some(record.source_id),
            match_score: None,
            amount: record.amount,
            occurred_on: record.occurred_on,
            computed_at,
        });
    }

    (outcomes, summary)
}

fn round_score(score: f64) -> f64 {
    (score * 100.0).round() / 100.0
}
