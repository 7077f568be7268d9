//! Composite scoring of bank/ledger candidate pairs
//!
//! A candidate pair is scored from three components: token-order-invariant
//! textual similarity between descriptions, a fixed bonus when the amounts
//! agree within tolerance, and a smaller fixed bonus when the dates agree
//! within tolerance. Weights, bonuses and tolerances all come from
//! [`MatchConfig`].

use strsim::normalized_levenshtein;

use crate::reconciliation::config::MatchConfig;
use crate::types::TransactionRecord;

/// Case-insensitive, token-order-invariant string similarity in `[0, 100]`
///
/// Both sides are lower-cased, whitespace-tokenized and sorted before a
/// normalized Levenshtein comparison, so "ACME Corp payment" and
/// "payment acme corp" score as equal. An empty description on either side
/// scores 0: a record with no free text contributes nothing textually and
/// must earn its match through the amount and date bonuses.
pub fn token_sort_similarity(left: &str, right: &str) -> f64 {
    let left_sorted = sort_tokens(left);
    let right_sorted = sort_tokens(right);

    if left_sorted.is_empty() || right_sorted.is_empty() {
        return 0.0;
    }

    normalized_levenshtein(&left_sorted, &right_sorted) * 100.0
}

fn sort_tokens(text: &str) -> String {
    let mut tokens: Vec<String> = text
        .split_whitespace()
        .map(|token| token.to_lowercase())
        .collect();
    tokens.sort();
    tokens.join(" ")
}

/// Whether two amounts agree within the configured tolerance (strict `<`)
pub fn amounts_within_tolerance(
    bank: &TransactionRecord,
    ledger: &TransactionRecord,
    config: &MatchConfig,
) -> bool {
    (&bank.amount - &ledger.amount).abs() < config.amount_tolerance
}

/// Whether two dates agree within the configured day tolerance (inclusive)
pub fn dates_within_tolerance(
    bank: &TransactionRecord,
    ledger: &TransactionRecord,
    config: &MatchConfig,
) -> bool {
    let delta_days = (bank.occurred_on - ledger.occurred_on).num_days().abs();
    delta_days <= config.date_tolerance_days
}

/// Compute the composite score for one bank/ledger candidate pair
///
/// Pure function: `text_weight * similarity + amount_bonus + date_bonus`,
/// where each bonus is all-or-nothing based on its tolerance check.
pub fn composite_score(
    bank: &TransactionRecord,
    ledger: &TransactionRecord,
    config: &MatchConfig,
) -> f64 {
    let text_component =
        config.text_weight * token_sort_similarity(&bank.description, &ledger.description);

    let amount_component = if amounts_within_tolerance(bank, ledger, config) {
        config.amount_bonus
    } else {
        0.0
    };

    let date_component = if dates_within_tolerance(bank, ledger, config) {
        config.date_bonus
    } else {
        0.0
    };

    text_component + amount_component + date_component
}
