//! Core types and data structures for the reconciliation engine

use bigdecimal::BigDecimal;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Which side of a reconciliation a record (or error) belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BatchSide {
    /// Records from the bank statement feed
    Bank,
    /// Records from the ledger/ERP system
    Ledger,
}

impl std::fmt::Display for BatchSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BatchSide::Bank => write!(f, "bank"),
            BatchSide::Ledger => write!(f, "ledger"),
        }
    }
}

/// Matching status stamped onto each source record during a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecordStatus {
    /// Not yet processed by the matcher
    Pending,
    /// Paired with a record from the other side
    Matched,
    /// Processed but no candidate cleared the threshold
    Unmatched,
}

/// Raw row as supplied by the ingestion collaborator (file upload, API, etc.)
///
/// All fields arrive as text; the normalizer is responsible for turning this
/// into a validated [`TransactionRecord`] or a [`RejectedRow`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRecord {
    /// 1-based position of the row in the uploaded batch, for rejection reports
    pub row_number: usize,
    /// Transaction/entry identifier from the source system
    pub source_id: String,
    /// Free-text description, may be empty
    pub description: String,
    /// Amount as text, parsed during normalization
    pub amount: String,
    /// Date as text, parsed during normalization
    pub date: String,
}

impl RawRecord {
    /// Create a raw record from owned field values
    pub fn new(
        row_number: usize,
        source_id: impl Into<String>,
        description: impl Into<String>,
        amount: impl Into<String>,
        date: impl Into<String>,
    ) -> Self {
        Self {
            row_number,
            source_id: source_id.into(),
            description: description.into(),
            amount: amount.into(),
            date: date.into(),
        }
    }
}

/// One side of a reconciliation input, after normalization
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// Identifier as it appeared in the source, original casing preserved
    pub source_id: String,
    /// Trimmed, upper-cased identifier used for comparisons
    pub normalized_id: String,
    /// Free-text description, may be empty
    pub description: String,
    /// Signed amount, normalized to 2 decimal places
    pub amount: BigDecimal,
    /// Calendar date of the transaction (no time component)
    pub occurred_on: NaiveDate,
    /// Matching status, stamped by the matcher during a run
    pub status: RecordStatus,
}

impl TransactionRecord {
    /// Create a normalized record in the `Pending` state
    pub fn new(
        source_id: String,
        description: String,
        amount: BigDecimal,
        occurred_on: NaiveDate,
    ) -> Self {
        let normalized_id = source_id.trim().to_uppercase();
        Self {
            source_id,
            normalized_id,
            description,
            amount: amount.with_scale(2),
            occurred_on,
            status: RecordStatus::Pending,
        }
    }
}

/// Why a raw row was excluded from matching
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RejectReason {
    /// Amount field was missing or not a valid decimal number
    InvalidAmount,
    /// Date field was missing or matched none of the accepted formats
    InvalidDate,
}

/// A row excluded from the batch during normalization
///
/// Row-level failures are data, not errors: they are collected and reported
/// alongside the successful results so nothing is silently dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RejectedRow {
    /// 1-based position of the row in the uploaded batch
    pub row_number: usize,
    /// Source identifier of the row, if one was present
    pub source_id: String,
    /// Classification of the failure
    pub reason: RejectReason,
    /// Human-readable detail (the offending field value)
    pub detail: String,
}

/// Transient pairing of one bank record with one ledger record
///
/// Produced by the matcher; never persisted directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchCandidatePair {
    pub bank: TransactionRecord,
    pub ledger: TransactionRecord,
    /// Composite score that cleared the match threshold
    pub score: f64,
}

/// Classification of a record after a reconciliation run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Disposition {
    /// Bank and ledger records paired with a score above the threshold
    Matched,
    /// Bank record with no acceptable ledger counterpart
    UnmatchedBank,
    /// Ledger record no bank record claimed
    UnmatchedLedger,
}

/// Persisted result of one reconciliation run
///
/// Created once per run and immutable thereafter. Field names are a stable
/// contract for the export collaborators (CSV/spreadsheet/PDF renderers).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReconciliationOutcome {
    /// Disposition of the record(s) behind this outcome
    pub disposition: Disposition,
    /// Bank-side reference; present unless disposition is `UnmatchedLedger`
    pub bank_reference: Option<String>,
    /// Ledger-side reference; present unless disposition is `UnmatchedBank`
    pub ledger_reference: Option<String>,
    /// Composite score; present only when disposition is `Matched`
    pub match_score: Option<f64>,
    /// Amount carried from the source record(s) for audit
    pub amount: BigDecimal,
    /// Transaction date carried from the source record(s) for audit
    pub occurred_on: NaiveDate,
    /// Timestamp of the reconciliation run that produced this outcome
    pub computed_at: NaiveDateTime,
}

/// Per-disposition counts for one reconciliation run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Opaque token identifying the run
    pub run_id: String,
    pub matched: usize,
    pub unmatched_bank: usize,
    pub unmatched_ledger: usize,
    /// When the run was computed
    pub computed_at: NaiveDateTime,
}

/// Everything the engine hands back to the caller for one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    pub run_id: String,
    pub summary: RunSummary,
    /// One outcome per matched pair and per unmatched record, both sides
    pub outcomes: Vec<ReconciliationOutcome>,
    /// Bank rows excluded during normalization
    pub rejected_bank: Vec<RejectedRow>,
    /// Ledger rows excluded during normalization
    pub rejected_ledger: Vec<RejectedRow>,
}

/// Errors that can occur in the reconciliation engine
#[derive(Debug, thiserror::Error)]
pub enum ReconError {
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("Configuration error: {0}")]
    Configuration(String),
    #[error("Empty batch: no valid {0} records after normalization")]
    EmptyBatch(BatchSide),
    #[error("Batch too large: {count} {side} records exceeds limit of {limit}")]
    BatchTooLarge {
        side: BatchSide,
        count: usize,
        limit: usize,
    },
    #[error("Run not found: {0}")]
    RunNotFound(String),
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Invalid run id: {0}")]
    InvalidRunId(String),
}

/// Result type for reconciliation operations
pub type ReconResult<T> = Result<T, ReconError>;
