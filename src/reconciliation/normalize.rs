//! Record normalization: raw ingestion rows into validated transaction records

use bigdecimal::BigDecimal;
use chrono::NaiveDate;

use crate::types::{RawRecord, RejectReason, RejectedRow, TransactionRecord};

/// Date formats accepted from ingestion sources, tried in order
///
/// ISO first, then the day-first and month-first forms commonly produced by
/// bank exports and spreadsheets.
const ACCEPTED_DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d-%m-%Y", "%d/%m/%Y", "%m/%d/%Y", "%Y/%m/%d"];

/// Normalize one raw row into a [`TransactionRecord`], or reject it
///
/// Identifier whitespace is stripped and an upper-cased copy is kept for
/// comparison; the original casing is preserved for display. A row with an
/// unparseable amount or date is rejected with a reason; rejection never
/// aborts the batch.
pub fn normalize_record(raw: &RawRecord) -> Result<TransactionRecord, RejectedRow> {
    let amount = parse_amount(&raw.amount).ok_or_else(|| RejectedRow {
        row_number: raw.row_number,
        source_id: raw.source_id.trim().to_string(),
        reason: RejectReason::InvalidAmount,
        detail: format!("unparseable amount '{}'", raw.amount.trim()),
    })?;

    let occurred_on = parse_date(&raw.date).ok_or_else(|| RejectedRow {
        row_number: raw.row_number,
        source_id: raw.source_id.trim().to_string(),
        reason: RejectReason::InvalidDate,
        detail: format!("unparseable date '{}'", raw.date.trim()),
    })?;

    Ok(TransactionRecord::new(
        raw.source_id.trim().to_string(),
        raw.description.trim().to_string(),
        amount,
        occurred_on,
    ))
}

/// Normalize a whole batch, preserving input order of the valid rows
///
/// Returns the valid records and the rejected rows; valid rows proceed to
/// matching regardless of how many siblings were rejected.
pub fn normalize_batch(rows: &[RawRecord]) -> (Vec<TransactionRecord>, Vec<RejectedRow>) {
    let mut records = Vec::with_capacity(rows.len());
    let mut rejected = Vec::new();

    for raw in rows {
        match normalize_record(raw) {
            Ok(record) => records.push(record),
            Err(row) => rejected.push(row),
        }
    }

    (records, rejected)
}

/// Parse an amount field as a signed decimal
fn parse_amount(raw: &str) -> Option<BigDecimal> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<BigDecimal>().ok()
}

/// Parse a date field against the accepted format list
fn parse_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    ACCEPTED_DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(trimmed, format).ok())
}
