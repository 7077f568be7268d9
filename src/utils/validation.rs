//! Validation utilities

use crate::types::{ReconError, ReconResult};

/// Validate a caller-supplied run identifier
///
/// Run identifiers are opaque tokens used as storage keys and in audit
/// trails, so they must be non-empty, bounded in length, and restricted to
/// characters safe for file names and URLs.
pub fn validate_run_id(run_id: &str) -> ReconResult<()> {
    if run_id.trim().is_empty() {
        return Err(ReconError::InvalidRunId(
            "run id cannot be empty".to_string(),
        ));
    }

    if run_id.len() > 64 {
        return Err(ReconError::InvalidRunId(
            "run id cannot exceed 64 characters".to_string(),
        ));
    }

    // Alphanumeric, dashes and underscores only (uuid-friendly)
    if !run_id
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ReconError::InvalidRunId(
            "run id can only contain alphanumeric characters, dashes, and underscores".to_string(),
        ));
    }

    Ok(())
}
