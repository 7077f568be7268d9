//! # Reconciliation Core
//!
//! A bank/ledger reconciliation library that identifies which records from
//! two independently produced transaction datasets represent the same
//! underlying economic event, despite differing identifiers, minor amount
//! deviations, and date drift.
//!
//! ## Features
//!
//! - **Record normalization**: identifier canonicalization, decimal amount
//!   coercion, multi-format date parsing with per-row rejection reporting
//! - **Composite scoring**: token-order-invariant textual similarity plus
//!   amount and date tolerance bonuses, all externally configurable
//! - **Greedy bipartite matching**: deterministic one-to-one assignment of
//!   bank records to ledger records above a configurable threshold
//! - **Auditable results**: per-run outcome lists with stable field names,
//!   disposition summaries, and superseding re-runs
//! - **Storage abstraction**: database-agnostic design with trait-based
//!   persistence
//!
//! ## Quick Start
//!
//! ```rust
//! use reconciliation_core::{MatchConfig, RawRecord, ReconciliationEngine};
//! use reconciliation_core::utils::MemoryStorage;
//!
//! # async fn demo() -> reconciliation_core::ReconResult<()> {
//! let mut engine = ReconciliationEngine::new(MemoryStorage::new());
//!
//! let bank = vec![RawRecord::new(1, "B1", "Invoice 100", "500.00", "2024-01-10")];
//! let ledger = vec![RawRecord::new(1, "L1", "INVOICE 100", "500.00", "2024-01-11")];
//!
//! let report = engine.run(None, &bank, &ledger).await?;
//! assert_eq!(report.summary.matched, 1);
//! # Ok(())
//! # }
//! ```

pub mod reconciliation;
pub mod traits;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use reconciliation::*;
pub use traits::*;
pub use types::*;
