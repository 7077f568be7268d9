//! Reconciliation module: normalization, composite scoring, greedy matching
//! and result aggregation for bank vs. ledger/ERP record sets

pub mod aggregate;
pub mod config;
pub mod engine;
pub mod matcher;
pub mod normalize;
pub mod score;

pub use aggregate::*;
pub use config::*;
pub use engine::*;
pub use matcher::*;
pub use normalize::*;
pub use score::*;
