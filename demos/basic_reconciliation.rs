//! Basic reconciliation usage example

use reconciliation_core::utils::MemoryStorage;
use reconciliation_core::{Disposition, MatchConfig, RawRecord, ReconciliationEngine};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("🏦 Reconciliation Core - Basic Example\n");

    // Create an engine with in-memory storage and default configuration
    let storage = MemoryStorage::new();
    let mut engine = ReconciliationEngine::new(storage);

    println!("⚙️  Configuration:");
    let config: &MatchConfig = engine.config();
    println!("  text weight:      {}", config.text_weight);
    println!("  amount tolerance: {}", config.amount_tolerance);
    println!("  date tolerance:   ±{} days", config.date_tolerance_days);
    println!("  match threshold:  {}\n", config.match_threshold);

    // 1. Raw rows as an ingestion layer would hand them over
    let bank = vec![
        RawRecord::new(1, "TXN-1001", "Invoice 100", "500.00", "2024-01-10"),
        RawRecord::new(2, "TXN-1002", "Rent January", "1200.00", "2024-01-02"),
        RawRecord::new(3, "TXN-1003", "Card fee", "4.90", "2024-01-31"),
        RawRecord::new(4, "TXN-1004", "Broken row", "12x.00", "2024-01-12"),
    ];
    let ledger = vec![
        RawRecord::new(1, "INV-100", "INVOICE 100", "500.00", "2024-01-11"),
        RawRecord::new(2, "RENT-01", "January rent", "1200.00", "2024-01-03"),
        RawRecord::new(3, "CONS-07", "Consulting retainer", "4500.00", "2024-01-25"),
    ];

    // 2. Run the reconciliation
    println!("🔍 Reconciling {} bank rows against {} ledger rows...\n", bank.len(), ledger.len());
    let report = engine.run(Some("demo-run".to_string()), &bank, &ledger).await?;

    // 3. Show the outcome per record
    for outcome in &report.outcomes {
        match outcome.disposition {
            Disposition::Matched => println!(
                "  ✓ Matched   {} ↔ {} (score {})",
                outcome.bank_reference.as_deref().unwrap_or("-"),
                outcome.ledger_reference.as_deref().unwrap_or("-"),
                outcome.match_score.unwrap_or_default()
            ),
            Disposition::UnmatchedBank => println!(
                "  ✗ Bank only   {} ({} on {})",
                outcome.bank_reference.as_deref().unwrap_or("-"),
                outcome.amount,
                outcome.occurred_on
            ),
            Disposition::UnmatchedLedger => println!(
                "  ✗ Ledger only {} ({} on {})",
                outcome.ledger_reference.as_deref().unwrap_or("-"),
                outcome.amount,
                outcome.occurred_on
            ),
        }
    }

    for rejected in &report.rejected_bank {
        println!(
            "  ⚠ Rejected bank row {} ({:?}): {}",
            rejected.row_number, rejected.reason, rejected.detail
        );
    }

    // 4. Summary and history
    println!(
        "\n📋 Summary: {} matched, {} unmatched bank, {} unmatched ledger",
        report.summary.matched, report.summary.unmatched_bank, report.summary.unmatched_ledger
    );

    let runs = engine.list_runs().await?;
    println!("🗂  Stored runs: {}", runs.len());

    Ok(())
}
