//! Integration tests for reconciliation-core

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use reconciliation_core::utils::MemoryStorage;
use reconciliation_core::{
    BatchSide, Disposition, MatchConfig, RawRecord, ReconError, ReconciliationEngine,
    RejectReason,
};

fn bank_statement() -> Vec<RawRecord> {
    vec![
        RawRecord::new(1, "B1", "Invoice 100", "500.00", "2024-01-10"),
        RawRecord::new(2, "B2", "Rent January", "1200.00", "2024-01-02"),
        RawRecord::new(3, "B3", "ACME Corp payment", "350.50", "2024-01-15"),
        RawRecord::new(4, "B4", "Unknown transfer", "77.77", "2024-01-20"),
    ]
}

fn erp_ledger() -> Vec<RawRecord> {
    vec![
        RawRecord::new(1, "L1", "INVOICE 100", "500.00", "2024-01-11"),
        RawRecord::new(2, "L2", "January rent", "1200.00", "2024-01-03"),
        RawRecord::new(3, "L3", "payment ACME Corp", "350.50", "2024-01-16"),
        RawRecord::new(4, "L4", "Consulting retainer", "4500.00", "2024-01-25"),
    ]
}

#[tokio::test]
async fn test_complete_reconciliation_workflow() {
    let storage = MemoryStorage::new();
    let mut engine = ReconciliationEngine::new(storage);

    let report = engine
        .run(Some("jan-2024".to_string()), &bank_statement(), &erp_ledger())
        .await
        .unwrap();

    // Three pairs survive case changes, token reordering and date drift
    assert_eq!(report.summary.matched, 3);
    assert_eq!(report.summary.unmatched_bank, 1);
    assert_eq!(report.summary.unmatched_ledger, 1);

    // Completeness: every input record is accounted for exactly once
    assert_eq!(
        report.summary.matched + report.summary.unmatched_bank,
        bank_statement().len()
    );
    assert_eq!(
        report.summary.matched + report.summary.unmatched_ledger,
        erp_ledger().len()
    );

    // The residuals are the records with no plausible counterpart
    let unmatched_bank: Vec<_> = report
        .outcomes
        .iter()
        .filter(|o| o.disposition == Disposition::UnmatchedBank)
        .collect();
    assert_eq!(unmatched_bank.len(), 1);
    assert_eq!(unmatched_bank[0].bank_reference.as_deref(), Some("B4"));

    let unmatched_ledger: Vec<_> = report
        .outcomes
        .iter()
        .filter(|o| o.disposition == Disposition::UnmatchedLedger)
        .collect();
    assert_eq!(unmatched_ledger.len(), 1);
    assert_eq!(unmatched_ledger[0].ledger_reference.as_deref(), Some("L4"));

    // Every outcome in the run carries the same timestamp
    let computed_at = report.summary.computed_at;
    assert!(report.outcomes.iter().all(|o| o.computed_at == computed_at));
}

#[tokio::test]
async fn test_run_history_is_retrievable() {
    let storage = MemoryStorage::new();
    let mut engine = ReconciliationEngine::new(storage);

    engine
        .run(Some("run-a".to_string()), &bank_statement(), &erp_ledger())
        .await
        .unwrap();
    engine
        .run(Some("run-b".to_string()), &bank_statement(), &erp_ledger())
        .await
        .unwrap();

    let runs = engine.list_runs().await.unwrap();
    assert_eq!(runs.len(), 2);
    assert_eq!(runs[0].run_id, "run-a");
    assert_eq!(runs[1].run_id, "run-b");

    let summary = engine.get_summary("run-a").await.unwrap();
    assert_eq!(summary.matched, 3);

    let outcomes = engine.get_outcomes("run-b").await.unwrap();
    assert_eq!(outcomes.len(), 5);
}

#[tokio::test]
async fn test_malformed_rows_reported_and_rest_reconciles() {
    let storage = MemoryStorage::new();
    let mut engine = ReconciliationEngine::new(storage);

    let mut bank = bank_statement();
    bank.push(RawRecord::new(5, "B5", "Bad amount", "12x.00", "2024-01-21"));
    bank.push(RawRecord::new(6, "B6", "Bad date", "10.00", "21st of January"));

    let report = engine
        .run(Some("jan-2024".to_string()), &bank, &erp_ledger())
        .await
        .unwrap();

    assert_eq!(report.rejected_bank.len(), 2);
    assert_eq!(report.rejected_bank[0].reason, RejectReason::InvalidAmount);
    assert_eq!(report.rejected_bank[0].row_number, 5);
    assert_eq!(report.rejected_bank[1].reason, RejectReason::InvalidDate);
    assert_eq!(report.rejected_bank[1].row_number, 6);

    // The valid rows still reconciled normally
    assert_eq!(report.summary.matched, 3);
}

#[tokio::test]
async fn test_determinism_across_runs() {
    let storage = MemoryStorage::new();
    let mut engine = ReconciliationEngine::new(storage);

    let first = engine
        .run(Some("run-1".to_string()), &bank_statement(), &erp_ledger())
        .await
        .unwrap();
    let second = engine
        .run(Some("run-2".to_string()), &bank_statement(), &erp_ledger())
        .await
        .unwrap();

    // Identical input in identical order yields identical pairings and scores
    let strip_time = |report: &reconciliation_core::RunReport| {
        report
            .outcomes
            .iter()
            .map(|o| {
                (
                    o.disposition,
                    o.bank_reference.clone(),
                    o.ledger_reference.clone(),
                    o.match_score,
                    o.amount.clone(),
                    o.occurred_on,
                )
            })
            .collect::<Vec<_>>()
    };
    assert_eq!(strip_time(&first), strip_time(&second));
}

#[tokio::test]
async fn test_amount_date_only_matching_via_config() {
    // Setting text_weight to 0 recovers pure amount+date matching
    let config = MatchConfig {
        text_weight: 0.0,
        match_threshold: 100.0,
        ..MatchConfig::default()
    };
    let storage = MemoryStorage::new();
    let mut engine = ReconciliationEngine::with_config(storage, config);

    let bank = vec![
        RawRecord::new(1, "B1", "description that matches nothing", "500.00", "2024-01-10"),
        RawRecord::new(2, "B2", "", "42.00", "2024-01-10"),
    ];
    let ledger = vec![
        RawRecord::new(1, "L1", "totally different words", "500.00", "2024-01-11"),
        RawRecord::new(2, "L2", "", "99.00", "2024-01-10"),
    ];

    let report = engine.run(None, &bank, &ledger).await.unwrap();

    // B1/L1 agree on amount and date within tolerance; B2/L2 differ in amount
    assert_eq!(report.summary.matched, 1);
    let matched = &report.outcomes[0];
    assert_eq!(matched.bank_reference.as_deref(), Some("B1"));
    assert_eq!(matched.ledger_reference.as_deref(), Some("L1"));
    assert_eq!(matched.match_score, Some(130.0));
}

#[tokio::test]
async fn test_empty_ledger_side_is_a_batch_error() {
    let storage = MemoryStorage::new();
    let mut engine = ReconciliationEngine::new(storage);

    let result = engine.run(None, &bank_statement(), &[]).await;
    assert!(matches!(
        result,
        Err(ReconError::EmptyBatch(BatchSide::Ledger))
    ));
}

#[tokio::test]
async fn test_invalid_run_id_rejected() {
    let storage = MemoryStorage::new();
    let mut engine = ReconciliationEngine::new(storage);

    let result = engine
        .run(
            Some("jan/2024".to_string()),
            &bank_statement(),
            &erp_ledger(),
        )
        .await;
    assert!(matches!(result, Err(ReconError::InvalidRunId(_))));
}

#[tokio::test]
async fn test_outcomes_serialize_with_stable_field_names() {
    let storage = MemoryStorage::new();
    let mut engine = ReconciliationEngine::new(storage);

    let report = engine
        .run(Some("jan-2024".to_string()), &bank_statement(), &erp_ledger())
        .await
        .unwrap();

    // Export collaborators rely on these exact field names
    let json = serde_json::to_value(&report.outcomes[0]).unwrap();
    let object = json.as_object().unwrap();
    for field in [
        "disposition",
        "bank_reference",
        "ledger_reference",
        "match_score",
        "amount",
        "occurred_on",
        "computed_at",
    ] {
        assert!(object.contains_key(field), "missing field {}", field);
    }
}

#[tokio::test]
async fn test_audit_fields_carried_from_source_records() {
    let storage = MemoryStorage::new();
    let mut engine = ReconciliationEngine::new(storage);

    let report = engine
        .run(Some("jan-2024".to_string()), &bank_statement(), &erp_ledger())
        .await
        .unwrap();

    let matched = report
        .outcomes
        .iter()
        .find(|o| o.bank_reference.as_deref() == Some("B1"))
        .unwrap();
    assert_eq!(matched.amount, "500.00".parse::<BigDecimal>().unwrap());
    assert_eq!(
        matched.occurred_on,
        NaiveDate::from_ymd_opt(2024, 1, 10).unwrap()
    );
}
