//! Integration tests for veritas-auditor
//!
//! The worker audits an on-disk ledger that is tampered with through a
//! second SQLite connection between runs.

use rusqlite::{params, Connection};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use veritas_auditor::{AuditorConfig, AuditorError, AuditorWorker, ChainAuditor};
use veritas_ledger::{Ledger, LedgerConfig};

fn disk_ledger(dir: &TempDir, blocks: usize) -> (Arc<Ledger>, String) {
    let path = dir.path().join("ledger.db").to_string_lossy().to_string();
    let ledger = Ledger::open(&LedgerConfig::at_path(path.clone())).unwrap();
    for i in 0..blocks {
        ledger
            .append(&("admit_hypothesis", format!("h{}", i)))
            .unwrap();
    }
    (Arc::new(ledger), path)
}

fn forge_payload(path: &str, sequence: u64) {
    let conn = Connection::open(path).unwrap();
    conn.execute(
        "UPDATE blocks SET payload = ?1 WHERE sequence = ?2",
        params![br#"["admit_hypothesis","forged"]"#.to_vec(), sequence as i64],
    )
    .unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_worker_halts_on_tampered_ledger() {
    let dir = TempDir::new().unwrap();
    let (ledger, path) = disk_ledger(&dir, 4);
    let mut worker = AuditorWorker::new(ledger, AuditorConfig::strict()).unwrap();

    worker.run_cycles(2).await.unwrap();
    assert_eq!(worker.metrics().passed, 2);

    forge_payload(&path, 2);

    let err = worker.run_cycles(2).await.unwrap_err();
    assert!(matches!(err, AuditorError::Tampered { sequence: 2, .. }));
    assert_eq!(worker.metrics().audit_count, 3);
    assert_eq!(worker.metrics().first_tampered_block, Some(2));
}

#[tokio::test(start_paused = true)]
async fn test_run_until_returns_tamper_error() {
    let dir = TempDir::new().unwrap();
    let (ledger, path) = disk_ledger(&dir, 2);
    forge_payload(&path, 0);

    let mut worker = AuditorWorker::new(ledger, AuditorConfig::strict()).unwrap();
    let result = worker
        .run_until(tokio::time::sleep(Duration::from_secs(600)))
        .await;

    assert!(matches!(result, Err(AuditorError::Tampered { sequence: 0, .. })));
    assert_eq!(worker.metrics().audit_count, 1);
}

#[tokio::test(start_paused = true)]
async fn test_lenient_worker_keeps_auditing() {
    let dir = TempDir::new().unwrap();
    let (ledger, path) = disk_ledger(&dir, 3);
    forge_payload(&path, 1);

    let mut worker = AuditorWorker::new(ledger, AuditorConfig::lenient()).unwrap();
    worker.run_cycles(3).await.unwrap();

    let metrics = worker.metrics();
    assert_eq!(metrics.tampered, 3);
    assert!(metrics.summary().contains("First tampered block: 1"));
}

#[test]
fn test_auditor_follows_a_growing_chain() {
    let dir = TempDir::new().unwrap();
    let (ledger, _) = disk_ledger(&dir, 1);
    let mut auditor = ChainAuditor::new(ledger.clone(), AuditorConfig::default());

    for expected in 1..=5u64 {
        let report = auditor.audit().unwrap();
        assert!(report.valid);
        assert_eq!(report.total_blocks, expected);
        ledger.append(&("record_event", expected)).unwrap();
    }
    assert!(auditor.metrics().all_passed());
}
