//! Single chain audits

use crate::{AuditMetrics, AuditorConfig, AuditorError};
use std::sync::Arc;
use std::time::Instant;
use veritas_ledger::{BlockStore, ChainReport, Ledger, SqliteBlockStore};

/// Verifies a shared ledger and keeps count of the outcomes
///
/// The auditor only reads. It holds the same `Arc<Ledger>` the store
/// appends through, so audits interleave with appends at block
/// granularity.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use veritas_auditor::{AuditorConfig, ChainAuditor};
/// use veritas_ledger::Ledger;
///
/// let ledger = Arc::new(Ledger::in_memory());
/// ledger.append(&("admit_hypothesis", "h1")).unwrap();
///
/// let mut auditor = ChainAuditor::new(ledger, AuditorConfig::default());
/// let report = auditor.audit().unwrap();
/// assert!(report.valid);
/// assert_eq!(auditor.metrics().passed, 1);
/// ```
pub struct ChainAuditor<B: BlockStore = SqliteBlockStore> {
    ledger: Arc<Ledger<B>>,
    config: AuditorConfig,
    metrics: AuditMetrics,
}

impl<B: BlockStore> ChainAuditor<B> {
    /// Create an auditor over a shared ledger
    pub fn new(ledger: Arc<Ledger<B>>, config: AuditorConfig) -> Self {
        Self {
            ledger,
            config,
            metrics: AuditMetrics::new(),
        }
    }

    /// The audited ledger
    pub fn ledger(&self) -> &Arc<Ledger<B>> {
        &self.ledger
    }

    /// The auditor's configuration
    pub fn config(&self) -> &AuditorConfig {
        &self.config
    }

    /// Get a reference to the current metrics
    pub fn metrics(&self) -> &AuditMetrics {
        &self.metrics
    }

    /// Reset metrics counters
    pub fn reset_metrics(&mut self) {
        self.metrics.reset();
    }

    /// Walk the whole chain once and record the outcome
    ///
    /// A bad block is reported in the returned [`ChainReport`], not as an
    /// error. Only a storage failure is an error.
    pub fn audit(&mut self) -> Result<ChainReport, AuditorError> {
        let started = Instant::now();
        let outcome = self.ledger.verify_report();
        self.metrics
            .record_runtime(started.elapsed().as_millis() as u64);

        let report = match outcome {
            Ok(report) => report,
            Err(e) => {
                self.metrics.record_storage_failure();
                tracing::error!("Chain audit could not read the ledger: {}", e);
                return Err(e.into());
            }
        };

        if report.valid {
            self.metrics.record_pass(report.total_blocks);
            tracing::debug!("Chain audit passed: {} blocks", report.total_blocks);
        } else {
            let sequence = report.first_invalid.unwrap_or(report.verified_blocks);
            self.metrics.record_tamper(report.total_blocks, sequence);
            tracing::warn!(
                "Chain audit failed at block {}: {}",
                sequence,
                report.reason.as_deref().unwrap_or("unknown")
            );
        }

        Ok(report)
    }

    /// Audit once and apply the halt-on-tamper policy
    ///
    /// With `halt_on_tamper` set, a bad block becomes
    /// [`AuditorError::Tampered`].
    pub fn check(&mut self) -> Result<ChainReport, AuditorError> {
        let report = self.audit()?;
        if !report.valid && self.config.halt_on_tamper {
            return Err(AuditorError::Tampered {
                sequence: report.first_invalid.unwrap_or(report.verified_blocks),
                reason: report.reason.clone().unwrap_or_default(),
            });
        }
        Ok(report)
    }
}
