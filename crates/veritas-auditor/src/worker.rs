//! Background worker for periodic chain audits

use crate::{AuditMetrics, AuditorConfig, AuditorError, ChainAuditor};
use std::future::Future;
use std::sync::Arc;
use tokio::time::{interval, Duration};
use veritas_ledger::{BlockStore, Ledger, SqliteBlockStore};

/// Background worker that verifies the ledger on a schedule
///
/// # Examples
///
/// ```no_run
/// use std::sync::Arc;
/// use veritas_auditor::{AuditorConfig, AuditorWorker};
/// use veritas_ledger::{Ledger, LedgerConfig};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let ledger = Arc::new(Ledger::open(&LedgerConfig::at_path("veritas.db"))?);
///     let mut worker = AuditorWorker::new(ledger, AuditorConfig::default())?;
///
///     // Run indefinitely (until Ctrl+C)
///     worker.run().await?;
///     Ok(())
/// }
/// ```
pub struct AuditorWorker<B: BlockStore = SqliteBlockStore> {
    auditor: ChainAuditor<B>,
    interval: Duration,
}

impl<B: BlockStore> AuditorWorker<B> {
    /// Create a new background worker with the given configuration
    ///
    /// # Errors
    ///
    /// Returns [`AuditorError::Config`] when the configuration is invalid,
    /// for example a zero interval.
    pub fn new(ledger: Arc<Ledger<B>>, config: AuditorConfig) -> Result<Self, AuditorError> {
        config.validate().map_err(AuditorError::Config)?;
        let interval = config.interval();
        Ok(Self {
            auditor: ChainAuditor::new(ledger, config),
            interval,
        })
    }

    /// Run until a shutdown signal (Ctrl+C) is received
    ///
    /// # Errors
    ///
    /// Returns [`AuditorError::Tampered`] when a verification fails and the
    /// configuration says to halt. Storage failures are logged and the
    /// worker keeps going.
    pub async fn run(&mut self) -> Result<(), AuditorError> {
        self.run_until(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!("Could not listen for shutdown signal: {}", e);
            }
        })
        .await
    }

    /// Run until `shutdown` completes
    pub async fn run_until<F>(&mut self, shutdown: F) -> Result<(), AuditorError>
    where
        F: Future<Output = ()>,
    {
        let mut ticker = interval(self.interval);
        tokio::pin!(shutdown);

        tracing::info!("Auditor worker started (interval: {:?})", self.interval);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    match self.auditor.check() {
                        Ok(report) if report.valid => {
                            tracing::info!("Audit passed: {} blocks verified", report.verified_blocks);
                        }
                        // Lenient: the auditor already logged the bad block.
                        Ok(_) => {}
                        Err(e @ AuditorError::Tampered { .. }) => {
                            tracing::error!("Halting auditor: {}", e);
                            return Err(e);
                        }
                        Err(e) => {
                            tracing::error!("Audit failed: {}", e);
                        }
                    }
                }
                _ = &mut shutdown => {
                    tracing::info!("Shutdown signal received, stopping auditor");
                    break;
                }
            }
        }

        tracing::info!(
            "Auditor stopped. Final metrics:\n{}",
            self.auditor.metrics().summary()
        );
        Ok(())
    }

    /// Run for a specific number of audits (useful for testing)
    ///
    /// Any error, including a storage failure, stops the run.
    pub async fn run_cycles(&mut self, cycles: usize) -> Result<(), AuditorError> {
        let mut ticker = interval(self.interval);

        tracing::info!(
            "Auditor worker started for {} cycles (interval: {:?})",
            cycles,
            self.interval
        );

        for cycle in 0..cycles {
            ticker.tick().await;

            match self.auditor.check() {
                Ok(report) => {
                    tracing::info!(
                        "Audit {}/{} completed: {} of {} blocks verified",
                        cycle + 1,
                        cycles,
                        report.verified_blocks,
                        report.total_blocks
                    );
                }
                Err(e) => {
                    tracing::error!("Audit {}/{} failed: {}", cycle + 1, cycles, e);
                    return Err(e);
                }
            }
        }

        tracing::info!(
            "Auditor finished {} cycles. Final metrics:\n{}",
            cycles,
            self.auditor.metrics().summary()
        );
        Ok(())
    }

    /// Get a reference to the auditor's current metrics
    pub fn metrics(&self) -> &AuditMetrics {
        self.auditor.metrics()
    }

    /// Reset the auditor's metrics counters
    pub fn reset_metrics(&mut self) {
        self.auditor.reset_metrics();
    }
}
