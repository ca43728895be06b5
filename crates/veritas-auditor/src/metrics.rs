//! Metrics collected across audits

/// Counters for chain audits
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuditMetrics {
    /// Audits attempted
    pub audit_count: usize,

    /// Audits where the whole chain verified
    pub passed: usize,

    /// Audits that found a bad block
    pub tampered: usize,

    /// Audits that could not read the ledger
    pub storage_failures: usize,

    /// Chain length at the last completed audit
    pub last_chain_length: u64,

    /// First bad block seen by any audit
    pub first_tampered_block: Option<u64>,

    /// Total time spent verifying, in milliseconds
    pub total_runtime_ms: u64,
}

impl AuditMetrics {
    /// Create new empty metrics
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an audit where every block verified
    pub fn record_pass(&mut self, chain_length: u64) {
        self.audit_count += 1;
        self.passed += 1;
        self.last_chain_length = chain_length;
    }

    /// Record an audit that found a bad block
    pub fn record_tamper(&mut self, chain_length: u64, sequence: u64) {
        self.audit_count += 1;
        self.tampered += 1;
        self.last_chain_length = chain_length;
        self.first_tampered_block.get_or_insert(sequence);
    }

    /// Record an audit that could not read storage
    pub fn record_storage_failure(&mut self) {
        self.audit_count += 1;
        self.storage_failures += 1;
    }

    /// Add verification time
    pub fn record_runtime(&mut self, millis: u64) {
        self.total_runtime_ms = self.total_runtime_ms.saturating_add(millis);
    }

    /// Whether every audit so far passed
    pub fn all_passed(&self) -> bool {
        self.passed == self.audit_count
    }

    /// Reset all metrics
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Generate a summary report of metrics
    pub fn summary(&self) -> String {
        let mut lines = vec![
            "Audit Metrics Summary".to_string(),
            "=====================".to_string(),
            format!("Audits: {}", self.audit_count),
            format!("Passed: {}", self.passed),
            format!("Tampered: {}", self.tampered),
            format!("Storage failures: {}", self.storage_failures),
            format!("Chain length: {}", self.last_chain_length),
            format!("Total runtime: {}ms", self.total_runtime_ms),
        ];

        if let Some(sequence) = self.first_tampered_block {
            lines.push(format!("First tampered block: {}", sequence));
        }

        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_creation() {
        let metrics = AuditMetrics::new();
        assert_eq!(metrics.audit_count, 0);
        assert!(metrics.all_passed());
        assert!(metrics.first_tampered_block.is_none());
    }

    #[test]
    fn test_record_outcomes() {
        let mut metrics = AuditMetrics::new();
        metrics.record_pass(3);
        metrics.record_tamper(4, 2);
        metrics.record_tamper(5, 1);
        metrics.record_storage_failure();

        assert_eq!(metrics.audit_count, 4);
        assert_eq!(metrics.passed, 1);
        assert_eq!(metrics.tampered, 2);
        assert_eq!(metrics.storage_failures, 1);
        assert_eq!(metrics.last_chain_length, 5);
        // The first sighting sticks.
        assert_eq!(metrics.first_tampered_block, Some(2));
        assert!(!metrics.all_passed());
    }

    #[test]
    fn test_reset() {
        let mut metrics = AuditMetrics::new();
        metrics.record_tamper(1, 0);
        metrics.record_runtime(12);
        metrics.reset();
        assert_eq!(metrics, AuditMetrics::default());
    }

    #[test]
    fn test_summary() {
        let mut metrics = AuditMetrics::new();
        metrics.record_pass(8);
        metrics.record_runtime(40);

        let summary = metrics.summary();
        assert!(summary.contains("Audits: 1"));
        assert!(summary.contains("Chain length: 8"));
        assert!(summary.contains("Total runtime: 40ms"));
        assert!(!summary.contains("First tampered block"));

        metrics.record_tamper(8, 6);
        assert!(metrics.summary().contains("First tampered block: 6"));
    }
}
