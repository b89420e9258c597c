//! Rule execution recording.
//!
//! Every rule evaluated during an assessment is recorded here, producing the
//! `rule_execution_log` audit trail. The recorder owns the accumulating log;
//! scorers hand it each outcome together with the rule's identity and weight.

use crate::rules::RuleOutcome;
use adri_core::RuleExecutionResult;
use std::time::Instant;

/// Accumulates [`RuleExecutionResult`] records over one assessment run.
#[derive(Debug, Default)]
pub struct RuleRecorder {
    log: Vec<RuleExecutionResult>,
}

impl RuleRecorder {
    /// Creates an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one executed rule and returns a reference to the record.
    ///
    /// `started` is the instant evaluation began; the elapsed wall-clock time
    /// is captured here so scorers never touch timing directly.
    pub fn record(
        &mut self,
        dimension: &str,
        field: &str,
        rule_id: &str,
        rule_definition: String,
        rule_weight: f64,
        outcome: &RuleOutcome,
        started: Instant,
    ) -> &RuleExecutionResult {
        let result = RuleExecutionResult {
            rule_id: rule_id.to_string(),
            dimension: dimension.to_string(),
            field: field.to_string(),
            rule_definition,
            total_records: outcome.counts.total,
            passed: outcome.counts.passed,
            failed: outcome.counts.failed,
            rule_score: outcome.score(),
            rule_weight,
            execution_time_ms: started.elapsed().as_millis() as u64,
            sample_failures: outcome.sample_failures.clone(),
            failure_patterns: outcome.failure_patterns.clone(),
        };
        self.log.push(result);
        self.log.last().unwrap_or_else(|| unreachable!())
    }

    /// Records recorded so far.
    pub fn log(&self) -> &[RuleExecutionResult] {
        &self.log
    }

    /// Number of rules recorded.
    pub fn rules_executed(&self) -> u64 {
        self.log.len() as u64
    }

    /// Total value-level checks across all recorded rules.
    pub fn total_validations(&self) -> u64 {
        self.log.iter().map(|r| r.total_records).sum()
    }

    /// Consumes the recorder, yielding the final log.
    pub fn into_log(self) -> Vec<RuleExecutionResult> {
        self.log
    }
}
