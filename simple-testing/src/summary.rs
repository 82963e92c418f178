use chrono::Utc;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CaseStatus {
    Passed,
    Mismatch { expected: String, actual: String },
    Errored { message: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CaseOutcome {
    pub index: usize,
    #[serde(flatten)]
    pub status: CaseStatus,
}

/// Result of one evaluation batch, in input order.
#[derive(Debug, Clone, Serialize)]
pub struct EvaluationSummary {
    pub timestamp: String,
    pub total: usize,
    pub passed: usize,
    pub mismatched: usize,
    pub errored: usize,
    pub outcomes: Vec<CaseOutcome>,
}

impl Default for EvaluationSummary {
    fn default() -> Self {
        Self {
            timestamp: Utc::now().to_rfc3339(),
            total: 0,
            passed: 0,
            mismatched: 0,
            errored: 0,
            outcomes: Vec::new(),
        }
    }
}

impl EvaluationSummary {
    pub fn record(&mut self, outcome: CaseOutcome) {
        self.total += 1;
        match outcome.status {
            CaseStatus::Passed => self.passed += 1,
            CaseStatus::Mismatch { .. } => self.mismatched += 1,
            CaseStatus::Errored { .. } => self.errored += 1,
        }
        self.outcomes.push(outcome);
    }

    pub fn failed(&self) -> usize {
        self.mismatched + self.errored
    }

    pub fn all_passed(&self) -> bool {
        self.failed() == 0
    }

    /// Percentage of passed cases; 0.0 for an empty batch.
    pub fn pass_rate(&self) -> f64 {
        if self.total > 0 {
            self.passed as f64 / self.total as f64 * 100.0
        } else {
            0.0
        }
    }

    /// Fold another batch into this one, keeping indices as recorded.
    pub fn merge(&mut self, other: EvaluationSummary) {
        for outcome in other.outcomes {
            self.record(outcome);
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }

    pub fn to_compact_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }
}
