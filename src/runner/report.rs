//! Result aggregation for a setup run.

use std::fmt;
use std::time::Duration;

/// Status recorded for a single step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutcomeStatus {
    /// Step was already complete and was not executed.
    Skipped,
    /// Step executed and reported success.
    Succeeded,
    /// Step reported failure or hit a defect.
    Failed,
}

impl OutcomeStatus {
    /// Get a display character for this status.
    pub fn display_char(&self) -> char {
        match self {
            OutcomeStatus::Skipped => '○',
            OutcomeStatus::Succeeded => '✓',
            OutcomeStatus::Failed => '✗',
        }
    }
}

impl fmt::Display for OutcomeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            OutcomeStatus::Skipped => "skipped",
            OutcomeStatus::Succeeded => "succeeded",
            OutcomeStatus::Failed => "failed",
        };
        write!(f, "{}", s)
    }
}

/// What happened to one step during a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepOutcome {
    /// Step name.
    pub name: String,

    /// Final status.
    pub status: OutcomeStatus,

    /// Diagnostic for failures (captured stderr, defect message).
    pub detail: Option<String>,

    /// Wall-clock time spent on the step, including the completion check.
    pub duration: Duration,
}

impl StepOutcome {
    /// Create a skipped outcome.
    pub fn skipped(name: &str, duration: Duration) -> Self {
        Self {
            name: name.to_string(),
            status: OutcomeStatus::Skipped,
            detail: None,
            duration,
        }
    }

    /// Create a success outcome.
    pub fn succeeded(name: &str, duration: Duration) -> Self {
        Self {
            name: name.to_string(),
            status: OutcomeStatus::Succeeded,
            detail: None,
            duration,
        }
    }

    /// Create a failure outcome.
    pub fn failed(name: &str, detail: Option<String>, duration: Duration) -> Self {
        Self {
            name: name.to_string(),
            status: OutcomeStatus::Failed,
            detail,
            duration,
        }
    }

    /// Check whether this outcome counts against the run.
    pub fn is_failure(&self) -> bool {
        self.status == OutcomeStatus::Failed
    }
}

/// Overall status of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    /// Every step succeeded or was skipped.
    Succeeded,
    /// At least one step failed.
    Failed,
}

/// Ordered record of a setup run.
///
/// Outcomes appear in step-list order, one per step.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    outcomes: Vec<StepOutcome>,
    duration: Duration,
}

impl RunReport {
    /// Create an empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the outcome of the next step.
    pub fn push(&mut self, outcome: StepOutcome) {
        self.outcomes.push(outcome);
    }

    /// Record the total run duration.
    pub fn set_duration(&mut self, duration: Duration) {
        self.duration = duration;
    }

    /// All outcomes, in execution order.
    pub fn outcomes(&self) -> &[StepOutcome] {
        &self.outcomes
    }

    /// Total run duration.
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Number of recorded outcomes.
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    /// Check whether no steps were recorded.
    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// Look up the outcome for a step by name.
    pub fn outcome(&self, name: &str) -> Option<&StepOutcome> {
        self.outcomes.iter().find(|o| o.name == name)
    }

    /// Overall status: failed iff any step failed.
    pub fn status(&self) -> RunStatus {
        if self.outcomes.iter().any(StepOutcome::is_failure) {
            RunStatus::Failed
        } else {
            RunStatus::Succeeded
        }
    }

    /// Whether the run as a whole succeeded.
    pub fn success(&self) -> bool {
        self.status() == RunStatus::Succeeded
    }

    /// Names of failed steps, in order.
    pub fn failed_steps(&self) -> Vec<&str> {
        self.outcomes
            .iter()
            .filter(|o| o.is_failure())
            .map(|o| o.name.as_str())
            .collect()
    }

    /// Number of outcomes with the given status.
    pub fn count(&self, status: OutcomeStatus) -> usize {
        self.outcomes.iter().filter(|o| o.status == status).count()
    }

    /// Process exit code for this report.
    pub fn exit_code(&self) -> i32 {
        match self.status() {
            RunStatus::Succeeded => 0,
            RunStatus::Failed => 1,
        }
    }
}
