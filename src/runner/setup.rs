//! Setup step orchestration.

use std::any::Any;
use std::cell::Cell;
use std::error::Error as _;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Once;
use std::time::Instant;

use tracing::{debug, info, warn};

use crate::error::WrError;
use crate::steps::{SetupStep, StepExecution};

use super::report::{OutcomeStatus, RunReport, StepOutcome};

/// Options for a setup run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunConfiguration {
    /// Execute every step even if it reports itself completed.
    pub force: bool,
    /// Record full error chains in failure details.
    pub verbose: bool,
}

/// Lifecycle of a [`SetupRunner`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunState {
    #[default]
    NotStarted,
    /// Working on the step at `index` (zero-based).
    Running { index: usize },
    Completed,
}

/// Progress events emitted during a run.
#[derive(Debug)]
pub enum RunProgress<'a> {
    /// A step was found incomplete (or forced) and is about to execute.
    StepStarting {
        name: &'a str,
        description: &'a str,
        index: usize,
        total: usize,
    },
    /// A step has a final outcome. Skipped steps only emit this event.
    StepFinished {
        index: usize,
        total: usize,
        outcome: &'a StepOutcome,
    },
}

/// Runs an ordered list of setup steps.
///
/// Every step is attempted exactly once, in order. A step that fails,
/// returns `Err`, or panics is recorded as failed and the run moves on.
pub struct SetupRunner {
    steps: Vec<Box<dyn SetupStep>>,
    config: RunConfiguration,
    state: RunState,
}

impl SetupRunner {
    pub fn new(steps: Vec<Box<dyn SetupStep>>, config: RunConfiguration) -> Self {
        Self {
            steps,
            config,
            state: RunState::NotStarted,
        }
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn config(&self) -> RunConfiguration {
        self.config
    }

    /// Steps in execution order.
    pub fn steps(&self) -> &[Box<dyn SetupStep>] {
        &self.steps
    }

    /// Run all steps.
    pub fn run(&mut self) -> RunReport {
        self.run_with_progress(|_| {})
    }

    /// Run all steps with a progress callback.
    ///
    /// The callback is never invoked while a step is executing.
    pub fn run_with_progress(&mut self, mut on_progress: impl FnMut(RunProgress<'_>)) -> RunReport {
        let start = Instant::now();
        let total = self.steps.len();
        let mut report = RunReport::new();

        info!("Running {} setup steps (force: {})", total, self.config.force);

        for (index, step) in self.steps.iter().enumerate() {
            self.state = RunState::Running { index };
            let started = Instant::now();

            let outcome = match check(step.as_ref(), self.config.force) {
                Check::Completed => StepOutcome::skipped(step.name(), started.elapsed()),
                Check::Panicked(detail) => {
                    StepOutcome::failed(step.name(), Some(detail), started.elapsed())
                }
                Check::Pending => {
                    on_progress(RunProgress::StepStarting {
                        name: step.name(),
                        description: step.description(),
                        index,
                        total,
                    });
                    execute(step.as_ref(), self.config.verbose, started)
                }
            };

            match outcome.status {
                OutcomeStatus::Failed => warn!(
                    "Step '{}' failed: {}",
                    outcome.name,
                    outcome.detail.as_deref().unwrap_or("no detail")
                ),
                status => debug!("Step '{}' {}", outcome.name, status),
            }

            on_progress(RunProgress::StepFinished {
                index,
                total,
                outcome: &outcome,
            });

            report.push(outcome);
        }

        report.set_duration(start.elapsed());
        self.state = RunState::Completed;

        info!(
            "Setup finished: {} succeeded, {} skipped, {} failed",
            report.count(OutcomeStatus::Succeeded),
            report.count(OutcomeStatus::Skipped),
            report.count(OutcomeStatus::Failed)
        );

        report
    }
}

/// Run a list of steps once and return the report.
pub fn run_steps(steps: Vec<Box<dyn SetupStep>>, config: RunConfiguration) -> RunReport {
    SetupRunner::new(steps, config).run()
}

enum Check {
    Completed,
    Pending,
    Panicked(String),
}

/// Decide whether a step needs to run.
fn check(step: &dyn SetupStep, force: bool) -> Check {
    if force {
        return Check::Pending;
    }
    match contain(|| step.is_completed()) {
        Ok(true) => Check::Completed,
        Ok(false) => Check::Pending,
        Err(payload) => Check::Panicked(panic_detail(payload.as_ref())),
    }
}

/// Execute one step, containing any defect.
fn execute(step: &dyn SetupStep, verbose: bool, started: Instant) -> StepOutcome {
    let name = step.name();
    match contain(|| step.execute()) {
        Ok(Ok(StepExecution::Succeeded)) => StepOutcome::succeeded(name, started.elapsed()),
        Ok(Ok(StepExecution::Failed { detail })) => {
            StepOutcome::failed(name, detail, started.elapsed())
        }
        Ok(Err(e)) => StepOutcome::failed(
            name,
            Some(defect_detail(&e, verbose)),
            started.elapsed(),
        ),
        Err(payload) => StepOutcome::failed(
            name,
            Some(panic_detail(payload.as_ref())),
            started.elapsed(),
        ),
    }
}

thread_local! {
    static CONTAINING: Cell<bool> = const { Cell::new(false) };
}

static QUIET_PANIC_HOOK: Once = Once::new();

/// Run `f`, catching a panic instead of unwinding past the runner.
///
/// Panics caught here are logged at debug level rather than printed by the
/// default hook. Panics anywhere else still reach the previous hook.
fn contain<R>(f: impl FnOnce() -> R) -> std::thread::Result<R> {
    QUIET_PANIC_HOOK.call_once(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            if CONTAINING.with(Cell::get) {
                debug!("Contained step panic: {}", info);
            } else {
                previous(info);
            }
        }));
    });

    CONTAINING.with(|flag| flag.set(true));
    let result = panic::catch_unwind(AssertUnwindSafe(f));
    CONTAINING.with(|flag| flag.set(false));
    result
}

/// Describe an error returned from `execute`.
///
/// Verbose runs append the whole `source()` chain.
fn defect_detail(err: &WrError, verbose: bool) -> String {
    let mut detail = err.to_string();
    if verbose {
        let mut source = err.source();
        while let Some(cause) = source {
            detail.push_str(": ");
            detail.push_str(&cause.to_string());
            source = cause.source();
        }
    }
    detail
}

fn panic_detail(payload: &(dyn Any + Send)) -> String {
    let msg = if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    };
    format!("panicked: {}", msg)
}
