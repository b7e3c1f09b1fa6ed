//! Setup step orchestration.

pub mod report;
pub mod setup;

pub use report::{OutcomeStatus, RunReport, RunStatus, StepOutcome};
pub use setup::{run_steps, RunConfiguration, RunProgress, RunState, SetupRunner};
