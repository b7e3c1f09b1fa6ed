//! Interactive terminal UI.

use console::Term;
use std::io::Write;

use crate::error::Result;
use crate::runner::{OutcomeStatus, RunReport};

use super::progress::{format_counter, format_duration};
use super::{
    prompt_user, shared, should_use_colors, NonInteractiveUI, OutputMode, Prompt, SharedUi,
    UserInterface, WrTheme,
};

/// Interactive terminal UI implementation.
pub struct TerminalUI {
    term: Term,
    theme: WrTheme,
    mode: OutputMode,
}

impl TerminalUI {
    /// Create a new terminal UI.
    pub fn new(mode: OutputMode) -> Self {
        let theme = if should_use_colors() {
            WrTheme::new()
        } else {
            WrTheme::plain()
        };

        Self {
            term: Term::stdout(),
            theme,
            mode,
        }
    }
}

impl UserInterface for TerminalUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        if self.mode.shows_status() {
            writeln!(self.term, "{}", msg).ok();
        }
    }

    fn success(&mut self, msg: &str) {
        if self.mode.shows_status() {
            writeln!(self.term, "{}", self.theme.format_success(msg)).ok();
        }
    }

    fn warning(&mut self, msg: &str) {
        if self.mode.shows_status() {
            writeln!(self.term, "{}", self.theme.format_warning(msg)).ok();
        }
    }

    fn error(&mut self, msg: &str) {
        let mut err = Term::stderr();
        writeln!(err, "{}", self.theme.format_error(msg)).ok();
    }

    fn prompt(&mut self, prompt: &Prompt) -> Result<String> {
        prompt_user(prompt, &self.term)
    }

    fn show_header(&mut self, title: &str) {
        if self.mode.shows_status() {
            let b = &self.theme.border;
            writeln!(self.term).ok();
            for line in title.lines() {
                writeln!(
                    self.term,
                    "{} {}",
                    b.apply_to("│"),
                    self.theme.format_header(line)
                )
                .ok();
            }
            writeln!(self.term).ok();
        }
    }

    fn show_step(&mut self, current: usize, total: usize, name: &str, description: &str) {
        if self.mode.shows_status() {
            writeln!(
                self.term,
                "{} {}",
                self.theme.dim.apply_to(format_counter(current, total)),
                self.theme.format_step(name, description)
            )
            .ok();
        }
    }

    fn show_skipped(&mut self, current: usize, total: usize, name: &str) {
        if self.mode.shows_status() {
            writeln!(
                self.term,
                "{} {}",
                self.theme.dim.apply_to(format_counter(current, total)),
                self.theme.format_already_completed(name)
            )
            .ok();
        }
    }

    fn show_error_block(&mut self, command: &str, output: &str, hint: Option<&str>) {
        let mut err = Term::stderr();
        let b = &self.theme.border;
        writeln!(
            err,
            "    {} {}",
            b.apply_to("┌─"),
            b.apply_to("Command ──────────────────────────")
        )
        .ok();
        writeln!(
            err,
            "    {} {}",
            b.apply_to("│"),
            self.theme.command.apply_to(command)
        )
        .ok();

        if !output.is_empty() {
            writeln!(
                err,
                "    {} {}",
                b.apply_to("├─"),
                b.apply_to("Output ───────────────────────────")
            )
            .ok();
            for line in output.lines() {
                writeln!(err, "    {} {}", b.apply_to("│"), line).ok();
            }
        }

        writeln!(
            err,
            "    {}",
            b.apply_to("└────────────────────────────────────")
        )
        .ok();

        if let Some(h) = hint {
            writeln!(err).ok();
            writeln!(
                err,
                "    {} {}",
                self.theme.hint.apply_to("Hint:"),
                self.theme.hint.apply_to(h)
            )
            .ok();
        }
    }

    fn show_run_summary(&mut self, report: &RunReport) {
        if !self.mode.shows_status() {
            return;
        }

        let b = &self.theme.border;

        writeln!(self.term).ok();
        writeln!(
            self.term,
            "  {} {}",
            b.apply_to("┌─"),
            b.apply_to("Summary ──────────────────────────")
        )
        .ok();

        for outcome in report.outcomes() {
            let icon = match outcome.status {
                OutcomeStatus::Succeeded => self.theme.success.apply_to('✓'),
                OutcomeStatus::Skipped => self.theme.dim.apply_to('○'),
                OutcomeStatus::Failed => self.theme.error.apply_to('✗'),
            };
            let right_side = match outcome.status {
                OutcomeStatus::Skipped => self.theme.dim.apply_to("already completed".to_string()),
                _ => self.theme.duration.apply_to(format_duration(outcome.duration)),
            };

            writeln!(
                self.term,
                "  {} {} {:<24} {}",
                b.apply_to("│"),
                icon,
                outcome.name,
                right_side,
            )
            .ok();
        }

        writeln!(
            self.term,
            "  {}",
            b.apply_to("├────────────────────────────────────")
        )
        .ok();
        writeln!(
            self.term,
            "  {} Total: {} {} {} succeeded {} {} skipped {} {} failed",
            b.apply_to("│"),
            self.theme.duration.apply_to(format_duration(report.duration())),
            self.theme.dim.apply_to("·"),
            report.count(OutcomeStatus::Succeeded),
            self.theme.dim.apply_to("·"),
            report.count(OutcomeStatus::Skipped),
            self.theme.dim.apply_to("·"),
            report.count(OutcomeStatus::Failed),
        )
        .ok();
        writeln!(
            self.term,
            "  {}",
            b.apply_to("└────────────────────────────────────")
        )
        .ok();
    }

    fn is_interactive(&self) -> bool {
        self.term.is_term()
    }
}

/// Create the appropriate UI based on context.
pub fn create_ui(interactive: bool, mode: OutputMode) -> SharedUi {
    if interactive && Term::stdout().is_term() {
        shared(TerminalUI::new(mode))
    } else {
        shared(NonInteractiveUI::new(mode))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminal_ui_output_mode() {
        let ui = TerminalUI::new(OutputMode::Quiet);
        assert_eq!(ui.output_mode(), OutputMode::Quiet);
    }

    #[test]
    fn create_ui_non_interactive() {
        let ui = create_ui(false, OutputMode::Normal);
        assert!(!ui.borrow().is_interactive());
    }

    #[test]
    fn quiet_terminal_summary_does_not_panic() {
        let mut ui = TerminalUI::new(OutputMode::Quiet);
        ui.show_run_summary(&RunReport::new());
    }
}
