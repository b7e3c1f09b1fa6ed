//! Visual theme and styling.

use console::Style;

/// Styles used by the terminal UI.
#[derive(Debug, Clone)]
pub struct WrTheme {
    /// Completed and skipped steps.
    pub success: Style,
    pub warning: Style,
    pub error: Style,
    /// The step currently running.
    pub running: Style,
    /// Counters, descriptions and other secondary text.
    pub dim: Style,
    pub header: Style,
    pub duration: Style,
    /// Command lines echoed in error blocks.
    pub command: Style,
    /// Box-drawing characters.
    pub border: Style,
    pub hint: Style,
}

impl Default for WrTheme {
    fn default() -> Self {
        Self::new()
    }
}

impl WrTheme {
    /// Colored theme for terminals.
    pub fn new() -> Self {
        Self {
            success: Style::new().green(),
            warning: Style::new().yellow(),
            error: Style::new().red().bold(),
            running: Style::new().cyan(),
            dim: Style::new().dim(),
            header: Style::new().bold().cyan(),
            duration: Style::new().dim(),
            command: Style::new().dim().italic(),
            border: Style::new().dim(),
            hint: Style::new().yellow().dim(),
        }
    }

    /// Theme without colors (for non-TTY or --no-color).
    pub fn plain() -> Self {
        Self {
            success: Style::new(),
            warning: Style::new(),
            error: Style::new(),
            running: Style::new(),
            dim: Style::new(),
            header: Style::new(),
            duration: Style::new(),
            command: Style::new(),
            border: Style::new(),
            hint: Style::new(),
        }
    }

    pub fn format_success(&self, msg: &str) -> String {
        format!("{}", self.success.apply_to(format!("✓ {}", msg)))
    }

    pub fn format_warning(&self, msg: &str) -> String {
        format!("{}", self.warning.apply_to(format!("⚠ {}", msg)))
    }

    pub fn format_error(&self, msg: &str) -> String {
        format!("{}", self.error.apply_to(format!("✗ {}", msg)))
    }

    /// `→ name - description` for a step about to run.
    pub fn format_step(&self, name: &str, description: &str) -> String {
        format!(
            "{} {}",
            self.running.apply_to(format!("→ {}", name)),
            self.dim.apply_to(format!("- {}", description))
        )
    }

    /// `✓ name (already completed)` for a step the runner skipped.
    pub fn format_already_completed(&self, name: &str) -> String {
        format!(
            "{} {}",
            self.format_success(name),
            self.dim.apply_to("(already completed)")
        )
    }

    pub fn format_header(&self, title: &str) -> String {
        format!("{}", self.header.apply_to(title))
    }
}

/// Whether stdout should be colored.
///
/// Honors `NO_COLOR` (https://no-color.org/), which `--no-color` sets.
pub fn should_use_colors() -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    console::Term::stdout().is_term()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_theme_renders_status_icons() {
        let theme = WrTheme::plain();
        assert_eq!(theme.format_success("Check Node.js"), "✓ Check Node.js");
        assert_eq!(theme.format_warning("not on PATH"), "⚠ not on PATH");
        assert_eq!(theme.format_error("Install uv failed"), "✗ Install uv failed");
    }

    #[test]
    fn step_line_names_the_step_and_its_description() {
        let theme = WrTheme::plain();
        assert_eq!(
            theme.format_step("Install uv", "Install uv package manager"),
            "→ Install uv - Install uv package manager"
        );
    }

    #[test]
    fn skipped_step_is_marked_already_completed() {
        let theme = WrTheme::plain();
        assert_eq!(
            theme.format_already_completed("Check Python"),
            "✓ Check Python (already completed)"
        );
    }
}
