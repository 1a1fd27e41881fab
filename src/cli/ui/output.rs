use console::style;

use crate::constants::reporting::RECOMMENDATION_THRESHOLD;
use crate::reporting::score_bar;
use crate::types::EngineError;

/// Styled terminal output for command handlers
pub struct Output;

impl Output {
    pub fn new() -> Self {
        Self
    }

    pub fn success(&self, message: &str) {
        println!("{} {}", style("✓").green(), message);
    }

    pub fn error(&self, message: &str) {
        eprintln!("{} {}", style("✗").red(), message);
    }

    pub fn warning(&self, message: &str) {
        println!("{} {}", style("⚠").yellow(), message);
    }

    pub fn info(&self, message: &str) {
        println!("{} {}", style("ℹ").blue(), message);
    }

    pub fn header(&self, message: &str) {
        println!("\n{}", style(message).bold().underlined());
    }

    pub fn section(&self, message: &str) {
        println!("\n{}", style(message).bold());
        println!("{}", "─".repeat(40));
    }

    pub fn field(&self, label: &str, value: impl std::fmt::Display) {
        println!("  {:<18} {}", style(label).dim(), value);
    }

    /// Score line with bar, colored by how it compares to the recommendation threshold
    pub fn score(&self, label: &str, score: u8) {
        let bar = score_bar(score);
        let colored = if score >= 80 {
            style(bar).green()
        } else if score >= RECOMMENDATION_THRESHOLD {
            style(bar).yellow()
        } else {
            style(bar).red()
        };
        println!("  {:<18} {:>3} {}", label, score, colored);
    }

    pub fn engine_errors(&self, errors: &[EngineError]) {
        for error in errors {
            self.error(&error.to_string());
        }
    }
}

impl Default for Output {
    fn default() -> Self {
        Self::new()
    }
}
