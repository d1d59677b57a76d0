//! Display manager for the menu terminal UI
//!
//! All operator-facing output goes through here so that verbosity and color
//! settings apply uniformly. Debug and trace lines double as the program's
//! diagnostic log.

use colored::*;

use crate::cli::Verbosity;

/// Display manager for menu UI
#[derive(Debug, Clone)]
pub struct DisplayManager {
    verbosity: Verbosity,
}

impl DisplayManager {
    /// Create new display manager
    pub fn new(verbosity: Verbosity) -> Self {
        DisplayManager { verbosity }
    }

    /// Turn ANSI colors on or off for the whole process
    pub fn set_color(enabled: bool) {
        if enabled {
            colored::control::unset_override();
        } else {
            colored::control::set_override(false);
        }
    }

    pub fn verbosity(&self) -> Verbosity {
        self.verbosity
    }

    /// Show main menu
    pub fn show_menu(&self) {
        println!(
            "\n{}",
            "=== Rwanda Infrastructure Management System ===".bold().cyan()
        );
        for (i, label) in crate::repl::commands::MENU_LABELS.iter().enumerate() {
            println!("{}. {}", (i + 1).to_string().cyan(), label);
        }
    }

    /// Show section header
    pub fn show_section(&self, title: &str) {
        println!("\n{}", format!("=== {} ===", title).bold().cyan());
    }

    /// Print a pre-rendered block (tables, matrices) verbatim
    pub fn show_block(&self, block: &str) {
        print!("{}", block);
    }

    /// Plain result line
    pub fn show_line(&self, line: &str) {
        println!("{}", line);
    }

    /// Display success message
    pub fn show_success(&self, message: &str) {
        println!("{}", message.green());
    }

    /// Display error message
    pub fn show_error(&self, error: &str) {
        println!("{} {}", "Error:".red().bold(), error.red());
    }

    /// Display warning message
    pub fn show_warning(&self, warning: &str) {
        println!("{} {}", "Warning:".yellow().bold(), warning.yellow());
    }

    /// Display info message (hidden when quiet)
    pub fn show_info(&self, info: &str) {
        if self.verbosity.show_info() {
            println!("{} {}", "Info:".cyan(), info);
        }
    }

    /// Display debug message (verbose and above)
    pub fn show_debug(&self, debug: &str) {
        if self.verbosity.show_debug() {
            eprintln!("{} {}", "Debug:".dimmed(), debug.dimmed());
        }
    }

    /// Display trace message (very verbose only)
    pub fn show_trace(&self, trace: &str) {
        if self.verbosity.show_trace() {
            eprintln!("{} {}", "Trace:".dimmed(), trace.dimmed());
        }
    }
}

impl Default for DisplayManager {
    fn default() -> Self {
        Self::new(Verbosity::Normal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_manager_creation() {
        let manager = DisplayManager::new(Verbosity::Verbose);
        assert_eq!(manager.verbosity(), Verbosity::Verbose);
    }

    #[test]
    fn test_default_is_normal() {
        assert_eq!(DisplayManager::default().verbosity(), Verbosity::Normal);
    }

    #[test]
    fn test_message_display() {
        let manager = DisplayManager::new(Verbosity::VeryVerbose);
        manager.show_menu();
        manager.show_section("Test");
        manager.show_error("Test error");
        manager.show_warning("Test warning");
        manager.show_info("Test info");
        manager.show_debug("Test debug");
        manager.show_trace("Test trace");
    }

    #[test]
    fn test_quiet_display() {
        let manager = DisplayManager::new(Verbosity::Quiet);
        manager.show_info("Hidden info");
        manager.show_debug("Hidden debug");
        manager.show_success("Still shown");
    }
}
