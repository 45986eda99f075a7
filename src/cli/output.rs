//! Output formatting for tfjunos
//!
//! Results go to stdout, messages to stderr. In JSON mode stdout carries a
//! single JSON document per command.

use colored::Colorize;
use serde::Serialize;
use tfjunos::lifecycle::{Diagnostics, Severity};

/// Output formatter for the human and JSON modes
pub struct OutputFormatter {
    use_color: bool,
    json_mode: bool,
    verbosity: u8,
}

impl OutputFormatter {
    /// Create a new output formatter
    pub fn new(use_color: bool, json_mode: bool, verbosity: u8) -> Self {
        // Respect NO_COLOR environment variable
        let use_color = use_color && std::env::var("NO_COLOR").is_err();
        if !use_color {
            colored::control::set_override(false);
        }

        Self {
            use_color,
            json_mode,
            verbosity,
        }
    }

    pub fn is_json(&self) -> bool {
        self.json_mode
    }

    pub fn use_color(&self) -> bool {
        self.use_color
    }

    /// Print set lines, one per line
    pub fn lines(&self, lines: &[String]) -> serde_json::Result<()> {
        if self.json_mode {
            return self.json(&serde_json::json!({ "lines": lines }));
        }
        for line in lines {
            println!("{}", line);
        }
        Ok(())
    }

    /// Print a value as pretty JSON on stdout
    pub fn json<T: Serialize + ?Sized>(&self, value: &T) -> serde_json::Result<()> {
        println!("{}", serde_json::to_string_pretty(value)?);
        Ok(())
    }

    /// Print diagnostics; JSON mode emits them as one array
    pub fn diagnostics(&self, diagnostics: &Diagnostics) -> serde_json::Result<()> {
        if self.json_mode {
            return self.json(diagnostics);
        }
        for diagnostic in diagnostics {
            let label = match diagnostic.severity {
                Severity::Error => "Error:".red().bold(),
                Severity::Warning => "Warning:".yellow().bold(),
            };
            print!("{} {}: {}", label, diagnostic.summary, diagnostic.detail);
            match &diagnostic.attribute {
                Some(path) => println!(" {}", format!("(at {})", path).dimmed()),
                None => println!(),
            }
        }
        Ok(())
    }

    /// Print an error message
    pub fn error(&self, message: &str) {
        if self.json_mode {
            eprintln!("{}", serde_json::json!({ "type": "error", "message": message }));
            return;
        }
        eprintln!("{} {}", "ERROR:".red().bold(), message);
    }

    /// Print a warning message
    pub fn warning(&self, message: &str) {
        if self.json_mode {
            eprintln!("{}", serde_json::json!({ "type": "warning", "message": message }));
            return;
        }
        eprintln!("{} {}", "WARNING:".yellow().bold(), message);
    }

    /// Print an info message (verbosity >= 1)
    pub fn info(&self, message: &str) {
        if self.verbosity < 1 {
            return;
        }
        if self.json_mode {
            eprintln!("{}", serde_json::json!({ "type": "info", "message": message }));
            return;
        }
        eprintln!("{} {}", "INFO:".blue(), message);
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        if self.json_mode {
            return;
        }
        eprintln!("{}", message.green());
    }
}
