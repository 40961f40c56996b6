use colored::*;
use std::fmt::Display;

pub enum LogType {
    Success,
    Info,
    /// A business of the directory
    Business,
    /// A task of a business
    Task,
    Warning,
}

/// A builder for creating structured, tree-like log messages.
pub struct LogBuilder<'a> {
    log_type: LogType,
    message: String,
    details: Vec<(&'a str, Box<dyn Display>)>,
}

impl<'a> LogBuilder<'a> {
    pub fn new(log_type: LogType, message: impl Display) -> Self {
        Self {
            log_type,
            message: message.to_string(),
            details: Vec::new(),
        }
    }

    /// Adds a detail line under the message, can be chained
    pub fn with_branch(mut self, label: &'a str, value: impl Display + 'static) -> Self {
        self.details.push((label, Box::new(value)));
        self
    }

    pub fn with_optional_branch<T: Display + 'static>(
        self,
        label: &'a str,
        value: Option<T>,
    ) -> Self {
        match value {
            Some(val) => self.with_branch(label, val),
            None => self,
        }
    }

    pub fn print(self) {
        let (symbol, color) = match self.log_type {
            LogType::Success => ("✔", "green"),
            LogType::Info => ("ℹ", "blue"),
            LogType::Business => ("❯", "cyan"),
            LogType::Task => ("•", "yellow"),
            LogType::Warning => ("!", "red"),
        };

        println!(
            "\n{} {}",
            symbol.color(color).bold(),
            self.message.color(color).bold()
        );

        let count = self.details.len();
        for (i, (label, value)) in self.details.iter().enumerate() {
            let prefix = if i == count - 1 { "  ╰─" } else { "  ├─" };
            let padded_label = format!("{label}:");
            // Pad to 10 to align with "Completed:" and "Employees:"
            println!("{} {:<10} {}", prefix.dimmed(), padded_label.bold(), value);
        }
    }
}

/// Print a value as pretty JSON on stdout
pub fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> eyre::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
