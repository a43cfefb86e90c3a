//! Terminal output
//!
//! Diagnostics go to stderr, tree data to stdout. `colored` honors
//! NO_COLOR and CLICOLOR_FORCE.

use std::fmt::Display;

use colored::Colorize;

pub fn error(msg: impl Display) {
    eprintln!("{} {}", "error:".red().bold(), msg);
}

pub fn warning(msg: impl Display) {
    eprintln!("{} {}", "warning:".yellow().bold(), msg);
}

/// Result line of `check` and `config init`.
pub fn success(msg: impl Display) {
    println!("{} {}", "ok:".green().bold(), msg);
}

/// `label: value`, label in green.
pub fn label(label: &str, value: impl Display) {
    println!("{} {}", format!("{label}:").green(), value);
}

/// Uncolored data line, safe to pipe.
pub fn line(msg: impl Display) {
    println!("{msg}");
}
