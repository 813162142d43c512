//! Command implementations for the reviews CLI.
//!
//! Each command module provides:
//! - Args struct for clap argument parsing
//! - execute() function that performs the command
//! - Human-readable and JSON output formatting

pub mod clean;
pub mod lexicon;
pub mod run;
pub mod trend;

use anyhow::Result;
use serde::Serialize;

/// Print output in JSON or human-readable format.
pub fn output<T: Serialize + HumanReadable>(value: &T, human: bool) -> Result<()> {
    if human {
        value.print_human();
    } else {
        println!("{}", serde_json::to_string_pretty(value)?);
    }
    Ok(())
}

/// Trait for types that can be printed in human-readable format.
pub trait HumanReadable {
    fn print_human(&self);
}

/// Format an optional float, or a dash when absent.
pub fn format_optional(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{:.3}", v))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_optional_dash() {
        assert_eq!(format_optional(None), "-");
        assert_eq!(format_optional(Some(2.0 / 3.0)), "0.667");
    }
}
