//! Emitters that write a processed batch in different output formats.

use crate::batch::MessageBatch;
use std::io::Write;

/// Trait for emitting processed batches in various formats.
pub trait MessageEmitter {
    /// Emit the messages of a batch.
    fn emit(&mut self, batch: &MessageBatch) -> std::io::Result<()>;

    /// Emit a summary line.
    fn emit_summary(&mut self, batch: &MessageBatch) -> std::io::Result<()>;
}

/// Terminal output with a coloured status heading.
///
/// When errors are present only the errors are shown; warnings are shown on
/// an otherwise clean build.
pub struct TerminalEmitter<W: Write> {
    writer: W,
    colored: bool,
}

impl<W: Write> TerminalEmitter<W> {
    /// Create a new terminal emitter.
    pub fn new(writer: W, colored: bool) -> Self {
        Self { writer, colored }
    }

    fn paint(&self, text: &str, color: &'static str) -> String {
        if self.colored {
            format!("\x1b[1m{}{}\x1b[0m", color, text)
        } else {
            text.to_string()
        }
    }
}

const RED: &str = "\x1b[31m";
const YELLOW: &str = "\x1b[33m";
const GREEN: &str = "\x1b[32m";

impl<W: Write> MessageEmitter for TerminalEmitter<W> {
    fn emit(&mut self, batch: &MessageBatch) -> std::io::Result<()> {
        let (heading, messages) = if batch.has_errors() {
            (self.paint("Failed to compile.", RED), &batch.errors)
        } else if batch.has_warnings() {
            (self.paint("Compiled with warnings.", YELLOW), &batch.warnings)
        } else {
            (self.paint("Compiled successfully!", GREEN), &batch.warnings)
        };

        writeln!(self.writer, "{}", heading)?;
        writeln!(self.writer)?;
        for message in messages {
            writeln!(self.writer, "{}", message)?;
            writeln!(self.writer)?;
        }
        Ok(())
    }

    fn emit_summary(&mut self, batch: &MessageBatch) -> std::io::Result<()> {
        let errors = batch.errors.len();
        let warnings = batch.warnings.len();
        if errors == 0 && warnings == 0 {
            return Ok(());
        }

        let mut summary = String::new();
        if errors > 0 {
            summary.push_str(&format!(
                "{} error{}",
                errors,
                if errors == 1 { "" } else { "s" }
            ));
        }
        if errors > 0 && warnings > 0 {
            summary.push_str(" and ");
        }
        if warnings > 0 {
            summary.push_str(&format!(
                "{} warning{}",
                warnings,
                if warnings == 1 { "" } else { "s" }
            ));
        }
        summary.push_str(" reported");

        let color = if errors > 0 { RED } else { YELLOW };
        let line = self.paint(&summary, color);
        writeln!(self.writer, "{}", line)
    }
}

/// JSON output for tooling integration.
pub struct JsonEmitter<W: Write> {
    writer: W,
}

impl<W: Write> JsonEmitter<W> {
    /// Create a new JSON emitter.
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> MessageEmitter for JsonEmitter<W> {
    fn emit(&mut self, batch: &MessageBatch) -> std::io::Result<()> {
        serde_json::to_writer(&mut self.writer, batch)?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn emit_summary(&mut self, batch: &MessageBatch) -> std::io::Result<()> {
        let summary = serde_json::json!({
            "type": "summary",
            "errors": batch.errors.len(),
            "warnings": batch.warnings.len(),
            "syntax_errors": batch.syntax_error_count(),
        });
        serde_json::to_writer(&mut self.writer, &summary)?;
        writeln!(self.writer)?;
        Ok(())
    }
}

/// Messages only, separated by blank lines.
pub struct SimpleEmitter<W: Write> {
    writer: W,
}

impl<W: Write> SimpleEmitter<W> {
    /// Create a new simple emitter.
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> MessageEmitter for SimpleEmitter<W> {
    fn emit(&mut self, batch: &MessageBatch) -> std::io::Result<()> {
        let messages = if batch.has_errors() {
            &batch.errors
        } else {
            &batch.warnings
        };
        let body = messages
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join("\n\n");
        if !body.is_empty() {
            writeln!(self.writer, "{}", body)?;
        }
        Ok(())
    }

    fn emit_summary(&mut self, batch: &MessageBatch) -> std::io::Result<()> {
        writeln!(
            self.writer,
            "{} error(s), {} warning(s)",
            batch.errors.len(),
            batch.warnings.len()
        )
    }
}
