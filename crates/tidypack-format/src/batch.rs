//! Batch processing of error and warning lists.

use crate::formatter::MessageFormatter;
use crate::highlight::{Highlight, Plain};
use crate::passes::SYNTAX_ERROR_LABEL;
use serde::{Deserialize, Serialize};

/// Errors and warnings collected from one bundler run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MessageBatch {
    /// Error messages, in emission order
    pub errors: Vec<String>,
    /// Warning messages, in emission order
    pub warnings: Vec<String>,
}

impl MessageBatch {
    /// Create a batch from error and warning lists.
    pub fn new(errors: Vec<String>, warnings: Vec<String>) -> Self {
        Self { errors, warnings }
    }

    /// Check if there are any errors.
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Check if there are any warnings.
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Count errors that carry the syntax error label.
    pub fn syntax_error_count(&self) -> usize {
        self.errors.iter().filter(|e| is_syntax_error(e)).count()
    }
}

/// Check whether a formatted message is a syntax error.
pub fn is_syntax_error(message: &str) -> bool {
    message.contains(SYNTAX_ERROR_LABEL)
}

/// Batch-level policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchOptions {
    /// When any error is a syntax error, report only the syntax errors
    pub isolate_syntax_errors: bool,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            isolate_syntax_errors: true,
        }
    }
}

/// Formats whole batches and applies the syntax error policy.
#[derive(Debug, Clone, Default)]
pub struct BatchProcessor<H = Plain> {
    formatter: MessageFormatter<H>,
    options: BatchOptions,
}

impl<H: Highlight> BatchProcessor<H> {
    pub fn new(formatter: MessageFormatter<H>) -> Self {
        Self {
            formatter,
            options: BatchOptions::default(),
        }
    }

    /// Replace the batch options.
    pub fn with_options(mut self, options: BatchOptions) -> Self {
        self.options = options;
        self
    }

    /// Format every message, then drop secondary errors when a syntax error
    /// is present. Warnings are only formatted, never filtered.
    pub fn process(&self, batch: &MessageBatch) -> MessageBatch {
        let mut errors: Vec<String> = batch
            .errors
            .iter()
            .map(|message| self.formatter.format(message))
            .collect();
        let warnings = batch
            .warnings
            .iter()
            .map(|message| self.formatter.format(message))
            .collect();

        if self.options.isolate_syntax_errors && errors.iter().any(|e| is_syntax_error(e)) {
            let before = errors.len();
            errors.retain(|e| is_syntax_error(e));
            if errors.len() < before {
                log::debug!(
                    "syntax error present, hiding {} secondary error(s)",
                    before - errors.len()
                );
            }
        }

        MessageBatch { errors, warnings }
    }
}

/// Process a batch with default options and no header decoration.
pub fn process_batch(batch: &MessageBatch) -> MessageBatch {
    BatchProcessor::new(MessageFormatter::new()).process(batch)
}
