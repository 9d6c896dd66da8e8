//! The message formatter: the rewrite passes composed in order.

use crate::highlight::{Highlight, Plain};
use crate::passes;
use serde::{Deserialize, Serialize};

/// Switches for the optional cleanup passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatOptions {
    /// Remove stack frames that do not point into `webpack:` sources
    pub strip_internal_frames: bool,
    /// Collapse runs of blank lines to a single blank line
    pub collapse_blank_lines: bool,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            strip_internal_frames: true,
            collapse_blank_lines: true,
        }
    }
}

/// Turns raw bundler diagnostics into readable messages.
///
/// Formatting is total: any input string, including an empty one, produces a
/// trimmed result.
#[derive(Debug, Clone, Default)]
pub struct MessageFormatter<H = Plain> {
    highlighter: H,
    options: FormatOptions,
}

impl MessageFormatter<Plain> {
    /// Create a formatter that leaves the header undecorated.
    pub fn new() -> Self {
        Self::with_highlighter(Plain)
    }
}

impl<H: Highlight> MessageFormatter<H> {
    /// Create a formatter that decorates each header with `highlighter`.
    pub fn with_highlighter(highlighter: H) -> Self {
        Self {
            highlighter,
            options: FormatOptions::default(),
        }
    }

    /// Replace the pass options.
    pub fn with_options(mut self, options: FormatOptions) -> Self {
        self.options = options;
        self
    }

    /// Format one raw message.
    pub fn format(&self, message: &str) -> String {
        let lines = passes::split_lines(message);
        let lines = passes::strip_module_wrappers(lines);
        let lines = passes::normalize_parsing_errors(lines);

        let message = lines.join("\n");
        let message = passes::smoosh_css_syntax_errors(&message);
        let message = passes::rewrite_export_errors(&message);

        let lines = passes::split_lines(&message);
        let lines = passes::remove_leading_blank_line(lines);
        let lines = passes::clean_header_location(lines);
        let lines = passes::simplify_module_not_found(lines);
        let lines = passes::add_sass_hint(lines);
        let lines = passes::highlight_header(lines, &self.highlighter);

        let mut message = lines.join("\n");
        if self.options.strip_internal_frames {
            message = passes::strip_internal_frames(&message);
        }

        let mut lines = passes::split_lines(&message);
        if self.options.collapse_blank_lines {
            lines = passes::collapse_blank_lines(lines);
        }

        lines.join("\n").trim().to_string()
    }
}

/// Format `message` with the default options and no header decoration.
pub fn format_message(message: &str) -> String {
    MessageFormatter::new().format(message)
}
