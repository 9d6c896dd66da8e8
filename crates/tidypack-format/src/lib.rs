//! Readable formatting for webpack errors and warnings.
//!
//! This crate turns raw bundler diagnostics into messages fit for a
//! developer's terminal:
//! - Wrapper annotations and internal stack frames are stripped
//! - Parser, CSS and import errors are normalized to one wording
//! - Verbose "module not found" traces are collapsed
//! - When a syntax error is present, only syntax errors are reported
//!
//! Header decoration is pluggable through [`Highlight`], so the formatter
//! works equally for terminals, HTML overlays or log files.
//!
//! # Example
//!
//! ```
//! use tidypack_format::{process_batch, MessageBatch};
//!
//! let raw = MessageBatch::new(
//!     vec![
//!         "./src/App.js 3:1-20\nLine 5:10  Parsing error: Unexpected token".to_string(),
//!         "./src/index.js\nModule not found: Error: Can't resolve './missing'".to_string(),
//!     ],
//!     Vec::new(),
//! );
//!
//! let result = process_batch(&raw);
//! assert_eq!(
//!     result.errors,
//!     vec!["./src/App.js\nSyntax error: Unexpected token (5:10)".to_string()]
//! );
//! ```

pub mod batch;
pub mod emitter;
pub mod formatter;
pub mod highlight;
pub mod passes;

// Re-export commonly used types
pub use batch::{is_syntax_error, process_batch, BatchOptions, BatchProcessor, MessageBatch};
pub use emitter::{JsonEmitter, MessageEmitter, SimpleEmitter, TerminalEmitter};
pub use formatter::{format_message, FormatOptions, MessageFormatter};
pub use highlight::{Highlight, Inverse, Plain};
pub use passes::SYNTAX_ERROR_LABEL;
