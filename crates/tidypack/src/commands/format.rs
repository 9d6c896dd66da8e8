//! Format command - clean up bundler errors and warnings

use anyhow::{anyhow, Context, Result};
use clap::Args;
use serde::Deserialize;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use tidypack_format::{
    BatchProcessor, Highlight, Inverse, JsonEmitter, MessageBatch, MessageEmitter,
    MessageFormatter, Plain, SimpleEmitter, TerminalEmitter,
};

use crate::config::{Config, HighlightStyle};
use crate::OutputFormat;

#[derive(Args, Debug)]
pub struct FormatArgs {
    /// JSON file with `errors` and `warnings` arrays ("-" reads stdin)
    #[arg(default_value = "-")]
    pub input: PathBuf,

    /// Path to a tidypack.toml (defaults to ./tidypack.toml if present)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Keep stack frames that point outside webpack sources
    #[arg(long)]
    pub keep_frames: bool,

    /// Report every error even when a syntax error is present
    #[arg(long)]
    pub all_errors: bool,

    /// Do not highlight the header line of each message
    #[arg(long)]
    pub plain: bool,

    /// Treat warnings as errors
    #[arg(long)]
    pub strict: bool,
}

/// One entry of a stats `errors`/`warnings` array.
///
/// Older webpack versions emit plain strings, newer ones emit objects with a
/// `message` field.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawEntry {
    Text(String),
    Object { message: String },
}

impl From<RawEntry> for String {
    fn from(entry: RawEntry) -> Self {
        match entry {
            RawEntry::Text(message) | RawEntry::Object { message } => message,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawStats {
    errors: Vec<RawEntry>,
    warnings: Vec<RawEntry>,
}

/// Decode a stats JSON document into a batch of raw messages.
pub(crate) fn parse_batch(content: &str) -> serde_json::Result<MessageBatch> {
    let stats: RawStats = serde_json::from_str(content)?;
    Ok(MessageBatch::new(
        stats.errors.into_iter().map(String::from).collect(),
        stats.warnings.into_iter().map(String::from).collect(),
    ))
}

fn read_input(input: &Path) -> Result<String> {
    if input == Path::new("-") {
        let mut content = String::new();
        std::io::stdin()
            .read_to_string(&mut content)
            .context("failed to read stdin")?;
        Ok(content)
    } else {
        fs::read_to_string(input).with_context(|| format!("failed to read {}", input.display()))
    }
}

/// Fold command-line overrides into the loaded config.
pub(crate) fn apply_overrides(config: &mut Config, args: &FormatArgs) {
    if args.keep_frames {
        config.format.strip_internal_frames = false;
    }
    if args.all_errors {
        config.batch.isolate_syntax_errors = false;
    }
    if args.plain {
        config.output.highlight = HighlightStyle::None;
    }
}

fn process_with<H: Highlight>(raw: &MessageBatch, highlighter: H, config: &Config) -> MessageBatch {
    let formatter = MessageFormatter::with_highlighter(highlighter).with_options(config.format);
    BatchProcessor::new(formatter)
        .with_options(config.batch)
        .process(raw)
}

pub fn run(args: FormatArgs, format: OutputFormat, use_color: bool, quiet: bool) -> Result<()> {
    let cwd = std::env::current_dir().context("failed to resolve working directory")?;
    let mut config = Config::discover(args.config.as_deref(), &cwd)?;
    apply_overrides(&mut config, &args);

    let content = read_input(&args.input)?;
    let raw = parse_batch(&content)
        .with_context(|| format!("invalid message batch in {}", args.input.display()))?;
    log::info!(
        "formatting {} error(s) and {} warning(s)",
        raw.errors.len(),
        raw.warnings.len()
    );

    let highlight = matches!(format, OutputFormat::Text)
        && use_color
        && config.output.highlight == HighlightStyle::Inverse;
    let batch = if highlight {
        process_with(&raw, Inverse, &config)
    } else {
        process_with(&raw, Plain, &config)
    };

    if batch.errors.len() < raw.errors.len() {
        log::info!(
            "showing {} syntax error(s) out of {} error(s)",
            batch.errors.len(),
            raw.errors.len()
        );
    }

    let stdout = std::io::stdout();
    match format {
        OutputFormat::Text if quiet => {
            SimpleEmitter::new(stdout.lock()).emit(&batch)?;
        }
        OutputFormat::Text => {
            let mut emitter = TerminalEmitter::new(stdout.lock(), use_color);
            emitter.emit(&batch)?;
            emitter.emit_summary(&batch)?;
        }
        OutputFormat::Json => {
            let mut emitter = JsonEmitter::new(stdout.lock());
            emitter.emit(&batch)?;
            emitter.emit_summary(&batch)?;
        }
    }

    if batch.has_errors() {
        Err(anyhow!("Compilation failed with {} error(s)", batch.errors.len()))
    } else if args.strict && batch.has_warnings() {
        Err(anyhow!(
            "Compilation failed with {} warning(s) (strict mode)",
            batch.warnings.len()
        ))
    } else {
        Ok(())
    }
}
