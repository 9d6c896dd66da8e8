//! tidypack - readable webpack errors
//!
//! CLI driver that cleans up the errors and warnings of a webpack build.

mod commands;
mod config;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};

/// Readable webpack errors and warnings
#[derive(Parser, Debug)]
#[command(name = "tidypack")]
#[command(author, version, about = "Turn raw webpack diagnostics into readable messages")]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Output format
    #[arg(long, global = true, default_value = "text")]
    format: OutputFormat,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Print messages only, without heading or summary
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,
}

#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Format a JSON batch of webpack errors and warnings
    Format(commands::format::FormatArgs),

    /// Write a default tidypack.toml
    Init(commands::init::InitArgs),
}

/// Flags whose value is passed as the next argument
const FLAGS_WITH_VALUE: &[&str] = &["--format", "--config"];

/// Check if the first non-flag argument is a JSON file rather than a subcommand
fn is_shorthand_invocation(args: &[String]) -> bool {
    let mut iter = args.iter().skip(1);
    while let Some(arg) = iter.next() {
        if FLAGS_WITH_VALUE.contains(&arg.as_str()) {
            iter.next();
            continue;
        }
        if arg.starts_with('-') {
            continue;
        }
        if arg.ends_with(".json") {
            return true;
        }
        // First non-flag arg decides
        break;
    }
    false
}

/// Transform shorthand args (tidypack stats.json) to subcommand form
fn transform_shorthand_args(args: Vec<String>) -> Vec<String> {
    let mut iter = args.into_iter();
    let mut new_args: Vec<String> = iter.next().into_iter().collect();
    new_args.push("format".to_string());
    new_args.extend(iter);
    new_args
}

fn log_level(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let effective_args = if is_shorthand_invocation(&args) {
        transform_shorthand_args(args)
    } else {
        args
    };

    let cli = Cli::parse_from(effective_args);

    // RUST_LOG wins over -v
    let env = env_logger::Env::default().default_filter_or(log_level(cli.verbose));
    env_logger::Builder::from_env(env).init();

    // Determine if colors should be used
    let use_color = !cli.no_color && !cli.quiet && atty::is(atty::Stream::Stdout);

    let Some(command) = cli.command else {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        cmd.print_help()?;
        println!();
        return Ok(());
    };

    match command {
        Commands::Format(args) => commands::format::run(args, cli.format, use_color, cli.quiet),
        Commands::Init(args) => commands::init::run(args, cli.format),
    }
}
