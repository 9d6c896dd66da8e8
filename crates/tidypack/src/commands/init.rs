//! Init command - write a default tidypack.toml

use anyhow::Result;
use clap::Args;
use std::fs;
use std::path::PathBuf;

use crate::config::{CONFIG_FILE, DEFAULT_CONFIG};
use crate::OutputFormat;

#[derive(Args, Debug)]
pub struct InitArgs {
    /// Project directory (default: current)
    #[arg(default_value = ".")]
    pub path: PathBuf,
}

pub fn run(args: InitArgs, format: OutputFormat) -> Result<()> {
    fs::create_dir_all(&args.path)?;
    let config_path = args.path.join(CONFIG_FILE);

    let created = if config_path.exists() {
        log::debug!("{} already exists, leaving it alone", config_path.display());
        false
    } else {
        fs::write(&config_path, DEFAULT_CONFIG)?;
        true
    };

    match format {
        OutputFormat::Text => {
            if created {
                println!("Created {}", config_path.display());
            } else {
                println!("Skipped {} (already exists)", config_path.display());
            }
        }
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::json!({
                    "success": true,
                    "path": config_path.display().to_string(),
                    "created": created,
                })
            );
        }
    }

    Ok(())
}
