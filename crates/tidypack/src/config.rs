//! `tidypack.toml` loading

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tidypack_format::{BatchOptions, FormatOptions};

/// Config file looked up in the working directory when `--config` is absent.
pub const CONFIG_FILE: &str = "tidypack.toml";

pub const DEFAULT_CONFIG: &str = r#"# tidypack configuration

[format]
# Drop stack frames that do not point into webpack:// sources
strip_internal_frames = true
# Collapse runs of blank lines
collapse_blank_lines = true

[batch]
# Report only syntax errors when one is present
isolate_syntax_errors = true

[output]
# "inverse" or "none"
highlight = "inverse"
"#;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// How the header line of each message is decorated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HighlightStyle {
    #[default]
    Inverse,
    None,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub highlight: HighlightStyle,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub format: FormatOptions,
    pub batch: BatchOptions,
    pub output: OutputConfig,
}

impl Config {
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Load a config file from an explicit path.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load `explicit` if given, else `tidypack.toml` in `dir` if it exists,
    /// else the defaults.
    pub fn discover(explicit: Option<&Path>, dir: &Path) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            log::debug!("loading config from {}", path.display());
            return Self::load(path);
        }

        let candidate = dir.join(CONFIG_FILE);
        if candidate.is_file() {
            log::debug!("loading config from {}", candidate.display());
            Self::load(&candidate)
        } else {
            log::debug!("no {} found, using defaults", CONFIG_FILE);
            Ok(Self::default())
        }
    }
}
