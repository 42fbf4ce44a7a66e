use std::path::{Path, PathBuf};

use crate::error::{AppError, AppResult, ConfigError};

use super::types::ConfigFile;

/// Filenames probed in the working directory when `--config` is absent.
/// Also consulted by the entry point to decide whether a bare invocation
/// should print help or run from config.
pub const DEFAULT_CONFIG_FILES: [&str; 2] = ["qget.toml", "qget.json"];

/// Loads the config file at `path`, or probes the default locations when
/// no path was given. Returns `None` when nothing is found.
///
/// # Errors
///
/// Returns an error when the config file cannot be read or parsed.
pub fn load_config(path: Option<&str>) -> AppResult<Option<ConfigFile>> {
    if let Some(path) = path {
        return Ok(Some(load_config_file(Path::new(path))?));
    }

    for candidate in DEFAULT_CONFIG_FILES {
        let candidate = PathBuf::from(candidate);
        if candidate.exists() {
            return Ok(Some(load_config_file(&candidate)?));
        }
    }

    Ok(None)
}

pub(crate) fn load_config_file(path: &Path) -> AppResult<ConfigFile> {
    let content = std::fs::read_to_string(path).map_err(|err| {
        AppError::config(ConfigError::ReadConfig {
            path: path.to_path_buf(),
            source: err,
        })
    })?;
    parse_config(path, &content)
}

fn parse_config(path: &Path, content: &str) -> AppResult<ConfigFile> {
    let ext = path
        .extension()
        .and_then(|ext| ext.to_str())
        .ok_or_else(|| AppError::config(ConfigError::MissingExtension))?;

    match ext {
        "toml" => toml::from_str(content).map_err(|err| {
            AppError::config(ConfigError::ParseToml {
                path: path.to_path_buf(),
                source: err,
            })
        }),
        "json" => serde_json::from_str(content).map_err(|err| {
            AppError::config(ConfigError::ParseJson {
                path: path.to_path_buf(),
                source: err,
            })
        }),
        other => Err(AppError::config(ConfigError::UnsupportedExtension {
            ext: other.to_owned(),
        })),
    }
}
