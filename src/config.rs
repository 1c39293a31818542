use std::path::PathBuf;

use serde::Deserialize;

use crate::error::{Error, Result};

/// Resolved runtime configuration.
pub struct Config {
    pub db_path: PathBuf,
}

/// Optional config file shape (~/.config/followtrack/config.toml).
#[derive(Deserialize)]
struct ConfigFile {
    db_path: Option<PathBuf>,
}

impl Config {
    /// Resolution order: --db flag, config file, platform data directory.
    pub fn resolve(db_flag: Option<PathBuf>) -> Result<Self> {
        if let Some(db_path) = db_flag {
            return Ok(Config { db_path });
        }

        if let Some(db_path) = config_file_db_path()? {
            return Ok(Config { db_path });
        }

        Ok(Config {
            db_path: default_db_path()?,
        })
    }
}

fn project_dirs() -> Result<directories::ProjectDirs> {
    directories::ProjectDirs::from("", "", "followtrack")
        .ok_or_else(|| Error::Config("could not determine home directory".to_string()))
}

/// A present config file must parse; a malformed one is an error, not a fallback.
fn config_file_db_path() -> Result<Option<PathBuf>> {
    let Ok(dirs) = project_dirs() else {
        return Ok(None);
    };

    let path = dirs.config_dir().join("config.toml");
    if !path.exists() {
        return Ok(None);
    }

    let text = std::fs::read_to_string(&path)?;
    let parsed: ConfigFile =
        toml::from_str(&text).map_err(|e| Error::Config(format!("{}: {e}", path.display())))?;

    Ok(parsed.db_path)
}

/// Database path under the platform data dir, created on demand
/// (~/.local/share/followtrack/followtrack.db or platform equivalent).
fn default_db_path() -> Result<PathBuf> {
    let dirs = project_dirs()?;
    let data_dir = dirs.data_dir().to_path_buf();
    std::fs::create_dir_all(&data_dir)?;
    Ok(data_dir.join("followtrack.db"))
}
