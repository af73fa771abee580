use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use pagetext_core::{parse_overrides, ConfigError, TemplateOverride};
use pagetext_logging::pagetext_info;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("failed to read config {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid config {path:?}: {source}")]
    Invalid {
        path: PathBuf,
        #[source]
        source: ConfigError,
    },
}

/// Reads the site override list. A missing file means "no overrides".
pub fn load_overrides(path: &Path) -> Result<Vec<TemplateOverride>, ConfigLoadError> {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            pagetext_info!("no config at {:?}, using the default template for every host", path);
            return Ok(Vec::new());
        }
        Err(source) => {
            return Err(ConfigLoadError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    let overrides = parse_overrides(&content).map_err(|source| ConfigLoadError::Invalid {
        path: path.to_path_buf(),
        source,
    })?;
    pagetext_info!("loaded {} override records from {:?}", overrides.len(), path);
    Ok(overrides)
}
