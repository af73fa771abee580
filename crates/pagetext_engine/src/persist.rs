use std::fs;
use std::io::{self, Write};
use std::path::{Component, Path, PathBuf};

use pagetext_logging::pagetext_debug;
use tempfile::NamedTempFile;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("output directory missing or not writable: {0}")]
    OutputDir(String),
    #[error("refusing to write outside the output root: {0:?}")]
    EscapesRoot(PathBuf),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// Ensure output directory exists; create if missing.
pub fn ensure_output_dir(dir: &Path) -> Result<(), PersistError> {
    if dir.exists() {
        let meta = fs::metadata(dir).map_err(|e| PersistError::OutputDir(e.to_string()))?;
        if !meta.is_dir() {
            return Err(PersistError::OutputDir("path is not a directory".into()));
        }
    } else {
        fs::create_dir_all(dir).map_err(|e| PersistError::OutputDir(e.to_string()))?;
    }
    Ok(())
}

/// Writes files below `root` via a temp file in the target directory followed
/// by a rename, so readers never see a half-written document.
pub struct AtomicFileWriter {
    root: PathBuf,
}

impl AtomicFileWriter {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Writes `content` to `root/relative`, creating intermediate directories.
    pub fn write(&self, relative: &Path, content: &str) -> Result<PathBuf, PersistError> {
        if relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_)))
        {
            return Err(PersistError::EscapesRoot(relative.to_path_buf()));
        }

        let target = self.root.join(relative);
        let dir = target
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.root.clone());
        ensure_output_dir(&dir)?;

        let mut tmp = NamedTempFile::new_in(&dir)?;
        tmp.write_all(content.as_bytes())?;
        tmp.flush()?;
        tmp.as_file_mut().sync_all()?;

        // Rename over an existing file replaces it in one step.
        tmp.persist(&target).map_err(|e| PersistError::Io(e.error))?;
        pagetext_debug!("wrote {} bytes to {:?}", content.len(), target);
        Ok(target)
    }
}
