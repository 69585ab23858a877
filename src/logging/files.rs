use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;

use crate::{
    error::{Error, Result},
    utils::{parse_date_stem, LOG_FILE_EXTENSION},
};

/// Directory holding one `<date>.log` file per period of `date_format`.
#[derive(Debug, Clone)]
pub struct LogDirectory {
    path: PathBuf,
}

impl LogDirectory {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn join(&self, file_name: impl AsRef<Path>) -> PathBuf {
        self.path.join(file_name)
    }

    /// Creates the directory and any missing parents. A no-op when it already exists.
    pub fn ensure_exists(&self) -> Result<()> {
        std::fs::create_dir_all(&self.path).map_err(|err| Error::io(&self.path, err))
    }

    /// Log files whose stem was produced by `date_format`, oldest first.
    pub fn dated_files(&self, date_format: &str) -> Result<Vec<(NaiveDateTime, PathBuf)>> {
        let entries = std::fs::read_dir(&self.path).map_err(|err| Error::io(&self.path, err))?;

        let mut files = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|err| Error::io(&self.path, err))?;
            let path = entry.path();

            if !path.is_file() {
                continue;
            }

            if path.extension().and_then(|ext| ext.to_str()) != Some(LOG_FILE_EXTENSION) {
                continue;
            }

            let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) else {
                continue;
            };

            if let Some(moment) = parse_date_stem(date_format, stem) {
                files.push((moment, path));
            }
        }

        files.sort();
        Ok(files)
    }

    /// Deletes the oldest dated files so that at most `keep` remain, counting
    /// `current` which is never removed. Returns the removed paths.
    pub fn prune(&self, date_format: &str, keep: usize, current: &Path) -> Result<Vec<PathBuf>> {
        if keep == 0 {
            return Err(Error::invalid_option(
                "backup_count",
                "at least the current log file must be kept",
            ));
        }

        let older: Vec<PathBuf> = self
            .dated_files(date_format)?
            .into_iter()
            .map(|(_, path)| path)
            .filter(|path| path != current)
            .collect();

        let excess = older.len().saturating_sub(keep - 1);
        let mut removed = Vec::with_capacity(excess);

        for path in older.into_iter().take(excess) {
            match std::fs::remove_file(&path) {
                Ok(()) => {
                    log::debug!(target: "daylog", "removed expired log file {}", path.display());
                    removed.push(path);
                }
                Err(err) => {
                    log::warn!(target: "daylog", "failed removing log file {}: {}", path.display(), err);
                }
            }
        }

        Ok(removed)
    }
}
