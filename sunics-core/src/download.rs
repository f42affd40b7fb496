//! Saving the generated calendar file.

use std::io::Write;
use std::path::PathBuf;

use crate::error::SunicsResult;

/// Where a downloaded file goes.
pub trait DownloadSink {
    /// Store `bytes` under `filename` and return where it ended up.
    fn save(&mut self, filename: &str, bytes: &[u8]) -> SunicsResult<PathBuf>;
}

/// Saves into a directory. The file is written to a temporary sibling first
/// and renamed into place, so a failed write never leaves a partial file.
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl DownloadSink for DirectorySink {
    fn save(&mut self, filename: &str, bytes: &[u8]) -> SunicsResult<PathBuf> {
        std::fs::create_dir_all(&self.dir)?;

        let mut tmp = tempfile::NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(bytes)?;
        tmp.flush()?;

        let path = self.dir.join(filename);
        tmp.persist(&path).map_err(|e| e.error)?;

        Ok(path)
    }
}
