use crate::error::Result;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Avatar images on disk, keyed by contributor login.
///
/// An existing file is trusted as-is; a changed avatar upstream is only
/// picked up once its cached file is deleted.
pub struct AvatarCache {
    dir: PathBuf,
}

impl AvatarCache {
    pub fn new<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, login: &str) -> PathBuf {
        let stem: String = login
            .chars()
            .map(|c| if c == '/' || c == '\\' { '_' } else { c })
            .collect();
        self.dir.join(format!("{stem}.png"))
    }

    pub fn contains(&self, login: &str) -> bool {
        self.path_for(login).is_file()
    }

    /// Fill a temp file through `fill` and move it into place only if it succeeds,
    /// so an interrupted download never leaves a half-written entry behind.
    pub fn store_with<F>(&self, login: &str, fill: F) -> Result<PathBuf>
    where
        F: FnOnce(&mut dyn Write) -> Result<u64>,
    {
        let path = self.path_for(login);
        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        fill(tmp.as_file_mut())?;
        tmp.as_file_mut().flush()?;
        tmp.persist(&path)?;
        Ok(path)
    }
}
