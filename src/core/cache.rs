//! On-disk HTML/CSV cache layout and staleness checks.
//!
//! Pages land under a per-season directory tree (`data/<year>/<page>.html`)
//! and RAPTOR CSVs under `data/raptor/`. The only cache policy is file-level:
//! anything older than an hour is considered stale and re-fetched.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Cache entries older than this are re-downloaded.
pub const MAX_AGE: Duration = Duration::from_secs(60 * 60);

/// Root of the on-disk cache tree.
#[derive(Debug, Clone)]
pub struct DataDir {
    root: PathBuf,
}

impl DataDir {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn season_dir(&self, year: u16) -> PathBuf {
        self.root.join(year.to_string())
    }

    /// Path: data/{year}/{page}.html
    pub fn page_path(&self, year: u16, page: &str) -> PathBuf {
        self.season_dir(year).join(format!("{}.html", page))
    }

    pub fn raptor_dir(&self) -> PathBuf {
        self.root.join("raptor")
    }

    /// Path: data/raptor/{name}.csv
    pub fn raptor_path(&self, name: &str) -> PathBuf {
        self.raptor_dir().join(format!("{}.csv", name))
    }
}

impl Default for DataDir {
    fn default() -> Self {
        Self::new("data")
    }
}

fn expired(age: Duration) -> bool {
    age > MAX_AGE
}

/// Whether a cached file is missing or past its maximum age.
pub fn stale(path: &Path) -> bool {
    let Ok(meta) = fs::metadata(path) else {
        return true;
    };
    let Ok(modified) = meta.modified() else {
        return true;
    };
    match modified.elapsed() {
        Ok(age) => expired(age),
        // mtime in the future means it was just written
        Err(_) => false,
    }
}

/// Try to read a file into a String
pub fn try_read_to_string(path: &Path) -> Option<String> {
    fs::read_to_string(path).ok()
}

/// Write a string to file, creating parent directories as needed
pub fn write_string(path: &Path, contents: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let mut f = fs::File::create(path)?;
    f.write_all(contents.as_bytes())
}
