//! Member acquisition boundary.
//!
//! The engine only ever sees a finite `Vec<String>`. Where it comes from
//! (a text file, a fixture, an indexer that enumerated token owners) is the
//! business of a [`MemberSource`]. Entries are returned raw; validation and
//! deduplication happen at build time.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::Result;

/// Anything that can produce the raw member list for one run.
pub trait MemberSource {
    /// Short label for logs.
    fn name(&self) -> &str;

    /// Produce the raw identity strings.
    fn fetch(&self) -> Result<Vec<String>>;
}

/// Fixed in-memory list.
#[derive(Clone, Debug, Default)]
pub struct StaticMembers(pub Vec<String>);

impl StaticMembers {
    pub fn new<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(items.into_iter().map(Into::into).collect())
    }
}

impl MemberSource for StaticMembers {
    fn name(&self) -> &str {
        "static"
    }

    fn fetch(&self) -> Result<Vec<String>> {
        Ok(self.0.clone())
    }
}

/// Text file with one identity per line. Blank lines and lines starting with
/// `#` are skipped; surrounding whitespace is trimmed.
#[derive(Clone, Debug)]
pub struct FileMembers {
    path: PathBuf,
}

impl FileMembers {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl MemberSource for FileMembers {
    fn name(&self) -> &str {
        "file"
    }

    fn fetch(&self) -> Result<Vec<String>> {
        let reader = BufReader::new(File::open(&self.path)?);
        let mut out = Vec::new();
        for line in reader.lines() {
            let line = line?;
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            out.push(trimmed.to_string());
        }
        debug!(path = %self.path.display(), entries = out.len(), "read member file");
        Ok(out)
    }
}
