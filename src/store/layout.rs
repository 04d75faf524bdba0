//! Sharded on-disk layout
//!
//! ```text
//! <root>/
//!   objects/
//!     b6/
//!       fc4c620b67d95f953a5c1c1230aaab5db5a1b0
//! ```
//!
//! The first two hex characters of an id name the shard directory, the rest
//! name the file inside it.

use crate::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the directory holding all objects under a repository root
pub const OBJECTS_DIR: &str = "objects";

/// Number of id characters used for the shard directory name
const SHARD_PREFIX_LEN: usize = 2;

/// Shortest id that still leaves a non-empty file name after the shard prefix
pub const MIN_ID_LEN: usize = SHARD_PREFIX_LEN + 1;

/// Maps object ids to paths beneath a repository root
#[derive(Clone, Debug)]
pub struct Layout {
    root: PathBuf,
}

impl Layout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Layout { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `<root>/objects`
    pub fn objects_dir(&self) -> PathBuf {
        self.root.join(OBJECTS_DIR)
    }

    /// Path of the object file for `id`
    pub fn path_for(&self, id: &str) -> Result<PathBuf> {
        let id = normalize_id(id)?;
        let (shard, rest) = id.split_at(SHARD_PREFIX_LEN);
        Ok(self.objects_dir().join(shard).join(rest))
    }

    /// Create the shard directory for `id` if it does not exist yet
    pub fn ensure_container(&self, id: &str) -> Result<PathBuf> {
        let id = normalize_id(id)?;
        let dir = self.objects_dir().join(&id[..SHARD_PREFIX_LEN]);
        // create_dir_all treats an existing directory as success, which also
        // covers another writer creating it concurrently.
        fs::create_dir_all(&dir)?;
        Ok(dir)
    }
}

/// Validate an id and fold it to lowercase.
///
/// Only hex digits are accepted, so an id can never escape the objects
/// directory.
pub fn normalize_id(id: &str) -> Result<String> {
    if id.len() < MIN_ID_LEN {
        return Err(Error::InvalidId(id.to_string()));
    }
    if !id.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(Error::InvalidId(id.to_string()));
    }
    Ok(id.to_ascii_lowercase())
}
