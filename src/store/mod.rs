//! Content-addressed object store
//!
//! This module implements the storage layer using content-addressed objects.
//! Objects are identified by the SHA-1 of their framed content and stored
//! zlib-compressed in a two-level sharded directory tree.

mod blob;
pub mod compression;
mod file_store;
pub mod layout;

pub use blob::Object;
pub use file_store::ObjectStore;
pub use layout::Layout;

use crate::model::ObjectId;
use crate::Result;
use std::path::Path;

/// Store `content` as a blob under the repository at `root`
pub fn write_blob(root: impl AsRef<Path>, content: &[u8]) -> Result<ObjectId> {
    ObjectStore::new(root.as_ref()).write_blob(content)
}

/// Read the blob `id` from the repository at `root`.
///
/// When `destination` is given the payload is also written there.
pub fn read_blob(root: impl AsRef<Path>, id: &str, destination: Option<&Path>) -> Result<Vec<u8>> {
    let store = ObjectStore::new(root.as_ref());
    let payload = store.read_blob(id)?;
    if let Some(destination) = destination {
        file_store::write_output(destination, &payload)?;
    }
    Ok(payload)
}
