//! Loose-object store: one zlib-compressed file per object
//!
//! Object file format (after inflating):
//! ```text
//! <kind> SP <decimal length> NUL <payload>
//! ```
//!
//! Files live at `<root>/objects/<id[0:2]>/<id[2:]>`, where `id` is the SHA-1
//! of the inflated bytes. New objects are written to a temp file in the shard
//! directory and renamed into place, so a reader never sees a partial object.

use crate::config::StoreConfig;
use crate::model::{ObjectId, ObjectKind, ID_HEX_LEN};
use crate::store::blob::Object;
use crate::store::compression;
use crate::store::layout::Layout;
use crate::{Error, Result};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, instrument, warn};

/// A content-addressed object store rooted at a repository directory
#[derive(Clone, Debug)]
pub struct ObjectStore {
    layout: Layout,
    config: StoreConfig,
}

impl ObjectStore {
    /// Open a store at `root` with the default config.
    ///
    /// Nothing is touched on disk; directories are created lazily on write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self::with_config(root, StoreConfig::default())
    }

    pub fn with_config(root: impl Into<PathBuf>, config: StoreConfig) -> Self {
        ObjectStore {
            layout: Layout::new(root),
            config,
        }
    }

    /// Create `<root>/objects` and return a store for it
    pub fn init(root: impl Into<PathBuf>) -> Result<Self> {
        let store = Self::new(root);
        fs::create_dir_all(store.layout.objects_dir())?;
        debug!(root = %store.root().display(), "initialized repository");
        Ok(store)
    }

    /// Whether `<root>/objects` exists
    pub fn is_initialized(&self) -> bool {
        self.layout.objects_dir().is_dir()
    }

    pub fn root(&self) -> &Path {
        self.layout.root()
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Compute the id `content` would be stored under, without writing it
    pub fn hash_blob(&self, content: &[u8]) -> ObjectId {
        Object::id_of(ObjectKind::Blob, content)
    }

    /// Store raw content as a blob, returns its id
    #[instrument(skip(self, content), fields(size = content.len()), level = "debug")]
    pub fn write_blob(&self, content: &[u8]) -> Result<ObjectId> {
        self.put(&Object::blob(content.to_vec()))
    }

    /// Read a file from disk and store it as a blob
    pub fn write_blob_file(&self, path: impl AsRef<Path>) -> Result<ObjectId> {
        let path = path.as_ref();
        let content = fs::read(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => Error::InputNotFound(path.to_path_buf()),
            _ => Error::Io(e),
        })?;
        self.write_blob(&content)
    }

    /// Store an object, returns its id.
    ///
    /// Storing an id that is already present and readable is a no-op; a
    /// damaged file at that path is replaced.
    pub fn put(&self, object: &Object) -> Result<ObjectId> {
        let id = object.id();
        let hex = id.to_hex();
        let path = self.layout.path_for(&hex)?;

        if path.is_file() {
            match self.load(&hex, &path) {
                Ok(_) => {
                    debug!(%id, "object already stored");
                    return Ok(id);
                }
                Err(e) => warn!(%id, error = %e, "replacing damaged object"),
            }
        }

        let frame = object.frame();

        let compressed = compression::compress(&frame, self.config.compression_level)?;
        let shard = self.layout.ensure_container(&hex)?;
        self.publish(&shard, &path, &compressed)?;

        debug!(%id, path = %path.display(), stored = compressed.len(), "object written");
        Ok(id)
    }

    /// Write `bytes` to a temp file in `shard` and rename it onto `path`
    fn publish(&self, shard: &Path, path: &Path, bytes: &[u8]) -> Result<()> {
        let mut tmp = NamedTempFile::new_in(shard)?;
        tmp.write_all(bytes)?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            tmp.as_file()
                .set_permissions(fs::Permissions::from_mode(0o444))?;
        }
        if self.config.fsync {
            tmp.as_file().sync_all()?;
        }

        // The temp file is removed when the PersistError is dropped.
        if let Err(e) = tmp.persist(path) {
            // Another writer published the same content first.
            if path.is_file() {
                debug!(path = %path.display(), "lost publish race to identical object");
                return Ok(());
            }
            return Err(Error::Io(e.error));
        }
        Ok(())
    }

    /// Check whether an object file exists for `id`
    pub fn contains(&self, id: &str) -> Result<bool> {
        Ok(self.layout.path_for(id)?.is_file())
    }

    /// Path at which the object for `id` is (or would be) stored
    pub fn object_path(&self, id: &str) -> Result<PathBuf> {
        self.layout.path_for(id)
    }

    /// Load, inflate and validate the object stored under `id`
    #[instrument(skip(self), level = "debug")]
    pub fn read_object(&self, id: &str) -> Result<Object> {
        let path = self.layout.path_for(id)?;

        let object = self.load(id, &path).map_err(|e| {
            if e.is_corruption() {
                warn!(id, path = %path.display(), error = %e, "stored object failed validation");
            }
            e
        })?;

        debug!(id, kind = %object.kind, size = object.size(), "object read");
        Ok(object)
    }

    fn load(&self, id: &str, path: &Path) -> Result<Object> {
        let compressed = fs::read(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => Error::ObjectNotFound {
                id: id.to_string(),
                path: path.to_path_buf(),
            },
            _ => Error::Io(e),
        })?;

        let frame = compression::decompress_frame(&compressed)?;
        self.validate(id, &frame)
    }

    fn validate(&self, id: &str, frame: &[u8]) -> Result<Object> {
        let object = Object::from_frame(frame)?;

        // Only a full id pins the exact content.
        if self.config.verify_on_read && id.len() == ID_HEX_LEN {
            let actual = ObjectId::digest(frame);
            if !actual.to_hex().eq_ignore_ascii_case(id) {
                return Err(Error::CorruptObject(format!(
                    "content hashes to {} instead of {}",
                    actual, id
                )));
            }
        }
        Ok(object)
    }

    /// Read the payload of the blob stored under `id`
    pub fn read_blob(&self, id: &str) -> Result<Vec<u8>> {
        let object = self.read_object(id)?;
        match object.kind {
            ObjectKind::Blob => Ok(object.payload),
        }
    }

    /// Read a blob and write its payload to `destination`, returns the size.
    ///
    /// The destination is only created once the object has been fully
    /// validated.
    pub fn read_blob_to(&self, id: &str, destination: impl AsRef<Path>) -> Result<usize> {
        let payload = self.read_blob(id)?;
        write_output(destination.as_ref(), &payload)?;
        Ok(payload.len())
    }
}

/// Write `bytes` to `destination` through a temp file in the same directory,
/// so a failed write never leaves a partial file behind.
pub(crate) fn write_output(destination: &Path, bytes: &[u8]) -> Result<()> {
    let dir = match destination.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(bytes)?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        tmp.as_file()
            .set_permissions(fs::Permissions::from_mode(0o644))?;
    }
    tmp.persist(destination).map_err(|e| Error::Io(e.error))?;
    Ok(())
}
