//! # lvc
//!
//! Little Version Control: the object store of a minimal version-control
//! tool.
//!
//! Arbitrary content is framed as `"blob <length>\0<content>"`, identified by
//! the SHA-1 of that frame, compressed with zlib and stored at
//! `<root>/objects/<id[0:2]>/<id[2:]>`, the same loose-object layout git
//! uses.
//!
//! ## Example
//!
//! ```no_run
//! use lvc::ObjectStore;
//!
//! let store = ObjectStore::init(".lvc")?;
//! let id = store.write_blob(b"hello")?;
//! assert_eq!(id.to_hex(), "b6fc4c620b67d95f953a5c1c1230aaab5db5a1b0");
//! assert_eq!(store.read_blob(&id.to_hex())?, b"hello");
//! # Ok::<(), lvc::Error>(())
//! ```

pub mod config;
pub mod model;
pub mod store;

mod error;

pub use config::StoreConfig;
pub use error::{Error, Result};
pub use model::{Header, ObjectId, ObjectKind};
pub use store::{read_blob, write_blob, Object, ObjectStore};

/// Version string printed by the CLI banner
pub const VERSION: &str = "0.1";

/// Default repository directory, relative to the working directory
pub const DEFAULT_ROOT: &str = ".lvc";
