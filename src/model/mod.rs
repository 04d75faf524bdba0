//! Core data model types for lvc

mod hash;
mod header;
mod kind;

pub use hash::{ObjectId, ID_BYTES, ID_HEX_LEN};
pub use header::Header;
pub use kind::ObjectKind;
