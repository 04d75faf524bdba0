//! Object identifier: a SHA-1 digest of an object frame

use serde::{Serialize, Serializer};
use sha1::{Digest, Sha1};
use std::fmt;

/// Length of a digest in raw bytes
pub const ID_BYTES: usize = 20;

/// Length of a digest rendered as hex
pub const ID_HEX_LEN: usize = ID_BYTES * 2;

/// A 20-byte SHA-1 digest used for content addressing
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId([u8; ID_BYTES]);

impl ObjectId {
    /// Create an id from raw bytes
    pub fn from_bytes(bytes: [u8; ID_BYTES]) -> Self {
        ObjectId(bytes)
    }

    /// Hash arbitrary data
    pub fn digest(data: &[u8]) -> Self {
        Self::digest_many(&[data])
    }

    /// Hash multiple pieces of data as if they were concatenated
    pub fn digest_many(parts: &[&[u8]]) -> Self {
        let mut hasher = Sha1::new();
        for part in parts {
            hasher.update(part);
        }
        let mut arr = [0u8; ID_BYTES];
        arr.copy_from_slice(&hasher.finalize());
        ObjectId(arr)
    }

    /// Get the raw bytes
    pub fn as_bytes(&self) -> &[u8; ID_BYTES] {
        &self.0
    }

    /// Convert to lowercase hex string
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parse from a full-length hex string
    pub fn from_hex(s: &str) -> Result<Self, hex::FromHexError> {
        let mut arr = [0u8; ID_BYTES];
        hex::decode_to_slice(s, &mut arr)?;
        Ok(ObjectId(arr))
    }

    /// Get a short prefix for display (first 7 chars, like git)
    pub fn short(&self) -> String {
        self.to_hex()[..7].to_string()
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl fmt::Debug for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObjectId({})", self.short())
    }
}

impl AsRef<[u8]> for ObjectId {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl Serialize for ObjectId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}
