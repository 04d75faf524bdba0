//! Object type - the unit of content-addressed storage

use crate::model::{Header, ObjectId, ObjectKind};
use crate::{Error, Result};

/// A typed chunk of content, held uncompressed in memory
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Object {
    /// Type of content
    pub kind: ObjectKind,
    /// Raw payload bytes
    pub payload: Vec<u8>,
}

impl Object {
    /// Create a new object
    pub fn new(kind: ObjectKind, payload: Vec<u8>) -> Self {
        Object { kind, payload }
    }

    /// Create a blob from raw content
    pub fn blob(payload: Vec<u8>) -> Self {
        Object::new(ObjectKind::Blob, payload)
    }

    pub fn header(&self) -> Header {
        Header::new(self.kind, self.payload.len())
    }

    /// Header followed by payload: the bytes that are hashed and stored
    pub fn frame(&self) -> Vec<u8> {
        let mut frame = self.header().encode();
        frame.extend_from_slice(&self.payload);
        frame
    }

    /// Compute the content id without materialising the frame
    pub fn id(&self) -> ObjectId {
        Object::id_of(self.kind, &self.payload)
    }

    /// Id of an object of `kind` holding `payload`
    pub fn id_of(kind: ObjectKind, payload: &[u8]) -> ObjectId {
        let header = Header::new(kind, payload.len()).encode();
        ObjectId::digest_many(&[&header[..], payload])
    }

    /// Parse a frame, checking the declared length against the payload
    pub fn from_frame(frame: &[u8]) -> Result<Self> {
        let (header, offset) = Header::decode(frame)?;
        let actual = frame.len() - offset;
        if actual != header.length {
            return Err(Error::CorruptObject(format!(
                "header declares {} payload bytes but {} are present",
                header.length, actual
            )));
        }
        Ok(Object::new(header.kind, frame[offset..].to_vec()))
    }

    /// Size of the payload in bytes
    pub fn size(&self) -> usize {
        self.payload.len()
    }
}
