//! Object header codec
//!
//! Every object frame starts with a short ASCII header:
//! ```text
//! <kind> SP <length> NUL <payload bytes...>
//! ```
//! e.g. `blob 5\0hello`.

use crate::model::ObjectKind;
use crate::{Error, Result};

/// Parsed object header
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Header {
    pub kind: ObjectKind,
    /// Declared payload length in bytes
    pub length: usize,
}

impl Header {
    pub fn new(kind: ObjectKind, length: usize) -> Self {
        Header { kind, length }
    }

    /// Render the header, including its trailing NUL
    pub fn encode(&self) -> Vec<u8> {
        format!("{} {}\0", self.kind, self.length).into_bytes()
    }

    /// Parse the header at the start of `frame`.
    ///
    /// Returns the header and the offset of the first payload byte.
    pub fn decode(frame: &[u8]) -> Result<(Header, usize)> {
        let nul = frame
            .iter()
            .position(|&b| b == 0)
            .ok_or_else(|| Error::MalformedHeader("missing NUL terminator".into()))?;

        let prefix = std::str::from_utf8(&frame[..nul])
            .map_err(|_| Error::MalformedHeader("header is not valid text".into()))?;

        let (kind, length) = prefix
            .split_once(' ')
            .ok_or_else(|| Error::MalformedHeader(format!("no space in header {:?}", prefix)))?;

        let kind = kind.parse::<ObjectKind>().map_err(Error::MalformedHeader)?;
        let length = parse_length(length)?;

        Ok((Header { kind, length }, nul + 1))
    }
}

/// Plain decimal digits only; no sign, whitespace or leading zeros
fn parse_length(s: &str) -> Result<usize> {
    let canonical = !s.is_empty()
        && s.bytes().all(|b| b.is_ascii_digit())
        && (s == "0" || !s.starts_with('0'));
    if !canonical {
        return Err(Error::MalformedHeader(format!("invalid length {:?}", s)));
    }
    s.parse::<usize>()
        .map_err(|e| Error::MalformedHeader(format!("invalid length {:?}: {}", s, e)))
}
