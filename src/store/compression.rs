//! zlib compression for stored frames

use crate::model::Header;
use crate::{Error, Result};
use flate2::write::ZlibEncoder;
use flate2::{Compression, Decompress, FlushDecompress, Status};
use std::io::Write;

/// Inflated bytes examined when looking for the header terminator
const MAX_HEADER_LEN: usize = 64;

/// Compress a frame into a self-contained zlib stream
pub fn compress(frame: &[u8], level: u32) -> Result<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(
        Vec::with_capacity(frame.len() / 2 + 16),
        Compression::new(level),
    );
    encoder.write_all(frame)?;
    Ok(encoder.finish()?)
}

/// Inflate a zlib stream.
///
/// The stream must end exactly at the end of `data`: a truncated stream or
/// trailing bytes after the Adler-32 trailer are both rejected.
pub fn decompress(data: &[u8]) -> Result<Vec<u8>> {
    let mut inflater = Decompress::new(true);
    let mut out = Vec::with_capacity(data.len().saturating_mul(2).max(64));
    inflate_until(&mut inflater, data, &mut out, usize::MAX)?;
    check_fully_consumed(&inflater, data)?;
    Ok(out)
}

/// Inflate a stored object frame, never producing more than its header
/// declares.
///
/// The header is decoded from the first inflated bytes; inflation stops as
/// soon as the output runs past `header + declared length`.
pub fn decompress_frame(data: &[u8]) -> Result<Vec<u8>> {
    let mut inflater = Decompress::new(true);
    let mut out = Vec::with_capacity(MAX_HEADER_LEN);

    let mut ended = inflate_until(&mut inflater, data, &mut out, MAX_HEADER_LEN)?;
    let (header, offset) = Header::decode(&out)?;
    let limit = offset.checked_add(header.length).ok_or_else(|| {
        Error::CorruptObject(format!("declared length {} is too large", header.length))
    })?;

    if !ended {
        ended = inflate_until(&mut inflater, data, &mut out, limit.saturating_add(1))?;
    }
    if out.len() > limit {
        return Err(Error::CorruptObject(format!(
            "payload inflates past the declared {} bytes",
            header.length
        )));
    }
    if !ended {
        return Err(Error::CorruptStream("stream did not end".into()));
    }
    check_fully_consumed(&inflater, data)?;
    Ok(out)
}

/// Inflate into `out` until the stream ends or `out` holds at least `limit`
/// bytes. Returns true once the end of the stream (and its checksum) has been
/// reached.
fn inflate_until(
    inflater: &mut Decompress,
    data: &[u8],
    out: &mut Vec<u8>,
    limit: usize,
) -> Result<bool> {
    while out.len() < limit {
        if out.len() == out.capacity() {
            let grow = out.capacity().max(64).min(limit - out.len());
            out.reserve(grow);
        }

        let (in_before, out_before) = (inflater.total_in(), inflater.total_out());
        let status = inflater
            .decompress_vec(&data[in_before as usize..], out, FlushDecompress::None)
            .map_err(|e| Error::CorruptStream(e.to_string()))?;

        if matches!(status, Status::StreamEnd) {
            return Ok(true);
        }
        if inflater.total_in() == in_before && inflater.total_out() == out_before {
            return Err(Error::CorruptStream(format!(
                "stream ended early after {} of {} bytes",
                inflater.total_in(),
                data.len()
            )));
        }
    }
    Ok(false)
}

fn check_fully_consumed(inflater: &Decompress, data: &[u8]) -> Result<()> {
    let consumed = inflater.total_in() as usize;
    if consumed != data.len() {
        return Err(Error::CorruptStream(format!(
            "{} trailing bytes after end of stream",
            data.len() - consumed
        )));
    }
    Ok(())
}
