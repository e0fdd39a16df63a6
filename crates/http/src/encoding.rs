//! Content-encoding negotiation and compression.

use crate::error::Result;

/// Lowest and highest accepted compression levels.
pub const MIN_LEVEL: u32 = 1;
pub const MAX_LEVEL: u32 = 9;

/// An encoding this crate can apply to a response body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    Gzip,
}

impl Encoding {
    /// Value of the `Content-Encoding` header.
    pub fn as_str(self) -> &'static str {
        match self {
            Encoding::Gzip => "gzip",
        }
    }

    /// Whether support for this encoding was compiled in.
    pub fn is_available(self) -> bool {
        match self {
            Encoding::Gzip => cfg!(feature = "gzip"),
        }
    }
}

/// Clamps a requested compression level into `1..=9`.
pub fn clamp_level(level: i64) -> u32 {
    level.clamp(MIN_LEVEL as i64, MAX_LEVEL as i64) as u32
}

/// Picks an encoding for a request.
///
/// Requires an `Accept-Encoding` value mentioning `gzip` (case-insensitive),
/// `gzip` among the locally `supported` encodings, and gzip support compiled
/// in. Anything else means no compression.
pub fn negotiate(accept_encoding: Option<&str>, supported: &[String]) -> Option<Encoding> {
    let accept = accept_encoding?.to_ascii_lowercase();
    let encoding = Encoding::Gzip;

    if !encoding.is_available() || !accept.contains(encoding.as_str()) {
        return None;
    }

    supported
        .iter()
        .any(|s| s.trim().eq_ignore_ascii_case(encoding.as_str()))
        .then_some(encoding)
}

/// Compresses `input` with `encoding` at `level` (already clamped).
pub fn compress(encoding: Encoding, input: &[u8], level: u32) -> Result<Vec<u8>> {
    match encoding {
        Encoding::Gzip => gzip(input, level),
    }
}

#[cfg(feature = "gzip")]
fn gzip(input: &[u8], level: u32) -> Result<Vec<u8>> {
    use std::io::Write;

    use flate2::{write::GzEncoder, Compression};

    let mut encoder = GzEncoder::new(Vec::with_capacity(input.len() / 2), Compression::new(level));
    encoder.write_all(input)?;
    Ok(encoder.finish()?)
}

#[cfg(not(feature = "gzip"))]
fn gzip(_input: &[u8], _level: u32) -> Result<Vec<u8>> {
    Err(std::io::Error::new(
        std::io::ErrorKind::Unsupported,
        "gzip support not compiled in",
    )
    .into())
}
