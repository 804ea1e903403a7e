//! Image format detection
//!
//! Input formats are recognized by signature; extensions only name
//! output files.

use crate::{IoError, IoResult};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Image file formats understood by this crate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageFormat {
    /// Portable any-map (PGM/PPM)
    Pnm,
    /// Portable Network Graphics
    Png,
}

impl ImageFormat {
    /// Conventional file extension
    pub fn extension(self) -> &'static str {
        match self {
            ImageFormat::Pnm => "pnm",
            ImageFormat::Png => "png",
        }
    }
}

/// Leading bytes of each supported format. PBM (`P1`/`P4`) is not a
/// page raster and ASCII PPM (`P3`) is not read, so neither is listed.
const SIGNATURES: [(&[u8], ImageFormat); 4] = [
    (&[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A], ImageFormat::Png),
    (b"P2", ImageFormat::Pnm),
    (b"P5", ImageFormat::Pnm),
    (b"P6", ImageFormat::Pnm),
];

/// Detect the format of the file at `path` from its first bytes.
pub fn detect_format<P: AsRef<Path>>(path: P) -> IoResult<ImageFormat> {
    let mut header = Vec::with_capacity(8);
    File::open(path)?.take(8).read_to_end(&mut header)?;
    detect_format_from_bytes(&header)
}

/// Detect the format of an in-memory image from its first bytes.
pub fn detect_format_from_bytes(data: &[u8]) -> IoResult<ImageFormat> {
    if data.len() < 2 {
        return Err(IoError::InvalidData(format!(
            "{} bytes are not enough to detect a format",
            data.len()
        )));
    }
    SIGNATURES
        .iter()
        .find(|(magic, _)| data.starts_with(magic))
        .map(|&(_, format)| format)
        .ok_or_else(|| {
            IoError::UnsupportedFormat(format!(
                "unrecognized signature {:02X?}",
                &data[..data.len().min(4)]
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_png() {
        let data = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00];
        assert_eq!(detect_format_from_bytes(&data).unwrap(), ImageFormat::Png);
    }

    #[test]
    fn test_detect_pnm() {
        for header in [&b"P2\n"[..], b"P5\n", b"P6\n"] {
            assert_eq!(detect_format_from_bytes(header).unwrap(), ImageFormat::Pnm);
        }
    }

    #[test]
    fn test_detect_unknown() {
        assert!(detect_format_from_bytes(b"P4\n1 1\n").is_err());
        assert!(detect_format_from_bytes(b"P3\n1 1\n255\n0 0 0\n").is_err());
        assert!(detect_format_from_bytes(&[0xFF, 0xD8, 0xFF, 0xE0]).is_err());
        assert!(detect_format_from_bytes(b"BM").is_err());
        assert!(detect_format_from_bytes(b"P").is_err());
    }

    #[test]
    fn test_extension() {
        assert_eq!(ImageFormat::Png.extension(), "png");
        assert_eq!(ImageFormat::Pnm.extension(), "pnm");
    }
}
