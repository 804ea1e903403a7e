//! pagelayout-io - Page image I/O
//!
//! Reading and writing page images and masks:
//!
//! - PNM: P2/P5/P6 read, P5/P6 write
//! - PNG: read (any flavor, normalized to 8-bit) and write
//!
//! Formats are detected from magic bytes on read.

mod error;
pub mod format;
#[cfg(feature = "png-format")]
pub mod png;
#[cfg(feature = "pnm")]
pub mod pnm;

pub use error::{IoError, IoResult};
pub use format::{ImageFormat, detect_format, detect_format_from_bytes};

use pagelayout_core::{BinaryMask, PageImage};
use std::fs::File;
use std::io::{BufWriter, Cursor};
use std::path::Path;

/// Read an image from a file path, detecting the format from its content.
pub fn read_image<P: AsRef<Path>>(path: P) -> IoResult<PageImage> {
    let bytes = std::fs::read(path)?;
    read_image_mem(&bytes)
}

/// Read an image from an in-memory buffer.
pub fn read_image_mem(data: &[u8]) -> IoResult<PageImage> {
    match detect_format_from_bytes(data)? {
        #[cfg(feature = "pnm")]
        ImageFormat::Pnm => pnm::read_pnm(data),
        #[cfg(feature = "png-format")]
        ImageFormat::Png => png::read_png(Cursor::new(data)),
        #[allow(unreachable_patterns)]
        other => Err(IoError::UnsupportedFormat(format!(
            "{:?} support not enabled",
            other
        ))),
    }
}

/// Write an image to a file path in the given format.
pub fn write_image<P: AsRef<Path>>(image: &PageImage, path: P, format: ImageFormat) -> IoResult<()> {
    let file = File::create(path)?;
    write_image_to(image, BufWriter::new(file), format)
}

/// Encode an image into an in-memory buffer.
pub fn write_image_mem(image: &PageImage, format: ImageFormat) -> IoResult<Vec<u8>> {
    let mut buf = Vec::new();
    write_image_to(image, &mut buf, format)?;
    Ok(buf)
}

/// Write a binary mask as a gray image (0 background, 255 foreground).
pub fn write_mask<P: AsRef<Path>>(mask: &BinaryMask, path: P, format: ImageFormat) -> IoResult<()> {
    write_image(&mask.to_image()?, path, format)
}

fn write_image_to<W: std::io::Write>(
    image: &PageImage,
    writer: W,
    format: ImageFormat,
) -> IoResult<()> {
    match format {
        #[cfg(feature = "pnm")]
        ImageFormat::Pnm => pnm::write_pnm(image, writer),
        #[cfg(feature = "png-format")]
        ImageFormat::Png => png::write_png(image, writer),
        #[allow(unreachable_patterns)]
        other => Err(IoError::UnsupportedFormat(format!(
            "{:?} support not enabled",
            other
        ))),
    }
}
