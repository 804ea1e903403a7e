//! PNM (Portable Any Map) format support
//!
//! Reads PGM (P2 ASCII, P5 binary) and binary PPM (P6) with any maxval up
//! to 255. Writes P5 for gray images and P6 for RGB images.
//! Bitmaps (P1/P4), 16-bit samples and PAM (P7) are not supported.

use crate::{IoError, IoResult};
use pagelayout_core::{Channels, PageImage};
use std::io::{Read, Write};

/// Parsed PNM header
#[derive(Debug, Clone, Copy)]
struct PnmHeader {
    channels: Channels,
    ascii: bool,
    width: u32,
    height: u32,
    maxval: u32,
}

/// Byte cursor over a PNM stream that skips whitespace and `#` comments
struct Tokenizer<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Tokenizer<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    fn skip_separators(&mut self) {
        while self.pos < self.data.len() {
            match self.data[self.pos] {
                b'#' => {
                    while self.pos < self.data.len() && self.data[self.pos] != b'\n' {
                        self.pos += 1;
                    }
                }
                b if b.is_ascii_whitespace() => self.pos += 1,
                _ => break,
            }
        }
    }

    fn next_token(&mut self) -> IoResult<&'a [u8]> {
        self.skip_separators();
        let start = self.pos;
        while self.pos < self.data.len() && !self.data[self.pos].is_ascii_whitespace() {
            self.pos += 1;
        }
        if start == self.pos {
            return Err(IoError::InvalidData("unexpected end of PNM data".into()));
        }
        Ok(&self.data[start..self.pos])
    }

    fn next_u32(&mut self) -> IoResult<u32> {
        let token = self.next_token()?;
        std::str::from_utf8(token)
            .ok()
            .and_then(|s| s.parse().ok())
            .ok_or_else(|| {
                IoError::InvalidData(format!(
                    "expected integer, found '{}'",
                    String::from_utf8_lossy(token)
                ))
            })
    }
}

fn parse_header(tokens: &mut Tokenizer<'_>) -> IoResult<PnmHeader> {
    let (channels, ascii) = match tokens.next_token()? {
        b"P2" => (Channels::Gray, true),
        b"P5" => (Channels::Gray, false),
        b"P6" => (Channels::Rgb, false),
        other => {
            return Err(IoError::UnsupportedFormat(format!(
                "PNM magic '{}'",
                String::from_utf8_lossy(other)
            )));
        }
    };
    let width = tokens.next_u32()?;
    let height = tokens.next_u32()?;
    let maxval = tokens.next_u32()?;
    if maxval == 0 || maxval > 255 {
        return Err(IoError::UnsupportedFormat(format!(
            "PNM maxval {} (only 1..=255 supported)",
            maxval
        )));
    }
    Ok(PnmHeader {
        channels,
        ascii,
        width,
        height,
        maxval,
    })
}

/// Read a PNM image (P2/P5/P6) from a reader.
///
/// Samples are rescaled to the full 0..=255 range when the file's maxval
/// is below 255.
pub fn read_pnm<R: Read>(mut reader: R) -> IoResult<PageImage> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;

    let mut tokens = Tokenizer::new(&bytes);
    let header = parse_header(&mut tokens)?;
    let len = header.width as usize * header.height as usize * header.channels.count() as usize;

    let mut data = if header.ascii {
        let mut data = Vec::with_capacity(len);
        for _ in 0..len {
            let v = tokens.next_u32()?;
            if v > header.maxval {
                return Err(IoError::InvalidData(format!(
                    "sample {} exceeds maxval {}",
                    v, header.maxval
                )));
            }
            data.push(v as u8);
        }
        data
    } else {
        // Exactly one whitespace byte separates the header from the raster.
        let start = tokens.pos + 1;
        let raster = bytes
            .get(start..start + len)
            .ok_or_else(|| IoError::InvalidData("truncated PNM raster".into()))?;
        raster.to_vec()
    };

    if header.maxval != 255 {
        for v in data.iter_mut() {
            *v = ((*v as u32 * 255 + header.maxval / 2) / header.maxval).min(255) as u8;
        }
    }

    Ok(PageImage::from_raw(
        header.width,
        header.height,
        header.channels.count(),
        data,
    )?)
}

/// Write a page image as binary PNM.
///
/// Chooses P5 for gray and P6 for RGB images.
pub fn write_pnm<W: Write>(image: &PageImage, mut writer: W) -> IoResult<()> {
    let magic = match image.channels() {
        Channels::Gray => "P5",
        Channels::Rgb => "P6",
    };
    write!(
        writer,
        "{}\n{} {}\n255\n",
        magic,
        image.width(),
        image.height()
    )?;
    writer.write_all(image.data())?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_ascii_pgm_with_comments() {
        let text = b"P2\n# a comment\n3 2\n255\n0 128 255\n# mid\n10 20 30\n";
        let image = read_pnm(&text[..]).unwrap();
        assert!(image.is_gray());
        assert_eq!((image.width(), image.height()), (3, 2));
        assert_eq!(image.data(), &[0, 128, 255, 10, 20, 30]);
    }

    #[test]
    fn test_read_scales_maxval() {
        let image = read_pnm(&b"P2 2 1 15 0 15"[..]).unwrap();
        assert_eq!(image.data(), &[0, 255]);
    }

    #[test]
    fn test_binary_round_trip() {
        let data: Vec<u8> = (0..24).map(|v| v * 10).collect();
        let rgb = PageImage::from_rgb(4, 2, data).unwrap();
        let mut buf = Vec::new();
        write_pnm(&rgb, &mut buf).unwrap();
        assert!(buf.starts_with(b"P6\n4 2\n255\n"));
        let back = read_pnm(&buf[..]).unwrap();
        assert_eq!(back, rgb);
    }

    #[test]
    fn test_rejects_truncated_and_unsupported() {
        assert!(matches!(
            read_pnm(&b"P5\n4 4\n255\n\x00\x00"[..]),
            Err(IoError::InvalidData(_))
        ));
        assert!(matches!(
            read_pnm(&b"P2\n1 1\n65535\n0"[..]),
            Err(IoError::UnsupportedFormat(_))
        ));
        assert!(matches!(
            read_pnm(&b"P4\n1 1\n\x00"[..]),
            Err(IoError::UnsupportedFormat(_))
        ));
        assert!(matches!(
            read_pnm(&b"P3\n1 1\n255\n0 0 0"[..]),
            Err(IoError::UnsupportedFormat(_))
        ));
        assert!(read_pnm(&b"P2\n2 1\n255\n0 300"[..]).is_err());
    }

    #[test]
    fn test_zero_size_is_core_error() {
        assert!(matches!(
            read_pnm(&b"P2\n0 1\n255\n"[..]),
            Err(IoError::Core(_))
        ));
    }
}
