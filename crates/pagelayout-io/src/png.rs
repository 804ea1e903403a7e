//! PNG image format support
//!
//! Decoding normalizes every PNG flavor to 8-bit samples: palettes and
//! low bit depths are expanded, 16-bit samples are stripped, and alpha is
//! dropped. Gray and gray+alpha files become gray images; everything else
//! becomes RGB.

use crate::{IoError, IoResult};
use pagelayout_core::{Channels, PageImage};
use png::{BitDepth, ColorType, Decoder, Encoder, Transformations};
use std::io::{BufRead, Seek, Write};

/// Read a PNG image
pub fn read_png<R: BufRead + Seek>(reader: R) -> IoResult<PageImage> {
    let mut decoder = Decoder::new(reader);
    decoder.set_transformations(Transformations::EXPAND | Transformations::STRIP_16);
    let mut reader = decoder
        .read_info()
        .map_err(|e| IoError::DecodeError(format!("PNG decode error: {}", e)))?;

    let (color_type, bit_depth) = reader.output_color_type();
    if bit_depth != BitDepth::Eight {
        return Err(IoError::UnsupportedFormat(format!(
            "unsupported PNG output depth: {:?}",
            bit_depth
        )));
    }
    let (samples, channels) = match color_type {
        ColorType::Grayscale => (1, Channels::Gray),
        ColorType::GrayscaleAlpha => (2, Channels::Gray),
        ColorType::Rgb => (3, Channels::Rgb),
        ColorType::Rgba => (4, Channels::Rgb),
        ColorType::Indexed => {
            return Err(IoError::UnsupportedFormat(
                "PNG palette was not expanded".to_string(),
            ));
        }
    };

    let buf_size = reader
        .output_buffer_size()
        .ok_or_else(|| IoError::DecodeError("failed to get output buffer size".to_string()))?;
    let mut buf = vec![0; buf_size];
    let output_info = reader
        .next_frame(&mut buf)
        .map_err(|e| IoError::DecodeError(format!("PNG frame error: {}", e)))?;

    let width = output_info.width;
    let height = output_info.height;
    let bytes_per_row = output_info.line_size;
    let keep = channels.count() as usize;

    let mut data = Vec::with_capacity(width as usize * height as usize * keep);
    for y in 0..height as usize {
        let row = &buf[y * bytes_per_row..y * bytes_per_row + width as usize * samples];
        for px in row.chunks_exact(samples) {
            data.extend_from_slice(&px[..keep]);
        }
    }

    Ok(PageImage::from_raw(width, height, channels.count(), data)?)
}

/// Write a PNG image
///
/// Gray images are written as 8-bit grayscale, RGB images as 8-bit RGB.
pub fn write_png<W: Write>(image: &PageImage, writer: W) -> IoResult<()> {
    let color_type = match image.channels() {
        Channels::Gray => ColorType::Grayscale,
        Channels::Rgb => ColorType::Rgb,
    };

    let mut encoder = Encoder::new(writer, image.width(), image.height());
    encoder.set_color(color_type);
    encoder.set_depth(BitDepth::Eight);

    let mut writer = encoder
        .write_header()
        .map_err(|e| IoError::EncodeError(format!("PNG header error: {}", e)))?;
    writer
        .write_image_data(image.data())
        .map_err(|e| IoError::EncodeError(format!("PNG write error: {}", e)))?;
    writer
        .finish()
        .map_err(|e| IoError::EncodeError(format!("PNG finish error: {}", e)))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_gray_round_trip() {
        let data: Vec<u8> = (0..=255).collect();
        let gray = PageImage::from_gray(16, 16, data).unwrap();
        let mut buf = Vec::new();
        write_png(&gray, &mut buf).unwrap();
        let back = read_png(Cursor::new(buf)).unwrap();
        assert_eq!(back, gray);
    }

    #[test]
    fn test_rgb_round_trip() {
        let data: Vec<u8> = (0..5 * 3 * 3).map(|v| (v * 5) as u8).collect();
        let rgb = PageImage::from_rgb(5, 3, data).unwrap();
        let mut buf = Vec::new();
        write_png(&rgb, &mut buf).unwrap();
        let back = read_png(Cursor::new(buf)).unwrap();
        assert_eq!(back, rgb);
    }

    #[test]
    fn test_rgba_drops_alpha() {
        let mut buf = Vec::new();
        {
            let mut encoder = Encoder::new(&mut buf, 2, 1);
            encoder.set_color(ColorType::Rgba);
            encoder.set_depth(BitDepth::Eight);
            let mut writer = encoder.write_header().unwrap();
            writer
                .write_image_data(&[1, 2, 3, 255, 4, 5, 6, 0])
                .unwrap();
        }
        let image = read_png(Cursor::new(buf)).unwrap();
        assert_eq!(image.channels(), Channels::Rgb);
        assert_eq!(image.data(), &[1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_garbage_is_decode_error() {
        let result = read_png(Cursor::new(b"not a png".to_vec()));
        assert!(matches!(result, Err(IoError::DecodeError(_))));
    }
}
