//! CLI command implementations

pub mod adjust;
pub mod histogram;
pub mod info;

use anyhow::{Context, Result, bail};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;
use tonekit_core::PixelBuffer;
use tonekit_ops::SessionConfig;

/// Loads the session config, or defaults when no path is given.
pub fn load_config(path: Option<&Path>) -> Result<SessionConfig> {
    match path {
        Some(path) => SessionConfig::load(path)
            .with_context(|| format!("Failed to load config: {}", path.display())),
        None => Ok(SessionConfig::default()),
    }
}

/// Load a PNG as 8-bit RGBA (palettes expanded, 16-bit reduced)
pub fn load_image(path: &Path) -> Result<PixelBuffer> {
    let file = File::open(path).with_context(|| format!("Failed to open: {}", path.display()))?;
    decode_png(BufReader::new(file)).with_context(|| format!("Failed to load: {}", path.display()))
}

/// Save an RGBA buffer as an 8-bit PNG
pub fn save_image(path: &Path, image: &PixelBuffer) -> Result<()> {
    let file =
        File::create(path).with_context(|| format!("Failed to create: {}", path.display()))?;
    encode_png(BufWriter::new(file), image)
        .with_context(|| format!("Failed to save: {}", path.display()))
}

fn decode_png<R: std::io::BufRead + std::io::Seek>(reader: R) -> Result<PixelBuffer> {
    let mut decoder = png::Decoder::new(reader);
    // Palettes, tRNS and sub-byte depths expand; 16-bit samples keep the high byte.
    decoder.set_transformations(png::Transformations::EXPAND | png::Transformations::STRIP_16);
    let mut reader = decoder.read_info().context("Invalid PNG header")?;

    let buf_size = reader
        .output_buffer_size()
        .context("Cannot determine PNG output buffer size")?;
    let mut buf = vec![0u8; buf_size];
    let info = reader.next_frame(&mut buf).context("Failed to decode PNG frame")?;
    let samples = &buf[..info.buffer_size()];

    let rgba: Vec<u8> = match (info.color_type, info.bit_depth) {
        (png::ColorType::Rgba, png::BitDepth::Eight) => samples.to_vec(),
        (png::ColorType::Rgb, png::BitDepth::Eight) => samples
            .chunks_exact(3)
            .flat_map(|rgb| [rgb[0], rgb[1], rgb[2], 255])
            .collect(),
        (png::ColorType::Grayscale, png::BitDepth::Eight) => {
            samples.iter().flat_map(|&g| [g, g, g, 255]).collect()
        }
        (png::ColorType::GrayscaleAlpha, png::BitDepth::Eight) => samples
            .chunks_exact(2)
            .flat_map(|ga| [ga[0], ga[0], ga[0], ga[1]])
            .collect(),
        (color_type, bit_depth) => {
            bail!("Unsupported PNG layout: {:?} {:?}", color_type, bit_depth)
        }
    };

    Ok(PixelBuffer::from_data(info.width, info.height, rgba)?)
}

fn encode_png<W: std::io::Write>(writer: W, image: &PixelBuffer) -> Result<()> {
    let mut encoder = png::Encoder::new(writer, image.width(), image.height());
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    encoder.set_compression(png::Compression::default());

    let mut png_writer = encoder.write_header().context("Failed to write PNG header")?;
    png_writer
        .write_image_data(image.data())
        .context("Failed to write PNG data")?;
    png_writer.finish().context("Failed to finish PNG")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn encode_raw(width: u32, height: u32, color: png::ColorType, data: &[u8]) -> Vec<u8> {
        encode_with(width, height, color, png::BitDepth::Eight, None, data)
    }

    fn encode_with(
        width: u32,
        height: u32,
        color: png::ColorType,
        depth: png::BitDepth,
        palette: Option<Vec<u8>>,
        data: &[u8],
    ) -> Vec<u8> {
        let mut out = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut out, width, height);
            encoder.set_color(color);
            encoder.set_depth(depth);
            if let Some(palette) = palette {
                encoder.set_palette(palette);
            }
            let mut writer = encoder.write_header().unwrap();
            writer.write_image_data(data).unwrap();
        }
        out
    }

    #[test]
    fn test_rgba_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rgba.png");
        let image =
            PixelBuffer::from_data(2, 1, vec![10, 20, 30, 255, 200, 100, 50, 128]).unwrap();
        save_image(&path, &image).unwrap();
        assert_eq!(load_image(&path).unwrap(), image);
    }

    #[test]
    fn test_gray_expands_to_rgba() {
        let bytes = encode_raw(2, 1, png::ColorType::Grayscale, &[7, 250]);
        let image = decode_png(Cursor::new(bytes)).unwrap();
        assert_eq!(image.data(), &[7, 7, 7, 255, 250, 250, 250, 255]);
    }

    #[test]
    fn test_gray_alpha_and_rgb_expand() {
        let ga = encode_raw(1, 1, png::ColorType::GrayscaleAlpha, &[9, 80]);
        assert_eq!(decode_png(Cursor::new(ga)).unwrap().data(), &[9, 9, 9, 80]);

        let rgb = encode_raw(1, 1, png::ColorType::Rgb, &[1, 2, 3]);
        assert_eq!(decode_png(Cursor::new(rgb)).unwrap().data(), &[1, 2, 3, 255]);
    }

    #[test]
    fn test_indexed_expands_through_palette() {
        let palette = vec![255, 0, 0, 0, 128, 255];
        let bytes = encode_with(
            3,
            1,
            png::ColorType::Indexed,
            png::BitDepth::Eight,
            Some(palette),
            &[1, 0, 1],
        );
        let image = decode_png(Cursor::new(bytes)).unwrap();
        assert_eq!(
            image.data(),
            &[0, 128, 255, 255, 255, 0, 0, 255, 0, 128, 255, 255]
        );
    }

    #[test]
    fn test_sixteen_bit_keeps_high_byte() {
        let rgb16 = [0x12, 0x34, 0xAB, 0xCD, 0xFF, 0x00];
        let bytes = encode_with(1, 1, png::ColorType::Rgb, png::BitDepth::Sixteen, None, &rgb16);
        assert_eq!(decode_png(Cursor::new(bytes)).unwrap().data(), &[0x12, 0xAB, 0xFF, 255]);

        let rgba16 = [0x01, 0xFF, 0x80, 0x00, 0x7F, 0xFF, 0x40, 0x01];
        let bytes = encode_with(1, 1, png::ColorType::Rgba, png::BitDepth::Sixteen, None, &rgba16);
        assert_eq!(decode_png(Cursor::new(bytes)).unwrap().data(), &[0x01, 0x80, 0x7F, 0x40]);
    }

    #[test]
    fn test_missing_file_has_context() {
        let err = load_image(Path::new("/nonexistent/tonekit.png")).unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to open"));
    }

    #[test]
    fn test_default_config_without_path() {
        assert_eq!(load_config(None).unwrap(), SessionConfig::default());
    }
}
