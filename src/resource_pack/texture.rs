//! Texture decoding.

use crate::error::Result;
use image::ImageEncoder;

/// A decoded pixel-art texture. Hosts sample it with nearest filtering
/// for both minification and magnification.
#[derive(Debug, Clone)]
pub struct Texture {
    /// Asset path this texture was loaded from (e.g., "block/stone").
    pub path: String,
    /// Texture width in pixels.
    pub width: u32,
    /// Texture height in pixels.
    pub height: u32,
    /// RGBA8 pixel data (4 bytes per pixel).
    pub pixels: Vec<u8>,
}

impl Texture {
    /// Create a texture from RGBA data.
    pub fn new(path: impl Into<String>, width: u32, height: u32, pixels: Vec<u8>) -> Self {
        Self {
            path: path.into(),
            width,
            height,
            pixels,
        }
    }

    /// Decode PNG bytes into a texture.
    pub fn from_png(path: impl Into<String>, data: &[u8]) -> Result<Self> {
        let img = image::load_from_memory(data)?;
        let rgba = img.to_rgba8();
        let (width, height) = rgba.dimensions();
        Ok(Self::new(path, width, height, rgba.into_raw()))
    }

    /// Check if this texture has transparency.
    pub fn has_transparency(&self) -> bool {
        self.pixels.chunks(4).any(|pixel| pixel[3] < 255)
    }

    /// File-system friendly name, e.g. "block_stone".
    pub fn file_stem(&self) -> String {
        self.path.replace([':', '/'], "_")
    }

    /// Encode the texture as PNG bytes.
    pub fn to_png(&self) -> Result<Vec<u8>> {
        let mut bytes = Vec::new();
        let cursor = std::io::Cursor::new(&mut bytes);
        let encoder = image::codecs::png::PngEncoder::new(cursor);
        encoder.write_image(
            &self.pixels,
            self.width,
            self.height,
            image::ExtendedColorType::Rgba8,
        )?;
        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_png_round_trip() {
        let tex = Texture::new("block/test", 2, 1, vec![255, 0, 0, 255, 0, 255, 0, 128]);
        let png = tex.to_png().unwrap();

        let decoded = Texture::from_png("block/test", &png).unwrap();
        assert_eq!((decoded.width, decoded.height), (2, 1));
        assert_eq!(decoded.pixels, tex.pixels);
        assert!(decoded.has_transparency());
    }

    #[test]
    fn test_invalid_png() {
        assert!(Texture::from_png("block/bad", b"not a png").is_err());
    }

    #[test]
    fn test_file_stem() {
        let tex = Texture::new("minecraft:block/stone", 1, 1, vec![0; 4]);
        assert_eq!(tex.file_stem(), "minecraft_block_stone");
    }
}
