use std::path::{Path, PathBuf};

/// Errors produced while loading texture images.
#[derive(Debug, thiserror::Error)]
pub enum TextureError {
    #[error("failed to read texture '{}'", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode texture image")]
    Decode(#[from] image::ImageError),

    #[error("texture has zero size ({width}x{height})")]
    Empty { width: u32, height: u32 },
}

/// Decoded RGBA8 (sRGB) texture pixels, rows ordered bottom-to-top.
///
/// Rows are flipped on decode so GL-style texture coordinates (v = 0 at the
/// bottom of the image) sample the image upright.
#[derive(Debug, Clone, PartialEq)]
pub struct TextureData {
    pub label: String,
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl TextureData {
    /// Decodes an encoded image (PNG/JPEG) from memory.
    pub fn decode(label: impl Into<String>, bytes: &[u8]) -> Result<Self, TextureError> {
        let img = image::load_from_memory(bytes)?.flipv().into_rgba8();
        let (width, height) = img.dimensions();
        if width == 0 || height == 0 {
            return Err(TextureError::Empty { width, height });
        }

        Ok(Self {
            label: label.into(),
            width,
            height,
            rgba: img.into_raw(),
        })
    }

    /// Reads and decodes an image file. The label is the file name.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TextureError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|source| TextureError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let label = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        Self::decode(label, &bytes)
    }

    /// Two-colour checkerboard, used as a stand-in for missing images.
    ///
    /// `cells` is clamped to at least 1 and `size` to at least `cells`.
    pub fn checkerboard(label: impl Into<String>, size: u32, cells: u32, a: [u8; 4], b: [u8; 4]) -> Self {
        let cells = cells.max(1);
        let size = size.max(cells);
        let cell = size / cells;

        let mut rgba = Vec::with_capacity((size * size * 4) as usize);
        for y in 0..size {
            for x in 0..size {
                let even = ((x / cell) + (y / cell)) % 2 == 0;
                rgba.extend_from_slice(if even { &a } else { &b });
            }
        }

        Self {
            label: label.into(),
            width: size,
            height: size,
            rgba,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    impl TextureData {
        fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
            if x >= self.width || y >= self.height {
                return None;
            }
            let i = ((y * self.width + x) * 4) as usize;
            self.rgba.get(i..i + 4).and_then(|p| p.try_into().ok())
        }
    }

    fn encode_png(width: u32, height: u32, f: impl Fn(u32, u32) -> [u8; 4]) -> Vec<u8> {
        let img = image::RgbaImage::from_fn(width, height, |x, y| image::Rgba(f(x, y)));
        let mut buf = Vec::new();
        image::DynamicImage::ImageRgba8(img)
            .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
            .unwrap();
        buf
    }

    // ── decode ────────────────────────────────────────────────────────────

    #[test]
    fn decode_flips_rows() {
        const TOP: [u8; 4] = [255, 0, 0, 255];
        const BOTTOM: [u8; 4] = [0, 0, 255, 255];
        let png = encode_png(2, 2, |_, y| if y == 0 { TOP } else { BOTTOM });

        let tex = TextureData::decode("t", &png).unwrap();
        assert_eq!((tex.width, tex.height), (2, 2));
        assert_eq!(tex.pixel(0, 0), Some(BOTTOM));
        assert_eq!(tex.pixel(1, 1), Some(TOP));
    }

    #[test]
    fn decode_rejects_garbage() {
        let err = TextureData::decode("bad", b"not an image").unwrap_err();
        assert!(matches!(err, TextureError::Decode(_)));
    }

    #[test]
    fn load_missing_file_reports_path() {
        let err = TextureData::load("definitely/not/here.jpg").unwrap_err();
        match err {
            TextureError::Io { path, .. } => assert!(path.ends_with("here.jpg")),
            other => panic!("unexpected error: {other}"),
        }
    }

    // ── checkerboard ──────────────────────────────────────────────────────

    #[test]
    fn checkerboard_alternates_cells() {
        let a = [255, 255, 255, 255];
        let b = [0, 0, 0, 255];
        let tex = TextureData::checkerboard("c", 8, 2, a, b);
        assert_eq!(tex.rgba.len(), 8 * 8 * 4);
        assert_eq!(tex.pixel(0, 0), Some(a));
        assert_eq!(tex.pixel(4, 0), Some(b));
        assert_eq!(tex.pixel(4, 4), Some(a));
        assert_eq!(tex.pixel(8, 0), None);
    }

    #[test]
    fn checkerboard_clamps_degenerate_sizes() {
        let tex = TextureData::checkerboard("c", 0, 0, [1; 4], [2; 4]);
        assert_eq!((tex.width, tex.height), (1, 1));
        assert_eq!(tex.pixel(0, 0), Some([1; 4]));
    }
}
