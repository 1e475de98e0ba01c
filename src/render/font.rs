// WGF
// copyright zipxing@hotmail.com 2022～2025

//! TTF/OTF text rendering, reference https://docs.rs/fontdue

use crate::{
    render::{style::Rgb, surface::Surface},
    util::Size,
};
use fontdue::FontSettings;
use std::{fmt, fs, path::Path};

#[derive(Clone)]
pub struct Font {
    pub name: String,
    /// pixel size glyphs are rasterized at
    pub size: u32,
    inner: fontdue::Font,
}

impl fmt::Debug for Font {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Font")
            .field("name", &self.name)
            .field("size", &self.size)
            .finish()
    }
}

impl Font {
    pub fn from_bytes(name: &str, data: &[u8], size: u32) -> Result<Self, String> {
        let settings = FontSettings {
            scale: size as f32,
            ..FontSettings::default()
        };
        let inner = fontdue::Font::from_bytes(data, settings)?;
        Ok(Self {
            name: name.to_string(),
            size,
            inner,
        })
    }

    pub fn load<P: AsRef<Path>>(path: P, size: u32) -> Result<Self, String> {
        let path = path.as_ref();
        let data = fs::read(path).map_err(|e| e.to_string())?;
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self::from_bytes(&name, &data, size)
    }

    fn line_height(&self) -> (f32, f32) {
        let px = self.size as f32;
        match self.inner.horizontal_line_metrics(px) {
            Some(lm) => (lm.ascent, lm.ascent - lm.descent),
            None => (px, px),
        }
    }

    /// Size a single line of `text` would occupy
    pub fn size_of(&self, text: &str) -> Size {
        let px = self.size as f32;
        let width: f32 = text
            .chars()
            .map(|c| self.inner.metrics(c, px).advance_width)
            .sum();
        let (_, height) = self.line_height();
        Size::new(width.ceil() as u32, height.ceil() as u32)
    }

    /// Render one line of text on a transparent surface. Without
    /// antialiasing glyph coverage is thresholded to hard edges.
    pub fn render(&self, text: &str, antialias: bool, color: Rgb) -> Surface {
        let px = self.size as f32;
        let mut surface = Surface::new(self.size_of(text));
        let (ascent, _) = self.line_height();
        let mut pen = 0.0f32;
        for c in text.chars() {
            let (metrics, coverage) = self.inner.rasterize(c, px);
            let gx = pen.round() as i32 + metrics.xmin;
            let gy = ascent.round() as i32 - metrics.ymin - metrics.height as i32;
            for (i, cov) in coverage.iter().enumerate() {
                let alpha = match (antialias, *cov) {
                    (_, 0) => continue,
                    (true, a) => a,
                    (false, a) if a >= 128 => 255,
                    _ => continue,
                };
                let x = gx + (i % metrics.width) as i32;
                let y = gy + (i / metrics.width) as i32;
                if x >= 0 && y >= 0 {
                    surface.put_pixel(x as u32, y as u32, color.with_alpha(alpha));
                }
            }
            pen += metrics.advance_width;
        }
        surface
    }
}
