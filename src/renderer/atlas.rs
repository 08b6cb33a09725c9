/// Glyph atlas: rasterizes the ASCII range into one packed texture.
/// Uses fontdue for rasterization; built once at startup, immutable after.

use fontdue::{Font, FontSettings};
use std::io;

/// Highest codepoint rasterized into the atlas. Lookups above this
/// resolve to the placeholder entry.
pub const ASCII_MAX: u32 = 127;

const ATLAS_WIDTH: u32 = 512;
const ATLAS_HEIGHT: u32 = 512;

/// Position and metrics of a glyph within the atlas.
///
/// `advance` is stored in 26.6 fixed-point; shift right by 6 for pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphEntry {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
    /// Offset from the pen to the bitmap's left edge.
    pub bearing_left: i32,
    /// Distance from the baseline up to the bitmap's top edge.
    pub bearing_top: i32,
    pub advance: u32,
}

impl GlyphEntry {
    pub fn advance_px(&self) -> f32 {
        (self.advance >> 6) as f32
    }

    /// True if the glyph has no coverage to draw (space, control codes).
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

pub struct GlyphAtlas {
    /// Atlas pixel data (single channel, coverage)
    pub pixels: Vec<u8>,
    pub atlas_width: u32,
    pub atlas_height: u32,
    /// One entry per ASCII code 0–127
    glyphs: Vec<GlyphEntry>,
    /// Entry returned for codepoints outside the ASCII range
    placeholder: GlyphEntry,
    /// Pixel size the glyphs were rasterized at
    pub font_px: f32,
}

impl GlyphAtlas {
    /// Read a font file and rasterize the full ASCII range at `font_px`.
    pub fn from_file(path: &str, font_px: f32) -> io::Result<Self> {
        let data = std::fs::read(path)?;
        log::info!("loaded font {} ({} bytes)", path, data.len());
        Self::from_font_bytes(&data, font_px)
    }

    /// Rasterize codes 0–127 plus the placeholder from raw font data.
    pub fn from_font_bytes(data: &[u8], font_px: f32) -> io::Result<Self> {
        let font = Font::from_bytes(data, FontSettings::default())
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        let mut packer = Packer::new(ATLAS_WIDTH, ATLAS_HEIGHT);
        let mut pixels = vec![0u8; (ATLAS_WIDTH * ATLAS_HEIGHT) as usize];

        let mut glyphs = Vec::with_capacity(ASCII_MAX as usize + 1);
        for code in 0..=ASCII_MAX {
            let (metrics, bitmap) = font.rasterize(code as u8 as char, font_px);
            glyphs.push(packer.insert(&mut pixels, &metrics, &bitmap));
        }

        // The font's missing-glyph bitmap stands in for anything
        // outside the ASCII range.
        let (metrics, bitmap) = font.rasterize_indexed(0, font_px);
        let placeholder = packer.insert(&mut pixels, &metrics, &bitmap);

        Ok(Self {
            pixels,
            atlas_width: ATLAS_WIDTH,
            atlas_height: ATLAS_HEIGHT,
            glyphs,
            placeholder,
            font_px,
        })
    }

    /// Look up the entry for a character. Codepoints outside the
    /// rasterized range return the placeholder.
    pub fn glyph(&self, ch: char) -> GlyphEntry {
        let code = ch as u32;
        if code <= ASCII_MAX {
            self.glyphs[code as usize]
        } else {
            self.placeholder
        }
    }

    /// Vertical step between rendered lines, in pixels.
    pub fn line_height(&self) -> f32 {
        self.font_px
    }

    pub fn glyph_count(&self) -> usize {
        self.glyphs.len()
    }
}

/// Simple row-based packer over a fixed-size single-channel canvas.
struct Packer {
    width: u32,
    height: u32,
    cursor_x: u32,
    cursor_y: u32,
    row_height: u32,
}

impl Packer {
    fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            cursor_x: 0,
            cursor_y: 0,
            row_height: 0,
        }
    }

    fn insert(&mut self, pixels: &mut [u8], metrics: &fontdue::Metrics, bitmap: &[u8]) -> GlyphEntry {
        let w = metrics.width as u32;
        let h = metrics.height as u32;
        let entry_metrics = |x, y, width, height| GlyphEntry {
            x,
            y,
            width,
            height,
            bearing_left: metrics.xmin,
            bearing_top: metrics.ymin + metrics.height as i32,
            advance: (metrics.advance_width * 64.0).round().max(0.0) as u32,
        };

        // Control codes and space rasterize to empty bitmaps; they
        // occupy no atlas area but keep their advance.
        if w == 0 || h == 0 {
            return entry_metrics(0, 0, 0, 0);
        }

        if self.cursor_x + w + 1 > self.width {
            self.cursor_x = 0;
            self.cursor_y += self.row_height + 1;
            self.row_height = 0;
        }

        if w > self.width || self.cursor_y + h > self.height {
            log::warn!("glyph atlas full, dropping bitmap {}x{}", w, h);
            return entry_metrics(0, 0, 0, 0);
        }

        for row in 0..h {
            for col in 0..w {
                let src = bitmap[(row * w + col) as usize];
                let dst_x = self.cursor_x + col;
                let dst_y = self.cursor_y + row;
                pixels[(dst_y * self.width + dst_x) as usize] = src;
            }
        }

        let entry = entry_metrics(self.cursor_x, self.cursor_y, w, h);
        self.cursor_x += w + 1;
        self.row_height = self.row_height.max(h);
        entry
    }
}
