/// Text layout: turns strings into textured glyph quads.
/// Quads accumulate into a per-frame batch and are drawn with a single
/// indexed draw call instead of one buffer per glyph.

use crate::renderer::atlas::GlyphAtlas;
use crate::renderer::pipeline::GlyphVertex;

#[derive(Default)]
pub struct TextBatch {
    pub vertices: Vec<GlyphVertex>,
    pub indices: Vec<u32>,
}

impl TextBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Lay out `text` with its baseline at (x, y) in pixel space, y up.
    /// Emits one quad per visible glyph and returns the pen x position
    /// after the final advance, so a caller can continue the line.
    pub fn draw_text(
        &mut self,
        atlas: &GlyphAtlas,
        text: &str,
        x: f32,
        y: f32,
        scale: f32,
        color: [f32; 3],
    ) -> f32 {
        let mut pen_x = x;
        let atlas_w = atlas.atlas_width as f32;
        let atlas_h = atlas.atlas_height as f32;

        for ch in text.chars() {
            let glyph = atlas.glyph(ch);

            if !glyph.is_empty() {
                let x0 = pen_x + glyph.bearing_left as f32 * scale;
                let y0 = y - (glyph.height as i32 - glyph.bearing_top) as f32 * scale;
                let w = glyph.width as f32 * scale;
                let h = glyph.height as f32 * scale;

                let u0 = glyph.x as f32 / atlas_w;
                let v0 = glyph.y as f32 / atlas_h;
                let u1 = (glyph.x + glyph.width) as f32 / atlas_w;
                let v1 = (glyph.y + glyph.height) as f32 / atlas_h;

                // Atlas row 0 holds the bitmap top, so v0 maps to the
                // quad's upper edge in y-up screen space.
                let base = self.vertices.len() as u32;
                self.vertices.extend_from_slice(&[
                    GlyphVertex { position: [x0, y0 + h], uv: [u0, v0], color },
                    GlyphVertex { position: [x0 + w, y0 + h], uv: [u1, v0], color },
                    GlyphVertex { position: [x0 + w, y0], uv: [u1, v1], color },
                    GlyphVertex { position: [x0, y0], uv: [u0, v1], color },
                ]);
                self.indices
                    .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
            }

            pen_x += glyph.advance_px() * scale;
        }

        pen_x
    }
}
