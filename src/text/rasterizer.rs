use std::{borrow::Cow, collections::HashSet, sync::Arc};

use crate::foundation::core::Rgba8;
use crate::foundation::error::{HeartError, HeartResult};
use crate::raster::blur::unpremultiply_in_place;
use crate::raster::buffer::PixelBuffer;
use crate::raster::primitives::blend_pixel;

/// A loaded font face: family name plus the bytes it was registered from.
///
/// Cloning is cheap; every clone shares the same font bytes.
#[derive(Clone)]
pub struct FontFace {
    family: String,
    bytes: Arc<Vec<u8>>,
    font: vello_cpu::peniko::FontData,
}

impl std::fmt::Debug for FontFace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontFace")
            .field("family", &self.family)
            .field("bytes_len", &self.bytes.len())
            .finish()
    }
}

impl FontFace {
    /// Pair a family name with its font bytes.
    pub fn new(family: impl Into<String>, bytes: Arc<Vec<u8>>) -> Self {
        let shared: Arc<dyn AsRef<[u8]> + Send + Sync> = bytes.clone();
        let font = vello_cpu::peniko::FontData::new(vello_cpu::peniko::Blob::new(shared), 0);
        Self {
            family: family.into(),
            bytes,
            font,
        }
    }

    /// Family name resolved when the face was loaded.
    pub fn family(&self) -> &str {
        &self.family
    }

    /// Raw font file bytes.
    pub fn bytes(&self) -> &Arc<Vec<u8>> {
        &self.bytes
    }

    /// Glyph source for the rasterizer, backed by [`Self::bytes`] without a copy.
    pub(crate) fn font_data(&self) -> &vello_cpu::peniko::FontData {
        &self.font
    }
}

/// Text shaping and rasterization capability used to build card assets.
pub trait TextRasterizer {
    /// Parse font bytes into a face. Malformed bytes are a [`HeartError::Font`].
    fn load_face(&mut self, bytes: &[u8]) -> HeartResult<FontFace>;

    /// Pixel size `(width, height)` of `text` laid out on a single line.
    fn measure(&mut self, text: &str, face: &FontFace, size_px: f32) -> HeartResult<(u32, u32)>;

    /// Blend `text` onto `surface` with its layout box's top-left corner at `origin`.
    fn render(
        &mut self,
        text: &str,
        face: &FontFace,
        size_px: f32,
        surface: &mut PixelBuffer,
        origin: (i32, i32),
        color: Rgba8,
    ) -> HeartResult<()>;
}

/// [`TextRasterizer`] backed by Parley for shaping and `vello_cpu` for glyph coverage.
pub struct ParleyRasterizer {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<Rgba8>,
    registered: HashSet<String>,
}

impl Default for ParleyRasterizer {
    fn default() -> Self {
        Self::new()
    }
}

impl ParleyRasterizer {
    /// Fresh Parley contexts with no fonts registered.
    pub fn new() -> Self {
        Self {
            font_ctx: parley::FontContext::default(),
            layout_ctx: parley::LayoutContext::new(),
            registered: HashSet::new(),
        }
    }

    fn register(&mut self, bytes: &[u8]) -> HeartResult<String> {
        let families = self
            .font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(bytes.to_vec()), None);
        let family_id = families
            .first()
            .map(|(id, _)| *id)
            .ok_or_else(|| HeartError::font("no font families registered from font bytes"))?;
        let family = self
            .font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| HeartError::font("registered font family has no name"))?
            .to_string();
        self.registered.insert(family.clone());
        Ok(family)
    }

    fn layout(
        &mut self,
        text: &str,
        face: &FontFace,
        size_px: f32,
        brush: Rgba8,
    ) -> HeartResult<parley::Layout<Rgba8>> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(HeartError::validation("text size_px must be finite and > 0"));
        }
        if !self.registered.contains(face.family()) {
            self.register(face.bytes())?;
        }

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(Cow::Owned(face.family().to_string())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<Rgba8> = builder.build(text);
        layout.break_all_lines(None);
        Ok(layout)
    }
}

fn layout_size(layout: &parley::Layout<Rgba8>) -> (u32, u32) {
    let w = layout.width().ceil().max(0.0) as u32;
    let h = layout.height().ceil().max(0.0) as u32;
    (w, h)
}

impl TextRasterizer for ParleyRasterizer {
    fn load_face(&mut self, bytes: &[u8]) -> HeartResult<FontFace> {
        let family = self.register(bytes)?;
        tracing::debug!(%family, bytes = bytes.len(), "font face loaded");
        Ok(FontFace::new(family, Arc::new(bytes.to_vec())))
    }

    fn measure(&mut self, text: &str, face: &FontFace, size_px: f32) -> HeartResult<(u32, u32)> {
        let layout = self.layout(text, face, size_px, Rgba8::WHITE)?;
        Ok(layout_size(&layout))
    }

    fn render(
        &mut self,
        text: &str,
        face: &FontFace,
        size_px: f32,
        surface: &mut PixelBuffer,
        origin: (i32, i32),
        color: Rgba8,
    ) -> HeartResult<()> {
        let layout = self.layout(text, face, size_px, color)?;
        let (w, h) = layout_size(&layout);
        if w == 0 || h == 0 {
            return Ok(());
        }
        let w16: u16 = w
            .try_into()
            .map_err(|_| HeartError::render("text bitmap width exceeds u16"))?;
        let h16: u16 = h
            .try_into()
            .map_err(|_| HeartError::render("text bitmap height exceeds u16"))?;

        let mut ctx = vello_cpu::RenderContext::new(w16, h16);
        for line in layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                let brush = run.style().brush;
                ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                    brush.r, brush.g, brush.b, brush.a,
                ));
                let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                ctx.glyph_run(face.font_data())
                    .font_size(run.run().font_size())
                    .fill_glyphs(glyphs);
            }
        }
        ctx.flush();

        let mut pixmap = vello_cpu::Pixmap::new(w16, h16);
        ctx.render_to_pixmap(&mut pixmap);

        let mut straight = pixmap.data_as_u8_slice().to_vec();
        unpremultiply_in_place(&mut straight);
        let stamp = PixelBuffer::from_raw(w, h, straight)?;
        stamp_onto(surface, &stamp, origin);
        Ok(())
    }
}

/// Blend every non-transparent pixel of `stamp` onto `surface` at `origin`.
pub(crate) fn stamp_onto(surface: &mut PixelBuffer, stamp: &PixelBuffer, origin: (i32, i32)) {
    for (i, px) in stamp.as_bytes().chunks_exact(4).enumerate() {
        if px[3] == 0 {
            continue;
        }
        let x = (i % stamp.width() as usize) as i32 + origin.0;
        let y = (i / stamp.width() as usize) as i32 + origin.1;
        blend_pixel(surface, x, y, Rgba8::from_array([px[0], px[1], px[2], px[3]]));
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/rasterizer.rs"]
mod tests;
