use std::path::Path;

use anyhow::Context as _;

use crate::{
    foundation::{
        core::{Affine, Point, Rgba8},
        error::{GraphfoldError, GraphfoldResult},
    },
    render::surface::Painter,
};

/// Raw font file bytes plus the face index inside a collection.
#[derive(Clone, Debug)]
pub struct FontBytes {
    pub data: Vec<u8>,
    pub index: u32,
}

/// Read an explicit font file, or fall back to a system sans-serif face.
///
/// An explicit path that cannot be read is an error; a machine without any usable
/// system font yields `Ok(None)`.
pub fn resolve_font(explicit: Option<&Path>) -> GraphfoldResult<Option<FontBytes>> {
    if let Some(path) = explicit {
        let data =
            std::fs::read(path).with_context(|| format!("read font '{}'", path.display()))?;
        return Ok(Some(FontBytes { data, index: 0 }));
    }

    let mut db = usvg::fontdb::Database::new();
    db.load_system_fonts();
    let query = usvg::fontdb::Query {
        families: &[usvg::fontdb::Family::SansSerif],
        ..usvg::fontdb::Query::default()
    };
    let Some(id) = db.query(&query).or_else(|| db.faces().next().map(|f| f.id)) else {
        return Ok(None);
    };
    Ok(db.with_face_data(id, |data, index| FontBytes {
        data: data.to_vec(),
        index,
    }))
}

/// Shapes and paints single-line strings with one registered font.
pub struct TextPainter {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<Rgba8>,
    family: String,
    font: vello_cpu::peniko::FontData,
}

impl TextPainter {
    pub fn new(font: FontBytes) -> GraphfoldResult<Self> {
        let mut font_ctx = parley::FontContext::default();
        let families = font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(font.data.clone()), None);
        let family_id = families.first().map(|(id, _)| *id).ok_or_else(|| {
            GraphfoldError::validation("no font families registered from font bytes")
        })?;
        let family = font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| GraphfoldError::validation("registered font family has no name"))?
            .to_string();

        let font = vello_cpu::peniko::FontData::new(
            vello_cpu::peniko::Blob::from(font.data),
            font.index,
        );
        Ok(Self {
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            family,
            font,
        })
    }

    pub fn family(&self) -> &str {
        &self.family
    }

    fn layout(&mut self, text: &str, size_px: f32, color: Rgba8) -> parley::Layout<Rgba8> {
        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(self.family.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(color));
        let mut layout: parley::Layout<Rgba8> = builder.build(text);
        layout.break_all_lines(None);
        layout
    }

    /// Draw `text` with its first baseline starting at `origin`.
    pub fn draw(
        &mut self,
        painter: &mut Painter,
        text: &str,
        origin: Point,
        size_px: f32,
        color: Rgba8,
    ) {
        self.draw_transformed(painter, text, origin, size_px, color, Affine::IDENTITY);
    }

    /// Like [`TextPainter::draw`], with `origin` expressed in the frame of `transform`.
    pub fn draw_transformed(
        &mut self,
        painter: &mut Painter,
        text: &str,
        origin: Point,
        size_px: f32,
        color: Rgba8,
        transform: Affine,
    ) {
        if text.is_empty() {
            return;
        }
        let layout = self.layout(text, size_px, color);
        let baseline = layout
            .lines()
            .next()
            .map(|line| f64::from(line.metrics().baseline))
            .unwrap_or(0.0);

        let ctx = painter.ctx_with_transform(
            transform * Affine::translate((origin.x, origin.y - baseline)),
        );
        for line in layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                ctx.set_paint(run.style().brush.to_cpu());
                let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                ctx.glyph_run(&self.font)
                    .font_size(run.run().font_size())
                    .fill_glyphs(glyphs);
            }
        }
    }
}

/// Load the configured font, logging instead of failing when none is available.
pub fn text_painter_for(explicit: Option<&Path>) -> GraphfoldResult<Option<TextPainter>> {
    match resolve_font(explicit)? {
        Some(bytes) => {
            let painter = TextPainter::new(bytes)?;
            tracing::debug!(family = painter.family(), "resolved label font");
            Ok(Some(painter))
        }
        None => {
            tracing::warn!("no usable font found; labels and page numbers will be skipped");
            Ok(None)
        }
    }
}
