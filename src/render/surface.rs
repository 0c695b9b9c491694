use std::path::Path;

use anyhow::Context as _;
use vello_cpu::kurbo::Shape as _;

use crate::foundation::{
    core::{Affine, Canvas, Point, Rgba8},
    error::{GraphfoldError, GraphfoldResult},
};

/// A rendered raster: premultiplied RGBA8, row-major, tightly packed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LayerImage {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

impl LayerImage {
    /// A layer filled with a single color.
    pub fn filled(canvas: Canvas, color: Rgba8) -> Self {
        let px = color.to_premul();
        Self {
            width: canvas.width,
            height: canvas.height,
            data: px.repeat(canvas.width as usize * canvas.height as usize),
        }
    }

    pub fn canvas(&self) -> Canvas {
        Canvas {
            width: self.width,
            height: self.height,
        }
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        let p = &self.data[i..i + 4];
        Some([p[0], p[1], p[2], p[3]])
    }

    /// Straight-alpha copy of the pixels, as PNG expects.
    pub fn to_straight_rgba8(&self) -> Vec<u8> {
        let mut out = self.data.clone();
        for px in out.chunks_exact_mut(4) {
            let a = u16::from(px[3]);
            if a == 0 || a == 255 {
                continue;
            }
            for c in &mut px[..3] {
                *c = (((u16::from(*c) * 255) + a / 2) / a).min(255) as u8;
            }
        }
        out
    }

    pub fn save_png(&self, path: &Path) -> GraphfoldResult<()> {
        image::save_buffer_with_format(
            path,
            &self.to_straight_rgba8(),
            self.width,
            self.height,
            image::ColorType::Rgba8,
            image::ImageFormat::Png,
        )
        .with_context(|| format!("write png '{}'", path.display()))?;
        Ok(())
    }
}

/// Thin drawing facade over a `vello_cpu` render context sized to one canvas.
pub struct Painter {
    ctx: vello_cpu::RenderContext,
    width: u16,
    height: u16,
}

impl Painter {
    /// Start a painter, optionally flooding the canvas with `background` first.
    pub fn new(canvas: Canvas, background: Option<Rgba8>) -> GraphfoldResult<Self> {
        let (width, height) = canvas.as_u16()?;
        let mut painter = Self {
            ctx: vello_cpu::RenderContext::new(width, height),
            width,
            height,
        };
        if let Some(bg) = background {
            painter.fill_rect(0.0, 0.0, f64::from(width), f64::from(height), bg);
        }
        Ok(painter)
    }

    pub fn fill_rect(&mut self, x0: f64, y0: f64, x1: f64, y1: f64, color: Rgba8) {
        self.ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx.set_paint(color.to_cpu());
        self.ctx
            .fill_rect(&vello_cpu::kurbo::Rect::new(x0, y0, x1, y1));
    }

    pub fn fill_circle(&mut self, center: Point, radius: f64, color: Rgba8) {
        self.ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx.set_paint(color.to_cpu());
        let circle = vello_cpu::kurbo::Circle::new(point_to_cpu(center), radius);
        self.ctx.fill_path(&circle.to_path(0.1));
    }

    /// Straight segment with square caps.
    pub fn stroke_line(&mut self, a: Point, b: Point, width: f64, color: Rgba8) {
        let mut path = vello_cpu::kurbo::BezPath::new();
        path.move_to(point_to_cpu(a));
        path.line_to(point_to_cpu(b));
        let stroke = vello_cpu::kurbo::Stroke::new(width).with_caps(vello_cpu::kurbo::Cap::Square);
        self.stroke(&path, stroke, color);
    }

    /// Open polyline with round caps and joins. Fewer than two points draws nothing.
    pub fn stroke_polyline(&mut self, points: &[Point], width: f64, color: Rgba8) {
        let [first, rest @ ..] = points else {
            return;
        };
        if rest.is_empty() {
            return;
        }
        let mut path = vello_cpu::kurbo::BezPath::new();
        path.move_to(point_to_cpu(*first));
        for p in rest {
            path.line_to(point_to_cpu(*p));
        }
        let stroke = vello_cpu::kurbo::Stroke::new(width)
            .with_caps(vello_cpu::kurbo::Cap::Round)
            .with_join(vello_cpu::kurbo::Join::Round);
        self.stroke(&path, stroke, color);
    }

    fn stroke(
        &mut self,
        path: &vello_cpu::kurbo::BezPath,
        stroke: vello_cpu::kurbo::Stroke,
        color: Rgba8,
    ) {
        self.ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx.set_paint(color.to_cpu());
        self.ctx.set_stroke(stroke);
        self.ctx.stroke_path(path);
    }

    /// Everything drawn until [`Painter::pop_layer`] is composited at `opacity`.
    pub fn push_opacity(&mut self, opacity: f32) {
        self.ctx.push_opacity_layer(opacity);
    }

    pub fn pop_layer(&mut self) {
        self.ctx.pop_layer();
    }

    pub(crate) fn ctx_with_transform(
        &mut self,
        transform: Affine,
    ) -> &mut vello_cpu::RenderContext {
        self.ctx.set_transform(affine_to_cpu(transform));
        &mut self.ctx
    }

    pub fn finish(mut self) -> LayerImage {
        let mut pixmap = vello_cpu::Pixmap::new(self.width, self.height);
        self.ctx.flush();
        self.ctx.render_to_pixmap(&mut pixmap);
        LayerImage {
            width: u32::from(self.width),
            height: u32::from(self.height),
            data: pixmap.data_as_u8_slice().to_vec(),
        }
    }
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn point_to_cpu(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

/// Fail early when two rasters that must line up differ in size.
pub(crate) fn ensure_same_canvas(a: Canvas, b: Canvas, what: &str) -> GraphfoldResult<()> {
    if a != b {
        return Err(GraphfoldError::render(format!(
            "{what}: expected {}x{}, got {}x{}",
            a.width, a.height, b.width, b.height
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;
