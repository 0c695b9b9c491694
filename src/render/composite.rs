use std::path::{Path, PathBuf};

use crate::{
    foundation::{
        core::{Affine, Canvas, Point, Rgba8},
        error::{GraphfoldError, GraphfoldResult},
    },
    render::{
        config::RenderConfig,
        surface::{LayerImage, Painter, ensure_same_canvas},
        text::TextPainter,
    },
};

/// Source-over of a premultiplied `overlay` onto `page`, in place.
pub fn blend_overlay(page: &mut LayerImage, overlay: &LayerImage) -> GraphfoldResult<()> {
    ensure_same_canvas(page.canvas(), overlay.canvas(), "page overlay")?;
    for (d, s) in page
        .data
        .chunks_exact_mut(4)
        .zip(overlay.data.chunks_exact(4))
    {
        let keep = 255 - u16::from(s[3]);
        for (dc, &sc) in d.iter_mut().zip(s) {
            let scaled = ((u16::from(*dc) * keep + 127) / 255) as u8;
            *dc = sc.saturating_add(scaled);
        }
    }
    Ok(())
}

/// Pixel `(x, y)` moves to `(w - 1 - x, h - 1 - y)`.
pub fn rotate_180(layer: &LayerImage) -> LayerImage {
    let data = layer
        .data
        .chunks_exact(4)
        .rev()
        .flatten()
        .copied()
        .collect();
    LayerImage {
        width: layer.width,
        height: layer.height,
        data,
    }
}

/// Geometry shared by every page of a run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PageLayout {
    /// Size of one layer; pages are twice as tall.
    pub canvas: Canvas,
    pub margin_x: f64,
    pub margin_y: f64,
    pub number_font_px: f32,
}

impl PageLayout {
    pub fn from_config(config: &RenderConfig) -> GraphfoldResult<Self> {
        Ok(Self {
            canvas: config.page.layer_canvas()?,
            margin_x: config.page.margin_x_px(),
            margin_y: config.page.margin_y_px(),
            number_font_px: config.page_number_font_px,
        })
    }
}

pub fn page_file_name(number: usize) -> String {
    format!("page_{number}.png")
}

/// Stack `top` over the 180°-rotated `bottom`, then stamp page numbers and separators.
///
/// A missing `bottom` leaves the lower half white and unnumbered.
pub fn compose_page(
    number: usize,
    top: &LayerImage,
    bottom: Option<&LayerImage>,
    layout: &PageLayout,
    text: Option<&mut TextPainter>,
) -> GraphfoldResult<LayerImage> {
    let canvas = layout.canvas;
    ensure_same_canvas(canvas, top.canvas(), "top layer")?;
    if let Some(b) = bottom {
        ensure_same_canvas(canvas, b.canvas(), "bottom layer")?;
    }

    let page_canvas = canvas.doubled_height();
    let mut data = Vec::with_capacity(page_canvas.byte_len());
    data.extend_from_slice(&top.data);
    match bottom {
        Some(b) => data.extend(rotate_180(b).data),
        None => data.extend(LayerImage::filled(canvas, Rgba8::WHITE).data),
    }
    let mut page = LayerImage {
        width: page_canvas.width,
        height: page_canvas.height,
        data,
    };

    let (w, h) = (f64::from(canvas.width), f64::from(canvas.height));
    let mut overlay = Painter::new(page_canvas, None)?;
    for y in [1.0, h, 2.0 * h - 1.0] {
        overlay.fill_rect(0.0, y, w, y + 1.0, Rgba8::BLACK);
    }
    if let Some(text) = text {
        let label = number.to_string();
        let at = Point::new(layout.margin_x, layout.margin_y);
        text.draw(&mut overlay, &label, at, layout.number_font_px, Rgba8::BLACK);
        if bottom.is_some() {
            let flipped = Affine::new([-1.0, 0.0, 0.0, -1.0, w, 2.0 * h]);
            text.draw_transformed(
                &mut overlay,
                &label,
                at,
                layout.number_font_px,
                Rgba8::BLACK,
                flipped,
            );
        }
    }
    blend_overlay(&mut page, &overlay.finish())?;
    Ok(page)
}

/// Pair layers two at a time into pages numbered from 1.
pub fn compose_pages(
    layers: &[LayerImage],
    layout: &PageLayout,
    mut text: Option<&mut TextPainter>,
) -> GraphfoldResult<Vec<LayerImage>> {
    layers
        .chunks(2)
        .enumerate()
        .map(|(i, pair)| compose_page(i + 1, &pair[0], pair.get(1), layout, text.as_deref_mut()))
        .collect()
}

/// Composes pages as layers arrive and writes each one as soon as it is complete.
pub struct PageSink {
    layout: PageLayout,
    text: Option<TextPainter>,
    out_dir: PathBuf,
    pending: Option<LayerImage>,
    next_page: usize,
    written: Vec<PathBuf>,
}

impl PageSink {
    pub fn new(layout: PageLayout, text: Option<TextPainter>, out_dir: &Path) -> Self {
        Self {
            layout,
            text,
            out_dir: out_dir.to_path_buf(),
            pending: None,
            next_page: 1,
            written: Vec::new(),
        }
    }

    pub fn push(&mut self, layer: LayerImage) -> GraphfoldResult<()> {
        match self.pending.take() {
            None => self.pending = Some(layer),
            Some(top) => self.write(&top, Some(&layer))?,
        }
        Ok(())
    }

    /// Flush a trailing unpaired layer and return the written paths in page order.
    pub fn finish(mut self) -> GraphfoldResult<Vec<PathBuf>> {
        if let Some(top) = self.pending.take() {
            self.write(&top, None)?;
        }
        Ok(self.written)
    }

    #[tracing::instrument(skip_all, fields(page = self.next_page))]
    fn write(&mut self, top: &LayerImage, bottom: Option<&LayerImage>) -> GraphfoldResult<()> {
        let page = compose_page(
            self.next_page,
            top,
            bottom,
            &self.layout,
            self.text.as_mut(),
        )?;
        let path = self.out_dir.join(page_file_name(self.next_page));
        page.save_png(&path)?;
        tracing::debug!(path = %path.display(), "wrote page");
        self.written.push(path);
        self.next_page += 1;
        Ok(())
    }
}
