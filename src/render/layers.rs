//! The four layer kinds: background graph, highlighted graph, trajectories and labels.
//!
//! Every layer is drawn on an opaque white canvas through the same [`ImageMapper`], so any
//! two layers line up pixel for pixel.

use crate::{
    foundation::{
        core::{Canvas, Point, Rgba8},
        error::GraphfoldResult,
    },
    render::{
        config::{LayerStyle, RenderConfig},
        surface::{LayerImage, Painter},
        text::TextPainter,
    },
    snapshot::model::{Edge, Snapshot},
    stats::{bounds::GlobalBounds, rank::Ranking, trajectory::Trajectory},
    transform::linear::{ImageMapper, Interval},
};

/// Everything the layer renderers share for one run. Built once, read-only afterwards.
pub struct LayerContext<'a> {
    config: &'a RenderConfig,
    ranking: &'a Ranking,
    canvas: Canvas,
    mapper: ImageMapper,
    weight: Option<Interval>,
    centrality: Option<Interval>,
}

impl<'a> LayerContext<'a> {
    /// Checks up front that every range the enabled mappings divide by is non-degenerate.
    pub fn new(
        config: &'a RenderConfig,
        bounds: &GlobalBounds,
        ranking: &'a Ranking,
    ) -> GraphfoldResult<Self> {
        let canvas = config.page.layer_canvas()?;
        let mapper =
            bounds.image_mapper(canvas, config.page.margin_x_px(), config.page.margin_y_px())?;
        let m = config.mappings;
        let weight = if m.weight_to_color || m.weight_to_thickness {
            bounds.weight_interval()?
        } else {
            None
        };
        let centrality = if m.centrality_to_diameter {
            Some(bounds.centrality_interval()?)
        } else {
            None
        };
        Ok(Self {
            config,
            ranking,
            canvas,
            mapper,
            weight,
            centrality,
        })
    }

    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    fn edge_width(&self, edge: &Edge, style: &LayerStyle) -> f64 {
        match self.weight {
            Some(w) if self.config.mappings.weight_to_thickness => w.map_to(
                edge.weight,
                self.config.max_line_width,
                self.config.min_line_width,
            ),
            _ => style.edge_thickness,
        }
    }

    fn edge_color(&self, edge: &Edge, style: &LayerStyle) -> Rgba8 {
        match self.weight {
            Some(w) if self.config.mappings.weight_to_color => Rgba8::gray(w.map_to(
                edge.weight,
                self.config.max_color_value,
                self.config.min_color_value,
            )),
            _ => style.edge_color.rgba(),
        }
    }

    fn node_radius(&self, centrality: f64, style: &LayerStyle) -> f64 {
        match self.centrality {
            Some(c) => c.map_to(centrality, style.node_radius, self.config.min_node_radius),
            None => style.node_radius,
        }
    }

    fn both_highlighted(&self, edge: &Edge) -> bool {
        let h = &self.ranking.highlighted;
        h.contains(&edge.source.id) && h.contains(&edge.target.id)
    }

    fn draw_edge(&self, painter: &mut Painter, edge: &Edge, style: &LayerStyle) {
        let a = self.mapper.map(edge.source.x, edge.source.y);
        let b = self.mapper.map(edge.target.x, edge.target.y);
        painter.stroke_line(a, b, self.edge_width(edge, style), self.edge_color(edge, style));
    }
}

/// Edges not joining two highlighted nodes, and non-highlighted nodes, in default colors.
#[tracing::instrument(skip_all, fields(slice = snap.index, source = %snap.source.display()))]
pub fn render_background_layer(
    ctx: &LayerContext<'_>,
    snap: &Snapshot,
) -> GraphfoldResult<LayerImage> {
    let style = &ctx.config.background;
    let mut painter = Painter::new(ctx.canvas, Some(Rgba8::WHITE))?;

    for edge in snap.edges.iter().filter(|e| !ctx.both_highlighted(e)) {
        ctx.draw_edge(&mut painter, edge, style);
    }
    for node in snap
        .nodes
        .iter()
        .filter(|n| !ctx.ranking.highlighted.contains(&n.id))
    {
        painter.fill_circle(
            ctx.mapper.map(node.x, node.y),
            ctx.node_radius(node.centrality, style),
            style.node_color.rgba(),
        );
    }
    Ok(painter.finish())
}

/// Edges between highlighted nodes, and highlighted nodes in their palette colors.
#[tracing::instrument(skip_all, fields(slice = snap.index, source = %snap.source.display()))]
pub fn render_highlight_layer(
    ctx: &LayerContext<'_>,
    snap: &Snapshot,
) -> GraphfoldResult<LayerImage> {
    let style = &ctx.config.highlight;
    let mut painter = Painter::new(ctx.canvas, Some(Rgba8::WHITE))?;

    for edge in snap.edges.iter().filter(|e| ctx.both_highlighted(e)) {
        ctx.draw_edge(&mut painter, edge, style);
    }
    for node in snap
        .nodes
        .iter()
        .filter(|n| ctx.ranking.highlighted.contains(&n.id))
    {
        painter.fill_circle(
            ctx.mapper.map(node.x, node.y),
            ctx.node_radius(node.centrality, style),
            ctx.ranking.colors.get(&node.id).rgba(),
        );
    }
    Ok(painter.finish())
}

/// Translucent path plus waypoint markers for every highlighted node.
#[tracing::instrument(skip_all)]
pub fn render_trajectory_layer(
    ctx: &LayerContext<'_>,
    trajectories: &[Trajectory],
) -> GraphfoldResult<LayerImage> {
    let style = ctx.config.trajectory;
    let mut painter = Painter::new(ctx.canvas, Some(Rgba8::WHITE))?;

    for t in trajectories
        .iter()
        .filter(|t| ctx.ranking.highlighted.contains(&t.id))
    {
        let color = ctx.ranking.colors.get(&t.id).rgba();
        let points: Vec<Point> = t
            .waypoints
            .iter()
            .map(|w| ctx.mapper.map(w.x, w.y))
            .collect();

        painter.push_opacity(style.opacity);
        painter.stroke_polyline(&points, style.line_width, color);
        for p in &points {
            painter.fill_circle(*p, style.line_width / 2.0, color);
        }
        painter.pop_layer();
    }
    Ok(painter.finish())
}

/// Names of highlighted nodes at their last position, over a muted offset shadow.
///
/// Without a font the layer is left blank.
#[tracing::instrument(skip_all)]
pub fn render_label_layer(
    ctx: &LayerContext<'_>,
    trajectories: &[Trajectory],
    text: Option<&mut TextPainter>,
) -> GraphfoldResult<LayerImage> {
    let style = &ctx.config.labels;
    let mut painter = Painter::new(ctx.canvas, Some(Rgba8::WHITE))?;
    let Some(text) = text else {
        return Ok(painter.finish());
    };

    for t in trajectories
        .iter()
        .filter(|t| t.waypoints.len() > 1 && ctx.ranking.highlighted.contains(&t.id))
    {
        let Some(last) = t.last() else {
            continue;
        };
        let at = ctx.mapper.map(last.x, last.y);
        let off = style.shadow_offset_px;
        text.draw(
            &mut painter,
            &last.name,
            Point::new(at.x + off, at.y + off),
            style.font_px,
            style.shadow_color.rgba(),
        );
        text.draw(
            &mut painter,
            &last.name,
            at,
            style.font_px,
            ctx.ranking.colors.get(&t.id).rgba(),
        );
    }
    Ok(painter.finish())
}

#[cfg(test)]
#[path = "../../tests/unit/render/layers.rs"]
mod tests;
