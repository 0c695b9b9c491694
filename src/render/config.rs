use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use serde::{Deserialize, Serialize};

use crate::{
    foundation::{
        color::HexColor,
        core::{Canvas, Rgba8},
        error::{GraphfoldError, GraphfoldResult},
    },
    stats::rank::Highlight,
};

/// Tableau 10, in order.
pub const DEFAULT_PALETTE: [&str; 10] = [
    "#5778a4", "#e49444", "#d1615d", "#85b6b2", "#6a9f58", "#e7ca60", "#a87c9f", "#f1a2a9",
    "#967662", "#b8b0ac",
];

/// Which data-driven encodings are applied when drawing slice layers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MappingOptions {
    /// Edge gray level from weight (heavier is darker).
    pub weight_to_color: bool,
    /// Edge stroke width from weight.
    pub weight_to_thickness: bool,
    /// Node radius from centrality.
    pub centrality_to_diameter: bool,
}

impl Default for MappingOptions {
    fn default() -> Self {
        Self {
            weight_to_color: false,
            weight_to_thickness: true,
            centrality_to_diameter: false,
        }
    }
}

/// Paper size and resolution of one half-page.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PageGeometry {
    pub paper_width_mm: u32,
    pub paper_height_mm: u32,
    pub px_per_mm: u32,
    pub margin_x_mm: u32,
    pub margin_y_mm: u32,
}

impl Default for PageGeometry {
    /// A5 landscape at 10 px/mm.
    fn default() -> Self {
        Self {
            paper_width_mm: 210,
            paper_height_mm: 148,
            px_per_mm: 10,
            margin_x_mm: 20,
            margin_y_mm: 10,
        }
    }
}

impl PageGeometry {
    /// Pixel size of a single layer.
    pub fn layer_canvas(&self) -> GraphfoldResult<Canvas> {
        Canvas::new(
            self.paper_width_mm.saturating_mul(self.px_per_mm),
            self.paper_height_mm.saturating_mul(self.px_per_mm),
        )
    }

    pub fn margin_x_px(&self) -> f64 {
        f64::from(self.margin_x_mm) * f64::from(self.px_per_mm)
    }

    pub fn margin_y_px(&self) -> f64 {
        f64::from(self.margin_y_mm) * f64::from(self.px_per_mm)
    }

    fn validate(&self) -> GraphfoldResult<()> {
        if self.px_per_mm == 0 {
            return Err(GraphfoldError::validation("page px_per_mm must be > 0"));
        }
        if self.margin_x_mm.saturating_mul(2) >= self.paper_width_mm
            || self.margin_y_mm.saturating_mul(2) >= self.paper_height_mm
        {
            return Err(GraphfoldError::validation(
                "page margins must leave a non-empty drawing area",
            ));
        }
        // Pages stack two layers, and the rasterizer addresses pixels with u16.
        self.layer_canvas()?.doubled_height().as_u16()?;
        Ok(())
    }
}

/// Drawing style of a per-slice layer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LayerStyle {
    pub node_radius: f64,
    /// Stroke width used when weight-to-thickness is off.
    pub edge_thickness: f64,
    /// Stroke color used when weight-to-color is off.
    pub edge_color: HexColor,
    /// Fill for nodes drawn in their default color.
    pub node_color: HexColor,
}

impl LayerStyle {
    pub fn background() -> Self {
        Self {
            node_radius: 15.0,
            edge_thickness: 3.0,
            edge_color: HexColor::from_rgba8(Rgba8::opaque(0xcc, 0xcc, 0xcc)),
            node_color: HexColor::from_rgba8(Rgba8::opaque(0xcc, 0xcc, 0xcc)),
        }
    }

    pub fn highlight() -> Self {
        Self {
            node_radius: 20.0,
            edge_thickness: 1.0,
            edge_color: HexColor::from_rgba8(Rgba8::opaque(0x66, 0x66, 0x66)),
            node_color: HexColor::from_rgba8(Rgba8::opaque(0x66, 0x66, 0x66)),
        }
    }

    fn validate(&self, what: &str) -> GraphfoldResult<()> {
        if !(self.node_radius.is_finite() && self.node_radius > 0.0) {
            return Err(GraphfoldError::validation(format!(
                "{what}.node_radius must be finite and > 0"
            )));
        }
        if !(self.edge_thickness.is_finite() && self.edge_thickness > 0.0) {
            return Err(GraphfoldError::validation(format!(
                "{what}.edge_thickness must be finite and > 0"
            )));
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TrajectoryStyle {
    pub line_width: f64,
    pub opacity: f32,
}

impl Default for TrajectoryStyle {
    fn default() -> Self {
        Self {
            line_width: 50.0,
            opacity: 0.5,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LabelStyle {
    pub font_px: f32,
    pub shadow_color: HexColor,
    pub shadow_offset_px: f64,
}

impl Default for LabelStyle {
    fn default() -> Self {
        Self {
            font_px: 28.0,
            shadow_color: HexColor::from_rgba8(Rgba8::opaque(0x66, 0x66, 0x66)),
            shadow_offset_px: 1.0,
        }
    }
}

/// Every tunable of a run. All fields have defaults, so a config file only lists overrides.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    pub palette: Vec<HexColor>,
    /// Number of nodes to highlight; 0 highlights every node.
    pub top_k: usize,
    pub page: PageGeometry,
    pub min_line_width: f64,
    pub max_line_width: f64,
    /// Gray value for the lightest edge when weight-to-color is on.
    pub min_color_value: f64,
    /// Gray value for the heaviest edge when weight-to-color is on.
    pub max_color_value: f64,
    /// Smallest radius when centrality-to-diameter is on; the layer radius is the largest.
    pub min_node_radius: f64,
    pub mappings: MappingOptions,
    pub background: LayerStyle,
    pub highlight: LayerStyle,
    pub trajectory: TrajectoryStyle,
    pub labels: LabelStyle,
    pub page_number_font_px: f32,
    /// Font file for labels and page numbers; system fonts are searched when unset.
    pub font: Option<PathBuf>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            palette: DEFAULT_PALETTE
                .iter()
                .filter_map(|c| HexColor::parse(c).ok())
                .collect(),
            top_k: 10,
            page: PageGeometry::default(),
            min_line_width: 1.0,
            max_line_width: 10.0,
            min_color_value: 0.8,
            max_color_value: 0.2,
            min_node_radius: 5.0,
            mappings: MappingOptions::default(),
            background: LayerStyle::background(),
            highlight: LayerStyle::highlight(),
            trajectory: TrajectoryStyle::default(),
            labels: LabelStyle::default(),
            page_number_font_px: 28.0,
            font: None,
        }
    }
}

impl RenderConfig {
    pub fn from_path(path: &Path) -> GraphfoldResult<Self> {
        let f = File::open(path).with_context(|| format!("open config '{}'", path.display()))?;
        let cfg: Self = serde_json::from_reader(BufReader::new(f)).map_err(|e| {
            GraphfoldError::serde(format!("parse config '{}': {e}", path.display()))
        })?;
        Ok(cfg)
    }

    pub fn highlight_policy(&self) -> Highlight {
        Highlight::from_top_k(Some(self.top_k))
    }

    pub fn validate(&self) -> GraphfoldResult<()> {
        if self.palette.is_empty() {
            return Err(GraphfoldError::validation("palette must not be empty"));
        }
        self.page.validate()?;
        for (name, v) in [
            ("min_line_width", self.min_line_width),
            ("max_line_width", self.max_line_width),
            ("min_node_radius", self.min_node_radius),
            ("trajectory.line_width", self.trajectory.line_width),
        ] {
            if !(v.is_finite() && v > 0.0) {
                return Err(GraphfoldError::validation(format!(
                    "{name} must be finite and > 0"
                )));
            }
        }
        for (name, v) in [
            ("min_color_value", self.min_color_value),
            ("max_color_value", self.max_color_value),
        ] {
            if !(0.0..=1.0).contains(&v) {
                return Err(GraphfoldError::validation(format!(
                    "{name} must be within 0..=1"
                )));
            }
        }
        if !(0.0..=1.0).contains(&self.trajectory.opacity) {
            return Err(GraphfoldError::validation(
                "trajectory.opacity must be within 0..=1",
            ));
        }
        for (name, v) in [
            ("labels.font_px", self.labels.font_px),
            ("page_number_font_px", self.page_number_font_px),
        ] {
            if !(v.is_finite() && v > 0.0) {
                return Err(GraphfoldError::validation(format!(
                    "{name} must be finite and > 0"
                )));
            }
        }
        self.background.validate("background")?;
        self.highlight.validate("highlight")?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/config.rs"]
mod tests;
