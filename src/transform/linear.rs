//! Linear transform helpers.

use crate::foundation::{
    core::{Canvas, Point},
    error::{GraphfoldError, GraphfoldResult},
};

/// Affine map of `x` from `[src_min, src_max]` onto `[dst_min, dst_max]`.
///
/// The destination is passed high-then-low: `src_min` lands on `dst_min` and `src_max` on
/// `dst_max`, so swapping the two destination arguments flips the axis. The source range
/// must not be degenerate; use [`Interval`] to get that checked once up front.
#[inline]
pub fn map_interval(x: f64, src_min: f64, src_max: f64, dst_max: f64, dst_min: f64) -> f64 {
    debug_assert!(src_max != src_min, "map_interval called with a degenerate source range");
    dst_min + (dst_max - dst_min) * ((x - src_min) / (src_max - src_min))
}

/// A finite, non-degenerate closed interval.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct Interval {
    min: f64,
    max: f64,
}

impl Interval {
    pub fn new(min: f64, max: f64) -> GraphfoldResult<Self> {
        if !min.is_finite() || !max.is_finite() {
            return Err(GraphfoldError::validation(format!(
                "interval bounds must be finite (got {min}..{max})"
            )));
        }
        if min >= max {
            return Err(GraphfoldError::validation(format!(
                "interval must satisfy min < max (got {min}..{max})"
            )));
        }
        Ok(Self { min, max })
    }

    pub fn min(self) -> f64 {
        self.min
    }

    pub fn max(self) -> f64 {
        self.max
    }

    #[inline]
    pub fn map_to(self, x: f64, dst_max: f64, dst_min: f64) -> f64 {
        map_interval(x, self.min, self.max, dst_max, dst_min)
    }
}

/// Maps graph-space coordinates into the drawable area of a layer.
///
/// x spans `[margin_x, width - margin_x]` and y spans `[margin_y, height - margin_y]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ImageMapper {
    x: Interval,
    y: Interval,
    img_x: (f64, f64),
    img_y: (f64, f64),
}

impl ImageMapper {
    pub fn new(x: Interval, y: Interval, canvas: Canvas, margin_x: f64, margin_y: f64) -> Self {
        let (w, h) = (f64::from(canvas.width), f64::from(canvas.height));
        Self {
            x,
            y,
            img_x: (margin_x, w - margin_x),
            img_y: (margin_y, h - margin_y),
        }
    }

    #[inline]
    pub fn map(&self, x: f64, y: f64) -> Point {
        let (x_min, x_max) = self.img_x;
        let (y_min, y_max) = self.img_y;
        Point::new(self.x.map_to(x, x_max, x_min), self.y.map_to(y, y_max, y_min))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/transform/linear.rs"]
mod tests;
