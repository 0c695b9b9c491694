use crate::foundation::error::{GraphfoldError, GraphfoldResult};

pub use kurbo::{Affine, Point};

/// Pixel dimensions of one layer (one half of a page).
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> GraphfoldResult<Self> {
        if width == 0 || height == 0 {
            return Err(GraphfoldError::validation("canvas must be at least 1x1"));
        }
        Ok(Self { width, height })
    }

    /// Dimensions as the `u16` pair the CPU rasterizer works with.
    pub fn as_u16(self) -> GraphfoldResult<(u16, u16)> {
        let w: u16 = self
            .width
            .try_into()
            .map_err(|_| GraphfoldError::render("canvas width exceeds u16"))?;
        let h: u16 = self
            .height
            .try_into()
            .map_err(|_| GraphfoldError::render("canvas height exceeds u16"))?;
        Ok((w, h))
    }

    /// A page stacks two layers vertically.
    pub fn doubled_height(self) -> Self {
        Self {
            width: self.width,
            height: self.height.saturating_mul(2),
        }
    }

    pub fn byte_len(self) -> usize {
        self.width as usize * self.height as usize * 4
    }
}

/// Straight (non-premultiplied) RGBA8.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const BLACK: Self = Self::opaque(0, 0, 0);
    pub const WHITE: Self = Self::opaque(255, 255, 255);

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Opaque gray from a value in `0..=1` (HSV with zero saturation).
    pub fn gray(value: f64) -> Self {
        let v = (value.clamp(0.0, 1.0) * 255.0).round() as u8;
        Self::opaque(v, v, v)
    }

    pub fn to_premul(self) -> [u8; 4] {
        fn premul(c: u8, a: u8) -> u8 {
            (((u16::from(c) * u16::from(a)) + 127) / 255) as u8
        }
        [
            premul(self.r, self.a),
            premul(self.g, self.a),
            premul(self.b, self.a),
            self.a,
        ]
    }

    pub(crate) fn to_cpu(self) -> vello_cpu::peniko::Color {
        vello_cpu::peniko::Color::from_rgba8(self.r, self.g, self.b, self.a)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
