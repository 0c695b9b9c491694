//! Rasterization: per-slice layers, overlays and page composition.

pub mod composite;
pub mod config;
pub mod layers;
pub mod surface;
pub mod text;
