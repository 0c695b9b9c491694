//! Shared transform helpers.

pub mod linear;
