//! Rendering module
//!
//! Serializes the final ground and the shot annotations as SVG documents.

pub mod svg;

pub use svg::{Scene, render, write_scene};
