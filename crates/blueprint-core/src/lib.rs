//! Blueprint Core Types and Definitions
//!
//! This crate provides the drawing foundation for Blueprint diagrams:
//!
//! - **Colors**: CSS color handling ([`color::Color`])
//! - **Geometry**: points, sizes, bounds and insets ([`geometry`] module)
//! - **Draw**: strokes, text measurement, boxes, arrows and render layers
//!   ([`draw`] module)

pub mod color;
pub mod draw;
pub mod geometry;
