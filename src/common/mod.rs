//! Common types and utilities shared by the OPC, writer and reader layers.

pub mod geometry;
pub mod style;
pub mod unit;
pub mod xml;

pub use geometry::Geometry;
pub use style::RGBColor;
