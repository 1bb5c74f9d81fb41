pub mod font_service;
pub mod geometry_service;

pub use font_service::{FontAsset, FontProvider, GlyphSource};
pub use geometry_service::{build_text_geometry, GeometryBuilder};
