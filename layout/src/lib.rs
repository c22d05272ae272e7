pub mod annotation;
pub mod collision;
pub mod composer;
pub mod error;
pub mod geom;
pub mod glyph;

pub use annotation::{NormalizedAnnotation, Placement};
pub use composer::SceneComposer;
pub use error::LayoutError;
pub use glyph::{GlyphDescriptor, GlyphPlacer, GlyphRasterizer, RotatedGlyph};
