use thiserror::Error;

#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("failed to rasterize digit '{digit}' at {font_size}px: {reason}")]
    Rasterize {
        digit: char,
        font_size: u32,
        reason: String,
    },

    #[error("digit '{digit}' at {font_size}px rendered no opaque pixels")]
    EmptyGlyph { digit: char, font_size: u32 },

    #[error("invalid font size range {lo}..={hi}")]
    FontSizeRange { lo: u32, hi: u32 },

    #[error("bad annotation line {line:?}: {reason}")]
    ParseAnnotation { line: String, reason: String },
}
