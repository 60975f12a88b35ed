use thiserror::Error;

/// Errors raised while laying out a glyph atlas.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AtlasError {
    #[error("glyph set is empty")]
    EmptyGlyphSet,
    #[error("glyph {glyph:?} appears more than once (first at {first}, again at {again})")]
    DuplicateGlyph { glyph: char, first: usize, again: usize },
    #[error("atlas must have at least one grid column")]
    ZeroColumns,
    #[error("atlas cell size must be non-zero")]
    ZeroCellSize,
}

/// Errors raised by [`crate::config::VisualConfig::validate`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("transition duration must be finite and non-negative, got {0}")]
    InvalidDuration(f32),
    #[error("frame interval must be finite and positive, got {0}")]
    InvalidFrameInterval(f32),
    #[error("time step must be finite and non-negative, got {0}")]
    InvalidTimeStep(f32),
    #[error("rotation interval must be finite and positive, got {0}")]
    InvalidRotationInterval(f32),
    #[error(transparent)]
    Atlas(#[from] AtlasError),
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("invalid atlas: {0}")]
    Atlas(#[from] AtlasError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
