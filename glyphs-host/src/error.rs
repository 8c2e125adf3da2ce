use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Instance '{0}' has no interpolated glyphs")]
    NotInterpolated(String),
    #[error("An interpolated font cannot interpolate instance '{0}'")]
    NestedInterpolation(String),
    #[error("More than one instance is called '{0}'")]
    DuplicateInstance(String),
    #[error("Unrecognized glyph category {0}")]
    UnknownCategory(String),
}
