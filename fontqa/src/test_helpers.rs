//! Fixtures for testing glyph checks

use glyphs_host::{
    memory::{Font, Glyph, Layer},
    Category, Master,
};

pub(crate) fn regular() -> Master {
    Master::new("m01", "Regular")
}

pub(crate) fn bold() -> Master {
    Master::new("m02", "Bold")
}

/// An empty two master font
pub(crate) fn two_masters() -> Font {
    Font::new("Test Sans")
        .with_master(regular())
        .with_master(bold())
}

/// A letter with the given path count in each master of [`two_masters`]
pub(crate) fn letter(name: &str, regular_paths: usize, bold_paths: usize) -> Glyph {
    Glyph::new(name)
        .with_category(Category::Letter)
        .with_layer(Layer::new(&regular()).with_paths(regular_paths))
        .with_layer(Layer::new(&bold()).with_paths(bold_paths))
}

/// A glyph as an interpolated instance holds it, a single layer
pub(crate) fn interpolated(name: &str, paths: usize) -> Glyph {
    Glyph::new(name).with_layer(Layer::new(&Master::new("instance", "")).with_paths(paths))
}
