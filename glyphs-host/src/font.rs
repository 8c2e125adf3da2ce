//! The capabilities QA checks need from a host font object.
//!
//! Everything here is read-only. The only operations that need the host's
//! geometry or interpolation engines, [`Layer::overlap_free_path_count`] and
//! [`Font::interpolate`], are expected to work on private copies and leave the
//! host's font untouched.

use crate::{
    error::Error,
    types::{Category, Component, CustomParameter, GlyphName, Instance, Master},
};

pub trait Font {
    fn family_name(&self) -> &str;

    fn units_per_em(&self) -> u16;

    fn copyright(&self) -> Option<&str>;

    /// A custom parameter or custom metadata field, e.g. `vendorID` or `fsType`
    fn custom_parameter(&self, name: &str) -> Option<&CustomParameter>;

    /// Every glyph in font order. Names are not guaranteed to be unique.
    fn glyphs(&self) -> Box<dyn Iterator<Item = &dyn Glyph> + '_>;

    /// The first glyph with the given name
    fn glyph(&self, name: &str) -> Option<&dyn Glyph> {
        self.glyphs().find(|glyph| glyph.name().as_str() == name)
    }

    fn masters(&self) -> &[Master];

    fn instances(&self) -> &[Instance];

    /// Realize an instance into a font of its own.
    ///
    /// Glyphs of the result carry a single layer holding the interpolated
    /// outlines.
    fn interpolate(&self, instance: &Instance) -> Result<Box<dyn Font + '_>, Error>;
}

pub trait Glyph {
    fn name(&self) -> &GlyphName;

    fn category(&self) -> Option<Category>;

    /// All layers, master layers and any others (backups, brace layers)
    fn layers(&self) -> Box<dyn Iterator<Item = &dyn Layer> + '_>;

    /// The layer for the given master
    fn master_layer(&self, master_id: &str) -> Option<&dyn Layer> {
        self.layers().find(|layer| layer.layer_id() == master_id)
    }

    /// Component names the editor's glyph data expects this glyph to be
    /// built from.
    ///
    /// `None` when the glyph data has nothing to say about this glyph, which
    /// is not the same as expecting no components.
    fn expected_components(&self) -> Option<&[GlyphName]>;
}

pub trait Layer {
    fn layer_id(&self) -> &str;

    fn master_id(&self) -> &str;

    fn name(&self) -> &str;

    fn path_count(&self) -> usize;

    fn components(&self) -> &[Component];

    /// The number of paths left once overlaps are removed
    fn overlap_free_path_count(&self) -> usize;
}
