//! An in-memory font that implements the host traits.
//!
//! This is what a host bridge exports (as YAML) when checks run
//! outside the editor, and what tests build fixtures from. Outlines are not
//! stored, only the path counts the host measured: geometry stays the host's
//! business.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

use crate::{
    error::Error,
    font as host,
    types::{Category, Component, CustomParameter, GlyphName, Instance, Master},
};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Font {
    pub family_name: String,
    pub units_per_em: u16,
    pub copyright: Option<String>,
    pub custom_parameters: BTreeMap<String, CustomParameter>,
    pub glyphs: Vec<Glyph>,
    pub masters: Vec<Master>,
    pub instances: Vec<Instance>,
    /// The glyphs each instance interpolates to, keyed by the instance as
    /// displayed: "Condensed Bold", not just "Bold"
    pub interpolations: BTreeMap<String, Vec<Glyph>>,
}

impl Default for Font {
    fn default() -> Self {
        Font {
            family_name: String::new(),
            units_per_em: 1000,
            copyright: None,
            custom_parameters: Default::default(),
            glyphs: Vec::new(),
            masters: Vec::new(),
            instances: Vec::new(),
            interpolations: Default::default(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Glyph {
    pub name: GlyphName,
    #[serde(default)]
    pub category: Option<Category>,
    #[serde(default)]
    pub layers: Vec<Layer>,
    #[serde(default)]
    pub expected_components: Option<Vec<GlyphName>>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Layer {
    pub layer_id: SmolStr,
    /// Set for non-master layers; master layers share their master's id
    #[serde(default)]
    pub associated_master_id: Option<SmolStr>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub paths: usize,
    /// Path count after overlap removal, when it differs from `paths`
    #[serde(default)]
    pub overlap_free_paths: Option<usize>,
    #[serde(default)]
    pub components: Vec<Component>,
}

impl Font {
    pub fn new(family_name: impl Into<String>) -> Self {
        Font {
            family_name: family_name.into(),
            ..Default::default()
        }
    }

    pub fn with_master(mut self, master: Master) -> Self {
        self.masters.push(master);
        self
    }

    pub fn with_glyph(mut self, glyph: Glyph) -> Self {
        self.glyphs.push(glyph);
        self
    }

    pub fn with_parameter(mut self, name: &str, value: impl Into<CustomParameter>) -> Self {
        self.custom_parameters.insert(name.to_string(), value.into());
        self
    }

    /// Add an instance along with the glyphs the host interpolated for it
    pub fn with_instance(mut self, instance: Instance, glyphs: Vec<Glyph>) -> Self {
        self.interpolations.insert(instance.to_string(), glyphs);
        self.instances.push(instance);
        self
    }

    /// Fail if two instances would share interpolated glyphs
    pub fn check_instances(&self) -> Result<(), Error> {
        let mut seen = HashSet::new();
        for instance in &self.instances {
            let key = instance.to_string();
            if !seen.insert(key.clone()) {
                return Err(Error::DuplicateInstance(key));
            }
        }
        Ok(())
    }
}

impl Glyph {
    pub fn new(name: impl Into<GlyphName>) -> Self {
        Glyph {
            name: name.into(),
            category: None,
            layers: Vec::new(),
            expected_components: None,
        }
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    pub fn with_layer(mut self, layer: Layer) -> Self {
        self.layers.push(layer);
        self
    }

    pub fn with_expected_components<I, N>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<GlyphName>,
    {
        self.expected_components = Some(names.into_iter().map(Into::into).collect());
        self
    }
}

impl Layer {
    /// A master layer, named after its master
    pub fn new(master: &Master) -> Self {
        Layer {
            layer_id: master.id.clone(),
            associated_master_id: None,
            name: master.name.to_string(),
            paths: 0,
            overlap_free_paths: None,
            components: Vec::new(),
        }
    }

    pub fn with_paths(mut self, paths: usize) -> Self {
        self.paths = paths;
        self
    }

    pub fn with_overlap_free_paths(mut self, paths: usize) -> Self {
        self.overlap_free_paths = Some(paths);
        self
    }

    pub fn with_component(mut self, component: Component) -> Self {
        self.components.push(component);
        self
    }
}

impl host::Font for Font {
    fn family_name(&self) -> &str {
        &self.family_name
    }

    fn units_per_em(&self) -> u16 {
        self.units_per_em
    }

    fn copyright(&self) -> Option<&str> {
        self.copyright.as_deref()
    }

    fn custom_parameter(&self, name: &str) -> Option<&CustomParameter> {
        self.custom_parameters.get(name)
    }

    fn glyphs(&self) -> Box<dyn Iterator<Item = &dyn host::Glyph> + '_> {
        Box::new(self.glyphs.iter().map(|g| g as &dyn host::Glyph))
    }

    fn masters(&self) -> &[Master] {
        &self.masters
    }

    fn instances(&self) -> &[Instance] {
        &self.instances
    }

    fn interpolate(&self, instance: &Instance) -> Result<Box<dyn host::Font + '_>, Error> {
        let glyphs = self
            .interpolations
            .get(&instance.to_string())
            .ok_or_else(|| Error::NotInterpolated(instance.to_string()))?;
        Ok(Box::new(InterpolatedFont { font: self, glyphs }))
    }
}

/// An instance realized from a [`Font`]; font-wide data is the parent's
struct InterpolatedFont<'a> {
    font: &'a Font,
    glyphs: &'a [Glyph],
}

impl host::Font for InterpolatedFont<'_> {
    fn family_name(&self) -> &str {
        &self.font.family_name
    }

    fn units_per_em(&self) -> u16 {
        self.font.units_per_em
    }

    fn copyright(&self) -> Option<&str> {
        self.font.copyright.as_deref()
    }

    fn custom_parameter(&self, name: &str) -> Option<&CustomParameter> {
        self.font.custom_parameters.get(name)
    }

    fn glyphs(&self) -> Box<dyn Iterator<Item = &dyn host::Glyph> + '_> {
        Box::new(self.glyphs.iter().map(|g| g as &dyn host::Glyph))
    }

    fn masters(&self) -> &[Master] {
        &[]
    }

    fn instances(&self) -> &[Instance] {
        &[]
    }

    fn interpolate(&self, instance: &Instance) -> Result<Box<dyn host::Font + '_>, Error> {
        Err(Error::NestedInterpolation(instance.to_string()))
    }
}

impl host::Glyph for Glyph {
    fn name(&self) -> &GlyphName {
        &self.name
    }

    fn category(&self) -> Option<Category> {
        self.category
    }

    fn layers(&self) -> Box<dyn Iterator<Item = &dyn host::Layer> + '_> {
        Box::new(self.layers.iter().map(|l| l as &dyn host::Layer))
    }

    fn expected_components(&self) -> Option<&[GlyphName]> {
        self.expected_components.as_deref()
    }
}

impl host::Layer for Layer {
    fn layer_id(&self) -> &str {
        &self.layer_id
    }

    fn master_id(&self) -> &str {
        self.associated_master_id.as_deref().unwrap_or(&self.layer_id)
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn path_count(&self) -> usize {
        self.paths
    }

    fn components(&self) -> &[Component] {
        &self.components
    }

    fn overlap_free_path_count(&self) -> usize {
        self.overlap_free_paths.unwrap_or(self.paths)
    }
}
