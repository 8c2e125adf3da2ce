//! Plain values handed out by the host font view.

use std::fmt::{Debug, Display};
use std::str::FromStr;

use kurbo::Affine;
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

use crate::error::Error;

#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GlyphName(SmolStr);

impl GlyphName {
    pub fn new(s: impl AsRef<str>) -> Self {
        Self(SmolStr::new(s))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// The name without any dotted variant suffix, "acute.case" => "acute"
    pub fn base_name(&self) -> &str {
        let name = self.as_str();
        name.split('.').next().unwrap_or(name)
    }
}

impl From<&str> for GlyphName {
    fn from(value: &str) -> Self {
        GlyphName(value.into())
    }
}

impl From<String> for GlyphName {
    fn from(value: String) -> Self {
        GlyphName(value.into())
    }
}

impl Debug for GlyphName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Display for GlyphName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for GlyphName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

// lets a HashSet<GlyphName> be queried with &str
impl std::borrow::Borrow<str> for GlyphName {
    fn borrow(&self) -> &str {
        self.0.borrow()
    }
}

/// The primary category the editor assigns to a glyph
///
/// These are the editor's categories, not unicode general categories.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Category {
    Mark,
    Space,
    Separator,
    Letter,
    Number,
    Symbol,
    Punctuation,
    Other,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Mark => "Mark",
            Category::Space => "Space",
            Category::Separator => "Separator",
            Category::Letter => "Letter",
            Category::Number => "Number",
            Category::Symbol => "Symbol",
            Category::Punctuation => "Punctuation",
            Category::Other => "Other",
        }
    }
}

impl FromStr for Category {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Mark" => Ok(Self::Mark),
            "Space" => Ok(Self::Space),
            "Separator" => Ok(Self::Separator),
            "Letter" => Ok(Self::Letter),
            "Number" => Ok(Self::Number),
            "Symbol" => Ok(Self::Symbol),
            "Punctuation" => Ok(Self::Punctuation),
            "Other" => Ok(Self::Other),
            _ => Err(Error::UnknownCategory(s.to_string())),
        }
    }
}

impl TryFrom<String> for Category {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Category> for String {
    fn from(value: Category) -> Self {
        value.as_str().to_string()
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A design master
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Master {
    pub id: SmolStr,
    pub name: SmolStr,
}

impl Master {
    pub fn new(id: impl Into<SmolStr>, name: impl Into<SmolStr>) -> Self {
        Master {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// A named instance the host can interpolate into a font of its own
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Instance {
    pub name: SmolStr,
    #[serde(default)]
    pub width: Option<SmolStr>,
}

impl Instance {
    pub fn new(name: impl Into<SmolStr>) -> Self {
        Instance {
            name: name.into(),
            width: None,
        }
    }

    pub fn with_width(mut self, width: impl Into<SmolStr>) -> Self {
        self.width = Some(width.into());
        self
    }
}

/// Instances read as "Condensed Bold", or just "Bold" without a width class
impl Display for Instance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.width {
            Some(width) => write!(f, "{width} {}", self.name),
            None => f.write_str(&self.name),
        }
    }
}

/// A reference from one glyph's layer to another glyph
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Component {
    pub name: GlyphName,
    #[serde(default = "identity")]
    pub transform: Affine,
}

fn identity() -> Affine {
    Affine::IDENTITY
}

impl Component {
    pub fn new(name: impl Into<GlyphName>) -> Self {
        Component {
            name: name.into(),
            transform: Affine::IDENTITY,
        }
    }

    pub fn with_transform(mut self, transform: Affine) -> Self {
        self.transform = transform;
        self
    }

    /// The transform as a hashable value, equal only for identical coefficients
    pub fn transform_key(&self) -> [OrderedFloat<f64>; 6] {
        // kurbo's affine does not hash
        self.transform.as_coeffs().map(OrderedFloat)
    }
}

/// The value of a custom parameter or custom metadata field
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CustomParameter {
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
    List(Vec<CustomParameter>),
}

impl CustomParameter {
    /// Whether the host would consider the value set
    pub fn is_truthy(&self) -> bool {
        match self {
            CustomParameter::Bool(value) => *value,
            CustomParameter::Integer(value) => *value != 0,
            CustomParameter::Float(value) => *value != 0.0,
            CustomParameter::Text(value) => !value.is_empty(),
            CustomParameter::List(values) => !values.is_empty(),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            CustomParameter::Text(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[CustomParameter]> {
        match self {
            CustomParameter::List(values) => Some(values),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            CustomParameter::Integer(value) => Some(*value),
            CustomParameter::Text(value) => value.trim().parse().ok(),
            _ => None,
        }
    }
}

impl From<&str> for CustomParameter {
    fn from(value: &str) -> Self {
        CustomParameter::Text(value.to_string())
    }
}
