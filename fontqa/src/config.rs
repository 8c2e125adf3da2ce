//! What a project is checked against

use std::{fs, path::Path};

use bitflags::bitflags;
use glyphs_host::{CustomParameter, GlyphName};
use serde::{Deserialize, Serialize};

use crate::Error;

pub const OFL_LICENSE: &str = "This Font Software is licensed under the SIL Open Font License, Version 1.1. This license is available with a FAQ at: http://scripts.sil.org/OFL";
pub const OFL_LICENSE_URL: &str = "http://scripts.sil.org/OFL";

/// Glyphs that are meant to be empty
const INVISIBLE_GLYPHS: [&str; 9] = [
    "uni0000", "uni0002", "uni0009", "uni000A", "NULL", "null", ".null", "CR", "nbspace",
];

/// The expectations a project is held to.
///
/// The default is the Google Fonts checklist for OFL families. Other license
/// regimes can load their own profile from YAML; any field left out keeps its
/// default.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Profile {
    pub files: ProjectFiles,
    pub required_folders: Vec<String>,
    pub units_per_em: u16,
    /// OS/2 fsType bit numbers the family must declare
    pub fs_type: Vec<u16>,
    pub license: String,
    pub license_url: String,
    /// Text the copyright string must contain
    pub copyright_marker: String,
    /// Glyphs allowed to have neither outlines nor components
    pub outline_ignore: Vec<GlyphName>,
    /// Report lookups that came up empty instead of quietly skipping them
    pub strict: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ProjectFiles {
    pub licence: String,
    pub contributors: String,
    pub trademark: String,
    pub readme: String,
    pub gitignore: String,
}

impl Default for Profile {
    fn default() -> Self {
        Profile {
            files: Default::default(),
            required_folders: vec!["sources".to_string(), "fonts".to_string()],
            units_per_em: 1000,
            fs_type: Vec::new(),
            license: OFL_LICENSE.to_string(),
            license_url: OFL_LICENSE_URL.to_string(),
            copyright_marker: "Project Authors".to_string(),
            outline_ignore: INVISIBLE_GLYPHS.into_iter().map(GlyphName::new).collect(),
            strict: false,
        }
    }
}

impl Default for ProjectFiles {
    fn default() -> Self {
        ProjectFiles {
            licence: "OFL.txt".to_string(),
            contributors: "CONTRIBUTORS.txt".to_string(),
            trademark: "TRADEMARKS.txt".to_string(),
            readme: "README.md".to_string(),
            gitignore: ".gitignore".to_string(),
        }
    }
}

impl Profile {
    /// Load a profile from a YAML file
    pub fn load(file: &Path) -> Result<Profile, Error> {
        let yml = fs::read_to_string(file).map_err(|source| Error::FileIo {
            path: file.to_path_buf(),
            source,
        })?;
        serde_yaml::from_str(&yml).map_err(|source| Error::ParseError {
            path: file.to_path_buf(),
            source,
        })
    }
}

bitflags! {
    /// Embedding permissions, the OS/2 fsType bits
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct EmbeddingFlags: u16 {
        const RESTRICTED = 1 << 1;
        const PREVIEW_AND_PRINT = 1 << 2;
        const EDITABLE = 1 << 3;
        const NO_SUBSETTING = 1 << 8;
        const BITMAP_ONLY = 1 << 9;
    }
}

impl EmbeddingFlags {
    /// Flags from a list of bit numbers, `None` if any bit is not a known flag
    pub fn from_bit_numbers(bits: impl IntoIterator<Item = i64>) -> Option<Self> {
        bits.into_iter().try_fold(Self::empty(), |flags, bit| {
            let bit = u32::try_from(bit).ok().filter(|bit| *bit < u16::BITS)?;
            Self::from_bits(1 << bit).map(|flag| flags | flag)
        })
    }

    /// Read an `fsType` parameter: a list of bit numbers, or its text form "[3, 8]"
    pub fn from_parameter(value: &CustomParameter) -> Option<Self> {
        let bits = match value {
            CustomParameter::List(items) => items
                .iter()
                .map(CustomParameter::as_i64)
                .collect::<Option<Vec<_>>>()?,
            CustomParameter::Text(text) => text
                .trim()
                .trim_start_matches(['[', '('])
                .trim_end_matches([']', ')'])
                .split(',')
                .map(str::trim)
                .filter(|bit| !bit.is_empty())
                .map(|bit| bit.parse().ok())
                .collect::<Option<Vec<_>>>()?,
            _ => return None,
        };
        Self::from_bit_numbers(bits)
    }
}
