//! A read-only view of the font object a font editor exposes to its scripts.
//!
//! QA tooling is written against the [`Font`], [`Glyph`] and [`Layer`] traits
//! so the same checks run against a live host bridge or against the
//! [`memory`] snapshot.

pub mod error;
mod font;
pub mod memory;
mod types;

pub use error::Error;
pub use font::{Font, Glyph, Layer};
pub use types::{Category, Component, CustomParameter, GlyphName, Instance, Master};
