//! Glyph level QA: names, outlines and components

use std::collections::HashSet;

use glyphs_host::{Category, Font, GlyphName};
use indexmap::{IndexMap, IndexSet};
use log::debug;
use ordered_float::OrderedFloat;

use crate::{compatibility::instance_compatibility, config::Profile, report::Report};

/// Run every glyph check, returning whether they all passed
pub fn check_glyphs(font: &dyn Font, profile: &Profile, report: &mut Report) -> bool {
    let mut passed = find_duplicates(font, report);
    passed &= find_numeric_suffixes(font, report);
    passed &= outlines_missing(font, profile, report);
    passed &= find_duplicate_components(font, report);
    passed &= find_missing_components(font, profile.strict, report);
    passed &= instance_compatibility(font, profile.strict, report);
    passed
}

/// Names that occur more than once, in order of first occurrence
pub fn duplicate_names(font: &dyn Font) -> Vec<GlyphName> {
    let mut counts: IndexMap<&GlyphName, usize> = IndexMap::new();
    for glyph in font.glyphs() {
        *counts.entry(glyph.name()).or_default() += 1;
    }
    counts
        .into_iter()
        .filter(|(_, count)| *count > 1)
        .map(|(name, _)| name.clone())
        .collect()
}

pub fn find_duplicates(font: &dyn Font, report: &mut Report) -> bool {
    report.heading("Find Duplicate glyphs in selected font");
    let duplicates = duplicate_names(font);
    for name in &duplicates {
        report.error(format!("{name} duplicated"));
    }
    if duplicates.is_empty() {
        report.pass("No duplicate glyphs");
    }
    duplicates.is_empty()
}

/// Flag names like "a.001", left behind when the editor resolves a name clash
pub fn find_numeric_suffixes(font: &dyn Font, report: &mut Report) -> bool {
    report.heading("Find glyphs with suffix .00");
    let suffixed: Vec<String> = font
        .glyphs()
        .filter(|glyph| glyph.name().as_str().contains(".0"))
        .map(|glyph| glyph.name().to_string())
        .collect();
    if suffixed.is_empty() {
        report.pass("font contains no .00x glyphs");
        true
    } else {
        report.error(format!("font contains {}", suffixed.join(", ")));
        false
    }
}

/// Every visible glyph needs outlines or components in every master
pub fn outlines_missing(font: &dyn Font, profile: &Profile, report: &mut Report) -> bool {
    report.heading("Check Glyphs have outlines or components");
    let ignore: HashSet<&str> = profile.outline_ignore.iter().map(GlyphName::as_str).collect();

    let mut passed = true;
    for master in font.masters() {
        let mut empty = Vec::new();
        for glyph in font.glyphs() {
            if glyph.category() == Some(Category::Separator)
                || ignore.contains(glyph.name().as_str())
            {
                continue;
            }
            let Some(layer) = glyph.master_layer(&master.id) else {
                if profile.strict {
                    report.warning(format!("{} has no {} layer", glyph.name(), master.name));
                } else {
                    debug!("{} has no layer for master {}", glyph.name(), master.id);
                }
                continue;
            };
            if layer.path_count() == 0 && layer.components().is_empty() {
                empty.push(glyph.name().clone());
            }
        }

        if empty.is_empty() {
            report.pass(format!(
                "{} master's glyphs have components or outlines",
                master.name
            ));
        } else {
            passed = false;
            for name in empty {
                report.error(format!(
                    "{} master's {name} should have outlines or components",
                    master.name
                ));
            }
        }
    }
    passed
}

/// Components of the same glyph stacked on top of each other.
///
/// This happens when the editor generates a glyph like quotedblright and
/// places both quotes at the same spot.
pub fn find_duplicate_components(font: &dyn Font, report: &mut Report) -> bool {
    report.heading("Find duplicate components that share the same position/transformation.");
    let mut passed = true;
    for glyph in font.glyphs() {
        for layer in glyph.layers() {
            let mut placements: IndexMap<&GlyphName, (usize, HashSet<[OrderedFloat<f64>; 6]>)> =
                IndexMap::new();
            for component in layer.components() {
                let (count, transforms) = placements.entry(&component.name).or_default();
                *count += 1;
                transforms.insert(component.transform_key());
            }
            for (name, (count, transforms)) in placements {
                if count > transforms.len() {
                    passed = false;
                    report.error(format!(
                        "glyph {} layer {}: {count} components of {name} share {} transformations.\n    \
                         All components of the same type must be positioned differently.",
                        glyph.name(),
                        layer.name(),
                        transforms.len(),
                    ));
                }
            }
        }
    }
    if passed {
        report.pass("no duplicate components share the same spot.");
    }
    passed
}

/// Letters should be built from the components the glyph data expects.
///
/// Variant suffixes are ignored on both sides: an "acute.case" component
/// satisfies an expected "acute".
pub fn find_missing_components(font: &dyn Font, strict: bool, report: &mut Report) -> bool {
    report.heading("Find glyphs which should have components");
    let mut passed = true;
    for glyph in font.glyphs() {
        if glyph.category() != Some(Category::Letter) {
            continue;
        }
        let Some(expected) = glyph.expected_components() else {
            if strict {
                report.warning(format!("{} has no glyph data", glyph.name()));
            }
            continue;
        };
        let expected: IndexSet<&str> = expected.iter().map(GlyphName::base_name).collect();
        if expected.is_empty() {
            continue;
        }

        for master in font.masters() {
            let Some(layer) = glyph.master_layer(&master.id) else {
                debug!("{} has no layer for master {}", glyph.name(), master.id);
                continue;
            };
            let actual: HashSet<&str> = layer
                .components()
                .iter()
                .map(|component| component.name.base_name())
                .collect();
            let missing: Vec<&str> = expected
                .iter()
                .filter(|name| !actual.contains(*name))
                .copied()
                .collect();
            if !missing.is_empty() {
                passed = false;
                report.warning(format!(
                    "{} {} missing '{}'",
                    glyph.name(),
                    layer.name(),
                    missing.join(", ")
                ));
            }
        }
    }
    if passed {
        report.pass("Fonts have the same components as the glyph data");
    }
    passed
}
