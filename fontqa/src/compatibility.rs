//! Path count compatibility between masters and the instances they produce.
//!
//! A glyph whose masters disagree on the number of paths will not interpolate
//! cleanly. Even when the masters agree, an instance can end up with a
//! different count once overlaps are removed: the two dots of a dieresis
//! that touch in the bold but not in the light, say.

use glyphs_host::{Font, GlyphName};
use indexmap::{IndexMap, IndexSet};
use log::debug;
use smol_str::SmolStr;

use crate::report::Report;

/// master id => glyph => overlap free path count
pub type ContourCounts = IndexMap<SmolStr, IndexMap<GlyphName, usize>>;

/// What the masters of a font agree on
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Compatibility {
    /// Glyphs with the same path count in every master, and that count
    pub agreed: IndexMap<GlyphName, usize>,
    /// Glyphs whose masters disagree
    pub inconsistent: IndexSet<GlyphName>,
}

/// The overlap free path count of every glyph in every master
pub fn font_glyphs_contours(font: &dyn Font) -> ContourCounts {
    let mut counts = ContourCounts::new();
    for master in font.masters() {
        let master_counts = counts.entry(master.id.clone()).or_default();
        for glyph in font.glyphs() {
            let Some(layer) = glyph.master_layer(&master.id) else {
                debug!("{} has no layer for master {}", glyph.name(), master.id);
                continue;
            };
            master_counts.insert(glyph.name().clone(), layer.overlap_free_path_count());
        }
    }
    counts
}

/// Compare every pair of masters.
///
/// A glyph only present in some masters is judged on the masters that have
/// it.
pub fn font_glyphs_compatible(counts: &ContourCounts, report: &mut Report) -> Compatibility {
    let masters: Vec<_> = counts.values().collect();
    let mut result = Compatibility::default();
    // pairing each master with itself admits glyphs from single master fonts
    for (i, first) in masters.iter().enumerate() {
        for second in &masters[i..] {
            for (name, count) in first.iter() {
                let Some(other) = second.get(name) else {
                    continue;
                };
                if count == other {
                    result.agreed.entry(name.clone()).or_insert(*count);
                } else {
                    result.inconsistent.insert(name.clone());
                }
            }
        }
    }
    result
        .agreed
        .retain(|name, _| !result.inconsistent.contains(name));

    for name in &result.inconsistent {
        report.warning(format!("{name} not consistent, check masters"));
    }
    result
}

/// Check every instance has the path counts its masters agree on
pub fn instance_compatibility(font: &dyn Font, strict: bool, report: &mut Report) -> bool {
    report.heading("Check glyph instances have same amount of paths");
    let counts = font_glyphs_contours(font);
    let compatibility = font_glyphs_compatible(&counts, report);

    let mut mismatches = 0;
    let mut unchecked = 0;
    for instance in font.instances() {
        let interpolated = match font.interpolate(instance) {
            Ok(interpolated) => interpolated,
            Err(e) => {
                unchecked += 1;
                report.warning(format!("Unable to check {instance} Instance: {e}"));
                continue;
            }
        };
        for (name, expected) in &compatibility.agreed {
            let layer = interpolated
                .glyph(name.as_str())
                .and_then(|glyph| glyph.layers().next());
            let Some(layer) = layer else {
                if strict {
                    report.warning(format!("{name} missing from {instance} Instance"));
                } else {
                    debug!("{name} missing from {instance}");
                }
                continue;
            };
            let found = layer.overlap_free_path_count();
            if found != *expected {
                mismatches += 1;
                report.warning(format!(
                    "{name}, {instance} Instance has {found}, whilst masters have {expected}"
                ));
            }
        }
    }

    let passed = mismatches == 0 && unchecked == 0;
    if passed {
        report.pass("Instances and Masters share same contour count");
    }
    passed && compatibility.inconsistent.is_empty()
}

#[cfg(test)]
mod tests {
    use glyphs_host::{
        memory::{Font, Glyph, Layer},
        Category, Instance, Master,
    };
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{
        report::Severity,
        test_helpers::{interpolated, letter, regular, two_masters},
    };

    fn agreed(pairs: &[(&str, usize)]) -> IndexMap<GlyphName, usize> {
        pairs
            .iter()
            .map(|(name, count)| (GlyphName::new(name), *count))
            .collect()
    }

    #[test]
    fn counts_use_overlap_free_paths() {
        let dieresis = Glyph::new("dieresis")
            .with_layer(Layer::new(&regular()).with_paths(3).with_overlap_free_paths(2))
            .with_layer(Layer::new(&Master::new("m02", "Bold")).with_paths(2));
        let font = two_masters().with_glyph(dieresis);
        let counts = font_glyphs_contours(&font);
        assert_eq!(
            vec![("m01", 2), ("m02", 2)],
            counts
                .iter()
                .map(|(master, glyphs)| (master.as_str(), glyphs["dieresis"]))
                .collect::<Vec<_>>()
        );
    }

    #[test]
    fn disagreeing_masters_excluded() {
        let font = two_masters()
            .with_glyph(letter("a", 2, 3))
            .with_glyph(letter("b", 2, 2));
        let mut report = Report::new();
        let compatibility = font_glyphs_compatible(&font_glyphs_contours(&font), &mut report);
        assert_eq!(agreed(&[("b", 2)]), compatibility.agreed);
        assert_eq!(
            vec![GlyphName::new("a")],
            compatibility.inconsistent.into_iter().collect::<Vec<_>>()
        );
        assert_eq!(
            vec!["a not consistent, check masters"],
            report.messages(Severity::Warning)
        );
    }

    #[test]
    fn every_pair_of_masters_is_compared() {
        // the first and last master disagree, neighbours agree with each other
        let masters = [
            Master::new("light", "Light"),
            Master::new("regular", "Regular"),
            Master::new("bold", "Bold"),
        ];
        let glyph = |name: &str, paths: [usize; 3]| {
            masters
                .iter()
                .zip(paths)
                .fold(Glyph::new(name).with_category(Category::Letter), |glyph, (master, paths)| {
                    glyph.with_layer(Layer::new(master).with_paths(paths))
                })
        };
        let font = masters
            .iter()
            .cloned()
            .fold(Font::new("Test Sans"), Font::with_master)
            .with_glyph(glyph("a", [1, 1, 2]))
            .with_glyph(glyph("b", [1, 1, 1]));

        let mut report = Report::new();
        let compatibility = font_glyphs_compatible(&font_glyphs_contours(&font), &mut report);
        assert_eq!(agreed(&[("b", 1)]), compatibility.agreed);
        assert!(compatibility.inconsistent.contains("a"));
    }

    #[test]
    fn single_master_is_compatible_with_itself() {
        let font = Font::new("Test Sans")
            .with_master(regular())
            .with_glyph(Glyph::new("a").with_layer(Layer::new(&regular()).with_paths(2)));
        let mut report = Report::new();
        let compatibility = font_glyphs_compatible(&font_glyphs_contours(&font), &mut report);
        assert_eq!(agreed(&[("a", 2)]), compatibility.agreed);
    }

    #[test]
    fn instance_mismatch_warns_and_continues() {
        let _ = env_logger::builder().is_test(true).try_init();
        let font = two_masters()
            .with_glyph(letter("adieresis", 3, 3))
            .with_glyph(letter("b", 2, 2))
            .with_instance(
                Instance::new("Medium"),
                vec![interpolated("adieresis", 2), interpolated("b", 1)],
            )
            .with_instance(
                Instance::new("Black").with_width("Condensed"),
                vec![interpolated("adieresis", 3), interpolated("b", 3)],
            );
        let mut report = Report::new();
        assert!(!instance_compatibility(&font, false, &mut report));
        assert_eq!(
            vec![
                "adieresis, Medium Instance has 2, whilst masters have 3",
                "b, Medium Instance has 1, whilst masters have 2",
                "b, Condensed Black Instance has 3, whilst masters have 2",
            ],
            report.messages(Severity::Warning)
        );
        assert_eq!(0, report.count(Severity::Pass));
    }

    #[test]
    fn matching_instances_pass() {
        let font = two_masters()
            .with_glyph(letter("a", 2, 2))
            .with_instance(Instance::new("Medium"), vec![interpolated("a", 2)]);
        let mut report = Report::new();
        assert!(instance_compatibility(&font, false, &mut report));
        assert_eq!(
            vec!["Instances and Masters share same contour count"],
            report.messages(Severity::Pass)
        );
    }

    #[test]
    fn inconsistent_masters_are_not_checked_in_instances() {
        let font = two_masters()
            .with_glyph(letter("a", 2, 3))
            .with_instance(Instance::new("Medium"), vec![interpolated("a", 5)]);
        let mut report = Report::new();
        assert!(!instance_compatibility(&font, false, &mut report));
        assert_eq!(
            vec!["a not consistent, check masters"],
            report.messages(Severity::Warning)
        );
    }

    #[test]
    fn missing_glyph_in_instance() {
        let font = two_masters()
            .with_glyph(letter("a", 2, 2))
            .with_glyph(letter("b", 1, 1))
            .with_instance(Instance::new("Medium"), vec![interpolated("b", 2)]);

        let mut report = Report::new();
        assert!(!instance_compatibility(&font, false, &mut report));
        assert_eq!(
            vec!["b, Medium Instance has 2, whilst masters have 1"],
            report.messages(Severity::Warning)
        );

        let mut report = Report::new();
        instance_compatibility(&font, true, &mut report);
        assert_eq!(
            vec![
                "a missing from Medium Instance",
                "b, Medium Instance has 2, whilst masters have 1"
            ],
            report.messages(Severity::Warning)
        );
    }

    #[test]
    fn instance_that_cannot_interpolate() {
        let mut font = two_masters()
            .with_glyph(letter("a", 2, 2))
            .with_instance(Instance::new("Medium"), vec![interpolated("a", 1)]);
        font.instances.insert(0, Instance::new("Thin"));

        let mut report = Report::new();
        assert!(!instance_compatibility(&font, false, &mut report));
        assert_eq!(
            vec![
                "Unable to check Thin Instance: Instance 'Thin' has no interpolated glyphs",
                "a, Medium Instance has 1, whilst masters have 2",
            ],
            report.messages(Severity::Warning)
        );
        assert_eq!(0, report.count(Severity::Pass));
    }

    #[test]
    fn only_instance_cannot_interpolate() {
        let mut font = two_masters().with_glyph(letter("a", 2, 2));
        font.instances.push(Instance::new("Thin"));

        let mut report = Report::new();
        assert!(!instance_compatibility(&font, false, &mut report));
        assert_eq!(1, report.count(Severity::Warning));
        assert_eq!(0, report.count(Severity::Pass));
    }

    #[test]
    fn same_name_instances_checked_separately() {
        let font = two_masters()
            .with_glyph(letter("a", 3, 3))
            .with_instance(Instance::new("Bold"), vec![interpolated("a", 2)])
            .with_instance(
                Instance::new("Bold").with_width("Condensed"),
                vec![interpolated("a", 3)],
            );
        let mut report = Report::new();
        assert!(!instance_compatibility(&font, false, &mut report));
        assert_eq!(
            vec!["a, Bold Instance has 2, whilst masters have 3"],
            report.messages(Severity::Warning)
        );
    }
}
