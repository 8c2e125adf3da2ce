//! Quality checks for font projects headed to Google Fonts.
//!
//! [`project`] checks the repository around a font source, [`glyphs`] and
//! [`compatibility`] check the glyphs themselves. Findings are collected in
//! a [`Report`]; no finding ever stops a run.

#[cfg(feature = "cli")]
mod args;
pub mod compatibility;
pub mod config;
mod error;
pub mod glyphs;
pub mod project;
pub mod report;
#[cfg(test)]
mod test_helpers;

#[cfg(feature = "cli")]
pub use args::Args;
pub use config::Profile;
pub use error::Error;
pub use report::{Report, Severity};

use std::{fs, path::Path};

use glyphs_host::{memory, Font};
use log::debug;

/// Load a font snapshot exported from the host as YAML
pub fn load_snapshot(file: &Path) -> Result<memory::Font, Error> {
    let yml = fs::read_to_string(file).map_err(|source| Error::FileIo {
        path: file.to_path_buf(),
        source,
    })?;
    let font: memory::Font = serde_yaml::from_str(&yml).map_err(|source| Error::ParseError {
        path: file.to_path_buf(),
        source,
    })?;
    font.check_instances()?;
    debug!(
        "Loaded {} with {} masters from {file:?}",
        font.family_name,
        font.masters.len()
    );
    Ok(font)
}

/// Run the project checks then the glyph checks, returning whether all passed
pub fn run(dir: &Path, font: &dyn Font, profile: &Profile, report: &mut Report) -> bool {
    let passed = project::check_project(dir, font, profile, report);
    glyphs::check_glyphs(font, profile, report) && passed
}

#[cfg(test)]
mod tests {
    use std::fs;

    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    use super::*;

    const SNAPSHOT: &str = r#"
familyName: Test Sans
unitsPerEm: 1000
copyright: Copyright 2024 The Test Sans Project Authors (https://github.com/test/sans)
customParameters:
  vendorID: TEST
  fsType: []
masters:
  - id: m01
    name: Regular
glyphs:
  - name: a
    category: Letter
    layers:
      - layerId: m01
        name: Regular
        paths: 2
"#;

    #[test]
    fn loads_snapshot() {
        let _ = env_logger::builder().is_test(true).try_init();
        let temp_dir = tempdir().unwrap();
        let file = temp_dir.path().join("font.yaml");
        fs::write(&file, SNAPSHOT).unwrap();

        let font = load_snapshot(&file).unwrap();
        assert_eq!("Test Sans", font.family_name());
        assert_eq!(1, font.masters().len());
        assert_eq!(
            Some(2),
            font.glyph("a")
                .and_then(|glyph| glyph.master_layer("m01"))
                .map(|layer| layer.path_count())
        );
    }

    #[test]
    fn missing_snapshot() {
        let temp_dir = tempdir().unwrap();
        let result = load_snapshot(&temp_dir.path().join("nope.yaml"));
        assert!(matches!(result, Err(Error::FileIo { .. })), "{result:?}");
    }

    #[test]
    fn unparseable_snapshot() {
        let temp_dir = tempdir().unwrap();
        let file = temp_dir.path().join("font.yaml");
        fs::write(&file, "glyphs: 12").unwrap();
        let result = load_snapshot(&file);
        assert!(matches!(result, Err(Error::ParseError { .. })), "{result:?}");
    }

    #[test]
    fn snapshot_with_duplicate_instances() {
        let temp_dir = tempdir().unwrap();
        let file = temp_dir.path().join("font.yaml");
        let instances = "instances:\n  - name: Bold\n    width: Condensed\n  - name: Bold\n    width: Condensed\n";
        fs::write(&file, format!("{SNAPSHOT}{instances}")).unwrap();
        let result = load_snapshot(&file);
        assert!(
            matches!(
                &result,
                Err(Error::Host(glyphs_host::Error::DuplicateInstance(name))) if name == "Condensed Bold"
            ),
            "{result:?}"
        );
    }

    #[test]
    fn run_reports_project_and_glyphs() {
        let temp_dir = tempdir().unwrap();
        let file = temp_dir.path().join("font.yaml");
        fs::write(&file, SNAPSHOT).unwrap();
        let font = load_snapshot(&file).unwrap();

        let mut report = Report::new();
        // an empty directory has none of the expected files
        assert!(!run(temp_dir.path(), &font, &Profile::default(), &mut report));
        assert!(report
            .messages(Severity::Error)
            .contains(&"README.md is missing"));
        assert!(report
            .messages(Severity::Pass)
            .contains(&"Instances and Masters share same contour count"));
    }
}
