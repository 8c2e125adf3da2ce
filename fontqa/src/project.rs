//! Checks that a project follows the expected repository layout and that the
//! font's metadata agrees with it.

use std::{
    env,
    ffi::OsString,
    fs::{self, File},
    io::{BufRead, BufReader},
    path::{Path, PathBuf},
    sync::OnceLock,
};

use glyphs_host::{CustomParameter, Font};
use log::{debug, warn};
use regex::Regex;

use crate::{
    config::{EmbeddingFlags, Profile},
    report::Report,
    Error,
};

/// The project root for a source document.
///
/// Sources live one level down (`<project>/sources/Family.glyphs`) so the
/// root is the parent of the source's directory. Without a source, the
/// current directory is the root.
pub fn project_dir(source: Option<&Path>) -> Result<PathBuf, Error> {
    let cwd = || {
        env::current_dir().map_err(|source| Error::FileIo {
            path: PathBuf::from("."),
            source,
        })
    };
    let Some(source) = source else {
        return cwd();
    };
    let source = if source.is_absolute() {
        source.to_path_buf()
    } else {
        cwd()?.join(source)
    };
    match source.parent().and_then(Path::parent) {
        Some(dir) => Ok(dir.to_path_buf()),
        None => Err(Error::NoProjectDir(source.clone())),
    }
}

/// Names of the direct children of `dir`, flagged true for directories
fn list_dir(dir: &Path) -> Vec<(OsString, bool)> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            warn!("Unable to list {dir:?}: {e}");
            return Vec::new();
        }
    };
    entries
        .filter_map(|entry| match entry {
            Ok(entry) => Some((entry.file_name(), entry.path().is_dir())),
            Err(e) => {
                warn!("Unable to read an entry of {dir:?}: {e}");
                None
            }
        })
        .collect()
}

fn has_child(dir: &Path, name: &str) -> bool {
    list_dir(dir).iter().any(|(child, _)| child == name)
}

/// Whether `name` is a direct child of `dir`
pub fn file_exists(name: &str, dir: &Path, report: &mut Report) -> bool {
    if has_child(dir, name) {
        report.pass(format!("{name} exists"));
        true
    } else {
        report.error(format!("{name} is missing"));
        false
    }
}

/// Whether every required folder is a direct subdirectory of `dir`
pub fn folders_exist(dir: &Path, required: &[String], report: &mut Report) -> bool {
    let folders: Vec<OsString> = list_dir(dir)
        .into_iter()
        .filter_map(|(name, is_dir)| is_dir.then_some(name))
        .collect();

    let mut all_present = true;
    for folder in required {
        if folders.iter().any(|name| name == folder.as_str()) {
            report.pass(format!("{folder} folder exists"));
        } else {
            report.error(format!("{folder} folder missing"));
            all_present = false;
        }
    }
    all_present
}

fn first_line(file: &Path) -> Result<String, Error> {
    let io_error = |source| Error::FileIo {
        path: file.to_path_buf(),
        source,
    };
    let mut reader = BufReader::new(File::open(file).map_err(io_error)?);
    let mut line = Vec::new();
    reader.read_until(b'\n', &mut line).map_err(io_error)?;
    let line = String::from_utf8(line).map_err(|_| Error::NotUtf8(file.to_path_buf()))?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

/// The first line of the licence must carry the font's copyright string
pub fn check_licence_matches_copyright(
    licence: &Path,
    copyright: &str,
    report: &mut Report,
) -> bool {
    let line = match first_line(licence) {
        Ok(line) => line,
        Err(e) => {
            report.error(format!("Unable to read the first line of the licence: {e}"));
            return false;
        }
    };
    if line.contains(copyright) {
        report.pass("copyright matches");
        true
    } else {
        debug!("copyright {copyright:?} not in {line:?}");
        report.error("First line of ofl does not match copyright");
        false
    }
}

pub fn check_copyright_contains(copyright: &str, marker: &str, report: &mut Report) -> bool {
    if copyright.contains(marker) {
        report.pass(format!("{marker} in \"{copyright}\""));
        true
    } else {
        report.error(format!("{marker} not in \"{copyright}\""));
        false
    }
}

fn is_set(value: Option<&CustomParameter>) -> bool {
    value.is_some_and(CustomParameter::is_truthy)
}

/// A trademark in the font and a trademark file in the project go together
pub fn check_trademark(
    font: &dyn Font,
    dir: &Path,
    trademark_file: &str,
    report: &mut Report,
) -> bool {
    report.heading("Check trademark");
    let declared = is_set(font.custom_parameter("trademark"));
    let present = has_child(dir, trademark_file);
    match (declared, present) {
        (true, true) => report.pass("Font has trademark and file is present"),
        (false, false) => report.pass(format!("Font has no trademark and no {trademark_file}")),
        (true, false) => {
            report.possible_error(format!("Font has trademark but no {trademark_file}"))
        }
        (false, true) => report.possible_error(format!(
            "{trademark_file} file exists but font does not have trademark"
        )),
    }
    declared == present
}

pub fn check_vendor_id(vendor_id: Option<&CustomParameter>, report: &mut Report) -> bool {
    report.heading("Check vendorID");
    if is_set(vendor_id) {
        report.pass("font has vendorId");
        true
    } else {
        report.possible_error("font is missing vendorId");
        false
    }
}

pub fn check_license_string(
    license: Option<&CustomParameter>,
    expected: &str,
    report: &mut Report,
) -> bool {
    report.heading("Check License string");
    if license.and_then(CustomParameter::as_str) == Some(expected) {
        report.pass("Family license string is correct");
        true
    } else {
        report.error("Family license string is incorrect");
        false
    }
}

pub fn check_license_url(
    url: Option<&CustomParameter>,
    expected: &str,
    report: &mut Report,
) -> bool {
    report.heading("Check License URL string");
    if url.and_then(CustomParameter::as_str) == Some(expected) {
        report.pass("Family license url is correct");
        true
    } else {
        report.error("Family license url string is incorrect");
        false
    }
}

fn illegal_family_chars() -> &'static Regex {
    static ILLEGAL: OnceLock<Regex> = OnceLock::new();
    ILLEGAL.get_or_init(|| Regex::new(r"[\-\\/0-9]+").expect("static regex is valid"))
}

/// Family names are plain ASCII without digits, dashes or slashes
pub fn check_family_name(family_name: &str, report: &mut Report) -> bool {
    report.heading("Check family name has only ASCII characters");
    if !family_name.is_ascii() {
        report.error(format!(
            "Font family name {family_name}, has non ascii characters"
        ));
        return false;
    }
    if illegal_family_chars().is_match(family_name) {
        report.error(format!(
            "Font family \"{family_name}\", contains numbers, slashes or dashes."
        ));
        return false;
    }
    report.pass("Family name is correct");
    true
}

pub fn check_units_per_em(units_per_em: u16, expected: u16, report: &mut Report) -> bool {
    report.heading("Check font upm");
    if units_per_em == expected {
        report.pass(format!("Family upm is equal to {expected}"));
        true
    } else {
        report.possible_error(format!("Family upm is not equal to {expected}"));
        false
    }
}

/// The `fsType` parameter must declare exactly the expected bits
pub fn check_embedding(
    fs_type: Option<&CustomParameter>,
    expected: &[u16],
    report: &mut Report,
) -> bool {
    report.heading("Check fsType");
    let wanted = EmbeddingFlags::from_bit_numbers(expected.iter().copied().map(i64::from));
    let actual = fs_type.and_then(EmbeddingFlags::from_parameter);
    if wanted.is_none() {
        warn!("Expected fsType {expected:?} names unknown bits");
    }
    match (actual, wanted) {
        (Some(actual), Some(wanted)) if actual == wanted => {
            report.pass(format!("Family fsType matches {expected:?}"));
            true
        }
        _ => {
            debug!("fsType {fs_type:?} decoded to {actual:?}");
            report.error(format!("Family fsType does not match {expected:?}"));
            false
        }
    }
}

/// Run every project check, returning whether they all passed.
///
/// A missing licence skips the copyright checks that need it; nothing else
/// is skipped.
pub fn check_project(
    dir: &Path,
    font: &dyn Font,
    profile: &Profile,
    report: &mut Report,
) -> bool {
    let files = &profile.files;
    report.heading("Check project files");
    let mut passed = [
        &files.readme,
        &files.licence,
        &files.contributors,
        &files.gitignore,
    ]
    .into_iter()
    .fold(true, |passed, name| file_exists(name, dir, report) && passed);
    let has_licence = has_child(dir, &files.licence);

    report.heading("Check project folders");
    passed &= folders_exist(dir, &profile.required_folders, report);

    report.heading("Check copyright");
    match (font.copyright(), has_licence) {
        (Some(copyright), true) => {
            let licence = dir.join(&files.licence);
            passed &= check_licence_matches_copyright(&licence, copyright, report);
            passed &= check_copyright_contains(copyright, &profile.copyright_marker, report);
        }
        (Some(copyright), false) => {
            report.error("cannot check first line of OFL matches copyright string");
            passed &= check_copyright_contains(copyright, &profile.copyright_marker, report);
        }
        (None, _) => {
            report.error("font has no copyright string");
            passed = false;
        }
    }

    passed &= check_trademark(font, dir, &files.trademark, report);
    passed &= check_vendor_id(font.custom_parameter("vendorID"), report);
    passed &= check_license_string(font.custom_parameter("license"), &profile.license, report);
    passed &= check_license_url(
        font.custom_parameter("licenseURL"),
        &profile.license_url,
        report,
    );
    passed &= check_family_name(font.family_name(), report);
    passed &= check_units_per_em(font.units_per_em(), profile.units_per_em, report);
    passed &= check_embedding(font.custom_parameter("fsType"), &profile.fs_type, report);
    passed
}
