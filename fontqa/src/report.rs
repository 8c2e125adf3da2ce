//! Collects check results as console lines
//!
//! Every check writes into a [`Report`] and keeps going; nothing a check
//! finds ever stops the run.

use std::fmt::{self, Display};

use log::debug;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Severity {
    Pass,
    /// A heuristic that may well be a false positive
    Warning,
    PossibleError,
    /// A hard requirement is not met
    Error,
}

impl Severity {
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Pass => "PASS",
            Severity::Warning => "WARNING",
            Severity::PossibleError => "POSSIBLE ERROR",
            Severity::Error => "ERROR",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum Entry {
    Heading(String),
    Finding { severity: Severity, message: String },
}

#[derive(Clone, Debug, Default)]
pub struct Report {
    entries: Vec<Entry>,
}

impl Report {
    pub fn new() -> Self {
        Default::default()
    }

    /// Announce the check about to run
    pub fn heading(&mut self, title: impl Into<String>) {
        self.entries.push(Entry::Heading(title.into()));
    }

    pub fn pass(&mut self, message: impl Into<String>) {
        self.push(Severity::Pass, message.into());
    }

    pub fn warning(&mut self, message: impl Into<String>) {
        self.push(Severity::Warning, message.into());
    }

    pub fn possible_error(&mut self, message: impl Into<String>) {
        self.push(Severity::PossibleError, message.into());
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push(Severity::Error, message.into());
    }

    fn push(&mut self, severity: Severity, message: String) {
        debug!("{}: {message}", severity.label());
        self.entries.push(Entry::Finding { severity, message });
    }

    /// Messages reported at the given severity, in order
    pub fn messages(&self, severity: Severity) -> Vec<&str> {
        self.entries
            .iter()
            .filter_map(|entry| match entry {
                Entry::Finding {
                    severity: found,
                    message,
                } if *found == severity => Some(message.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.messages(severity).len()
    }

    /// Whether anything other than a pass was reported
    pub fn has_problems(&self) -> bool {
        self.entries.iter().any(|entry| {
            matches!(entry, Entry::Finding { severity, .. } if *severity != Severity::Pass)
        })
    }
}

impl Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Entry::Heading(title) => write!(f, "**{title}**"),
            Entry::Finding { severity, message } => write!(f, "{}: {message}", severity.label()),
        }
    }
}

impl Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, entry) in self.entries.iter().enumerate() {
            // a blank line before each section
            if i > 0 && matches!(entry, Entry::Heading(..)) {
                writeln!(f)?;
            }
            writeln!(f, "{entry}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn renders_prefixed_lines() {
        let mut report = Report::new();
        report.heading("Check vendorID");
        report.possible_error("font is missing vendorId");
        report.heading("Check font upm");
        report.pass("Family upm is equal to 1000");
        report.warning("a not consistent, check masters");
        report.error("b duplicated");

        assert_eq!(
            "**Check vendorID**\n\
             POSSIBLE ERROR: font is missing vendorId\n\
             \n\
             **Check font upm**\n\
             PASS: Family upm is equal to 1000\n\
             WARNING: a not consistent, check masters\n\
             ERROR: b duplicated\n",
            report.to_string()
        );
    }

    #[test]
    fn counts_by_severity() {
        let mut report = Report::new();
        assert!(!report.has_problems());
        report.pass("fine");
        report.pass("also fine");
        assert!(!report.has_problems());
        report.error("broken");
        assert_eq!(2, report.count(Severity::Pass));
        assert_eq!(vec!["broken"], report.messages(Severity::Error));
        assert_eq!(0, report.count(Severity::Warning));
        assert!(report.has_problems());
    }
}
