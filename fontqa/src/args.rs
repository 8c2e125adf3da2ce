//! Command line arguments

use std::path::PathBuf;

use clap::Parser;

use crate::{config::Profile, project, Error};

/// Is your font ready for Google Fonts?
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct Args {
    /// A font snapshot exported from the editor, as YAML
    #[arg(short, long)]
    pub font: PathBuf,

    /// The source the snapshot was exported from, locates the project root
    #[arg(short, long)]
    pub source: Option<PathBuf>,

    /// The project root. Wins over --source.
    #[arg(short, long)]
    pub project_dir: Option<PathBuf>,

    /// A YAML profile overriding the Google Fonts expectations
    #[arg(long)]
    pub profile: Option<PathBuf>,

    /// Report lookups that would otherwise be skipped quietly
    #[arg(long)]
    #[clap(default_value = "false")]
    pub strict: bool,

    /// Don't check the files and folders around the font
    #[arg(long)]
    #[clap(default_value = "false")]
    pub skip_project: bool,

    /// Don't check the glyphs
    #[arg(long)]
    #[clap(default_value = "false")]
    pub skip_glyphs: bool,
}

impl Args {
    /// The profile to check against, with command line overrides applied
    pub fn profile(&self) -> Result<Profile, Error> {
        let mut profile = match &self.profile {
            Some(file) => Profile::load(file)?,
            None => Profile::default(),
        };
        profile.strict |= self.strict;
        Ok(profile)
    }

    pub fn project_dir(&self) -> Result<PathBuf, Error> {
        match &self.project_dir {
            Some(dir) => Ok(dir.clone()),
            None => project::project_dir(self.source.as_deref()),
        }
    }
}
