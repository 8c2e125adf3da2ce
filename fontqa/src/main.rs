use std::io::{self, Write};

use clap::Parser;
use log::info;

use fontqa::{glyphs, load_snapshot, project, Args, Error, Report, Severity};

fn main() -> Result<(), Error> {
    env_logger::builder()
        .format(|buf, record| {
            let ts = buf.timestamp_micros();
            writeln!(buf, "{}: {}: {}", ts, record.level(), record.args())
        })
        .init();

    let args = Args::parse();
    let profile = args.profile()?;
    let font = load_snapshot(&args.font)?;

    let mut report = Report::new();
    if !args.skip_project {
        let dir = args.project_dir()?;
        info!("Checking project {dir:?}");
        project::check_project(&dir, &font, &profile, &mut report);
    }
    if !args.skip_glyphs {
        glyphs::check_glyphs(&font, &profile, &mut report);
    }
    info!(
        "{} errors, {} possible errors, {} warnings",
        report.count(Severity::Error),
        report.count(Severity::PossibleError),
        report.count(Severity::Warning)
    );

    // findings never change the exit status
    let mut stdout = io::stdout().lock();
    write!(stdout, "{report}").map_err(Error::StdioWriteFail)?;
    stdout.flush().map_err(Error::StdioWriteFail)
}
