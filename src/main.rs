//! `projfields [PROJECT_JSON] [OUTPUT]`
//!
//! Prints every task field, then every task's values (raw, rendered, and
//! restricted to populated fields). When an output path is given on the
//! command line or in the settings, the same report is also written there
//! in the configured encoding.

use std::path::PathBuf;
use std::process::ExitCode;

use tracing::info;
use tracing_subscriber::EnvFilter;

use projfields::present::ValuePresenter;
use projfields::reader::load_project;
use projfields::report::project_report;
use projfields::settings::Settings;
use projfields::writer::write_project;
use projfields::{ProjfieldsError, Result};

fn main() -> ExitCode {
    // settings come first since they carry the default log filter
    let settings = match Settings::load(None) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("projfields: {e}");
            return ExitCode::FAILURE;
        }
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&settings.log_filter)))
        .with_writer(std::io::stderr)
        .init();
    match run(settings) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("projfields: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(settings: Settings) -> Result<()> {
    let mut args = std::env::args_os().skip(1);
    let project_file = args
        .next()
        .map(PathBuf::from)
        .or(settings.project_file)
        .ok_or_else(|| ProjfieldsError::Config("no project file given".to_string()))?;
    let output_file = args.next().map(PathBuf::from).or(settings.output_file);
    let presenter = ValuePresenter::new(settings.locale)?;

    let project = load_project(&project_file)?;
    for line in project_report(&project, &presenter)? {
        println!("{}", line);
    }
    if let Some(output) = output_file {
        write_project(&project, &output, &settings.encoding, &presenter)?;
        info!(path = %output.display(), encoding = %settings.encoding, "report written");
    }
    Ok(())
}
