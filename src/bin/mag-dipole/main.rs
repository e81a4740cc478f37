use std::fs::File;
use std::io::{BufWriter, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};
use mag_dipole::app::{self, RunSummary};
use mag_dipole::io::{write_field_csv, write_vtk_points};
use mag_dipole::ui_json::MagDipoleUi;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod cli;

/// Initialize logging; `RUST_LOG` overrides the default filter.
fn init_logging(quiet: bool) {
    let default = if quiet { "warn" } else { "warn,mag_dipole=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn export(cli: &cli::Cli, summary: &RunSummary) -> Result<()> {
    if let Some(path) = &cli.csv {
        let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
        let mut writer = BufWriter::new(file);
        write_field_csv(&mut writer, &summary.receivers, &summary.result)?;
        writer.flush()?;
        info!(path = %path.display(), "wrote CSV");
    }
    if let Some(path) = &cli.vtk {
        let named = summary.result.data_arrays();
        let arrays: Vec<(&str, &[f64])> = named.iter().map(|(n, v)| (*n, v.as_slice())).collect();
        let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
        let mut writer = BufWriter::new(file);
        write_vtk_points(&mut writer, &summary.title, &summary.receivers, &arrays)?;
        writer.flush()?;
        info!(path = %path.display(), "wrote VTK");
    }
    Ok(())
}

fn execute(cli: &cli::Cli) -> Result<()> {
    if cli.template {
        MagDipoleUi::template().write(&cli.file)?;
        info!(path = %cli.file.display(), "wrote parameter template");
        return Ok(());
    }
    let summary = app::run(&cli.file).with_context(|| format!("running {}", cli.file.display()))?;
    export(cli, &summary)
}

fn main() -> ExitCode {
    let cli = cli::parse();
    init_logging(cli.quiet);

    match execute(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}
