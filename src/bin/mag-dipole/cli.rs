use std::path::PathBuf;

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "mag-dipole",
    about = "Magnetic dipole forward modelling driven by a ui.json parameter file",
    version
)]
pub struct Cli {
    /// Parameter file (ui.json)
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Write a default parameter file to FILE instead of running
    #[arg(long)]
    pub template: bool,

    /// Also export receiver results as CSV
    #[arg(long, value_name = "PATH")]
    pub csv: Option<PathBuf>,

    /// Also export receiver results as legacy VTK
    #[arg(long, value_name = "PATH")]
    pub vtk: Option<PathBuf>,

    /// Only report warnings and errors
    #[arg(short, long)]
    pub quiet: bool,
}

pub fn parse() -> Cli {
    Cli::parse()
}
