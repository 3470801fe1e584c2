//! climate-risk - screening of climate events in daily ERA5 series.

use clap::Parser;

mod commands;

#[derive(Parser)]
#[command(
    name = "climate-risk",
    version,
    about = "Frequency and severity of climate events in daily ERA5 series"
)]
struct Cli {
    #[command(subcommand)]
    command: commands::Command,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    commands::run(cli.command)
}
