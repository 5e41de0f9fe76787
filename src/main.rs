use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt};

use segyconv::cli::{Cli, Commands};
use segyconv::convert::{self, parse_direction};
use segyconv::extract::Dims;
use segyconv::{inspect, layout, validate};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    match cli.command {
        Commands::Convert {
            conversion,
            dims,
            segy_file,
            csv_file,
            interpolation_coef,
            empty_headers,
            progress,
            dry_run,
        } => {
            let options = convert::ConvertOptions {
                direction: parse_direction(&conversion)?,
                dims: Dims::try_from(dims)?,
                segy_base: segy_file,
                csv_base: csv_file,
                interpolation_coef,
                empty_headers,
                show_progress: progress,
                dry_run,
            };
            convert::convert(&options)
        }
        Commands::Inspect { segy, traces, json } => inspect::inspect_segy(&segy, traces, json),
        Commands::Validate { segy } => validate::validate_segy(&segy),
        Commands::Layout {} => layout::print_layout(),
    }
}
