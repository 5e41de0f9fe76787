use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "segyconv", about = "Convert multi-component seismograms between SEG-Y and CSV", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Convert CSV to SEG-Y ("tosegy") or SEG-Y to CSV ("tocsv")
    Convert {
        /// "tosegy" or "tocsv"
        #[arg(short = 'c', long = "conversion", default_value = "tosegy")]
        conversion: String,
        /// Number of dimensions: 2 or 3
        #[arg(short = 'd', long = "dims", default_value_t = 2)]
        dims: u8,
        /// SEG-Y base path (without the _x.segy suffix)
        #[arg(short = 's', long = "segyfile", default_value = "segy_file")]
        segy_file: String,
        /// CSV base path (without the .csv extension)
        #[arg(short = 'f', long = "csvfile", default_value = "csv_file")]
        csv_file: String,
        /// Time interpolation coefficient applied to the source interval
        #[arg(short = 'i', long = "interpolation-coef", default_value_t = 1.0)]
        interpolation_coef: f64,
        /// Write zero-filled SEG-Y headers plus a .info.txt sidecar
        #[arg(long = "empty-headers")]
        empty_headers: bool,
        /// Show a progress spinner
        #[arg(long = "progress")]
        progress: bool,
        /// Dry-run: show plan but do not write any file
        #[arg(long = "dry-run")]
        dry_run: bool,
    },

    /// Print reel header fields and the first trace headers of a SEG-Y file
    Inspect {
        /// Path to the .segy file
        segy: String,
        /// Number of trace headers to show
        #[arg(long = "traces", default_value_t = 10)]
        traces: usize,
        /// Print a JSON report instead of tables
        #[arg(long = "json")]
        json: bool,
    },

    /// Check that a SEG-Y file is consistent with its headers
    Validate { segy: String },

    /// Show the byte layout of the SEG-Y headers
    Layout {},
}
