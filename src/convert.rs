use anyhow::{Context, Result, anyhow};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;

use crate::combined::{ComponentSet, SeismoFormat};
use crate::extract::{Component, Dims};

/// Conversion direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// CSV → SEG-Y
    ToSegy,
    /// SEG-Y → CSV
    ToCsv,
}

pub fn parse_direction(s: &str) -> Result<Direction> {
    match s {
        "tosegy" => Ok(Direction::ToSegy),
        "tocsv" => Ok(Direction::ToCsv),
        other => Err(anyhow!(
            "invalid conversion '{}' (expected \"tosegy\" or \"tocsv\")",
            other
        )),
    }
}

/// Options for converting between SEG-Y and CSV seismograms
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    pub direction: Direction,
    pub dims: Dims,
    /// SEG-Y base path; `_x.segy`, `_y.segy` (and `_z.segy`) are appended
    pub segy_base: String,
    /// CSV base path, without the `.csv` extension
    pub csv_base: String,
    /// Output sampling interval relative to the source interval
    pub interpolation_coef: f64,
    /// Zero SEG-Y headers and write `.info.txt` sidecars instead
    pub empty_headers: bool,
    /// Show progress spinner
    pub show_progress: bool,
    /// Dry run: show plan but don't write output
    pub dry_run: bool,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            direction: Direction::ToSegy,
            dims: Dims::Two,
            segy_base: "segy_file".to_string(),
            csv_base: "csv_file".to_string(),
            interpolation_coef: 1.0,
            empty_headers: false,
            show_progress: false,
            dry_run: false,
        }
    }
}

/// Per-axis SEG-Y paths derived from a base path.
pub fn segy_paths(base: &str, dims: Dims) -> Vec<PathBuf> {
    ["x", "y", "z"]
        .iter()
        .take(dims.count())
        .map(|axis| PathBuf::from(format!("{base}_{axis}.segy")))
        .collect()
}

/// Convert a seismogram between SEG-Y and CSV
///
/// # Example
///
/// ```rust,no_run
/// use segyconv::{convert, ConvertOptions, Direction};
///
/// let options = ConvertOptions {
///     direction: Direction::ToCsv,
///     segy_base: "seismo".to_string(),
///     csv_base: "seismo_out".to_string(),
///     ..ConvertOptions::default()
/// };
///
/// convert(&options)?;
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn convert(options: &ConvertOptions) -> Result<()> {
    if !(options.interpolation_coef.is_finite() && options.interpolation_coef > 0.0) {
        anyhow::bail!("interpolation coefficient must be > 0");
    }

    let segy_files = segy_paths(&options.segy_base, options.dims);
    let csv_files = vec![PathBuf::from(&options.csv_base)];

    let mut set = ComponentSet::new(options.dims, options.interpolation_coef)
        .with_empty_headers(options.empty_headers);
    for (path, component) in segy_files.iter().zip(Component::velocities(options.dims)) {
        set.add_component(path.clone(), *component)?;
    }

    let (from, from_paths, to, to_paths) = match options.direction {
        Direction::ToSegy => (SeismoFormat::Csv, &csv_files, SeismoFormat::SegY, &segy_files),
        Direction::ToCsv => (SeismoFormat::SegY, &segy_files, SeismoFormat::Csv, &csv_files),
    };

    if options.dry_run {
        println!(
            "Plan: {} {:?} {} → {:?} {} (interpolation coefficient {})",
            options.dims,
            from,
            join_paths(from_paths),
            to,
            join_paths(to_paths),
            options.interpolation_coef
        );
        return Ok(());
    }

    let pb = if options.show_progress {
        let pb = ProgressBar::new_spinner();
        pb.set_style(ProgressStyle::with_template("{spinner} {msg}")?);
        Some(pb)
    } else {
        None
    };

    if let Some(pb) = &pb {
        pb.set_message(format!("loading {}", join_paths(from_paths)));
    }
    set.load(from, from_paths)
        .with_context(|| format!("failed to load {}", join_paths(from_paths)))?;

    if let Some(pb) = &pb {
        pb.set_message(format!("writing {}", join_paths(to_paths)));
    }
    set.save(to, to_paths)
        .with_context(|| format!("failed to save {}", join_paths(to_paths)))?;

    if let Some(pb) = &pb {
        pb.finish_and_clear();
    }
    tracing::info!(
        receivers = set.receiver_count(),
        samples = set.times().len(),
        "converted {} → {}",
        join_paths(from_paths),
        join_paths(to_paths)
    );
    Ok(())
}

fn join_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
