//! Semicolon-delimited seismogram tables and their coordinate sidecars.
//!
//! A table has a header row (`Time;<label>;...`) followed by one row per
//! time step: the time, then `dims` values per receiver (Vx, Vy[, Vz]).
//! Trailing separators and CRLF line endings are tolerated on input and a
//! trailing separator is written on output.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::extract::Component;
use crate::segy::TraceStore;
use crate::{Result, SeismoError};

pub const TABLE_EXT: &str = ".csv";
pub const RECEIVERS_IN_EXT: &str = ".receivers.csv";
pub const SOURCE_IN_EXT: &str = ".source.csv";
pub const RECEIVERS_OUT_EXT: &str = ".rec.txt";
pub const SOURCE_OUT_EXT: &str = ".expl.txt";

/// `<base><ext>` without touching any extension already in `base`.
pub fn with_suffix(base: &Path, ext: &str) -> PathBuf {
    let mut s = base.as_os_str().to_os_string();
    s.push(ext);
    PathBuf::from(s)
}

/// A planar position read from a sidecar file.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn distance(&self, other: &Point) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

/// Parsed table: the time column and every data column in file order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    pub times: Vec<f64>,
    pub columns: Vec<Vec<f32>>,
}

/// Split a row on `;`, dropping one empty trailing token.
pub fn split_row(line: &str) -> Vec<&str> {
    let line = line.trim_end_matches('\r');
    let mut tokens: Vec<&str> = line.split(';').collect();
    if tokens.len() > 1 && tokens.last().is_some_and(|t| t.trim().is_empty()) {
        tokens.pop();
    }
    tokens
}

pub fn read_table(path: &Path) -> Result<Table> {
    let content = std::fs::read_to_string(path).map_err(|source| SeismoError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    parse_table(path, &content)
}

/// Parse table text. Rows are read until the first blank line or EOF.
pub fn parse_table(path: &Path, content: &str) -> Result<Table> {
    let malformed = |line: usize, message: String| SeismoError::MalformedCsv {
        path: path.to_path_buf(),
        line,
        message,
    };

    let mut lines = content.lines();
    let header = lines.next().ok_or_else(|| malformed(1, "empty file".into()))?;
    let n_columns = split_row(header).len().saturating_sub(1);
    if n_columns == 0 {
        return Err(malformed(1, "header has no data columns".into()));
    }

    let mut table = Table {
        times: Vec::new(),
        columns: vec![Vec::new(); n_columns],
    };
    for (i, line) in lines.enumerate() {
        let line_no = i + 2;
        if line.trim().is_empty() {
            break;
        }
        let tokens = split_row(line);
        if tokens.len() < n_columns + 1 {
            return Err(malformed(
                line_no,
                format!("expected {} values, found {}", n_columns + 1, tokens.len()),
            ));
        }
        let time = tokens[0]
            .trim()
            .parse::<f64>()
            .map_err(|e| malformed(line_no, format!("bad time '{}': {e}", tokens[0])))?;
        table.times.push(time);
        for (column, token) in table.columns.iter_mut().zip(&tokens[1..]) {
            let value = token
                .trim()
                .parse::<f32>()
                .map_err(|e| malformed(line_no, format!("bad value '{token}': {e}")))?;
            column.push(value);
        }
    }
    Ok(table)
}

fn parse_point(line: &str) -> Option<Point> {
    let mut it = line
        .split(|c: char| c == ';' || c == ',' || c.is_whitespace())
        .filter(|t| !t.is_empty());
    let x = it.next()?.parse().ok()?;
    let y = it.next()?.parse().ok()?;
    Some(Point { x, y })
}

/// Read `count` points, one per line. A missing file or a bad line yields
/// `(0, 0)` with a warning.
pub fn read_points(path: &Path, count: usize, what: &str) -> Vec<Point> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            tracing::warn!(
                path = %path.display(),
                "no {what} data found ({e}); all {what} positions set to (0.0, 0.0)"
            );
            return vec![Point::default(); count];
        }
    };
    let mut lines = content.lines();
    (0..count)
        .map(|i| match lines.next().and_then(parse_point) {
            Some(p) => p,
            None => {
                tracing::warn!(path = %path.display(), line = i + 1, "bad {what} entry; using (0.0, 0.0)");
                Point::default()
            }
        })
        .collect()
}

fn create(path: &Path) -> Result<BufWriter<File>> {
    File::create(path)
        .map(BufWriter::new)
        .map_err(|source| SeismoError::Create {
            path: path.to_path_buf(),
            source,
        })
}

fn io_err(path: &Path) -> impl FnOnce(std::io::Error) -> SeismoError + '_ {
    move |source| SeismoError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Write one location group: `group[k]` holds the `labels[k]` axis of every
/// receiver.
pub fn write_table(path: &Path, labels: &[Component], times: &[f64], group: &[TraceStore]) -> Result<()> {
    let mut out = create(path)?;
    let receivers = group.first().map_or(0, TraceStore::receiver_count);

    let mut write = || -> std::io::Result<()> {
        write!(out, "Time;")?;
        for r in 0..receivers {
            for label in labels {
                write!(out, "{label} (edge = {});", r + 1)?;
            }
        }
        writeln!(out)?;
        for (i, &t) in times.iter().enumerate() {
            write!(out, "{t};")?;
            for r in 0..receivers {
                for store in group {
                    write!(out, "{};", store.traces[r][i])?;
                }
            }
            writeln!(out)?;
        }
        out.flush()
    };
    write().map_err(io_err(path))?;
    tracing::info!(path = %path.display(), receivers, rows = times.len(), "saved CSV");
    Ok(())
}

/// Write `x y` integer pairs, one per line.
pub fn write_points(path: &Path, points: &[(i32, i32)]) -> Result<()> {
    let mut out = create(path)?;
    let mut write = || -> std::io::Result<()> {
        for (x, y) in points {
            writeln!(out, "{x} {y}")?;
        }
        out.flush()
    };
    write().map_err(io_err(path))
}
