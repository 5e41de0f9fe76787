//! segyconv - Convert multi-component seismograms between SEG-Y and CSV
//!
//! This library converts velocity seismograms recorded by offline seismic
//! simulations between the SEG-Y reel format (one file per spatial axis) and
//! a semicolon-delimited CSV table (one file per receiver group, all axes
//! interleaved), re-gridding the time axis onto a uniform interval whenever
//! the text format is involved.
//!
//! # Features
//!
//! - **SEG-Y codec**: 3200-byte text block, 400-byte reel header, 240-byte
//!   trace headers and 4-byte IEEE float samples, all big-endian
//! - **CSV codec**: tolerant of CRLF endings and trailing separators, with
//!   receiver/source coordinate sidecars
//! - **Resampling**: forward-scanning linear interpolation onto
//!   `mean interval × interpolation coefficient`
//! - **Synthetic seismograms**: append elastic state vectors per receiver and
//!   extract Vx, Vy, Vz or pressure
//!
//! # Example
//!
//! ```rust,no_run
//! use segyconv::{ComponentSet, Component, Dims, SeismoFormat};
//!
//! let mut set = ComponentSet::new(Dims::Two, 1.0);
//! set.add_component("seismo_x.segy", Component::Vx)?;
//! set.add_component("seismo_y.segy", Component::Vy)?;
//!
//! set.load(SeismoFormat::Csv, &["input"])?;
//! set.save_components(SeismoFormat::SegY)?;
//! # Ok::<(), segyconv::SeismoError>(())
//! ```

pub mod cli;
pub mod combined;
pub mod convert;
pub mod error;
pub mod extract;
pub mod inspect;
pub mod layout;
pub mod resample;
pub mod segy;
pub mod text;
pub mod validate;

// Re-export main types for convenience
pub use combined::{ComponentInfo, ComponentSet, SeismoFormat};
pub use convert::{ConvertOptions, Direction, convert};
pub use error::{Result, SeismoError};
pub use extract::{Component, Dims, ElasticState};
pub use segy::{ReelHeader, TraceHeader, TraceStore};
