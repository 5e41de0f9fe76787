//! Multi-component seismograms sharing one time axis.
//!
//! A [`ComponentSet`] binds one [`TraceStore`] per spatial axis. SEG-Y files
//! hold one axis each; a CSV location group holds `dims` consecutive axes.
//! Whenever the text format is involved the data is re-gridded onto a uniform
//! interval of `mean interval × interpolation_multiplier`.

use std::path::{Path, PathBuf};

use crate::extract::{Component, Dims, ElasticState};
use crate::resample::{Resampler, mean_interval};
use crate::segy::header::{FORMAT_IEEE_FLOAT, UNITS_LENGTH};
use crate::segy::store::interval_to_micros;
use crate::segy::{ReelHeader, TraceHeader, TraceStore};
use crate::text::{self, Point};
use crate::{Result, SeismoError};

/// Relative tolerance when comparing sampling across files.
const SAMPLING_TOLERANCE: f64 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeismoFormat {
    SegY,
    Csv,
}

/// A registered axis: where it is saved and how it is extracted from an
/// [`ElasticState`].
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentInfo {
    pub path: PathBuf,
    pub component: Component,
}

#[derive(Debug, Clone)]
pub struct ComponentSet {
    dims: Dims,
    times: Vec<f64>,
    stores: Vec<TraceStore>,
    interpolation_multiplier: f64,
    components: Vec<ComponentInfo>,
    save_empty_headers: bool,
}

impl ComponentSet {
    pub fn new(dims: Dims, interpolation_multiplier: f64) -> Self {
        Self {
            dims,
            times: Vec::new(),
            stores: Vec::new(),
            interpolation_multiplier,
            components: Vec::new(),
            save_empty_headers: false,
        }
    }

    /// Zero the SEG-Y header blocks on save and write `.info.txt` sidecars.
    pub fn with_empty_headers(mut self, save_empty_headers: bool) -> Self {
        self.save_empty_headers = save_empty_headers;
        self
    }

    pub fn dims(&self) -> Dims {
        self.dims
    }

    pub fn times(&self) -> &[f64] {
        &self.times
    }

    pub fn stores(&self) -> &[TraceStore] {
        &self.stores
    }

    pub fn components(&self) -> &[ComponentInfo] {
        &self.components
    }

    pub fn receiver_count(&self) -> usize {
        self.stores.first().map_or(0, TraceStore::receiver_count)
    }

    /// Register an axis together with an empty store for it.
    pub fn add_component(&mut self, path: impl Into<PathBuf>, component: Component) -> Result<()> {
        if !component.is_available(self.dims) {
            return Err(SeismoError::ComponentUnavailable {
                component: component.to_string(),
                dims: self.dims.count(),
            });
        }
        self.components.push(ComponentInfo {
            path: path.into(),
            component,
        });
        self.stores.push(TraceStore::new());
        Ok(())
    }

    pub fn load<P: AsRef<Path>>(&mut self, format: SeismoFormat, paths: &[P]) -> Result<()> {
        match format {
            SeismoFormat::SegY => self.load_segy(paths),
            SeismoFormat::Csv => self.load_csv(paths),
        }
    }

    pub fn save<P: AsRef<Path>>(&mut self, format: SeismoFormat, paths: &[P]) -> Result<()> {
        match format {
            SeismoFormat::SegY => self.save_segy(paths),
            SeismoFormat::Csv => self.save_csv(paths),
        }
    }

    /// Save to the paths given at [`add_component`](Self::add_component).
    pub fn save_components(&mut self, format: SeismoFormat) -> Result<()> {
        let paths: Vec<PathBuf> = self.components.iter().map(|c| c.path.clone()).collect();
        self.save(format, &paths)
    }

    /// Append one receiver's state at `time`. The shared axis grows once per
    /// distinct time step.
    pub fn add_value(&mut self, time: f64, state: &ElasticState, receiver: usize) -> Result<()> {
        if state.dims() != self.dims {
            return Err(SeismoError::DimsMismatch {
                expected: self.dims.count(),
                actual: state.dims().count(),
            });
        }
        if self.times.last() != Some(&time) {
            self.times.push(time);
        }
        for (info, store) in self.components.iter().zip(self.stores.iter_mut()) {
            store.add_value(info.component.extract(state), receiver);
        }
        Ok(())
    }

    /// Synthesize reel and trace headers for every store from the current
    /// data, shared time axis and acquisition geometry.
    pub fn set_geometry(&mut self, receivers: &[Point], source: Point) -> Result<()> {
        let times = &self.times;
        for store in &mut self.stores {
            synthesize_headers(store, times, receivers, source)?;
        }
        Ok(())
    }

    fn load_segy<P: AsRef<Path>>(&mut self, paths: &[P]) -> Result<()> {
        if paths.len() > self.components.len() {
            return Err(SeismoError::TooManySegyFiles {
                requested: paths.len(),
                available: self.components.len(),
            });
        }
        let mut stores = Vec::with_capacity(paths.len());
        let mut shared: Option<(Vec<f64>, usize)> = None;
        for path in paths {
            let (store, times) = TraceStore::load_segy(path.as_ref())?;
            match &shared {
                None => shared = Some((times, store.receiver_count())),
                Some((first, receivers)) => {
                    check_same_axis(first, &times, path.as_ref())?;
                    check_same_receivers(*receivers, store.receiver_count(), path.as_ref())?;
                }
            }
            stores.push(store);
        }
        if let Some((times, _)) = shared {
            self.times = times;
        }
        self.stores = stores;
        Ok(())
    }

    fn load_csv<P: AsRef<Path>>(&mut self, paths: &[P]) -> Result<()> {
        let dims = self.dims.count();
        let mut stores = Vec::with_capacity(paths.len() * dims);
        let mut shared: Option<(Vec<f64>, usize)> = None;

        for base in paths {
            let base = base.as_ref();
            let table_path = text::with_suffix(base, text::TABLE_EXT);
            let table = text::read_table(&table_path)?;
            if table.columns.len() % dims != 0 {
                return Err(SeismoError::MalformedCsv {
                    path: table_path,
                    line: 1,
                    message: format!(
                        "{} data columns is not a multiple of {dims}",
                        table.columns.len()
                    ),
                });
            }
            let n_receivers = table.columns.len() / dims;
            tracing::info!(
                path = %table_path.display(),
                receivers = n_receivers,
                rows = table.times.len(),
                "loaded CSV"
            );

            let mut group = vec![TraceStore::new(); dims];
            for (column_index, column) in table.columns.into_iter().enumerate() {
                group[column_index % dims].traces.push(column);
            }

            let interval = mean_interval(&table.times)? * self.interpolation_multiplier;
            let times = resample_stores(&table.times, &mut group, interval)?;

            let receivers = text::read_points(
                &text::with_suffix(base, text::RECEIVERS_IN_EXT),
                n_receivers,
                "receivers",
            );
            let source = text::read_points(&text::with_suffix(base, text::SOURCE_IN_EXT), 1, "source")
                .first()
                .copied()
                .unwrap_or_default();
            for store in &mut group {
                synthesize_headers(store, &times, &receivers, source)?;
            }

            match &shared {
                None => shared = Some((times, n_receivers)),
                Some((first, count)) => {
                    check_same_axis(first, &times, &table_path)?;
                    check_same_receivers(*count, n_receivers, &table_path)?;
                }
            }
            stores.extend(group);
        }

        if let Some((times, _)) = shared {
            self.times = times;
        }
        self.stores = stores;
        Ok(())
    }

    fn save_segy<P: AsRef<Path>>(&mut self, paths: &[P]) -> Result<()> {
        if paths.len() > self.stores.len() {
            return Err(SeismoError::TooManySegyFiles {
                requested: paths.len(),
                available: self.stores.len(),
            });
        }
        for (store, path) in self.stores.iter_mut().zip(paths) {
            store.save_segy(path.as_ref(), &self.times, self.save_empty_headers)?;
        }
        Ok(())
    }

    fn save_csv<P: AsRef<Path>>(&mut self, paths: &[P]) -> Result<()> {
        let dims = self.dims.count();
        let available = self.stores.len() / dims;
        if paths.len() > available {
            return Err(SeismoError::TooManyCsvFiles {
                requested: paths.len(),
                available,
            });
        }

        self.resample()?;

        let labels: Vec<Component> = if self.components.len() >= dims {
            self.components[..dims].iter().map(|c| c.component).collect()
        } else {
            Component::velocities(self.dims).to_vec()
        };
        for (group, base) in self.stores.chunks(dims).zip(paths) {
            let base = base.as_ref();
            text::write_table(&text::with_suffix(base, text::TABLE_EXT), &labels, &self.times, group)?;

            let headers = &group[0].trace_headers;
            let receivers: Vec<(i32, i32)> = headers.iter().map(|h| (h.receiver_x, h.receiver_y)).collect();
            text::write_points(&text::with_suffix(base, text::RECEIVERS_OUT_EXT), &receivers)?;

            let source = headers.first().map_or((0, 0), |h| (h.source_x, h.source_y));
            text::write_points(&text::with_suffix(base, text::SOURCE_OUT_EXT), &[source])?;
        }
        Ok(())
    }

    /// Re-grid every store onto `mean interval × interpolation_multiplier`.
    pub fn resample(&mut self) -> Result<()> {
        let interval = mean_interval(&self.times)? * self.interpolation_multiplier;
        self.times = resample_stores(&self.times, &mut self.stores, interval)?;
        Ok(())
    }
}

/// Resample all traces of `stores` (sampled on `times`) and record the new
/// interval in their reel headers. Returns the new time axis.
fn resample_stores(times: &[f64], stores: &mut [TraceStore], interval: f64) -> Result<Vec<f64>> {
    let resampler = Resampler::new(times, interval)?;
    // 0 when out of range; save_segy rejects such an interval
    let micros = interval_to_micros(interval).unwrap_or(0);
    for store in stores.iter_mut() {
        for (i, trace) in store.traces.iter_mut().enumerate() {
            *trace = resampler.apply(trace).map_err(|e| match e {
                SeismoError::TraceLength { expected, actual, .. } => SeismoError::TraceLength {
                    trace: i,
                    expected,
                    actual,
                },
                other => other,
            })?;
        }
        store.reel_header.sample_interval = micros;
    }
    Ok(resampler.times())
}

fn synthesize_headers(store: &mut TraceStore, times: &[f64], receivers: &[Point], source: Point) -> Result<()> {
    let n_receivers = store.receiver_count();
    // out-of-range values become 0 here and are rejected by save_segy
    let n_samples = u16::try_from(times.len()).unwrap_or(0);
    let interval = if times.len() >= 2 {
        interval_to_micros(mean_interval(times)?).unwrap_or(0)
    } else {
        0
    };

    store.reel_header = ReelHeader {
        job_id: 1,
        line_num: 1,
        reel_num: 1,
        num_of_traces_per_record: u16::try_from(n_receivers).unwrap_or(0),
        num_of_auxiliary_traces_per_record: 0,
        sample_interval_reel: interval,
        sample_interval: interval,
        samples_per_trace_reel: n_samples,
        samples_per_trace: n_samples,
        data_sample_format: FORMAT_IEEE_FLOAT,
        ..ReelHeader::default()
    };

    store.trace_headers = (0..n_receivers)
        .map(|i| {
            let receiver = receivers.get(i).copied().unwrap_or_default();
            TraceHeader {
                trace_seq_num_line: i as u32,
                trace_seq_num_reel: i as u32,
                field_record_num: 1,
                trace_num_reel: 1,
                trace_id_code: i as u16,
                distance_from_source: receiver.distance(&source).round() as u32,
                source_x: source.x.round() as i32,
                source_y: source.y.round() as i32,
                receiver_x: receiver.x.round() as i32,
                receiver_y: receiver.y.round() as i32,
                units_id: UNITS_LENGTH,
                num_of_samples: n_samples,
                sample_interval: interval,
                ..TraceHeader::default()
            }
        })
        .collect();
    Ok(())
}

fn check_same_axis(first: &[f64], other: &[f64], path: &Path) -> Result<()> {
    let same = first.len() == other.len()
        && first.iter().zip(other).all(|(a, b)| {
            (a - b).abs() <= SAMPLING_TOLERANCE * a.abs().max(b.abs()).max(1e-3)
        });
    if same {
        Ok(())
    } else {
        Err(SeismoError::Inconsistent(format!(
            "{} is sampled differently from the first file",
            path.display()
        )))
    }
}

fn check_same_receivers(first: usize, other: usize, path: &Path) -> Result<()> {
    if first == other {
        Ok(())
    } else {
        Err(SeismoError::Inconsistent(format!(
            "{} has {other} receivers, the first file has {first}",
            path.display()
        )))
    }
}
