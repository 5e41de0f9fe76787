//! In-memory SEG-Y seismogram: one reel header, one trace header per trace
//! and the traces themselves.

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};

use super::header::{
    REEL_HEADER_LEN, ReelHeader, TEXT_HEADER_LEN, TRACE_HEADER_LEN, TraceHeader,
};
use crate::resample::mean_interval;
use crate::{Result, SeismoError};

pub type Trace = Vec<f32>;

/// A single-axis seismogram.
///
/// `traces[i]` and `trace_headers[i]` describe the same receiver.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TraceStore {
    pub reel_header: ReelHeader,
    pub trace_headers: Vec<TraceHeader>,
    pub traces: Vec<Trace>,
}

impl TraceStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn receiver_count(&self) -> usize {
        self.traces.len()
    }

    /// Number of samples per trace, taken from the first trace.
    pub fn samples_per_trace(&self) -> usize {
        self.traces.first().map_or(0, Vec::len)
    }

    /// Append one sample to the trace of `receiver`, creating empty traces up
    /// to it when needed.
    pub fn add_value(&mut self, value: f32, receiver: usize) {
        if receiver >= self.traces.len() {
            self.traces.resize_with(receiver + 1, Vec::new);
        }
        self.traces[receiver].push(value);
    }

    /// Load a SEG-Y file, returning the store and its time axis in seconds.
    pub fn load_segy(path: &Path) -> Result<(Self, Vec<f64>)> {
        let file = File::open(path).map_err(|source| SeismoError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        let loaded = Self::read_segy(&mut BufReader::new(file)).map_err(|source| SeismoError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::info!(
            path = %path.display(),
            traces = loaded.0.receiver_count(),
            samples = loaded.1.len(),
            "loaded SEG-Y"
        );
        Ok(loaded)
    }

    pub fn read_segy<R: Read>(reader: &mut R) -> io::Result<(Self, Vec<f64>)> {
        let mut text_header = [0u8; TEXT_HEADER_LEN];
        reader.read_exact(&mut text_header)?;

        let reel_header = ReelHeader::read_from(reader)?;
        let n_traces = reel_header.num_of_traces_per_record as usize;
        let n_samples = reel_header.samples_per_trace as usize;

        let mut trace_headers = Vec::with_capacity(n_traces);
        let mut traces = Vec::with_capacity(n_traces);
        for _ in 0..n_traces {
            trace_headers.push(TraceHeader::read_from(reader)?);
            let mut trace = Vec::with_capacity(n_samples);
            for _ in 0..n_samples {
                // raw bit pattern, no float reinterpretation
                trace.push(f32::from_bits(reader.read_u32::<BigEndian>()?));
            }
            traces.push(trace);
        }

        let dt = f64::from(reel_header.sample_interval) / 1_000_000.0;
        let times = (0..n_samples).map(|i| dt * i as f64).collect();

        Ok((
            Self {
                reel_header,
                trace_headers,
                traces,
            },
            times,
        ))
    }

    /// Save as SEG-Y. With `save_empty_headers` the reel and trace header
    /// blocks are zero-filled and the key parameters go to `<path>.info.txt`.
    ///
    /// Every trace needs a header, and the reel header's sample interval is
    /// refreshed from `times`.
    pub fn save_segy(&mut self, path: &Path, times: &[f64], save_empty_headers: bool) -> Result<()> {
        if self.trace_headers.len() != self.traces.len() {
            return Err(SeismoError::Inconsistent(format!(
                "{} trace headers for {} traces",
                self.trace_headers.len(),
                self.traces.len()
            )));
        }
        self.sync_counts()?;
        if self.samples_per_trace() != times.len() {
            return Err(SeismoError::Inconsistent(format!(
                "{} samples per trace but {} time steps",
                self.samples_per_trace(),
                times.len()
            )));
        }
        if times.len() >= 2 {
            self.reel_header.sample_interval = interval_to_micros(mean_interval(times)?)?;
        }

        let file = File::create(path).map_err(|source| SeismoError::Create {
            path: path.to_path_buf(),
            source,
        })?;
        let mut writer = BufWriter::new(file);
        self.write_segy(&mut writer, save_empty_headers)
            .and_then(|()| writer.flush())
            .map_err(|source| SeismoError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        tracing::info!(
            path = %path.display(),
            traces = self.receiver_count(),
            samples = times.len(),
            empty_headers = save_empty_headers,
            "saved SEG-Y"
        );

        if save_empty_headers {
            self.save_info(path)?;
        }
        Ok(())
    }

    pub fn write_segy<W: Write>(&self, writer: &mut W, save_empty_headers: bool) -> io::Result<()> {
        writer.write_all(&[0u8; TEXT_HEADER_LEN])?;

        if save_empty_headers {
            writer.write_all(&[0u8; REEL_HEADER_LEN])?;
        } else {
            self.reel_header.write_to(writer)?;
        }

        for (header, trace) in self.trace_headers.iter().zip(&self.traces) {
            if save_empty_headers {
                writer.write_all(&[0u8; TRACE_HEADER_LEN])?;
            } else {
                header.write_to(writer)?;
            }
            for &sample in trace {
                writer.write_u32::<BigEndian>(sample.to_bits())?;
            }
        }
        Ok(())
    }

    fn save_info(&self, path: &Path) -> Result<()> {
        let mut info_path = PathBuf::from(path).into_os_string();
        info_path.push(".info.txt");
        let info_path = PathBuf::from(info_path);

        let h = &self.reel_header;
        let text = format!(
            "Number of traces = {}\nNumber of samples = {}\nTime step (us) = {}\n",
            h.num_of_traces_per_record, h.samples_per_trace, h.sample_interval
        );
        std::fs::write(&info_path, text).map_err(|source| SeismoError::Create {
            path: info_path,
            source,
        })
    }

    /// Refresh the reel header's trace and sample counts from the data.
    pub fn sync_counts(&mut self) -> Result<()> {
        let expected = self.samples_per_trace();
        for (trace, t) in self.traces.iter().enumerate() {
            if t.len() != expected {
                return Err(SeismoError::TraceLength {
                    trace,
                    expected,
                    actual: t.len(),
                });
            }
        }
        self.reel_header.num_of_traces_per_record = to_u16("num_of_traces_per_record", self.traces.len())?;
        self.reel_header.samples_per_trace = to_u16("samples_per_trace", expected)?;
        Ok(())
    }
}

pub(crate) fn to_u16(field: &'static str, value: usize) -> Result<u16> {
    u16::try_from(value).map_err(|_| SeismoError::FieldOverflow {
        field,
        value: value as f64,
    })
}

/// Convert seconds to the header's whole-microsecond representation.
pub(crate) fn interval_to_micros(interval: f64) -> Result<u16> {
    let micros = (interval * 1_000_000.0).round();
    if !micros.is_finite() || micros < 1.0 || micros > f64::from(u16::MAX) {
        return Err(SeismoError::FieldOverflow {
            field: "sample_interval",
            value: interval,
        });
    }
    Ok(micros as u16)
}
