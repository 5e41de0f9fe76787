//! Fixed-layout SEG-Y reel and trace headers.
//!
//! Every declared integer field is written big-endian at the offset listed in
//! [`REEL_HEADER_FIELDS`] / [`TRACE_HEADER_FIELDS`]. Bytes not covered by a
//! field (unassigned, reserved and alignment regions) are kept as raw bytes
//! and copied verbatim in both directions.

use std::io::{self, Read, Write};

use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};
use serde::Serialize;

/// EBCDIC/ASCII text block preceding the reel header.
pub const TEXT_HEADER_LEN: usize = 3200;
pub const REEL_HEADER_LEN: usize = 400;
pub const TRACE_HEADER_LEN: usize = 240;
/// Bytes per sample; only 4-byte IEEE floats are supported.
pub const SAMPLE_LEN: usize = 4;

/// Data sample format code for 4-byte IEEE floating point.
pub const FORMAT_IEEE_FLOAT: u16 = 5;

/// Coordinate units code for lengths (meters or feet).
pub const UNITS_LENGTH: u16 = 1;

/// One declared integer field of a header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldSpec {
    pub name: &'static str,
    pub offset: usize,
    pub width: usize,
}

const fn field(name: &'static str, offset: usize, width: usize) -> FieldSpec {
    FieldSpec { name, offset, width }
}

pub const REEL_HEADER_FIELDS: &[FieldSpec] = &[
    field("job_id", 0, 4),
    field("line_num", 4, 4),
    field("reel_num", 8, 4),
    field("num_of_traces_per_record", 12, 2),
    field("num_of_auxiliary_traces_per_record", 14, 2),
    field("sample_interval_reel", 16, 2),
    field("sample_interval", 18, 2),
    field("samples_per_trace_reel", 20, 2),
    field("samples_per_trace", 22, 2),
    field("data_sample_format", 24, 2),
];

pub const TRACE_HEADER_FIELDS: &[FieldSpec] = &[
    field("trace_seq_num_line", 0, 4),
    field("trace_seq_num_reel", 4, 4),
    field("field_record_num", 8, 4),
    field("trace_num_reel", 12, 4),
    field("trace_id_code", 28, 2),
    field("num_of_vertically_summed_traces", 30, 2),
    field("num_of_horizontally_summed_traces", 32, 2),
    field("data_use", 34, 2),
    field("distance_from_source", 36, 4),
    field("source_x", 72, 4),
    field("source_y", 76, 4),
    field("receiver_x", 80, 4),
    field("receiver_y", 84, 4),
    field("units_id", 88, 2),
    field("num_of_samples", 114, 2),
    field("sample_interval", 116, 2),
];

const REEL_TAIL_LEN: usize = REEL_HEADER_LEN - 26;

/// Binary reel header (file-level recording parameters).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReelHeader {
    pub job_id: u32,
    pub line_num: u32,
    pub reel_num: u32,
    pub num_of_traces_per_record: u16,
    pub num_of_auxiliary_traces_per_record: u16,
    pub sample_interval_reel: u16,
    /// Sample interval in microseconds.
    pub sample_interval: u16,
    pub samples_per_trace_reel: u16,
    pub samples_per_trace: u16,
    pub data_sample_format: u16,
    #[serde(skip)]
    pub bytes_26_400: [u8; REEL_TAIL_LEN],
}

impl Default for ReelHeader {
    fn default() -> Self {
        Self {
            job_id: 0,
            line_num: 0,
            reel_num: 0,
            num_of_traces_per_record: 0,
            num_of_auxiliary_traces_per_record: 0,
            sample_interval_reel: 0,
            sample_interval: 0,
            samples_per_trace_reel: 0,
            samples_per_trace: 0,
            data_sample_format: 0,
            bytes_26_400: [0; REEL_TAIL_LEN],
        }
    }
}

impl ReelHeader {
    pub fn read_from<R: Read>(reader: &mut R) -> io::Result<Self> {
        let mut header = Self {
            job_id: reader.read_u32::<BigEndian>()?,
            line_num: reader.read_u32::<BigEndian>()?,
            reel_num: reader.read_u32::<BigEndian>()?,
            num_of_traces_per_record: reader.read_u16::<BigEndian>()?,
            num_of_auxiliary_traces_per_record: reader.read_u16::<BigEndian>()?,
            sample_interval_reel: reader.read_u16::<BigEndian>()?,
            sample_interval: reader.read_u16::<BigEndian>()?,
            samples_per_trace_reel: reader.read_u16::<BigEndian>()?,
            samples_per_trace: reader.read_u16::<BigEndian>()?,
            data_sample_format: reader.read_u16::<BigEndian>()?,
            ..Self::default()
        };
        reader.read_exact(&mut header.bytes_26_400)?;
        Ok(header)
    }

    pub fn write_to<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writer.write_u32::<BigEndian>(self.job_id)?;
        writer.write_u32::<BigEndian>(self.line_num)?;
        writer.write_u32::<BigEndian>(self.reel_num)?;
        writer.write_u16::<BigEndian>(self.num_of_traces_per_record)?;
        writer.write_u16::<BigEndian>(self.num_of_auxiliary_traces_per_record)?;
        writer.write_u16::<BigEndian>(self.sample_interval_reel)?;
        writer.write_u16::<BigEndian>(self.sample_interval)?;
        writer.write_u16::<BigEndian>(self.samples_per_trace_reel)?;
        writer.write_u16::<BigEndian>(self.samples_per_trace)?;
        writer.write_u16::<BigEndian>(self.data_sample_format)?;
        writer.write_all(&self.bytes_26_400)
    }

    /// Value of a field listed in [`REEL_HEADER_FIELDS`].
    pub fn field_value(&self, name: &str) -> Option<i64> {
        let v = match name {
            "job_id" => self.job_id as i64,
            "line_num" => self.line_num as i64,
            "reel_num" => self.reel_num as i64,
            "num_of_traces_per_record" => self.num_of_traces_per_record as i64,
            "num_of_auxiliary_traces_per_record" => self.num_of_auxiliary_traces_per_record as i64,
            "sample_interval_reel" => self.sample_interval_reel as i64,
            "sample_interval" => self.sample_interval as i64,
            "samples_per_trace_reel" => self.samples_per_trace_reel as i64,
            "samples_per_trace" => self.samples_per_trace as i64,
            "data_sample_format" => self.data_sample_format as i64,
            _ => return None,
        };
        Some(v)
    }
}

/// Per-trace header (acquisition geometry of one receiver).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TraceHeader {
    pub trace_seq_num_line: u32,
    pub trace_seq_num_reel: u32,
    pub field_record_num: u32,
    pub trace_num_reel: u32,
    #[serde(skip)]
    pub bytes_16_28: [u8; 12],
    pub trace_id_code: u16,
    pub num_of_vertically_summed_traces: u16,
    pub num_of_horizontally_summed_traces: u16,
    pub data_use: u16,
    pub distance_from_source: u32,
    /// Includes the 2-byte coordinate scalar slot at 70..72.
    #[serde(skip)]
    pub bytes_40_72: [u8; 32],
    pub source_x: i32,
    pub source_y: i32,
    pub receiver_x: i32,
    pub receiver_y: i32,
    pub units_id: u16,
    #[serde(skip)]
    pub bytes_90_114: [u8; 24],
    pub num_of_samples: u16,
    /// Sample interval in microseconds.
    pub sample_interval: u16,
    #[serde(skip)]
    pub bytes_118_240: [u8; 122],
}

impl Default for TraceHeader {
    fn default() -> Self {
        Self {
            trace_seq_num_line: 0,
            trace_seq_num_reel: 0,
            field_record_num: 0,
            trace_num_reel: 0,
            bytes_16_28: [0; 12],
            trace_id_code: 0,
            num_of_vertically_summed_traces: 0,
            num_of_horizontally_summed_traces: 0,
            data_use: 0,
            distance_from_source: 0,
            bytes_40_72: [0; 32],
            source_x: 0,
            source_y: 0,
            receiver_x: 0,
            receiver_y: 0,
            units_id: 0,
            bytes_90_114: [0; 24],
            num_of_samples: 0,
            sample_interval: 0,
            bytes_118_240: [0; 122],
        }
    }
}

impl TraceHeader {
    pub fn read_from<R: Read>(reader: &mut R) -> io::Result<Self> {
        let mut h = Self::default();
        h.trace_seq_num_line = reader.read_u32::<BigEndian>()?;
        h.trace_seq_num_reel = reader.read_u32::<BigEndian>()?;
        h.field_record_num = reader.read_u32::<BigEndian>()?;
        h.trace_num_reel = reader.read_u32::<BigEndian>()?;
        reader.read_exact(&mut h.bytes_16_28)?;
        h.trace_id_code = reader.read_u16::<BigEndian>()?;
        h.num_of_vertically_summed_traces = reader.read_u16::<BigEndian>()?;
        h.num_of_horizontally_summed_traces = reader.read_u16::<BigEndian>()?;
        h.data_use = reader.read_u16::<BigEndian>()?;
        h.distance_from_source = reader.read_u32::<BigEndian>()?;
        reader.read_exact(&mut h.bytes_40_72)?;
        h.source_x = reader.read_i32::<BigEndian>()?;
        h.source_y = reader.read_i32::<BigEndian>()?;
        h.receiver_x = reader.read_i32::<BigEndian>()?;
        h.receiver_y = reader.read_i32::<BigEndian>()?;
        h.units_id = reader.read_u16::<BigEndian>()?;
        reader.read_exact(&mut h.bytes_90_114)?;
        h.num_of_samples = reader.read_u16::<BigEndian>()?;
        h.sample_interval = reader.read_u16::<BigEndian>()?;
        reader.read_exact(&mut h.bytes_118_240)?;
        Ok(h)
    }

    pub fn write_to<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writer.write_u32::<BigEndian>(self.trace_seq_num_line)?;
        writer.write_u32::<BigEndian>(self.trace_seq_num_reel)?;
        writer.write_u32::<BigEndian>(self.field_record_num)?;
        writer.write_u32::<BigEndian>(self.trace_num_reel)?;
        writer.write_all(&self.bytes_16_28)?;
        writer.write_u16::<BigEndian>(self.trace_id_code)?;
        writer.write_u16::<BigEndian>(self.num_of_vertically_summed_traces)?;
        writer.write_u16::<BigEndian>(self.num_of_horizontally_summed_traces)?;
        writer.write_u16::<BigEndian>(self.data_use)?;
        writer.write_u32::<BigEndian>(self.distance_from_source)?;
        writer.write_all(&self.bytes_40_72)?;
        writer.write_i32::<BigEndian>(self.source_x)?;
        writer.write_i32::<BigEndian>(self.source_y)?;
        writer.write_i32::<BigEndian>(self.receiver_x)?;
        writer.write_i32::<BigEndian>(self.receiver_y)?;
        writer.write_u16::<BigEndian>(self.units_id)?;
        writer.write_all(&self.bytes_90_114)?;
        writer.write_u16::<BigEndian>(self.num_of_samples)?;
        writer.write_u16::<BigEndian>(self.sample_interval)?;
        writer.write_all(&self.bytes_118_240)
    }

    /// Value of a field listed in [`TRACE_HEADER_FIELDS`].
    pub fn field_value(&self, name: &str) -> Option<i64> {
        let v = match name {
            "trace_seq_num_line" => self.trace_seq_num_line as i64,
            "trace_seq_num_reel" => self.trace_seq_num_reel as i64,
            "field_record_num" => self.field_record_num as i64,
            "trace_num_reel" => self.trace_num_reel as i64,
            "trace_id_code" => self.trace_id_code as i64,
            "num_of_vertically_summed_traces" => self.num_of_vertically_summed_traces as i64,
            "num_of_horizontally_summed_traces" => self.num_of_horizontally_summed_traces as i64,
            "data_use" => self.data_use as i64,
            "distance_from_source" => self.distance_from_source as i64,
            "source_x" => self.source_x as i64,
            "source_y" => self.source_y as i64,
            "receiver_x" => self.receiver_x as i64,
            "receiver_y" => self.receiver_y as i64,
            "units_id" => self.units_id as i64,
            "num_of_samples" => self.num_of_samples as i64,
            "sample_interval" => self.sample_interval as i64,
            _ => return None,
        };
        Some(v)
    }
}
