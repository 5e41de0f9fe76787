//! Validate command - Check SEG-Y file structure and consistency

use anyhow::{Context, Result};
use std::fs::{self, File};
use std::io::{BufReader, Seek, SeekFrom};
use std::path::Path;

use crate::segy::header::{
    FORMAT_IEEE_FLOAT, REEL_HEADER_LEN, SAMPLE_LEN, TEXT_HEADER_LEN, TRACE_HEADER_LEN,
};
use crate::segy::{ReelHeader, TraceHeader};

/// Validate a SEG-Y file
///
/// Performs lightweight checks on the file structure:
/// - File is large enough to hold the text and reel headers
/// - Sample format is 4-byte IEEE float
/// - File size matches the trace and sample counts of the reel header
/// - Every trace header agrees with the reel header on samples and interval
pub fn validate_segy(segy_path: &str) -> Result<()> {
    let problems = find_problems(Path::new(segy_path))?;

    if problems.is_empty() {
        println!("Validation of {}: PASSED", segy_path);
        Ok(())
    } else {
        println!("Validation of {}: FAILED", segy_path);
        for problem in &problems {
            println!("[ERROR] {}", problem);
        }
        Err(anyhow::anyhow!("Validation failed"))
    }
}

/// Return a description of every problem found; empty means valid.
pub fn find_problems(path: &Path) -> Result<Vec<String>> {
    let metadata = fs::metadata(path).with_context(|| format!("cannot stat {}", path.display()))?;
    if !metadata.is_file() {
        return Ok(vec!["Path is not a file".to_string()]);
    }
    let size = metadata.len();
    let header_end = (TEXT_HEADER_LEN + REEL_HEADER_LEN) as u64;
    if size < header_end {
        return Ok(vec![format!("File too small to be SEG-Y ({} bytes)", size)]);
    }

    let mut reader = BufReader::new(File::open(path)?);
    reader.seek(SeekFrom::Start(TEXT_HEADER_LEN as u64))?;
    let reel = ReelHeader::read_from(&mut reader)?;

    let mut problems = Vec::new();
    if reel == ReelHeader::default() {
        problems.push("Reel header is empty (saved with empty headers? see the .info.txt sidecar)".to_string());
        return Ok(problems);
    }
    if reel.data_sample_format != FORMAT_IEEE_FLOAT {
        problems.push(format!(
            "Unsupported data sample format {} (expected {})",
            reel.data_sample_format, FORMAT_IEEE_FLOAT
        ));
    }
    if reel.sample_interval == 0 {
        problems.push("Sample interval is 0".to_string());
    }

    let n_traces = reel.num_of_traces_per_record as u64;
    let n_samples = reel.samples_per_trace as u64;
    let trace_len = TRACE_HEADER_LEN as u64 + n_samples * SAMPLE_LEN as u64;
    let expected = header_end + n_traces * trace_len;
    if size != expected {
        problems.push(format!(
            "File size {} does not match {} traces x {} samples ({} bytes expected)",
            size, n_traces, n_samples, expected
        ));
        return Ok(problems);
    }

    for i in 0..n_traces {
        let header = TraceHeader::read_from(&mut reader)?;
        if header.num_of_samples != 0 && header.num_of_samples != reel.samples_per_trace {
            problems.push(format!(
                "Trace {} declares {} samples, reel header says {}",
                i, header.num_of_samples, reel.samples_per_trace
            ));
        }
        if header.sample_interval != 0 && header.sample_interval != reel.sample_interval {
            problems.push(format!(
                "Trace {} declares interval {} us, reel header says {} us",
                i, header.sample_interval, reel.sample_interval
            ));
        }
        reader.seek_relative((n_samples * SAMPLE_LEN as u64) as i64)?;
    }

    Ok(problems)
}
