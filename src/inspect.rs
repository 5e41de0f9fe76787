//! Inspect command - Print SEG-Y reel and trace headers

use anyhow::Result;
use serde::Serialize;
use std::path::Path;

use crate::segy::header::REEL_HEADER_FIELDS;
use crate::segy::{ReelHeader, TraceHeader, TraceStore};

#[derive(Debug, Serialize)]
struct Report<'a> {
    path: &'a str,
    duration_s: f64,
    reel_header: &'a ReelHeader,
    trace_headers: &'a [TraceHeader],
    amplitude_range: Vec<(f32, f32)>,
}

pub fn inspect_segy(path: &str, max_traces: usize, json: bool) -> Result<()> {
    let (store, times) = TraceStore::load_segy(Path::new(path))?;
    let shown = max_traces.min(store.receiver_count());
    let duration = times.last().copied().unwrap_or(0.0);
    let ranges: Vec<(f32, f32)> = store.traces[..shown]
        .iter()
        .map(|t| {
            t.iter()
                .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)))
        })
        .collect();

    if json {
        let report = Report {
            path,
            duration_s: duration,
            reel_header: &store.reel_header,
            trace_headers: &store.trace_headers[..shown],
            amplitude_range: ranges,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("SEG-Y: {}", path);
    println!(
        "Traces: {}, Samples: {}, Duration (s): {:.6}\n",
        store.receiver_count(),
        times.len(),
        duration
    );

    println!("{:<40} {:>12}", "Reel header field", "Value");
    println!("{}", "-".repeat(53));
    for spec in REEL_HEADER_FIELDS {
        let value = store.reel_header.field_value(spec.name).unwrap_or_default();
        println!("{:<40} {:>12}", spec.name, value);
    }

    if shown == 0 {
        return Ok(());
    }
    println!();
    let columns = ["trace_seq_num_line", "receiver_x", "receiver_y", "source_x", "source_y", "distance_from_source"];
    print!("{:>6}", "#");
    for c in columns {
        print!(" {:>21}", c);
    }
    println!(" {:>12} {:>12}", "min", "max");
    println!("{}", "-".repeat(6 + 22 * columns.len() + 26));
    for (i, header) in store.trace_headers[..shown].iter().enumerate() {
        print!("{:>6}", i);
        for c in columns {
            print!(" {:>21}", header.field_value(c).unwrap_or_default());
        }
        println!(" {:>12.6} {:>12.6}", ranges[i].0, ranges[i].1);
    }
    if shown < store.receiver_count() {
        println!("... {} more traces", store.receiver_count() - shown);
    }

    Ok(())
}
