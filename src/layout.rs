//! Layout command - Print the byte layout of SEG-Y headers

use anyhow::Result;

use crate::segy::header::{
    FieldSpec, REEL_HEADER_FIELDS, REEL_HEADER_LEN, TEXT_HEADER_LEN, TRACE_HEADER_FIELDS,
    TRACE_HEADER_LEN,
};

/// Print every declared header field with its absolute byte range
pub fn print_layout() -> Result<()> {
    println!("SEG-Y header layout (big-endian, 1-based byte positions):");
    println!("---------------------------------------------------------------");
    println!("{:<40} {:>5}-{:<5}", "text header", 1, TEXT_HEADER_LEN);

    print_section("reel header", TEXT_HEADER_LEN, REEL_HEADER_LEN, REEL_HEADER_FIELDS);
    print_section("trace header", 0, TRACE_HEADER_LEN, TRACE_HEADER_FIELDS);
    println!("{:<40} {}", "samples", "4-byte IEEE float per sample");

    Ok(())
}

fn print_section(title: &str, base: usize, len: usize, fields: &[FieldSpec]) {
    println!();
    println!("{} ({} bytes)", title, len);
    for f in fields {
        let start = base + f.offset + 1;
        println!("{:<40} {:>5}-{:<5} {} bytes", f.name, start, start + f.width - 1, f.width);
    }
}
