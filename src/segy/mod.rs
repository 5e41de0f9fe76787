//! SEG-Y binary codec: fixed-layout headers and the single-axis trace store.

pub mod header;
pub mod store;

pub use header::{ReelHeader, TraceHeader};
pub use store::{Trace, TraceStore};
