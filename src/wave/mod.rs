//! Waveform I/O adapters.
//!
//! The simulator core never touches process-global streams: the input
//! samples arrive through a [`SampleStream`] built from any buffered
//! reader, and results leave through a [`TraceSink`]. The CLI wires these
//! to stdin and a file or stdout.

mod input;
mod output;

pub use input::{Sample, SampleStream};
pub use output::{NullSink, TraceSink, TraceWriter};
