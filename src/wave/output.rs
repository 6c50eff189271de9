//! Output trace sinks.
//!
//! The driver hands each committed step to a [`TraceSink`] as it is
//! produced, so callers can stream results instead of waiting for the
//! whole run.

use std::io::Write;

use crate::error::{Result, StompError};

/// Per-step consumer of `(time, vin, vout)` triples.
pub trait TraceSink {
    /// Record one committed time step.
    fn record(&mut self, time: f64, vin: f64, vout: f64) -> Result<()>;
}

/// Writes triples as whitespace-separated `time vin vout` rows, one per
/// line, in time order.
#[derive(Debug)]
pub struct TraceWriter<W: Write> {
    inner: W,
}

impl<W: Write> TraceWriter<W> {
    /// Create a writer-backed sink.
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    /// Flush the underlying writer.
    pub fn flush(&mut self) -> Result<()> {
        self.inner
            .flush()
            .map_err(|e| StompError::trace_output(e.to_string()))
    }

    /// Unwrap the underlying writer.
    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> TraceSink for TraceWriter<W> {
    fn record(&mut self, time: f64, vin: f64, vout: f64) -> Result<()> {
        writeln!(self.inner, "{time} {vin} {vout}")
            .map_err(|e| StompError::trace_output(e.to_string()))
    }
}

/// Discards every triple; for callers that only want the returned result
/// vectors.
#[derive(Debug, Default)]
pub struct NullSink;

impl TraceSink for NullSink {
    fn record(&mut self, _time: f64, _vin: f64, _vout: f64) -> Result<()> {
        Ok(())
    }
}
