//! The input sample stream.
//!
//! The voltage input is driven by a text stream: a header line whose first
//! comma-separated field is the sampling period, followed by one
//! `time,voltage` pair per line in increasing time order. The stream is
//! consumed lazily, one sample per time step.

use std::io::BufRead;

use crate::error::{Result, StompError};

/// One time-stamped input voltage sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    /// Timestamp in seconds.
    pub time: f64,
    /// Input voltage in volts.
    pub voltage: f64,
}

impl Sample {
    fn parse(line: &str) -> Result<Self> {
        let mut fields = line.split(',');
        let time = fields.next().unwrap_or("");
        let voltage = fields
            .next()
            .ok_or_else(|| StompError::sample_input(format!("malformed sample line '{line}'")))?;
        Ok(Self {
            time: parse_field(time, line)?,
            voltage: parse_field(voltage, line)?,
        })
    }
}

fn parse_field(field: &str, line: &str) -> Result<f64> {
    field
        .trim()
        .parse()
        .map_err(|_| StompError::sample_input(format!("malformed sample line '{line}'")))
}

/// A lazy, finite stream of input samples read from any buffered source.
///
/// The header is consumed at construction; iteration yields the remaining
/// `time,voltage` pairs. Blank lines are tolerated and skipped.
#[derive(Debug)]
pub struct SampleStream<R> {
    lines: std::io::Lines<R>,
    sampling_period: f64,
}

impl<R: BufRead> SampleStream<R> {
    /// Open a stream, reading the `<sampling_period>,<t_start>,<t_end>`
    /// header. Only the first header field is consumed; the rest of the
    /// header line is ignored.
    pub fn from_reader(reader: R) -> Result<Self> {
        let mut lines = reader.lines();
        let header = lines
            .next()
            .ok_or_else(|| StompError::sample_input("missing header line"))?
            .map_err(|e| StompError::sample_input(e.to_string()))?;

        let field = header.split(',').next().unwrap_or("").trim();
        let sampling_period: f64 = field.parse().map_err(|_| {
            StompError::sample_input(format!("invalid sampling period '{field}'"))
        })?;
        if !sampling_period.is_finite() || sampling_period <= 0.0 {
            return Err(StompError::sample_input(format!(
                "sampling period must be positive, got {sampling_period}"
            )));
        }

        Ok(Self {
            lines,
            sampling_period,
        })
    }

    /// The sampling period declared by the header, used as the simulation
    /// time step.
    pub fn sampling_period(&self) -> f64 {
        self.sampling_period
    }
}

impl<R: BufRead> Iterator for SampleStream<R> {
    type Item = Result<Sample>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(e) => return Some(Err(StompError::sample_input(e.to_string()))),
            };
            if line.trim().is_empty() {
                continue;
            }
            return Some(Sample::parse(line.trim()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn stream(input: &str) -> Result<SampleStream<Cursor<String>>> {
        SampleStream::from_reader(Cursor::new(input.to_string()))
    }

    #[test]
    fn test_header_and_samples() {
        let mut samples = stream("0.1,0,1\n0.0,1.0\n0.1,0.5\n0.2,-0.25\n").unwrap();
        assert_eq!(samples.sampling_period(), 0.1);
        assert_eq!(
            samples.next().unwrap().unwrap(),
            Sample {
                time: 0.0,
                voltage: 1.0
            }
        );
        assert_eq!(
            samples.next().unwrap().unwrap(),
            Sample {
                time: 0.1,
                voltage: 0.5
            }
        );
        assert_eq!(
            samples.next().unwrap().unwrap(),
            Sample {
                time: 0.2,
                voltage: -0.25
            }
        );
        assert!(samples.next().is_none());
    }

    #[test]
    fn test_header_only_stream_is_empty() {
        let mut samples = stream("0.25,0,0\n").unwrap();
        assert!(samples.next().is_none());
    }

    #[test]
    fn test_trailing_blank_lines_are_skipped() {
        let mut samples = stream("0.1,0,1\n0.0,1.0\n\n\n").unwrap();
        assert!(samples.next().unwrap().is_ok());
        assert!(samples.next().is_none());
    }

    #[test]
    fn test_missing_header() {
        assert!(matches!(
            stream(""),
            Err(StompError::SampleInput { .. })
        ));
    }

    #[test]
    fn test_bad_header_period() {
        assert!(stream("fast,0,1\n").is_err());
        assert!(stream("0,0,1\n").is_err());
        assert!(stream("-0.1,0,1\n").is_err());
    }

    #[test]
    fn test_malformed_sample_line() {
        let mut samples = stream("0.1,0,1\n0.0\n").unwrap();
        assert!(samples.next().unwrap().is_err());

        let mut samples = stream("0.1,0,1\n0.0,volts\n").unwrap();
        assert!(samples.next().unwrap().is_err());
    }
}
