//! Error types for the Stompsim circuit simulator.
//!
//! This module provides a unified error type [`StompError`] that covers
//! all error conditions that can occur during netlist parsing, circuit
//! construction, and transient simulation.

use thiserror::Error;

/// Result type alias using [`StompError`].
pub type Result<T> = std::result::Result<T, StompError>;

/// Unified error type for all Stompsim operations.
#[derive(Error, Debug)]
pub enum StompError {
    // ============ Netlist Parsing Errors ============
    /// Error reading the netlist file
    #[error("Failed to read netlist '{path}': {source}")]
    NetlistRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// A netlist line is missing tokens or otherwise malformed
    #[error("Malformed netlist line {line}: {message}")]
    ParseError { line: usize, message: String },

    /// Token 0 of a netlist line is not a recognized device kind
    #[error("Unknown device type '{device_type}' at line {line}")]
    UnknownDevice { device_type: String, line: usize },

    /// A parameter value could not be parsed as a number
    #[error("Invalid value '{value}' at line {line}")]
    InvalidValue { value: String, line: usize },

    // ============ Structural Errors ============
    /// Missing ground node
    #[error("Circuit has no GROUND node")]
    MissingGround,

    /// Missing voltage input
    #[error("Circuit has no VOLTAGE_IN source")]
    MissingVoltageIn,

    /// Missing voltage output
    #[error("Circuit has no VOLTAGE_OUT probe")]
    MissingVoltageOut,

    /// More than one ground, input, or output was declared
    #[error("Circuit must contain exactly one {kind}")]
    DuplicateDevice { kind: String },

    /// A node is referenced but no registering device touches it
    #[error("Node '{node}' is not connected to any device")]
    NodeNotFound { node: String },

    // ============ Simulation Errors ============
    /// The assembled system could not be factored
    #[error("Singular system at t = {time}s - circuit may have a short circuit or floating node")]
    SingularSystem { time: f64 },

    // ============ Waveform I/O Errors ============
    /// Input sample stream is malformed or unreadable
    #[error("Sample input error: {message}")]
    SampleInput { message: String },

    /// Output trace could not be written
    #[error("Trace output error: {message}")]
    TraceOutput { message: String },
}

impl StompError {
    /// Create a malformed-line error
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::ParseError {
            line,
            message: message.into(),
        }
    }

    /// Create an unknown-device error
    pub fn unknown_device(device_type: impl Into<String>, line: usize) -> Self {
        Self::UnknownDevice {
            device_type: device_type.into(),
            line,
        }
    }

    /// Create an invalid-value error
    pub fn invalid_value(value: impl Into<String>, line: usize) -> Self {
        Self::InvalidValue {
            value: value.into(),
            line,
        }
    }

    /// Create a duplicate-device error
    pub fn duplicate(kind: impl Into<String>) -> Self {
        Self::DuplicateDevice { kind: kind.into() }
    }

    /// Create a sample-input error
    pub fn sample_input(message: impl Into<String>) -> Self {
        Self::SampleInput {
            message: message.into(),
        }
    }

    /// Create a trace-output error
    pub fn trace_output(message: impl Into<String>) -> Self {
        Self::TraceOutput {
            message: message.into(),
        }
    }
}
