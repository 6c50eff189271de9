//! # Stompsim
//!
//! A time-domain simulator for lumped-element circuits described by a
//! textual netlist.
//!
//! Given a netlist and a time-sampled input voltage waveform, the engine
//! produces the voltage across a designated output pair of nodes by
//! solving, at each time step, a linear system of Kirchhoff equations
//! assembled from per-component stamps, iterating with Newton's method
//! until convergence, then advancing time.
//!
//! ## Architecture
//!
//! - [`netlist`] - Netlist reader: comment stripping, tokenizing, values
//! - [`components`] - Device models (resistor, capacitor, sources, ground)
//! - [`circuit`] - Unknown registry, structural checks, transient driver
//! - [`solver`] - Linear system assembly and the dense LU kernel
//! - [`wave`] - Input sample stream and output trace sinks
//!
//! ## Usage
//!
//! ```bash
//! wavegen | stompsim -c circuit.net -o response.trace
//! ```
//!
//! Or programmatically:
//!
//! ```no_run
//! use std::io::Cursor;
//! use stompsim::{Circuit, SampleStream, NullSink, TransientConfig};
//!
//! # fn main() -> stompsim::Result<()> {
//! let mut circuit = Circuit::from_netlist(
//!     "GROUND gnd\n\
//!      VOLTAGE_IN vin n1 gnd\n\
//!      RESISTOR r1 n1 n2 1k\n\
//!      CAPACITOR c1 n2 gnd 1u\n\
//!      VOLTAGE_OUT vout n2 gnd\n",
//! )?;
//! let samples = SampleStream::from_reader(Cursor::new("0.00001,0,1\n0.0,1.0\n"))?;
//! let result = circuit.transient(samples, &mut NullSink, &TransientConfig::default())?;
//! println!("{:?}", result.vout);
//! # Ok(())
//! # }
//! ```
//!
//! ## Simulation method
//!
//! Every device contributes additive "stamps" to a square matrix equation
//! over the registered unknowns (node voltages plus one branch current per
//! voltage source). The right-hand side carries the residual of the
//! running iterate, so each solve yields corrective deltas; for the linear
//! device set a step settles in a single sweep, and the Newton loop is the
//! scaffolding that lets nonlinear devices slot in later. Capacitors are
//! discretized with a backward-Euler companion model (`C/dt` conductance
//! plus a history current), and the ground row of every system is a
//! Kronecker row clamping the reference voltage to zero.

pub mod circuit;
pub mod components;
pub mod error;
pub mod netlist;
pub mod solver;
pub mod wave;

// Re-export main types for convenience
pub use circuit::{Circuit, TransientConfig, TransientResult, UnknownRegistry};
pub use components::Component;
pub use error::{Result, StompError};
pub use solver::LinearSystem;
pub use wave::{NullSink, Sample, SampleStream, TraceSink, TraceWriter};
