//! Stompsim - transient netlist circuit simulator
//!
//! Reads a netlist, consumes `time,voltage` samples from stdin, and writes
//! one `time vin vout` row per step.
//!
//! # Usage
//!
//! ```bash
//! wavegen | stompsim -c circuit.net -o response.trace
//! ```

use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;

use clap::Parser;
use stompsim::{
    netlist,
    solver::{DEFAULT_MAX_ITERATIONS, DEFAULT_TOLERANCE},
    Circuit, Result, SampleStream, StompError, TraceWriter, TransientConfig,
};

/// Transient netlist simulator for lumped-element audio circuits
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the circuit netlist file
    #[arg(short = 'c', long = "circuit", value_name = "NETLIST")]
    circuit: PathBuf,

    /// Output file for `time vin vout` rows (stdout when omitted)
    #[arg(short = 'o', long = "output", value_name = "TRACE")]
    output: Option<PathBuf>,

    /// Maximum Newton iterations per time step
    #[arg(long, default_value_t = DEFAULT_MAX_ITERATIONS)]
    max_iterations: usize,

    /// Convergence tolerance on the largest solution update (volts)
    #[arg(long, default_value_t = DEFAULT_TOLERANCE)]
    tolerance: f64,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    // Parse the netlist and build the circuit
    let components = netlist::parse_file(&args.circuit)?;
    let mut circuit = Circuit::new(components)?;

    let config = TransientConfig::new()
        .with_max_iterations(args.max_iterations)
        .with_tolerance(args.tolerance);

    // Samples arrive on stdin; the stream owns the lock for the run
    let stdin = io::stdin();
    let samples = SampleStream::from_reader(stdin.lock())?;

    match args.output {
        Some(path) => {
            let file = File::create(&path).map_err(|e| {
                StompError::trace_output(format!("cannot create '{}': {e}", path.display()))
            })?;
            let mut sink = TraceWriter::new(BufWriter::new(file));
            circuit.transient(samples, &mut sink, &config)?;
            sink.flush()
        }
        None => {
            let stdout = io::stdout();
            let mut sink = TraceWriter::new(stdout.lock());
            circuit.transient(samples, &mut sink, &config)?;
            sink.flush()
        }
    }
}
