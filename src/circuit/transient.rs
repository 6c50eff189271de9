//! The transient analysis driver.
//!
//! Walks the input sample stream one time step at a time. Every step seeds
//! the Newton iterate with the last committed solution, rebuilds and solves
//! the linear system until the largest correction falls under the
//! tolerance, commits the iterate, and emits one `(t, vin, vout)` triple.
//!
//! The stamps are linear in the system state, so a step settles in one
//! corrective sweep plus one confirming sweep; the iteration cap is a
//! safety net kept so nonlinear devices can slot in later without
//! restructuring the driver.

use std::io::BufRead;

use log::{info, warn};

use crate::components::Component;
use crate::error::Result;
use crate::solver::{LinearSystem, DEFAULT_MAX_ITERATIONS, DEFAULT_TOLERANCE};
use crate::wave::{Sample, SampleStream, TraceSink};

use super::Circuit;

/// Configuration for the transient driver.
#[derive(Debug, Clone)]
pub struct TransientConfig {
    /// Maximum Newton iterations per time step.
    pub max_iterations: usize,
    /// Convergence tolerance on the largest solution update (volts).
    pub tolerance: f64,
}

impl Default for TransientConfig {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
            tolerance: DEFAULT_TOLERANCE,
        }
    }
}

impl TransientConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum Newton iterations per time step.
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Set the convergence tolerance (in volts).
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }
}

/// The recorded outcome of a transient run: one entry per consumed input
/// sample, as three parallel vectors.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransientResult {
    /// Timestamp of each step.
    pub timescale: Vec<f64>,
    /// Input voltage at each step.
    pub vin: Vec<f64>,
    /// Probed output voltage at each step.
    pub vout: Vec<f64>,
}

impl TransientResult {
    /// Number of committed steps.
    pub fn len(&self) -> usize {
        self.timescale.len()
    }

    /// Whether any step was committed.
    pub fn is_empty(&self) -> bool {
        self.timescale.is_empty()
    }
}

impl Circuit {
    /// Run the transient analysis over an input sample stream.
    ///
    /// The stream's sampling period fixes `dt` for the whole run. Each
    /// converged step is pushed into the returned [`TransientResult`] and
    /// forwarded to `sink` as it is produced. A singular system aborts the
    /// run; exhausting the iteration cap only logs a warning and commits
    /// the last iterate.
    pub fn transient<R: BufRead, S: TraceSink>(
        &mut self,
        input: SampleStream<R>,
        sink: &mut S,
        config: &TransientConfig,
    ) -> Result<TransientResult> {
        let dt = input.sampling_period();
        info!(
            "transient analysis: {} unknowns, dt = {dt}s",
            self.registry.len()
        );

        let mut result = TransientResult::default();

        for sample in input {
            let Sample { time, voltage } = sample?;
            self.set_input(voltage);

            // Seed Newton with the previous converged state.
            self.prev_soln.copy_from_slice(&self.soln);

            let mut converged = false;
            for _ in 0..config.max_iterations {
                let mut system = LinearSystem::new(&self.registry, self.ground);
                for component in &self.components {
                    component.stamp(&mut system, &self.soln, &self.prev_soln, dt, time);
                }
                let deltas = system.solve(time)?;

                let mut max_delta: f64 = 0.0;
                for (iterate, delta) in self.prev_soln.iter_mut().zip(&deltas) {
                    *iterate += delta;
                    max_delta = if delta.is_nan() || max_delta.is_nan() {
                        f64::NAN
                    } else {
                        max_delta.max(delta.abs())
                    };
                }

                if max_delta.is_nan() {
                    // Almost certainly a numerical blow-up; stop refining
                    // rather than looping on NaN, but do not call it
                    // converged.
                    warn!("non-finite solution update at t = {time}s");
                    break;
                }
                if max_delta < config.tolerance {
                    converged = true;
                    break;
                }
            }
            if !converged {
                warn!(
                    "newton iteration did not converge within {} passes at t = {time}s; \
                     committing last iterate",
                    config.max_iterations
                );
            }

            self.soln.copy_from_slice(&self.prev_soln);

            let vout = self.soln[self.out_pos] - self.soln[self.out_neg];
            sink.record(time, voltage, vout)?;
            result.timescale.push(time);
            result.vin.push(voltage);
            result.vout.push(vout);
        }

        info!("transient analysis complete: {} steps", result.len());
        Ok(result)
    }

    /// Schedule the next input sample on the voltage input.
    fn set_input(&mut self, voltage: f64) {
        if let Component::VoltageIn(vin) = &mut self.components[self.vin_idx] {
            vin.set_value(voltage);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuit::unknown_voltage;
    use crate::error::StompError;
    use crate::wave::NullSink;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use std::io::Cursor;

    fn stream(input: &str) -> SampleStream<Cursor<String>> {
        SampleStream::from_reader(Cursor::new(input.to_string())).unwrap()
    }

    fn run(netlist: &str, samples: &str) -> Result<TransientResult> {
        let mut circuit = Circuit::from_netlist(netlist)?;
        circuit.transient(stream(samples), &mut NullSink, &TransientConfig::default())
    }

    const PASS_THROUGH: &str = "\
GROUND gnd
VOLTAGE_IN vin n1 gnd
VOLTAGE_OUT vout n1 gnd
";

    const PASS_THROUGH_SAMPLES: &str = "0.1,0,1\n0.0,1.0\n0.1,0.5\n0.2,-0.25\n";

    #[test]
    fn test_pass_through_echoes_input() {
        let result = run(PASS_THROUGH, PASS_THROUGH_SAMPLES).unwrap();
        assert_eq!(result.len(), 3);
        assert_eq!(result.timescale, vec![0.0, 0.1, 0.2]);
        assert_eq!(result.vin, vec![1.0, 0.5, -0.25]);
        for (vout, vin) in result.vout.iter().zip(&result.vin) {
            assert_abs_diff_eq!(*vout, *vin, epsilon = 1e-8);
        }
    }

    #[test]
    fn test_ground_stays_clamped() {
        let mut circuit = Circuit::from_netlist(PASS_THROUGH).unwrap();
        circuit
            .transient(
                stream(PASS_THROUGH_SAMPLES),
                &mut NullSink,
                &TransientConfig::default(),
            )
            .unwrap();
        assert_eq!(circuit.solution()[circuit.ground_index()], 0.0);
    }

    #[test]
    fn test_degenerate_ground_resistor_is_a_no_op() {
        let netlist = "\
GROUND gnd
VOLTAGE_IN vin n1 gnd
VOLTAGE_OUT vout n1 gnd
RESISTOR rgnd gnd gnd 1k
";
        let mut circuit = Circuit::from_netlist(netlist).unwrap();
        let result = circuit
            .transient(
                stream(PASS_THROUGH_SAMPLES),
                &mut NullSink,
                &TransientConfig::default(),
            )
            .unwrap();
        assert_eq!(circuit.solution()[circuit.ground_index()], 0.0);
        for (vout, vin) in result.vout.iter().zip(&result.vin) {
            assert_abs_diff_eq!(*vout, *vin, epsilon = 1e-8);
        }
    }

    const DIVIDER: &str = "\
GROUND gnd
VOLTAGE_IN vin n1 gnd
RESISTOR r1 n1 n2 1k
RESISTOR r2 n2 gnd 1k
VOLTAGE_OUT vout n2 gnd
";

    #[test]
    fn test_resistor_divider_halves_input() {
        let result = run(DIVIDER, "0.1,0,1\n0.0,1.0\n0.1,3.0\n0.2,-2.0\n").unwrap();
        let expected = [0.5, 1.5, -1.0];
        for (vout, want) in result.vout.iter().zip(expected) {
            assert_abs_diff_eq!(*vout, want, epsilon = 1e-8);
        }
    }

    #[test]
    fn test_divider_satisfies_kirchhoff_and_source_constraint() {
        let mut circuit = Circuit::from_netlist(DIVIDER).unwrap();
        circuit
            .transient(
                stream("0.1,0,1\n0.0,2.0\n"),
                &mut NullSink,
                &TransientConfig::default(),
            )
            .unwrap();
        let soln = circuit.solution();
        let registry = circuit.unknowns();
        let v1 = soln[registry.get(&unknown_voltage("n1")).unwrap()];
        let v2 = soln[registry.get(&unknown_voltage("n2")).unwrap()];
        let vg = soln[circuit.ground_index()];

        // The source pins its terminals to the sample.
        assert_abs_diff_eq!(v1 - vg, 2.0, epsilon = 1e-8);
        // Current through r1 equals current through r2 at the middle node.
        assert_abs_diff_eq!((v1 - v2) / 1e3, (v2 - vg) / 1e3, epsilon = 1e-12);
    }

    const RC_LOW_PASS: &str = "\
GROUND gnd
VOLTAGE_IN vin n1 gnd
RESISTOR r1 n1 n2 1k
CAPACITOR c1 n2 gnd 1u
VOLTAGE_OUT vout n2 gnd
";

    fn step_samples(count: usize, dt: f64, level: f64) -> String {
        let mut input = format!("{dt},0,{}\n", count as f64 * dt);
        for k in 0..count {
            input.push_str(&format!("{},{level}\n", k as f64 * dt));
        }
        input
    }

    #[test]
    fn test_rc_step_response_tracks_exponential() {
        // R = 1k, C = 1u: time constant RC = 1e-3 spans 100 samples.
        let dt = 1e-5;
        let rc = 1e-3;
        let result = run(RC_LOW_PASS, &step_samples(501, dt, 1.0)).unwrap();
        for steps in [100usize, 200, 500] {
            let t = steps as f64 * dt;
            let expected = 1.0 - (-t / rc).exp();
            assert_relative_eq!(result.vout[steps], expected, max_relative = 0.01);
        }
    }

    #[test]
    fn test_huge_capacitor_shorts_the_probe_node() {
        let netlist = RC_LOW_PASS.replace("1u", "1");
        let result = run(&netlist, &step_samples(10, 1e-5, 1.0)).unwrap();
        assert!(result.vout.iter().all(|v| v.abs() < 1e-3));
    }

    #[test]
    fn test_tiny_capacitor_is_an_open() {
        let netlist = RC_LOW_PASS.replace("1u", "1f");
        let result = run(&netlist, &step_samples(10, 1e-5, 1.0)).unwrap();
        assert_relative_eq!(result.vout[9], 1.0, max_relative = 1e-4);
    }

    #[test]
    fn test_shorted_source_is_singular_at_step_zero() {
        let netlist = "\
GROUND gnd
VOLTAGE_IN vin n1 n1
RESISTOR r1 n1 gnd 1k
VOLTAGE_OUT vout n1 gnd
";
        match run(netlist, "0.1,0,1\n0.0,1.0\n") {
            Err(StompError::SingularSystem { time }) => assert_eq!(time, 0.0),
            other => panic!("expected singular system, got {other:?}"),
        }
    }

    #[test]
    fn test_rerun_after_reset_is_deterministic() {
        let mut circuit = Circuit::from_netlist(RC_LOW_PASS).unwrap();
        let samples = step_samples(50, 1e-5, 1.0);
        let config = TransientConfig::default();
        let first = circuit
            .transient(stream(&samples), &mut NullSink, &config)
            .unwrap();
        circuit.reset();
        let second = circuit
            .transient(stream(&samples), &mut NullSink, &config)
            .unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_exhausted_stream_yields_no_rows() {
        let result = run(PASS_THROUGH, "0.1,0,1\n").unwrap();
        assert!(result.is_empty());
    }
}
