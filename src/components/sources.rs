//! Source, probe, and reference devices: VoltageIn, VoltageOut, Ground.

use std::fmt;

use crate::circuit::{unknown_current, unknown_voltage};
use crate::error::{Result, StompError};
use crate::solver::LinearSystem;

/// The independent voltage input, driven by the external sample stream.
///
/// An ideal voltage source needs its branch current as an extra unknown:
/// the constraint row pins `V+ - V-` to the scheduled sample, and the
/// current column feeds that branch current into both node equations.
#[derive(Debug, Clone)]
pub struct VoltageIn {
    pub name: String,
    pub node_pos: String,
    pub node_neg: String,
    /// The currently-scheduled sample voltage, updated by the driver
    /// before each time step.
    value: f64,
}

impl VoltageIn {
    /// Parse from the cleaned tokens of a `VOLTAGE_IN <name> <n+> <n->` line.
    /// A trailing source spec is accepted and ignored.
    pub fn from_tokens(tokens: &[&str], line: usize) -> Result<Self> {
        if tokens.len() < 4 {
            return Err(StompError::parse(
                line,
                "VOLTAGE_IN requires <name> <n+> <n->",
            ));
        }
        Ok(Self {
            name: tokens[1].to_string(),
            node_pos: tokens[2].to_string(),
            node_neg: tokens[3].to_string(),
            value: 0.0,
        })
    }

    /// Schedule the next sample voltage.
    pub fn set_value(&mut self, voltage: f64) {
        self.value = voltage;
    }

    /// The currently-scheduled sample voltage.
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Connected node labels, negative terminal first.
    pub fn nodes(&self) -> Vec<&str> {
        vec![&self.node_neg, &self.node_pos]
    }

    /// Unknown labels: both terminal voltages plus the branch current.
    pub fn unknowns(&self) -> Vec<String> {
        vec![
            unknown_voltage(&self.node_pos),
            unknown_voltage(&self.node_neg),
            unknown_current(&self.name),
        ]
    }

    /// Stamp the voltage constraint row and the branch-current injections.
    pub fn stamp(&self, system: &mut LinearSystem<'_>, prev_soln: &[f64]) {
        let p = system.index(&unknown_voltage(&self.node_pos));
        let n = system.index(&unknown_voltage(&self.node_neg));
        let c = system.index(&unknown_current(&self.name));

        // Constraint row: V+ - V- must move to the scheduled sample.
        system.add_to_lhs(c, p, 1.0);
        system.add_to_lhs(c, n, -1.0);
        let prev_delta = prev_soln[p] - prev_soln[n];
        system.add_to_rhs(c, self.value - prev_delta);

        // Branch current into the node equations.
        system.add_to_lhs(p, c, -1.0);
        system.add_to_lhs(n, c, 1.0);
        system.add_to_rhs(p, prev_soln[c]);
        system.add_to_rhs(n, -prev_soln[c]);
    }
}

impl fmt::Display for VoltageIn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: voltage input spanning nodes {} -> {}",
            self.name, self.node_neg, self.node_pos
        )
    }
}

/// The voltage probe whose terminal difference is the simulation output.
/// Purely observational: no unknowns, no stamps.
#[derive(Debug, Clone)]
pub struct VoltageOut {
    pub name: String,
    pub node_pos: String,
    pub node_neg: String,
}

impl VoltageOut {
    /// Parse from the cleaned tokens of a `VOLTAGE_OUT <name> <n+> <n->` line.
    /// A trailing output path is accepted and ignored here; the driver
    /// chooses the sink.
    pub fn from_tokens(tokens: &[&str], line: usize) -> Result<Self> {
        if tokens.len() < 4 {
            return Err(StompError::parse(
                line,
                "VOLTAGE_OUT requires <name> <n+> <n->",
            ));
        }
        Ok(Self {
            name: tokens[1].to_string(),
            node_pos: tokens[2].to_string(),
            node_neg: tokens[3].to_string(),
        })
    }

    /// Connected node labels, negative terminal first.
    pub fn nodes(&self) -> Vec<&str> {
        vec![&self.node_neg, &self.node_pos]
    }

    /// The probed node pair, positive terminal first.
    pub fn terminals(&self) -> (&str, &str) {
        (&self.node_pos, &self.node_neg)
    }
}

impl fmt::Display for VoltageOut {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: voltage output spanning nodes {} -> {}",
            self.name, self.node_neg, self.node_pos
        )
    }
}

/// The reference node, clamped to zero volts. No unknowns, no stamps.
#[derive(Debug, Clone)]
pub struct Ground {
    pub node_id: String,
}

impl Ground {
    /// Parse from the cleaned tokens of a `GROUND <node_id>` line.
    pub fn from_tokens(tokens: &[&str], line: usize) -> Result<Self> {
        if tokens.len() < 2 {
            return Err(StompError::parse(line, "GROUND requires <node_id>"));
        }
        Ok(Self {
            node_id: tokens[1].to_string(),
        })
    }

    /// Connected node labels.
    pub fn nodes(&self) -> Vec<&str> {
        vec![&self.node_id]
    }
}

impl fmt::Display for Ground {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ground at node {}", self.node_id)
    }
}
