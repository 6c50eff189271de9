//! Linear passive components: Resistor, Capacitor.

use std::fmt;

use crate::circuit::unknown_voltage;
use crate::error::{Result, StompError};
use crate::netlist::parse_value;
use crate::solver::LinearSystem;

/// A resistor between two nodes.
///
/// By Ohm's law the current into the positive terminal is
/// `(V+ - V-) / R`; the stamp spreads the conductance over the four
/// node-pair cells and puts the previous iterate's residual current on the
/// right-hand side.
#[derive(Debug, Clone)]
pub struct Resistor {
    pub name: String,
    pub node_pos: String,
    pub node_neg: String,
    /// Resistance in ohms.
    pub resistance: f64,
}

impl Resistor {
    /// Parse from the cleaned tokens of a `RESISTOR <name> <n+> <n-> <value>` line.
    pub fn from_tokens(tokens: &[&str], line: usize) -> Result<Self> {
        if tokens.len() < 5 {
            return Err(StompError::parse(
                line,
                "RESISTOR requires <name> <n+> <n-> <value>",
            ));
        }
        Ok(Self {
            name: tokens[1].to_string(),
            node_pos: tokens[2].to_string(),
            node_neg: tokens[3].to_string(),
            resistance: parse_value(tokens[4], line)?,
        })
    }

    /// Conductance (1/R).
    pub fn conductance(&self) -> f64 {
        1.0 / self.resistance
    }

    /// Connected node labels, negative terminal first.
    pub fn nodes(&self) -> Vec<&str> {
        vec![&self.node_neg, &self.node_pos]
    }

    /// Unknown labels this device references.
    pub fn unknowns(&self) -> Vec<String> {
        vec![
            unknown_voltage(&self.node_pos),
            unknown_voltage(&self.node_neg),
        ]
    }

    /// Stamp the conductance pattern and the residual of the running
    /// Newton iterate.
    pub fn stamp(&self, system: &mut LinearSystem<'_>, prev_soln: &[f64]) {
        let g = self.conductance();
        let p = system.index(&unknown_voltage(&self.node_pos));
        let n = system.index(&unknown_voltage(&self.node_neg));

        system.add_to_lhs(p, p, g);
        system.add_to_lhs(n, n, g);
        system.add_to_lhs(p, n, -g);
        system.add_to_lhs(n, p, -g);

        let residual = -g * prev_soln[p] + g * prev_soln[n];
        system.add_to_rhs(p, residual);
        system.add_to_rhs(n, -residual);
    }
}

impl fmt::Display for Resistor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: resistor of {} ohms", self.name, self.resistance)
    }
}

/// A capacitor between two nodes.
///
/// Discretized with the backward-Euler companion model: a conductance
/// `C/dt` in parallel with a history current derived from the committed
/// solution at the start of the step.
#[derive(Debug, Clone)]
pub struct Capacitor {
    pub name: String,
    pub node_pos: String,
    pub node_neg: String,
    /// Capacitance in farads.
    pub capacitance: f64,
}

impl Capacitor {
    /// Parse from the cleaned tokens of a `CAPACITOR <name> <n+> <n-> <value>` line.
    pub fn from_tokens(tokens: &[&str], line: usize) -> Result<Self> {
        if tokens.len() < 5 {
            return Err(StompError::parse(
                line,
                "CAPACITOR requires <name> <n+> <n-> <value>",
            ));
        }
        Ok(Self {
            name: tokens[1].to_string(),
            node_pos: tokens[2].to_string(),
            node_neg: tokens[3].to_string(),
            capacitance: parse_value(tokens[4], line)?,
        })
    }

    /// Companion conductance `C/dt` for the given time step.
    pub fn conductance(&self, dt: f64) -> f64 {
        self.capacitance / dt
    }

    /// Connected node labels, negative terminal first.
    pub fn nodes(&self) -> Vec<&str> {
        vec![&self.node_neg, &self.node_pos]
    }

    /// Unknown labels this device references.
    pub fn unknowns(&self) -> Vec<String> {
        vec![
            unknown_voltage(&self.node_pos),
            unknown_voltage(&self.node_neg),
        ]
    }

    /// Stamp the companion conductance and the charging-current residual.
    ///
    /// `soln` is the committed solution at the start of the step, so
    /// `vt1 - vt0` measures how far the running iterate has moved the
    /// capacitor voltage within this step.
    pub fn stamp(
        &self,
        system: &mut LinearSystem<'_>,
        soln: &[f64],
        prev_soln: &[f64],
        dt: f64,
    ) {
        let gc = self.conductance(dt);
        let p = system.index(&unknown_voltage(&self.node_pos));
        let n = system.index(&unknown_voltage(&self.node_neg));

        system.add_to_lhs(p, p, gc);
        system.add_to_lhs(n, n, gc);
        system.add_to_lhs(n, p, -gc);
        system.add_to_lhs(p, n, -gc);

        let vt0 = prev_soln[p] - prev_soln[n];
        let vt1 = soln[p] - soln[n];
        let di = (vt1 - vt0) * gc;
        system.add_to_rhs(p, di);
        system.add_to_rhs(n, -di);
    }
}

impl fmt::Display for Capacitor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: capacitor of {} farads", self.name, self.capacitance)
    }
}
