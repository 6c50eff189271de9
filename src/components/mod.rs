//! Component models for circuit simulation.
//!
//! The device set is closed and known at build time, so components are a
//! plain enum rather than a trait object hierarchy:
//! - Linear: [`Resistor`], [`Capacitor`]
//! - Source: [`VoltageIn`] (driven by the external sample stream)
//! - Probe: [`VoltageOut`] (observational only)
//! - Reference: [`Ground`]
//!
//! Each device kind knows which unknowns it introduces or references and
//! how to stamp its contribution into the linear system.

mod linear;
mod sources;

pub use linear::{Capacitor, Resistor};
pub use sources::{Ground, VoltageIn, VoltageOut};

use std::fmt;

use crate::error::{Result, StompError};
use crate::solver::LinearSystem;

/// A circuit component.
#[derive(Debug, Clone)]
pub enum Component {
    Resistor(Resistor),
    Capacitor(Capacitor),
    VoltageIn(VoltageIn),
    VoltageOut(VoltageOut),
    Ground(Ground),
}

impl Component {
    /// Parse one cleaned netlist line into a component.
    ///
    /// Token 0 selects the device kind, token 1 is the device name (the
    /// node id for `GROUND`), and the rest are kind-specific.
    pub fn from_netlist_line(line: &str, line_no: usize) -> Result<Self> {
        let tokens: Vec<&str> = line.split(' ').collect();
        match tokens.first() {
            Some(&"RESISTOR") => Ok(Component::Resistor(Resistor::from_tokens(
                &tokens, line_no,
            )?)),
            Some(&"CAPACITOR") => Ok(Component::Capacitor(Capacitor::from_tokens(
                &tokens, line_no,
            )?)),
            Some(&"VOLTAGE_IN") => Ok(Component::VoltageIn(VoltageIn::from_tokens(
                &tokens, line_no,
            )?)),
            Some(&"VOLTAGE_OUT") => Ok(Component::VoltageOut(VoltageOut::from_tokens(
                &tokens, line_no,
            )?)),
            Some(&"GROUND") => Ok(Component::Ground(Ground::from_tokens(&tokens, line_no)?)),
            Some(&kind) => Err(StompError::unknown_device(kind, line_no)),
            None => Err(StompError::parse(line_no, "empty netlist line")),
        }
    }

    /// Device name as declared in the netlist (the node id for `GROUND`).
    pub fn name(&self) -> &str {
        match self {
            Component::Resistor(r) => &r.name,
            Component::Capacitor(c) => &c.name,
            Component::VoltageIn(v) => &v.name,
            Component::VoltageOut(v) => &v.name,
            Component::Ground(g) => &g.node_id,
        }
    }

    /// Node labels this device touches. Diagnostic convenience; the solver
    /// depends only on [`Component::unknowns`].
    pub fn nodes(&self) -> Vec<&str> {
        match self {
            Component::Resistor(r) => r.nodes(),
            Component::Capacitor(c) => c.nodes(),
            Component::VoltageIn(v) => v.nodes(),
            Component::VoltageOut(v) => v.nodes(),
            Component::Ground(g) => g.nodes(),
        }
    }

    /// Ordered unknown labels this device introduces or references.
    pub fn unknowns(&self) -> Vec<String> {
        match self {
            Component::Resistor(r) => r.unknowns(),
            Component::Capacitor(c) => c.unknowns(),
            Component::VoltageIn(v) => v.unknowns(),
            Component::VoltageOut(_) | Component::Ground(_) => Vec::new(),
        }
    }

    /// Add this device's contribution to the system.
    ///
    /// `soln` is the committed solution at the start of the step and
    /// `prev_soln` the running Newton iterate. Probes and the ground
    /// marker contribute nothing. Stamps cannot fail.
    pub fn stamp(
        &self,
        system: &mut LinearSystem<'_>,
        soln: &[f64],
        prev_soln: &[f64],
        dt: f64,
        _time: f64,
    ) {
        match self {
            Component::Resistor(r) => r.stamp(system, prev_soln),
            Component::Capacitor(c) => c.stamp(system, soln, prev_soln, dt),
            Component::VoltageIn(v) => v.stamp(system, prev_soln),
            Component::VoltageOut(_) | Component::Ground(_) => {}
        }
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Component::Resistor(r) => r.fmt(f),
            Component::Capacitor(c) => c.fmt(f),
            Component::VoltageIn(v) => v.fmt(f),
            Component::VoltageOut(v) => v.fmt(f),
            Component::Ground(g) => g.fmt(f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dispatch_on_device_kind() {
        let c = Component::from_netlist_line("CAPACITOR c1 n2 gnd 1u", 4).unwrap();
        assert!(matches!(c, Component::Capacitor(_)));
        assert_eq!(c.name(), "c1");
        assert_eq!(c.nodes(), ["gnd", "n2"]);
    }

    #[test]
    fn test_unknown_device_kind() {
        let err = Component::from_netlist_line("INDUCTOR l1 a b 1m", 9).unwrap_err();
        match err {
            StompError::UnknownDevice { device_type, line } => {
                assert_eq!(device_type, "INDUCTOR");
                assert_eq!(line, 9);
            }
            other => panic!("expected UnknownDevice, got {other:?}"),
        }
    }

    #[test]
    fn test_malformed_line_is_rejected() {
        assert!(matches!(
            Component::from_netlist_line("RESISTOR r1 a b", 2),
            Err(StompError::ParseError { line: 2, .. })
        ));
    }

    #[test]
    fn test_probe_and_ground_have_no_unknowns() {
        let vout = Component::from_netlist_line("VOLTAGE_OUT vout n2 gnd", 1).unwrap();
        let gnd = Component::from_netlist_line("GROUND gnd", 2).unwrap();
        assert!(vout.unknowns().is_empty());
        assert!(gnd.unknowns().is_empty());
    }

    #[test]
    fn test_display_texture() {
        let r = Component::from_netlist_line("RESISTOR r1 a b 1k", 1).unwrap();
        assert_eq!(r.to_string(), "r1: resistor of 1000 ohms");
    }
}
