//! Circuit representation and construction.
//!
//! A [`Circuit`] owns the parsed component list, the registry mapping each
//! symbolic unknown to its dense index, and the committed/iterate solution
//! vectors the transient driver works on. Construction performs the
//! structural checks: exactly one ground, one voltage input, and one
//! voltage output, all wired to registered nodes.

mod registry;
mod transient;

pub use registry::{unknown_current, unknown_voltage, UnknownRegistry};
pub use transient::{TransientConfig, TransientResult};

use log::debug;

use crate::components::Component;
use crate::error::{Result, StompError};

/// A complete circuit ready for transient analysis.
#[derive(Debug)]
pub struct Circuit {
    /// Components in netlist declaration order.
    components: Vec<Component>,
    /// Distinct node labels in first-touch order.
    nodes: Vec<String>,
    /// Frozen unknown-label registry.
    registry: UnknownRegistry,
    /// Row index of the ground voltage unknown.
    ground: usize,
    /// Position of the voltage input in `components`.
    vin_idx: usize,
    /// Solution index of the probe's positive terminal.
    out_pos: usize,
    /// Solution index of the probe's negative terminal.
    out_neg: usize,
    /// Committed solution at the last converged time step.
    soln: Vec<f64>,
    /// Running Newton iterate within the current step.
    prev_soln: Vec<f64>,
}

impl Circuit {
    /// Build a circuit from its component list.
    ///
    /// Records every touched node and registers every unknown in
    /// declaration order, then resolves the ground row and the probe
    /// terminals against the frozen registry, so the `VOLTAGE_OUT` line
    /// may appear anywhere in the netlist.
    pub fn new(components: Vec<Component>) -> Result<Self> {
        let mut registry = UnknownRegistry::new();
        let mut nodes: Vec<String> = Vec::new();
        let mut ground_node: Option<String> = None;
        let mut vin_idx: Option<usize> = None;
        let mut out_nodes: Option<(String, String)> = None;

        for (i, component) in components.iter().enumerate() {
            match component {
                Component::Ground(g) => {
                    if ground_node.replace(g.node_id.clone()).is_some() {
                        return Err(StompError::duplicate("GROUND"));
                    }
                }
                Component::VoltageIn(_) => {
                    if vin_idx.replace(i).is_some() {
                        return Err(StompError::duplicate("VOLTAGE_IN"));
                    }
                }
                Component::VoltageOut(v) => {
                    let (pos, neg) = v.terminals();
                    if out_nodes.replace((pos.to_string(), neg.to_string())).is_some() {
                        return Err(StompError::duplicate("VOLTAGE_OUT"));
                    }
                }
                Component::Resistor(_) | Component::Capacitor(_) => {}
            }
            for node in component.nodes() {
                if !nodes.iter().any(|known| known == node) {
                    nodes.push(node.to_string());
                }
            }
            for unknown in component.unknowns() {
                registry.register(&unknown);
            }
        }

        let ground_node = ground_node.ok_or(StompError::MissingGround)?;
        let vin_idx = vin_idx.ok_or(StompError::MissingVoltageIn)?;
        let (out_pos_node, out_neg_node) = out_nodes.ok_or(StompError::MissingVoltageOut)?;

        let ground = registry
            .get(&unknown_voltage(&ground_node))
            .ok_or(StompError::NodeNotFound { node: ground_node })?;
        let out_pos = registry
            .get(&unknown_voltage(&out_pos_node))
            .ok_or(StompError::NodeNotFound { node: out_pos_node })?;
        let out_neg = registry
            .get(&unknown_voltage(&out_neg_node))
            .ok_or(StompError::NodeNotFound { node: out_neg_node })?;

        debug!(
            "circuit built: {} components, {} nodes, {} unknowns",
            components.len(),
            nodes.len(),
            registry.len()
        );
        for component in &components {
            debug!("  {component}");
        }

        let size = registry.len();
        Ok(Self {
            components,
            nodes,
            registry,
            ground,
            vin_idx,
            out_pos,
            out_neg,
            soln: vec![0.0; size],
            prev_soln: vec![0.0; size],
        })
    }

    /// Parse a netlist source and build the circuit in one step.
    pub fn from_netlist(input: &str) -> Result<Self> {
        Self::new(crate::netlist::parse(input)?)
    }

    /// Distinct node labels, in the order the netlist first touches them.
    pub fn nodes(&self) -> &[String] {
        &self.nodes
    }

    /// The frozen unknown registry.
    pub fn unknowns(&self) -> &UnknownRegistry {
        &self.registry
    }

    /// Row index of the ground voltage unknown.
    pub fn ground_index(&self) -> usize {
        self.ground
    }

    /// The committed solution vector, column-aligned with the registry.
    pub fn solution(&self) -> &[f64] {
        &self.soln
    }

    /// Zero the solution state so a rerun starts from rest.
    pub fn reset(&mut self) {
        self.soln.fill(0.0);
        self.prev_soln.fill(0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DIVIDER: &str = "\
GROUND gnd
VOLTAGE_IN vin n1 gnd
RESISTOR r1 n1 n2 1k
RESISTOR r2 n2 gnd 1k
VOLTAGE_OUT vout n2 gnd
";

    #[test]
    fn test_registration_order() {
        let circuit = Circuit::from_netlist(DIVIDER).unwrap();
        assert_eq!(
            circuit.unknowns().labels(),
            [
                "voltage_node_n1",
                "voltage_node_gnd",
                "unknown_current_vin",
                "voltage_node_n2",
            ]
        );
        assert_eq!(circuit.ground_index(), 1);
        assert_eq!(circuit.solution(), [0.0; 4]);
    }

    #[test]
    fn test_nodes_recorded_in_first_touch_order() {
        let circuit = Circuit::from_netlist(DIVIDER).unwrap();
        assert_eq!(circuit.nodes(), ["gnd", "n1", "n2"]);
    }

    #[test]
    fn test_registry_is_stable_across_builds() {
        let first = Circuit::from_netlist(DIVIDER).unwrap();
        let second = Circuit::from_netlist(DIVIDER).unwrap();
        assert_eq!(first.unknowns().labels(), second.unknowns().labels());
    }

    #[test]
    fn test_missing_ground() {
        let netlist = "VOLTAGE_IN vin n1 n2\nVOLTAGE_OUT vout n1 n2\n";
        assert!(matches!(
            Circuit::from_netlist(netlist),
            Err(StompError::MissingGround)
        ));
    }

    #[test]
    fn test_missing_voltage_in() {
        let netlist = "GROUND gnd\nRESISTOR r1 n1 gnd 1k\nVOLTAGE_OUT vout n1 gnd\n";
        assert!(matches!(
            Circuit::from_netlist(netlist),
            Err(StompError::MissingVoltageIn)
        ));
    }

    #[test]
    fn test_missing_voltage_out() {
        let netlist = "GROUND gnd\nVOLTAGE_IN vin n1 gnd\n";
        assert!(matches!(
            Circuit::from_netlist(netlist),
            Err(StompError::MissingVoltageOut)
        ));
    }

    #[test]
    fn test_duplicate_ground() {
        let netlist = "GROUND gnd\nGROUND gnd2\nVOLTAGE_IN vin n1 gnd\nVOLTAGE_OUT vout n1 gnd\n";
        match Circuit::from_netlist(netlist) {
            Err(StompError::DuplicateDevice { kind }) => assert_eq!(kind, "GROUND"),
            other => panic!("expected duplicate ground, got {other:?}"),
        }
    }

    #[test]
    fn test_probe_on_untouched_node() {
        let netlist = "\
GROUND gnd
VOLTAGE_IN vin n1 gnd
VOLTAGE_OUT vout floating gnd
";
        match Circuit::from_netlist(netlist) {
            Err(StompError::NodeNotFound { node }) => assert_eq!(node, "floating"),
            other => panic!("expected unconnected probe node, got {other:?}"),
        }
    }

    #[test]
    fn test_ground_node_must_be_wired() {
        // Nothing registers a voltage unknown for the ground node label.
        let netlist = "\
GROUND gnd
VOLTAGE_IN vin n1 n2
VOLTAGE_OUT vout n1 n2
";
        match Circuit::from_netlist(netlist) {
            Err(StompError::NodeNotFound { node }) => assert_eq!(node, "gnd"),
            other => panic!("expected unwired ground, got {other:?}"),
        }
    }
}
