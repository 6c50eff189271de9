//! The registry of solver unknowns.
//!
//! Every scalar the solver must determine (a node voltage or a voltage
//! source's branch current) is identified by a symbolic label and mapped
//! to a dense index in `[0, N)`. Indices are assigned in registration
//! order, which follows netlist declaration order, so the same netlist
//! always produces the same label-to-index mapping.

use std::collections::HashMap;

/// The unknown label for a node's voltage.
pub fn unknown_voltage(node: &str) -> String {
    format!("voltage_node_{node}")
}

/// The unknown label for a branch current through a voltage source.
pub fn unknown_current(branch: &str) -> String {
    format!("unknown_current_{branch}")
}

/// Maps unknown labels to dense solution-vector indices.
///
/// Filled once during circuit construction and frozen afterwards; the
/// solution vectors, the system matrix rows, and the right-hand side are
/// all column-aligned with these indices.
#[derive(Debug, Default, Clone)]
pub struct UnknownRegistry {
    indices: HashMap<String, usize>,
    labels: Vec<String>,
}

impl UnknownRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a label, assigning the next free index on first sight.
    /// Returns the label's index either way.
    pub fn register(&mut self, label: &str) -> usize {
        if let Some(&index) = self.indices.get(label) {
            return index;
        }
        let index = self.labels.len();
        self.indices.insert(label.to_string(), index);
        self.labels.push(label.to_string());
        index
    }

    /// Look up a label's index.
    pub fn get(&self, label: &str) -> Option<usize> {
        self.indices.get(label).copied()
    }

    /// Look up a label's index, panicking if it was never registered.
    ///
    /// Stamps use this: circuit construction registers every label a stamp
    /// can ask for, so a miss here is a construction bug, not a runtime
    /// condition.
    pub fn index(&self, label: &str) -> usize {
        self.indices[label]
    }

    /// Number of registered unknowns.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// The labels in index order.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }
}
