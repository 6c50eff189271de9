//! The assembled linear system for one Newton iteration.

use std::fmt;

use log::error;

use crate::circuit::UnknownRegistry;
use crate::error::{Result, StompError};

use super::lu;

/// One iteration's system of KCL equations and source constraints,
/// `LHS * deltas = RHS`.
///
/// A system is built fresh for every Newton pass: components add their
/// stamps, `solve` factors it, and the system is discarded. The ground row
/// is owned by the system itself: it is written once at construction
/// (`LHS[g][g] = 1`, `RHS[g] = 0`, clamping the ground voltage delta to
/// zero) and every later stamp aimed at that row is dropped.
pub struct LinearSystem<'a> {
    registry: &'a UnknownRegistry,
    lhs: Vec<f64>,
    rhs: Vec<f64>,
    size: usize,
    ground: usize,
}

impl<'a> LinearSystem<'a> {
    /// Allocate a zeroed system over the registry's unknowns with the
    /// ground clamp in place.
    pub fn new(registry: &'a UnknownRegistry, ground: usize) -> Self {
        let size = registry.len();
        debug_assert!(ground < size);
        let mut lhs = vec![0.0; size * size];
        lhs[ground * size + ground] = 1.0;
        Self {
            registry,
            lhs,
            rhs: vec![0.0; size],
            size,
            ground,
        }
    }

    /// Resolve an unknown label to its row/column index.
    pub fn index(&self, label: &str) -> usize {
        self.registry.index(label)
    }

    /// Add a component contribution at `(r, c)` of the left-hand side.
    /// Writes to the ground row are dropped.
    pub fn add_to_lhs(&mut self, r: usize, c: usize, delta: f64) {
        if r != self.ground {
            self.lhs[r * self.size + c] += delta;
        }
    }

    /// Add a component contribution at row `r` of the right-hand side.
    /// Writes to the ground row are dropped.
    pub fn add_to_rhs(&mut self, r: usize, delta: f64) {
        if r != self.ground {
            self.rhs[r] += delta;
        }
    }

    /// Left-hand-side entry at `(r, c)`.
    pub fn lhs(&self, r: usize, c: usize) -> f64 {
        self.lhs[r * self.size + c]
    }

    /// Right-hand-side entry at `r`.
    pub fn rhs(&self, r: usize) -> f64 {
        self.rhs[r]
    }

    /// Number of unknowns.
    pub fn size(&self) -> usize {
        self.size
    }

    /// The clamped ground row index.
    pub fn ground(&self) -> usize {
        self.ground
    }

    /// Solve the system, consuming it. `time` is the simulation timestamp
    /// of the step being solved, used to report a singular system.
    pub fn solve(self, time: f64) -> Result<Vec<f64>> {
        match lu::factor(&self.lhs, self.size) {
            Some(factors) => Ok(factors.solve(&self.rhs)),
            None => {
                error!("system has no unique solution at t = {time}s:\n{self}");
                Err(StompError::SingularSystem { time })
            }
        }
    }
}

impl fmt::Display for LinearSystem<'_> {
    /// Render the labeled rows of the system, for singular-system dumps.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let labels = self.registry.labels();
        for r in 0..self.size {
            write!(f, "{:>24} |", labels[r])?;
            for c in 0..self.size {
                write!(f, " {:>12.5e}", self.lhs(r, c))?;
            }
            writeln!(f, " | {:>12.5e}", self.rhs(r))?;
        }
        Ok(())
    }
}
