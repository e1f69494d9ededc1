//! Socket-matching tile collapse solver

/// Possibility sets backed by bitvec
pub mod bitset;
/// Solver state machine and run orchestration
pub mod executor;
/// Neighbour pruning after a collapse
pub mod propagation;
/// Cell selection and weighted candidate draws
pub mod selection;

pub use executor::{CollapseEvent, SolverConfig, SolverState, Termination, WfcSolver};
