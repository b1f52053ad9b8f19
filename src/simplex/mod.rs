//! Transportation simplex.
//!
//! Computes the Earth Mover's Distance exactly: balance the two masses with
//! a dummy bin, seed a basic feasible solution with Russel's approximation,
//! then pivot on the most negative reduced cost until none remains.
//!
//! ## Solver
//!
//! - [`Simplex`]: entry point, configured with a builder
//! - [`Plan`]: the optimal flows and their normalized cost
//! - [`emd`]: one-shot distance with default settings
//!
//! ## Diagnostics
//!
//! - [`Config`] and [`Verbosity`]: tolerance, pivot cap and trace level
//! - [`Sink`], [`Recorder`], [`Logger`]: destinations for trace [`Event`]s
//! - [`EmdError`] and [`Fault`]: why a solve was abandoned
mod balance;
mod basis;
mod candidate;
mod config;
mod error;
mod grid;
mod pivot;
mod plan;
mod potential;
mod russel;
mod solver;
mod tableau;
mod trace;
mod verbosity;

#[cfg(test)]
mod tests;

pub use balance::Dummy;
pub use basis::Cell;
pub use candidate::Candidate;
pub use config::*;
pub use error::*;
pub use plan::*;
pub use potential::Potentials;
pub use solver::*;
pub use trace::*;
pub use verbosity::*;
