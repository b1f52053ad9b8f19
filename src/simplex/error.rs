use super::trace::Snapshot;

/// Structural defects detected while maintaining the basis.
///
/// None of these can occur for a well-posed problem in exact arithmetic.
/// In floating point they mean the tolerance does not suit the scale of
/// the ground distances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum Fault {
    /// Dual propagation stalled before every potential was assigned.
    Disconnected,
    /// Every cell is basic, so there is nothing to price.
    Saturated,
    /// The entering cell closed no cycle.
    Acyclic,
    /// The slot pool ran out of free records.
    Exhausted,
    /// The initial basis is not a spanning tree.
    Underfilled { expected: usize, found: usize },
}

impl std::fmt::Display for Fault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Disconnected => write!(f, "dual potentials could not be propagated"),
            Self::Saturated => write!(f, "no non-basic cell to evaluate"),
            Self::Acyclic => write!(f, "entering cell closes no cycle"),
            Self::Exhausted => write!(f, "basis slot pool exhausted"),
            Self::Underfilled { expected, found } => {
                write!(f, "initial basis has {} cells, expected {}", found, expected)
            }
        }
    }
}

/// Errors that abort an EMD computation.
///
/// No partial result accompanies any of them; callers may retry with a
/// different [`Config`](super::Config).
#[derive(Debug, Clone)]
pub enum EmdError {
    /// Rejected inputs or settings, reported before solving begins.
    Configuration(String),
    /// The pivot cap was reached without satisfying optimality.
    Convergence { iterations: usize },
    /// The basis lost its spanning-tree structure.
    Inconsistency {
        iteration: usize,
        fault: Fault,
        snapshot: Box<Snapshot>,
    },
    /// A cooperative interrupt was raised between iterations.
    Interrupted { iteration: usize },
}

impl std::fmt::Display for EmdError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Configuration(s) => write!(f, "invalid configuration: {}", s),
            Self::Convergence { iterations } => {
                write!(f, "no optimal solution after {} iterations", iterations)
            }
            Self::Inconsistency {
                iteration, fault, ..
            } => write!(
                f,
                "internal inconsistency at iteration {}: {} (epsilon may not suit the scale of the problem)",
                iteration, fault
            ),
            Self::Interrupted { iteration } => write!(f, "interrupted at iteration {}", iteration),
        }
    }
}

impl std::error::Error for EmdError {}
