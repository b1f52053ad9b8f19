use super::balance::Dummy;
use super::basis::Cell;
use super::candidate::Candidate;
use super::potential::Potentials;
use super::verbosity::Verbosity;
use crate::Mass;

/// State of the basis at one iteration, for diagnosing failures.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize)]
pub struct Snapshot {
    pub iteration: usize,
    pub cells: Vec<Cell>,
    pub potentials: Potentials,
}

/// Structured progress of one solve.
///
/// Indices refer to the balanced problem, so a dummy row or column (if
/// any) appears as the last index on its side.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(tag = "event", rename_all = "lowercase")]
pub enum Event {
    /// Marginals after balancing.
    Balanced {
        supply: Vec<Mass>,
        demand: Vec<Mass>,
        dummy: Option<Dummy>,
    },
    /// Dual potentials of the current basis.
    Potentials {
        iteration: usize,
        potentials: Potentials,
    },
    /// Most negative reduced cost among non-basic cells.
    Candidate {
        iteration: usize,
        candidate: Candidate,
    },
    /// Cycle closed by the entering cell.
    Cycle {
        iteration: usize,
        cells: Vec<(usize, usize)>,
    },
    /// Basis exchange.
    Pivot {
        iteration: usize,
        enter: Cell,
        leave: Cell,
        theta: Mass,
    },
    /// Basic cells after a pivot, or after the last one when `last` is set.
    Solution {
        iteration: usize,
        cells: Vec<Cell>,
        last: bool,
    },
}

impl Event {
    /// Lowest verbosity at which this event is reported.
    pub fn verbosity(&self) -> Verbosity {
        match self {
            Self::Solution { last: true, .. } => Verbosity::Low,
            Self::Solution { last: false, .. } => Verbosity::Medium,
            Self::Balanced { .. } => Verbosity::High,
            Self::Potentials { .. } => Verbosity::High,
            Self::Pivot { .. } => Verbosity::High,
            Self::Candidate { .. } => Verbosity::Full,
            Self::Cycle { .. } => Verbosity::Full,
        }
    }
}

impl std::fmt::Display for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Balanced { supply, demand, dummy } => write!(
                f,
                "{:<12}{} rows {} cols dummy {:?}",
                "balanced",
                supply.len(),
                demand.len(),
                dummy
            ),
            Self::Potentials { iteration, potentials } => write!(
                f,
                "{:<12}{:<6}u {:?} v {:?}",
                "potentials", iteration, potentials.u, potentials.v
            ),
            Self::Candidate { iteration, candidate } => write!(
                f,
                "{:<12}{:<6}({}, {}) delta {:.6e}",
                "candidate", iteration, candidate.row, candidate.col, candidate.delta
            ),
            Self::Cycle { iteration, cells } => {
                write!(f, "{:<12}{:<6}{:?}", "cycle", iteration, cells)
            }
            Self::Pivot {
                iteration,
                enter,
                leave,
                theta,
            } => write!(
                f,
                "{:<12}{:<6}in ({}, {}) out ({}, {}) theta {:.6}",
                "pivot", iteration, enter.row, enter.col, leave.row, leave.col, theta
            ),
            Self::Solution {
                iteration, cells, ..
            } => {
                write!(f, "{:<12}{:<6}", "solution", iteration)?;
                for cell in cells {
                    write!(f, " ({}, {}) {:.6}", cell.row, cell.col, cell.flow)?;
                }
                Ok(())
            }
        }
    }
}

/// Write-only destination for trace events.
///
/// Sinks observe the solver and never influence it. They are `Send` so a
/// solve can be handed to another thread along with its sink.
pub trait Sink: Send {
    fn record(&mut self, event: Event);
}

/// Keeps every event in memory.
#[derive(Debug, Default)]
pub struct Recorder(Vec<Event>);

impl Recorder {
    pub fn events(&self) -> &[Event] {
        &self.0
    }
    pub fn into_events(self) -> Vec<Event> {
        self.0
    }
}

impl Sink for Recorder {
    fn record(&mut self, event: Event) {
        self.0.push(event);
    }
}

/// Forwards events to the `log` facade.
/// Final solutions log at info, everything else at debug.
#[derive(Debug, Default)]
pub struct Logger;

impl Sink for Logger {
    fn record(&mut self, event: Event) {
        match event.verbosity() {
            Verbosity::Low => log::info!("{}", event),
            _ => log::debug!("{}", event),
        }
    }
}
