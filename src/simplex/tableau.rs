use super::balance::Balance;
use super::basis::Basis;
use super::basis::Cell;
use super::candidate::Candidate;
use super::config::Config;
use super::error::EmdError;
use super::error::Fault;
use super::pivot::Pivot;
use super::potential::Potentials;
use super::russel::Russel;
use super::trace::Event;
use super::trace::Sink;
use super::trace::Snapshot;
use super::verbosity::Verbosity;
use crate::Energy;
use crate::Mass;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;

/// Optimal basis of a balanced problem.
#[derive(Debug, Clone)]
pub struct Optimum {
    /// Basic cells in slot order, dummy bins included.
    pub cells: Vec<Cell>,
    /// Σ flow × cost over basic cells with non-zero flow.
    pub work: Energy,
    /// Mass actually moved.
    pub mass: Mass,
    /// Pivots performed.
    pub iterations: usize,
}

/// Working state of one solve.
///
/// Owns the balanced problem, the basis and its potentials for the
/// duration of a single call. Nothing here outlives [`Tableau::solve`].
pub struct Tableau<'a> {
    config: Config,
    sink: Option<&'a mut dyn Sink>,
    interrupt: Option<&'a AtomicBool>,
    balance: Balance,
    basis: Basis,
    potentials: Potentials,
    iteration: usize,
}

impl<'a> Tableau<'a> {
    /// Seeds the basis of an already balanced problem with Russel's method.
    pub fn new(
        balance: Balance,
        config: Config,
        sink: Option<&'a mut dyn Sink>,
        interrupt: Option<&'a AtomicBool>,
    ) -> Result<Self, EmdError> {
        let basis = Basis::new(balance.rows(), balance.cols());
        let mut tableau = Self {
            config,
            sink,
            interrupt,
            balance,
            basis,
            potentials: Potentials::default(),
            iteration: 0,
        };
        tableau.emit(Verbosity::High, |t| Event::Balanced {
            supply: t.balance.supply.clone(),
            demand: t.balance.demand.clone(),
            dummy: t.balance.dummy,
        });
        let seeded = Russel::new(&tableau.balance, tableau.config.epsilon).build(&mut tableau.basis);
        tableau.check(seeded)?;
        Ok(tableau)
    }

    /// Pivots until no non-basic cell improves the cost.
    ///
    /// # Algorithm
    ///
    /// 1. Solve the dual potentials of the current basis
    /// 2. Price every non-basic cell and keep the most negative
    /// 3. Stop if it is within `epsilon × max distance` of zero
    /// 4. Otherwise bring it in and drive the cycle's bottleneck out
    ///
    /// A problem with a single row or column has only one feasible basis,
    /// so it skips straight to the result.
    pub fn solve(mut self) -> Result<Optimum, EmdError> {
        let tolerance = self.config.epsilon * self.balance.cost.max();
        if self.basis.rows() > 1 && self.basis.cols() > 1 {
            loop {
                if self.interrupted() {
                    log::warn!("interrupted after {} pivots", self.iteration);
                    return Err(EmdError::Interrupted {
                        iteration: self.iteration,
                    });
                }
                let potentials = Potentials::solve(&self.basis, &self.balance.cost);
                self.potentials = self.check(potentials)?;
                self.emit(Verbosity::High, |t| Event::Potentials {
                    iteration: t.iteration,
                    potentials: t.potentials.clone(),
                });
                let candidate = Candidate::search(&self.basis, &self.balance.cost, &self.potentials);
                let candidate = self.check(candidate)?;
                self.emit(Verbosity::Full, |t| Event::Candidate {
                    iteration: t.iteration,
                    candidate,
                });
                if candidate.is_optimal(tolerance) {
                    break;
                }
                if self.iteration >= self.config.iterations {
                    log::warn!("no optimum after {} pivots", self.iteration);
                    return Err(EmdError::Convergence {
                        iterations: self.iteration,
                    });
                }
                self.iteration += 1;
                let pivot = Pivot::apply(&mut self.basis, &candidate);
                let pivot = self.check(pivot)?;
                self.record(pivot);
            }
        }
        self.emit(Verbosity::Low, |t| Event::Solution {
            iteration: t.iteration,
            cells: t.cells(),
            last: true,
        });
        let work = self
            .basis
            .occupied()
            .map(|(_, cell)| cell)
            .filter(|cell| cell.flow != 0.)
            .fold(0., |work, cell| {
                work + cell.flow * self.balance.cost[(cell.row, cell.col)]
            });
        log::debug!(
            "converged after {} pivots, work {:.6} over mass {:.6}",
            self.iteration,
            work,
            self.balance.shared
        );
        Ok(Optimum {
            cells: self.cells(),
            work,
            mass: self.balance.shared,
            iterations: self.iteration,
        })
    }

    fn record(&mut self, pivot: Pivot) {
        let Pivot {
            enter,
            leave,
            theta,
            cycle,
        } = pivot;
        self.emit(Verbosity::Full, |t| Event::Cycle {
            iteration: t.iteration,
            cells: cycle,
        });
        self.emit(Verbosity::High, |t| Event::Pivot {
            iteration: t.iteration,
            enter,
            leave,
            theta,
        });
        self.emit(Verbosity::Medium, |t| Event::Solution {
            iteration: t.iteration,
            cells: t.cells(),
            last: false,
        });
    }

    /// Builds and records an event, but only when a sink is listening at `level`.
    fn emit<F>(&mut self, level: Verbosity, event: F)
    where
        F: FnOnce(&Self) -> Event,
    {
        if self.sink.is_none() || self.config.verbosity < level {
            return;
        }
        let event = event(self);
        if let Some(sink) = self.sink.as_mut() {
            sink.record(event);
        }
    }

    fn interrupted(&self) -> bool {
        self.interrupt
            .is_some_and(|flag| flag.load(Ordering::Relaxed))
    }

    fn cells(&self) -> Vec<Cell> {
        self.basis.occupied().map(|(_, cell)| *cell).collect()
    }

    /// Escalates a structural fault with the state that produced it.
    fn check<T>(&self, result: Result<T, Fault>) -> Result<T, EmdError> {
        result.map_err(|fault| {
            log::warn!("basis fault at iteration {}: {}", self.iteration, fault);
            EmdError::Inconsistency {
                iteration: self.iteration,
                fault,
                snapshot: Box::new(Snapshot {
                    iteration: self.iteration,
                    cells: self.cells(),
                    potentials: self.potentials.clone(),
                }),
            }
        })
    }
}
