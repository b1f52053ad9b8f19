use super::balance::Balance;
use super::config::Config;
use super::error::EmdError;
use super::grid::Grid;
use super::plan::Plan;
use super::tableau::Tableau;
use super::trace::Sink;
use crate::Density;
use crate::Energy;
use crate::Mass;
use crate::Measure;
use std::sync::atomic::AtomicBool;

/// Exact Earth Mover's Distance by the transportation simplex.
///
/// Rows of the transportation problem are the bins of the source density,
/// columns the bins of the target, and cell costs the ground distances
/// between them. Both densities and the measure are only borrowed, so any
/// number of solves can share them across threads.
///
/// ```ignore
/// let plan = Simplex::from((&source, &target, &Metric::Euclidean))
///     .config(Config::default().epsilon(1e-9))
///     .minimize()?;
/// ```
pub struct Simplex<'a, P, Q, M> {
    source: &'a P,
    target: &'a Q,
    measure: &'a M,
    config: Config,
    sink: Option<&'a mut dyn Sink>,
    interrupt: Option<&'a AtomicBool>,
}

impl<'a, P, Q, M> From<(&'a P, &'a Q, &'a M)> for Simplex<'a, P, Q, M> {
    fn from((source, target, measure): (&'a P, &'a Q, &'a M)) -> Self {
        Self {
            source,
            target,
            measure,
            config: Config::default(),
            sink: None,
            interrupt: None,
        }
    }
}

impl<'a, P, Q, M> Simplex<'a, P, Q, M>
where
    P: Density,
    Q: Density,
    M: Measure<X = P::Support, Y = Q::Support>,
{
    pub fn config(self, config: Config) -> Self {
        Self { config, ..self }
    }
    /// Reports trace events at the configured verbosity.
    pub fn sink(self, sink: &'a mut dyn Sink) -> Self {
        Self {
            sink: Some(sink),
            ..self
        }
    }
    /// Abandons the solve once `flag` is raised, checked between pivots.
    pub fn interrupt(self, flag: &'a AtomicBool) -> Self {
        Self {
            interrupt: Some(flag),
            ..self
        }
    }

    /// Solves for the optimal plan.
    ///
    /// Inputs are checked before any solving: both densities need at least
    /// one bin, finite non-negative weights and positive total mass, and
    /// every ground distance must be finite and non-negative.
    pub fn minimize(self) -> Result<Plan<P::Support, Q::Support>, EmdError> {
        self.config.validate()?;
        let (source, supply) = Self::unzip("source", self.source.bins())?;
        let (target, demand) = Self::unzip("target", self.target.bins())?;
        let measure = self.measure;
        let cost = Grid::build(source.len(), target.len(), |i, j| {
            let distance = measure.distance(&source[i], &target[j]);
            if distance.is_finite() && distance >= 0. {
                Ok(distance)
            } else {
                Err(EmdError::Configuration(format!(
                    "distance between source bin {} and target bin {} is {}",
                    i, j, distance
                )))
            }
        })?;
        log::debug!(
            "solving {}×{} problem, max distance {:.6}",
            source.len(),
            target.len(),
            cost.max()
        );
        let balance = Balance::new(cost, supply, demand, self.config.epsilon);
        let optimum = Tableau::new(balance, self.config, self.sink, self.interrupt)?.solve()?;
        Ok(Plan::new(source, target, optimum))
    }

    /// Splits bins into labels and weights, rejecting unusable weights.
    fn unzip<T, I>(side: &str, bins: I) -> Result<(Vec<T>, Vec<Mass>), EmdError>
    where
        I: Iterator<Item = (T, Mass)>,
    {
        let (labels, weights): (Vec<T>, Vec<Mass>) = bins.unzip();
        if labels.is_empty() {
            return Err(EmdError::Configuration(format!("{} signature is empty", side)));
        }
        if let Some((k, w)) = weights
            .iter()
            .enumerate()
            .find(|(_, w)| !w.is_finite() || **w < 0.)
        {
            return Err(EmdError::Configuration(format!(
                "{} bin {} has weight {}",
                side, k, w
            )));
        }
        if weights.iter().all(|w| *w == 0.) {
            return Err(EmdError::Configuration(format!(
                "{} signature has no mass",
                side
            )));
        }
        Ok((labels, weights))
    }
}

/// Earth Mover's Distance between `source` and `target` under `measure`,
/// with default settings.
pub fn emd<P, Q, M>(source: &P, target: &Q, measure: &M) -> Result<Energy, EmdError>
where
    P: Density,
    Q: Density,
    M: Measure<X = P::Support, Y = Q::Support>,
{
    Simplex::from((source, target, measure))
        .minimize()
        .map(|plan| plan.distance())
}
