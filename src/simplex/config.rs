use super::error::EmdError;
use super::verbosity::Verbosity;
use crate::Energy;

/// Solver settings for one EMD computation.
///
/// Defaults come from the crate constants. Settings can be layered from the
/// environment with [`Config::from_env`]:
///
/// - `EMD_EPSILON`: relative tolerance
/// - `EMD_ITERATIONS`: pivot cap
/// - `EMD_VERBOSITY`: trace level (name or 0-4)
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Config {
    /// Relative tolerance for mass balancing and the optimality test.
    /// Scaled by total mass or by the largest ground distance.
    pub epsilon: Energy,
    /// Maximum number of pivots.
    pub iterations: usize,
    /// Trace level for an attached sink.
    pub verbosity: Verbosity,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            epsilon: crate::EMD_EPSILON,
            iterations: crate::EMD_ITERATIONS,
            verbosity: Verbosity::None,
        }
    }
}

impl Config {
    pub fn epsilon(self, epsilon: Energy) -> Self {
        Self { epsilon, ..self }
    }
    pub fn iterations(self, iterations: usize) -> Self {
        Self { iterations, ..self }
    }
    pub fn verbosity(self, verbosity: Verbosity) -> Self {
        Self { verbosity, ..self }
    }

    /// Rejects settings the solver cannot run with.
    pub fn validate(&self) -> Result<(), EmdError> {
        if self.iterations == 0 {
            return Err(EmdError::Configuration(
                "iterations must be positive".to_string(),
            ));
        }
        if self.epsilon.is_nan() || self.epsilon < 0. {
            return Err(EmdError::Configuration(format!(
                "epsilon must be non-negative, got {}",
                self.epsilon
            )));
        }
        Ok(())
    }

    /// Defaults overridden by any `EMD_*` environment variables.
    pub fn from_env() -> Result<Self, EmdError> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by whichever keys `lookup` resolves.
    pub fn from_vars<F>(lookup: F) -> Result<Self, EmdError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(epsilon) = Self::parse(&lookup, "EMD_EPSILON")? {
            config.epsilon = epsilon;
        }
        if let Some(iterations) = Self::parse(&lookup, "EMD_ITERATIONS")? {
            config.iterations = iterations;
        }
        if let Some(verbosity) = Self::parse(&lookup, "EMD_VERBOSITY")? {
            config.verbosity = verbosity;
        }
        config.validate()?;
        Ok(config)
    }

    fn parse<F, T>(lookup: &F, key: &str) -> Result<Option<T>, EmdError>
    where
        F: Fn(&str) -> Option<String>,
        T: std::str::FromStr,
        T::Err: std::fmt::Display,
    {
        lookup(key)
            .map(|value| {
                value
                    .trim()
                    .parse::<T>()
                    .map_err(|e| EmdError::Configuration(format!("{}={}: {}", key, value, e)))
            })
            .transpose()
    }
}
