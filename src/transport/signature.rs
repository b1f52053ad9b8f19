use super::density::Density;
use super::support::Support;
use crate::Mass;
use std::collections::BTreeMap;

/// A weighted set of feature-space locations.
///
/// A histogram whose bins are arbitrary labels rather than a regular grid.
/// Bin order is insertion order, and it is the order in which the solver
/// sees rows (or columns) of the transportation problem.
///
/// Serializes as a list of `[label, weight]` pairs.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct Signature<T>(Vec<(T, Mass)>);

impl<T> Signature<T> {
    pub fn len(&self) -> usize {
        self.0.len()
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
    /// Total weight across all bins.
    pub fn mass(&self) -> Mass {
        self.0.iter().map(|(_, m)| m).sum()
    }
    /// Uniformly rescale every weight by `k`.
    pub fn scale(mut self, k: Mass) -> Self {
        self.0.iter_mut().for_each(|(_, m)| *m *= k);
        self
    }
    pub fn iter(&self) -> std::slice::Iter<'_, (T, Mass)> {
        self.0.iter()
    }
    pub fn labels(&self) -> impl Iterator<Item = &T> {
        self.0.iter().map(|(x, _)| x)
    }
}

impl<T> Default for Signature<T> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

impl<T> From<Vec<(T, Mass)>> for Signature<T> {
    fn from(bins: Vec<(T, Mass)>) -> Self {
        Self(bins)
    }
}

impl<T> From<BTreeMap<T, Mass>> for Signature<T> {
    fn from(map: BTreeMap<T, Mass>) -> Self {
        Self(map.into_iter().collect())
    }
}

impl<T> FromIterator<(T, Mass)> for Signature<T> {
    fn from_iter<I: IntoIterator<Item = (T, Mass)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<T> Density for Signature<T>
where
    T: PartialEq + Support,
{
    type Support = T;
    fn density(&self, x: &Self::Support) -> Mass {
        self.0
            .iter()
            .filter(|(a, _)| a == x)
            .map(|(_, m)| m)
            .sum()
    }
    fn support(&self) -> impl Iterator<Item = Self::Support> {
        self.labels().cloned()
    }
    fn bins(&self) -> impl Iterator<Item = (Self::Support, Mass)> {
        self.0.iter().cloned()
    }
}
