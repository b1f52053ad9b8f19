use super::support::Support;
use crate::Mass;
use std::collections::BTreeMap;
use std::collections::HashMap;
use std::hash::Hash;

/// A discrete weighted distribution over a support set.
///
/// Provides access to the mass at each point and iteration over the
/// support. Weights need not sum to one; the transport solver normalizes
/// by the mass it actually moves.
///
/// # Required Methods
///
/// - [`density`](Density::density): Query mass at a point
/// - [`support`](Density::support): Iterate over points in the distribution
///
/// # Implementations
///
/// Provided for common collection types:
/// - `BTreeMap<T, Mass>`: Ordered map with O(log n) lookup
/// - `HashMap<T, Mass>`: Hash map with O(1) expected lookup
/// - `Vec<(T, Mass)>`: Association list with O(n) lookup
/// - [`Signature`](super::Signature): Ordered association list
pub trait Density {
    /// The type of elements in the distribution's support.
    type Support: Support;
    /// Returns the mass at point `x`, or 0 if not in support.
    fn density(&self, x: &Self::Support) -> Mass;
    /// Iterates over all points in the distribution.
    fn support(&self) -> impl Iterator<Item = Self::Support>;
    /// Iterates over (point, mass) bins in support order.
    fn bins(&self) -> impl Iterator<Item = (Self::Support, Mass)> {
        self.support().map(move |x| {
            let mass = self.density(&x);
            (x, mass)
        })
    }
}

impl<T> Density for BTreeMap<T, Mass>
where
    T: Eq + Ord + Support,
{
    type Support = T;
    fn density(&self, x: &Self::Support) -> Mass {
        self.get(x).cloned().unwrap_or(0.)
    }
    fn support(&self) -> impl Iterator<Item = Self::Support> {
        self.keys().cloned()
    }
    fn bins(&self) -> impl Iterator<Item = (Self::Support, Mass)> {
        self.iter().map(|(x, m)| (x.clone(), *m))
    }
}

impl<T> Density for HashMap<T, Mass>
where
    T: Eq + Hash + Support,
{
    type Support = T;
    fn density(&self, x: &Self::Support) -> Mass {
        self.get(x).cloned().unwrap_or(0.)
    }
    fn support(&self) -> impl Iterator<Item = Self::Support> {
        self.keys().cloned()
    }
    fn bins(&self) -> impl Iterator<Item = (Self::Support, Mass)> {
        self.iter().map(|(x, m)| (x.clone(), *m))
    }
}

impl<T> Density for Vec<(T, Mass)>
where
    T: PartialEq + Support,
{
    type Support = T;
    fn density(&self, x: &Self::Support) -> Mass {
        self.iter()
            .filter(|(a, _)| a == x)
            .map(|(_, m)| m)
            .sum()
    }
    fn support(&self) -> impl Iterator<Item = Self::Support> {
        self.iter().map(|(a, _)| a).cloned()
    }
    fn bins(&self) -> impl Iterator<Item = (Self::Support, Mass)> {
        self.iter().cloned()
    }
}
