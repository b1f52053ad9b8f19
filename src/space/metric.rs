use super::point::Point;
use crate::Energy;
use crate::Measure;

/// Ground metrics between [`Point`]s.
///
/// Points of different dimension have no distance: it comes out as NaN,
/// which the solver rejects as a configuration error.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    /// L2 distance.
    #[default]
    Euclidean,
    /// L1 distance.
    Manhattan,
    /// L∞ distance.
    Chebyshev,
}

impl Metric {
    fn deltas<'a>(x: &'a Point, y: &'a Point) -> impl Iterator<Item = Energy> + 'a {
        x.coordinates()
            .iter()
            .zip(y.coordinates())
            .map(|(a, b)| (a - b).abs())
    }
}

impl Measure for Metric {
    type X = Point;
    type Y = Point;
    fn distance(&self, x: &Self::X, y: &Self::Y) -> Energy {
        if x.dimension() != y.dimension() {
            return Energy::NAN;
        }
        match self {
            Self::Euclidean => Self::deltas(x, y).map(|d| d * d).sum::<Energy>().sqrt(),
            Self::Manhattan => Self::deltas(x, y).sum::<Energy>(),
            Self::Chebyshev => Self::deltas(x, y).fold(0., Energy::max),
        }
    }
}

impl std::str::FromStr for Metric {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "euclidean" | "l2" => Ok(Self::Euclidean),
            "manhattan" | "l1" => Ok(Self::Manhattan),
            "chebyshev" | "linf" => Ok(Self::Chebyshev),
            other => Err(format!("unknown metric: {}", other)),
        }
    }
}

impl std::fmt::Display for Metric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Euclidean => write!(f, "euclidean"),
            Self::Manhattan => write!(f, "manhattan"),
            Self::Chebyshev => write!(f, "chebyshev"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pythagorean_triple() {
        let ref x = Point::from([0., 0.]);
        let ref y = Point::from([3., 4.]);
        assert!(Metric::Euclidean.distance(x, y) == 5.);
        assert!(Metric::Manhattan.distance(x, y) == 7.);
        assert!(Metric::Chebyshev.distance(x, y) == 4.);
    }
    #[test]
    fn mismatched_dimensions_have_no_distance() {
        let ref x = Point::from([0., 0.]);
        let ref y = Point::from([3., 4., 12.]);
        assert!(Metric::Euclidean.distance(x, y).is_nan());
        assert!(Metric::Manhattan.distance(y, x).is_nan());
        assert!(Metric::Chebyshev.distance(x, y).is_nan());
    }
    #[test]
    fn parses_aliases() {
        assert!("L1".parse::<Metric>() == Ok(Metric::Manhattan));
        assert!("euclidean".parse::<Metric>() == Ok(Metric::Euclidean));
        assert!("cosine".parse::<Metric>().is_err());
    }
}
