use crate::Arbitrary;
use crate::Energy;
use crate::Signature;

/// A location in ℝⁿ.
///
/// Serializes as a bare coordinate list.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct Point(Vec<Energy>);

impl Point {
    pub fn dimension(&self) -> usize {
        self.0.len()
    }
    pub fn coordinates(&self) -> &[Energy] {
        &self.0
    }
}

impl From<Vec<Energy>> for Point {
    fn from(coordinates: Vec<Energy>) -> Self {
        Self(coordinates)
    }
}

impl<const N: usize> From<[Energy; N]> for Point {
    fn from(coordinates: [Energy; N]) -> Self {
        Self(coordinates.to_vec())
    }
}

impl Arbitrary for Point {
    fn random() -> Self {
        Self(
            (0..crate::ARBITRARY_DIMENSIONS)
                .map(|_| rand::random::<Energy>())
                .collect(),
        )
    }
}

/// Random signature over the unit square, with between one and
/// `ARBITRARY_BINS` bins of strictly positive weight.
impl Arbitrary for Signature<Point> {
    fn random() -> Self {
        (0..rand::random_range(1..=crate::ARBITRARY_BINS))
            .map(|_| (Point::random(), 1. - rand::random::<Energy>()))
            .collect()
    }
}
