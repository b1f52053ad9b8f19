use super::measure::Measure;
use super::support::Support;
use crate::Energy;
use std::marker::PhantomData;

/// A ground [`Measure`] backed by an arbitrary distance function.
///
/// Lets any `Fn(&X, &Y) -> Energy` price a transport problem without a
/// dedicated type. The function is shared by reference, so a `Ground` over
/// a `Sync` closure can price independent solves on separate threads.
pub struct Ground<X, Y, F> {
    f: F,
    marker: PhantomData<fn(&X, &Y)>,
}

impl<X, Y, F> From<F> for Ground<X, Y, F>
where
    F: Fn(&X, &Y) -> Energy,
{
    fn from(f: F) -> Self {
        Self {
            f,
            marker: PhantomData,
        }
    }
}

impl<X, Y, F> Measure for Ground<X, Y, F>
where
    X: Support,
    Y: Support,
    F: Fn(&X, &Y) -> Energy,
{
    type X = X;
    type Y = Y;
    fn distance(&self, x: &Self::X, y: &Self::Y) -> Energy {
        (self.f)(x, y)
    }
}
