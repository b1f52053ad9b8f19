/// Marker trait for types that can label the bins of a distribution.
///
/// A signature's labels can live in any feature space: grid cells, colors,
/// coordinates, strings. The only requirement is that labels can be copied
/// into the transport plan that results from solving a problem.
pub trait Support: Clone {}

impl<T> Support for T where T: Clone {}
