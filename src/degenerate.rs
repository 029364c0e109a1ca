use crate::point::*;

/// Enum with the possible policies for degenerate clusters.
/// A cluster is degenerate when an assignment step left it without any point, so its
/// mean (and thus its new centroid) is undefined.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DegenerateClusterPolicy {
	/// Move the point that is farthest away from its own centroid (and is not alone in its cluster)
	/// into the empty cluster, and center the empty cluster on it. The donor cluster's centroid is
	/// computed without the moved point.
	Reseed,
	/// Abort the calculation with [`crate::Error::DegenerateCluster`].
	Fail
}
impl Default for DegenerateClusterPolicy {
	fn default() -> Self { DegenerateClusterPolicy::Reseed }
}

/// Outcome of recomputing a single centroid as the mean of its points.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CentroidUpdate<T: Primitive> {
	/// The cluster has at least one point; carries the new centroid.
	Healthy(Point<T>),
	/// The cluster with the given index has no points.
	Degenerate(usize)
}
impl<T: Primitive> CentroidUpdate<T> {
	/// Compute the update for cluster **idx**, given the coordinate sum and amount of its points.
	pub(crate) fn from_sum(idx: usize, sum: Point<T>, frequency: usize) -> Self {
		if frequency == 0 {
			return CentroidUpdate::Degenerate(idx);
		}
		// frequency is a usize, which always fits into a float
		let cnt = T::from(frequency).unwrap_or_else(T::infinity);
		CentroidUpdate::Healthy(Point::new(sum.x / cnt, sum.y / cnt))
	}
}
