use thiserror::Error;

/// Errors returned by the clustering engine and the renderer.
#[derive(Debug, Error)]
pub enum Error {
    /// The requested run can not be started with the given parameters
    /// (e.g. `k > sample_cnt`, `k == 0`, no samples, `max_epochs == 0`).
    #[error("invalid configuration: {message}")]
    InvalidConfiguration {
        /// Human-readable explanation.
        message: String,
    },

    /// An input point has a NaN or infinite coordinate.
    #[error("point {index} has a non-finite coordinate")]
    NonFiniteCoordinate {
        /// Index of the offending point.
        index: usize,
    },

    /// A centroid lost all of its points and the configured policy is
    /// [`DegenerateClusterPolicy::Fail`](crate::DegenerateClusterPolicy::Fail).
    #[error("centroid {index} has no assigned points after epoch {epoch}")]
    DegenerateCluster {
        /// Index of the empty cluster.
        index: usize,
        /// Epoch (starting at 1, like the `iteration_done` callback) whose update step found the empty cluster.
        epoch: usize,
    },

    /// A point has no nearest centroid. Only reachable with non-finite centroids, or coordinate
    /// differences beyond the range of the primitive type.
    #[error("point {index} is not assigned to any cluster")]
    UnassignedPoint {
        /// Index of the unassigned point.
        index: usize,
    },

    /// The renderer was asked to place a centroid with a NaN or infinite coordinate.
    #[error("centroid {index} has a non-finite coordinate and can not be drawn")]
    NonFiniteCentroid {
        /// Index of the offending centroid.
        index: usize,
    },

    /// Inputs handed to the renderer disagree in size.
    #[error("dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch {
        /// Expected amount of rows.
        expected: usize,
        /// Found amount of rows.
        found: usize,
    },

    /// The output image could not be encoded or written.
    #[error("failed to write output image: {0}")]
    RenderFailure(#[from] image::ImageError),
}

impl Error {
    pub(crate) fn invalid_configuration(message: impl Into<String>) -> Self {
        Error::InvalidConfiguration { message: message.into() }
    }
}

/// Result type used by this crate.
pub type Result<T> = std::result::Result<T, Error>;
