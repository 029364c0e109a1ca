//! # lloyd2d - API documentation
//!
//! lloyd2d is a small rust library (and binary) that clusters a synthetic 2-D point set using
//! Lloyd's k-means algorithm, and renders the resulting partition as a raster image.
//!
//! ## Pipeline
//! The crate consists of three stages, that are composed in a strict pipeline:
//! - **Point source** ([`generate`]): draws points uniformly from the unit square `[0,1)×[0,1)`
//! - **K-Means engine** ([`KMeans`]): iteratively assigns points to their nearest centroid and moves
//!   each centroid to the mean of its points, until the [`Assignment`] stops changing
//! - **Renderer** ([`Renderer`]): draws points in the color of their cluster and the centroids on top
//!
//! ## Termination
//! An epoch consists of an assignment step and an update step. The calculation stops once
//! two consecutive assignment steps produce exactly the same [`Assignment`] (which can not happen
//! in the first epoch, since it is compared against the all-zero assignment), or when the given
//! epoch limit is reached.
//!
//! ## Empty clusters
//! When a cluster ends up without any point, its mean is undefined. Instead of letting this turn
//! into NaN coordinates, the engine applies a [`DegenerateClusterPolicy`]: either reseed the cluster
//! with a point from another cluster (default), or fail with [`Error::DegenerateCluster`].
//!
//! ## Supported primitive types
//! - [`f32`]
//! - [`f64`]
//!
//! ## Example
//! ```rust
//! use lloyd2d::*;
//! use rand::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let (sample_cnt, k, max_epochs) = (1000, 3, 100);
//!     let mut rnd = StdRng::seed_from_u64(1337);
//!
//!     // Generate some random data
//!     let points: PointSet<f64> = generate(sample_cnt, &mut rnd);
//!
//!     // Calculate kmeans, using Forgy as initialization-method
//!     let kmean = KMeans::new(points);
//!     let conf = KMeansConfig::build().random_generator(rnd).build();
//!     let result = kmean.cluster(k, max_epochs, &conf)?;
//!     println!("Converged: {} after {} epochs", result.converged, result.epochs);
//!
//!     // Draw the result
//!     let image = Renderer::default().render(kmean.samples(), &result.centroids, &result.assignment)?;
//!     assert_eq!(image.dimensions(), (512, 512));
//!     Ok(())
//! }
//! ```
//!
//! ## Example (using the status event callbacks)
//! ```rust
//! use lloyd2d::*;
//! use rand::prelude::*;
//!
//! let mut rnd = StdRng::seed_from_u64(42);
//! let points: PointSet<f32> = generate(1000, &mut rnd);
//!
//! let conf = KMeansConfig::<f32>::build()
//!     .init_done(&|_| println!("Initialization completed."))
//!     .iteration_done(&|s, nr, new_distsum|
//!         println!("Epoch {} - Error: {:.2} -> {:.2} | Improvement: {:.2}",
//!             nr, s.distsum, new_distsum, s.distsum - new_distsum))
//!     .degenerate_policy(DegenerateClusterPolicy::Fail)
//!     .random_generator(rnd)
//!     .build();
//!
//! let kmean = KMeans::new(points);
//! match kmean.cluster(3, 100, &conf) {
//!     Ok(result) => println!("Centroids: {:?}", result.centroids),
//!     Err(Error::DegenerateCluster { index, epoch }) => println!("Cluster {} ran empty in epoch {}", index, epoch),
//!     Err(e) => panic!("{}", e),
//! }
//! ```

#[macro_use] mod helpers;
mod point;
mod assignment;
mod api;
mod variants;
mod inits;
mod degenerate;
mod source;
mod render;
pub mod error;

pub use point::{Primitive, Point, PointSet, CentroidSet};
pub use assignment::Assignment;
pub use api::{KMeansState, KMeansConfig, KMeansConfigBuilder, KMeans, InitDoneCallbackFn, IterationDoneCallbackFn};
pub use degenerate::{DegenerateClusterPolicy, CentroidUpdate};
pub use source::generate;
pub use render::{Renderer, RenderConfig, save};
pub use error::{Error, Result};
