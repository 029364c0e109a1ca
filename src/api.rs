use crate::{point::*, Assignment, DegenerateClusterPolicy, Error, Result};
use std::cell::RefCell;
use rayon::prelude::*;
use rand::prelude::*;

pub type InitDoneCallbackFn<'a, T> = &'a dyn Fn(&KMeansState<T>);
pub type IterationDoneCallbackFn<'a, T> = &'a dyn Fn(&KMeansState<T>, usize, T);

/// This is a structure holding various configuration options for a k-means calculation, such as
/// the random number generator to use, the policy for empty clusters, or a couple of callbacks,
/// that can be set to get status information from a running k-means calculation.
///
/// For a more detailed information about all possible options, have a look at [`KMeansConfigBuilder`].
pub struct KMeansConfig<'a, T: Primitive> {
    /// Callback that is called, when the initialization phase finished
    /// ## Arguments
    /// - **state**: Current [`KMeansState`] after the initialization
    pub(crate) init_done: InitDoneCallbackFn<'a, T>,
    /// Callback that is called after each completed epoch (assignment + update)
    /// ## Arguments
    /// - **state**: Current [`KMeansState`] after the epoch
    /// - **epoch**: Number of the completed epoch (starting at 1)
    /// - **distsum**: New distance sum (**state** contains the distsum from the previous epoch)
    pub(crate) iteration_done: IterationDoneCallbackFn<'a, T>,
    /// Random number generator to use
    pub(crate) rnd: Box<RefCell<dyn RngCore>>,
    /// What to do with clusters that lost all of their points
    pub(crate) degenerate_policy: DegenerateClusterPolicy
}
impl<'a, T: Primitive> Default for KMeansConfig<'a, T> {
    fn default() -> Self {
        Self {
            init_done: &|_| {},
            iteration_done: &|_,_,_| {},
            rnd: Box::new(RefCell::new(rand::thread_rng())),
            degenerate_policy: DegenerateClusterPolicy::default()
        }
    }
}
impl<'a, T: Primitive> KMeansConfig<'a, T> {
    /// Use the [`KMeansConfigBuilder`] to build a [`KMeansConfig`] instance.
    pub fn build() -> KMeansConfigBuilder<'a, T> {
        KMeansConfigBuilder { config: KMeansConfig::default() }
    }
}
impl<'a, T: Primitive> std::fmt::Debug for KMeansConfig<'a, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KMeansConfig")
            .field("degenerate_policy", &self.degenerate_policy)
            .finish_non_exhaustive()
    }
}

pub struct KMeansConfigBuilder<'a, T: Primitive> {
    config: KMeansConfig<'a, T>
}
impl<'a, T: Primitive> KMeansConfigBuilder<'a, T> {
    /// Set the callback that should be called after the centroid initialization, before the first epoch.
    pub fn init_done(mut self, init_done: InitDoneCallbackFn<'a, T>) -> Self {
        self.config.init_done = init_done; self
    }
    /// Set the callback that should be called after each epoch during a running k-means calculation.
    pub fn iteration_done(mut self, iteration_done: IterationDoneCallbackFn<'a, T>) -> Self {
        self.config.iteration_done = iteration_done; self
    }
    /// Set the random number generator that should be used in the k-means calculation.
    /// Use a seeded generator for deterministically repeatable results.
    pub fn random_generator<R: RngCore + 'static>(mut self, rnd: R) -> Self {
        self.config.rnd = Box::new(RefCell::new(rnd)); self
    }
    /// Set the policy for clusters that end up without any point. For more information,
    /// see documentation of [`DegenerateClusterPolicy`].
    /// ## Default
    /// [`DegenerateClusterPolicy::Reseed`]
    pub fn degenerate_policy(mut self, degenerate_policy: DegenerateClusterPolicy) -> Self {
        self.config.degenerate_policy = degenerate_policy; self
    }
    /// Return the internally built configuration structure.
    pub fn build(self) -> KMeansConfig<'a, T> { self.config }
}


/// This is the internally used data-structure, storing the current state during calculation, as
/// well as the final result, as returned by the API.
/// All mutations are done in this structure, making [`KMeans`] immutable.
///
/// ## Generics
/// - **T**: Underlying primitive type that was used for the calculation
///
/// ## Fields
/// - **k**: The amount of clusters that were requested when calculating this k-means result
/// - **distsum**: The total sum of squared distances from all points to their respective centroids
/// - **centroids**: Calculated cluster centers, one per cluster index
/// - **centroid_frequency**: Amount of points in each cluster
/// - **assignment**: `N×K` indicator matrix mapping each point to its cluster
/// - **centroid_distances**: Each point's (euclidean) distance to its centroid
/// - **epochs**: Amount of completed epochs (assignment + update steps)
/// - **converged**: Whether two consecutive assignment steps produced the same [`Assignment`]
///   before the epoch limit was hit
/// - **reseeded**: `(epoch, cluster)` pairs of empty clusters that were reseeded
/// - **dead**: `(epoch, cluster)` pairs of empty clusters for which every candidate point coincided
///   with a centroid. These keep their previous centroid and stay empty.
///
/// Epochs in **reseeded** and **dead** are numbered like in [`IterationDoneCallbackFn`], starting at 1.
#[derive(Clone, Debug)]
pub struct KMeansState<T: Primitive> {
    pub k: usize,
    pub distsum: T,
    pub centroids: CentroidSet<T>,
    pub centroid_frequency: Vec<usize>,
    pub assignment: Assignment,
    pub centroid_distances: Vec<T>,
    pub epochs: usize,
    pub converged: bool,
    pub reseeded: Vec<(usize, usize)>,
    pub dead: Vec<(usize, usize)>
}
impl<T: Primitive> KMeansState<T> {
    pub(crate) fn new(sample_cnt: usize, k: usize) -> Self {
        Self {
            k,
            distsum: T::zero(),
            centroids: vec![Point::default(); k],
            centroid_frequency: vec![0usize;k],
            assignment: Assignment::empty(sample_cnt, k),
            centroid_distances: vec![T::infinity();sample_cnt],
            epochs: 0,
            converged: false,
            reseeded: Vec::new(),
            dead: Vec::new()
        }
    }
}


/// Find the centroid closest to **sample**.
/// Ties are resolved in favor of the lowest centroid index (strict `<` against the running minimum).
/// Returns `None` if no distance is below `+∞`. For finite points this only happens with non-finite
/// centroids, or when a coordinate difference itself overflows the primitive type.
pub(crate) fn nearest_centroid<T: Primitive>(sample: &Point<T>, centroids: &[Point<T>]) -> Option<(usize, T)> {
    let mut min_distance = T::infinity();
    let mut best = None;
    for (idx, centroid) in centroids.iter().enumerate() {
        let distance = sample.distance(centroid);
        if distance < min_distance {
            min_distance = distance;
            best = Some((idx, distance));
        }
    }
    best
}


/// Entrypoint of this crate's clustering API-Surface.
///
/// Create an instance of this struct, giving the points you want to operate on. The primitive type
/// of the passed points will be the type used internaly for all calculations, as well as the result
/// as stored in the returned [`KMeansState`] structure.
///
/// ## Supported initialization methods
/// - Forgy / Random-Sample [`KMeans::init_forgy`]
/// - Precomputed [`KMeans::init_precomputed`]
pub struct KMeans<T: Primitive> {
    pub(crate) samples: PointSet<T>
}
impl<T: Primitive> KMeans<T> {
    /// Create a new instance of the [`KMeans`] structure, taking ownership of **samples**.
    pub fn new(samples: PointSet<T>) -> Self {
        Self { samples }
    }

    pub fn samples(&self) -> &[Point<T>] { &self.samples }
    pub fn sample_cnt(&self) -> usize { self.samples.len() }

    /// Single assignment step: map every point to its nearest centroid in **centroids**.
    ///
    /// ## Returns
    /// The resulting [`Assignment`] together with each point's distance to its centroid.
    ///
    /// ## Errors
    /// [`Error::UnassignedPoint`] for the first point that has no nearest centroid.
    pub fn assignment_step(&self, centroids: &[Point<T>]) -> Result<(Assignment, Vec<T>)> {
        // manually calculate work-packet size, because rayon does not do static scheduling (which is more apropriate here)
        let work_packet_size = (self.samples.len() / rayon::current_num_threads()).max(1);
        let nearest: Vec<Option<(usize, T)>> = self.samples.par_iter()
            .with_min_len(work_packet_size)
            .map(|s| nearest_centroid(s, centroids))
            .collect();

        let mut assignment = Assignment::empty(self.samples.len(), centroids.len());
        let mut centroid_distances = Vec::with_capacity(self.samples.len());
        for (index, best) in nearest.into_iter().enumerate() {
            let (centroid_id, distance) = best.ok_or(Error::UnassignedPoint { index })?;
            assignment.assign(index, centroid_id);
            centroid_distances.push(distance);
        }
        Ok((assignment, centroid_distances))
    }

    /// Recalculate each point's distance to the centroid it is currently assigned to.
    pub(crate) fn update_centroid_distances(&self, state: &mut KMeansState<T>) {
        let (centroids, assignment) = (&state.centroids, &state.assignment);
        self.samples.iter()
            .zip(assignment.labels())
            .zip(state.centroid_distances.iter_mut())
            .for_each(|((s, label), centroid_dist)| {
                *centroid_dist = match label {
                    Some(c) => s.distance(&centroids[c]),
                    None => T::infinity()
                };
            });
    }

    pub(crate) fn validate(&self, k: usize, max_epochs: usize) -> Result<()> {
        if self.samples.is_empty() {
            return Err(Error::invalid_configuration("at least one point is required"));
        }
        if k == 0 {
            return Err(Error::invalid_configuration("k must be at least 1"));
        }
        if k > self.samples.len() {
            return Err(Error::invalid_configuration(
                format!("k ({}) must not exceed the amount of points ({})", k, self.samples.len())));
        }
        if max_epochs == 0 {
            return Err(Error::invalid_configuration("max_epochs must be at least 1"));
        }
        if let Some(index) = self.samples.iter().position(|s| !s.is_finite()) {
            return Err(Error::NonFiniteCoordinate { index });
        }
        Ok(())
    }


    /// Lloyd's k-means, initialized with [`KMeans::init_forgy`].
    ///
    /// ## Arguments
    /// - **k**: Amount of clusters to search for
    /// - **max_epochs**: Hard limit for the amount of epochs
    /// - **config**: [`KMeansConfig`] instance, containing several configuration options for the calculation.
    ///
    /// ## Returns
    /// Instance of [`KMeansState`], containing the final state (result).
    ///
    /// ## Example
    /// ```rust
    /// use lloyd2d::*;
    /// use rand::prelude::*;
    ///
    /// let mut rnd = rand::rngs::StdRng::seed_from_u64(1337);
    /// let points: PointSet<f64> = generate(1000, &mut rnd);
    ///
    /// let kmean = KMeans::new(points);
    /// let conf = KMeansConfig::build().random_generator(rnd).build();
    /// let result = kmean.cluster(3, 100, &conf).unwrap();
    ///
    /// println!("Centroids: {:?}", result.centroids);
    /// println!("Epochs: {} (converged: {})", result.epochs, result.converged);
    /// ```
    pub fn cluster<'a>(&self, k: usize, max_epochs: usize, config: &KMeansConfig<'a, T>) -> Result<KMeansState<T>> {
        self.kmeans_lloyd(k, max_epochs, KMeans::init_forgy, config)
    }

    /// Lloyd's k-means with an explicit initialization method.
    ///
    /// Every epoch assigns each point to its nearest centroid and stops as soon as the new
    /// [`Assignment`] equals the previous one. Otherwise, every centroid is moved to the mean of
    /// its points. Empty clusters are handled according to the configured [`DegenerateClusterPolicy`].
    ///
    /// ## Arguments
    /// - **k**: Amount of clusters to search for
    /// - **max_epochs**: Hard limit for the amount of epochs
    /// - **init**: Initialization-Method to use for the initialization of the **k** centroids
    /// - **config**: [`KMeansConfig`] instance, containing several configuration options for the calculation.
    ///
    /// ## Errors
    /// - [`Error::InvalidConfiguration`] if `k == 0`, `k > sample_cnt`, there are no points or `max_epochs == 0`
    /// - [`Error::NonFiniteCoordinate`] if a point has a NaN / infinite coordinate
    /// - [`Error::DegenerateCluster`] if a cluster ran empty and the policy is [`DegenerateClusterPolicy::Fail`]
    /// - [`Error::UnassignedPoint`] if a point has no nearest centroid (non-finite centroids)
    pub fn kmeans_lloyd<'a, F>(&self, k: usize, max_epochs: usize, init: F, config: &KMeansConfig<'a, T>) -> Result<KMeansState<T>>
                where for<'c> F: FnOnce(&KMeans<T>, &mut KMeansState<T>, &KMeansConfig<'c, T>) -> Result<()> {
        crate::variants::Lloyd::calculate(self, k, max_epochs, init, config)
    }

    /// Random sample initialization method (a.k.a. Forgy)
    ///
    /// ## Description
    /// This initialization method randomly selects k distinct points (without replacement) as initial centroids.
    ///
    /// ## Note
    /// This method is not meant for direct invocation. Pass a reference to it, to an instance-method of [`KMeans`].
    pub fn init_forgy<'a>(kmean: &KMeans<T>, state: &mut KMeansState<T>, config: &KMeansConfig<'a, T>) -> Result<()> {
        crate::inits::randomsample::calculate(kmean, state, config)
    }

    /// Precomputed initialization method
    ///
    /// ## Description
    /// Use the given **centroids** as initial centroids. Their amount has to match k.
    pub fn init_precomputed(centroids: CentroidSet<T>)
            -> impl for<'c> FnOnce(&KMeans<T>, &mut KMeansState<T>, &KMeansConfig<'c, T>) -> Result<()> {
        move |kmean, state, config| {
            crate::inits::precomputed::calculate(kmean, state, config, centroids)
        }
    }
}
