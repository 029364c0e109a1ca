use crate::{KMeans, KMeansState, KMeansConfig, CentroidUpdate, DegenerateClusterPolicy, Error, Result, point::*};
use std::cmp::Ordering;

pub(crate) struct Lloyd<T: Primitive> {
	_p: std::marker::PhantomData<T>
}
impl<T: Primitive> Lloyd<T> {
    /// Mean of every cluster, tagged as healthy or degenerate (empty).
    fn cluster_means(sums: &[Point<T>], frequencies: &[usize]) -> Vec<CentroidUpdate<T>> {
        sums.iter().cloned()
            .zip(frequencies.iter().cloned())
            .enumerate()
            .map(|(idx, (sum, frequency))| CentroidUpdate::from_sum(idx, sum, frequency))
            .collect()
    }

    /// Move the point farthest away from its centroid, that is not alone in its cluster and does not
    /// coincide with any point in **occupied**, into the empty cluster **empty_idx**.
    /// Returns the moved point's index and its previous centroid distance, or `None` if there is no such point.
    fn reseed(data: &KMeans<T>, state: &mut KMeansState<T>, sums: &mut [Point<T>], distance_sorted_samples: &[usize],
                occupied: &[Point<T>], empty_idx: usize) -> Result<Option<(usize, T)>> {
        // A point sitting on another centroid would lose the tie against it in the next assignment step
        let donor = distance_sorted_samples.iter().rev().cloned()
            .filter(|&sample_id| !occupied.contains(&data.samples[sample_id]))
            .find(|&sample_id| state.assignment.cluster_of(sample_id)
                .map_or(false, |prev_centroid_id| state.centroid_frequency[prev_centroid_id] > 1));
        let sample_id = match donor {
            Some(sample_id) => sample_id,
            None => return Ok(None)
        };
        let prev_centroid_id = state.assignment.cluster_of(sample_id)
            .ok_or(Error::UnassignedPoint { index: sample_id })?;
        let sample = data.samples[sample_id];

        // Re-Assign found sample to centroid without any samples
        state.centroid_frequency[prev_centroid_id] -= 1;
        state.centroid_frequency[empty_idx] += 1;
        // sums are the sum of all points within a cluster here.
        sums[prev_centroid_id].x -= sample.x;
        sums[prev_centroid_id].y -= sample.y;
        sums[empty_idx] = sample;
        // Centroid is moved into the chosen point -> the points centroid distance is 0
        let removed_distance = std::mem::replace(&mut state.centroid_distances[sample_id], T::zero());
        state.assignment.assign(sample_id, empty_idx);
        Ok(Some((sample_id, removed_distance)))
    }

    /// Update step: move every centroid to the mean of its assigned points.
    /// **epoch** is the number of the running epoch, starting at 1.
    /// ## Returns
    /// The new distance sum (sum of squared distances to the assigned centroids).
    fn update_centroids(data: &KMeans<T>, state: &mut KMeansState<T>, epoch: usize, config: &KMeansConfig<'_, T>) -> Result<T> {
        // Sum all samples in a cluster together
        let mut sums = vec![Point::<T>::default(); state.k];
        data.samples.iter()
            .zip(state.assignment.labels())
            .for_each(|(s, label)| if let Some(centroid_id) = label {
                sums[centroid_id].x += s.x;
                sums[centroid_id].y += s.y;
            });
        state.centroid_frequency = state.assignment.cluster_frequencies();
        let mut new_distsum: T = state.centroid_distances.iter().map(|d| *d * *d).sum();

        let mut updates = Self::cluster_means(&sums, &state.centroid_frequency);
        let degenerate: Vec<usize> = updates.iter()
            .filter_map(|u| match u { CentroidUpdate::Degenerate(idx) => Some(*idx), _ => None })
            .collect();
        if !degenerate.is_empty() {
            match config.degenerate_policy {
                DegenerateClusterPolicy::Fail => {
                    return Err(Error::DegenerateCluster { index: degenerate[0], epoch });
                },
                DegenerateClusterPolicy::Reseed => {
                    let mut occupied: Vec<Point<T>> = state.centroids.iter().cloned()
                        .chain(updates.iter().filter_map(|u| match u { CentroidUpdate::Healthy(c) => Some(*c), _ => None }))
                        .collect();
                    let mut distance_sorted_samples: Vec<usize> = (0..data.sample_cnt()).collect();
                    distance_sorted_samples.sort_by(|&i1, &i2| state.centroid_distances[i1]
                        .partial_cmp(&state.centroid_distances[i2]).unwrap_or(Ordering::Equal));
                    let mut dead = Vec::new();
                    for empty_idx in degenerate {
                        match Self::reseed(data, state, &mut sums, &distance_sorted_samples, &occupied, empty_idx)? {
                            Some((sample_id, removed_distance)) => {
                                new_distsum -= removed_distance * removed_distance;
                                occupied.push(data.samples[sample_id]);
                                state.reseeded.push((epoch, empty_idx));
                                log::warn!("epoch {}: cluster {} ran empty, reseeded with point {}", epoch, empty_idx, sample_id);
                            },
                            None => {
                                state.dead.push((epoch, empty_idx));
                                dead.push(empty_idx);
                                log::warn!("epoch {}: cluster {} ran empty and every candidate point coincides with a centroid, keeping it in place", epoch, empty_idx);
                            }
                        }
                    }
                    updates = Self::cluster_means(&sums, &state.centroid_frequency);
                    // dead clusters keep their previous (finite) centroid
                    for empty_idx in dead {
                        updates[empty_idx] = CentroidUpdate::Healthy(state.centroids[empty_idx]);
                    }
                }
            }
        }

        state.centroids = updates.into_iter()
            .map(|u| match u {
                CentroidUpdate::Healthy(centroid) => Ok(centroid),
                CentroidUpdate::Degenerate(index) => Err(Error::DegenerateCluster { index, epoch })
            })
            .collect::<Result<CentroidSet<T>>>()?;
        Ok(new_distsum)
    }

    pub fn calculate<'a, F>(data: &KMeans<T>, k: usize, max_epochs: usize, init: F, config: &KMeansConfig<'a, T>) -> Result<KMeansState<T>>
                where for<'c> F: FnOnce(&KMeans<T>, &mut KMeansState<T>, &KMeansConfig<'c, T>) -> Result<()> {
        data.validate(k, max_epochs)?;

        let mut state = KMeansState::new(data.sample_cnt(), k);
        state.distsum = T::infinity();

        // Initialize clusters and notify subscriber
        init(data, &mut state, config)?;
        (config.init_done)(&state);

        for epoch in 0..max_epochs {
            let (assignment, centroid_distances) = data.assignment_step(&state.centroids)?;
            state.centroid_distances = centroid_distances;
            // First epoch compares against the all-zero assignment and can never converge
            if assignment == state.assignment {
                state.converged = true;
                state.epochs = epoch;
                log::info!("converged in {} epochs", epoch);
                break;
            }
            state.assignment = assignment;

            let new_distsum = Self::update_centroids(data, &mut state, epoch + 1, config)?;
            state.epochs = epoch + 1;
            log::debug!("epoch {} - distsum: {:.6} -> {:.6}", epoch + 1, state.distsum, new_distsum);

            // Notify subscriber about finished epoch
            (config.iteration_done)(&state, epoch + 1, new_distsum);
            state.distsum = new_distsum;
        }
        if !state.converged {
            log::info!("stopped after reaching the limit of {} epochs", max_epochs);
        }

        state.centroid_frequency = state.assignment.cluster_frequencies();
        data.update_centroid_distances(&mut state);
        state.distsum = state.centroid_distances.iter().map(|d| *d * *d).sum();
        Ok(state)
    }
}
