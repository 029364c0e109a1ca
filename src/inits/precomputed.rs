use crate::{KMeans, KMeansConfig, KMeansState, Error, Result, point::*};

#[inline(always)]
pub fn calculate<T: Primitive>(
    _kmean: &KMeans<T>, state: &mut KMeansState<T>, _config: &KMeansConfig<'_, T>, computed: CentroidSet<T>,
) -> Result<()> {
    if computed.len() != state.k {
        return Err(Error::invalid_configuration(
            format!("initialized with {} centroids, but k is {}", computed.len(), state.k)));
    }
    state.centroids = computed;
    Ok(())
}
