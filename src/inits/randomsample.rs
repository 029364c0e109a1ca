use crate::{KMeans, KMeansState, KMeansConfig, Error, Result, point::*};
use rand::prelude::*;
use std::ops::DerefMut;

#[inline(always)] pub fn calculate<'a, T: Primitive>(kmean: &KMeans<T>, state: &mut KMeansState<T>, config: &KMeansConfig<'a, T>) -> Result<()> {
	let chosen = kmean.samples.iter().cloned()
		.choose_multiple(config.rnd.borrow_mut().deref_mut(), state.k);
	if chosen.len() != state.k {
		return Err(Error::invalid_configuration(
			format!("can not sample {} distinct centroids from {} points", state.k, kmean.samples.len())));
	}
	// Copy randomly chosen centroids into state.centroids
	state.centroids = chosen;
	Ok(())
}
