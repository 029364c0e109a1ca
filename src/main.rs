use anyhow::{Context, Result};
use env_logger::Env;
use lloyd2d::{generate, save, KMeans, KMeansConfig, PointSet, RenderConfig, Renderer};
use rand::prelude::*;

// Algorithm parameters
const K: usize = 3;
const NUMBER_OF_POINTS: usize = 1000;
const MAX_EPOCHS: usize = 100;
const SEED: u64 = 1337;

const OUTPUT_PATH: &str = "output.png";

fn termination_message(converged: bool, epochs: usize, max_epochs: usize) -> String {
    if converged {
        format!("Converged in {} epochs.", epochs)
    } else {
        format!("Reached the epoch limit of {} epochs without converging.", max_epochs)
    }
}

fn main() -> Result<()> {
    let env = Env::default().filter_or("RUST_LOG", "info");
    env_logger::init_from_env(env);

    let mut rnd = StdRng::seed_from_u64(SEED);
    let points: PointSet<f64> = generate(NUMBER_OF_POINTS, &mut rnd);

    let kmean = KMeans::new(points);
    let conf = KMeansConfig::build().random_generator(rnd).build();
    let result = kmean.cluster(K, MAX_EPOCHS, &conf)
        .context("k-means clustering failed")?;

    println!("{}", termination_message(result.converged, result.epochs, MAX_EPOCHS));

    let renderer = Renderer::new(RenderConfig::default());
    let image = renderer.render(kmean.samples(), &result.centroids, &result.assignment)
        .context("failed to render clustering result")?;
    save(&image, OUTPUT_PATH)
        .with_context(|| format!("failed to write {}", OUTPUT_PATH))?;
    Ok(())
}
