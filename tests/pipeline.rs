use lloyd2d::*;
use rand::prelude::*;

#[test]
fn generate_cluster_render_save() {
    let mut rnd = StdRng::seed_from_u64(1337);
    let points: PointSet<f64> = generate(1000, &mut rnd);

    let kmean = KMeans::new(points);
    let conf = KMeansConfig::build().random_generator(rnd).build();
    let result = kmean.cluster(3, 100, &conf).unwrap();
    assert!(result.epochs <= 100);
    assert!(result.converged || result.epochs == 100);

    let config = RenderConfig::default();
    let image = Renderer::new(config.clone()).render(kmean.samples(), &result.centroids, &result.assignment).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("output.png");
    save(&image, &path).unwrap();

    let written = image::open(&path).unwrap().to_rgb8();
    assert_eq!(written.dimensions(), (512, 512));
    assert_eq!(written, image);
    for color in config.cluster_colors.iter().chain(std::iter::once(&config.center_point_color)) {
        assert!(written.pixels().any(|p| p == color), "color {:?} missing", color);
    }
}

#[test]
fn degenerate_cluster_never_reaches_the_renderer() {
    let points = vec![Point::new(0.1f64, 0.5), Point::new(0.2, 0.5), Point::new(0.3, 0.5)];
    let kmean = KMeans::new(points);
    let init = vec![Point::new(0.2, 0.5), Point::new(50.0, 50.0)];

    let result = kmean.kmeans_lloyd(2, 100, KMeans::<f64>::init_precomputed(init.clone()), &KMeansConfig::default()).unwrap();
    assert_eq!(result.reseeded, vec![(1, 1)]);
    assert!(result.centroids.iter().all(|c| c.is_finite()));
    Renderer::default().render(kmean.samples(), &result.centroids, &result.assignment).unwrap();

    let conf = KMeansConfig::build().degenerate_policy(DegenerateClusterPolicy::Fail).build();
    let err = kmean.kmeans_lloyd(2, 100, KMeans::<f64>::init_precomputed(init), &conf).unwrap_err();
    assert!(matches!(err, Error::DegenerateCluster { index: 1, epoch: 1 }));
}

#[test]
fn unwritable_output_is_a_render_failure() {
    let dir = tempfile::tempdir().unwrap();
    let image = Renderer::default().render::<f32>(&[], &[], &Assignment::empty(0, 0)).unwrap();
    let err = save(&image, dir.path().join("no").join("such").join("dir.png")).unwrap_err();
    assert!(matches!(err, Error::RenderFailure(_)));
}
