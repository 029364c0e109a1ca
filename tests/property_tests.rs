use lloyd2d::{Assignment, DegenerateClusterPolicy, KMeans, KMeansConfig, Point};
use proptest::prelude::*;
use rand::prelude::*;

fn points_strategy() -> impl Strategy<Value = Vec<Point<f64>>> {
    prop::collection::vec((0.0f64..1.0, 0.0f64..1.0), 1..60)
        .prop_map(|v| v.into_iter().map(|(x, y)| Point::new(x, y)).collect())
}

proptest! {
    #[test]
    fn prop_kmeans_terminates_with_one_hot_rows(
        points in points_strategy(),
        k in 1usize..6,
        max_epochs in 1usize..30,
        seed in any::<u64>()
    ) {
        // Skip if k > n
        if k <= points.len() {
            let kmean = KMeans::new(points.clone());
            let conf = KMeansConfig::build().random_generator(StdRng::seed_from_u64(seed)).build();
            let res = kmean.cluster(k, max_epochs, &conf).unwrap();

            prop_assert!(res.epochs <= max_epochs);
            prop_assert!(res.converged || res.epochs == max_epochs);
            prop_assert_eq!(res.centroids.len(), k);
            prop_assert_eq!(res.assignment.sample_cnt(), points.len());
            prop_assert!(res.centroids.iter().all(|c| c.is_finite()));
            for n in 0..points.len() {
                prop_assert_eq!(res.assignment.row_sum(n), 1);
            }
            prop_assert_eq!(res.centroid_frequency.iter().sum::<usize>(), points.len());
        }
    }

    #[test]
    fn prop_converged_assignment_is_reproduced(
        points in points_strategy(),
        k in 1usize..5,
        seed in any::<u64>()
    ) {
        if k <= points.len() {
            let kmean = KMeans::new(points);
            let conf = KMeansConfig::build().random_generator(StdRng::seed_from_u64(seed)).build();
            let res = kmean.cluster(k, 500, &conf).unwrap();
            if res.converged {
                let (reassigned, _) = kmean.assignment_step(&res.centroids).unwrap();
                prop_assert_eq!(reassigned, res.assignment);
            }
        }
    }

    #[test]
    fn prop_fail_policy_never_returns_empty_clusters(
        points in points_strategy(),
        k in 1usize..6,
        seed in any::<u64>()
    ) {
        if k <= points.len() {
            let kmean = KMeans::new(points);
            let conf = KMeansConfig::build()
                .random_generator(StdRng::seed_from_u64(seed))
                .degenerate_policy(DegenerateClusterPolicy::Fail)
                .build();
            if let Ok(res) = kmean.cluster(k, 100, &conf) {
                prop_assert!(res.centroid_frequency.iter().all(|f| *f > 0));
            }
        }
    }

    #[test]
    fn prop_single_cluster_converges_after_one_epoch(
        points in points_strategy(),
        shift in -0.001f64..0.001
    ) {
        // one centroid covering everything: moving it slightly keeps the assignment
        let kmean = KMeans::new(points.clone());
        let centroid = Point::new(0.5 + shift, 0.5 - shift);
        let res = kmean.kmeans_lloyd(1, 10, KMeans::<f64>::init_precomputed(vec![centroid]), &KMeansConfig::default()).unwrap();
        prop_assert!(res.converged);
        prop_assert_eq!(res.epochs, 1);
        prop_assert_eq!(res.assignment, Assignment::from_labels(&vec![Some(0); points.len()], 1));
    }
}
