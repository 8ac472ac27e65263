#[cfg(test)]
mod tests {
    use rand::{Rng, SeedableRng};
    use tempfile::TempDir;

    use crate::utils::io::{read_csv, write_csv};
    use crate::utils::statistics::mean;
    use crate::{
        ChaChaSource, Forest, ForestConfig, Node, RandomGenerator, RandomSource, Sample,
    };

    struct CounterSource(u64);
    impl RandomSource for CounterSource {
        fn next(&mut self) -> u64 {
            self.0 += 1;
            self.0
        }
    }

    fn xy(name: &str, x: u64, y: u64) -> Sample {
        Sample::new(name).with_feature("x", x).with_feature("y", y)
    }

    fn draw(rng: &mut RandomGenerator, name: &str, low: u64, n: usize) -> Vec<Sample> {
        (0..n)
            .map(|_| xy(name, low + rng.gen_range(0..25), low + rng.gen_range(0..25)))
            .collect()
    }

    fn trained(config: &ForestConfig, source: Box<dyn RandomSource>, data: &[Sample]) -> Forest {
        let mut forest = Forest::with_random_source(config, source);
        forest.add_samples(data);
        forest.create();
        forest
    }

    fn max_depth_of(node: &Node) -> usize {
        node.height() - 1
    }

    #[test]
    fn test_determinism() {
        let mut rng = RandomGenerator::seed_from_u64(1);
        let training = draw(&mut rng, "training", 0, 100);
        let queries = draw(&mut rng, "query", 10, 20);
        let config = ForestConfig::new(10, 6);

        let a = trained(&config, Box::new(CounterSource(0)), &training);
        let b = trained(&config, Box::new(CounterSource(0)), &training);
        assert_eq!(a.get_trees(), b.get_trees());
        for query in &queries {
            assert_eq!(a.score(query), b.score(query));
            assert_eq!(a.normalized_score(query), b.normalized_score(query));
        }

        let c = trained(&config, Box::new(ChaChaSource::seed_from_u64(9)), &training);
        let d = trained(&config, Box::new(ChaChaSource::seed_from_u64(9)), &training);
        assert_eq!(c.get_trees(), d.get_trees());
        assert_eq!(c.to_string(), d.to_string());
        assert_eq!(c.score_samples(&queries), d.score_samples(&queries));
    }

    #[test]
    fn test_depth_bound_and_score_range() {
        let mut rng = RandomGenerator::seed_from_u64(2);
        let training = draw(&mut rng, "training", 0, 150);
        let queries = draw(&mut rng, "query", 0, 30)
            .into_iter()
            .chain(draw(&mut rng, "query", 20, 30))
            .collect::<Vec<_>>();

        for (n_trees, max_depth) in [(2, 1), (5, 3), (10, 8), (25, 12)] {
            let config = ForestConfig::new(n_trees, max_depth);
            let source = Box::new(ChaChaSource::seed_from_u64(max_depth as u64));
            let forest = trained(&config, source, &training);

            assert_eq!(forest.get_trees().len(), n_trees as usize);
            for tree in forest.get_trees() {
                assert!(tree.height() <= max_depth as usize);
                assert!(max_depth_of(tree) < max_depth as usize);
            }
            for query in &queries {
                let score = forest.score(query);
                assert!(score >= 0.0 && score <= max_depth as f64);
                let normalized = forest.normalized_score(query);
                assert!((0.0..=1.0).contains(&normalized));
            }
        }
    }

    #[test]
    fn test_outliers_score_higher() {
        let mut rng = RandomGenerator::seed_from_u64(3);
        let training = draw(&mut rng, "training", 0, 200);
        let control = draw(&mut rng, "control", 0, 200);
        let outliers = draw(&mut rng, "outlier", 20, 200);

        let config = ForestConfig::new(10, 8);
        let forest = trained(&config, Box::new(ChaChaSource::seed_from_u64(4)), &training);

        let control_score = mean(&forest.score_samples(&control));
        let outlier_score = mean(&forest.score_samples(&outliers));
        assert!(
            outlier_score > control_score,
            "outliers {outlier_score} <= control {control_score}"
        );
    }

    #[test]
    fn test_unbounded_depth_forest() {
        let mut rng = RandomGenerator::seed_from_u64(5);
        let training = draw(&mut rng, "training", 0, 100);
        let forest = trained(
            &ForestConfig::default(),
            Box::new(ChaChaSource::seed_from_u64(6)),
            &training,
        );
        assert_eq!(forest.get_trees().len(), 10);
        let normalized = forest.normalized_score(&xy("q", 12, 12));
        assert!((0.0..=1.0).contains(&normalized));
    }

    #[test]
    fn test_batch_scoring_matches_single() {
        let mut rng = RandomGenerator::seed_from_u64(7);
        let training = draw(&mut rng, "training", 0, 100);
        let queries = draw(&mut rng, "query", 15, 40);
        let forest = trained(
            &ForestConfig::new(20, 10),
            Box::new(ChaChaSource::seed_from_u64(8)),
            &training,
        );

        let scores = forest.score_samples(&queries);
        let depths = forest.depth_samples(&queries);
        let labels = forest.predict(&queries);
        for (i, query) in queries.iter().enumerate() {
            assert_eq!(scores[i], forest.normalized_score(query));
            assert_eq!(depths[i], forest.score(query));
            assert_eq!(labels[i], (scores[i] > 0.5) as isize);
        }
    }

    #[test]
    fn test_missing_features_terminate() {
        let mut rng = RandomGenerator::seed_from_u64(10);
        let training = draw(&mut rng, "training", 0, 100);
        let forest = trained(
            &ForestConfig::new(10, 8),
            Box::new(ChaChaSource::seed_from_u64(11)),
            &training,
        );

        // no node can route this sample
        let unknown = Sample::new("unknown").with_feature("z", 3);
        assert_eq!(forest.score(&unknown), 0.0);
        assert_eq!(forest.normalized_score(&unknown), 1.0);

        let partial = Sample::new("partial").with_feature("x", 3);
        let score = forest.score(&partial);
        assert!(score > 0.0 && score <= 8.0);
    }

    #[test]
    fn test_training_after_create_leaves_trees_alone() {
        let mut rng = RandomGenerator::seed_from_u64(12);
        let training = draw(&mut rng, "training", 0, 50);
        let mut forest = trained(
            &ForestConfig::new(5, 4),
            Box::new(ChaChaSource::seed_from_u64(13)),
            &training,
        );
        let trees = forest.get_trees().to_vec();
        forest.add_sample(&Sample::new("late").with_feature("z", 1000));
        assert_eq!(forest.get_trees(), trees.as_slice());
        assert!(forest.feature_stats().contains_key("z"));
    }

    #[test]
    fn test_csv_pipeline() {
        let dir = TempDir::new().unwrap();
        let train_path = dir.path().join("train.csv");
        let mut rng = RandomGenerator::seed_from_u64(14);
        let rows = (0..100)
            .map(|_| {
                vec![
                    "training".to_string(),
                    rng.gen_range(0..25u64).to_string(),
                    rng.gen_range(0..25u64).to_string(),
                ]
            })
            .collect::<Vec<_>>();
        write_csv(
            &train_path,
            rows,
            Some(vec!["name".to_string(), "x".to_string(), "y".to_string()]),
        )
        .unwrap();

        let training = read_csv(&train_path, b',').unwrap();
        assert_eq!(training.len(), 100);
        let forest = trained(
            &ForestConfig::new(10, 8),
            Box::new(ChaChaSource::seed_from_u64(15)),
            &training,
        );

        let scores = training
            .iter()
            .map(|sample| vec![forest.score(sample), forest.normalized_score(sample)])
            .collect::<Vec<_>>();
        let score_path = dir.path().join("scores.csv");
        write_csv(&score_path, scores, None).unwrap();
        let written = std::fs::read_to_string(&score_path).unwrap();
        assert_eq!(written.lines().count(), 100);
    }
}
