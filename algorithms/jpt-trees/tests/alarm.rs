// jpt-trees/tests/alarm.rs

use std::collections::HashMap;

use approx::assert_abs_diff_eq;
use jpt::prelude::*;
use jpt_trees::{Event, Jpt};
use rand::rngs::SmallRng;
use rand::SeedableRng;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn alarm_tree(parallel: bool) -> (Vec<Variable>, Jpt, ndarray::Array2<f64>) {
    let mut rng = SmallRng::seed_from_u64(42);
    let (variables, data) = jpt_datasets::alarm(1000, &mut rng);

    let tree = Jpt::params(variables.clone())
        .name("Alarm")
        .min_impurity_improvement(0.)
        .parallel(parallel)
        .fit(data)
        .expect("Training failed");
    let matrix = tree.training_data().to_owned();

    (variables, tree, matrix)
}

fn event(assignments: &[(&Variable, bool)]) -> Event {
    assignments
        .iter()
        .map(|&(var, value)| (var.clone(), Value::from(value)))
        .collect()
}

#[test]
fn alarm_partitions_are_complete() {
    init_logger();
    let (_, tree, _) = alarm_tree(false);

    assert_eq!(tree.name(), "Alarm");
    assert_eq!(tree.nsamples(), 1000);
    assert_eq!(tree.root().id(), 0);

    for node in tree.iter_nodes() {
        if let Some(parent) = node.parent() {
            assert!(parent < node.id());
        }
        if node.is_leaf() {
            continue;
        }
        let routed: usize = node
            .children()
            .iter()
            .map(|&c| tree.node(c).unwrap().samples())
            .sum();
        assert_eq!(routed, node.samples());
    }

    assert_eq!(tree.iter_nodes().count(), tree.nodes().len());
    assert_eq!(tree.leaves().map(|l| l.samples()).sum::<usize>(), 1000);
    // five boolean variables allow at most 32 distinct observations
    assert!(tree.num_leaves() <= 32);
}

#[test]
fn diagnostic_query_matches_frequencies() {
    init_logger();
    let (variables, tree, matrix) = alarm_tree(false);
    let (alarm, mary) = (&variables[2], &variables[3]);

    let result = tree
        .infer(&event(&[(alarm, true)]), &event(&[(mary, true)]))
        .unwrap();

    // leaves are pure, so the tree reproduces the empirical distribution
    let calls = matrix.rows().into_iter().filter(|r| r[3] == 1.).count();
    let both = matrix
        .rows()
        .into_iter()
        .filter(|r| r[3] == 1. && r[2] == 1.)
        .count();
    assert_abs_diff_eq!(
        result.result(),
        both as f64 / calls as f64,
        epsilon = 1e-9
    );
    assert!(result.result() > 0.8);
    assert!(result.format_result().starts_with("P(Alarm = True | MaryCalls = True) = "));
}

#[test]
fn joint_query_over_all_leaves() {
    let (variables, tree, _) = alarm_tree(false);
    let (earthquake, burglary, alarm) = (&variables[0], &variables[1], &variables[2]);

    let everything = tree.infer(&HashMap::new(), &HashMap::new()).unwrap();
    assert_abs_diff_eq!(everything.result(), 1.0, epsilon = 1e-9);
    assert_eq!(everything.candidates().len(), tree.num_leaves());

    let joint = tree
        .infer(
            &event(&[(alarm, true), (earthquake, false), (burglary, true)]),
            &HashMap::new(),
        )
        .unwrap();
    let conditional = tree
        .infer(
            &event(&[(alarm, true)]),
            &event(&[(earthquake, false), (burglary, true)]),
        )
        .unwrap();
    let prior = tree
        .infer(&event(&[(earthquake, false), (burglary, true)]), &HashMap::new())
        .unwrap();

    // P(a, e, b) = P(a | e, b) P(e, b)
    assert_abs_diff_eq!(
        joint.result(),
        conditional.result() * prior.result(),
        epsilon = 1e-9
    );
}

#[test]
fn parallel_learning_builds_the_same_tree() {
    let (_, sequential, _) = alarm_tree(false);
    let (_, parallel, _) = alarm_tree(true);

    assert_eq!(sequential.nodes().len(), parallel.nodes().len());
    for (a, b) in sequential.nodes().iter().zip(parallel.nodes()) {
        assert_eq!(a.parent(), b.parent());
        assert_eq!(a.samples(), b.samples());
        assert_eq!(
            a.as_decision().map(|d| d.variable()),
            b.as_decision().map(|d| d.variable())
        );
    }
}

#[test]
fn reverse_finds_alarm_leaves() {
    let (variables, tree, _) = alarm_tree(false);
    let alarm = &variables[2];

    let matches = tree.reverse(&event(&[(alarm, true)]), 0.9).unwrap();
    assert!(!matches.is_empty());

    for m in &matches {
        assert!(m.confidence(2) >= 0.9);
        assert_eq!(m.path()[0], tree.root().id());
        let leaf = tree.node(m.leaf()).and_then(|n| n.as_leaf()).unwrap();
        assert!(leaf.distribution(2).probability(&Constraint::label(1)) >= 0.9);
    }
    for pair in matches.windows(2) {
        assert!(pair[0].total() >= pair[1].total());
    }
}

#[test]
fn apply_enumerates_consistent_leaves() {
    let (variables, tree, _) = alarm_tree(false);
    let john = &variables[4];

    let calling = tree.apply(&event(&[(john, true)])).unwrap().count();
    let silent = tree.apply(&event(&[(john, false)])).unwrap().count();

    // every leaf is pure, so it is consistent with at least one of the two
    assert!(calling > 0 && silent > 0);
    assert!(calling + silent >= tree.num_leaves());
}
