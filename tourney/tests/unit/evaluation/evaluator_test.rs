use super::*;
use crate::helpers::models::*;
use std::sync::Mutex;

const DIAGONAL_COST: Float = 2. + 2. * std::f64::consts::SQRT_2;

#[derive(Default)]
struct RecordingListener {
    evaluations: Mutex<Vec<(Float, Float)>>,
    improvements: Mutex<Vec<Float>>,
}

impl EvaluationListener for RecordingListener {
    fn on_evaluation(&self, cost: Float, best_cost: Float) {
        self.evaluations.lock().unwrap().push((cost, best_cost));
    }

    fn on_best_improved(&self, _: &Tour, cost: Float) {
        self.improvements.lock().unwrap().push(cost);
    }
}

#[test]
fn can_evaluate_square_tours() {
    let mut evaluator = Evaluator::new(create_square_problem());

    assert_eq!(evaluator.best_cost(), NO_SOLUTION_COST);

    assert_eq!(evaluator.evaluate(&Tour::new(vec![0, 1, 2, 3])), 4.);
    assert_eq!(evaluator.best_cost(), 4.);

    assert!((evaluator.evaluate(&Tour::new(vec![0, 2, 1, 3])) - DIAGONAL_COST).abs() < 1E-9);
    assert_eq!(evaluator.best_cost(), 4.);
    assert_eq!(evaluator.best_tour(), Some(&Tour::new(vec![0, 1, 2, 3])));
    assert_eq!(evaluator.evaluations(), 2);
}

parameterized_test! {can_check_tour_validity, (cities, expected), {
    can_check_tour_validity_impl(cities, expected);
}}

can_check_tour_validity! {
    case01_identity: (vec![0, 1, 2, 3], true),
    case02_permutation: (vec![3, 1, 0, 2], true),
    case03_duplicate: (vec![0, 1, 1, 3], false),
    case04_too_short: (vec![0, 1, 2], false),
    case05_too_long: (vec![0, 1, 2, 3, 0], false),
    case06_out_of_range: (vec![0, 1, 2, 4], false),
    case07_empty: (vec![], false),
}

fn can_check_tour_validity_impl(cities: Vec<usize>, expected: bool) {
    let evaluator = Evaluator::new(create_square_problem());

    assert_eq!(evaluator.is_valid(&Tour::new(cities)), expected);
}

#[test]
fn can_ignore_cheap_invalid_tour() {
    let mut evaluator = Evaluator::new(create_square_problem());
    evaluator.evaluate(&Tour::identity(4));

    let cost = evaluator.evaluate(&Tour::new(vec![0, 1]));

    assert_eq!(cost, 2.);
    assert_eq!(evaluator.best_cost(), 4.);
    assert_eq!(evaluator.best_tour(), Some(&Tour::identity(4)));
}

#[test]
fn can_return_same_cost_for_quick_evaluate() {
    let mut evaluator = Evaluator::new(create_square_problem());
    let tour = Tour::new(vec![0, 2, 1, 3]);

    let quick = evaluator.quick_evaluate(&tour);

    assert_eq!(evaluator.best_cost(), NO_SOLUTION_COST);
    assert_eq!(evaluator.evaluations(), 0);
    assert_eq!(evaluator.evaluate(&tour), quick);
}

#[test]
fn can_keep_best_cost_non_increasing() {
    let problem = create_circle_problem("circle", 8);
    let random = crate::utils::DefaultRandom::new_repeatable(3);
    let mut evaluator = Evaluator::new(problem);

    let mut last_best = evaluator.best_cost();
    (0..200).for_each(|idx| {
        let tour = if idx % 3 == 0 { Tour::new(vec![0, 0, 1]) } else { Tour::random(8, &random) };
        evaluator.evaluate(&tour);

        assert!(evaluator.best_cost() <= last_best);
        last_best = evaluator.best_cost();
    });
}

parameterized_test! {can_get_same_cost_for_equivalent_tours, cities, {
    can_get_same_cost_for_equivalent_tours_impl(cities);
}}

can_get_same_cost_for_equivalent_tours! {
    case01_reversed: vec![5, 4, 3, 2, 1, 0],
    case02_rotated: vec![2, 3, 4, 5, 0, 1],
    case03_reversed_rotated: vec![1, 0, 5, 4, 3, 2],
}

fn can_get_same_cost_for_equivalent_tours_impl(cities: Vec<usize>) {
    let evaluator = Evaluator::new(create_circle_problem("circle", 6));

    let expected = evaluator.quick_evaluate(&Tour::identity(6));
    let actual = evaluator.quick_evaluate(&Tour::new(cities));

    assert!((expected - actual).abs() < 1E-9);
}

#[test]
fn can_ignore_improvement_after_cancellation() {
    let cancellation = CancellationToken::default();
    let publisher = BestCost::default();
    let mut evaluator = Evaluator::new(create_square_problem())
        .with_cancellation(cancellation.clone())
        .with_publisher(publisher.clone());

    evaluator.evaluate(&Tour::new(vec![0, 2, 1, 3]));
    cancellation.cancel();
    let cost = evaluator.evaluate(&Tour::identity(4));

    assert_eq!(cost, 4.);
    assert!(evaluator.is_cancelled());
    assert!((evaluator.best_cost() - DIAGONAL_COST).abs() < 1E-9);
    assert_eq!(publisher.get(), evaluator.best_cost());
    assert_eq!(evaluator.evaluations(), 2);
}

#[test]
fn can_notify_listener() {
    let listener = Arc::new(RecordingListener::default());
    let publisher = BestCost::default();
    let mut evaluator =
        Evaluator::new(create_square_problem()).with_listener(listener.clone()).with_publisher(publisher.clone());

    evaluator.evaluate(&Tour::new(vec![0, 2, 1, 3]));
    evaluator.evaluate(&Tour::identity(4));
    evaluator.evaluate(&Tour::new(vec![0, 2, 1, 3]));

    assert_eq!(listener.evaluations.lock().unwrap().len(), 3);
    assert_eq!(listener.evaluations.lock().unwrap().last().map(|(_, best)| *best), Some(4.));
    assert_eq!(listener.improvements.lock().unwrap().len(), 2);
    assert_eq!(publisher.get(), 4.);
}

#[test]
fn can_return_no_solution_cost_for_empty_tour() {
    let mut evaluator = Evaluator::new(create_square_problem());

    assert_eq!(evaluator.evaluate(&Tour::default()), NO_SOLUTION_COST);
    assert_eq!(evaluator.best_tour(), None);
}
