use super::*;
use crate::helpers::*;

#[test]
fn can_calculate_two_opt_delta() {
    let problem = create_circle_problem(4, None);
    let tour = Tour::new(vec![0, 2, 1, 3]);
    let evaluator = tourney::evaluation::Evaluator::new(problem.clone());
    let before = evaluator.quick_evaluate(&tour);

    let delta = get_two_opt_delta(&problem, &tour, 0, 2);
    let mut improved = tour.clone();
    improved.reverse_segment(1, 2);

    assert!(delta < 0.);
    assert!((before + delta - evaluator.quick_evaluate(&improved)).abs() < 1E-9);
}

#[test]
fn can_reach_optimum_on_convex_problem() {
    let size = 24;
    let mut ctx = create_search_context(create_circle_problem(size, Some(11)), 3);
    let mut strategy = TwoOpt::default();

    let steps = run_strategy(&mut strategy, &mut ctx, 100_000);

    assert!(steps < 100_000);
    assert!((ctx.best_cost() - get_circle_optimum(size)).abs() < 1E-6);
    assert_eq!(strategy.current_best().map(|tour| ctx.quick_evaluate(&tour)), Some(ctx.best_cost()));
    assert_valid_best(&strategy, &ctx);
}

#[test]
fn can_finish_on_tiny_problem() {
    let mut ctx = create_search_context(create_circle_problem(3, None), 0);
    let mut strategy = TwoOpt::default();

    let steps = run_strategy(&mut strategy, &mut ctx, 10);

    assert_eq!(steps, 1);
    assert!(ctx.best_cost().is_finite());
}
