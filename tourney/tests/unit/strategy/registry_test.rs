use super::*;
use crate::helpers::models::create_square_problem;
use crate::helpers::strategies::create_scripted_entry;
use crate::utils::GenericError;

fn create_registry() -> StrategyRegistry {
    StrategyRegistry::default()
        .with(create_scripted_entry("demo", StrategyKind::Demo, vec![]))
        .and_then(|registry| registry.with(create_scripted_entry("first", StrategyKind::Competitor, vec![])))
        .and_then(|registry| registry.with(create_scripted_entry("second", StrategyKind::Competitor, vec![])))
        .expect("cannot create registry")
}

#[test]
fn can_register_strategies_in_order() {
    let registry = create_registry();

    assert_eq!(registry.len(), 3);
    assert_eq!(registry.entries().iter().map(|entry| entry.name()).collect::<Vec<_>>(), vec!["demo", "first", "second"]);
    assert_eq!(registry.get("first").map(|entry| entry.kind()), Some(StrategyKind::Competitor));
    assert!(registry.get("unknown").is_none());
}

#[test]
fn can_reject_duplicate_name() {
    let mut registry = create_registry();

    let result = registry.register(create_scripted_entry("first", StrategyKind::Demo, vec![]));

    assert_eq!(result, Err(GenericError::from("strategy 'first' is already registered")));
    assert_eq!(registry.len(), 3);
}

parameterized_test! {can_select_strategies, (competition_only, expected), {
    can_select_strategies_impl(competition_only, expected);
}}

can_select_strategies! {
    case01_all: (false, vec!["demo", "first", "second"]),
    case02_competitors: (true, vec!["first", "second"]),
}

fn can_select_strategies_impl(competition_only: bool, expected: Vec<&str>) {
    let registry = create_registry();

    let selected = registry.select(competition_only);

    assert_eq!(selected.iter().map(|entry| entry.name()).collect::<Vec<_>>(), expected);
}

#[test]
fn can_create_fresh_strategy_instance() {
    let entry = create_scripted_entry("first", StrategyKind::Competitor, vec![]).with_authors(&["Jane", "John"]);
    let config = StrategyConfig { problem: create_square_problem(), seed: Some(1) };

    let first = entry.create(&config);
    let second = entry.create(&config);

    assert!(first.is_ok());
    assert!(second.is_ok());
    assert_eq!(entry.authors(), &["Jane".to_string(), "John".to_string()]);
}
