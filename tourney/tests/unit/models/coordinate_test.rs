use super::*;

parameterized_test! {can_calculate_distance, (first, second, expected), {
    can_calculate_distance_impl(first, second, expected);
}}

can_calculate_distance! {
    case01_same: ((1., 1.), (1., 1.), 0.),
    case02_horizontal: ((0., 0.), (3., 0.), 3.),
    case03_triangle: ((0., 0.), (3., 4.), 5.),
    case04_negative: ((-1., -1.), (2., 3.), 5.),
}

fn can_calculate_distance_impl(first: (Float, Float), second: (Float, Float), expected: Float) {
    let first = Coordinate::from(first);
    let second = Coordinate::from(second);

    assert_eq!(first.distance(&second), expected);
    assert_eq!(second.distance(&first), expected);
}
