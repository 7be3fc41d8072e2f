/// Alias to a scalar floating type used for tour costs and coordinates.
pub type Float = f64;
