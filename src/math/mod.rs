pub mod poly;

pub use poly::{fit, lip, FitError, ForcedPoint, Polynomial};
