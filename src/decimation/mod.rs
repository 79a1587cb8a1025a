pub mod average;
pub mod regress;
pub mod simplify;

pub use average::averaged;
pub use regress::{extrapolate, linear_fit, LinearFit};
pub use simplify::simplify;
