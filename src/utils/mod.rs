pub mod random;

pub use random::{RandomSource, RngSource, StdRngSource};
