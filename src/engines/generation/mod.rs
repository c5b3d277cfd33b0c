pub mod evolution_engine;
pub mod operators;
pub mod population;
pub mod progress;

pub use evolution_engine::{EvolutionEngine, ProgressCallback};
pub use population::Population;
pub use progress::{ConsoleProgressCallback, LogProgressCallback};
