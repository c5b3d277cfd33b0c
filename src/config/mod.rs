pub mod traits;
pub mod evolution;
pub mod storage;
pub mod run;
pub mod manager;

pub use manager::{ConfigManager, AppConfig};
pub use evolution::EngineConfig;
pub use storage::StorageConfig;
pub use run::RunConfig;
pub use traits::ConfigSection;
