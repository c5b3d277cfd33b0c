use thiserror::Error;

#[derive(Error, Debug)]
pub enum TinyGaError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Storage capacity exceeded: need {required} bytes, store holds {capacity}")]
    StorageCapacity { required: usize, capacity: usize },

    #[error("No valid persisted state: {0}")]
    InvalidPersistedState(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("Config error: {0}")]
    Config(#[from] ::config::ConfigError),

    #[error("Serde error: {0}")]
    Serde(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, TinyGaError>;
