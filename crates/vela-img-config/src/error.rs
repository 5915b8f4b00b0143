use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read parameter file {path}: {source}")]
    ParameterFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid boolean value for {name}: {value:?} (expected true/false)")]
    InvalidBool { name: String, value: String },

    #[error("environment variable {key} for {name} is not valid UTF-8")]
    InvalidEnv { name: String, key: String },
}

pub type Result<T> = std::result::Result<T, ConfigError>;
