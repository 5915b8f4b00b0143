use std::process::ExitStatus;
use thiserror::Error;

/// 必須設定の欠落
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("no build directory provided")]
    NoBuildDirectory,

    #[error("no build tag provided")]
    NoBuildTag,

    #[error("no config password provided")]
    NoRegistryPassword,

    #[error("no config url provided")]
    NoRegistryUrl,

    #[error("no config username provided")]
    NoRegistryUsername,
}

/// 外部プロセスの起動失敗 / 異常終了
#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("failed to launch `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{command}` exited with {status}")]
    Failed { command: String, status: ExitStatus },
}

#[derive(Debug, Error)]
pub enum PluginError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    Process(#[from] ProcessError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl PluginError {
    /// 設定エラーかどうか（外部プロセスを起動する前に失敗した）
    pub fn is_configuration(&self) -> bool {
        matches!(self, PluginError::Configuration(_))
    }
}

pub type Result<T> = std::result::Result<T, PluginError>;
