//! Vela img plugin core
//!
//! This crate turns plugin configuration into `img` command lines and runs
//! them in order: version diagnostic, registry login, image build.

pub mod build;
pub mod command;
pub mod credentials;
pub mod error;
pub mod plugin;
pub mod registry;

#[cfg(test)]
pub(crate) mod testing;

pub use build::{BUILD_FLAG_RULES, BuildConfig, FlagRule};
pub use command::{CommandInvocation, IMG_BINARY, MASK, ProcessRunner, Runner, version_command};
pub use credentials::{CredentialStore, DOCKER_CONFIG_PATH, OsCredentialStore};
pub use error::{ConfigurationError, PluginError, ProcessError, Result};
pub use plugin::{Phase, Plugin};
pub use registry::RegistryConfig;
