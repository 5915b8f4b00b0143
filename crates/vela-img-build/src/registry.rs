//! レジストリ認証処理
//!
//! `img login` コマンドの組み立てと、必須項目の検証を行います。

use crate::command::{CommandInvocation, Runner};
use crate::error::{ConfigurationError, Result};
use std::fmt;
use std::path::PathBuf;

const LOGIN_ACTION: &str = "login";

/// レジストリとの通信に使う設定
#[derive(Clone, Default, PartialEq, Eq)]
pub struct RegistryConfig {
    /// レジストリのURL（例: index.docker.io）
    pub url: String,
    /// レジストリのユーザー名
    pub username: String,
    /// レジストリのパスワード
    pub password: String,
}

impl RegistryConfig {
    pub fn new(
        url: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            url: url.into(),
            username: username.into(),
            password: password.into(),
        }
    }

    /// URL・ユーザー名・パスワードがすべて揃っているか
    pub fn is_complete(&self) -> bool {
        !self.url.is_empty() && !self.username.is_empty() && !self.password.is_empty()
    }

    /// login コマンドを組み立てる
    ///
    /// いずれかの項目が空の場合は `None`（ログインをスキップ）。
    pub fn login_command(&self, program: impl Into<PathBuf>) -> Option<CommandInvocation> {
        tracing::trace!("creating img login command from plugin configuration");

        if !self.is_complete() {
            return None;
        }

        Some(
            CommandInvocation::new(program)
                .arg(LOGIN_ACTION)
                .secret_arg("-p=", &self.password)
                .arg(format!("-u={}", self.username))
                .arg(&self.url),
        )
    }

    /// レジストリにログインする
    ///
    /// 設定が不完全な場合は何もせず成功扱いにする。
    pub fn login(&self, runner: &mut dyn Runner, program: impl Into<PathBuf>) -> Result<()> {
        match self.login_command(program) {
            Some(command) => {
                tracing::info!("logging in to registry {}", self.url);
                runner.run(&command)?;
                Ok(())
            }
            None => {
                tracing::info!("registry credentials not provided, skipping login");
                Ok(())
            }
        }
    }

    /// 設定を検証（パスワード → URL → ユーザー名の順）
    pub fn validate(&self) -> std::result::Result<(), ConfigurationError> {
        tracing::trace!("validating config plugin configuration");

        if self.password.is_empty() {
            return Err(ConfigurationError::NoRegistryPassword);
        }

        if self.url.is_empty() {
            return Err(ConfigurationError::NoRegistryUrl);
        }

        if self.username.is_empty() {
            return Err(ConfigurationError::NoRegistryUsername);
        }

        Ok(())
    }
}

impl fmt::Debug for RegistryConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let password = if self.password.is_empty() { "" } else { crate::MASK };
        f.debug_struct("RegistryConfig")
            .field("url", &self.url)
            .field("username", &self.username)
            .field("password", &password)
            .finish()
    }
}
