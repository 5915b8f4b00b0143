//! Docker config.json の書き出し
//!
//! `img login` を使わずに認証情報ファイルを直接用意する経路。書き込み先の
//! ファイルシステムは [`CredentialStore`] として呼び出し側から渡す。

use crate::error::Result;
use crate::registry::RegistryConfig;
use base64::Engine;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;

/// デフォルトの書き出し先
pub const DOCKER_CONFIG_PATH: &str = "/root/.docker/config.json";

/// 認証情報ファイルの書き込み先
pub trait CredentialStore {
    fn write(&self, path: &Path, contents: &[u8]) -> std::io::Result<()>;
}

/// 実ファイルシステムに書き込む CredentialStore
#[derive(Debug, Default, Clone, Copy)]
pub struct OsCredentialStore;

impl CredentialStore for OsCredentialStore {
    fn write(&self, path: &Path, contents: &[u8]) -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let mut options = std::fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }

        use std::io::Write;
        let mut file = options.open(path)?;
        file.write_all(contents)
    }
}

/// Docker config.json の構造
#[derive(Debug, Serialize)]
struct DockerConfig<'a> {
    auths: BTreeMap<&'a str, AuthEntry>,
}

/// 認証エントリ
#[derive(Debug, Serialize)]
struct AuthEntry {
    /// Base64エンコードされた "username:password"
    auth: String,
}

impl RegistryConfig {
    /// config.json の内容を生成（設定が不完全なら `None`）
    pub fn docker_config_json(&self) -> Result<Option<String>> {
        if !self.is_complete() {
            return Ok(None);
        }

        let auth = base64::engine::general_purpose::STANDARD
            .encode(format!("{}:{}", self.username, self.password));

        let config = DockerConfig {
            auths: BTreeMap::from([(self.url.as_str(), AuthEntry { auth })]),
        };

        Ok(Some(serde_json::to_string_pretty(&config)?))
    }

    /// 認証情報を config.json として書き出す
    ///
    /// URL・ユーザー名・パスワードのいずれかが空の場合は何もしない。
    pub fn write_credentials(&self, store: &dyn CredentialStore, path: &Path) -> Result<()> {
        tracing::trace!("writing registry configuration file");

        let Some(contents) = self.docker_config_json()? else {
            tracing::debug!("registry credentials not provided, skipping config.json");
            return Ok(());
        };

        store.write(path, contents.as_bytes())?;
        tracing::debug!("wrote registry configuration to {:?}", path);

        Ok(())
    }
}
