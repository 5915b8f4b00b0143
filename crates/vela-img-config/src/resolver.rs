use crate::error::{ConfigError, Result};
use crate::parameter::Parameter;
use std::env::VarError;
use std::path::PathBuf;

/// ファイル参照先のルートを差し替える環境変数
pub const FILE_ROOT_ENV: &str = "VELA_IMG_FILE_ROOT";

/// フラグ・環境変数・ファイルから設定値を解決する
#[derive(Debug, Clone, Default)]
pub struct Resolver {
    file_root: Option<PathBuf>,
}

impl Resolver {
    /// ファイルを絶対パスのまま参照する Resolver を作成
    pub fn new() -> Self {
        Self::default()
    }

    /// `VELA_IMG_FILE_ROOT` が設定されていればそれをファイルのルートにする
    pub fn from_env() -> Self {
        Self {
            file_root: std::env::var_os(FILE_ROOT_ENV).map(PathBuf::from),
        }
    }

    /// 指定ディレクトリをルートとしてファイルを参照
    pub fn with_file_root(root: impl Into<PathBuf>) -> Self {
        Self {
            file_root: Some(root.into()),
        }
    }

    fn file_path(&self, file: &str) -> PathBuf {
        match &self.file_root {
            Some(root) => root.join(file.trim_start_matches('/')),
            None => PathBuf::from(file),
        }
    }

    /// フラグが無ければ環境変数、ファイルの順で値を探す
    ///
    /// UTF-8 でない環境変数は未設定扱いにせずエラーにする。
    pub fn lookup(&self, param: &Parameter, flag: Option<String>) -> Result<Option<String>> {
        if let Some(value) = flag {
            tracing::trace!("{} resolved from flag", param.name);
            return Ok(Some(value));
        }

        for key in param.env {
            match std::env::var(key) {
                Ok(value) => {
                    tracing::trace!("{} resolved from env {}", param.name, key);
                    return Ok(Some(value));
                }
                Err(VarError::NotPresent) => continue,
                Err(VarError::NotUnicode(_)) => {
                    return Err(ConfigError::InvalidEnv {
                        name: param.name.to_string(),
                        key: key.to_string(),
                    });
                }
            }
        }

        for file in param.files {
            let path = self.file_path(file);
            match std::fs::read_to_string(&path) {
                Ok(content) => {
                    tracing::trace!("{} resolved from file {:?}", param.name, path);
                    return Ok(Some(content.trim_end_matches(['\r', '\n']).to_string()));
                }
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => continue,
                Err(source) => return Err(ConfigError::ParameterFile { path, source }),
            }
        }

        Ok(None)
    }

    /// 文字列値を解決（見つからなければ `default`）
    pub fn string_or(
        &self,
        param: &Parameter,
        flag: Option<String>,
        default: &str,
    ) -> Result<String> {
        Ok(self
            .lookup(param, flag)?
            .unwrap_or_else(|| default.to_string()))
    }

    /// リスト値を解決
    ///
    /// フラグで1つ以上の値が渡されていればそれを使い、それ以外は
    /// カンマ区切りの環境変数またはファイル内容を分割する。
    pub fn list(&self, param: &Parameter, flag: Vec<String>) -> Result<Vec<String>> {
        let from_flag: Vec<String> = flag
            .iter()
            .flat_map(|value| split_list(value))
            .collect();
        if !from_flag.is_empty() {
            return Ok(from_flag);
        }

        Ok(self
            .lookup(param, None)?
            .map(|value| split_list(&value))
            .unwrap_or_default())
    }

    /// 真偽値を解決
    ///
    /// フラグで明示されていればその値（`false` も含む）。それ以外は
    /// 環境変数 / ファイルの値を解釈する。
    pub fn flag(&self, param: &Parameter, flag: Option<bool>) -> Result<bool> {
        if let Some(value) = flag {
            tracing::trace!("{} resolved from flag", param.name);
            return Ok(value);
        }

        match self.lookup(param, None)? {
            Some(value) => parse_bool(param.name, &value),
            None => Ok(false),
        }
    }
}

/// カンマ区切りの値を分割（前後の空白を除去し、空要素は捨てる）
pub fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// 真偽値の文字列表現を解釈
pub fn parse_bool(name: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "t" | "1" | "yes" | "y" | "on" => Ok(true),
        "false" | "f" | "0" | "no" | "n" | "off" | "" => Ok(false),
        _ => Err(ConfigError::InvalidBool {
            name: name.to_string(),
            value: value.to_string(),
        }),
    }
}
