//! `img build` コマンドの組み立て
//!
//! オプションフラグは [`BUILD_FLAG_RULES`] の順に評価され、ビルドコンテキストの
//! ディレクトリは常に最後に付与されます。

use crate::command::{CommandInvocation, Runner};
use crate::error::{ConfigurationError, Result};
use std::path::PathBuf;

const BUILD_ACTION: &str = "build";

/// イメージのビルド設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildConfig {
    /// ビルド時変数（KEY=VALUE）
    pub build_args: Vec<String>,
    /// キャッシュとして参照するイメージ
    pub cache_from: Vec<String>,
    /// ビルドコンテキストのディレクトリ
    pub directory: String,
    /// Dockerfile のパス
    pub dockerfile: Option<String>,
    /// イメージに付与するメタデータ（KEY=VALUE）
    pub labels: Vec<String>,
    /// キャッシュを使用しない
    pub no_cache: bool,
    /// コンソール形式ではない進捗表示を使う
    pub no_console: bool,
    /// BuildKit の出力指定（例: type=tar,dest=build.tar）
    pub output: Option<String>,
    /// ビルド対象のプラットフォーム
    pub platforms: Vec<String>,
    /// イメージ名とタグ（name:tag）
    pub tags: Vec<String>,
    /// ビルドするステージ
    pub target: Option<String>,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            build_args: Vec::new(),
            cache_from: Vec::new(),
            directory: ".".to_string(),
            dockerfile: None,
            labels: Vec::new(),
            no_cache: false,
            no_console: false,
            output: None,
            platforms: Vec::new(),
            tags: Vec::new(),
            target: None,
        }
    }
}

/// オプションフラグ1つ分の生成ルール
pub struct FlagRule {
    /// フラグ名（ログ・テスト用）
    pub name: &'static str,
    /// このフラグを付与するか
    pub applies: fn(&BuildConfig) -> bool,
    /// 引数としての表現
    pub render: fn(&BuildConfig) -> String,
}

/// build コマンドのオプションフラグ（この順序で付与される）
pub const BUILD_FLAG_RULES: &[FlagRule] = &[
    FlagRule {
        name: "build-arg",
        applies: |b| !b.build_args.is_empty(),
        render: |b| quoted("--build-arg", &b.build_args),
    },
    FlagRule {
        name: "cache-from",
        applies: |b| !b.cache_from.is_empty(),
        render: |b| quoted("--cache-from", &b.cache_from),
    },
    FlagRule {
        name: "file",
        applies: |b| non_empty(&b.dockerfile).is_some(),
        render: |b| format!("-f={}", non_empty(&b.dockerfile).unwrap_or_default()),
    },
    FlagRule {
        name: "label",
        applies: |b| !b.labels.is_empty(),
        render: |b| quoted("--label", &b.labels),
    },
    FlagRule {
        name: "no-cache",
        applies: |b| b.no_cache,
        render: |_| "--no-cache".to_string(),
    },
    FlagRule {
        name: "no-console",
        applies: |b| b.no_console,
        render: |_| "--no-console".to_string(),
    },
    FlagRule {
        name: "output",
        applies: |b| non_empty(&b.output).is_some(),
        render: |b| format!("--output {}", non_empty(&b.output).unwrap_or_default()),
    },
    FlagRule {
        name: "platform",
        applies: |b| !b.platforms.is_empty(),
        render: |b| quoted("--platform", &b.platforms),
    },
    FlagRule {
        name: "tag",
        applies: |b| !b.tags.is_empty(),
        render: |b| format!("-t={}", b.tags.join(" ")),
    },
    FlagRule {
        name: "target",
        applies: |b| non_empty(&b.target).is_some(),
        render: |b| format!("--target {}", non_empty(&b.target).unwrap_or_default()),
    },
];

fn quoted(flag: &str, values: &[String]) -> String {
    format!("{} \"{}\"", flag, values.join(" "))
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

impl BuildConfig {
    /// 設定から build コマンドを組み立てる
    pub fn command(&self, program: impl Into<PathBuf>) -> CommandInvocation {
        tracing::trace!("creating img build command from plugin configuration");

        let flags = BUILD_FLAG_RULES
            .iter()
            .filter(|rule| (rule.applies)(self))
            .map(|rule| (rule.render)(self));

        CommandInvocation::new(program)
            .arg(BUILD_ACTION)
            .args(flags)
            .arg(&self.directory)
    }

    /// build コマンドを実行
    pub fn exec(&self, runner: &mut dyn Runner, program: impl Into<PathBuf>) -> Result<()> {
        tracing::trace!("running build with provided configuration");

        let command = self.command(program);
        tracing::info!("building image {}", self.tags.join(", "));
        runner.run(&command)?;

        Ok(())
    }

    /// 設定を検証（ディレクトリ → タグの順）
    pub fn validate(&self) -> std::result::Result<(), ConfigurationError> {
        tracing::trace!("validating build plugin configuration");

        if self.directory.is_empty() {
            return Err(ConfigurationError::NoBuildDirectory);
        }

        if self.tags.is_empty() {
            return Err(ConfigurationError::NoBuildTag);
        }

        Ok(())
    }
}
