//! img コマンドの表現と実行

use crate::error::ProcessError;
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// イメージ内の img バイナリのパス
pub const IMG_BINARY: &str = "/usr/bin/img";

/// 表示用にシークレットを置き換える文字列
pub const MASK: &str = "********";

/// 1回分の外部プロセス呼び出し（実行ファイル + 引数）
#[derive(Clone, PartialEq, Eq)]
pub struct CommandInvocation {
    program: PathBuf,
    args: Vec<String>,
    /// 引数インデックス -> 表示用の文字列
    masked: BTreeMap<usize, String>,
}

impl CommandInvocation {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            masked: BTreeMap::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// `<prefix><secret>` を引数に追加する。表示時は `<prefix>********` になる
    pub fn secret_arg(mut self, prefix: &str, secret: &str) -> Self {
        self.masked
            .insert(self.args.len(), format!("{}{}", prefix, MASK));
        self.args.push(format!("{}{}", prefix, secret));
        self
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    /// プロセスに渡す実際の引数
    pub fn get_args(&self) -> &[String] {
        &self.args
    }

    /// シークレットをマスクした引数
    pub fn display_args(&self) -> Vec<&str> {
        self.args
            .iter()
            .enumerate()
            .map(|(i, arg)| self.masked.get(&i).unwrap_or(arg).as_str())
            .collect()
    }

    /// 実行ファイルを除いた引数を空白で連結（マスクなし）
    pub fn rendered(&self) -> String {
        self.args.join(" ")
    }

    /// ログ出力用のコマンドライン（シークレットはマスク済み）
    pub fn display(&self) -> String {
        let mut line = self.program.display().to_string();
        for arg in self.display_args() {
            line.push(' ');
            line.push_str(arg);
        }
        line
    }

    fn to_command(&self) -> Command {
        let mut command = Command::new(&self.program);
        command.args(&self.args);
        command
    }
}

impl fmt::Debug for CommandInvocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandInvocation")
            .field("program", &self.program)
            .field("args", &self.display_args())
            .finish()
    }
}

impl fmt::Display for CommandInvocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

/// バージョン情報を出力するコマンド（トラブルシューティング用）
pub fn version_command(program: impl Into<PathBuf>) -> CommandInvocation {
    tracing::trace!("creating img version command");

    CommandInvocation::new(program).arg("version")
}

/// コマンドを実行するもの
pub trait Runner {
    fn run(&mut self, command: &CommandInvocation) -> Result<(), ProcessError>;
}

/// 実際に子プロセスを起動する Runner
///
/// 子プロセスの stdout / stderr はこのプロセスのものをそのまま引き継ぐ。
#[derive(Debug, Default)]
pub struct ProcessRunner;

impl ProcessRunner {
    pub fn new() -> Self {
        Self
    }
}

impl Runner for ProcessRunner {
    fn run(&mut self, invocation: &CommandInvocation) -> Result<(), ProcessError> {
        let line = invocation.display();
        tracing::trace!("executing cmd {}", line);

        println!("$ {}", line);

        let status = invocation
            .to_command()
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|source| ProcessError::Spawn {
                command: line.clone(),
                source,
            })?;

        if !status.success() {
            return Err(ProcessError::Failed {
                command: line,
                status,
            });
        }

        Ok(())
    }
}
