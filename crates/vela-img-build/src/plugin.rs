//! プラグイン全体の実行順序
//!
//! 検証 → version → login → build の順に実行し、最初の失敗で中断する。

use crate::build::BuildConfig;
use crate::command::{CommandInvocation, IMG_BINARY, Runner, version_command};
use crate::error::Result;
use crate::registry::RegistryConfig;
use std::io::Write;
use std::path::PathBuf;

/// 実行状態
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Validating,
    Executing,
    Done,
    Failed,
}

/// プラグインに読み込まれた設定
#[derive(Debug, Clone)]
pub struct Plugin {
    /// ビルド設定
    pub build: BuildConfig,
    /// レジストリ設定
    pub registry: RegistryConfig,
    /// img バイナリのパス
    pub program: PathBuf,
    phase: Phase,
}

impl Plugin {
    pub fn new(build: BuildConfig, registry: RegistryConfig) -> Self {
        Self {
            build,
            registry,
            program: PathBuf::from(IMG_BINARY),
            phase: Phase::Idle,
        }
    }

    /// img バイナリのパスを差し替える
    pub fn with_program(mut self, program: impl Into<PathBuf>) -> Self {
        self.program = program.into();
        self
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    fn transition(&mut self, phase: Phase) {
        tracing::debug!("plugin phase {:?} -> {:?}", self.phase, phase);
        self.phase = phase;
    }

    /// プラグインの設定を検証（レジストリ → ビルドの順）
    pub fn validate(&self) -> Result<()> {
        tracing::debug!("validating plugin configuration");

        self.registry.validate()?;
        self.build.validate()?;

        Ok(())
    }

    /// コマンドを順に実行する
    pub fn exec(&self, runner: &mut dyn Runner) -> Result<()> {
        tracing::debug!("running plugin with provided configuration");

        // トラブルシューティング用に img のバージョンを出力
        runner.run(&version_command(&self.program))?;

        self.registry.login(runner, &self.program)?;

        self.build.exec(runner, &self.program)
    }

    /// 検証してから実行する
    pub fn run(&mut self, runner: &mut dyn Runner) -> Result<()> {
        self.transition(Phase::Validating);
        if let Err(e) = self.validate() {
            tracing::error!("validation failed: {}", e);
            self.transition(Phase::Failed);
            return Err(e);
        }

        self.transition(Phase::Executing);
        match self.exec(runner) {
            Ok(()) => {
                self.transition(Phase::Done);
                Ok(())
            }
            Err(e) => {
                tracing::error!("execution failed: {}", e);
                self.transition(Phase::Failed);
                Err(e)
            }
        }
    }

    /// 実行されるコマンドの一覧（login はスキップされる場合がある）
    pub fn commands(&self) -> Vec<CommandInvocation> {
        let mut commands = vec![version_command(&self.program)];
        commands.extend(self.registry.login_command(&self.program));
        commands.push(self.build.command(&self.program));
        commands
    }

    /// 検証だけ行い、実行されるコマンドを書き出す
    pub fn dry_run(&self, out: &mut impl Write) -> Result<()> {
        self.validate()?;

        for command in self.commands() {
            writeln!(out, "$ {}", command.display())?;
        }

        Ok(())
    }
}
