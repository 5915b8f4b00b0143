//! テスト用の Runner 実装

use crate::command::{CommandInvocation, Runner};
use crate::error::ProcessError;

/// 実行したコマンドを記録するだけの Runner
#[derive(Debug, Default)]
pub struct RecordingRunner {
    calls: Vec<String>,
    fail_on: Option<String>,
}

impl RecordingRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// 指定したサブコマンドで失敗する Runner
    pub fn failing_on(action: &str) -> Self {
        Self {
            calls: Vec::new(),
            fail_on: Some(action.to_string()),
        }
    }

    /// 記録したコマンド（実行ファイルを除いた引数）
    pub fn calls(&self) -> &[String] {
        &self.calls
    }
}

impl Runner for RecordingRunner {
    fn run(&mut self, command: &CommandInvocation) -> Result<(), ProcessError> {
        self.calls.push(command.rendered());

        let action = command.get_args().first().map(String::as_str);
        if action.is_some() && action == self.fail_on.as_deref() {
            return Err(ProcessError::Spawn {
                command: command.display(),
                source: std::io::Error::other("simulated failure"),
            });
        }

        Ok(())
    }
}
