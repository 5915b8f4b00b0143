use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::PathBuf;
use tempfile::TempDir;

/// 偽の img バイナリとパラメータファイルを置く一時ディレクトリ
pub struct TestProject {
    pub root: TempDir,
}

impl TestProject {
    pub fn new() -> Self {
        let root = tempfile::tempdir().unwrap();
        let project = Self { root };
        project.write_fake_img();
        project
    }

    /// 引数をログに追記し、stdout / stderr に1行ずつ書き、`fail-<action>` があれば失敗する img
    fn write_fake_img(&self) {
        let root = self.path();
        let script = format!(
            "#!/bin/sh\n\
             echo \"$*\" >> \"{log}\"\n\
             echo \"img stdout $1\"\n\
             echo \"img stderr $1\" >&2\n\
             if [ -f \"{root}/fail-$1\" ]; then exit 1; fi\n\
             exit 0\n",
            log = self.log_path().display(),
            root = root.display(),
        );

        let path = self.img_path();
        fs::write(&path, script).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    }

    pub fn path(&self) -> PathBuf {
        self.root.path().to_path_buf()
    }

    pub fn img_path(&self) -> PathBuf {
        self.root.path().join("img")
    }

    fn log_path(&self) -> PathBuf {
        self.root.path().join("img.log")
    }

    /// 指定したサブコマンドを失敗させる
    pub fn fail_on(&self, action: &str) {
        fs::write(self.root.path().join(format!("fail-{}", action)), "").unwrap();
    }

    /// 偽の img が受け取った引数（1行1呼び出し）
    pub fn calls(&self) -> Vec<String> {
        fs::read_to_string(self.log_path())
            .map(|log| log.lines().map(String::from).collect())
            .unwrap_or_default()
    }

    /// `/vela/...` 形式のパラメータファイルを書く
    #[allow(dead_code)]
    pub fn write_param(&self, file: &str, content: &str) {
        let path = self.root.path().join(file.trim_start_matches('/'));
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    /// 環境を切り離した vela-img コマンド
    #[allow(deprecated)]
    pub fn command(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::Command::cargo_bin("vela-img").unwrap();
        cmd.env_clear()
            .env("VELA_IMG_FILE_ROOT", self.path())
            .env("PARAMETER_IMG_BINARY", self.img_path());
        cmd
    }
}
