#![cfg(unix)]

mod common;
use common::TestProject;
use predicates::prelude::*;
use serial_test::serial;

/// CLIヘルプにフラグが表示されることを確認
#[test]
fn test_cli_help() {
    #[allow(deprecated)]
    let mut cmd = assert_cmd::Command::cargo_bin("vela-img").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Vela img plugin"))
        .stdout(predicate::str::contains("--build.tags"))
        .stdout(predicate::str::contains("--config.password"))
        .stdout(predicate::str::contains("--dry-run"));
}

/// 正常系: version → login → build の順で実行され、img の出力がそのまま流れる
#[test]
#[serial]
fn test_run_success() {
    let project = TestProject::new();

    project
        .command()
        .env("PARAMETER_TAGS", "image:tag")
        .env("PARAMETER_USERNAME", "octocat")
        .env("PARAMETER_PASSWORD", "secret")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "login -p=******** -u=octocat index.docker.io",
        ))
        .stdout(predicate::str::contains("secret").not())
        .stdout(predicate::str::contains("img stdout version"))
        .stdout(predicate::str::contains("img stdout build"))
        .stderr(predicate::str::contains("img stderr login"))
        .stderr(predicate::str::contains("img stderr build"));

    assert_eq!(
        project.calls(),
        vec![
            "version",
            "login -p=secret -u=octocat index.docker.io",
            "build -t=image:tag .",
        ]
    );
}

/// 全フラグ指定時の build 引数
#[test]
#[serial]
fn test_run_all_build_flags() {
    let project = TestProject::new();

    project
        .command()
        .env("PARAMETER_USERNAME", "octocat")
        .env("PARAMETER_PASSWORD", "secret")
        .args([
            "--build.build-args",
            "FOO",
            "--build.cache-from",
            "registry/img",
            "--build.file",
            "Dockerfile",
            "--build.labels",
            "sha",
            "--build.no-cache",
            "--build.no-console",
            "--build.output",
            "type=tar,dest=build.tar",
            "--build.platforms",
            "linux/amd64",
            "--build.tags",
            "image:tag",
            "--build.target",
            "foo",
        ])
        .assert()
        .success();

    assert_eq!(
        project.calls().last().map(String::as_str),
        Some(
            "build --build-arg \"FOO\" --cache-from \"registry/img\" -f=Dockerfile \
             --label \"sha\" --no-cache --no-console --output type=tar,dest=build.tar \
             --platform \"linux/amd64\" -t=image:tag --target foo ."
        )
    );
}

/// タグ未指定はプロセスを起動せずに失敗
#[test]
#[serial]
fn test_missing_tag() {
    let project = TestProject::new();

    project
        .command()
        .env("PARAMETER_USERNAME", "octocat")
        .env("PARAMETER_PASSWORD", "secret")
        .assert()
        .failure()
        .stderr(predicate::str::contains("no build tag provided"));

    assert!(project.calls().is_empty());
}

/// パスワード未指定は設定エラー
#[test]
#[serial]
fn test_missing_password() {
    let project = TestProject::new();

    project
        .command()
        .env("PARAMETER_TAGS", "image:tag")
        .env("PARAMETER_USERNAME", "octocat")
        .assert()
        .failure()
        .stderr(predicate::str::contains("no config password provided"));

    assert!(project.calls().is_empty());
}

/// build の失敗はプラグインの失敗になる
#[test]
#[serial]
fn test_build_failure() {
    let project = TestProject::new();
    project.fail_on("build");

    project
        .command()
        .env("PARAMETER_TAGS", "image:tag")
        .env("PARAMETER_USERNAME", "octocat")
        .env("PARAMETER_PASSWORD", "secret")
        .assert()
        .failure()
        .stderr(predicate::str::contains("exited with"));

    assert_eq!(project.calls().len(), 3);
}

/// version が失敗したら login / build は実行されない
#[test]
#[serial]
fn test_version_failure_aborts() {
    let project = TestProject::new();
    project.fail_on("version");

    project
        .command()
        .env("PARAMETER_TAGS", "image:tag")
        .env("PARAMETER_USERNAME", "octocat")
        .env("PARAMETER_PASSWORD", "secret")
        .assert()
        .failure();

    assert_eq!(project.calls(), vec!["version"]);
}

/// login の失敗で build は実行されない
#[test]
#[serial]
fn test_login_failure_aborts() {
    let project = TestProject::new();
    project.fail_on("login");

    project
        .command()
        .env("PARAMETER_TAGS", "image:tag")
        .env("PARAMETER_USERNAME", "octocat")
        .env("PARAMETER_PASSWORD", "secret")
        .assert()
        .failure()
        .stderr(predicate::str::contains("secret").not());

    assert_eq!(project.calls().len(), 2);
}

/// img が存在しない場合
#[test]
#[serial]
fn test_missing_binary() {
    let project = TestProject::new();

    project
        .command()
        .env("PARAMETER_IMG_BINARY", "/nonexistent/img")
        .env("PARAMETER_TAGS", "image:tag")
        .env("PARAMETER_USERNAME", "octocat")
        .env("PARAMETER_PASSWORD", "secret")
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to launch"));
}

/// dry-run はコマンドを表示するだけ
#[test]
#[serial]
fn test_dry_run() {
    let project = TestProject::new();

    project
        .command()
        .arg("--dry-run")
        .env("PARAMETER_TAGS", "image:tag")
        .env("PARAMETER_USERNAME", "octocat")
        .env("PARAMETER_PASSWORD", "secret")
        .assert()
        .success()
        .stdout(predicate::str::contains("version"))
        .stdout(predicate::str::contains("login -p=******** -u=octocat"))
        .stdout(predicate::str::contains("build -t=image:tag ."))
        .stdout(predicate::str::contains("configuration is valid"));

    assert!(project.calls().is_empty());
}

/// dry-run も環境変数で有効にできる
#[test]
#[serial]
fn test_dry_run_from_env() {
    let project = TestProject::new();

    project
        .command()
        .env("PARAMETER_DRY_RUN", "true")
        .env("PARAMETER_TAGS", "image:tag")
        .env("PARAMETER_USERNAME", "octocat")
        .env("PARAMETER_PASSWORD", "secret")
        .assert()
        .success();

    assert!(project.calls().is_empty());
}

/// `--dry-run=false` は環境変数の dry-run を打ち消す
#[test]
#[serial]
fn test_dry_run_flag_false_overrides_env() {
    let project = TestProject::new();

    project
        .command()
        .arg("--dry-run=false")
        .env("PARAMETER_DRY_RUN", "true")
        .env("PARAMETER_TAGS", "image:tag")
        .env("PARAMETER_USERNAME", "octocat")
        .env("PARAMETER_PASSWORD", "secret")
        .assert()
        .success()
        .stdout(predicate::str::contains("configuration is valid").not());

    assert_eq!(project.calls().len(), 3);
}

/// パラメータ / シークレットファイルから設定を読み込む
#[test]
#[serial]
fn test_parameter_files() {
    let project = TestProject::new();
    project.write_param("/vela/parameters/img/build/tags", "file:1,file:2\n");
    project.write_param("/vela/parameters/img/build/directory", "app\n");
    project.write_param("/vela/parameters/img/registry/name", "ghcr.io\n");
    project.write_param("/vela/secrets/img/registry/username", "octocat\n");
    project.write_param("/vela/secrets/img/registry/password", "secret\n");

    project.command().assert().success();

    assert_eq!(
        project.calls(),
        vec![
            "version",
            "login -p=secret -u=octocat ghcr.io",
            "build -t=file:1 file:2 app",
        ]
    );
}

/// フラグ > 環境変数 > ファイル
#[test]
#[serial]
fn test_precedence() {
    let project = TestProject::new();
    project.write_param("/vela/parameters/img/build/tags", "file:tag");
    project.write_param("/vela/parameters/img/build/target", "file-stage");

    project
        .command()
        .arg("--build.tags")
        .arg("flag:tag")
        .env("PARAMETER_TAGS", "env:tag")
        .env("BUILD_TARGET", "env-stage")
        .env("PARAMETER_USERNAME", "octocat")
        .env("PARAMETER_PASSWORD", "secret")
        .assert()
        .success();

    assert_eq!(
        project.calls().last().map(String::as_str),
        Some("build -t=flag:tag --target env-stage .")
    );
}

/// 不正なログレベルは INFO として扱う
#[test]
#[serial]
fn test_unknown_log_level() {
    let project = TestProject::new();

    project
        .command()
        .args(["--log.level", "verbose", "--dry-run"])
        .env("PARAMETER_TAGS", "image:tag")
        .env("PARAMETER_USERNAME", "octocat")
        .env("PARAMETER_PASSWORD", "secret")
        .assert()
        .success()
        .stderr(predicate::str::contains("Vela Img Plugin"));
}
