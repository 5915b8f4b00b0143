//! プラグインが受け付けるパラメータの定義
//!
//! フラグ名・環境変数・ファイルパスの対応表。CLI側の clap 定義と
//! [`Resolver`](crate::Resolver) の両方がここを参照します。

/// 1つの設定値の取得元
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Parameter {
    /// CLIフラグ名（`--` なし）
    pub name: &'static str,
    /// 参照する環境変数（先頭が優先）
    pub env: &'static [&'static str],
    /// 参照するファイル（先頭が優先）
    pub files: &'static [&'static str],
}

pub const LOG_LEVEL: Parameter = Parameter {
    name: "log.level",
    env: &["PARAMETER_LOG_LEVEL", "VELA_LOG_LEVEL", "IMG_LOG_LEVEL"],
    files: &[
        "/vela/parameters/img/log_level",
        "/vela/secrets/img/log_level",
    ],
};

pub const DRY_RUN: Parameter = Parameter {
    name: "dry-run",
    env: &["PARAMETER_DRY_RUN"],
    files: &[],
};

pub const IMG_BINARY: Parameter = Parameter {
    name: "img.binary",
    env: &["PARAMETER_IMG_BINARY"],
    files: &[],
};

// build

pub const BUILD_ARGS: Parameter = Parameter {
    name: "build.build-args",
    env: &["PARAMETER_BUILD_ARGS", "BUILD_BUILD_ARGS"],
    files: &[
        "/vela/parameters/img/build/build_args",
        "/vela/secrets/img/build/build_args",
    ],
};

pub const CACHE_FROM: Parameter = Parameter {
    name: "build.cache-from",
    env: &["PARAMETER_CACHE_FROM", "BUILD_CACHE_FROM"],
    files: &[
        "/vela/parameters/img/build/cache_from",
        "/vela/secrets/img/build/cache_from",
    ],
};

pub const DIRECTORY: Parameter = Parameter {
    name: "build.directory",
    env: &["PARAMETER_DIRECTORY", "BUILD_DIRECTORY"],
    files: &[
        "/vela/parameters/img/build/directory",
        "/vela/secrets/img/build/directory",
    ],
};

pub const FILE: Parameter = Parameter {
    name: "build.file",
    env: &["PARAMETER_FILE", "BUILD_FILE"],
    files: &[
        "/vela/parameters/img/build/file",
        "/vela/secrets/img/build/file",
    ],
};

pub const LABELS: Parameter = Parameter {
    name: "build.labels",
    env: &["PARAMETER_LABELS", "BUILD_LABELS"],
    files: &[
        "/vela/parameters/img/build/labels",
        "/vela/secrets/img/build/labels",
    ],
};

pub const NO_CACHE: Parameter = Parameter {
    name: "build.no-cache",
    env: &["PARAMETER_NO_CACHE", "BUILD_NO_CACHE"],
    files: &[
        "/vela/parameters/img/build/no_cache",
        "/vela/secrets/img/build/no_cache",
    ],
};

pub const NO_CONSOLE: Parameter = Parameter {
    name: "build.no-console",
    env: &["PARAMETER_NO_CONSOLE", "BUILD_NO_CONSOLE"],
    files: &[
        "/vela/parameters/img/build/no_console",
        "/vela/secrets/img/build/no_console",
    ],
};

pub const OUTPUT: Parameter = Parameter {
    name: "build.output",
    env: &["PARAMETER_OUTPUT", "BUILD_OUTPUT"],
    files: &[
        "/vela/parameters/img/build/output",
        "/vela/secrets/img/build/output",
    ],
};

pub const PLATFORMS: Parameter = Parameter {
    name: "build.platforms",
    env: &["PARAMETER_PLATFORMS", "BUILD_PLATFORMS"],
    files: &[
        "/vela/parameters/img/build/platform",
        "/vela/secrets/img/build/platform",
    ],
};

pub const TAGS: Parameter = Parameter {
    name: "build.tags",
    env: &["PARAMETER_TAGS", "BUILD_TAGS"],
    files: &[
        "/vela/parameters/img/build/tags",
        "/vela/secrets/img/build/tags",
    ],
};

pub const TARGET: Parameter = Parameter {
    name: "build.target",
    env: &["PARAMETER_TARGET", "BUILD_TARGET"],
    files: &[
        "/vela/parameters/img/build/target",
        "/vela/secrets/img/build/target",
    ],
};

// registry

pub const REGISTRY_NAME: Parameter = Parameter {
    name: "config.name",
    env: &["PARAMETER_REGISTRY", "REGISTRY_NAME"],
    files: &[
        "/vela/parameters/img/registry/name",
        "/vela/secrets/docker/registry/name",
    ],
};

pub const REGISTRY_USERNAME: Parameter = Parameter {
    name: "config.username",
    env: &["PARAMETER_USERNAME", "REGISTRY_USERNAME", "DOCKER_USERNAME"],
    files: &[
        "/vela/parameters/img/registry/username",
        "/vela/secrets/img/registry/username",
        "/vela/secrets/img/username",
    ],
};

pub const REGISTRY_PASSWORD: Parameter = Parameter {
    name: "config.password",
    env: &["PARAMETER_PASSWORD", "REGISTRY_PASSWORD", "DOCKER_PASSWORD"],
    files: &[
        "/vela/parameters/img/registry/password",
        "/vela/secrets/img/registry/password",
        "/vela/secrets/img/password",
    ],
};

/// デフォルトのレジストリ
pub const DEFAULT_REGISTRY: &str = "index.docker.io";

/// デフォルトのビルドコンテキスト
pub const DEFAULT_DIRECTORY: &str = ".";

/// デフォルトのログレベル
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// 全パラメータ（ドキュメント生成・テスト用）
pub const ALL: &[Parameter] = &[
    LOG_LEVEL,
    DRY_RUN,
    IMG_BINARY,
    BUILD_ARGS,
    CACHE_FROM,
    DIRECTORY,
    FILE,
    LABELS,
    NO_CACHE,
    NO_CONSOLE,
    OUTPUT,
    PLATFORMS,
    TAGS,
    TARGET,
    REGISTRY_NAME,
    REGISTRY_USERNAME,
    REGISTRY_PASSWORD,
];
