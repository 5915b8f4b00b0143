//! CLI引数と環境変数・パラメータファイルからプラグインを組み立てる

use crate::Cli;
use vela_img_build::{BuildConfig, Plugin, RegistryConfig};
use vela_img_config::{
    DEFAULT_DIRECTORY, DEFAULT_REGISTRY, Resolver, Result, parameter as params,
};

/// ビルド設定を解決
pub fn build_config(cli: &Cli, resolver: &Resolver) -> Result<BuildConfig> {
    Ok(BuildConfig {
        build_args: resolver.list(&params::BUILD_ARGS, cli.build_args.clone())?,
        cache_from: resolver.list(&params::CACHE_FROM, cli.cache_from.clone())?,
        directory: resolver.string_or(
            &params::DIRECTORY,
            cli.directory.clone(),
            DEFAULT_DIRECTORY,
        )?,
        dockerfile: resolver.lookup(&params::FILE, cli.file.clone())?,
        labels: resolver.list(&params::LABELS, cli.labels.clone())?,
        no_cache: resolver.flag(&params::NO_CACHE, cli.no_cache)?,
        no_console: resolver.flag(&params::NO_CONSOLE, cli.no_console)?,
        output: resolver.lookup(&params::OUTPUT, cli.output.clone())?,
        platforms: resolver.list(&params::PLATFORMS, cli.platforms.clone())?,
        tags: resolver.list(&params::TAGS, cli.tags.clone())?,
        target: resolver.lookup(&params::TARGET, cli.target.clone())?,
    })
}

/// レジストリ設定を解決
pub fn registry_config(cli: &Cli, resolver: &Resolver) -> Result<RegistryConfig> {
    Ok(RegistryConfig {
        url: resolver.string_or(
            &params::REGISTRY_NAME,
            cli.registry_name.clone(),
            DEFAULT_REGISTRY,
        )?,
        username: resolver.string_or(&params::REGISTRY_USERNAME, cli.username.clone(), "")?,
        password: resolver.string_or(&params::REGISTRY_PASSWORD, cli.password.clone(), "")?,
    })
}

/// 設定一式からプラグインを作成
pub fn load(cli: &Cli, resolver: &Resolver) -> Result<Plugin> {
    let build = build_config(cli, resolver)?;
    let registry = registry_config(cli, resolver)?;
    let program = resolver.string_or(
        &params::IMG_BINARY,
        cli.img_binary.clone(),
        vela_img_build::IMG_BINARY,
    )?;

    tracing::debug!("loaded build configuration: {:?}", build);
    tracing::debug!("loaded registry configuration: {:?}", registry);

    Ok(Plugin::new(build, registry).with_program(program))
}
