mod settings;

use clap::builder::BoolishValueParser;
use clap::{ArgAction, Parser};
use colored::Colorize;
use std::process::ExitCode;
use vela_img_build::ProcessRunner;
use vela_img_config::{DEFAULT_LOG_LEVEL, Resolver, parameter as params, parse_log_level};

#[derive(Parser, Debug)]
#[command(name = "vela-img")]
#[command(version, about = "Vela img plugin for building and publishing images", long_about = None)]
struct Cli {
    /// set log level - options: (trace|debug|info|warn|error|fatal|panic)
    #[arg(long = "log.level", env = "PARAMETER_LOG_LEVEL", value_name = "LEVEL")]
    log_level: Option<String>,

    /// validate the configuration and print the img commands without running them
    #[arg(
        long = "dry-run",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true",
        action = ArgAction::Set,
        value_parser = BoolishValueParser::new(),
        value_name = "BOOL"
    )]
    dry_run: Option<bool>,

    /// path to the img executable
    #[arg(long = "img.binary", env = "PARAMETER_IMG_BINARY", hide = true)]
    img_binary: Option<String>,

    /// build time variables (KEY=VALUE)
    #[arg(
        long = "build.build-args",
        env = "PARAMETER_BUILD_ARGS",
        value_delimiter = ',',
        value_name = "ARG"
    )]
    build_args: Vec<String>,

    /// images to consider as cache sources
    #[arg(
        long = "build.cache-from",
        env = "PARAMETER_CACHE_FROM",
        value_delimiter = ',',
        value_name = "IMAGE"
    )]
    cache_from: Vec<String>,

    /// path to the context you want img to run [default: .]
    #[arg(long = "build.directory", env = "PARAMETER_DIRECTORY", value_name = "DIR")]
    directory: Option<String>,

    /// name and path to the Dockerfile
    #[arg(long = "build.file", env = "PARAMETER_FILE", value_name = "PATH")]
    file: Option<String>,

    /// metadata for the image (KEY=VALUE)
    #[arg(
        long = "build.labels",
        env = "PARAMETER_LABELS",
        value_delimiter = ',',
        value_name = "LABEL"
    )]
    labels: Vec<String>,

    /// do not use cache when building the image
    #[arg(
        long = "build.no-cache",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true",
        action = ArgAction::Set,
        value_parser = BoolishValueParser::new(),
        value_name = "BOOL"
    )]
    no_cache: Option<bool>,

    /// use the non-console progress UI
    #[arg(
        long = "build.no-console",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true",
        action = ArgAction::Set,
        value_parser = BoolishValueParser::new(),
        value_name = "BOOL"
    )]
    no_console: Option<bool>,

    /// BuildKit output specification (e.g. type=tar,dest=build.tar)
    #[arg(long = "build.output", env = "PARAMETER_OUTPUT", value_name = "SPEC")]
    output: Option<String>,

    /// platforms for which the image should be built
    #[arg(
        long = "build.platforms",
        env = "PARAMETER_PLATFORMS",
        value_delimiter = ',',
        value_name = "PLATFORM"
    )]
    platforms: Vec<String>,

    /// name and optionally a tag in the 'name:tag' format
    #[arg(
        long = "build.tags",
        env = "PARAMETER_TAGS",
        value_delimiter = ',',
        value_name = "TAG"
    )]
    tags: Vec<String>,

    /// target build stage to build
    #[arg(long = "build.target", env = "PARAMETER_TARGET", value_name = "STAGE")]
    target: Option<String>,

    /// registry name to communicate with [default: index.docker.io]
    #[arg(long = "config.name", env = "PARAMETER_REGISTRY", value_name = "URL")]
    registry_name: Option<String>,

    /// user name for communication with the registry
    #[arg(long = "config.username", env = "PARAMETER_USERNAME")]
    username: Option<String>,

    /// password for communication with the registry
    #[arg(long = "config.password", env = "PARAMETER_PASSWORD", hide_env_values = true)]
    password: Option<String>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{:#}", e);
            eprintln!("{} {:#}", "✗".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let resolver = Resolver::from_env();

    // ログ出力はstderr（stdoutは img の出力に使う）
    let level = resolver.string_or(&params::LOG_LEVEL, cli.log_level.clone(), DEFAULT_LOG_LEVEL)?;
    tracing_subscriber::fmt()
        .with_max_level(parse_log_level(&level))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    tracing::info!(
        code = "https://github.com/go-vela/vela-img",
        docs = "https://go-vela.github.io/docs/plugins/registry/img",
        registry = "https://hub.docker.com/r/target/vela-img",
        "Vela Img Plugin"
    );

    let mut plugin = settings::load(&cli, &resolver)?;

    if resolver.flag(&params::DRY_RUN, cli.dry_run)? {
        tracing::info!("dry run enabled, commands will not be executed");
        plugin.dry_run(&mut std::io::stdout().lock())?;
        println!("{}", "✓ configuration is valid".green().bold());
        return Ok(());
    }

    plugin.run(&mut ProcessRunner::new())?;
    tracing::info!("image build completed");

    Ok(())
}
