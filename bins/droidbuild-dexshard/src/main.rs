//! Droidbuild dex-sharding action
//!
//! Desugars and dex-compiles an input jar, then shards the resulting dex
//! entries across the configured output archives. Invoked by the build
//! system with either direct flags or a `-flagfile=` parameter file.

use clap::Parser;
use droidbuild_core::error::exit_codes;
use droidbuild_core::flagfile;
use droidbuild_dex::config::{ShardingConfig, DEFAULT_MIN_SDK_VERSION};
use droidbuild_dex::pipeline;
use std::path::PathBuf;
use std::process::ExitCode;

/// Flags the build system passes with a single leading dash.
const SINGLE_DASH_FLAGS: &[&str] = &[
    "android_jar",
    "classpath",
    "desugar_core_libs",
    "desugared_lib_config",
    "in",
    "out",
    "min_sdk_version",
];

#[derive(Parser)]
#[command(name = "droidbuild-dexshard")]
#[command(about = "Desugar, dex, and shard an input jar across output archives")]
#[command(version)]
struct Cli {
    /// Path to the platform android.jar
    #[arg(long = "android_jar", value_name = "PATH")]
    android_jar: PathBuf,

    /// Compile classpath entries
    #[arg(
        long = "classpath",
        value_name = "PATH",
        value_delimiter = ',',
        action = clap::ArgAction::Append
    )]
    classpath: Vec<PathBuf>,

    /// Enable core library desugaring
    #[arg(
        long = "desugar_core_libs",
        value_name = "BOOL",
        action = clap::ArgAction::Set,
        default_value_t = false
    )]
    desugar_core_libs: bool,

    /// JSON config for library desugaring
    #[arg(long = "desugared_lib_config", value_name = "PATH")]
    desugared_lib_config: Option<PathBuf>,

    /// Path to the input jar
    #[arg(long = "in", value_name = "PATH")]
    input: PathBuf,

    /// Output path(s); more than one shards the dex output across them
    #[arg(
        long = "out",
        value_name = "PATH",
        value_delimiter = ',',
        action = clap::ArgAction::Append,
        required = true
    )]
    out: Vec<PathBuf>,

    /// Minimum targeted SDK version; >= 24 enables default methods in interfaces
    #[arg(
        long = "min_sdk_version",
        value_name = "INT",
        default_value_t = DEFAULT_MIN_SDK_VERSION
    )]
    min_sdk_version: u32,

    /// Run as a persistent worker (accepted, not implemented)
    #[arg(
        long = "persistent_worker",
        value_name = "BOOL",
        action = clap::ArgAction::Set,
        default_value_t = false
    )]
    persistent_worker: bool,
}

mod status {
    use owo_colors::OwoColorize;

    pub fn success(message: &str) {
        println!("{} {}", "✓".green(), message);
    }

    pub fn error(message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    pub fn warning(message: &str) {
        eprintln!("{} {}", "⚠".yellow(), message);
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    ExitCode::from(run() as u8)
}

fn run() -> i32 {
    let raw_args: Vec<String> = std::env::args().skip(1).collect();

    let args = match flagfile::expand_args(raw_args) {
        Ok(args) => args,
        Err(e) => {
            status::error(&e.to_string());
            return e.exit_code();
        }
    };
    let args = flagfile::normalize_single_dash_flags(args, SINGLE_DASH_FLAGS);

    let argv = std::iter::once("droidbuild-dexshard".to_string()).chain(args);
    let cli = match Cli::try_parse_from(argv) {
        Ok(cli) => cli,
        Err(e) => {
            let is_usage_error = e.use_stderr();
            let _ = e.print();
            return if is_usage_error {
                exit_codes::CONFIG_ERROR
            } else {
                // --help / --version
                exit_codes::SUCCESS
            };
        }
    };

    if cli.persistent_worker {
        status::warning("--persistent_worker is accepted but not implemented");
    }

    let config = ShardingConfig {
        android_jar: cli.android_jar,
        classpath: cli.classpath,
        desugar_core_libs: cli.desugar_core_libs,
        desugared_lib_config: cli.desugared_lib_config,
        input_jar: cli.input,
        outputs: cli.out,
        min_sdk_version: cli.min_sdk_version,
    };

    match pipeline::run(&config) {
        Ok(()) => {
            status::success(&format!("Wrote {} output file(s)", config.shard_count()));
            exit_codes::SUCCESS
        }
        Err(e) => {
            status::error(&e.to_string());
            e.exit_code()
        }
    }
}
