//! lamco-mouse - Mouse Input Replay Tool
//!
//! Entry point for the replay binary. Runs a recorded event script through
//! the mouse device and prints the per-frame state as JSON on stdout.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use lamco_mouse::config::{Config, Overrides};
use lamco_mouse::replay::{self, Script};

/// Command-line arguments for lamco-mouse
#[derive(Parser, Debug)]
#[command(name = "lamco-mouse")]
#[command(version, about = "Replay recorded mouse input through the capture loop", long_about = None)]
pub struct Args {
    /// Configuration file path
    #[arg(short, long, env = "LAMCO_MOUSE_CONFIG", default_value = "lamco-mouse.toml")]
    pub config: String,

    /// Event script to replay (JSON)
    #[arg(short, long, env = "LAMCO_MOUSE_SCRIPT")]
    pub script: PathBuf,

    /// Confine the pointer (overrides config)
    #[arg(long)]
    pub grab: Option<bool>,

    /// Hide the cursor (overrides config)
    #[arg(long)]
    pub hide: Option<bool>,

    /// Poll state only, no listener dispatch
    #[arg(long)]
    pub unbuffered: bool,

    /// Verbose logging (can be specified multiple times)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Log format (json|pretty|compact)
    #[arg(long, value_parser = ["json", "pretty", "compact"])]
    pub log_format: Option<String>,

    /// Write logs to file (in addition to stderr)
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let loaded = Config::load(&args.config);
    let config_error = loaded.as_ref().err().map(|e| format!("{:#}", e));
    let config = loaded
        .unwrap_or_else(|_| Config::default_config())
        .with_overrides(Overrides {
            grab: args.grab,
            hide: args.hide,
            unbuffered: args.unbuffered,
            log_format: args.log_format.clone(),
            log_file: args.log_file.clone(),
        });

    if let Err(e) = config.validate() {
        eprintln!("{}", lamco_mouse::utils::format_user_error(&e));
        return Err(e);
    }

    // Kept alive until exit so the file writer flushes
    let _log_guard = init_logging(&config, args.verbose)?;

    info!("════════════════════════════════════════════════════════");
    info!("  lamco-mouse v{}", env!("CARGO_PKG_VERSION"));
    info!("  Built: {} {}", env!("BUILD_DATE"), env!("BUILD_TIME"));
    info!("  Commit: {}", env!("GIT_HASH"));
    info!("  Profile: {}", if cfg!(debug_assertions) { "debug" } else { "release" });
    info!("════════════════════════════════════════════════════════");

    if let Some(e) = config_error {
        tracing::warn!("Failed to load config: {}, using defaults", e);
    }
    tracing::debug!("Config: {:?}", config);

    if let Err(e) = run(&args, &config) {
        eprintln!("{}", lamco_mouse::utils::format_user_error(&e));
        return Err(e);
    }

    Ok(())
}

fn run(args: &Args, config: &Config) -> Result<()> {
    let script = Script::load(&args.script)?;
    info!(
        "Replaying {} frames from {}",
        script.frames.len(),
        args.script.display()
    );

    let report = replay::run(config.device.to_device_settings(), &script)?;

    let json = serde_json::to_string_pretty(&report).context("Failed to serialize report")?;
    println!("{}", json);
    Ok(())
}

fn init_logging(config: &Config, verbose: u8) -> Result<Option<WorkerGuard>> {
    let log_level = match verbose {
        0 => config.logging.level.as_str(),
        1 => "debug",
        _ => "trace",
    };

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new(format!("lamco_mouse={},warn", log_level))
    });

    let (file_writer, guard) = match &config.logging.log_file {
        Some(path) => {
            let (writer, guard) = tracing_appender::non_blocking(file_appender(path)?);
            (Some(writer), Some(guard))
        }
        None => (None, None),
    };

    match config.logging.format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(std::io::stderr),
                )
                .with(file_writer.map(|writer| {
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(writer)
                        .with_ansi(false)
                }))
                .init();
        }
        "compact" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .compact()
                        .with_writer(std::io::stderr),
                )
                .with(file_writer.map(|writer| {
                    tracing_subscriber::fmt::layer()
                        .compact()
                        .with_writer(writer)
                        .with_ansi(false)
                }))
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .pretty()
                        .with_writer(std::io::stderr),
                )
                .with(file_writer.map(|writer| {
                    tracing_subscriber::fmt::layer()
                        .with_writer(writer)
                        .with_ansi(false)
                }))
                .init();
        }
    }

    if let Some(path) = &config.logging.log_file {
        info!("Logging to file: {}", path.display());
    }

    Ok(guard)
}

fn file_appender(path: &Path) -> Result<tracing_appender::rolling::RollingFileAppender> {
    let file_name = path
        .file_name()
        .with_context(|| format!("Log file path has no file name: {}", path.display()))?;
    let directory = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    Ok(tracing_appender::rolling::never(directory, file_name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_format_restricted() {
        let args = Args::try_parse_from(["lamco-mouse", "-s", "s.json", "--log-format", "json"]);
        assert_eq!(args.unwrap().log_format.as_deref(), Some("json"));

        let args = Args::try_parse_from(["lamco-mouse", "-s", "s.json", "--log-format", "xml"]);
        assert!(args.is_err());
    }

    #[test]
    fn test_bool_overrides_parse() {
        let args =
            Args::try_parse_from(["lamco-mouse", "-s", "s.json", "--grab", "false", "-vv"]).unwrap();
        assert_eq!(args.grab, Some(false));
        assert_eq!(args.hide, None);
        assert_eq!(args.verbose, 2);
    }
}
