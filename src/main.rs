// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{anyhow, Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{warn, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::fs::File;
use std::io::BufReader;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use crate::app_config::Config;
use crate::extractor::Extractor;
use crate::plex::client::PlexClient;
use crate::transcoder::FfmpegTranscoder;

mod app_config;
mod errors;
mod extractor;
mod file_utils;
mod plex;
mod transcoder;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

fn level_filter(level: &app_config::LogLevel) -> LevelFilter {
    match level {
        app_config::LogLevel::Error => LevelFilter::Error,
        app_config::LogLevel::Warn => LevelFilter::Warn,
        app_config::LogLevel::Info => LevelFilter::Info,
        app_config::LogLevel::Debug => LevelFilter::Debug,
        app_config::LogLevel::Trace => LevelFilter::Trace,
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Extract subtitle tracks from a Plex library item (default command)
    #[command(alias = "extract")]
    Extract(ExtractArgs),

    /// Generate shell completions for plexsub
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct ExtractArgs {
    /// Plex server address, e.g. http://192.168.1.10:32400
    #[arg(value_name = "SERVER_URL")]
    server_url: String,

    /// Plex access token
    #[arg(value_name = "TOKEN")]
    token: String,

    /// Exact title of the library item
    #[arg(value_name = "TITLE")]
    title: String,

    /// Library section to search
    #[arg(short, long)]
    section: Option<String>,

    /// Directory subtitle files are written to
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// plexsub - Plex subtitle track extractor
///
/// Locates a library item by exact title, enumerates its embedded subtitle
/// streams, and saves each stream as a local subtitle file via ffmpeg.
#[derive(Parser, Debug)]
#[command(name = "plexsub")]
#[command(version = "1.0.0")]
#[command(about = "Extract subtitle tracks from a Plex library item")]
#[command(long_about = "plexsub connects to a Plex server, resolves a title to a library item and
extracts every embedded subtitle stream through ffmpeg.

Each stream is first converted to SRT; when the conversion fails (image-based
tracks such as PGS cannot become text), the same stream is retried once as a
stream copy into a .sup container. A failure after both attempts skips the
stream and never aborts the remaining ones.

EXAMPLES:
    plexsub http://plex.local:32400 TOKEN \"The Matrix\"
    plexsub -s \"Kids Movies\" http://plex.local:32400 TOKEN \"Cars\"
    plexsub -o /tmp/subs http://plex.local:32400 TOKEN \"Heat\"
    plexsub --log-level debug http://plex.local:32400 TOKEN \"Alien\"
    plexsub completions bash > plexsub.bash

CONFIGURATION:
    Section name, output directory, formats and timeouts are read from
    conf.json by default (created with defaults when missing). Command line
    flags override the file. Server address and token are never persisted.

OUTPUT:
    <output_dir>/<Title_With_Underscores>_subtitle_<n>.srt  (or .sup)")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Plex server address, e.g. http://192.168.1.10:32400
    #[arg(value_name = "SERVER_URL")]
    server_url: Option<String>,

    /// Plex access token
    #[arg(value_name = "TOKEN")]
    token: Option<String>,

    /// Exact title of the library item
    #[arg(value_name = "TITLE")]
    title: Option<String>,

    /// Library section to search
    #[arg(short, long)]
    section: Option<String>,

    /// Directory subtitle files are written to
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color code for log level
    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let color = Self::color_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(stderr, "{}{} {}\x1B[0m", color, now, record.args());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize the logger once with info level by default
    // We'll update the level after loading the config if needed
    CustomLogger::init(LevelFilter::Info)?;

    // Parse command line arguments using clap
    let cli = CommandLineOptions::parse();

    // Handle subcommands
    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "plexsub", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Extract(args)) => run_extract(args).await,
        None => {
            // Default behavior - use top-level args for backwards compatibility
            let server_url = cli
                .server_url
                .ok_or_else(|| anyhow!("SERVER_URL is required when no subcommand is specified"))?;
            let token = cli
                .token
                .ok_or_else(|| anyhow!("TOKEN is required when no subcommand is specified"))?;
            let title = cli
                .title
                .ok_or_else(|| anyhow!("TITLE is required when no subcommand is specified"))?;

            let extract_args = ExtractArgs {
                server_url,
                token,
                title,
                section: cli.section,
                output_dir: cli.output_dir,
                config_path: cli.config_path,
                log_level: cli.log_level,
            };
            run_extract(extract_args).await
        }
    }
}

async fn run_extract(options: ExtractArgs) -> Result<()> {
    // If log level is set via command line, apply it immediately
    if let Some(cmd_log_level) = &options.log_level {
        let config_log_level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(level_filter(&config_log_level));
    }

    // Load or create configuration
    let config_path = &options.config_path;
    let mut config = if Path::new(config_path).exists() {
        // Load existing configuration
        let file = File::open(config_path)
            .context(format!("Failed to open config file: {}", config_path))?;

        let reader = BufReader::new(file);
        let config: Config = serde_json::from_reader(reader)
            .context(format!("Failed to parse config file: {}", config_path))?;

        config
    } else {
        // Create default configuration if not exists
        warn!(
            "Config file not found at '{}', creating default config.",
            config_path
        );

        let config = Config::default();

        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;

        std::fs::write(config_path, config_json)
            .context(format!("Failed to write default config to file: {}", config_path))?;

        config
    };

    // Override config with CLI options if provided
    if let Some(section) = &options.section {
        config.section = section.clone();
    }

    if let Some(output_dir) = &options.output_dir {
        config.output_dir = output_dir.clone();
    }

    if let Some(log_level) = &options.log_level {
        config.log_level = log_level.clone().into();
    }

    // Validate the configuration after loading and overriding
    config
        .validate()
        .context("Configuration validation failed")?;

    // If log level was not set via command line, update it from config now
    if options.log_level.is_none() {
        log::set_max_level(level_filter(&config.log_level));
    }

    // Connection or token failures are fatal; nothing downstream can recover
    let client = PlexClient::new(
        &options.server_url,
        &options.token,
        Duration::from_secs(config.request_timeout_secs),
    )?;
    client.connect().await?;

    let transcoder = FfmpegTranscoder::new(Duration::from_secs(config.ffmpeg_timeout_secs));

    let extractor = Extractor::new(config, Arc::new(client), Arc::new(transcoder));
    extractor.run(&options.title).await?;

    // Per-stream failures and a missing title are reported through the log
    // output and do not produce a non-zero exit
    Ok(())
}
