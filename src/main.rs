// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::too_many_arguments)]

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::Write;
use std::path::PathBuf;

use crate::app_config::Config;
use app_controller::Controller;

mod app_config;
mod app_controller;
mod autofix;
mod document;
mod errors;
mod file_utils;
mod issue;
mod lexer;
mod providers;
mod report;
mod translation;
mod validation;

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

impl From<app_config::LogLevel> for LevelFilter {
    fn from(level: app_config::LogLevel) -> Self {
        match level {
            app_config::LogLevel::Error => LevelFilter::Error,
            app_config::LogLevel::Warn => LevelFilter::Warn,
            app_config::LogLevel::Info => LevelFilter::Info,
            app_config::LogLevel::Debug => LevelFilter::Debug,
            app_config::LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate translated candidates against their sources
    Validate {
        /// Source file or directory (ground truth)
        #[arg(value_name = "SOURCE_PATH")]
        source_path: PathBuf,

        /// Candidate file or directory (the translation attempt)
        #[arg(value_name = "CANDIDATE_PATH")]
        candidate_path: PathBuf,

        /// Glossary term-list file (sourceTerm : mandatedTargetTerm)
        #[arg(short, long)]
        glossary: Option<PathBuf>,

        /// Directory for validation reports
        #[arg(short, long, default_value = "reports")]
        report_dir: PathBuf,
    },

    /// Auto-fix mechanical macro corruption, then re-validate
    Fix {
        /// Source file or directory (ground truth)
        #[arg(value_name = "SOURCE_PATH")]
        source_path: PathBuf,

        /// Candidate file or directory to fix
        #[arg(value_name = "CANDIDATE_PATH")]
        candidate_path: PathBuf,

        /// Glossary term-list file
        #[arg(short, long)]
        glossary: Option<PathBuf>,

        /// Directory for fixed documents and reports
        #[arg(short, long, default_value = "fixed")]
        output_dir: PathBuf,
    },

    /// Translate source files into candidates and validate the results
    Translate {
        /// Source file or directory to translate
        #[arg(value_name = "SOURCE_PATH")]
        source_path: PathBuf,

        /// Glossary term-list file
        #[arg(short, long)]
        glossary: Option<PathBuf>,

        /// Directory for translated candidates and reports
        #[arg(short, long, default_value = "translated")]
        output_dir: PathBuf,

        /// Force overwrite of existing output files
        #[arg(short, long)]
        force_overwrite: bool,
    },

    /// Generate shell completions for tweeguard
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// TweeGuard - localization validation for Twee game scripts
///
/// Validates that a translated .twee file preserves every code element
/// the game runtime depends on, repairs known mechanical corruption,
/// and optionally drives the translation itself.
#[derive(Parser, Debug)]
#[command(name = "tweeguard")]
#[command(version = "1.0.0")]
#[command(about = "Localization validation for Twee game scripts")]
#[command(long_about = "TweeGuard compares translated Twee documents against their sources,
checking passage headers, link destinations, variables, macros, glossary
terms and content quality, with markdown reports per file.

EXAMPLES:
    tweeguard validate src/ translated/              # Validate a directory pair
    tweeguard validate -g glossary.txt a.twee b.twee # Validate with a glossary
    tweeguard fix src/ translated/ -o fixed/         # Repair macro corruption
    tweeguard translate src/ -o translated/          # Translate then validate
    tweeguard completions bash > tweeguard.bash      # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a
    different file with --config. If the config file doesn't exist, a
    default one will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json", global = true)]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum, global = true)]
    log_level: Option<CliLogLevel>,
}

/// Custom logger writing colored lines to stderr
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

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
            let now = chrono::Local::now().format("%H:%M:%S%.3f");
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
    // Initialize the logger once with info level by default; the level
    // is updated after loading the config
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();

    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(*shell, &mut cmd, "tweeguard", &mut std::io::stdout());
        return Ok(());
    }

    // CLI log level applies immediately; the config value applies once
    // loaded, unless the CLI already set one
    if let Some(level) = &cli.log_level {
        log::set_max_level(app_config::LogLevel::from(level.clone()).into());
    }

    let mut config =
        Config::load_or_create(&cli.config_path).context("Failed to load configuration")?;
    if let Some(level) = &cli.log_level {
        config.log_level = level.clone().into();
    } else {
        log::set_max_level(config.log_level.into());
    }

    let controller = Controller::with_config(config)?;

    let summary = match cli.command {
        Commands::Validate {
            source_path,
            candidate_path,
            glossary,
            report_dir,
        } => controller.run_validate(
            &source_path,
            &candidate_path,
            glossary.as_deref(),
            &report_dir,
        )?,
        Commands::Fix {
            source_path,
            candidate_path,
            glossary,
            output_dir,
        } => controller.run_fix(
            &source_path,
            &candidate_path,
            glossary.as_deref(),
            &output_dir,
        )?,
        Commands::Translate {
            source_path,
            glossary,
            output_dir,
            force_overwrite,
        } => {
            controller
                .run_translate(&source_path, glossary.as_deref(), &output_dir, force_overwrite)
                .await?
        }
        Commands::Completions { .. } => unreachable!(),
    };

    if summary.failed > 0 {
        std::process::exit(1);
    }
    Ok(())
}
