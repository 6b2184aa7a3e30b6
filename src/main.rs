// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{anyhow, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{info, warn, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::Write;
use std::path::{Path, PathBuf};

use subconv::app_config::{Config, LogLevel};
use subconv::app_controller::{ConversionStatus, Controller};

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => LogLevel::Error,
            CliLogLevel::Warn => LogLevel::Warn,
            CliLogLevel::Info => LogLevel::Info,
            CliLogLevel::Debug => LogLevel::Debug,
            CliLogLevel::Trace => LogLevel::Trace,
        }
    }
}

#[derive(Parser, Debug)]
struct ConvertArgs {
    /// Input subtitle file or directory to process
    #[arg(value_name = "INPUT_PATH")]
    input_path: PathBuf,

    /// Target format name (see `subconv formats`)
    #[arg(short = 't', long = "to")]
    target_format: Option<String>,

    /// Output directory (defaults to the input's directory)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Force overwrite of existing output files
    #[arg(short, long)]
    force_overwrite: bool,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Convert subtitle files to another format
    Convert(ConvertArgs),

    /// Show which format a file is detected as
    Detect {
        /// Subtitle file to inspect
        #[arg(value_name = "INPUT_PATH")]
        input_path: PathBuf,

        /// Configuration file path
        #[arg(short, long, default_value = "conf.json")]
        config_path: String,
    },

    /// List supported formats in detection order
    Formats,

    /// Generate shell completions for subconv
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// subconv - subtitle format converter
///
/// Detects the format of text subtitle files and converts them between formats.
#[derive(Parser, Debug)]
#[command(name = "subconv")]
#[command(version)]
#[command(about = "Subtitle format detection and conversion")]
#[command(long_about = "subconv detects the format of text subtitle files and converts them.

EXAMPLES:
    subconv convert movie.txt                  # Convert to the default format (SubRip)
    subconv convert -t \"Adobe Encore (line#/tabs/n)\" movie.srt
    subconv convert -f -o out/ subtitles/      # Convert a whole directory
    subconv detect movie.txt                   # Show detection results
    subconv completions bash > subconv.bash    # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. If the config file doesn't
    exist, a default one will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,
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
        log::set_boxed_logger(Box::new(CustomLogger::new(LevelFilter::Trace)))?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color for log level
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
            let _ = writeln!(
                std::io::stderr(),
                "{}{} {:<5} {}\x1B[0m",
                Self::color_for_level(record.level()),
                now,
                record.level(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn load_config(config_path: &str, cli_level: Option<CliLogLevel>) -> Result<Config> {
    let mut config = Config::load_or_create(config_path)?;
    if let Some(level) = cli_level {
        config.log_level = level.into();
    }
    log::set_max_level(config.log_level.to_level_filter());
    Ok(config)
}

fn main() -> Result<()> {
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();

    match cli.command {
        Commands::Completions { shell } => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "subconv", &mut std::io::stdout());
            Ok(())
        }
        Commands::Formats => {
            let registry = subconv::FormatRegistry::with_default_formats();
            for format in registry.formats() {
                println!(
                    "{:<32} {:<6} {}",
                    format.name(),
                    format.extension(),
                    if format.is_time_based() { "time-based" } else { "frame-based" }
                );
            }
            Ok(())
        }
        Commands::Detect { input_path, config_path } => {
            let config = load_config(&config_path, None)?;
            run_detect(&Controller::with_config(config)?, &input_path)
        }
        Commands::Convert(args) => {
            let config = load_config(&args.config_path, args.log_level.clone())?;
            run_convert(&Controller::with_config(config)?, &args)
        }
    }
}

fn run_detect(controller: &Controller, input_path: &Path) -> Result<()> {
    let (detected, probes) = controller.detect_file(input_path)?;

    for probe in &probes {
        println!(
            "{:<32} paragraphs={:<5} errors={:<5} {}",
            probe.format_name,
            probe.paragraph_count,
            probe.error_count,
            match (probe.accepted, probe.rejected_by_signature) {
                (true, _) => "accepted".to_string(),
                (false, Some(signature)) => format!("rejected (signature {:?})", signature),
                (false, None) => "rejected".to_string(),
            }
        );
    }

    match detected {
        Some(name) => {
            println!("Detected format: {}", name);
            Ok(())
        }
        None => Err(anyhow!("Format not recognized: {:?}", input_path)),
    }
}

fn run_convert(controller: &Controller, options: &ConvertArgs) -> Result<()> {
    let target = options.target_format.as_deref();

    if options.input_path.is_file() {
        let output_dir = options
            .output_dir
            .clone()
            .or_else(|| options.input_path.parent().map(Path::to_path_buf))
            .unwrap_or_else(|| PathBuf::from("."));

        match controller.run(&options.input_path, &output_dir, target, options.force_overwrite)? {
            ConversionStatus::Converted { output_path, error_count, .. } => {
                if error_count > 0 {
                    warn!("{} line(s) could not be read", error_count);
                }
                info!("Success: {:?}", output_path);
            }
            ConversionStatus::Skipped(path) => info!("Skipped: {:?}", path),
        }
    } else if options.input_path.is_dir() {
        let summary = controller.run_folder(
            &options.input_path,
            options.output_dir.as_deref(),
            target,
            options.force_overwrite,
        )?;
        if summary.failed > 0 {
            warn!("{} file(s) could not be converted", summary.failed);
        }
    } else {
        return Err(anyhow!("Input path does not exist: {:?}", options.input_path));
    }

    Ok(())
}
