// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result, bail};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, info, warn};
use std::io::Write;
use std::path::{Path, PathBuf};

use locqa::app_config::{self, Config};
use locqa::errors::AppError;
use locqa::file_utils::FileManager;
use locqa::formats::{self, TranslationFile};
use locqa::quality::{Issue, IssueKind, QualityChecker, QualityResults, Severity};
use locqa::report::{self, QaReport, ReportFormat};

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, Copy, ValueEnum)]
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

/// CLI Wrapper for ReportFormat to implement ValueEnum
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliReportFormat {
    Text,
    Json,
    Csv,
}

impl From<CliReportFormat> for ReportFormat {
    fn from(cli_format: CliReportFormat) -> Self {
        match cli_format {
            CliReportFormat::Text => ReportFormat::Text,
            CliReportFormat::Json => ReportFormat::Json,
            CliReportFormat::Csv => ReportFormat::Csv,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Check translation files and report their quality score
    Check(CheckArgs),

    /// Compute a score from raw counts
    Score {
        /// Total number of units
        #[arg(long)]
        total: usize,

        /// Number of translated units
        #[arg(long)]
        translated: usize,

        /// High severity issues
        #[arg(long, default_value_t = 0)]
        high: usize,

        /// Medium severity issues
        #[arg(long, default_value_t = 0)]
        medium: usize,

        /// Low severity issues
        #[arg(long, default_value_t = 0)]
        low: usize,
    },

    /// Fill missing translations through the configured engines
    Fill(FillArgs),

    /// Compare engine translations of one unit
    Compare {
        /// Translation file containing the unit
        #[arg(value_name = "PATH")]
        path: PathBuf,

        /// Key of the unit to translate
        #[arg(short, long)]
        key: String,
    },

    /// Generate shell completions for locqa
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct CheckArgs {
    /// Translation file or directory to check
    #[arg(value_name = "PATH")]
    path: PathBuf,

    /// Monolingual source file to pair with PATH by key
    #[arg(long)]
    source_file: Option<PathBuf>,

    /// Report format
    #[arg(short, long, value_enum)]
    format: Option<CliReportFormat>,

    /// Write the report to a file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Minimum passing score (0-100)
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(0..=100))]
    min_score: Option<u8>,
}

#[derive(Parser, Debug)]
struct FillArgs {
    /// Translation file to fill
    #[arg(value_name = "PATH")]
    path: PathBuf,

    /// Where to write the filled file (default: <name>.filled.<ext>)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Use an offline mock engine and do not write any file
    #[arg(long)]
    dry_run: bool,
}

/// locqa - localization quality assurance
///
/// Checks translated string files for missing translations, broken placeholders,
/// markup and other defects, and scores each file from 0 to 100.
#[derive(Parser, Debug)]
#[command(name = "locqa")]
#[command(version)]
#[command(about = "Localization quality checks and scoring")]
#[command(long_about = "locqa checks CSV/TSV, XLIFF and YAML translation files and scores their quality.

EXAMPLES:
    locqa check locales/de.xlf                      # Check one file
    locqa check locales/ --format json -o qa.json   # Check a directory, JSON report
    locqa check de.yaml --source-file en.yaml       # Pair monolingual files by key
    locqa score --total 100 --translated 90 --high 2
    locqa fill ui.csv --dry-run                     # Try filling gaps offline
    locqa compare ui.csv --key menu.open            # Rank engine candidates
    locqa completions bash > locqa.bash

SCORING:
    Coverage contributes up to 60 points, quality up to 40 points minus
    3 per high, 1.5 per medium and 0.5 per low issue.

CONFIGURATION:
    Configuration is read from locqa.json in the working directory, then from
    the user config directory. If none exists, a default one is created.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Set logging level
    #[arg(short, long, value_enum, global = true)]
    log_level: Option<CliLogLevel>,

    /// Source language code (e.g., 'en', 'es', 'fr')
    #[arg(short, long, global = true)]
    source_language: Option<String>,

    /// Target language code (e.g., 'en', 'es', 'fr')
    #[arg(short, long, global = true)]
    target_language: Option<String>,
}

// @struct: Colourised stderr logger
struct CliLogger;

impl CliLogger {
    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        log::set_boxed_logger(Box::new(CliLogger))?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI colour for log level
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

impl Log for CliLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
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

/// Resolve, load and override the configuration
fn load_config(cli: &CommandLineOptions) -> Result<Config> {
    let path = cli.config.clone().unwrap_or_else(Config::default_path);
    let mut config = Config::load_or_create(&path)?;

    // Override config with CLI options if provided
    if let Some(source_lang) = &cli.source_language {
        config.source_language = source_lang.clone();
    }
    if let Some(target_lang) = &cli.target_language {
        config.target_language = target_lang.clone();
    }
    if let Some(level) = cli.log_level {
        config.log_level = level.into();
    }

    log::set_max_level(config.log_level.to_level_filter());
    config.validate().context("Invalid configuration")?;
    Ok(config)
}

/// Load a file, pairing it with a monolingual source file when given
fn load_translation_file(path: &Path, source_file: Option<&Path>) -> Result<TranslationFile> {
    let target = formats::load(path).with_context(|| format!("Failed to load {}", path.display()))?;
    match source_file {
        Some(source_path) => {
            let source = formats::load(source_path)
                .with_context(|| format!("Failed to load {}", source_path.display()))?;
            Ok(TranslationFile::pair(source, target))
        }
        None => Ok(target),
    }
}

fn write_output(output: Option<&Path>, content: &str) -> Result<()> {
    match output {
        Some(path) => {
            FileManager::write_atomic(path, content)?;
            info!("Report written to {}", path.display());
        }
        None => {
            let mut stdout = std::io::stdout();
            stdout.write_all(content.as_bytes())?;
            if !content.ends_with('\n') {
                writeln!(stdout)?;
            }
        }
    }
    Ok(())
}

/// Returns whether every report passed
fn run_check(args: &CheckArgs, config: &Config) -> Result<bool> {
    let files = if args.path.is_dir() {
        if args.source_file.is_some() {
            bail!("--source-file can only be used with a single file");
        }
        FileManager::find_translation_files(&args.path)?
    } else {
        vec![args.path.clone()]
    };

    if files.is_empty() {
        warn!("No translation files found under {}", args.path.display());
        return Ok(true);
    }

    let checker = QualityChecker::new(config.checks.clone());
    let min_score = args.min_score.unwrap_or(config.report.min_score);
    let format: ReportFormat = args.format.map(Into::into).unwrap_or(config.report.format);

    let mut reports = Vec::with_capacity(files.len());
    for path in &files {
        let file = load_translation_file(path, args.source_file.as_deref())?;
        let results = checker.check_file(&file);
        info!("{}: {}", path.display(), results.summary());

        reports.push(QaReport::new(
            path.display().to_string(),
            file.source_language.or_else(|| Some(config.source_language.clone())),
            file.target_language.or_else(|| Some(config.target_language.clone())),
            results,
            min_score,
        ));
    }

    let rendered = report::render_reports(&reports, format)?;
    write_output(args.output.as_deref(), &rendered)?;

    let failed = reports.iter().filter(|r| !r.passed()).count();
    if failed > 0 {
        warn!("{} of {} files scored below {}", failed, reports.len(), min_score);
    }
    Ok(failed == 0)
}

fn run_score(total: usize, translated: usize, high: usize, medium: usize, low: usize) {
    let mut issues = Vec::with_capacity(high + medium + low);
    for (count, severity) in [(high, Severity::High), (medium, Severity::Medium), (low, Severity::Low)] {
        for i in 0..count {
            let kind = IssueKind::ALL
                .into_iter()
                .find(|k| k.default_severity() == severity)
                .unwrap_or(IssueKind::MissingTranslation);
            issues.push(Issue::new(format!("{}-{}", severity, i + 1), kind, "counted").with_severity(severity));
        }
    }

    let results = QualityResults::new(total, translated, issues);
    println!("{} ({})", results.score, results.grade());
}

async fn run_fill(args: &FillArgs, config: &Config) -> Result<()> {
    let mut file = formats::load(&args.path).with_context(|| format!("Failed to load {}", args.path.display()))?;
    let orchestrator = config
        .engines
        .build_orchestrator(config, args.dry_run)?
        .with_progress(true);

    let before = QualityChecker::new(config.checks.clone()).check_file(&file);
    let summary = orchestrator.fill_missing(&mut file).await;
    let after = QualityChecker::new(config.checks.clone()).check_file(&file);

    info!(
        "Filled {} of {} missing units ({} cached, {} failed)",
        summary.filled,
        before.total_count.saturating_sub(before.translated_count),
        summary.cached,
        summary.failed
    );
    info!("Score {} -> {}", before.score, after.score);

    if args.dry_run {
        info!("Dry run: no file written");
        return Ok(());
    }

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| FileManager::output_path_for(&args.path, "filled"));
    formats::save(&output, &file)?;
    info!("Filled file written to {}", output.display());
    Ok(())
}

async fn run_compare(path: &Path, key: &str, config: &Config) -> Result<(), AppError> {
    let file = formats::load(path)?;
    let unit = file
        .find(key)
        .ok_or_else(|| AppError::File(format!("Key '{}' not found in {}", key, path.display())))?;

    let orchestrator = config.engines.build_orchestrator(config, false)?;
    let candidates = orchestrator.compare(&file, unit).await?;

    println!("Source: {}", unit.source);
    for (rank, candidate) in candidates.iter().enumerate() {
        println!(
            "{}. {} (penalty {:.1}): {}",
            rank + 1,
            candidate.engine,
            candidate.penalty,
            candidate.text
        );
        for issue in &candidate.issues {
            println!("     [{}] {}", issue.severity, issue.message);
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize the logger once with info level by default
    // The level is updated after loading the config
    CliLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();
    if let Some(level) = cli.log_level {
        log::set_max_level(app_config::LogLevel::from(level).to_level_filter());
    }

    match &cli.command {
        Commands::Completions { shell } => {
            let mut cmd = CommandLineOptions::command();
            generate(*shell, &mut cmd, "locqa", &mut std::io::stdout());
            Ok(())
        }
        Commands::Score { total, translated, high, medium, low } => {
            run_score(*total, *translated, *high, *medium, *low);
            Ok(())
        }
        Commands::Check(args) => {
            let config = load_config(&cli)?;
            if !run_check(args, &config)? {
                std::process::exit(1);
            }
            Ok(())
        }
        Commands::Fill(args) => {
            let config = load_config(&cli)?;
            run_fill(args, &config).await
        }
        Commands::Compare { path, key } => {
            let config = load_config(&cli)?;
            Ok(run_compare(path, key, &config).await?)
        }
    }
}
