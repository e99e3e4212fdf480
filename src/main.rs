//! ASE Lint CLI
//!
//! Lints ASE scripts and prints diagnostics. Files are never modified.

use anyhow::{bail, Context};
use ase_lint::config::{ColorMode, Config, OutputFormat};
use ase_lint::files::expand_patterns;
use ase_lint::output::formatter_for;
use ase_lint::{Engine, RuleKind};
use clap::{Parser, ValueEnum};
use colored::Colorize;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "ase-lint",
    version,
    about = "ASE Script Linter",
    long_about = "A scope-aware style linter for ASE scripts: keyword casing, operator spacing, bracket matching and Hungarian notation."
)]
struct Cli {
    /// Files or glob patterns to lint
    files: Vec<String>,

    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum)]
    format: Option<Format>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Number of parallel jobs (0 = auto)
    #[arg(short, long)]
    jobs: Option<usize>,

    /// Disable specific rules (comma-separated)
    #[arg(long, value_delimiter = ',')]
    disable: Option<Vec<String>>,

    /// Skip spacing checks on documents longer than this many lines
    #[arg(long)]
    max_lines: Option<usize>,

    /// List available rules and exit
    #[arg(long)]
    list_rules: bool,

    /// Hide suggested replacements
    #[arg(long)]
    no_suggestions: bool,

    /// Hide the summary line
    #[arg(long)]
    no_stats: bool,

    /// Show per-rule timing statistics
    #[arg(long)]
    timing: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

fn main() {
    // Initialize logger
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    match run(&cli) {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("{}: {:#}", "error".red().bold(), e);
            std::process::exit(1);
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<i32> {
    if cli.list_rules {
        list_rules();
        return Ok(0);
    }

    if cli.files.is_empty() {
        eprintln!("{}: No files specified", "error".red().bold());
        eprintln!();
        eprintln!("Usage: ase-lint [OPTIONS] <FILES>...");
        eprintln!();
        eprintln!("For more information, try '--help'");
        return Ok(2);
    }

    // Load configuration
    let mut config = match &cli.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => Config::load_default().context("Failed to load config")?,
    };

    let format = cli.format.map(|f| match f {
        Format::Text => OutputFormat::Text,
        Format::Json => OutputFormat::Json,
    });
    config.merge_cli(
        format,
        cli.verbose.then_some(true),
        cli.jobs,
        cli.disable.clone(),
        cli.max_lines,
    );

    if cli.no_suggestions {
        config.output.suggestions = false;
    }
    if cli.no_stats {
        config.output.statistics = false;
    }

    for id in cli.disable.iter().flatten() {
        id.parse::<RuleKind>().map_err(anyhow::Error::msg)?;
    }

    let colored = match config.output.color {
        _ if cli.no_color => false,
        ColorMode::Never => false,
        ColorMode::Always => true,
        ColorMode::Auto => colored::control::SHOULD_COLORIZE.should_colorize(),
    };
    colored::control::set_override(colored);

    let engine = Engine::from_config(&config).context("Invalid rule table")?;

    let files = expand_patterns(&cli.files).context("Invalid file pattern")?;
    if files.is_empty() {
        bail!("No files found to lint");
    }

    if config.output.verbose {
        eprintln!(
            "Linting {} files with rules: {}",
            files.len(),
            engine
                .rules()
                .iter()
                .map(|k| k.id())
                .collect::<Vec<_>>()
                .join(", ")
        );
    }

    let result = engine.lint_files(&files);

    let formatter = formatter_for(&config.output, colored);
    print!("{}", formatter.format(&result));

    if cli.timing {
        eprintln!();
        eprint!("{}", result.format_timings());
    }

    Ok(result.exit_code())
}

fn list_rules() {
    println!("{}", "Available rules:".bold());
    println!();
    for kind in RuleKind::ALL {
        println!(
            "  {} [{}]: {}",
            kind.id().cyan(),
            kind.default_severity(),
            kind.description()
        );
    }
}
