use anyhow::{Context, Result, bail};
use clap::Parser;
use outline_renumber_config::Config;
use outline_renumber_engine::{check_file, renumber, renumber_file, rewrite_file};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::str::FromStr;

mod args;

use args::Cli;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Print,
    InPlace,
    Check,
}

/// Whether a `--check` run found anything to renumber.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Clean,
    WouldChange,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(Outcome::Clean) => ExitCode::SUCCESS,
        Ok(Outcome::WouldChange) => ExitCode::from(1),
        Err(err) => {
            log::debug!("Failed with {err:?}");
            eprintln!("error: {err:#}");
            ExitCode::from(2)
        }
    }
}

fn run(cli: Cli) -> Result<Outcome> {
    let config_path = cli
        .config
        .as_deref()
        .map(Config::expand_path)
        .unwrap_or_else(Config::config_path);

    if cli.init_config {
        init_logging(&cli, None)?;
        return init_config(&config_path);
    }

    let config = Config::load_from_path(&config_path)?.unwrap_or_default();
    init_logging(&cli, config.log_level.as_deref())?;
    log::debug!("Using config {config:?} from {}", config_path.display());

    let mode = if cli.check {
        Mode::Check
    } else if cli.in_place || (config.in_place && !cli.stdout) {
        Mode::InPlace
    } else {
        Mode::Print
    };

    let reads_stdin = cli.files.is_empty() || cli.files == ["-"];
    if reads_stdin {
        return match mode {
            Mode::InPlace if cli.in_place => bail!("--in-place needs at least one file"),
            // In-place from config only applies to files.
            Mode::InPlace | Mode::Print => {
                filter_stdin()?;
                Ok(Outcome::Clean)
            }
            Mode::Check => check_stdin(),
        };
    }

    let files = expand_files(&cli.files)?;
    match mode {
        Mode::Print => {
            print_files(&files)?;
            Ok(Outcome::Clean)
        }
        Mode::InPlace => {
            rewrite_files(&files)?;
            Ok(Outcome::Clean)
        }
        Mode::Check => check_files(&files),
    }
}

fn init_logging(cli: &Cli, configured: Option<&str>) -> Result<()> {
    let base = match configured {
        Some(level) => log::LevelFilter::from_str(level)
            .ok()
            .with_context(|| format!("Invalid log_level '{level}' in config"))?,
        None => log::LevelFilter::Warn,
    };
    let level = if cli.quiet {
        log::LevelFilter::Error
    } else {
        raise_level(base, cli.verbose)
    };

    let mut builder = env_logger::Builder::from_default_env();
    // RUST_LOG wins over config and flags.
    if std::env::var_os("RUST_LOG").is_none() {
        builder.filter_level(level);
    }
    builder.init();
    Ok(())
}

fn raise_level(base: log::LevelFilter, steps: u8) -> log::LevelFilter {
    let mut level = base;
    for _ in 0..steps {
        level = match level {
            log::LevelFilter::Off => log::LevelFilter::Error,
            log::LevelFilter::Error => log::LevelFilter::Warn,
            log::LevelFilter::Warn => log::LevelFilter::Info,
            log::LevelFilter::Info => log::LevelFilter::Debug,
            log::LevelFilter::Debug | log::LevelFilter::Trace => log::LevelFilter::Trace,
        };
    }
    level
}

fn init_config(config_path: &Path) -> Result<Outcome> {
    if config_path.exists() {
        bail!("Config file already exists at {}", config_path.display());
    }
    Config::default()
        .save_to_path(config_path)
        .with_context(|| format!("Failed to write config file at {}", config_path.display()))?;
    println!("Created config file at {}", config_path.display());
    Ok(Outcome::Clean)
}

/// Expands glob patterns; plain paths are kept as given.
fn expand_files(args: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for arg in args {
        if arg == "-" {
            bail!("'-' (stdin) cannot be mixed with file arguments");
        }
        if !is_glob_pattern(arg) {
            files.push(PathBuf::from(arg));
            continue;
        }

        let before = files.len();
        for entry in glob::glob(arg).with_context(|| format!("Invalid glob pattern '{arg}'"))? {
            let path = entry.with_context(|| format!("Failed to expand '{arg}'"))?;
            if path.is_file() {
                files.push(path);
            }
        }
        if files.len() == before {
            bail!("No files match '{arg}'");
        }
    }
    Ok(files)
}

fn is_glob_pattern(arg: &str) -> bool {
    arg.contains(['*', '?', '['])
}

fn filter_stdin() -> Result<()> {
    let stdin = io::stdin().lock();
    let stdout = BufWriter::new(io::stdout().lock());
    let stats = renumber(stdin, stdout).context("Failed to renumber stdin")?;
    log::info!("Renumbered {} items from stdin", stats.items);
    Ok(())
}

fn check_stdin() -> Result<Outcome> {
    let stats = renumber(io::stdin().lock(), io::sink()).context("Failed to read stdin")?;

    if stats.changed == 0 {
        Ok(Outcome::Clean)
    } else {
        eprintln!("<stdin> would be renumbered");
        Ok(Outcome::WouldChange)
    }
}

fn print_files(files: &[PathBuf]) -> Result<()> {
    let mut stdout = BufWriter::new(io::stdout().lock());
    for (i, path) in files.iter().enumerate() {
        let (content, _) = renumber_file(path)?;
        stdout
            .write_all(&content)
            .context("Failed to write to stdout")?;
        // Keep the next file's first line off this file's unterminated last line.
        if i + 1 < files.len() && content.last().is_some_and(|&b| b != b'\n') {
            stdout.write_all(b"\n").context("Failed to write to stdout")?;
        }
    }
    stdout.flush().context("Failed to write to stdout")?;
    Ok(())
}

fn rewrite_files(files: &[PathBuf]) -> Result<()> {
    let mut changed = 0;
    for path in files {
        let outcome = rewrite_file(path)?;
        if outcome.changed {
            changed += 1;
        }
    }
    log::info!("Rewrote {changed} of {} files", files.len());
    Ok(())
}

fn check_files(files: &[PathBuf]) -> Result<Outcome> {
    let mut outcome = Outcome::Clean;
    for path in files {
        if check_file(path)?.changed > 0 {
            eprintln!("{} would be renumbered", path.display());
            outcome = Outcome::WouldChange;
        }
    }
    Ok(outcome)
}
