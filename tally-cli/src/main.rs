use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use tally_core::StatementRow;
use tally_ingest::PageInput;
use tally_ledger::{Extraction, Extractor};

mod config;
mod input;

use input::Shape;

#[derive(Parser, Debug)]
#[command(name = "tally", version, about = "Extract transactions from bank statement text")]
struct Cli {
    /// More log output (-v info, -vv debug, -vvv trace); RUST_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse statement pages and print the transaction list as JSON
    Extract {
        /// Input files, read in order; their pages are numbered consecutively
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// How the input files are laid out
        #[arg(long, value_enum, default_value_t = Shape::Text)]
        shape: Shape,

        /// Parser settings (TOML); built-in defaults when omitted
        #[arg(long)]
        config: Option<PathBuf>,

        /// Print the extraction report to stderr
        #[arg(long)]
        report: bool,
    },

    /// Parser configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write the default configuration to a new file
    Init { path: PathBuf },

    /// Print the effective configuration
    Show {
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Extract {
            inputs,
            shape,
            config,
            report,
        } => {
            let extraction = extract(&inputs, shape, config.as_deref())?;
            if report {
                eprintln!("{}", serde_json::to_string_pretty(&extraction.report)?);
            }
            print_rows(&extraction.rows())?;
        }

        Command::Config { command } => match command {
            ConfigCommand::Init { path } => config::init_config(&path)?,
            ConfigCommand::Show { config } => {
                let cfg = config::load_config(config.as_deref())?;
                print!("{}", cfg.to_toml_string()?);
            }
        },
    }

    Ok(())
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn extract(inputs: &[PathBuf], shape: Shape, config: Option<&Path>) -> Result<Extraction> {
    let cfg = config::load_config(config)?;
    let extractor = Extractor::new(cfg).context("invalid parser configuration")?;

    let mut pages: Vec<PageInput> = Vec::new();
    for path in inputs {
        let file_pages = input::read_pages(path, shape)?;
        log::info!("{}: {} page(s)", path.display(), file_pages.len());
        pages.extend(file_pages);
    }
    if pages.is_empty() {
        bail!("no pages found in input");
    }

    let extraction = extractor.extract(&pages);
    if extraction.is_empty() {
        bail!(
            "no transactions found ({} candidate line(s), {} rejected)",
            extraction.report.candidates,
            extraction.report.rejected()
        );
    }

    let summary = extraction.summary();
    log::info!(
        "{} record(s); opening {}; closing {}",
        summary.count,
        summary.opening.map(|m| m.to_string()).unwrap_or_else(|| "-".into()),
        summary.closing.map(|m| m.to_string()).unwrap_or_else(|| "-".into()),
    );
    Ok(extraction)
}

fn print_rows(rows: &[StatementRow]) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(rows)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_parse_extract_args() {
        let cli = Cli::try_parse_from([
            "tally", "-vv", "extract", "a.txt", "b.txt", "--shape", "continuous", "--report",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Command::Extract {
                inputs,
                shape,
                config,
                report,
            } => {
                assert_eq!(inputs, vec![PathBuf::from("a.txt"), PathBuf::from("b.txt")]);
                assert_eq!(shape, Shape::Continuous);
                assert!(config.is_none());
                assert!(report);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_extract_requires_input() {
        assert!(Cli::try_parse_from(["tally", "extract"]).is_err());
        assert!(Cli::try_parse_from(["tally", "extract", "a.txt", "--shape", "pdf"]).is_err());
    }

    #[test]
    fn test_parse_config_init() {
        let cli = Cli::try_parse_from(["tally", "config", "init", "tally.toml"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Config { command: ConfigCommand::Init { ref path } } if path == Path::new("tally.toml")
        ));
    }

    #[test]
    fn test_extract_across_files() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("p1.txt");
        let b = dir.path().join("p2.txt");
        fs::write(&a, "01/01/2023 Opening balance 1,000.00\n02/01/2023 Salary 500.00 1,500.00\n").unwrap();
        fs::write(&b, "03/01/2023 Checkers 20.00 1,480.00\n").unwrap();

        let out = extract(&[a, b], Shape::Text, None).unwrap();
        let rows = out.rows();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].description, "Opening balance");
        assert_eq!(rows[2].amount, "-20.00");
        assert_eq!(out.report.pages, 2);
    }

    #[test]
    fn test_extract_without_transactions_fails() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("empty.txt");
        fs::write(&a, "Statement period 01/01/2023 to 31/01/2023\n").unwrap();
        let err = extract(&[a], Shape::Text, None).unwrap_err();
        assert!(err.to_string().contains("no transactions found"));
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = dir.path().join("bad.toml");
        fs::write(&cfg, "dedup_prefix_len = 0\n").unwrap();
        let a = dir.path().join("p.txt");
        fs::write(&a, "02/01/2023 Salary 500.00 1,500.00\n").unwrap();
        assert!(extract(&[a], Shape::Text, Some(&cfg)).is_err());
    }
}
