//! rds-report CLI - Jira export to RDS interactions report
//!
//! ```bash
//! rds-report jira-output.csv > interactions.csv
//! rds-report jira-output.csv -o interactions.csv --log-format json
//! ```
//!
//! Before running, execute the saved Jira filter "RDS Interactions Last
//! Year" and export the results as CSV:
//!
//! ```text
//! project = RDS
//! AND issuetype IN (Consultation, Curation, "Education / Training", Engagement)
//! AND created >= -52w
//! ```

use clap::Parser;
use rds_report::logs::{self, log_error, log_success, LogFormat};
use rds_report::{run_report, ReportOptions, ReportResult, WriteError};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "rds-report")]
#[command(about = "Summarize RDS interactions from a Jira CSV export", long_about = None)]
struct Cli {
    /// Jira CSV export
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Input field delimiter (a single character, or `\t` / `tab`)
    #[arg(short, long, default_value = ",", value_parser = parse_delimiter)]
    delimiter: char,

    /// chrono format of the Created column, tried before the built-in formats
    #[arg(long)]
    date_format: Option<String>,

    /// Log format on stderr: text or json
    #[arg(long)]
    log_format: Option<LogFormat>,

    /// Only log errors
    #[arg(short, long)]
    quiet: bool,
}

fn main() {
    // Load .env file (if present)
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let options = match resolve_options(&cli) {
        Ok(options) => options,
        Err(e) => {
            eprintln!("❌ Error: {}", e);
            std::process::exit(2);
        }
    };
    logs::init(options.log_settings());

    if let Err(e) = run(&cli.input, cli.output.as_deref(), &options) {
        log_error(format!("Error: {}", e));
        std::process::exit(1);
    }
}

fn resolve_options(cli: &Cli) -> Result<ReportOptions, String> {
    let mut options = ReportOptions::from_env()?;

    options.delimiter = cli.delimiter;
    if let Some(ref format) = cli.date_format {
        options.date_format = Some(format.clone());
    }
    if let Some(format) = cli.log_format {
        options.log_format = format;
    }
    options.quiet |= cli.quiet;

    Ok(options)
}

fn parse_delimiter(value: &str) -> Result<char, String> {
    match value {
        "\\t" | "tab" | "TAB" => Ok('\t'),
        _ => {
            let mut chars = value.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) if c.is_ascii() => Ok(c),
                _ => Err(format!("expected a single ASCII character or \\t, got '{}'", value)),
            }
        }
    }
}

fn run(input: &Path, output: Option<&Path>, options: &ReportOptions) -> ReportResult<()> {
    match output {
        Some(path) => {
            // Rendered in full before the file is created
            let mut buffer = Vec::new();
            run_report(input, options, &mut buffer)?;
            fs::write(path, &buffer).map_err(WriteError::from)?;
            log_success(format!("💾 Report written to: {}", path.display()));
        }
        None => {
            run_report(input, options, std::io::stdout().lock())?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_delimiter() {
        assert_eq!(parse_delimiter(",").unwrap(), ',');
        assert_eq!(parse_delimiter(";").unwrap(), ';');
        assert_eq!(parse_delimiter("\\t").unwrap(), '\t');
        assert_eq!(parse_delimiter("tab").unwrap(), '\t');
        assert_eq!(parse_delimiter("\t").unwrap(), '\t');
    }

    #[test]
    fn test_parse_delimiter_rejects_bad_values() {
        assert!(parse_delimiter("").is_err());
        assert!(parse_delimiter(";;").is_err());
        assert!(parse_delimiter("§").is_err());
    }

    #[test]
    fn test_cli_accepts_tab_delimiter() {
        let cli = Cli::try_parse_from(["rds-report", "export.csv", "-d", "\\t"]).unwrap();
        assert_eq!(cli.delimiter, '\t');
        assert_eq!(cli.input, PathBuf::from("export.csv"));
    }
}
