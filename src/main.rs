//! DriveSleuth — lists physical drives and the volumes they host.
//!
//! Thin binary entry point. All logic lives in the `drivesleuth-core`
//! crate.

use clap::{Parser, ValueEnum};
use drivesleuth_core::model::DriveType;
use drivesleuth_core::report::{self, Report};
use drivesleuth_core::{platform, ListOptions};
use std::io::Write;

/// Output format for the drive listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
    Csv,
}

#[derive(Debug, Parser)]
#[command(name = "drivesleuth", version, about = "List physical drives and their volumes")]
struct Cli {
    /// Only include volumes of this drive type (repeatable).
    #[arg(long = "type", value_name = "TYPE")]
    types: Vec<DriveType>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Print raw volume paths without grouping them by disk.
    #[arg(long)]
    paths: bool,

    /// Log every skipped volume.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialise structured logging. Logs go to stderr so stdout stays
    // parseable for JSON/CSV output.
    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("DriveSleuth starting");

    let host = platform::system_host()?;
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    if cli.paths {
        let paths = drivesleuth_core::paths(&host)?;
        out.write_all(report::render_paths(&paths).as_bytes())?;
        return Ok(());
    }

    let options = ListOptions::with_types(cli.types);
    let drives = drivesleuth_core::list(&host, &options)?;
    let report = Report::new(drives);

    match cli.format {
        Format::Text => out.write_all(report::render_text(&report).as_bytes())?,
        Format::Json => writeln!(out, "{}", report::to_json(&report)?)?,
        Format::Csv => report::write_csv(&report, &mut out)?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_text_listing() {
        let cli = Cli::try_parse_from(["drivesleuth"]).unwrap();
        assert_eq!(cli.format, Format::Text);
        assert!(cli.types.is_empty());
        assert!(!cli.paths);
    }

    #[test]
    fn repeated_type_filter() {
        let cli = Cli::try_parse_from([
            "drivesleuth",
            "--type",
            "removable",
            "--type",
            "fixed",
            "--format",
            "json",
        ])
        .unwrap();
        assert_eq!(cli.types, [DriveType::Removable, DriveType::Fixed]);
        assert_eq!(cli.format, Format::Json);
    }

    #[test]
    fn rejects_unknown_type() {
        assert!(Cli::try_parse_from(["drivesleuth", "--type", "floppy"]).is_err());
    }
}
