use std::collections::BTreeMap;

use anyhow::Context;
use colored::Colorize;
use idiff::DiffReport;
use serde_json::Value;
use tracing::debug;

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Demo(_) => cmd_demo(&cli.format),
        Command::Json(args) => cmd_json(args, &cli.format),
    }
}

fn cmd_demo(format: &OutputFormat) -> anyhow::Result<()> {
    let expected = BTreeMap::from([("name", "John"), ("last", "Snow")]);
    let got = BTreeMap::from([("name", "John"), ("last", "Betterton")]);

    let (result, _) = idiff::diff(&expected, &got);
    print_report(&result.to_report(), format)
}

fn cmd_json(args: JsonArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let expected: Value =
        serde_json::from_str(&args.expected).context("expected document is not valid JSON")?;
    let actual: Value =
        serde_json::from_str(&args.actual).context("actual document is not valid JSON")?;

    let (result, _) = idiff::diff(&expected, &actual);
    print_report(&result.to_report(), format)
}

fn print_report(report: &DiffReport, format: &OutputFormat) -> anyhow::Result<()> {
    debug!(changes = report.changes.len(), equal = report.equal, "rendering report");
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(report)?),
        OutputFormat::Text if report.equal => println!("{}", "They're equal!".green().bold()),
        OutputFormat::Text => {
            println!("{}", "They're not equal:".red().bold());
            println!("{report}");
        }
    }
    Ok(())
}
