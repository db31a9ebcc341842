use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;

use zero_probe::cli::{Cli, Command, OutputFormat, RunArgs, render_text};
use zero_probe::{logging, run_report, storage};

#[tokio::main]
async fn main() -> ExitCode {
    logging::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Run(args) => match run(args).await {
            Ok(true) => ExitCode::SUCCESS,
            Ok(false) => ExitCode::from(1),
            Err(err) => {
                eprintln!("error: {err:#}");
                ExitCode::from(2)
            }
        },
    }
}

async fn run(args: RunArgs) -> anyhow::Result<bool> {
    let cases = args.resolve_cases().context("loading probe cases")?;
    let report = run_report(&cases, args.timeout()).await;

    match args.format {
        OutputFormat::Text => print!("{}", render_text(&report)),
        OutputFormat::Json => println!(
            "{}",
            serde_json::to_string_pretty(&report).context("serializing report")?
        ),
    }
    if let Some(path) = &args.report {
        storage::save_report(path, &report)?;
    }

    Ok(report.success())
}
