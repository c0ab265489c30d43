mod fakes;
mod reports;
mod scenarios;

use anyhow::{Context, Result, bail};
use clap::Parser;
use std::time::Instant;

#[derive(Debug, Parser)]
#[command(name = "realm-tester", version = "0.1.0")]
#[command(about = "Automated QA for Enchanted Realm Adventure - headless story-logic scenarios")]
struct Args {
    /// Scenarios to run (comma-separated), or "all"
    #[arg(long, default_value = "all")]
    scenarios: String,

    /// List all available scenarios and exit
    #[arg(long)]
    list_scenarios: bool,

    /// Seeds to run (comma-separated)
    #[arg(long, default_value = "1337")]
    seeds: String,

    /// Output report format
    #[arg(long, default_value = "console")]
    #[arg(value_parser = ["console", "json"])]
    report: String,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn split_csv(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(ToString::to_string)
        .collect()
}

fn main() -> Result<()> {
    let args = Args::parse();
    let default_level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    if args.list_scenarios {
        println!("Available scenarios:");
        for (name, about, _) in scenarios::catalog() {
            println!("  {name:<12} {about}");
        }
        return Ok(());
    }

    let names: Vec<String> = if args.scenarios == "all" {
        scenarios::catalog()
            .iter()
            .map(|(name, _, _)| (*name).to_string())
            .collect()
    } else {
        split_csv(&args.scenarios)
    };

    let seeds = split_csv(&args.seeds)
        .iter()
        .map(|seed| {
            seed.parse::<u64>()
                .with_context(|| format!("invalid seed: {seed}"))
        })
        .collect::<Result<Vec<_>>>()?;

    let started = Instant::now();
    let mut results = Vec::new();
    for name in &names {
        let Some(runner) = scenarios::get(name) else {
            bail!("unknown scenario: {name}");
        };
        for &seed in &seeds {
            log::info!("running scenario '{name}' with seed {seed}");
            results.push(scenarios::run(name, runner, seed));
        }
    }

    match args.report.as_str() {
        "json" => println!("{}", reports::json_report(&results)),
        _ => reports::console_report(&results, started.elapsed()),
    }

    if results.iter().any(|result| !result.passed) {
        std::process::exit(1);
    }
    Ok(())
}
