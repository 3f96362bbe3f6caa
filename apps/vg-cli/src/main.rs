use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use vg_scenario::{ScenarioReport, ScenarioResult};

#[derive(Parser)]
#[command(name = "vg-cli")]
#[command(about = "Virus genealogy CLI - replay genealogy scenarios", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate scenario file syntax and structure
    Check {
        /// Path to the scenario file (YAML, or JSON by extension)
        scenario_path: PathBuf,
    },
    /// Replay a scenario and report every step
    Run {
        /// Path to the scenario file (YAML, or JSON by extension)
        scenario_path: PathBuf,
        /// Print the report as JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ScenarioResult<ExitCode> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Check { scenario_path } => cmd_check(&scenario_path),
        Commands::Run {
            scenario_path,
            json,
        } => cmd_run(&scenario_path, json),
    }
}

fn cmd_check(scenario_path: &Path) -> ScenarioResult<ExitCode> {
    println!("Checking scenario: {}", scenario_path.display());
    let scenario = vg_scenario::load(scenario_path)?;
    println!(
        "✓ Scenario is valid (stem {}, {} steps)",
        scenario.stem,
        scenario.steps.len()
    );
    Ok(ExitCode::SUCCESS)
}

fn cmd_run(scenario_path: &Path, json: bool) -> ScenarioResult<ExitCode> {
    let scenario = vg_scenario::load(scenario_path)?;
    tracing::debug!(path = %scenario_path.display(), "scenario loaded");
    let report = vg_scenario::run(&scenario)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    if report.passed() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}

fn print_report(report: &ScenarioReport) {
    if !report.name.is_empty() {
        println!("Scenario: {}", report.name);
    }
    println!("Stem: {}", report.stem);

    for step in &report.steps {
        let mark = if step.passed() { "✓" } else { "✗" };
        println!("  {} [{}] {} => {}", mark, step.index, step.step, step.outcome);
        if let Some(mismatch) = &step.mismatch {
            println!("      {}", mismatch);
        }
    }

    println!("Genealogy:");
    for virus in &report.genealogy {
        println!(
            "  {} parents=[{}] children=[{}]",
            virus.id,
            virus.parents.join(", "),
            virus.children.join(", ")
        );
    }

    let failures = report.failures();
    if failures == 0 {
        println!("✓ All {} steps passed", report.steps.len());
    } else {
        println!("✗ {} of {} steps failed", failures, report.steps.len());
    }
}
