//! Delve command-line driver.
//!
//! Runs a scenario file through the branch miner in the simulator and prints
//! what happened.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use delve_miner::MinerConfig;
use delve_sim::{RunReport, Scenario, Simulation};
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "delve")]
#[command(about = "Branch-mining simulator")]
struct Cli {
	/// Verbose logging
	#[arg(short, long, global = true)]
	verbose: bool,

	#[command(subcommand)]
	command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
	/// Run a scenario until the session ends or the tick budget runs out
	Run {
		/// Scenario TOML file
		#[arg(short, long, value_name = "PATH")]
		scenario: PathBuf,

		/// Miner settings TOML, overriding any bundled with the scenario
		#[arg(short, long, value_name = "PATH")]
		config: Option<PathBuf>,

		/// Tick budget
		#[arg(short, long, default_value_t = 20_000)]
		max_ticks: u64,
	},
	/// Print the default miner settings as TOML
	DefaultConfig,
}

fn main() -> Result<()> {
	let cli = Cli::parse();
	setup_tracing(cli.verbose);

	match cli.command {
		Command::Run {
			scenario,
			config,
			max_ticks,
		} => run(scenario, config, max_ticks),
		Command::DefaultConfig => {
			print!("{}", MinerConfig::default().to_toml_string()?);
			Ok(())
		}
	}
}

fn run(scenario_path: PathBuf, config_path: Option<PathBuf>, max_ticks: u64) -> Result<()> {
	let scenario = Scenario::load(&scenario_path).with_context(|| format!("loading scenario {}", scenario_path.display()))?;
	let config = config_path
		.map(|path| MinerConfig::load(&path).with_context(|| format!("loading config {}", path.display())))
		.transpose()?;

	let mut sim = Simulation::from_scenario(&scenario, config)?;
	info!(scenario = %scenario_path.display(), max_ticks, "delve.run");
	let report = sim.run(max_ticks);
	print_report(&report);
	Ok(())
}

fn print_report(report: &RunReport) {
	println!("ticks:            {}", report.ticks);
	if report.timed_out {
		println!("stopped:          tick budget reached");
	}
	if let Some(summary) = report.summary {
		println!("branches:         {}", summary.branches_completed);
		println!("groups cleared:   {}", summary.groups_cleared);
		println!("ores found/mined: {}/{}", summary.ores_found, summary.ores_mined);
		if let Some(failure) = summary.failure {
			println!("ended on error:   {failure}");
		}
	}
	if let Some(pos) = report.final_position {
		println!("agent at:         {pos}");
	}
	println!("blocks cleared:   {}", report.actions.blocks_cleared);
	println!(
		"actions:          {} ok, {} failed, {} cancelled",
		report.actions.succeeded, report.actions.failed, report.actions.cancelled
	);
	print_items("carried", &report.carried);
	print_items("stored", &report.stored);
}

fn print_items(label: &str, items: &[(String, u32)]) {
	if items.is_empty() {
		return;
	}
	println!("{label}:");
	for (item, count) in items {
		println!("  {item:<16} {count}");
	}
}

fn setup_tracing(verbose: bool) {
	use std::fs::OpenOptions;

	use tracing_subscriber::EnvFilter;
	use tracing_subscriber::prelude::*;

	let filter = || {
		EnvFilter::try_from_default_env().unwrap_or_else(|_| {
			if verbose {
				EnvFilter::new("delve_miner=debug,delve_sim=debug,info")
			} else {
				EnvFilter::new("warn,delve_cli=info")
			}
		})
	};

	// DELVE_LOG_DIR sends the full trace to a file instead of stderr.
	if let Some(log_dir) = std::env::var("DELVE_LOG_DIR").ok().map(PathBuf::from)
		&& std::fs::create_dir_all(&log_dir).is_ok()
	{
		let log_path = log_dir.join(format!("delve.{}.log", std::process::id()));
		if let Ok(file) = OpenOptions::new().create(true).append(true).open(&log_path) {
			let file_layer = tracing_subscriber::fmt::layer()
				.with_writer(file)
				.with_ansi(false)
				.with_target(true);
			tracing_subscriber::registry().with(filter()).with(file_layer).init();
			tracing::info!(path = ?log_path, "delve.tracing");
			return;
		}
	}

	tracing_subscriber::fmt().with_env_filter(filter()).with_writer(std::io::stderr).init();
}

#[cfg(test)]
mod tests;
