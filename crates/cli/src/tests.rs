use clap::CommandFactory;

use super::*;

#[test]
fn cli_definition_is_consistent() {
	Cli::command().debug_assert();
}

#[test]
fn parses_run_with_defaults() {
	let cli = Cli::try_parse_from(["delve", "run", "--scenario", "cave.toml"]).unwrap();
	let Command::Run {
		scenario,
		config,
		max_ticks,
	} = cli.command
	else {
		panic!("expected run");
	};
	assert_eq!(scenario, PathBuf::from("cave.toml"));
	assert_eq!(config, None);
	assert_eq!(max_ticks, 20_000);
	assert!(!cli.verbose);
}

#[test]
fn verbose_is_global() {
	let cli = Cli::try_parse_from(["delve", "default-config", "-v"]).unwrap();
	assert!(cli.verbose);
	assert!(matches!(cli.command, Command::DefaultConfig));
}

#[test]
fn run_requires_scenario() {
	assert!(Cli::try_parse_from(["delve", "run"]).is_err());
}
