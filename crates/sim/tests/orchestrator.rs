//! End-to-end runs of the miner against the simulated world.

use delve_miner::{Action, ActionKind, ActionQueue, FailureReason, Health, MinerConfig, MiningState, Pending};
use delve_primitives::BlockPos;
use delve_sim::{Block, Scenario, Simulation};
use pretty_assertions::assert_eq;

/// Stone world, agent facing east in a small room with a chest behind it.
const ROOM: &str = r#"
[agent]
position = [0, 64, 0]
facing = "east"

[[boxes]]
min = [-1, 64, -1]
max = [0, 65, 1]
block = "air"

[[cells]]
pos = [-2, 64, 0]
block = "chest"
"#;

fn config() -> MinerConfig {
	MinerConfig {
		branch_length: 16,
		item_collection_wait_ticks: 20,
		..MinerConfig::default()
	}
}

fn simulation(extra: &str, config: MinerConfig) -> Simulation {
	let scenario = Scenario::from_toml_str(&format!("{ROOM}\n{extra}")).unwrap();
	Simulation::from_scenario(&scenario, Some(config)).unwrap()
}

fn step_until(sim: &mut Simulation, max: usize, done: impl Fn(&Simulation) -> bool) {
	for _ in 0..max {
		if done(sim) {
			return;
		}
		sim.step();
	}
	assert!(done(sim), "condition not reached within {max} ticks (state {:?})", sim.state());
}

#[test]
fn scan_stops_short_of_water() {
	let mut sim = simulation(
		"[[cells]]\npos = [21, 64, 0]\nblock = \"water\"\n",
		MinerConfig {
			branch_length: 32,
			..config()
		},
	);

	sim.step();
	sim.step();

	let session = sim.miner.session();
	assert_eq!(session.branch_end, Some(BlockPos::new(20, 64, 0)));
	assert_eq!(session.branch_blocks.len(), 38);
	assert!(session.branch_blocks.iter().all(|pos| (2..=20).contains(&pos.x)));
}

#[test]
fn scan_stops_before_cavern() {
	let mut sim = simulation(
		"[[boxes]]\nmin = [10, 60, -4]\nmax = [16, 68, 4]\nblock = \"air\"\n",
		config(),
	);

	sim.step();
	sim.step();

	assert_eq!(sim.miner.session().branch_end, Some(BlockPos::new(9, 64, 0)));
}

#[test]
fn l_shaped_vein_is_mined_whole() {
	let ores = [
		BlockPos::new(5, 66, 0),
		BlockPos::new(6, 66, 0),
		BlockPos::new(7, 66, 0),
		BlockPos::new(7, 67, 0),
	];
	let cells: String = ores
		.iter()
		.map(|p| format!("[[cells]]\npos = [{}, {}, {}]\nblock = \"gold_ore\"\n", p.x, p.y, p.z))
		.collect();
	let mut sim = simulation(&cells, config());

	step_until(&mut sim, 600, |sim| sim.miner.session().branches_completed >= 1);

	let session = sim.miner.session();
	assert_eq!(session.ores.visited().len(), 4);
	assert_eq!(session.ores_mined, 4);
	for ore in ores {
		assert_eq!(sim.world.get(ore), Some(Block::Air));
	}
	assert_eq!(session.failure, None);
}

#[test]
fn low_inventory_mid_branch_interrupts_clear() {
	let extra = "[[inventory]]\nitem = \"cobblestone\"\ncount = 1984\n";
	let mut sim = simulation(extra, MinerConfig {
		inventory_check_interval: 1,
		..config()
	});
	assert_eq!(sim.host.inventory.free_slots(), 5);

	step_until(&mut sim, 100, |sim| {
		sim.state() == MiningState::MiningBranch && matches!(sim.actions.current(), Some(Action::Clear { .. }))
	});
	sim.host.inventory.insert("dirt", 64);
	let cleared_before = sim.actions.stats().blocks_cleared;

	sim.step();

	assert_eq!(sim.state(), MiningState::ReturningToChest);
	assert_eq!(sim.actions.stats().cancelled, 1);
	assert_eq!(sim.miner.pending(), Some(Pending::TravelToStorage));
	assert_eq!(sim.actions.stats().blocks_cleared, cleared_before);

	step_until(&mut sim, 200, |sim| sim.state() == MiningState::ApproachingMining);
	assert_eq!(sim.host.inventory.free_slots(), 27);
	assert!(sim.host.stored_totals().contains(&("dirt".to_string(), 64)));
	assert_eq!(sim.host.open_container, None);
	assert_eq!(sim.miner.session().failure, None);
	assert_eq!(sim.actions.stats().busy_enqueues, 0);
}

#[test]
fn group_clear_failure_ends_session_at_home() {
	let mut sim = simulation("", config());
	sim.actions.inject_failures(ActionKind::Clear, 1);

	let report = sim.run(500);

	assert!(!report.timed_out);
	let summary = report.summary.unwrap();
	assert_eq!(summary.failure, Some(FailureReason::GroupClearFailed));
	assert_eq!(report.final_position, Some(BlockPos::new(0, 64, 0)));
	assert_eq!(sim.state(), MiningState::Idle);
	assert!(sim.miner.session().is_cleared());
}

#[test]
fn low_health_aborts_the_session() {
	let mut sim = simulation("", config());
	step_until(&mut sim, 50, |sim| sim.state() == MiningState::MiningBranch);

	sim.host.health = Some(Health { current: 6.0, max: 20.0 });
	let report = sim.run(500);

	assert_eq!(report.summary.and_then(|s| s.failure), Some(FailureReason::LowHealth));
	assert_eq!(report.final_position, Some(BlockPos::new(0, 64, 0)));
}

#[test]
fn long_run_keeps_queue_discipline() {
	let extra = "[[cells]]\npos = [9, 63, 0]\nblock = \"diamond_ore\"\n\n[[cells]]\npos = [12, 64, 1]\nblock = \"coal_ore\"\n";
	let mut sim = simulation(extra, config());

	let report = sim.run(3000);

	let summary = report.summary.unwrap();
	assert_eq!(report.actions.busy_enqueues, 0);
	assert!(summary.branches_completed >= 3, "{summary:?}");
	assert_eq!(summary.ores_mined, 2);
	assert_eq!(summary.failure, None);
	assert!(report.carried.iter().any(|(item, _)| item == "diamond"));
	assert_eq!(sim.world.get(BlockPos::new(9, 63, 0)), Some(Block::Air));
}

#[test]
fn disable_mid_run_clears_session() {
	for ticks in [1, 5, 20, 45, 90] {
		let mut sim = simulation("", config());
		for _ in 0..ticks {
			sim.step();
		}

		let summary = sim.miner.disable(&mut sim.actions);

		assert!(summary.is_some());
		assert_eq!(sim.state(), MiningState::Idle);
		assert!(sim.miner.session().is_cleared());
		assert!(sim.actions.is_empty());
		assert_eq!(sim.actions.poll_completion(), None);
	}
}

#[test]
fn bundled_scenario_runs_clean() {
	let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("../../scenarios/branch.toml");
	let scenario = Scenario::load(&path).unwrap();
	let mut sim = Simulation::from_scenario(&scenario, None).unwrap();

	let report = sim.run(4000);

	let summary = report.summary.unwrap();
	assert_eq!(summary.failure, None);
	assert!(summary.branches_completed >= 3);
	assert!(summary.ores_mined >= 5);
	assert_eq!(report.actions.busy_enqueues, 0);
}
