//! Lock-step driver tying the miner to the simulated world.

use delve_miner::{Env, MinerConfig, MiningOrchestrator, MiningState, SessionSummary};
use delve_primitives::BlockPos;
use tracing::info;

use crate::executor::{QueueStats, SimActionQueue, Timing};
use crate::host::SimHost;
use crate::scenario::{Scenario, ScenarioError};
use crate::world::GridWorld;

/// Outcome of [`Simulation::run`].
#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
	pub ticks: u64,
	/// The session was still running when the tick budget ran out.
	pub timed_out: bool,
	pub summary: Option<SessionSummary>,
	pub final_position: Option<BlockPos>,
	pub carried: Vec<(String, u32)>,
	pub stored: Vec<(String, u32)>,
	pub actions: QueueStats,
}

/// World, agent, executor and miner advanced together one tick at a time.
#[derive(Debug)]
pub struct Simulation {
	pub world: GridWorld,
	pub host: SimHost,
	pub actions: SimActionQueue,
	pub miner: MiningOrchestrator,
	ticks: u64,
}

impl Simulation {
	/// Builds a simulation with the miner already enabled.
	pub fn new(world: GridWorld, host: SimHost, config: MinerConfig, timing: Timing) -> Self {
		let mut miner = MiningOrchestrator::new(config);
		miner.enable();
		Self {
			world,
			host,
			actions: SimActionQueue::new(timing),
			miner,
			ticks: 0,
		}
	}

	/// Builds from a scenario. `config` overrides settings bundled with it.
	pub fn from_scenario(scenario: &Scenario, config: Option<MinerConfig>) -> Result<Self, ScenarioError> {
		let config = config.or_else(|| scenario.miner.clone()).unwrap_or_default();
		config.validate()?;
		let host = scenario.build_host()?;
		Ok(Self::new(scenario.build_world(), host, config, scenario.timing))
	}

	pub fn ticks(&self) -> u64 {
		self.ticks
	}

	pub fn state(&self) -> MiningState {
		self.miner.state()
	}

	/// One world tick: the miner decides, then the executor works.
	pub fn step(&mut self) {
		let mut env = Env::new(&self.world, &mut self.actions, &mut self.host);
		self.miner.tick(&mut env);
		self.actions.advance(&mut self.world, &mut self.host);
		self.ticks += 1;
	}

	/// Steps until the session ends or `max_ticks` have elapsed in total.
	///
	/// A session still running at the limit is disabled so the report always
	/// carries a summary.
	pub fn run(&mut self, max_ticks: u64) -> RunReport {
		info!(max_ticks, "sim.run.start");
		while self.miner.is_enabled() && self.ticks < max_ticks {
			self.step();
		}

		let timed_out = self.miner.is_enabled();
		let summary = if timed_out {
			self.miner.disable(&mut self.actions)
		} else {
			self.miner.last_summary()
		};

		let report = RunReport {
			ticks: self.ticks,
			timed_out,
			summary,
			final_position: self.host.position,
			carried: self.host.inventory.totals(),
			stored: self.host.stored_totals(),
			actions: self.actions.stats(),
		};
		info!(ticks = report.ticks, timed_out, "sim.run.end");
		report
	}
}
