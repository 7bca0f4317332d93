//! The branch-mining state machine.
//!
//! [`MiningOrchestrator`] owns the single live [`MiningSession`] and is driven
//! by one [`MiningOrchestrator::tick`] per world tick. Each tick it:
//!
//! 1. Polls the action queue for the outcome of the in-flight action and
//!    applies the matching success/failure transition.
//! 2. Checks the inventory trigger (every `inventory_check_interval` ticks)
//!    and the health safety threshold.
//! 3. Runs the handler for the current [`MiningState`].
//!
//! # Queue discipline
//!
//! At most one action is outstanding. A handler may submit only when no
//! completion is pending and the queue reports empty; [`Pending`] records
//! what the in-flight action is for so its outcome can be routed.
//!
//! # Failure handling
//!
//! - Approach and reposition moves: failures are logged and ignored.
//! - Single-ore clears: the ore is skipped.
//! - Group/path clears, storage trips, branch returns: route to `Error`.
//! - `Error` makes one best-effort trip home and then ends the session.

mod handlers;

use delve_primitives::BlockPos;
use tracing::{debug, error, info, trace, warn};

use crate::action::{Action, ActionOutcome, ActionQueue};
use crate::config::MinerConfig;
use crate::error::FailureReason;
use crate::logistics::LogisticsController;
use crate::scanner::BranchScanner;
use crate::session::{MiningSession, MiningState, SessionSummary};
use crate::world::{Env, WorldQuery};

/// Purpose of the action currently in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pending {
	ApproachGroup,
	ClearGroup,
	ApproachOre,
	ClearOre(BlockPos),
	ReturnToBranchStart,
	ApproachNextBranch,
	ClearPath,
	TravelToStorage,
	ResumeFromStorage,
	EmergencyReturn,
}

impl Pending {
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::ApproachGroup => "approach_group",
			Self::ClearGroup => "clear_group",
			Self::ApproachOre => "approach_ore",
			Self::ClearOre(_) => "clear_ore",
			Self::ReturnToBranchStart => "return_to_branch_start",
			Self::ApproachNextBranch => "approach_next_branch",
			Self::ClearPath => "clear_path",
			Self::TravelToStorage => "travel_to_storage",
			Self::ResumeFromStorage => "resume_from_storage",
			Self::EmergencyReturn => "emergency_return",
		}
	}
}

/// Tick-driven branch miner.
#[derive(Debug)]
pub struct MiningOrchestrator {
	config: MinerConfig,
	scanner: BranchScanner,
	logistics: LogisticsController,
	state: MiningState,
	session: MiningSession,
	pending: Option<Pending>,
	last_summary: Option<SessionSummary>,
}

impl MiningOrchestrator {
	pub fn new(config: MinerConfig) -> Self {
		Self {
			scanner: BranchScanner::new(config.branch_length, config.cavity_threshold),
			logistics: LogisticsController::new(&config),
			config,
			state: MiningState::Idle,
			session: MiningSession::default(),
			pending: None,
			last_summary: None,
		}
	}

	pub fn config(&self) -> &MinerConfig {
		&self.config
	}

	pub fn state(&self) -> MiningState {
		self.state
	}

	pub fn session(&self) -> &MiningSession {
		&self.session
	}

	pub fn pending(&self) -> Option<Pending> {
		self.pending
	}

	pub fn is_enabled(&self) -> bool {
		self.state != MiningState::Idle
	}

	/// Summary of the most recently ended session.
	pub fn last_summary(&self) -> Option<SessionSummary> {
		self.last_summary
	}

	/// Starts a fresh session. Any previous session state is discarded.
	pub fn enable(&mut self) {
		self.session = MiningSession::default();
		self.pending = None;
		self.last_summary = None;
		info!("miner.enable");
		self.transition(MiningState::Initializing);
	}

	/// Ends the session: cancels queued work and clears every session field.
	///
	/// Returns the summary of the ended session, or `None` if already idle.
	pub fn disable(&mut self, actions: &mut dyn ActionQueue) -> Option<SessionSummary> {
		actions.clear();
		self.pending = None;
		let was_enabled = self.is_enabled();
		let session = std::mem::take(&mut self.session);
		self.transition(MiningState::Idle);
		if !was_enabled {
			return None;
		}

		let summary = session.summary();
		info!(
			ticks = summary.ticks,
			branches = summary.branches_completed,
			groups = summary.groups_cleared,
			ores_found = summary.ores_found,
			ores_mined = summary.ores_mined,
			failure = summary.failure.map(|f| f.to_string()),
			"miner.disable"
		);
		self.last_summary = Some(summary);
		Some(summary)
	}

	/// Advances the state machine by one world tick.
	pub fn tick<W: WorldQuery>(&mut self, env: &mut Env<'_, W>) {
		if self.state == MiningState::Idle {
			return;
		}

		self.poll_completion(env);
		if self.state == MiningState::Idle {
			return;
		}

		self.session.tick_counter += 1;
		self.check_inventory(env);
		self.check_safety(env);
		self.dispatch(env);
	}

	fn dispatch<W: WorldQuery>(&mut self, env: &mut Env<'_, W>) {
		match self.state {
			MiningState::Idle => {}
			MiningState::Initializing => self.handle_initializing(env),
			MiningState::Scanning => self.handle_scanning(env),
			MiningState::ApproachingMining => self.handle_approaching_mining(env),
			MiningState::MiningBranch => self.handle_mining_branch(env),
			MiningState::CollectingItems | MiningState::CollectingOreItems | MiningState::CollectingPathItems => self.handle_collecting(env),
			MiningState::ScanningWalls => self.handle_scanning_walls(env),
			MiningState::MovingToOre => self.handle_moving_to_ore(env),
			MiningState::MiningOre => self.handle_mining_ore(env),
			MiningState::MovingToNextBranch => self.handle_moving_to_next_branch(env),
			MiningState::ApproachingNextBranch => self.handle_approaching_next_branch(env),
			MiningState::MiningNextBranchPath => self.handle_mining_next_branch_path(env),
			MiningState::ReturningToChest => self.handle_returning_to_chest(env),
			MiningState::StoringItems => self.handle_storing_items(env),
			MiningState::Error => self.handle_error(env),
		}
	}

	fn poll_completion<W: WorldQuery>(&mut self, env: &mut Env<'_, W>) {
		let Some(outcome) = env.actions.poll_completion() else {
			return;
		};
		let Some(purpose) = self.pending.take() else {
			trace!(?outcome, "miner.completion.orphaned");
			return;
		};
		debug!(purpose = purpose.as_str(), ?outcome, state = self.state.as_str(), "miner.completion");
		self.on_complete(env, purpose, outcome);
	}

	fn on_complete<W: WorldQuery>(&mut self, env: &mut Env<'_, W>, purpose: Pending, outcome: ActionOutcome) {
		let ok = outcome.is_success();
		match purpose {
			Pending::ApproachGroup => {
				if !ok {
					warn!(group = self.session.group_index, "miner.approach_failed");
				}
				self.session.current_group = self.session.groups.get(self.session.group_index).cloned().unwrap_or_default();
				self.transition(MiningState::MiningBranch);
			}
			Pending::ClearGroup if ok => {
				self.session.groups_cleared += 1;
				self.session.item_collection_ticks = 0;
				self.transition(MiningState::CollectingItems);
			}
			Pending::ClearGroup => self.fail(FailureReason::GroupClearFailed),
			Pending::ApproachOre => {
				if !ok {
					warn!(ore = self.session.ore_index, "miner.approach_failed");
				}
				self.transition(MiningState::MiningOre);
			}
			Pending::ClearOre(ore) if ok => {
				self.session.ores_mined += 1;
				let exposed = self.session.ores.recheck_exposed(env.world, ore);
				if exposed > 0 {
					debug!(%ore, exposed, "miner.vein.exposed");
				}
				self.session.item_collection_ticks = 0;
				self.transition(MiningState::CollectingOreItems);
			}
			Pending::ClearOre(ore) => {
				warn!(%ore, "miner.ore_skipped");
				self.session.ore_index += 1;
				self.transition(MiningState::MovingToOre);
			}
			Pending::ReturnToBranchStart if ok => self.shift_branch_start(),
			Pending::ReturnToBranchStart => self.fail(FailureReason::BranchReturnFailed),
			Pending::ApproachNextBranch => {
				if !ok {
					warn!("miner.approach_failed");
				}
				self.transition(MiningState::MiningNextBranchPath);
			}
			Pending::ClearPath if ok => {
				self.session.item_collection_ticks = 0;
				self.transition(MiningState::CollectingPathItems);
			}
			Pending::ClearPath => self.fail(FailureReason::PathClearFailed),
			Pending::TravelToStorage if ok => {
				self.session.chest_operation_ticks = 0;
				self.transition(MiningState::StoringItems);
			}
			Pending::TravelToStorage => self.fail(FailureReason::StorageTravelFailed),
			Pending::ResumeFromStorage if ok => self.transition(MiningState::Scanning),
			Pending::ResumeFromStorage => self.fail(FailureReason::StorageResumeFailed),
			Pending::EmergencyReturn => {
				if !ok {
					warn!("miner.emergency_return_failed");
				}
				self.disable(env.actions);
			}
		}
	}

	fn check_inventory<W: WorldQuery>(&mut self, env: &mut Env<'_, W>) {
		if !self.logistics.is_check_tick(self.session.tick_counter) || self.state.blocks_inventory_trigger() {
			return;
		}
		if !self.logistics.should_return(&*env.host) {
			return;
		}
		warn!(
			free_slots = env.host.free_slot_count(),
			min = self.config.min_free_slots,
			state = self.state.as_str(),
			"miner.inventory_full"
		);
		self.flush(env.actions);
		self.transition(MiningState::ReturningToChest);
	}

	fn check_safety<W: WorldQuery>(&mut self, env: &mut Env<'_, W>) {
		if self.state == MiningState::Error {
			return;
		}
		let Some(health) = env.host.health() else {
			return;
		};
		if health.fraction() < self.config.min_health_fraction {
			self.flush(env.actions);
			self.fail(FailureReason::LowHealth);
		}
	}

	/// Drops the in-flight action and anything queued behind it.
	fn flush(&mut self, actions: &mut dyn ActionQueue) {
		if let Some(purpose) = self.pending.take() {
			debug!(purpose = purpose.as_str(), "miner.flush");
		}
		actions.clear();
	}

	fn can_submit<W: WorldQuery>(&self, env: &Env<'_, W>) -> bool {
		self.pending.is_none() && env.actions.is_empty()
	}

	fn submit<W: WorldQuery>(&mut self, env: &mut Env<'_, W>, action: Action, purpose: Pending) {
		if !self.can_submit(env) {
			debug_assert!(false, "submit while an action is outstanding");
			warn!(purpose = purpose.as_str(), "miner.submit_while_busy");
			return;
		}
		debug!(
			kind = action.kind().as_str(),
			purpose = purpose.as_str(),
			state = self.state.as_str(),
			"miner.enqueue"
		);
		self.pending = Some(purpose);
		env.actions.enqueue(action);
	}

	fn transition(&mut self, next: MiningState) {
		if self.state != next {
			debug!(from = self.state.as_str(), to = next.as_str(), "miner.state");
		}
		self.state = next;
	}

	fn fail(&mut self, reason: FailureReason) {
		error!(%reason, state = self.state.as_str(), "miner.error");
		self.session.failure = Some(reason);
		self.transition(MiningState::Error);
	}
}
