//! Per-state handlers. Each runs at most once per tick and submits at most
//! one action.

use delve_primitives::{BlockPos, Direction};
use tracing::{debug, info, warn};

use super::{MiningOrchestrator, Pending};
use crate::action::Action;
use crate::config::STORAGE_RETURN_TICK;
use crate::error::FailureReason;
use crate::grouper::group_by_proximity;
use crate::logistics::{LogisticsController, StorageStep, find_nearest_storage};
use crate::session::MiningState;
use crate::world::{Env, WorldQuery};

impl MiningOrchestrator {
	fn branch_direction(&self) -> Option<Direction> {
		self.session.initial_direction
	}

	fn lateral_direction(&self) -> Option<Direction> {
		self.branch_direction().map(Direction::rotate_left)
	}

	fn move_to<W: WorldQuery>(&mut self, env: &mut Env<'_, W>, target: BlockPos, purpose: Pending) {
		let action = Action::Move {
			target,
			radius: self.config.move_radius,
		};
		self.submit(env, action, purpose);
	}

	pub(super) fn handle_initializing<W: WorldQuery>(&mut self, env: &mut Env<'_, W>) {
		let (Some(position), Some(facing)) = (env.host.position(), env.host.facing()) else {
			return;
		};
		if !facing.is_horizontal() {
			warn!(%facing, "miner.init.vertical_facing");
			return;
		}

		let storage = find_nearest_storage(env.world, position, self.config.storage_search_radius);
		match storage {
			Some(pos) => info!(%pos, "miner.storage.found"),
			None => warn!(radius = self.config.storage_search_radius, "miner.storage.missing"),
		}

		let start = position.step(facing);
		self.session.initial_position = Some(position);
		self.session.initial_direction = Some(facing);
		self.session.nearest_storage = storage;
		self.session.branch_start = Some(start);
		info!(%position, %facing, %start, "miner.init");
		self.transition(MiningState::Scanning);
	}

	pub(super) fn handle_scanning<W: WorldQuery>(&mut self, env: &mut Env<'_, W>) {
		let (Some(start), Some(dir)) = (self.session.branch_start, self.branch_direction()) else {
			return;
		};

		let outcome = self.scanner.scan(env.world, start, dir);
		let groups = group_by_proximity(&outcome.obstructions, self.config.group_distance);
		info!(
			%start,
			end = %outcome.end,
			distance = outcome.distance,
			obstructions = outcome.obstructions.len(),
			groups = groups.len(),
			stop = outcome.stop.as_str(),
			"miner.scan"
		);

		self.session.branch_end = Some(outcome.end);
		self.session.branch_blocks = outcome.obstructions;
		self.session.groups = groups;
		self.session.group_index = 0;
		self.session.current_group.clear();

		if self.session.groups.is_empty() {
			self.transition(MiningState::ScanningWalls);
		} else {
			self.transition(MiningState::ApproachingMining);
		}
	}

	pub(super) fn handle_approaching_mining<W: WorldQuery>(&mut self, env: &mut Env<'_, W>) {
		if !self.can_submit(env) {
			return;
		}
		let Some(group) = self.session.groups.get(self.session.group_index) else {
			self.transition(MiningState::ScanningWalls);
			return;
		};
		let (Some(center), Some(dir)) = (BlockPos::centroid(group), self.branch_direction()) else {
			self.session.current_group.clear();
			self.transition(MiningState::MiningBranch);
			return;
		};

		let target = center.offset(dir.opposite(), self.config.approach_distance as i32);
		self.move_to(env, target, Pending::ApproachGroup);
	}

	pub(super) fn handle_mining_branch<W: WorldQuery>(&mut self, env: &mut Env<'_, W>) {
		if !self.can_submit(env) {
			return;
		}
		if self.session.current_group.is_empty() {
			self.session.group_index += 1;
			self.transition(MiningState::ApproachingMining);
			return;
		}

		self.session.last_mining_center = BlockPos::centroid(&self.session.current_group);
		let blocks = self.session.current_group.clone();
		self.submit(env, Action::Clear { blocks }, Pending::ClearGroup);
	}

	/// Shared wait-then-pickup for the three collecting states.
	pub(super) fn handle_collecting<W: WorldQuery>(&mut self, env: &mut Env<'_, W>) {
		self.session.item_collection_ticks += 1;
		if self.session.item_collection_ticks < self.config.item_collection_wait_ticks {
			return;
		}
		self.session.item_collection_ticks = 0;

		if let Some(center) = self.session.last_mining_center {
			env.host.collect_near(center, self.config.pickup_radius);
		} else {
			debug!(state = self.state.as_str(), "miner.collect.no_center");
		}

		match self.state {
			MiningState::CollectingItems => {
				self.session.group_index += 1;
				self.session.current_group.clear();
				self.transition(MiningState::ApproachingMining);
			}
			MiningState::CollectingOreItems => {
				self.session.ore_index += 1;
				self.transition(MiningState::MovingToOre);
			}
			MiningState::CollectingPathItems => {
				self.complete_branch(env);
				self.transition(MiningState::Scanning);
			}
			other => debug_assert!(false, "collecting handler in {}", other.as_str()),
		}
	}

	pub(super) fn handle_scanning_walls<W: WorldQuery>(&mut self, env: &mut Env<'_, W>) {
		let (Some(start), Some(dir)) = (self.session.branch_start, self.branch_direction()) else {
			return;
		};
		let end = self.session.branch_end.unwrap_or(start);
		let span = dir.along(start, end).max(0) as u32;

		let found = self.session.ores.sweep_branch(env.world, start, dir, span, self.session.ore_index);
		self.session.ores.order_by_distance(end);
		self.session.ore_index = 0;
		let planned = self.session.ores.plan().len();
		info!(found, planned, total = self.session.ores.visited().len(), span, "miner.walls");

		if planned == 0 {
			self.transition(MiningState::MovingToNextBranch);
		} else {
			self.transition(MiningState::MovingToOre);
		}
	}

	pub(super) fn handle_moving_to_ore<W: WorldQuery>(&mut self, env: &mut Env<'_, W>) {
		if !self.can_submit(env) {
			return;
		}
		let (Some(ore), Some(dir)) = (self.session.ores.get(self.session.ore_index), self.branch_direction()) else {
			self.transition(MiningState::MovingToNextBranch);
			return;
		};

		let target = ore.offset(dir.opposite(), self.config.approach_distance as i32);
		self.move_to(env, target, Pending::ApproachOre);
	}

	pub(super) fn handle_mining_ore<W: WorldQuery>(&mut self, env: &mut Env<'_, W>) {
		if !self.can_submit(env) {
			return;
		}
		let Some(ore) = self.session.ores.get(self.session.ore_index) else {
			self.transition(MiningState::MovingToNextBranch);
			return;
		};

		self.session.last_mining_center = Some(ore);
		self.submit(env, Action::Clear { blocks: vec![ore] }, Pending::ClearOre(ore));
	}

	pub(super) fn handle_moving_to_next_branch<W: WorldQuery>(&mut self, env: &mut Env<'_, W>) {
		if !self.can_submit(env) {
			return;
		}
		let Some(start) = self.session.branch_start else {
			self.fail(FailureReason::BranchReturnFailed);
			return;
		};
		self.move_to(env, start, Pending::ReturnToBranchStart);
	}

	/// Moves the branch start sideways once the agent is back at it.
	pub(super) fn shift_branch_start(&mut self) {
		let (Some(start), Some(lateral)) = (self.session.branch_start, self.lateral_direction()) else {
			self.fail(FailureReason::BranchReturnFailed);
			return;
		};
		let next = start.offset(lateral, self.config.branch_spacing());
		self.session.previous_branch_start = Some(start);
		self.session.branch_start = Some(next);
		debug!(from = %start, to = %next, %lateral, "miner.branch.shift");
		self.transition(MiningState::ApproachingNextBranch);
	}

	pub(super) fn handle_approaching_next_branch<W: WorldQuery>(&mut self, env: &mut Env<'_, W>) {
		if !self.can_submit(env) {
			return;
		}
		let (Some(start), Some(lateral)) = (self.session.branch_start, self.lateral_direction()) else {
			self.transition(MiningState::MiningNextBranchPath);
			return;
		};
		self.move_to(env, start.step(lateral.opposite()), Pending::ApproachNextBranch);
	}

	pub(super) fn handle_mining_next_branch_path<W: WorldQuery>(&mut self, env: &mut Env<'_, W>) {
		if !self.can_submit(env) {
			return;
		}
		let (Some(from), Some(lateral)) = (self.session.previous_branch_start, self.lateral_direction()) else {
			self.complete_branch(env);
			self.transition(MiningState::Scanning);
			return;
		};

		let mut blocks = Vec::new();
		for step in 1..=self.config.branch_spacing() {
			let floor = from.offset(lateral, step);
			for cell in [floor, floor.up()] {
				let Some(block) = env.world.block_at(cell) else {
					return;
				};
				if !env.world.is_air(&block) && !env.world.is_hazard_liquid(&block) {
					blocks.push(cell);
				}
			}
		}

		if blocks.is_empty() {
			self.complete_branch(env);
			self.transition(MiningState::Scanning);
			return;
		}

		self.session.last_mining_center = BlockPos::centroid(&blocks);
		debug!(blocks = blocks.len(), "miner.path");
		self.submit(env, Action::Clear { blocks }, Pending::ClearPath);
	}

	pub(super) fn handle_returning_to_chest<W: WorldQuery>(&mut self, env: &mut Env<'_, W>) {
		let Some(storage) = self.session.nearest_storage else {
			self.fail(FailureReason::StorageMissing);
			return;
		};
		if !self.can_submit(env) {
			return;
		}
		let action = Action::Move {
			target: storage,
			radius: self.config.move_radius.max(1),
		};
		self.submit(env, action, Pending::TravelToStorage);
	}

	pub(super) fn handle_storing_items<W: WorldQuery>(&mut self, env: &mut Env<'_, W>) {
		self.session.chest_operation_ticks += 1;
		let ticks = self.session.chest_operation_ticks;

		match LogisticsController::step_at(ticks) {
			Some(StorageStep::Open) => {
				if let Some(storage) = self.session.nearest_storage {
					env.host.open(storage);
				}
			}
			Some(StorageStep::Deposit) => env.host.deposit_matching(),
			Some(StorageStep::Close) => {
				env.host.close();
				info!(free_slots = env.host.free_slot_count(), "miner.storage.deposited");
			}
			Some(StorageStep::Return) | None => {
				if ticks < STORAGE_RETURN_TICK || !self.can_submit(env) {
					return;
				}
				let Some(target) = self.session.branch_start.or(self.session.initial_position) else {
					self.fail(FailureReason::StorageResumeFailed);
					return;
				};
				self.move_to(env, target, Pending::ResumeFromStorage);
			}
		}
	}

	pub(super) fn handle_error<W: WorldQuery>(&mut self, env: &mut Env<'_, W>) {
		if !self.can_submit(env) {
			return;
		}
		let Some(home) = self.session.initial_position else {
			self.disable(env.actions);
			return;
		};
		let action = Action::Move {
			target: home,
			radius: self.config.move_radius.max(1),
		};
		self.submit(env, action, Pending::EmergencyReturn);
	}

	fn complete_branch<W: WorldQuery>(&mut self, env: &mut Env<'_, W>) {
		self.session.branches_completed += 1;
		let items = env.host.item_counts();
		let stacks: Vec<String> = items.iter().map(|(name, count)| format!("{name} x{count}")).collect();
		info!(
			branch = self.session.branches_completed,
			free_slots = env.host.free_slot_count(),
			items = %stacks.join(", "),
			"miner.branch.complete"
		);
	}
}
