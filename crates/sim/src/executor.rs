//! Action executor for the simulated world.
//!
//! [`SimActionQueue`] is the miner's [`ActionQueue`]: it holds submitted
//! actions in FIFO order and, once per tick, advances the head action by one
//! tick of work. An action's effect is applied on the tick it finishes, and
//! its outcome waits in a single completion slot until polled.

use std::collections::VecDeque;

use delve_miner::{Action, ActionKind, ActionOutcome, ActionQueue};
use delve_primitives::BlockPos;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::host::SimHost;
use crate::world::{Bounds, GridWorld};

/// How long actions take.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Timing {
	/// Blocks travelled per tick by a move.
	pub move_speed: f64,
	/// Ticks spent breaking each block of a clear.
	pub ticks_per_block: u32,
}

impl Default for Timing {
	fn default() -> Self {
		Self {
			move_speed: 2.0,
			ticks_per_block: 1,
		}
	}
}

impl Timing {
	fn duration(&self, action: &Action, from: Option<BlockPos>) -> u32 {
		let ticks = match action {
			Action::Move { target, .. } => {
				let distance = from.map_or(0.0, |pos| pos.distance(*target));
				let speed = if self.move_speed > 0.0 { self.move_speed } else { 1.0 };
				(distance / speed).ceil() as u32
			}
			Action::Clear { blocks } => blocks.len() as u32 * self.ticks_per_block,
		};
		ticks.max(1)
	}
}

/// Running totals kept by the executor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QueueStats {
	pub enqueued: u32,
	pub succeeded: u32,
	pub failed: u32,
	pub cancelled: u32,
	/// Enqueues that arrived while an action was still outstanding.
	pub busy_enqueues: u32,
	pub blocks_cleared: u32,
}

#[derive(Debug)]
struct Running {
	action: Action,
	remaining: u32,
}

/// FIFO action queue with a one-slot completion mailbox.
#[derive(Debug, Default)]
pub struct SimActionQueue {
	pending: VecDeque<Action>,
	running: Option<Running>,
	completed: Option<ActionOutcome>,
	timing: Timing,
	faults: FxHashMap<ActionKind, u32>,
	stats: QueueStats,
}

impl SimActionQueue {
	pub fn new(timing: Timing) -> Self {
		Self {
			timing,
			..Self::default()
		}
	}

	pub fn stats(&self) -> QueueStats {
		self.stats
	}

	/// The action currently being worked on, if any.
	pub fn current(&self) -> Option<&Action> {
		self.running.as_ref().map(|r| &r.action).or_else(|| self.pending.front())
	}

	/// Makes the next `count` actions of `kind` fail without effect.
	pub fn inject_failures(&mut self, kind: ActionKind, count: u32) {
		*self.faults.entry(kind).or_default() += count;
	}

	/// Advances the head action by one tick.
	pub fn advance(&mut self, world: &mut GridWorld, host: &mut SimHost) {
		if self.running.is_none() {
			let Some(action) = self.pending.pop_front() else {
				return;
			};
			let remaining = self.timing.duration(&action, host.position);
			trace!(kind = action.kind().as_str(), remaining, "sim.action.start");
			self.running = Some(Running { action, remaining });
		}

		let Some(running) = self.running.as_mut() else {
			return;
		};
		running.remaining = running.remaining.saturating_sub(1);
		if running.remaining > 0 {
			return;
		}
		let Some(Running { action, .. }) = self.running.take() else {
			return;
		};

		let outcome = if self.take_fault(action.kind()) {
			debug!(kind = action.kind().as_str(), "sim.action.injected_failure");
			ActionOutcome::Failure
		} else {
			self.execute(&action, world, host)
		};
		match outcome {
			ActionOutcome::Success => self.stats.succeeded += 1,
			ActionOutcome::Failure => self.stats.failed += 1,
		}
		if self.completed.replace(outcome).is_some() {
			warn!("sim.action.completion_overwritten");
		}
		debug!(kind = action.kind().as_str(), ?outcome, "sim.action.done");
	}

	fn take_fault(&mut self, kind: ActionKind) -> bool {
		match self.faults.get_mut(&kind) {
			Some(left) if *left > 0 => {
				*left -= 1;
				true
			}
			_ => false,
		}
	}

	fn execute(&mut self, action: &Action, world: &mut GridWorld, host: &mut SimHost) -> ActionOutcome {
		match action {
			Action::Move { target, radius } => match standing_spot(world, *target, *radius) {
				Some(spot) => {
					host.position = Some(spot);
					ActionOutcome::Success
				}
				None => ActionOutcome::Failure,
			},
			Action::Clear { blocks } => {
				let mut unloaded = false;
				for &pos in blocks {
					if !world.is_loaded(pos) {
						unloaded = true;
						continue;
					}
					if let Some(block) = world.break_block(pos) {
						self.stats.blocks_cleared += 1;
						if let Some(item) = block.drop_name() {
							host.drop_item(pos, item);
						}
					}
				}
				if unloaded { ActionOutcome::Failure } else { ActionOutcome::Success }
			}
		}
	}
}

/// Closest cell within `radius` (per axis) of `target` the agent can stand in.
fn standing_spot(world: &GridWorld, target: BlockPos, radius: u32) -> Option<BlockPos> {
	if !world.is_loaded(target) {
		return None;
	}
	let r = radius as i32;
	let bounds = Bounds::new(target.add(-r, -r, -r), target.add(r, r, r));
	let mut best: Option<(i64, BlockPos)> = None;
	for cell in bounds.cells().filter(|cell| world.can_stand(*cell)) {
		let dist = cell.squared_distance(target);
		if best.is_none_or(|(d, _)| dist < d) {
			best = Some((dist, cell));
		}
	}
	best.map(|(_, cell)| cell)
}

impl ActionQueue for SimActionQueue {
	fn is_empty(&self) -> bool {
		self.pending.is_empty() && self.running.is_none()
	}

	fn enqueue(&mut self, action: Action) {
		if !self.is_empty() {
			self.stats.busy_enqueues += 1;
			warn!(kind = action.kind().as_str(), "sim.action.enqueued_while_busy");
		}
		self.stats.enqueued += 1;
		self.pending.push_back(action);
	}

	fn poll_completion(&mut self) -> Option<ActionOutcome> {
		self.completed.take()
	}

	fn clear(&mut self) {
		let dropped = self.pending.len() + usize::from(self.running.is_some());
		if dropped > 0 {
			debug!(dropped, "sim.action.cancelled");
		}
		self.stats.cancelled += dropped as u32;
		self.pending.clear();
		self.running = None;
		self.completed = None;
	}
}
