//! Linear branch scanning.
//!
//! Walks forward from a branch start, collecting the solid cells at floor and
//! head height that must be cleared, and stops short of liquids and large
//! open voids so the tunnel never breaks into them.

use std::collections::VecDeque;

use delve_primitives::{BlockPos, Direction};
use rustc_hash::FxHashSet;

use crate::world::WorldQuery;

/// Why a scan ended where it did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
	/// Reached the configured branch length.
	MaxLength,
	/// Water or lava directly ahead (or in the first cell).
	Hazard,
	/// A connected void at least the cavity threshold in size lies ahead.
	Cavity,
	/// The world is not loaded further along the branch.
	Unloaded,
}

impl StopReason {
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::MaxLength => "max_length",
			Self::Hazard => "hazard",
			Self::Cavity => "cavity",
			Self::Unloaded => "unloaded",
		}
	}
}

/// Result of scanning one branch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanOutcome {
	/// Cells to clear, in scan order (floor before head height per step).
	pub obstructions: Vec<BlockPos>,
	/// Floor cell of the last step that is safe to tunnel into.
	pub end: BlockPos,
	/// Steps from the start to `end`.
	pub distance: u32,
	pub stop: StopReason,
}

/// Scans a straight two-high tunnel.
#[derive(Debug, Clone, Copy)]
pub struct BranchScanner {
	pub max_length: u32,
	pub cavity_threshold: usize,
}

impl BranchScanner {
	pub const fn new(max_length: u32, cavity_threshold: usize) -> Self {
		Self {
			max_length,
			cavity_threshold,
		}
	}

	/// Scans from `start` (exclusive) along `dir`.
	///
	/// Deterministic for a fixed world snapshot.
	pub fn scan<W: WorldQuery>(&self, world: &W, start: BlockPos, dir: Direction) -> ScanOutcome {
		let mut obstructions = Vec::new();
		let mut distance = 0;
		let mut stop = StopReason::MaxLength;

		for step in 1..=self.max_length as i32 {
			let floor = start.offset(dir, step);
			let head = floor.up();
			let (Some(floor_block), Some(head_block)) = (world.block_at(floor), world.block_at(head)) else {
				stop = StopReason::Unloaded;
				break;
			};
			if world.is_hazard_liquid(&floor_block) || world.is_hazard_liquid(&head_block) {
				stop = StopReason::Hazard;
				break;
			}

			for (pos, block) in [(floor, floor_block), (head, head_block)] {
				if !world.is_air(&block) && !world.is_target_material(&block) {
					obstructions.push(pos);
				}
			}
			distance = step as u32;

			if let Some(reason) = self.blocked_ahead(world, floor.step(dir)) {
				stop = reason;
				break;
			}
		}

		ScanOutcome {
			obstructions,
			end: start.offset(dir, distance as i32),
			distance,
			stop,
		}
	}

	fn blocked_ahead<W: WorldQuery>(&self, world: &W, next_floor: BlockPos) -> Option<StopReason> {
		// Per cell, so an unloaded floor still checks the head above it.
		for cell in [next_floor, next_floor.up()] {
			if world.is_hazard_at(cell) == Some(true) {
				return Some(StopReason::Hazard);
			}
		}
		for cell in [next_floor, next_floor.up()] {
			if world.is_air_at(cell) == Some(true) && count_connected_open(world, cell, self.cavity_threshold) >= self.cavity_threshold {
				return Some(StopReason::Cavity);
			}
		}
		None
	}
}

/// Counts open cells 6-connected to `start`, stopping once `cap` is reached.
///
/// `start` itself counts when open. Unloaded cells are treated as closed.
pub fn count_connected_open<W: WorldQuery>(world: &W, start: BlockPos, cap: usize) -> usize {
	if cap == 0 || world.is_air_at(start) != Some(true) {
		return 0;
	}

	let mut visited = FxHashSet::default();
	let mut queue = VecDeque::new();
	visited.insert(start);
	queue.push_back(start);

	while let Some(current) = queue.pop_front() {
		if visited.len() >= cap {
			break;
		}
		for neighbor in current.neighbors() {
			if visited.contains(&neighbor) || world.is_air_at(neighbor) != Some(true) {
				continue;
			}
			visited.insert(neighbor);
			if visited.len() >= cap {
				return cap;
			}
			queue.push_back(neighbor);
		}
	}

	visited.len().min(cap)
}
