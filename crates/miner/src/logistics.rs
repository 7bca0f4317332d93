//! Return-to-storage logistics.
//!
//! Storage is resolved once per session by an exhaustive cube search. Once
//! the agent stands at the storage, the open/deposit/close sequence is
//! driven purely by elapsed ticks; only the trip back uses the action queue.

use delve_primitives::BlockPos;

use crate::config::{MinerConfig, STORAGE_CLOSE_TICK, STORAGE_DEPOSIT_TICK, STORAGE_OPEN_TICK, STORAGE_RETURN_TICK};
use crate::world::{Inventory, WorldQuery};

/// One step of the storage visit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageStep {
	Open,
	Deposit,
	Close,
	Return,
}

/// Decides when to go home and what to do once there.
#[derive(Debug, Clone, Copy)]
pub struct LogisticsController {
	min_free_slots: usize,
	check_interval: u32,
}

impl LogisticsController {
	pub fn new(config: &MinerConfig) -> Self {
		Self {
			min_free_slots: config.min_free_slots,
			check_interval: config.inventory_check_interval.max(1),
		}
	}

	/// True on ticks where the inventory should be inspected.
	pub fn is_check_tick(&self, tick: u64) -> bool {
		tick % u64::from(self.check_interval) == 0
	}

	/// True when fewer than the configured minimum of slots are free.
	pub fn should_return<I: Inventory + ?Sized>(&self, inventory: &I) -> bool {
		inventory.free_slot_count() < self.min_free_slots
	}

	/// Sub-action scheduled for `ticks` elapsed since arriving at storage.
	pub const fn step_at(ticks: u32) -> Option<StorageStep> {
		match ticks {
			STORAGE_OPEN_TICK => Some(StorageStep::Open),
			STORAGE_DEPOSIT_TICK => Some(StorageStep::Deposit),
			STORAGE_CLOSE_TICK => Some(StorageStep::Close),
			STORAGE_RETURN_TICK => Some(StorageStep::Return),
			_ => None,
		}
	}
}

/// Nearest storage block within a cube of half-width `radius` around `center`.
///
/// Scans x, then y, then z in ascending order; on equal squared distance the
/// first one scanned wins. Unloaded cells are skipped.
pub fn find_nearest_storage<W: WorldQuery>(world: &W, center: BlockPos, radius: u32) -> Option<BlockPos> {
	let r = radius as i32;
	let mut best: Option<(i64, BlockPos)> = None;
	for dx in -r..=r {
		for dy in -r..=r {
			for dz in -r..=r {
				let pos = center.add(dx, dy, dz);
				if world.is_storage_at(pos) != Some(true) {
					continue;
				}
				let dist = center.squared_distance(pos);
				if best.is_none_or(|(d, _)| dist < d) {
					best = Some((dist, pos));
				}
			}
		}
	}
	best.map(|(_, pos)| pos)
}
