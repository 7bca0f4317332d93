//! The simulated agent and everything it carries.

use std::collections::BTreeMap;

use delve_miner::{AgentState, Health, Inventory, ItemPickup, Storage};
use delve_primitives::{BlockPos, Direction};
use rustc_hash::FxHashMap;
use tracing::{debug, trace};

/// Slots in the agent inventory.
pub const INVENTORY_SLOTS: usize = 36;
/// Leading inventory slots kept back when depositing.
pub const HOTBAR_SLOTS: usize = 9;
/// Slots in one storage container.
pub const STORAGE_SLOTS: usize = 27;
/// Items per full stack.
pub const STACK_SIZE: u32 = 64;

/// A stack of identical items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemStack {
	pub item: String,
	pub count: u32,
}

/// Fixed-size slot array with stack merging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotGrid {
	slots: Vec<Option<ItemStack>>,
}

impl SlotGrid {
	pub fn new(size: usize) -> Self {
		Self { slots: vec![None; size] }
	}

	pub fn len(&self) -> usize {
		self.slots.len()
	}

	pub fn is_empty(&self) -> bool {
		self.slots.iter().all(Option::is_none)
	}

	pub fn free_slots(&self) -> usize {
		self.slots.iter().filter(|slot| slot.is_none()).count()
	}

	pub fn slot(&self, index: usize) -> Option<&ItemStack> {
		self.slots.get(index)?.as_ref()
	}

	/// Adds `count` of `item`, topping up partial stacks before using empty
	/// slots. Returns what did not fit.
	pub fn insert(&mut self, item: &str, mut count: u32) -> u32 {
		for stack in self.slots.iter_mut().flatten() {
			if count == 0 {
				return 0;
			}
			if stack.item == item && stack.count < STACK_SIZE {
				let moved = count.min(STACK_SIZE - stack.count);
				stack.count += moved;
				count -= moved;
			}
		}
		for slot in self.slots.iter_mut().filter(|slot| slot.is_none()) {
			if count == 0 {
				break;
			}
			let moved = count.min(STACK_SIZE);
			*slot = Some(ItemStack {
				item: item.to_string(),
				count: moved,
			});
			count -= moved;
		}
		count
	}

	/// Moves the stack at `index` into `target` as far as it fits.
	pub fn transfer(&mut self, index: usize, target: &mut SlotGrid) {
		let Some(slot) = self.slots.get_mut(index) else {
			return;
		};
		let Some(stack) = slot.take() else {
			return;
		};
		let left = target.insert(&stack.item, stack.count);
		if left > 0 {
			*slot = Some(ItemStack {
				item: stack.item,
				count: left,
			});
		}
	}

	/// Total count per item name, sorted by name.
	pub fn totals(&self) -> Vec<(String, u32)> {
		let mut totals = BTreeMap::<&str, u32>::new();
		for stack in self.slots.iter().flatten() {
			*totals.entry(stack.item.as_str()).or_default() += stack.count;
		}
		totals.into_iter().map(|(item, count)| (item.to_string(), count)).collect()
	}
}

/// An item lying in the world.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DroppedItem {
	pub pos: BlockPos,
	pub item: String,
}

/// Simulated player: body, backpack, opened containers and loose drops.
#[derive(Debug, Clone)]
pub struct SimHost {
	pub position: Option<BlockPos>,
	pub facing: Option<Direction>,
	pub health: Option<Health>,
	pub inventory: SlotGrid,
	pub containers: FxHashMap<BlockPos, SlotGrid>,
	pub open_container: Option<BlockPos>,
	pub drops: Vec<DroppedItem>,
	/// Items that did not fit in the inventory when picked up.
	pub overflow: u32,
}

impl SimHost {
	pub fn new(position: BlockPos, facing: Direction) -> Self {
		Self {
			position: Some(position),
			facing: Some(facing),
			health: Some(Health { current: 20.0, max: 20.0 }),
			inventory: SlotGrid::new(INVENTORY_SLOTS),
			containers: FxHashMap::default(),
			open_container: None,
			drops: Vec::new(),
			overflow: 0,
		}
	}

	pub fn drop_item(&mut self, pos: BlockPos, item: &str) {
		self.drops.push(DroppedItem {
			pos,
			item: item.to_string(),
		});
	}

	/// Totals across every container.
	pub fn stored_totals(&self) -> Vec<(String, u32)> {
		let mut totals = BTreeMap::<String, u32>::new();
		for grid in self.containers.values() {
			for (item, count) in grid.totals() {
				*totals.entry(item).or_default() += count;
			}
		}
		totals.into_iter().collect()
	}
}

impl AgentState for SimHost {
	fn position(&self) -> Option<BlockPos> {
		self.position
	}

	fn facing(&self) -> Option<Direction> {
		self.facing
	}

	fn health(&self) -> Option<Health> {
		self.health
	}
}

impl Inventory for SimHost {
	fn free_slot_count(&self) -> usize {
		self.inventory.free_slots()
	}

	fn item_counts(&self) -> Vec<(String, u32)> {
		self.inventory.totals()
	}
}

impl Storage for SimHost {
	fn open(&mut self, pos: BlockPos) {
		self.containers.entry(pos).or_insert_with(|| SlotGrid::new(STORAGE_SLOTS));
		self.open_container = Some(pos);
		debug!(%pos, "sim.storage.open");
	}

	/// Moves every non-hotbar stack into the open container.
	fn deposit_matching(&mut self) {
		let Some(pos) = self.open_container else {
			return;
		};
		let Some(target) = self.containers.get_mut(&pos) else {
			return;
		};
		let before = self.inventory.free_slots();
		for index in HOTBAR_SLOTS..self.inventory.len() {
			self.inventory.transfer(index, target);
		}
		debug!(%pos, freed = self.inventory.free_slots() - before, "sim.storage.deposit");
	}

	fn close(&mut self) {
		self.open_container = None;
	}
}

impl ItemPickup for SimHost {
	fn collect_near(&mut self, center: BlockPos, radius: f64) {
		let (near, far): (Vec<_>, Vec<_>) = std::mem::take(&mut self.drops)
			.into_iter()
			.partition(|drop| drop.pos.distance(center) <= radius);
		self.drops = far;

		let picked = near.len();
		for drop in near {
			self.overflow += self.inventory.insert(&drop.item, 1);
		}
		trace!(%center, picked, left = self.drops.len(), "sim.pickup");
	}
}

#[cfg(test)]
mod tests;
