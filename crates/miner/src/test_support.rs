//! Minimal fixtures shared by the unit tests of this crate.

use std::collections::VecDeque;

use delve_primitives::{BlockPos, Direction};
use rustc_hash::{FxHashMap, FxHashSet};

use crate::action::{Action, ActionOutcome, ActionQueue};
use crate::world::{AgentState, Health, Inventory, ItemPickup, Storage, WorldQuery};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
	Air,
	Stone,
	Water,
	Lava,
	Ore,
	Chest,
}

/// Sparse world: explicit cells over a uniform fill, optionally bounded.
pub struct TestWorld {
	cells: FxHashMap<BlockPos, Cell>,
	fill: Cell,
	loaded: Option<(BlockPos, BlockPos)>,
	holes: FxHashSet<BlockPos>,
}

impl TestWorld {
	pub fn filled(fill: Cell) -> Self {
		Self {
			cells: FxHashMap::default(),
			fill,
			loaded: None,
			holes: FxHashSet::default(),
		}
	}

	pub fn stone() -> Self {
		Self::filled(Cell::Stone)
	}

	pub fn set(&mut self, pos: BlockPos, cell: Cell) -> &mut Self {
		self.cells.insert(pos, cell);
		self
	}

	pub fn fill_box(&mut self, min: BlockPos, max: BlockPos, cell: Cell) -> &mut Self {
		for x in min.x..=max.x {
			for y in min.y..=max.y {
				for z in min.z..=max.z {
					self.cells.insert(BlockPos::new(x, y, z), cell);
				}
			}
		}
		self
	}

	pub fn load_only(&mut self, min: BlockPos, max: BlockPos) -> &mut Self {
		self.loaded = Some((min, max));
		self
	}

	/// Marks a single cell as not loaded.
	pub fn unload(&mut self, pos: BlockPos) -> &mut Self {
		self.holes.insert(pos);
		self
	}
}

impl WorldQuery for TestWorld {
	type Block = Cell;

	fn block_at(&self, pos: BlockPos) -> Option<Cell> {
		if self.holes.contains(&pos) {
			return None;
		}
		if let Some((min, max)) = self.loaded {
			let inside = (min.x..=max.x).contains(&pos.x) && (min.y..=max.y).contains(&pos.y) && (min.z..=max.z).contains(&pos.z);
			if !inside {
				return None;
			}
		}
		Some(self.cells.get(&pos).copied().unwrap_or(self.fill))
	}

	fn is_air(&self, block: &Cell) -> bool {
		*block == Cell::Air
	}

	fn is_hazard_liquid(&self, block: &Cell) -> bool {
		matches!(block, Cell::Water | Cell::Lava)
	}

	fn is_target_material(&self, block: &Cell) -> bool {
		*block == Cell::Ore
	}

	fn is_storage(&self, block: &Cell) -> bool {
		*block == Cell::Chest
	}
}

/// Queue whose actions finish only when a test says so.
#[derive(Default)]
pub struct ScriptedQueue {
	pub queued: VecDeque<Action>,
	pub completed: Option<ActionOutcome>,
	pub history: Vec<Action>,
	pub enqueued_while_busy: usize,
	pub clears: usize,
}

impl ScriptedQueue {
	/// Finishes the head action with `outcome`.
	pub fn finish(&mut self, outcome: ActionOutcome) -> Option<Action> {
		let action = self.queued.pop_front()?;
		self.completed = Some(outcome);
		Some(action)
	}

	pub fn last(&self) -> Option<&Action> {
		self.history.last()
	}
}

impl ActionQueue for ScriptedQueue {
	fn is_empty(&self) -> bool {
		self.queued.is_empty()
	}

	fn enqueue(&mut self, action: Action) {
		if !self.queued.is_empty() {
			self.enqueued_while_busy += 1;
		}
		self.history.push(action.clone());
		self.queued.push_back(action);
	}

	fn poll_completion(&mut self) -> Option<ActionOutcome> {
		self.completed.take()
	}

	fn clear(&mut self) {
		self.clears += 1;
		self.queued.clear();
		self.completed = None;
	}
}

/// Agent and inventory double recording every side effect.
pub struct FakeHost {
	pub position: Option<BlockPos>,
	pub facing: Option<Direction>,
	pub health: Option<Health>,
	pub free_slots: usize,
	pub opened: Vec<BlockPos>,
	pub deposits: usize,
	pub closes: usize,
	pub pickups: Vec<BlockPos>,
}

impl FakeHost {
	pub fn at(position: BlockPos, facing: Direction) -> Self {
		Self {
			position: Some(position),
			facing: Some(facing),
			health: None,
			free_slots: 36,
			opened: Vec::new(),
			deposits: 0,
			closes: 0,
			pickups: Vec::new(),
		}
	}
}

impl AgentState for FakeHost {
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

impl Inventory for FakeHost {
	fn free_slot_count(&self) -> usize {
		self.free_slots
	}

	fn item_counts(&self) -> Vec<(String, u32)> {
		vec![("cobblestone".to_string(), 12)]
	}
}

impl Storage for FakeHost {
	fn open(&mut self, pos: BlockPos) {
		self.opened.push(pos);
	}

	fn deposit_matching(&mut self) {
		self.deposits += 1;
	}

	fn close(&mut self) {
		self.closes += 1;
	}
}

impl ItemPickup for FakeHost {
	fn collect_near(&mut self, center: BlockPos, _radius: f64) {
		self.pickups.push(center);
	}
}
