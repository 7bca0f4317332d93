//! Narrow contracts the orchestrator consumes from its surroundings.
//!
//! Every query returns an explicit [`Option`]: `None` means "not known this
//! tick" (an unloaded chunk, a missing player) and callers bail out for the
//! current tick rather than guessing.

use delve_primitives::{BlockPos, Direction};

use crate::action::ActionQueue;

/// Read-only block-state lookup.
pub trait WorldQuery {
	/// Opaque block state handed back by [`WorldQuery::block_at`].
	type Block;

	/// Block state at `pos`, `None` when the cell is not loaded.
	fn block_at(&self, pos: BlockPos) -> Option<Self::Block>;

	fn is_air(&self, block: &Self::Block) -> bool;

	/// Water, lava and anything else that must never be tunnelled into.
	fn is_hazard_liquid(&self, block: &Self::Block) -> bool;

	/// Ore-like blocks harvested by vein detection.
	fn is_target_material(&self, block: &Self::Block) -> bool;

	/// Containers the agent can deposit into.
	fn is_storage(&self, block: &Self::Block) -> bool;

	fn is_air_at(&self, pos: BlockPos) -> Option<bool> {
		self.block_at(pos).map(|b| self.is_air(&b))
	}

	fn is_hazard_at(&self, pos: BlockPos) -> Option<bool> {
		self.block_at(pos).map(|b| self.is_hazard_liquid(&b))
	}

	fn is_target_at(&self, pos: BlockPos) -> Option<bool> {
		self.block_at(pos).map(|b| self.is_target_material(&b))
	}

	fn is_storage_at(&self, pos: BlockPos) -> Option<bool> {
		self.block_at(pos).map(|b| self.is_storage(&b))
	}
}

/// Current and maximum health of the agent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Health {
	pub current: f32,
	pub max: f32,
}

impl Health {
	/// Fraction of maximum health remaining, `1.0` for a zero maximum.
	pub fn fraction(self) -> f32 {
		if self.max <= 0.0 { 1.0 } else { self.current / self.max }
	}
}

/// Where the agent is and which way it faces.
pub trait AgentState {
	fn position(&self) -> Option<BlockPos>;
	fn facing(&self) -> Option<Direction>;
	fn health(&self) -> Option<Health> {
		None
	}
}

/// Inventory slot accounting.
pub trait Inventory {
	fn free_slot_count(&self) -> usize;

	/// Aggregated `(item, count)` pairs for reporting.
	fn item_counts(&self) -> Vec<(String, u32)> {
		Vec::new()
	}
}

/// Container interaction. Calls are fire-and-forget within a tick.
pub trait Storage {
	fn open(&mut self, pos: BlockPos);
	fn deposit_matching(&mut self);
	fn close(&mut self);
}

/// Nearby dropped-item collection.
pub trait ItemPickup {
	fn collect_near(&mut self, center: BlockPos, radius: f64);
}

/// Everything on the agent's side of the boundary, bundled so a single
/// host object can back all of it.
pub trait Host: AgentState + Inventory + Storage + ItemPickup {}

impl<T: AgentState + Inventory + Storage + ItemPickup + ?Sized> Host for T {}

/// Borrowed collaborators for one orchestrator tick.
pub struct Env<'a, W: WorldQuery> {
	pub world: &'a W,
	pub actions: &'a mut dyn ActionQueue,
	pub host: &'a mut dyn Host,
}

impl<'a, W: WorldQuery> Env<'a, W> {
	pub fn new(world: &'a W, actions: &'a mut dyn ActionQueue, host: &'a mut dyn Host) -> Self {
		Self { world, actions, host }
	}
}
