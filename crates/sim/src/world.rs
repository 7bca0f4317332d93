//! Sparse voxel grid.

use delve_miner::WorldQuery;
use delve_primitives::BlockPos;
use rustc_hash::FxHashMap;

use crate::block::Block;

/// Inclusive axis-aligned box of cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
	pub min: BlockPos,
	pub max: BlockPos,
}

impl Bounds {
	/// Builds a box from two opposite corners in any order.
	pub fn new(a: BlockPos, b: BlockPos) -> Self {
		Self {
			min: BlockPos::new(a.x.min(b.x), a.y.min(b.y), a.z.min(b.z)),
			max: BlockPos::new(a.x.max(b.x), a.y.max(b.y), a.z.max(b.z)),
		}
	}

	pub fn contains(&self, pos: BlockPos) -> bool {
		(self.min.x..=self.max.x).contains(&pos.x)
			&& (self.min.y..=self.max.y).contains(&pos.y)
			&& (self.min.z..=self.max.z).contains(&pos.z)
	}

	pub fn cells(self) -> impl Iterator<Item = BlockPos> {
		(self.min.x..=self.max.x).flat_map(move |x| {
			(self.min.y..=self.max.y).flat_map(move |y| (self.min.z..=self.max.z).map(move |z| BlockPos::new(x, y, z)))
		})
	}
}

/// Explicit cells over a uniform fill block.
///
/// When a loaded box is set, every cell outside it reads as unloaded.
#[derive(Debug, Clone)]
pub struct GridWorld {
	cells: FxHashMap<BlockPos, Block>,
	fill: Block,
	loaded: Option<Bounds>,
}

impl Default for GridWorld {
	fn default() -> Self {
		Self::new(Block::Stone)
	}
}

impl GridWorld {
	pub fn new(fill: Block) -> Self {
		Self {
			cells: FxHashMap::default(),
			fill,
			loaded: None,
		}
	}

	pub fn fill(&self) -> Block {
		self.fill
	}

	pub fn set_loaded(&mut self, bounds: Option<Bounds>) {
		self.loaded = bounds;
	}

	pub fn is_loaded(&self, pos: BlockPos) -> bool {
		self.loaded.is_none_or(|bounds| bounds.contains(pos))
	}

	/// Block at `pos`, `None` outside the loaded box.
	pub fn get(&self, pos: BlockPos) -> Option<Block> {
		if !self.is_loaded(pos) {
			return None;
		}
		Some(self.cells.get(&pos).copied().unwrap_or(self.fill))
	}

	pub fn set(&mut self, pos: BlockPos, block: Block) {
		if block == self.fill {
			self.cells.remove(&pos);
		} else {
			self.cells.insert(pos, block);
		}
	}

	pub fn fill_box(&mut self, bounds: Bounds, block: Block) {
		for pos in bounds.cells() {
			self.set(pos, block);
		}
	}

	/// Breaks the block at `pos`, returning what was there.
	///
	/// Returns `None` for unloaded cells and for blocks that cannot be broken
	/// (air and liquids), leaving them untouched.
	pub fn break_block(&mut self, pos: BlockPos) -> Option<Block> {
		let block = self.get(pos)?;
		if !block.is_breakable() {
			return None;
		}
		self.set(pos, Block::Air);
		Some(block)
	}

	/// True when `pos` and the cell above are loaded and passable.
	pub fn can_stand(&self, pos: BlockPos) -> bool {
		let passable = |p| self.get(p).is_some_and(Block::is_passable);
		passable(pos) && passable(pos.up())
	}

	/// Number of explicitly stored cells matching `pred`.
	pub fn count(&self, pred: impl Fn(Block) -> bool) -> usize {
		self.cells.values().filter(|b| pred(**b)).count()
	}
}

impl WorldQuery for GridWorld {
	type Block = Block;

	fn block_at(&self, pos: BlockPos) -> Option<Block> {
		self.get(pos)
	}

	fn is_air(&self, block: &Block) -> bool {
		block.is_air()
	}

	fn is_hazard_liquid(&self, block: &Block) -> bool {
		block.is_liquid()
	}

	fn is_target_material(&self, block: &Block) -> bool {
		block.is_ore()
	}

	fn is_storage(&self, block: &Block) -> bool {
		block.is_storage()
	}
}
