//! Ore vein detection by flood fill.
//!
//! A single visited set lives for the whole session, so a vein found from
//! one seed is never rediscovered from another, across sweeps and branches.

use std::collections::VecDeque;

use delve_primitives::{BlockPos, Direction};
use indexmap::IndexSet;
use rustc_hash::FxBuildHasher;
use tracing::trace;

use crate::world::WorldQuery;

/// Insertion-ordered set of every ore cell discovered this session.
pub type VisitedSet = IndexSet<BlockPos, FxBuildHasher>;

/// Returns the 6-connected component of target material containing `seed`,
/// excluding anything already in `visited`.
///
/// Every returned cell is added to `visited`. A seed that is not target
/// material, unloaded, or already visited yields an empty vein.
pub fn find_vein<W: WorldQuery>(world: &W, seed: BlockPos, visited: &mut VisitedSet) -> Vec<BlockPos> {
	if visited.contains(&seed) || world.is_target_at(seed) != Some(true) {
		return Vec::new();
	}

	let mut vein = Vec::new();
	let mut queue = VecDeque::new();
	visited.insert(seed);
	queue.push_back(seed);

	while let Some(current) = queue.pop_front() {
		vein.push(current);
		for neighbor in current.neighbors() {
			if !visited.contains(&neighbor) && world.is_target_at(neighbor) == Some(true) {
				visited.insert(neighbor);
				queue.push_back(neighbor);
			}
		}
	}

	vein
}

/// Session ore bookkeeping: the global visited set plus the harvest plan of
/// the current branch.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct OreLedger {
	visited: VisitedSet,
	plan: Vec<BlockPos>,
}

impl OreLedger {
	pub fn new() -> Self {
		Self::default()
	}

	/// Ores queued for harvesting on the current branch, in harvest order.
	pub fn plan(&self) -> &[BlockPos] {
		&self.plan
	}

	pub fn get(&self, index: usize) -> Option<BlockPos> {
		self.plan.get(index).copied()
	}

	/// Every ore cell discovered this session.
	pub fn visited(&self) -> &VisitedSet {
		&self.visited
	}

	/// Rebuilds the plan for the tunnel between `start` and `span` steps along
	/// `dir`, seeding a flood fill from every cell beside it at floor and head
	/// height.
	///
	/// Entries from `harvested` onward that are still target material stay in
	/// the plan ahead of the new veins, so ores found before an interruption
	/// are not lost to the visited set. Returns how many new cells were found.
	pub fn sweep_branch<W: WorldQuery>(
		&mut self,
		world: &W,
		start: BlockPos,
		dir: Direction,
		span: u32,
		harvested: usize,
	) -> usize {
		let carried: Vec<BlockPos> = self
			.plan
			.drain(..)
			.skip(harvested)
			.filter(|&ore| world.is_target_at(ore) != Some(false))
			.collect();
		let kept = carried.len();
		self.plan = carried;

		for step in 0..=span as i32 {
			let floor = start.offset(dir, step);
			for center in [floor, floor.up()] {
				for seed in center.neighbors() {
					let vein = find_vein(world, seed, &mut self.visited);
					self.plan.extend(vein);
				}
			}
		}
		let found = self.plan.len() - kept;
		trace!(found, kept, span, "miner.vein.sweep");
		found
	}

	/// Appends veins newly exposed around a just-cleared cell.
	pub fn recheck_exposed<W: WorldQuery>(&mut self, world: &W, cleared: BlockPos) -> usize {
		let before = self.plan.len();
		for seed in cleared.neighbors() {
			let vein = find_vein(world, seed, &mut self.visited);
			self.plan.extend(vein);
		}
		self.plan.len() - before
	}

	/// Stable-sorts the plan nearest-first relative to `anchor`.
	pub fn order_by_distance(&mut self, anchor: BlockPos) {
		self.plan.sort_by_key(|ore| ore.squared_distance(anchor));
	}
}
