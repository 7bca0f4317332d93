//! Proximity clustering of cells into clearing batches.

use delve_primitives::BlockPos;

/// Partitions positions into runs of nearby cells.
///
/// Positions are sorted by [`BlockPos::linear_key`] and split wherever two
/// consecutive entries are farther apart than `max_distance`. Every group is
/// non-empty and the groups together hold exactly the input positions.
pub fn group_by_proximity(positions: &[BlockPos], max_distance: f64) -> Vec<Vec<BlockPos>> {
	let mut sorted = positions.to_vec();
	sorted.sort_by_key(|pos| pos.linear_key());

	let mut groups: Vec<Vec<BlockPos>> = Vec::new();
	let mut current: Vec<BlockPos> = Vec::new();
	for pos in sorted {
		if let Some(&prev) = current.last()
			&& prev.distance(pos) > max_distance
		{
			groups.push(std::mem::take(&mut current));
		}
		current.push(pos);
	}
	if !current.is_empty() {
		groups.push(current);
	}
	groups
}
