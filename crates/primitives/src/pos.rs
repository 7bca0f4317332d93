//! Integer block coordinates.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::Direction;

/// Position of a single block cell.
///
/// Serializes as a `[x, y, z]` array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "[i32; 3]", into = "[i32; 3]")]
pub struct BlockPos {
	pub x: i32,
	pub y: i32,
	pub z: i32,
}

impl BlockPos {
	/// Creates a new position.
	pub const fn new(x: i32, y: i32, z: i32) -> Self {
		Self { x, y, z }
	}

	/// Moves `n` cells along `dir`. Negative `n` moves backwards.
	pub const fn offset(self, dir: Direction, n: i32) -> Self {
		let (dx, dy, dz) = dir.unit();
		Self::new(self.x + dx * n, self.y + dy * n, self.z + dz * n)
	}

	/// Moves one cell along `dir`.
	pub const fn step(self, dir: Direction) -> Self {
		self.offset(dir, 1)
	}

	pub const fn up(self) -> Self {
		self.step(Direction::Up)
	}

	pub const fn down(self) -> Self {
		self.step(Direction::Down)
	}

	/// Adds a raw delta.
	pub const fn add(self, dx: i32, dy: i32, dz: i32) -> Self {
		Self::new(self.x + dx, self.y + dy, self.z + dz)
	}

	/// The six face-adjacent neighbours, in [`Direction::ALL`] order.
	pub fn neighbors(self) -> impl Iterator<Item = BlockPos> {
		Direction::ALL.into_iter().map(move |dir| self.step(dir))
	}

	/// Squared euclidean distance, exact for any pair of `i32` coordinates.
	pub fn squared_distance(self, other: Self) -> i64 {
		let dx = i64::from(self.x) - i64::from(other.x);
		let dy = i64::from(self.y) - i64::from(other.y);
		let dz = i64::from(self.z) - i64::from(other.z);
		dx * dx + dy * dy + dz * dz
	}

	pub fn distance(self, other: Self) -> f64 {
		(self.squared_distance(other) as f64).sqrt()
	}

	/// Lexicographic `(x, y, z)` key giving a stable total order.
	pub const fn linear_key(self) -> (i32, i32, i32) {
		(self.x, self.y, self.z)
	}

	/// Rounded arithmetic mean of a set of positions, `None` when empty.
	pub fn centroid<'a>(positions: impl IntoIterator<Item = &'a BlockPos>) -> Option<Self> {
		let mut count = 0i64;
		let (mut sx, mut sy, mut sz) = (0i64, 0i64, 0i64);
		for pos in positions {
			count += 1;
			sx += i64::from(pos.x);
			sy += i64::from(pos.y);
			sz += i64::from(pos.z);
		}
		if count == 0 {
			return None;
		}
		let mean = |sum: i64| (sum as f64 / count as f64).round() as i32;
		Some(Self::new(mean(sx), mean(sy), mean(sz)))
	}
}

impl From<[i32; 3]> for BlockPos {
	fn from([x, y, z]: [i32; 3]) -> Self {
		Self::new(x, y, z)
	}
}

impl From<BlockPos> for [i32; 3] {
	fn from(pos: BlockPos) -> Self {
		[pos.x, pos.y, pos.z]
	}
}

impl fmt::Display for BlockPos {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}, {}, {}", self.x, self.y, self.z)
	}
}

#[cfg(test)]
mod tests;
