//! Cardinal directions in a y-up voxel grid.
//!
//! North is `-z`, South is `+z`, East is `+x`, West is `-x`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One of the six axis-aligned directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
	Down,
	Up,
	North,
	South,
	West,
	East,
}

/// Error returned when a direction name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown direction: {0:?} (expected north, south, east, west, up or down)")]
pub struct ParseDirectionError(pub String);

impl Direction {
	/// All six directions in neighbour-iteration order.
	pub const ALL: [Direction; 6] = [
		Direction::Down,
		Direction::Up,
		Direction::North,
		Direction::South,
		Direction::West,
		Direction::East,
	];

	/// The four horizontal directions, clockwise from North.
	pub const HORIZONTAL: [Direction; 4] = [Direction::North, Direction::East, Direction::South, Direction::West];

	/// Returns the direction pointing the other way.
	pub const fn opposite(self) -> Self {
		match self {
			Self::Down => Self::Up,
			Self::Up => Self::Down,
			Self::North => Self::South,
			Self::South => Self::North,
			Self::West => Self::East,
			Self::East => Self::West,
		}
	}

	/// Rotates a quarter turn counter-clockwise when viewed from above.
	///
	/// Vertical directions are returned unchanged.
	pub const fn rotate_left(self) -> Self {
		match self {
			Self::North => Self::West,
			Self::West => Self::South,
			Self::South => Self::East,
			Self::East => Self::North,
			other => other,
		}
	}

	/// Rotates a quarter turn clockwise when viewed from above.
	///
	/// Vertical directions are returned unchanged.
	pub const fn rotate_right(self) -> Self {
		match self {
			Self::North => Self::East,
			Self::East => Self::South,
			Self::South => Self::West,
			Self::West => Self::North,
			other => other,
		}
	}

	pub const fn is_horizontal(self) -> bool {
		!matches!(self, Self::Up | Self::Down)
	}

	/// Unit step `(dx, dy, dz)`.
	pub const fn unit(self) -> (i32, i32, i32) {
		match self {
			Self::Down => (0, -1, 0),
			Self::Up => (0, 1, 0),
			Self::North => (0, 0, -1),
			Self::South => (0, 0, 1),
			Self::West => (-1, 0, 0),
			Self::East => (1, 0, 0),
		}
	}

	/// Horizontal facing for a yaw angle in degrees.
	///
	/// Yaw 0 faces South and increases clockwise: 90 is West, 180 North,
	/// 270 East. Any finite angle is accepted and wrapped.
	pub fn from_yaw(degrees: f64) -> Self {
		let quadrant = (degrees / 90.0 + 0.5).floor() as i64;
		match quadrant.rem_euclid(4) {
			0 => Self::South,
			1 => Self::West,
			2 => Self::North,
			_ => Self::East,
		}
	}

	/// Signed distance from `from` to `to` measured along this direction.
	pub fn along(self, from: crate::BlockPos, to: crate::BlockPos) -> i32 {
		let (dx, dy, dz) = self.unit();
		(to.x - from.x) * dx + (to.y - from.y) * dy + (to.z - from.z) * dz
	}

	pub const fn name(self) -> &'static str {
		match self {
			Self::Down => "down",
			Self::Up => "up",
			Self::North => "north",
			Self::South => "south",
			Self::West => "west",
			Self::East => "east",
		}
	}
}

impl fmt::Display for Direction {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}

impl FromStr for Direction {
	type Err = ParseDirectionError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::ALL
			.into_iter()
			.find(|dir| dir.name().eq_ignore_ascii_case(s.trim()))
			.ok_or_else(|| ParseDirectionError(s.to_string()))
	}
}

#[cfg(test)]
mod tests;
