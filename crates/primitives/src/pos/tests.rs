use proptest::prelude::*;

use super::*;

#[test]
fn offset_moves_along_direction() {
	let pos = BlockPos::new(10, 64, -3);
	assert_eq!(pos.offset(Direction::East, 4), BlockPos::new(14, 64, -3));
	assert_eq!(pos.offset(Direction::North, 2), BlockPos::new(10, 64, -5));
	assert_eq!(pos.offset(Direction::East, -1), BlockPos::new(9, 64, -3));
	assert_eq!(pos.up().down(), pos);
}

#[test]
fn neighbors_are_face_adjacent() {
	let pos = BlockPos::new(0, 0, 0);
	let around: Vec<_> = pos.neighbors().collect();
	assert_eq!(around.len(), 6);
	assert!(around.iter().all(|n| n.squared_distance(pos) == 1));
}

#[test]
fn centroid_rounds_to_nearest_cell() {
	let cells = [BlockPos::new(0, 64, 0), BlockPos::new(1, 64, 0), BlockPos::new(2, 65, 0)];
	assert_eq!(BlockPos::centroid(&cells), Some(BlockPos::new(1, 64, 0)));
	assert_eq!(BlockPos::centroid(std::iter::empty()), None);
}

#[test]
fn display_is_comma_separated() {
	assert_eq!(BlockPos::new(1, -2, 3).to_string(), "1, -2, 3");
}

proptest! {
	#[test]
	fn squared_distance_is_symmetric(
		a in (-1000i32..1000, -64i32..320, -1000i32..1000),
		b in (-1000i32..1000, -64i32..320, -1000i32..1000),
	) {
		let a = BlockPos::new(a.0, a.1, a.2);
		let b = BlockPos::new(b.0, b.1, b.2);
		prop_assert_eq!(a.squared_distance(b), b.squared_distance(a));
		prop_assert_eq!(a.squared_distance(a), 0);
	}

	#[test]
	fn offset_then_back_is_identity(x in -1000i32..1000, n in -64i32..64, dir in 0usize..6) {
		let pos = BlockPos::new(x, 0, -x);
		let dir = Direction::ALL[dir];
		prop_assert_eq!(pos.offset(dir, n).offset(dir.opposite(), n), pos);
	}
}
