use rstest::rstest;

use super::*;
use crate::BlockPos;

#[rstest]
#[case(Direction::North, Direction::West, Direction::East)]
#[case(Direction::East, Direction::North, Direction::South)]
#[case(Direction::South, Direction::East, Direction::West)]
#[case(Direction::West, Direction::South, Direction::North)]
fn horizontal_rotations(#[case] dir: Direction, #[case] left: Direction, #[case] right: Direction) {
	assert_eq!(dir.rotate_left(), left);
	assert_eq!(dir.rotate_right(), right);
	assert_eq!(dir.rotate_left().rotate_right(), dir);
}

#[test]
fn vertical_rotation_is_identity() {
	assert_eq!(Direction::Up.rotate_left(), Direction::Up);
	assert_eq!(Direction::Down.rotate_right(), Direction::Down);
}

#[test]
fn opposite_is_involution() {
	for dir in Direction::ALL {
		assert_ne!(dir.opposite(), dir);
		assert_eq!(dir.opposite().opposite(), dir);
		let (x, y, z) = dir.unit();
		assert_eq!(dir.opposite().unit(), (-x, -y, -z));
	}
}

#[test]
fn four_left_turns_return_home() {
	for dir in Direction::HORIZONTAL {
		let turned = dir.rotate_left().rotate_left().rotate_left().rotate_left();
		assert_eq!(turned, dir);
	}
}

#[rstest]
#[case(0.0, Direction::South)]
#[case(44.0, Direction::South)]
#[case(46.0, Direction::West)]
#[case(180.0, Direction::North)]
#[case(-90.0, Direction::East)]
#[case(270.0, Direction::East)]
#[case(359.0, Direction::South)]
fn yaw_maps_to_horizontal_facing(#[case] yaw: f64, #[case] expected: Direction) {
	assert_eq!(Direction::from_yaw(yaw), expected);
}

#[test]
fn along_projects_onto_axis() {
	let origin = BlockPos::new(0, 64, 0);
	assert_eq!(Direction::East.along(origin, BlockPos::new(7, 64, 3)), 7);
	assert_eq!(Direction::West.along(origin, BlockPos::new(7, 64, 3)), -7);
	assert_eq!(Direction::North.along(origin, BlockPos::new(7, 64, -5)), 5);
}

#[test]
fn parse_round_trips_names() {
	for dir in Direction::ALL {
		assert_eq!(dir.to_string().parse::<Direction>(), Ok(dir));
	}
	assert_eq!(" EAST ".parse::<Direction>(), Ok(Direction::East));
	assert!("northeast".parse::<Direction>().is_err());
}
