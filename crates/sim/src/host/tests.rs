use pretty_assertions::assert_eq;

use super::*;

fn host() -> SimHost {
	SimHost::new(BlockPos::new(0, 64, 0), Direction::North)
}

#[test]
fn insert_tops_up_before_new_slots() {
	let mut grid = SlotGrid::new(3);
	assert_eq!(grid.insert("cobblestone", 60), 0);
	assert_eq!(grid.insert("cobblestone", 10), 0);

	assert_eq!(grid.slot(0).map(|s| s.count), Some(64));
	assert_eq!(grid.slot(1).map(|s| s.count), Some(6));
	assert_eq!(grid.free_slots(), 1);
}

#[test]
fn insert_reports_overflow() {
	let mut grid = SlotGrid::new(2);
	assert_eq!(grid.insert("dirt", 64 * 2 + 5), 5);
	assert_eq!(grid.free_slots(), 0);
	assert_eq!(grid.totals(), vec![("dirt".to_string(), 128)]);
}

#[test]
fn pickup_takes_only_nearby_drops() {
	let mut host = host();
	host.drop_item(BlockPos::new(2, 64, 0), "raw_iron");
	host.drop_item(BlockPos::new(2, 65, 0), "cobblestone");
	host.drop_item(BlockPos::new(20, 64, 0), "diamond");

	host.collect_near(BlockPos::new(0, 64, 0), 4.0);

	assert_eq!(host.item_counts(), vec![("cobblestone".to_string(), 1), ("raw_iron".to_string(), 1)]);
	assert_eq!(host.drops.len(), 1);
	assert_eq!(host.free_slot_count(), INVENTORY_SLOTS - 2);
}

#[test]
fn deposit_keeps_hotbar() {
	let mut host = host();
	// Fills slots 0..=9: the hotbar plus one backpack slot.
	host.inventory.insert("cobblestone", 64 * 10);
	let chest = BlockPos::new(3, 64, 0);

	host.open(chest);
	host.deposit_matching();
	host.close();

	assert_eq!(host.free_slot_count(), INVENTORY_SLOTS - HOTBAR_SLOTS);
	assert_eq!(host.stored_totals(), vec![("cobblestone".to_string(), 64)]);
	assert_eq!(host.open_container, None);
}

#[test]
fn deposit_without_open_container_is_noop() {
	let mut host = host();
	host.inventory.insert("coal", 64 * 12);
	host.deposit_matching();
	assert_eq!(host.free_slot_count(), INVENTORY_SLOTS - 12);
}

#[test]
fn full_container_leaves_remainder() {
	let mut host = host();
	host.inventory.insert("cobblestone", 64 * 36);
	let chest = BlockPos::new(3, 64, 0);
	host.open(chest);
	host.containers.get_mut(&chest).unwrap().insert("dirt", 64 * 20);

	host.deposit_matching();

	assert_eq!(
		host.stored_totals(),
		vec![("cobblestone".to_string(), 64 * 7), ("dirt".to_string(), 64 * 20)]
	);
	assert_eq!(host.free_slot_count(), 7);
}
