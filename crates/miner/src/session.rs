//! Session state owned by the orchestrator.

use delve_primitives::{BlockPos, Direction};

use crate::error::FailureReason;
use crate::vein::OreLedger;

/// Phase of the mining state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MiningState {
	#[default]
	Idle,
	Initializing,
	Scanning,
	ApproachingMining,
	MiningBranch,
	CollectingItems,
	ScanningWalls,
	MovingToOre,
	MiningOre,
	CollectingOreItems,
	MovingToNextBranch,
	ApproachingNextBranch,
	MiningNextBranchPath,
	CollectingPathItems,
	ReturningToChest,
	StoringItems,
	Error,
}

impl MiningState {
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Idle => "idle",
			Self::Initializing => "initializing",
			Self::Scanning => "scanning",
			Self::ApproachingMining => "approaching_mining",
			Self::MiningBranch => "mining_branch",
			Self::CollectingItems => "collecting_items",
			Self::ScanningWalls => "scanning_walls",
			Self::MovingToOre => "moving_to_ore",
			Self::MiningOre => "mining_ore",
			Self::CollectingOreItems => "collecting_ore_items",
			Self::MovingToNextBranch => "moving_to_next_branch",
			Self::ApproachingNextBranch => "approaching_next_branch",
			Self::MiningNextBranchPath => "mining_next_branch_path",
			Self::CollectingPathItems => "collecting_path_items",
			Self::ReturningToChest => "returning_to_chest",
			Self::StoringItems => "storing_items",
			Self::Error => "error",
		}
	}

	/// States in which the inventory trigger must not interrupt.
	pub const fn blocks_inventory_trigger(self) -> bool {
		matches!(
			self,
			Self::Idle | Self::Initializing | Self::ReturningToChest | Self::StoringItems | Self::Error
		)
	}
}

/// Everything one session knows. Reset as a whole, never field by field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MiningSession {
	pub initial_position: Option<BlockPos>,
	pub initial_direction: Option<Direction>,
	/// Start of the branch currently being worked.
	pub branch_start: Option<BlockPos>,
	/// Start of the branch before the last lateral shift.
	pub previous_branch_start: Option<BlockPos>,
	pub nearest_storage: Option<BlockPos>,

	pub branch_end: Option<BlockPos>,
	pub branch_blocks: Vec<BlockPos>,
	pub groups: Vec<Vec<BlockPos>>,
	pub group_index: usize,
	pub current_group: Vec<BlockPos>,

	pub ores: OreLedger,
	pub ore_index: usize,

	pub last_mining_center: Option<BlockPos>,

	pub tick_counter: u64,
	pub branches_completed: u32,
	pub chest_operation_ticks: u32,
	pub item_collection_ticks: u32,

	pub groups_cleared: u32,
	pub ores_mined: u32,
	pub failure: Option<FailureReason>,
}

impl MiningSession {
	/// True when every field holds its reset value.
	pub fn is_cleared(&self) -> bool {
		*self == Self::default()
	}

	pub fn summary(&self) -> SessionSummary {
		SessionSummary {
			ticks: self.tick_counter,
			branches_completed: self.branches_completed,
			groups_cleared: self.groups_cleared,
			ores_found: self.ores.visited().len(),
			ores_mined: self.ores_mined,
			failure: self.failure,
		}
	}
}

/// Totals reported when a session ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SessionSummary {
	pub ticks: u64,
	pub branches_completed: u32,
	pub groups_cleared: u32,
	pub ores_found: usize,
	pub ores_mined: u32,
	/// Set when the session ended through the error state.
	pub failure: Option<FailureReason>,
}
