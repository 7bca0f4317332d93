//! Scenario files: a world, an agent and optional miner settings in TOML.
//!
//! ```toml
//! fill = "stone"
//!
//! [agent]
//! position = [0, 64, 0]
//! facing = "east"    # or a client yaw in degrees: yaw = 270.0
//!
//! [[boxes]]
//! min = [-2, 64, -1]
//! max = [0, 65, 1]
//! block = "air"
//!
//! [[cells]]
//! pos = [-2, 64, 0]
//! block = "chest"
//! ```
//!
//! The agent's own two cells are always carved to air.

use std::path::{Path, PathBuf};

use delve_miner::{ConfigError, Health, MinerConfig};
use delve_primitives::{BlockPos, Direction};
use serde::Deserialize;
use thiserror::Error;

use crate::block::Block;
use crate::executor::Timing;
use crate::host::SimHost;
use crate::world::{Bounds, GridWorld};

/// Errors from loading or checking a scenario.
#[derive(Debug, Error)]
pub enum ScenarioError {
	#[error("scenario parse error: {0}")]
	Toml(#[from] toml::de::Error),

	#[error("I/O error reading {path}: {error}")]
	Io { path: PathBuf, error: std::io::Error },

	#[error("invalid miner settings: {0}")]
	Config(#[from] ConfigError),

	#[error("agent must face a horizontal direction, not {0}")]
	VerticalFacing(Direction),

	#[error("agent needs either `facing` or `yaw`")]
	MissingFacing,

	#[error("agent position {0} lies outside the loaded area")]
	AgentUnloaded(BlockPos),

	#[error("starting inventory does not fit: {count} x {item} left over")]
	InventoryOverflow { item: String, count: u32 },
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AgentSpec {
	pub position: BlockPos,
	#[serde(default)]
	pub facing: Option<Direction>,
	/// Client yaw in degrees, used when `facing` is absent.
	#[serde(default)]
	pub yaw: Option<f64>,
	#[serde(default)]
	pub health: Option<f32>,
}

impl AgentSpec {
	/// The explicit facing, else the one the yaw points along.
	pub fn heading(&self) -> Option<Direction> {
		self.facing.or_else(|| self.yaw.map(Direction::from_yaw))
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BoxSpec {
	pub min: BlockPos,
	pub max: BlockPos,
	pub block: Block,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CellSpec {
	pub pos: BlockPos,
	pub block: Block,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AreaSpec {
	pub min: BlockPos,
	pub max: BlockPos,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StackSpec {
	pub item: String,
	pub count: u32,
}

/// A complete simulation setup.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scenario {
	#[serde(default = "default_fill")]
	pub fill: Block,
	pub agent: AgentSpec,
	/// Cells outside this box read as unloaded.
	#[serde(default)]
	pub loaded: Option<AreaSpec>,
	/// Applied in order, before `cells`.
	#[serde(default)]
	pub boxes: Vec<BoxSpec>,
	#[serde(default)]
	pub cells: Vec<CellSpec>,
	#[serde(default)]
	pub inventory: Vec<StackSpec>,
	#[serde(default)]
	pub timing: Timing,
	/// Miner settings bundled with the scenario.
	#[serde(default)]
	pub miner: Option<MinerConfig>,
}

fn default_fill() -> Block {
	Block::Stone
}

impl Scenario {
	pub fn from_toml_str(src: &str) -> Result<Self, ScenarioError> {
		let scenario: Self = toml::from_str(src)?;
		scenario.validate()?;
		Ok(scenario)
	}

	pub fn load(path: &Path) -> Result<Self, ScenarioError> {
		let src = std::fs::read_to_string(path).map_err(|error| ScenarioError::Io {
			path: path.to_path_buf(),
			error,
		})?;
		Self::from_toml_str(&src)
	}

	pub fn validate(&self) -> Result<(), ScenarioError> {
		let facing = self.agent.heading().ok_or(ScenarioError::MissingFacing)?;
		if !facing.is_horizontal() {
			return Err(ScenarioError::VerticalFacing(facing));
		}
		if let Some(area) = self.loaded
			&& !Bounds::new(area.min, area.max).contains(self.agent.position)
		{
			return Err(ScenarioError::AgentUnloaded(self.agent.position));
		}
		if let Some(config) = &self.miner {
			config.validate()?;
		}
		Ok(())
	}

	pub fn build_world(&self) -> GridWorld {
		let mut world = GridWorld::new(self.fill);
		for spec in &self.boxes {
			world.fill_box(Bounds::new(spec.min, spec.max), spec.block);
		}
		for cell in &self.cells {
			world.set(cell.pos, cell.block);
		}
		world.set(self.agent.position, Block::Air);
		world.set(self.agent.position.up(), Block::Air);
		world.set_loaded(self.loaded.map(|area| Bounds::new(area.min, area.max)));
		world
	}

	pub fn build_host(&self) -> Result<SimHost, ScenarioError> {
		let facing = self.agent.heading().ok_or(ScenarioError::MissingFacing)?;
		let mut host = SimHost::new(self.agent.position, facing);
		if let Some(current) = self.agent.health {
			host.health = Some(Health { current, max: 20.0 });
		}
		for stack in &self.inventory {
			let left = host.inventory.insert(&stack.item, stack.count);
			if left > 0 {
				return Err(ScenarioError::InventoryOverflow {
					item: stack.item.clone(),
					count: left,
				});
			}
		}
		Ok(host)
	}
}
