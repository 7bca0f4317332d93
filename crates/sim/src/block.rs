//! Block palette of the simulated world.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Kinds of ore the simulator knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OreKind {
	Coal,
	Copper,
	Iron,
	Gold,
	Redstone,
	Lapis,
	Diamond,
	Emerald,
}

impl OreKind {
	pub const ALL: [OreKind; 8] = [
		Self::Coal,
		Self::Copper,
		Self::Iron,
		Self::Gold,
		Self::Redstone,
		Self::Lapis,
		Self::Diamond,
		Self::Emerald,
	];

	pub const fn block_name(self) -> &'static str {
		match self {
			Self::Coal => "coal_ore",
			Self::Copper => "copper_ore",
			Self::Iron => "iron_ore",
			Self::Gold => "gold_ore",
			Self::Redstone => "redstone_ore",
			Self::Lapis => "lapis_ore",
			Self::Diamond => "diamond_ore",
			Self::Emerald => "emerald_ore",
		}
	}

	/// Item dropped when the ore is broken.
	pub const fn drop_name(self) -> &'static str {
		match self {
			Self::Coal => "coal",
			Self::Copper => "raw_copper",
			Self::Iron => "raw_iron",
			Self::Gold => "raw_gold",
			Self::Redstone => "redstone",
			Self::Lapis => "lapis_lazuli",
			Self::Diamond => "diamond",
			Self::Emerald => "emerald",
		}
	}
}

/// One cell of the simulated world.
///
/// Serializes as its lowercase block name, e.g. `"iron_ore"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Block {
	#[default]
	Air,
	Stone,
	Dirt,
	Water,
	Lava,
	Chest,
	TrappedChest,
	Ore(OreKind),
}

impl Block {
	pub const fn name(self) -> &'static str {
		match self {
			Self::Air => "air",
			Self::Stone => "stone",
			Self::Dirt => "dirt",
			Self::Water => "water",
			Self::Lava => "lava",
			Self::Chest => "chest",
			Self::TrappedChest => "trapped_chest",
			Self::Ore(kind) => kind.block_name(),
		}
	}

	pub const fn is_air(self) -> bool {
		matches!(self, Self::Air)
	}

	pub const fn is_liquid(self) -> bool {
		matches!(self, Self::Water | Self::Lava)
	}

	pub const fn is_ore(self) -> bool {
		matches!(self, Self::Ore(_))
	}

	pub const fn is_storage(self) -> bool {
		matches!(self, Self::Chest | Self::TrappedChest)
	}

	/// Whether an agent can stand in this cell.
	pub const fn is_passable(self) -> bool {
		self.is_air()
	}

	/// Whether clearing this cell removes it.
	pub const fn is_breakable(self) -> bool {
		!self.is_air() && !self.is_liquid()
	}

	/// Item left behind when the block is broken, if any.
	pub const fn drop_name(self) -> Option<&'static str> {
		match self {
			Self::Air | Self::Water | Self::Lava => None,
			Self::Stone => Some("cobblestone"),
			Self::Dirt => Some("dirt"),
			Self::Chest => Some("chest"),
			Self::TrappedChest => Some("trapped_chest"),
			Self::Ore(kind) => Some(kind.drop_name()),
		}
	}
}

impl fmt::Display for Block {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}

/// Unrecognised block name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown block `{0}`")]
pub struct ParseBlockError(pub String);

impl FromStr for Block {
	type Err = ParseBlockError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let name = s.trim().to_ascii_lowercase();
		let block = match name.as_str() {
			"air" => Self::Air,
			"stone" => Self::Stone,
			"dirt" => Self::Dirt,
			"water" => Self::Water,
			"lava" => Self::Lava,
			"chest" => Self::Chest,
			"trapped_chest" => Self::TrappedChest,
			other => match OreKind::ALL.into_iter().find(|kind| kind.block_name() == other) {
				Some(kind) => Self::Ore(kind),
				None => return Err(ParseBlockError(s.to_string())),
			},
		};
		Ok(block)
	}
}

impl TryFrom<String> for Block {
	type Error = ParseBlockError;

	fn try_from(value: String) -> Result<Self, Self::Error> {
		value.parse()
	}
}

impl From<Block> for String {
	fn from(block: Block) -> Self {
		block.name().to_string()
	}
}
