//! Read-only tuning parameters for a mining session.
//!
//! Loaded from TOML; every field has a default so a partial file is valid.
//!
//! ```toml
//! branch_length = 48
//! branch_interval = 2
//! min_free_slots = 4
//! ```

use std::ops::RangeInclusive;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Tick at which storage is opened after arriving.
pub const STORAGE_OPEN_TICK: u32 = 1;
/// Tick at which matching items are deposited.
pub const STORAGE_DEPOSIT_TICK: u32 = 10;
/// Tick at which storage is closed.
pub const STORAGE_CLOSE_TICK: u32 = 20;
/// Tick at which the return trip to the branch is queued.
pub const STORAGE_RETURN_TICK: u32 = 30;

/// Mining session configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MinerConfig {
	/// Maximum cells scanned along one branch.
	pub branch_length: u32,
	/// Solid cells left between neighbouring branches.
	pub branch_interval: u32,
	/// Return to storage when fewer slots than this are free.
	pub min_free_slots: usize,
	/// Ticks between inventory checks.
	pub inventory_check_interval: u32,
	/// Connected open cells that mark a cavern ahead of the branch.
	pub cavity_threshold: usize,
	/// Half-width of the cube searched for storage at session start.
	pub storage_search_radius: u32,
	/// Ticks to wait for drops to settle before collecting them.
	pub item_collection_wait_ticks: u32,
	/// Maximum gap between consecutive cells of one clearing group.
	pub group_distance: f64,
	/// Cells to stand back from a target before clearing it.
	pub approach_distance: u32,
	/// Arrival tolerance for movement actions.
	pub move_radius: u32,
	/// Radius for nearby item collection.
	pub pickup_radius: f64,
	/// Abort the session below this fraction of maximum health.
	pub min_health_fraction: f32,
}

impl Default for MinerConfig {
	fn default() -> Self {
		Self {
			branch_length: 32,
			branch_interval: 3,
			min_free_slots: 5,
			inventory_check_interval: 20,
			cavity_threshold: 64,
			storage_search_radius: 16,
			item_collection_wait_ticks: 40,
			group_distance: 2.0,
			approach_distance: 2,
			move_radius: 1,
			pickup_radius: 4.0,
			min_health_fraction: 0.5,
		}
	}
}

fn check_int<T>(field: &'static str, value: T, range: RangeInclusive<T>, expected: &'static str) -> Result<()>
where
	T: PartialOrd + ToString,
{
	if range.contains(&value) {
		Ok(())
	} else {
		Err(ConfigError::OutOfRange {
			field,
			value: value.to_string(),
			expected,
		})
	}
}

fn check_positive(field: &'static str, value: f64, max: f64, expected: &'static str) -> Result<()> {
	if value.is_finite() && value > 0.0 && value <= max {
		Ok(())
	} else {
		Err(ConfigError::OutOfRange {
			field,
			value: value.to_string(),
			expected,
		})
	}
}

impl MinerConfig {
	/// Parses and validates a TOML document.
	pub fn from_toml_str(src: &str) -> Result<Self> {
		let config: Self = toml::from_str(src)?;
		config.validate()?;
		Ok(config)
	}

	/// Reads, parses and validates a TOML file.
	pub fn load(path: &Path) -> Result<Self> {
		let src = std::fs::read_to_string(path).map_err(|error| ConfigError::Io {
			path: path.to_path_buf(),
			error,
		})?;
		Self::from_toml_str(&src)
	}

	pub fn to_toml_string(&self) -> Result<String> {
		Ok(toml::to_string(self)?)
	}

	/// Checks every field against its accepted range.
	pub fn validate(&self) -> Result<()> {
		check_int("branch_length", self.branch_length, 8..=128, "8..=128")?;
		check_int("branch_interval", self.branch_interval, 1..=5, "1..=5")?;
		check_int("min_free_slots", self.min_free_slots, 1..=27, "1..=27")?;
		check_int("inventory_check_interval", self.inventory_check_interval, 1..=100, "1..=100")?;
		check_int("cavity_threshold", self.cavity_threshold, 32..=128, "32..=128")?;
		check_int("storage_search_radius", self.storage_search_radius, 8..=64, "8..=64")?;
		check_int("item_collection_wait_ticks", self.item_collection_wait_ticks, 20..=100, "20..=100")?;
		check_int("approach_distance", self.approach_distance, 0..=8, "0..=8")?;
		check_int("move_radius", self.move_radius, 0..=4, "0..=4")?;
		check_positive("group_distance", self.group_distance, 16.0, "0 < d <= 16")?;
		check_positive("pickup_radius", self.pickup_radius, 16.0, "0 < r <= 16")?;
		if !(0.0..=1.0).contains(&self.min_health_fraction) {
			return Err(ConfigError::OutOfRange {
				field: "min_health_fraction",
				value: self.min_health_fraction.to_string(),
				expected: "0.0..=1.0",
			});
		}
		Ok(())
	}

	/// Lateral shift between consecutive branch starts.
	pub const fn branch_spacing(&self) -> i32 {
		self.branch_interval as i32 + 1
	}
}
