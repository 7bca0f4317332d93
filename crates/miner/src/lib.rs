//! Tick-driven branch miner.
//!
//! The [`MiningOrchestrator`] digs straight two-high tunnels, harvests any ore
//! veins exposed in their walls, shifts sideways and repeats, returning to a
//! storage container whenever the inventory runs low. It never touches a
//! concrete world: every query and side effect goes through the collaborator
//! traits in [`world`] and [`action`].

pub mod action;
pub mod config;
pub mod error;
pub mod grouper;
pub mod logistics;
pub mod orchestrator;
pub mod scanner;
pub mod session;
pub mod vein;
pub mod world;

#[cfg(test)]
mod test_support;

pub use action::{Action, ActionKind, ActionOutcome, ActionQueue};
pub use config::MinerConfig;
pub use error::{ConfigError, FailureReason};
pub use orchestrator::{MiningOrchestrator, Pending};
pub use scanner::{BranchScanner, ScanOutcome, StopReason};
pub use session::{MiningSession, MiningState, SessionSummary};
pub use world::{AgentState, Env, Health, Host, Inventory, ItemPickup, Storage, WorldQuery};
