//! Deterministic in-memory world for running the branch miner end to end.
//!
//! [`GridWorld`] answers block queries, [`SimHost`] plays the agent with its
//! inventory and containers, and [`SimActionQueue`] carries out moves and
//! clears over several ticks. [`Simulation`] steps all of them in lock-step
//! with a [`delve_miner::MiningOrchestrator`].

pub mod block;
pub mod executor;
pub mod host;
pub mod scenario;
pub mod simulation;
pub mod world;

pub use block::{Block, OreKind, ParseBlockError};
pub use executor::{QueueStats, SimActionQueue, Timing};
pub use host::{ItemStack, SimHost, SlotGrid};
pub use scenario::{Scenario, ScenarioError};
pub use simulation::{RunReport, Simulation};
pub use world::{Bounds, GridWorld};
