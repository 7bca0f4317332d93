//! Asynchronous action boundary.
//!
//! The orchestrator treats the executor as a one-slot mailbox: it submits
//! one [`Action`] at a time and learns the result by polling
//! [`ActionQueue::poll_completion`] on a later tick.

use delve_primitives::BlockPos;

/// Work handed to the external executor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
	/// Travel until within `radius` blocks of `target`.
	Move { target: BlockPos, radius: u32 },
	/// Break every listed block.
	Clear { blocks: Vec<BlockPos> },
}

impl Action {
	pub const fn kind(&self) -> ActionKind {
		match self {
			Self::Move { .. } => ActionKind::Move,
			Self::Clear { .. } => ActionKind::Clear,
		}
	}
}

/// Discriminant of [`Action`], used for logging and fault injection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
	Move,
	Clear,
}

impl ActionKind {
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Move => "move",
			Self::Clear => "clear",
		}
	}
}

/// Result of a finished action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
	Success,
	Failure,
}

impl ActionOutcome {
	pub const fn is_success(self) -> bool {
		matches!(self, Self::Success)
	}
}

/// External action executor.
///
/// Implementations must deliver each completion exactly once through
/// [`ActionQueue::poll_completion`], and [`ActionQueue::clear`] must drop both
/// queued work and any undelivered completion.
pub trait ActionQueue {
	/// True when no action is queued or running.
	fn is_empty(&self) -> bool;

	fn enqueue(&mut self, action: Action);

	/// Takes the outcome of the most recently finished action, if any.
	fn poll_completion(&mut self) -> Option<ActionOutcome>;

	/// Cancels everything in flight.
	fn clear(&mut self);
}
