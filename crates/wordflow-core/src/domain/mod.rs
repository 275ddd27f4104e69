//! Domain model (IDs, text, outcomes, state, events).

pub mod errors;
pub mod events;
pub mod ids;
pub mod outcome;
pub mod state;
pub mod text;

pub use self::errors::{CountError, StateError};
pub use self::events::DispatchEvent;
pub use self::ids::{DispatchId, LineIndex, UnitName};
pub use self::outcome::{Aggregate, FailureReason, LineOutcome, LineResult};
pub use self::state::DispatchState;
pub use self::text::{LineTask, TextBlock};
