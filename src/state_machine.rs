//! Turn controller state machine
//!
//! Implements the Elm Architecture pattern with pure state transitions;
//! the runtime executes the resulting effects.

mod effect;
pub mod event;
pub mod state;
pub(crate) mod transition;


pub use effect::Effect;
pub use event::Event;
pub use state::{TurnContext, TurnId, TurnState};
pub use transition::{transition, TransitionError, TransitionResult};
