mod commands;
mod controller;
mod state_machine;
mod timers;

pub mod events;

// Public exports
pub use commands::CakeCommand;
pub use controller::Controller;
pub use state_machine::{
    CakeAction, CakeEvent, CakeState, CakeStateMachine, TransitionRejection, TransitionResult,
};
pub use timers::Timers;
