//! The generic discrete-event engine: a time-ordered event queue and the driver loop that dispatches it.
//!
//! Nothing in here knows about pumps or customers. A client supplies a state type implementing [`SimState`] and one
//! type per kind of event implementing [`Event`]; the [`Simulation`] then owns both the state and the queue and lends
//! them to each event as it executes.
//!
//! [`SimState`]: crate::SimState

mod events;
mod simulation;

pub use events::event_traits::Event;
pub use events::EventQueue;
pub use simulation::Simulation;
