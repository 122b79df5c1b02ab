use super::{EventQueue, SimState, SimTime};
use std::fmt::Debug;

/// A behavior or state change that occurs within a simulation.
///
/// This trait has one required method that describes what happens when the implementing type executes. It is generic
/// over the types used to represent simulation state and clock time so that your implementations of each can work
/// together within the engine.
///
/// An event is consumed when it executes: [`Simulation::run()`] hands the boxed value to [`execute()`] by ownership,
/// so one dispatch always corresponds to exactly one queue entry. A recurring event schedules a fresh value of itself
/// for its next occurrence rather than mutating and reinserting the record it was popped from.
///
/// Requiring implementors to be [`Debug`] enables printing the full contents of an [`EventQueue`] when necessary.
///
/// The engine does not support interrupting or cancelling events. An event that should no longer have any effect
/// must determine that for itself when it executes.
///
/// [`Simulation::run()`]: crate::engine::Simulation::run
/// [`execute()`]: Event::execute
pub trait Event<State, Time>: Debug
where
    State: SimState<Time>,
    Time: SimTime,
{
    /// Update the simulation according to the specific type of event. Exclusive access is provided to both the
    /// simulation's current state and the event queue, allowing for both mutation of the state and scheduling of new
    /// events.
    ///
    /// Note that the simulation's clock time, accessible on the `event_queue` parameter, has already been advanced to
    /// this event's execution time when this method is invoked.
    ///
    /// # Errors
    ///
    /// Any error returned here halts [`Simulation::run()`] and is passed back to its caller unchanged. Foreign errors
    /// should be wrapped in [`Error::BadExecution`].
    ///
    /// [`Simulation::run()`]: crate::engine::Simulation::run
    /// [`Error::BadExecution`]: crate::Error::BadExecution
    fn execute(self: Box<Self>, simulation_state: &mut State, event_queue: &mut EventQueue<State, Time>)
        -> crate::Result;
}
