use super::{Event, EventQueue};
use crate::{SimState, SimTime};

use std::fmt::Formatter;
use std::ops::Add;

/// One replication: a client state, the queue of events that will act on it, and the driver loop that dispatches them.
///
/// Everything a run touches is owned here, so two [`Simulation`] values never share anything and a finished run can be
/// inspected, or taken apart with [`into_state()`], at leisure.
///
/// A typical run:
///
/// 1. Build the state and hand it to [`new()`] with the start time.
/// 2. Seed the queue with [`schedule()`], making sure some event will eventually mark the state complete.
/// 3. Call [`run()`] and deal with any error it returns.
/// 4. Read the results through [`state()`].
///
/// [`new()`]: Simulation::new
/// [`schedule()`]: Simulation::schedule
/// [`run()`]: Simulation::run
/// [`state()`]: Simulation::state
/// [`into_state()`]: Simulation::into_state
#[derive(Debug, Default)]
pub struct Simulation<State, Time>
where
    State: SimState<Time>,
    Time: SimTime,
{
    event_queue: EventQueue<State, Time>,
    state: State,
    /// Handlers run so far by [`run()`](Simulation::run).
    events_dispatched: u64,
}

impl<State, Time> Simulation<State, Time>
where
    State: SimState<Time>,
    Time: SimTime,
{
    /// Wrap `initial_state` with an empty queue whose clock reads `start_time`.
    pub fn new(initial_state: State, start_time: Time) -> Self {
        Self {
            event_queue: EventQueue::new(start_time),
            state: initial_state,
            events_dispatched: 0,
        }
    }

    /// Dispatch events in time order until the state reports completion.
    ///
    /// Before each dispatch the loop asks [`SimState::is_complete()`]; once it answers `true` the loop returns and
    /// whatever is still queued stays there. Otherwise the earliest event is removed, the clock moves to its time, and
    /// [`Event::execute()`] receives the state and the queue.
    ///
    /// # Errors
    ///
    /// The first error returned by a handler ends the run and is returned unchanged. If the queue empties while the
    /// state is still incomplete, the run ends with [`Error::EmptyQueue`]: nothing was ever going to finish it.
    ///
    /// [`Error::EmptyQueue`]: crate::Error::EmptyQueue
    pub fn run(&mut self) -> crate::Result {
        while !self.state.is_complete(self.event_queue.current_time()) {
            let next_event = self.event_queue.pop_earliest()?;
            tracing::trace!(time = ?self.event_queue.current_time(), event = ?next_event, "dispatching event");
            self.events_dispatched += 1;
            next_event.execute(&mut self.state, &mut self.event_queue)?;
        }

        tracing::debug!(
            time = ?self.event_queue.current_time(),
            dispatched = self.events_dispatched,
            pending = self.event_queue.len(),
            "simulation complete"
        );
        Ok(())
    }

    /// Queue `event` to execute at `time`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BackInTime`], leaving the queue untouched, if `time` is earlier than the clock.
    ///
    /// [`Error::BackInTime`]: crate::Error::BackInTime
    pub fn schedule<EventType>(&mut self, event: EventType, time: Time) -> crate::Result
    where
        EventType: Event<State, Time> + 'static,
    {
        self.event_queue.schedule(event, time)
    }

    pub fn events_dispatched(&self) -> u64 {
        self.events_dispatched
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut State {
        &mut self.state
    }

    /// Drop the queue and keep the state.
    pub fn into_state(self) -> State {
        self.state
    }

    pub fn event_queue(&self) -> &EventQueue<State, Time> {
        &self.event_queue
    }

    pub fn event_queue_mut(&mut self) -> &mut EventQueue<State, Time> {
        &mut self.event_queue
    }
}

impl<State, Time> Simulation<State, Time>
where
    State: SimState<Time>,
    Time: SimTime + Clone + Add<Output = Time>,
{
    /// Queue `event` to execute `delay` after the current clock time.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BackInTime`], leaving the queue untouched, if the delay is negative.
    ///
    /// [`Error::BackInTime`]: crate::Error::BackInTime
    pub fn schedule_with_delay<EventType>(&mut self, event: EventType, delay: Time) -> crate::Result
    where
        EventType: Event<State, Time> + 'static,
    {
        self.event_queue.schedule_with_delay(event, delay)
    }
}

impl<State, Time> std::fmt::Display for Simulation<State, Time>
where
    State: SimState<Time>,
    Time: SimTime,
{
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Simulation at time {:?} after {} events",
            self.event_queue.current_time(),
            self.events_dispatched
        )
    }
}
