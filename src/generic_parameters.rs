use std::fmt::Debug;

/// The generic type used for a simulation's clock.
///
/// Kept generic so the [`engine`] can drive any totally ordered clock. This trait is a superset of [`Ord`] and
/// [`Debug`] with no additional requirements or functionality.
///
/// Events execute in ascending order of execution time, i.e. if `A.cmp(&B) == std::cmp::Ordering::Less` then event A
/// will execute before event B. Ties are resolved by the order in which events were scheduled, so the first event
/// scheduled for a given time is the first to execute at that time.
///
/// Implementations are provided for integral builtin types and for [`NotNan`], the float wrapper the station model
/// uses for its clock. [`f64`] itself does not implement [`Ord`] and so cannot be used directly.
///
/// [`engine`]: crate::engine
/// [`NotNan`]: ordered_float::NotNan
pub trait SimTime: Ord + Debug {}

impl SimTime for u8 {}
impl SimTime for u16 {}
impl SimTime for u32 {}
impl SimTime for u64 {}
impl SimTime for usize {}
impl SimTime for i32 {}
impl SimTime for i64 {}

impl<Float> SimTime for ordered_float::NotNan<Float> where Float: ordered_float::FloatCore + Debug {}

/// The generic type used for a simulation's overall state.
///
/// This type holds everything a replication owns: to-date summary statistics, collections of simulated entities,
/// random-number streams, and so on. Each executing event receives exclusive access to it.
///
/// This trait has only one method, which provides a way for [`Simulation::run()`] to ask whether it should wrap up
/// event execution. The default implementation always answers "no," and so a simulation running with the default will
/// keep dispatching until it runs out of events, which [`Simulation::run()`] reports as [`Error::EmptyQueue`].
///
/// [`Simulation::run()`]: crate::engine::Simulation::run
/// [`Error::EmptyQueue`]: crate::Error::EmptyQueue
pub trait SimState<Time>
where
    Time: SimTime,
{
    /// Reports whether the simulation has run to completion. This method will be invoked in [`Simulation::run()`]
    /// before popping each event off the queue: `true` indicates that the simulation is finished and that `run()`
    /// should break out of its loop, whereas `false` means that `run()` should continue with the next scheduled event.
    ///
    /// The `current_time` argument will provide shared access to the internally tracked simulation clock.
    ///
    /// [`Simulation::run()`]: crate::engine::Simulation::run
    // expect that other implementations will make use of the
    // argument even though this one doesn't
    #[allow(unused_variables)]
    fn is_complete(&self, current_time: &Time) -> bool {
        false
    }
}
