//! The refueling station model, built on the [`engine`](crate::engine).
//!
//! Cars arrive at random, each wanting a random amount of fuel. A car that finds a free pump is served at once; one
//! that finds every pump busy either joins the single first-come, first-served line or, discouraged by its length,
//! drives off. The run reports statistics periodically and finishes at a fixed end time.
//!
//! [`setup()`] assembles a ready-to-run [`Simulation`](crate::engine::Simulation) from a set of
//! [`RunParameters`](crate::config::RunParameters) and a [`StationModel`].

mod customer;
mod handlers;
mod line;
mod model;
mod pool;
mod state;
mod statistics;
mod streams;

pub use customer::Customer;
pub use handlers::{Arrival, Departure, EndOfSimulation, Report};
pub use line::WaitingLine;
pub use model::{FirstArrival, StationModel};
pub use pool::{ResourcePool, UnitId};
pub use state::{setup, Station};
pub use statistics::{Snapshot, Statistics};
pub use streams::{LegacyRandom, Seeds, Streams};

use crate::Error;

use ordered_float::NotNan;

/// Simulation clock of the station, in seconds.
pub type Time = NotNan<f64>;

/// Lift a raw clock value into [`Time`].
pub(crate) fn time(value: f64) -> crate::Result<Time> {
    NotNan::new(value).map_err(|_| Error::InvalidTime)
}
