//! # Overview
//!
//! forecourt simulates a refueling station: cars arrive at random, each wanting a random amount of fuel, and are served
//! by a fixed pool of pumps. Cars that find every pump busy join a single first-come, first-served line, unless its
//! length discourages them and they drive off without buying (balk). Periodic reports track utilization, waiting times
//! and profit, so the run answers how many pumps balance lost sales against the cost of idle capacity.
//!
//! The crate is split in two layers:
//!
//! * [`engine`] is a generic discrete-event core. An [`EventQueue`] orders events by execution time, breaking ties by
//!   the order they were scheduled, and a [`Simulation`] owns the queue together with a client state implementing
//!   [`SimState`], dispatching events one at a time and lending each exclusive access to both. Events are consumed
//!   when they execute; a recurring event schedules a fresh value for its next occurrence.
//! * [`station`] is the refueling model built on that core: the pump pool, the waiting line, the four seeded random
//!   streams, the statistics and the four kinds of event that drive them.
//!
//! [`config`] parses the run parameters, [`report`] renders the fixed-width text report, and [`logging`] installs a
//! stderr subscriber for the [`tracing`] diagnostics the library emits.
//!
//! # Example
//!
//! ```
//! use forecourt::config::RunParameters;
//! use forecourt::station::{self, StationModel};
//!
//! let input = "3600\n14400\n3\n1\n2\n3\n4\n";
//! let parameters = RunParameters::from_reader(input.as_bytes())?;
//! let mut simulation = station::setup(&parameters, StationModel::default(), Vec::new())?;
//! simulation.run()?;
//!
//! let last = simulation.state().snapshots().last().expect("the end of the run is always reported");
//! assert_eq!(14400.0, last.time());
//! # Ok::<(), forecourt::Error>(())
//! ```
//!
//! [`EventQueue`]: engine::EventQueue
//! [`Simulation`]: engine::Simulation

pub mod config;
pub mod engine;
mod error;
mod generic_parameters;
pub mod logging;
pub mod report;
pub mod station;

pub use error::{Error, Result};
pub use generic_parameters::{SimState, SimTime};
