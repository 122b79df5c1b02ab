use super::handlers::{Arrival, EndOfSimulation, Report};
use super::{time, FirstArrival, ResourcePool, Snapshot, StationModel, Statistics, Streams, Time, WaitingLine};
use crate::config::RunParameters;
use crate::engine::Simulation;
use crate::report::ReportWriter;
use crate::SimState;

use std::io::Write;

/// Everything one run of the station owns: its pumps, its line, its statistics, its random streams and the report
/// they feed.
///
/// Events receive exclusive access to a [`Station`] as they execute; nothing about a run lives outside it.
#[derive(Debug)]
pub struct Station<W>
where
    W: Write,
{
    pub(super) model: StationModel,
    pub(super) pool: ResourcePool,
    pub(super) line: WaitingLine,
    pub(super) statistics: Statistics,
    pub(super) streams: Streams,
    pub(super) report_interval: Time,
    report: ReportWriter<W>,
    snapshots: Vec<Snapshot>,
    pub(super) complete: bool,
}

impl<W> Station<W>
where
    W: Write,
{
    /// Build the station described by `parameters`, writing the report introduction and column headers to `out`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPoolSize`] for a pool of zero pumps, [`Error::InvalidTime`] for a NaN report interval,
    /// or [`Error::BadExecution`] if writing to `out` fails.
    ///
    /// [`Error::InvalidPoolSize`]: crate::Error::InvalidPoolSize
    /// [`Error::InvalidTime`]: crate::Error::InvalidTime
    /// [`Error::BadExecution`]: crate::Error::BadExecution
    pub fn new(parameters: &RunParameters, model: StationModel, out: W) -> crate::Result<Self> {
        let pool = ResourcePool::new(parameters.units())?;
        let mut report = ReportWriter::new(out);
        report.introduction(parameters.units(), parameters.seeds())?;
        report.headers()?;

        Ok(Self {
            model,
            pool,
            line: WaitingLine::new(),
            statistics: Statistics::new(),
            streams: Streams::new(*parameters.seeds()),
            report_interval: time(parameters.report_interval())?,
            report,
            snapshots: Vec::new(),
            complete: false,
        })
    }

    pub fn model(&self) -> &StationModel {
        &self.model
    }

    pub fn pool(&self) -> &ResourcePool {
        &self.pool
    }

    pub fn line(&self) -> &WaitingLine {
        &self.line
    }

    pub fn statistics(&self) -> &Statistics {
        &self.statistics
    }

    /// Every snapshot reported so far, oldest first. The last one of a finished run is the final report.
    pub fn snapshots(&self) -> &[Snapshot] {
        &self.snapshots
    }

    /// Customers who have arrived and neither left nor balked: those at a pump plus those in line.
    pub fn customers_in_system(&self) -> usize {
        self.pool.customers_in_service() + self.line.len()
    }

    pub fn report_output(&self) -> &W {
        self.report.get_ref()
    }

    pub fn into_report_output(self) -> W {
        self.report.into_inner()
    }

    /// Decide whether a customer wanting `demand` litres leaves rather than join the current line.
    ///
    /// Nobody balks at an empty line, and in that case no balking draw is consumed.
    pub(super) fn balks(&mut self, demand: f64) -> bool {
        let line_length = self.line.len();
        line_length > 0 && self.streams.balking_draw() > self.model.non_balk_probability(demand, line_length)
    }

    /// Take a snapshot at `now`, write it to the report and keep it.
    pub(super) fn publish(&mut self, now: Time) -> crate::Result {
        let snapshot = self.statistics.snapshot(
            now,
            self.line.empty_time_so_far(now),
            self.pool.capacity(),
            &self.model,
        );
        tracing::debug!(
            time = snapshot.time(),
            arrivals = snapshot.total_arrivals(),
            served = snapshot.customers_served(),
            balked = snapshot.balked(),
            "reporting snapshot"
        );
        self.report.snapshot(&snapshot)?;
        self.snapshots.push(snapshot);
        Ok(())
    }
}

impl<W> SimState<Time> for Station<W>
where
    W: Write,
{
    fn is_complete(&self, _: &Time) -> bool {
        self.complete
    }
}

/// Build a ready-to-run simulation of the station.
///
/// Three events are scheduled, in this order: the end of the simulation at the configured end time, the first report
/// one interval in (only if that is no later than the end), and the first arrival. Because ties go to the event
/// scheduled first, a run ending at time zero finishes before its first car arrives.
///
/// # Errors
///
/// Forwards any error from [`Station::new()`], and [`Error::InvalidTime`] if the end time is NaN.
///
/// [`Error::InvalidTime`]: crate::Error::InvalidTime
pub fn setup<W>(
    parameters: &RunParameters,
    model: StationModel,
    out: W,
) -> crate::Result<Simulation<Station<W>, Time>>
where
    W: Write,
{
    tracing::info!(
        units = parameters.units(),
        end_time = parameters.end_time(),
        report_interval = parameters.report_interval(),
        seeds = ?parameters.seeds(),
        "setting up station"
    );

    let first_arrival = model.first_arrival;
    let station = Station::new(parameters, model, out)?;
    let mut simulation = Simulation::new(station, time(0.0)?);

    let end_time = time(parameters.end_time())?;
    simulation.schedule(EndOfSimulation, end_time)?;
    let report_interval = simulation.state().report_interval;
    if report_interval <= end_time {
        simulation.schedule(Report, report_interval)?;
    }

    let first_gap = match first_arrival {
        FirstArrival::AtZero => 0.0,
        FirstArrival::Sampled => {
            let state = simulation.state_mut();
            state.streams.interarrival_time(&state.model)
        },
    };
    simulation.schedule(Arrival, time(first_gap)?)?;

    Ok(simulation)
}
