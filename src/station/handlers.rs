use super::{time, Customer, Station, Time, UnitId};
use crate::engine::{Event, EventQueue};

use std::io::Write;

/// A car pulls into the station. Recurs for as long as the run lasts.
#[derive(Debug)]
pub struct Arrival;

impl<W> Event<Station<W>, Time> for Arrival
where
    W: Write,
{
    fn execute(self: Box<Self>, station: &mut Station<W>, events: &mut EventQueue<Station<W>, Time>) -> crate::Result {
        let now = *events.current_time();
        let demand = station.streams.demand(&station.model);
        let customer = Customer::new(now, demand);
        station.statistics.count_arrival();

        if station.balks(demand) {
            tracing::debug!(time = *now, demand, line_length = station.line.len(), "customer balked");
            station.statistics.record_balk(demand);
        } else if station.pool.is_unit_available() {
            let unit = station.pool.take_unit()?;
            start_service(station, events, unit, customer)?;
        } else {
            tracing::debug!(time = *now, demand, line_length = station.line.len(), "customer joined the line");
            station.line.enqueue(customer, now);
        }

        let gap = station.streams.interarrival_time(&station.model);
        events.schedule_with_delay(Arrival, time(gap)?)
    }
}

/// The customer at `unit` finishes filling up and drives off.
#[derive(Debug)]
pub struct Departure {
    unit: UnitId,
}

impl Departure {
    pub fn new(unit: UnitId) -> Self {
        Self { unit }
    }

    pub fn unit(&self) -> UnitId {
        self.unit
    }
}

impl<W> Event<Station<W>, Time> for Departure
where
    W: Write,
{
    fn execute(self: Box<Self>, station: &mut Station<W>, events: &mut EventQueue<Station<W>, Time>) -> crate::Result {
        let now = *events.current_time();
        let customer = station.pool.finish(self.unit)?;
        station.statistics.record_sale(customer.demand());

        if station.line.is_empty() {
            station.pool.release(self.unit)
        } else {
            let next = station.line.dequeue_front(now)?;
            start_service(station, events, self.unit, next)
        }
    }
}

/// Periodic snapshot of the statistics.
#[derive(Debug)]
pub struct Report;

impl<W> Event<Station<W>, Time> for Report
where
    W: Write,
{
    fn execute(self: Box<Self>, station: &mut Station<W>, events: &mut EventQueue<Station<W>, Time>) -> crate::Result {
        station.publish(*events.current_time())?;
        events.schedule_with_delay(Report, station.report_interval)
    }
}

/// Final snapshot; nothing executes after this.
#[derive(Debug)]
pub struct EndOfSimulation;

impl<W> Event<Station<W>, Time> for EndOfSimulation
where
    W: Write,
{
    fn execute(self: Box<Self>, station: &mut Station<W>, events: &mut EventQueue<Station<W>, Time>) -> crate::Result {
        let now = *events.current_time();
        station.publish(now)?;
        station.complete = true;
        tracing::info!(
            time = *now,
            arrivals = station.statistics.total_arrivals(),
            served = station.statistics.customers_served(),
            balked = station.statistics.balking_customers(),
            "end of simulation"
        );
        Ok(())
    }
}

/// Put `customer` at the already-held `unit` and schedule their departure.
///
/// A service time sampled below zero counts as instantaneous.
fn start_service<W>(
    station: &mut Station<W>,
    events: &mut EventQueue<Station<W>, Time>,
    unit: UnitId,
    customer: Customer,
) -> crate::Result
where
    W: Write,
{
    let now = *events.current_time();
    let demand = customer.demand();
    let waited = now.into_inner() - customer.arrival_time().into_inner();
    station.pool.assign(unit, customer)?;

    let duration = station.streams.service_time(&station.model, demand).max(0.0);
    tracing::trace!(time = *now, unit = unit.index(), waited, duration, "starting service");
    station.statistics.record_waiting_time(waited);
    station.statistics.record_service_time(duration);
    events.schedule_with_delay(Departure::new(unit), time(duration)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RunParameters;
    use crate::station::{Seeds, StationModel, Statistics, Streams};
    use crate::Error;

    const SEEDS: Seeds = Seeds {
        arrival: 11,
        demand: 12,
        balking: 13,
        service: 14,
    };

    fn at(clock: f64) -> Time {
        time(clock).unwrap()
    }

    /// A model where anybody who looks at the line leaves.
    fn impatient() -> StationModel {
        StationModel {
            balk_a: -1_000.0,
            ..StationModel::default()
        }
    }

    fn station(units: usize, model: StationModel) -> Station<Vec<u8>> {
        let parameters = RunParameters::new(100.0, 1_000.0, units, SEEDS).unwrap();
        Station::new(&parameters, model, Vec::new()).unwrap()
    }

    fn queue_at(clock: f64) -> EventQueue<Station<Vec<u8>>, Time> {
        let mut queue = EventQueue::new(at(0.0));
        queue.schedule(Report, at(clock)).unwrap();
        queue.pop_earliest().unwrap();
        queue
    }

    /// Occupy the only pump and put one customer, who arrived at `arrived`, in line behind it.
    fn waiting_customer(station: &mut Station<Vec<u8>>, arrived: f64) -> UnitId {
        let unit = station.pool.take_unit().unwrap();
        station.pool.assign(unit, Customer::new(at(0.0), 30.0)).unwrap();
        station.line.enqueue(Customer::new(at(arrived), 25.0), at(arrived));
        unit
    }

    #[test]
    fn empty_line_never_balks_nor_draws() {
        let mut station = station(1, impatient());
        let mut events = queue_at(5.0);

        Box::new(Arrival).execute(&mut station, &mut events).unwrap();

        assert_eq!(0, station.statistics.balking_customers());
        assert_eq!(1, station.pool.occupied_count());
        let mut untouched = Streams::new(SEEDS);
        assert_eq!(untouched.balking_draw(), station.streams.balking_draw());
    }

    #[test]
    fn arrival_serves_then_schedules_next_arrival_and_departure() {
        let mut station = station(2, StationModel::default());
        let mut events = queue_at(5.0);

        Box::new(Arrival).execute(&mut station, &mut events).unwrap();

        assert_eq!(1, station.statistics.total_arrivals());
        assert_eq!(1, station.pool.customers_in_service());
        assert_eq!(2, events.len());
        assert!(station.line.is_empty());
    }

    #[test]
    fn impatient_customer_balks_at_a_line() {
        let mut station = station(1, impatient());
        waiting_customer(&mut station, 2.0);
        let mut events = queue_at(5.0);

        Box::new(Arrival).execute(&mut station, &mut events).unwrap();

        assert_eq!(1, station.statistics.balking_customers());
        assert!(station.statistics.quantity_lost() > 0.0);
        assert_eq!(1, station.line.len());
        assert_eq!(1, events.len(), "only the next arrival is scheduled");
    }

    #[test]
    fn patient_customer_joins_the_line_when_pumps_are_busy() {
        let patient = StationModel {
            balk_a: 1_000.0,
            ..StationModel::default()
        };
        let mut station = station(1, patient);
        waiting_customer(&mut station, 2.0);
        let mut events = queue_at(5.0);

        Box::new(Arrival).execute(&mut station, &mut events).unwrap();

        assert_eq!(0, station.statistics.balking_customers());
        assert_eq!(2, station.line.len());
        assert_eq!(3, station.customers_in_system());
    }

    #[test]
    fn departure_hands_the_pump_to_the_front_of_the_line() {
        let mut station = station(1, StationModel::default());
        let unit = waiting_customer(&mut station, 2.0);
        let mut events = queue_at(9.0);

        let departure = Departure::new(unit);
        assert_eq!(unit, departure.unit());
        Box::new(departure).execute(&mut station, &mut events).unwrap();

        assert_eq!(1, station.statistics.customers_served());
        assert_eq!(30.0, station.statistics.quantity_sold());
        assert!(station.line.is_empty());
        assert_eq!(Some(25.0), station.pool.customer_at(unit).map(Customer::demand));
        assert_eq!(1, events.len());
        assert_eq!(2.0, station.line.empty_time_so_far(at(9.0)));
        let snapshot = station.statistics.snapshot(at(9.0), 2.0, 1, &station.model);
        assert_eq!(Ok(7.0), snapshot.mean_wait());
    }

    #[test]
    fn departure_with_nobody_waiting_frees_the_pump() {
        let mut station = station(1, StationModel::default());
        let unit = station.pool.take_unit().unwrap();
        station.pool.assign(unit, Customer::new(at(0.0), 40.0)).unwrap();
        let mut events = queue_at(200.0);

        Box::new(Departure::new(unit)).execute(&mut station, &mut events).unwrap();

        assert!(station.pool.is_unit_available());
        assert!(events.is_empty());
    }

    #[test]
    fn departure_from_an_idle_pump_is_an_error() {
        let mut station = station(1, StationModel::default());
        let unit = station.pool.take_unit().unwrap();
        let mut events = queue_at(1.0);
        let result = Box::new(Departure::new(unit)).execute(&mut station, &mut events);
        assert_eq!(Err(Error::NoCustomerInService), result);
    }

    #[test]
    fn service_at_a_busy_pump_changes_nothing() {
        let mut station = station(1, StationModel::default());
        let unit = station.pool.take_unit().unwrap();
        station.pool.assign(unit, Customer::new(at(0.0), 30.0)).unwrap();
        let mut events = queue_at(4.0);

        let result = start_service(&mut station, &mut events, unit, Customer::new(at(1.0), 45.0));

        assert_eq!(Err(Error::UnitNotHeld), result);
        assert_eq!(Statistics::new(), station.statistics);
        assert_eq!(Some(30.0), station.pool.customer_at(unit).map(Customer::demand));
        assert!(events.is_empty());
        let model = StationModel::default();
        let mut untouched = Streams::new(SEEDS);
        assert_eq!(
            untouched.service_time(&model, 45.0),
            station.streams.service_time(&model, 45.0),
            "no service time is drawn for a refused assignment"
        );
    }

    #[test]
    fn service_at_an_idle_pump_is_an_error() {
        let mut station = station(2, StationModel::default());
        let unit = station.pool.take_unit().unwrap();
        station.pool.release(unit).unwrap();
        let mut events = queue_at(4.0);

        let result = start_service(&mut station, &mut events, unit, Customer::new(at(1.0), 45.0));

        assert_eq!(Err(Error::UnitNotHeld), result);
        assert_eq!(Statistics::new(), station.statistics);
        assert_eq!(2, station.pool.idle_count());
        assert!(events.is_empty());
    }

    #[test]
    fn report_reschedules_itself_and_end_completes_the_run() {
        let mut station = station(1, StationModel::default());
        let mut events = queue_at(100.0);

        Box::new(Report).execute(&mut station, &mut events).unwrap();
        assert_eq!(1, station.snapshots().len());
        let written = String::from_utf8(station.report_output().clone()).unwrap();
        assert_eq!(
            Some("     100      0   1.000Unknown Unknown      0Unknown  0.000   -19.99   0.00"),
            written.lines().last()
        );
        assert_eq!(1, events.len());
        assert!(!station.complete);

        Box::new(EndOfSimulation).execute(&mut station, &mut events).unwrap();
        assert_eq!(2, station.snapshots().len());
        assert!(station.complete);
    }
}
