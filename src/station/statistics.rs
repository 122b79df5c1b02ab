use super::{StationModel, Time};
use crate::Error;

/// Running totals collected by the event handlers. Nothing here is ever reset during a run.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Statistics {
    total_arrivals: u64,
    customers_served: u64,
    balking_customers: u64,
    quantity_sold: f64,
    quantity_lost: f64,
    total_waiting_time: f64,
    total_service_time: f64,
}

impl Statistics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count_arrival(&mut self) {
        self.total_arrivals += 1;
    }

    /// Record a customer who left without buying `quantity` litres.
    pub fn record_balk(&mut self, quantity: f64) {
        self.balking_customers += 1;
        self.quantity_lost += quantity;
    }

    /// Record a completed sale of `quantity` litres.
    pub fn record_sale(&mut self, quantity: f64) {
        self.customers_served += 1;
        self.quantity_sold += quantity;
    }

    pub fn record_waiting_time(&mut self, interval: f64) {
        self.total_waiting_time += interval;
    }

    pub fn record_service_time(&mut self, interval: f64) {
        self.total_service_time += interval;
    }

    pub fn total_arrivals(&self) -> u64 {
        self.total_arrivals
    }

    pub fn customers_served(&self) -> u64 {
        self.customers_served
    }

    pub fn balking_customers(&self) -> u64 {
        self.balking_customers
    }

    pub fn quantity_sold(&self) -> f64 {
        self.quantity_sold
    }

    pub fn quantity_lost(&self) -> f64 {
        self.quantity_lost
    }

    /// Derive the reported figures at time `now`, given how long the line has been empty and how many pumps there are.
    pub fn snapshot(&self, now: Time, empty_time: f64, capacity: usize, model: &StationModel) -> Snapshot {
        let clock = now.into_inner();
        let arrivals = self.total_arrivals as f64;
        let capacity = capacity as f64;

        Snapshot {
            time: clock,
            total_arrivals: self.total_arrivals,
            no_queue_fraction: ratio(empty_time, clock),
            mean_interarrival: ratio(clock, arrivals),
            mean_demand: ratio(self.quantity_sold + self.quantity_lost, arrivals),
            balked: self.balking_customers,
            customers_served: self.customers_served,
            mean_wait: ratio(self.total_waiting_time, self.customers_served as f64),
            utilization: ratio(self.total_service_time, capacity * clock),
            net_profit: self.quantity_sold * model.profit_per_unit - model.unit_operating_cost * capacity,
            lost_profit: self.quantity_lost * model.profit_per_unit,
        }
    }
}

fn ratio(numerator: f64, denominator: f64) -> Option<f64> {
    (denominator != 0.0).then(|| numerator / denominator)
}

/// The station's figures at one instant.
///
/// Averages whose denominator is still zero, such as the mean wait before anyone has been served, are not available;
/// their accessors return [`Error::UndefinedStatistic`].
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    time: f64,
    total_arrivals: u64,
    no_queue_fraction: Option<f64>,
    mean_interarrival: Option<f64>,
    mean_demand: Option<f64>,
    balked: u64,
    customers_served: u64,
    mean_wait: Option<f64>,
    utilization: Option<f64>,
    net_profit: f64,
    lost_profit: f64,
}

impl Snapshot {
    /// Clock time the snapshot was taken at.
    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn total_arrivals(&self) -> u64 {
        self.total_arrivals
    }

    pub fn balked(&self) -> u64 {
        self.balked
    }

    pub fn customers_served(&self) -> u64 {
        self.customers_served
    }

    /// Share of elapsed time during which nobody was waiting.
    pub fn no_queue_fraction(&self) -> crate::Result<f64> {
        defined(self.no_queue_fraction)
    }

    /// Average gap between arrivals so far.
    pub fn mean_interarrival(&self) -> crate::Result<f64> {
        defined(self.mean_interarrival)
    }

    /// Average demand over every arrival, served or balked.
    pub fn mean_demand(&self) -> crate::Result<f64> {
        defined(self.mean_demand)
    }

    /// Average time from arrival to start of service, over served customers.
    pub fn mean_wait(&self) -> crate::Result<f64> {
        defined(self.mean_wait)
    }

    /// Share of pump time spent serving, counting service already committed to customers still at a pump.
    pub fn utilization(&self) -> crate::Result<f64> {
        defined(self.utilization)
    }

    pub fn net_profit(&self) -> f64 {
        self.net_profit
    }

    pub fn lost_profit(&self) -> f64 {
        self.lost_profit
    }
}

fn defined(value: Option<f64>) -> crate::Result<f64> {
    value.ok_or(Error::UndefinedStatistic)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ordered_float::NotNan;

    fn at(time: f64) -> Time {
        NotNan::new(time).unwrap()
    }

    #[test]
    fn fresh_statistics_have_nothing_to_average() {
        let stats = Statistics::new();
        let snapshot = stats.snapshot(at(0.0), 0.0, 1, &StationModel::default());

        assert_eq!(0, snapshot.total_arrivals());
        assert_eq!(Err(Error::UndefinedStatistic), snapshot.no_queue_fraction());
        assert_eq!(Err(Error::UndefinedStatistic), snapshot.mean_interarrival());
        assert_eq!(Err(Error::UndefinedStatistic), snapshot.mean_demand());
        assert_eq!(Err(Error::UndefinedStatistic), snapshot.mean_wait());
        assert_eq!(Err(Error::UndefinedStatistic), snapshot.utilization());
        assert_eq!(-20.0, snapshot.net_profit());
        assert_eq!(0.0, snapshot.lost_profit());
    }

    #[test]
    fn snapshot_derives_each_figure() {
        let mut stats = Statistics::new();
        for _ in 0..4 {
            stats.count_arrival();
        }
        stats.record_sale(40.0);
        stats.record_sale(20.0);
        stats.record_balk(20.0);
        stats.record_waiting_time(30.0);
        stats.record_waiting_time(10.0);
        stats.record_service_time(300.0);
        stats.record_service_time(100.0);

        let snapshot = stats.snapshot(at(200.0), 50.0, 2, &StationModel::default());

        assert_eq!(Ok(0.25), snapshot.no_queue_fraction());
        assert_eq!(Ok(50.0), snapshot.mean_interarrival());
        assert_eq!(Ok(20.0), snapshot.mean_demand());
        assert_eq!(1, snapshot.balked());
        assert_eq!(2, snapshot.customers_served());
        assert_eq!(Ok(20.0), snapshot.mean_wait());
        assert_eq!(Ok(1.0), snapshot.utilization());
        assert_eq!(60.0 * 0.025 - 40.0, snapshot.net_profit());
        assert_eq!(20.0 * 0.025, snapshot.lost_profit());
    }

    #[test]
    fn arrivals_without_service_leave_wait_undefined() {
        let mut stats = Statistics::new();
        stats.count_arrival();
        stats.record_service_time(160.0);
        let snapshot = stats.snapshot(at(100.0), 100.0, 1, &StationModel::default());

        assert_eq!(Err(Error::UndefinedStatistic), snapshot.mean_wait());
        assert_eq!(Ok(1.6), snapshot.utilization());
        assert_eq!(Ok(100.0), snapshot.mean_interarrival());
    }
}
