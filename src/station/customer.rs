use super::Time;

/// A car at the station.
///
/// Both fields are fixed when the customer is created: the arrival time is the clock at the moment of arrival and the
/// demand is sampled once from the demand stream. A customer is moved between the waiting line and a pump, never
/// shared.
#[derive(Debug, Clone, PartialEq)]
pub struct Customer {
    arrival_time: Time,
    demand: f64,
}

impl Customer {
    pub fn new(arrival_time: Time, demand: f64) -> Self {
        Self { arrival_time, demand }
    }

    pub fn arrival_time(&self) -> Time {
        self.arrival_time
    }

    /// Litres of fuel this customer wants.
    pub fn demand(&self) -> f64 {
        self.demand
    }
}
