/// When the first customer shows up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FirstArrival {
    /// The first car arrives the moment the station opens.
    #[default]
    AtZero,
    /// The first gap is drawn from the arrival stream like every other.
    Sampled,
}

/// Behavioural and economic constants of the station.
///
/// [`Default`] gives the values the model was calibrated with: demand uniform between 10 and 60 litres, a car every
/// 50 seconds on average, service taking 150 seconds plus half a second per litre with a 30 second spread, a profit of
/// 0.025 per litre and an operating cost of 20 per pump per run.
#[derive(Debug, Clone, PartialEq)]
pub struct StationModel {
    /// Profit earned on each litre sold.
    pub profit_per_unit: f64,
    /// Fixed cost of operating one pump for the whole run.
    pub unit_operating_cost: f64,
    /// Smallest demand a customer can have, in litres.
    pub min_demand: f64,
    /// Width of the uniform demand distribution, in litres.
    pub demand_range: f64,
    /// Service time common to every customer.
    pub service_base: f64,
    /// Additional service time per litre dispensed.
    pub service_per_unit: f64,
    /// Standard deviation of the service time.
    pub service_spread: f64,
    pub balk_a: f64,
    pub balk_b: f64,
    pub balk_c: f64,
    /// Mean of the exponential gap between arrivals.
    pub mean_interarrival: f64,
    pub first_arrival: FirstArrival,
}

impl Default for StationModel {
    fn default() -> Self {
        Self {
            profit_per_unit: 0.025,
            unit_operating_cost: 20.0,
            min_demand: 10.0,
            demand_range: 50.0,
            service_base: 150.0,
            service_per_unit: 0.5,
            service_spread: 30.0,
            balk_a: 40.0,
            balk_b: 25.0,
            balk_c: 3.0,
            mean_interarrival: 50.0,
            first_arrival: FirstArrival::AtZero,
        }
    }
}

impl StationModel {
    /// Probability that a customer wanting `demand` litres joins a line of `line_length` cars instead of leaving.
    ///
    /// Thirsty customers are more patient and long lines are more discouraging:
    /// `(balk_a + demand) / (balk_b * (balk_c + line_length))`. Values above one simply mean the customer always stays.
    pub fn non_balk_probability(&self, demand: f64, line_length: usize) -> f64 {
        (self.balk_a + demand) / (self.balk_b * (self.balk_c + line_length as f64))
    }

    /// Expected service time for `demand` litres, before the random spread is added.
    pub fn mean_service_time(&self, demand: f64) -> f64 {
        self.service_base + self.service_per_unit * demand
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn longer_lines_discourage_customers() {
        let model = StationModel::default();
        for demand in [10.0, 35.0, 59.9] {
            let probabilities: Vec<f64> = (1..12).map(|len| model.non_balk_probability(demand, len)).collect();
            assert!(
                probabilities.windows(2).all(|pair| pair[1] < pair[0]),
                "probability should fall as the line grows: {probabilities:?}"
            );
        }
    }

    #[test]
    fn bigger_demand_means_more_patience() {
        let model = StationModel::default();
        let small = model.non_balk_probability(10.0, 2);
        let large = model.non_balk_probability(60.0, 2);
        assert!(large > small);
        assert_eq!(50.0 / 125.0, small);
    }

    #[test]
    fn mean_service_grows_with_demand() {
        let model = StationModel::default();
        assert_eq!(155.0, model.mean_service_time(10.0));
        assert_eq!(180.0, model.mean_service_time(60.0));
    }
}
