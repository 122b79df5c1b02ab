//! Sweep the number of pumps from one to five over a four-hour day,
//! reusing the same four seeds for every configuration.
//!
//! Because each random stream is consumed only by its own kind of
//! draw, every configuration sees the same sequence of arrival gaps
//! and demands. Differences between the rows below therefore come
//! from the pump count and not from luckier customers, which is the
//! common random numbers technique for comparing alternatives.
//!
//! The reports themselves are discarded; only the final snapshot of
//! each run is printed.

use forecourt::config::RunParameters;
use forecourt::station::{self, Seeds, StationModel};

const SEEDS: Seeds = Seeds {
    arrival: 4268,
    demand: 96843,
    balking: 17,
    service: 53312,
};

fn main() -> forecourt::Result {
    forecourt::logging::init("warn");

    let day = RunParameters::new(3_600.0, 14_400.0, 1, SEEDS)?;
    println!("pumps  arrivals  balked  utilization  net profit  lost profit");

    for pumps in 1..=5 {
        let parameters = day.with_units(pumps)?;
        let mut simulation = station::setup(&parameters, StationModel::default(), std::io::sink())?;
        simulation.run()?;

        let state = simulation.state();
        let Some(last) = state.snapshots().last() else {
            continue;
        };
        println!(
            "{pumps:>5}  {:>8}  {:>6}  {:>11.3}  {:>10.2}  {:>11.2}",
            last.total_arrivals(),
            last.balked(),
            last.utilization()?,
            last.net_profit(),
            last.lost_profit(),
        );
    }

    Ok(())
}
