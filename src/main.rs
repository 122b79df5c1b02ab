use clap::Parser;
use forecourt::config::RunParameters;
use forecourt::station::{self, FirstArrival, StationModel};

use std::io;
use std::process::ExitCode;

/// Simulate a refueling station.
///
/// Reads seven lines from standard input: the report interval, the end time, the number of pumps, then the seeds of
/// the arrival, demand, balking and service streams. The report is written to standard output and diagnostics to
/// standard error.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Diagnostic verbosity, or any `RUST_LOG`-style directive. `RUST_LOG` itself takes precedence.
    #[arg(long, default_value = "warn")]
    log_level: String,

    /// Profit earned on each litre sold.
    #[arg(long)]
    profit_per_litre: Option<f64>,

    /// Cost of operating one pump for the whole run.
    #[arg(long)]
    pump_cost: Option<f64>,

    /// Smallest demand, in litres.
    #[arg(long)]
    min_litres: Option<f64>,

    /// Width of the uniform demand distribution, in litres.
    #[arg(long)]
    litres_range: Option<f64>,

    /// Service time common to every customer.
    #[arg(long)]
    service_base: Option<f64>,

    /// Additional service time per litre.
    #[arg(long)]
    service_per_litre: Option<f64>,

    /// Standard deviation of the service time.
    #[arg(long)]
    service_spread: Option<f64>,

    /// Balking constant added to the demand.
    #[arg(long)]
    balk_a: Option<f64>,

    /// Balking constant scaling the line length.
    #[arg(long)]
    balk_b: Option<f64>,

    /// Balking constant added to the line length.
    #[arg(long)]
    balk_c: Option<f64>,

    /// Mean gap between arrivals.
    #[arg(long)]
    mean_interarrival: Option<f64>,

    /// Draw the first arrival from the arrival stream instead of opening with a car at time zero.
    #[arg(long)]
    sampled_first_arrival: bool,
}

impl Cli {
    fn model(&self) -> StationModel {
        let mut model = StationModel::default();
        let overrides = [
            (self.profit_per_litre, &mut model.profit_per_unit),
            (self.pump_cost, &mut model.unit_operating_cost),
            (self.min_litres, &mut model.min_demand),
            (self.litres_range, &mut model.demand_range),
            (self.service_base, &mut model.service_base),
            (self.service_per_litre, &mut model.service_per_unit),
            (self.service_spread, &mut model.service_spread),
            (self.balk_a, &mut model.balk_a),
            (self.balk_b, &mut model.balk_b),
            (self.balk_c, &mut model.balk_c),
            (self.mean_interarrival, &mut model.mean_interarrival),
        ];
        for (value, field) in overrides {
            if let Some(value) = value {
                *field = value;
            }
        }

        if self.sampled_first_arrival {
            model.first_arrival = FirstArrival::Sampled;
        }
        model
    }
}

fn run(cli: &Cli) -> forecourt::Result {
    let parameters = RunParameters::from_reader(io::stdin().lock())?;
    let mut simulation = station::setup(&parameters, cli.model(), io::stdout().lock())?;
    simulation.run()?;

    tracing::info!(
        events = simulation.events_dispatched(),
        snapshots = simulation.state().snapshots().len(),
        "run finished"
    );
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    forecourt::logging::init(&cli.log_level);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            tracing::error!(%error, "run failed");
            eprintln!("forecourt: {error}");
            ExitCode::FAILURE
        },
    }
}
