//! Fixed-width console report.
//!
//! Column widths and precisions are part of the output format that downstream comparisons rely on, as is the rounding
//! rule: a value is scaled by the power of ten for its precision, has one half added, and is truncated toward zero.
//! For non-negative numbers that is round-half-up on the scaled binary value, which can differ from the
//! round-half-to-even that `format!` applies to the exact decimal expansion. The rule applies to the signed value, so
//! negative numbers are pulled toward zero: -20 prints as -19.99.

use crate::station::{Seeds, Snapshot};

use std::io::Write;

const RULE_WIDTH: usize = 79;

/// Render `number` right-justified in `width` characters with `precision` digits after the decimal point.
///
/// Longer results are not truncated. NaN renders as zero.
pub fn fixed(number: f64, width: usize, precision: usize) -> String {
    let scale = 10_f64.powi(precision as i32);
    let scaled = (number * scale + 0.5) as i64;

    let mut digits = scaled.unsigned_abs().to_string();
    if precision > 0 {
        if digits.len() <= precision {
            digits = format!("{digits:0>leading$}", leading = precision + 1);
        }
        digits.insert(digits.len() - precision, '.');
    }
    if scaled < 0 {
        digits.insert(0, '-');
    }

    format!("{digits:>width$}")
}

/// Render `number` right-justified in `width` characters.
pub fn integer(number: u64, width: usize) -> String {
    format!("{number:>width$}")
}

/// Format a [`Snapshot`] as one report row.
pub fn row(snapshot: &Snapshot) -> String {
    let mut line = String::with_capacity(RULE_WIDTH + 1);
    line.push_str(&fixed(snapshot.time(), 8, 0));
    line.push_str(&integer(snapshot.total_arrivals(), 7));
    line.push_str(&maybe_fixed(snapshot.no_queue_fraction().ok(), 8, 3));

    match (snapshot.mean_interarrival(), snapshot.mean_demand()) {
        (Ok(gap), Ok(demand)) => {
            line.push_str(&fixed(gap, 9, 3));
            line.push_str(&fixed(demand, 8, 3));
        },
        _ => line.push_str("Unknown Unknown"),
    }

    line.push_str(&integer(snapshot.balked(), 7));
    match snapshot.mean_wait() {
        Ok(wait) => line.push_str(&fixed(wait, 9, 3)),
        Err(_) => line.push_str("Unknown"),
    }

    line.push_str(&maybe_fixed(snapshot.utilization().ok(), 7, 3));
    line.push_str(&fixed(snapshot.net_profit(), 9, 2));
    line.push_str(&fixed(snapshot.lost_profit(), 7, 2));
    line
}

fn maybe_fixed(value: Option<f64>, width: usize, precision: usize) -> String {
    match value {
        Some(value) => fixed(value, width, precision),
        None => format!("{:>width$}", "Unknown"),
    }
}

/// Writes the report to any [`Write`] sink: an introduction, the column headers, then one row per snapshot.
#[derive(Debug)]
pub struct ReportWriter<W>
where
    W: Write,
{
    out: W,
}

impl<W> ReportWriter<W>
where
    W: Write,
{
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Announce the pump count and the seeds of this run.
    pub fn introduction(&mut self, units: usize, seeds: &Seeds) -> std::io::Result<()> {
        writeln!(
            self.out,
            "This simulation run uses {units} pumps and the following random number seeds:"
        )?;
        writeln!(
            self.out,
            "       {}        {}         {}        {}",
            seeds.arrival, seeds.demand, seeds.balking, seeds.service
        )
    }

    pub fn headers(&mut self) -> std::io::Result<()> {
        writeln!(
            self.out,
            " Current   Total NoQueue  Car->Car Averaae Number Average  Pump  Total  Lost "
        )?;
        writeln!(
            self.out,
            " Time      Cars  Fraction  Time    Litres  Balked  Wait  Usage Profit Profit "
        )?;
        writeln!(self.out, "{}", "-".repeat(RULE_WIDTH))
    }

    pub fn snapshot(&mut self, snapshot: &Snapshot) -> std::io::Result<()> {
        writeln!(self.out, "{}", row(snapshot))?;
        self.out.flush()
    }

    pub fn get_ref(&self) -> &W {
        &self.out
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
