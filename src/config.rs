//! Run parameters: the seven setup values read before a run starts.

use crate::station::Seeds;
use crate::Error;

use std::io::BufRead;
use std::str::FromStr;

/// The per-run settings of a station simulation, as opposed to the model constants in
/// [`StationModel`](crate::station::StationModel).
///
/// The textual form is one value per line, in this order: report interval, end time, number of pumps, then the
/// arrival, demand, balking and service seeds. Surrounding whitespace on each line is ignored.
#[derive(Debug, Clone, PartialEq)]
pub struct RunParameters {
    report_interval: f64,
    end_time: f64,
    units: usize,
    seeds: Seeds,
}

impl RunParameters {
    /// Validate and bundle run parameters.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if the report interval is not a finite positive number or the end time is not a
    /// finite non-negative number, and [`Error::InvalidPoolSize`] if `units` is zero.
    pub fn new(report_interval: f64, end_time: f64, units: usize, seeds: Seeds) -> crate::Result<Self> {
        if !report_interval.is_finite() || report_interval <= 0.0 {
            return Err(invalid("report interval", report_interval));
        }
        if !end_time.is_finite() || end_time < 0.0 {
            return Err(invalid("end time", end_time));
        }
        if units == 0 {
            return Err(Error::InvalidPoolSize);
        }

        Ok(Self {
            report_interval,
            end_time,
            units,
            seeds,
        })
    }

    /// Parse the seven setup lines from `reader`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingInput`] if the input ends early, [`Error::InvalidInput`] if a line does not parse as the
    /// expected kind of number, [`Error::BadExecution`] wrapping a read failure, or anything [`new()`] rejects. A pump
    /// count of zero or less is an [`Error::InvalidPoolSize`].
    ///
    /// [`new()`]: RunParameters::new
    pub fn from_reader<R>(reader: R) -> crate::Result<Self>
    where
        R: BufRead,
    {
        let mut fields = Fields {
            lines: reader.lines(),
        };

        let report_interval = fields.next("report interval")?;
        let end_time = fields.next("end time")?;
        let units: i64 = fields.next("number of pumps")?;
        let seeds = Seeds {
            arrival: fields.next("arrival seed")?,
            demand: fields.next("demand seed")?,
            balking: fields.next("balking seed")?,
            service: fields.next("service seed")?,
        };

        let units = usize::try_from(units).map_err(|_| Error::InvalidPoolSize)?;
        Self::new(report_interval, end_time, units, seeds)
    }

    /// Simulated time between two periodic reports.
    pub fn report_interval(&self) -> f64 {
        self.report_interval
    }

    pub fn end_time(&self) -> f64 {
        self.end_time
    }

    /// Number of pumps.
    pub fn units(&self) -> usize {
        self.units
    }

    pub fn seeds(&self) -> &Seeds {
        &self.seeds
    }

    /// The same settings with a different number of pumps.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPoolSize`] if `units` is zero.
    pub fn with_units(&self, units: usize) -> crate::Result<Self> {
        Self::new(self.report_interval, self.end_time, units, self.seeds)
    }
}

fn invalid(field: &'static str, value: f64) -> Error {
    Error::InvalidInput {
        field,
        value: value.to_string(),
    }
}

struct Fields<R> {
    lines: std::io::Lines<R>,
}

impl<R> Fields<R>
where
    R: BufRead,
{
    fn next<T>(&mut self, field: &'static str) -> crate::Result<T>
    where
        T: FromStr,
    {
        let line = self.lines.next().ok_or(Error::MissingInput { field })??;
        let value = line.trim();
        value.parse().map_err(|_| Error::InvalidInput {
            field,
            value: value.to_owned(),
        })
    }
}
