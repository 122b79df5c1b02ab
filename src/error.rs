/// Errors that may be encountered while setting up or executing a simulation.
///
/// Most variants describe a broken calling contract on one of the station's containers, e.g. taking a pump from a
/// [`ResourcePool`] without first asking whether one is free. A correct event loop never produces them, so they stop
/// the run instead of letting it continue on corrupted state.
///
/// The [`BackInTime`] variant originates from the [`EventQueue`] to indicate that an event's scheduled execution time
/// is prior to the queue's current time. This error likely corresponds to a logical bug on the client side, e.g.
/// forgetting to add an offset to the current time when scheduling a new event.
///
/// The [`UndefinedStatistic`] variant is the one case that is expected in practice: short runs may end before any
/// customer has been served, leaving averages with a zero denominator. [`Snapshot`] accessors report it instead of a
/// misleading zero.
///
/// The [`BadExecution`] variant wraps a foreign error, such as a failed write to the report output, in a way that
/// can pass through [`Simulation::run()`]. Invoking [`std::error::Error::source()`] on this variant will acquire a
/// shared reference to the wrapped [`std::error::Error`].
///
/// [`ResourcePool`]: crate::station::ResourcePool
/// [`EventQueue`]: crate::engine::EventQueue
/// [`Snapshot`]: crate::station::Snapshot
/// [`Simulation::run()`]: crate::engine::Simulation::run
/// [`BackInTime`]: Error::BackInTime
/// [`UndefinedStatistic`]: Error::UndefinedStatistic
/// [`BadExecution`]: Error::BadExecution
#[derive(Debug)]
pub enum Error {
    /// The event queue rejected an event that would have been scheduled for a time that has already passed.
    BackInTime,
    /// The event queue was asked for its next event but held none.
    EmptyQueue,
    /// The waiting line was asked for its front customer while empty.
    EmptyLine,
    /// A service unit was requested while every unit was occupied.
    NoUnitAvailable,
    /// A unit was returned to the idle pool while already idle, while still serving a customer, or without
    /// belonging to the pool at all.
    InvalidRelease,
    /// A customer was assigned to a unit that had not been taken from the pool or was already serving someone.
    UnitNotHeld,
    /// Service was finished on a unit that had no customer.
    NoCustomerInService,
    /// A resource pool was configured with fewer than one unit.
    InvalidPoolSize,
    /// A snapshot metric was read while its denominator was zero.
    UndefinedStatistic,
    /// A computed time or delay was NaN.
    InvalidTime,
    /// The setup input ended before the named field was read.
    MissingInput {
        /// Name of the field that was expected next.
        field: &'static str,
    },
    /// A setup line could not be parsed into the named field, or its value is out of range.
    InvalidInput {
        /// Name of the field being read.
        field: &'static str,
        /// The offending text, trimmed.
        value: String,
    },
    /// A foreign error was encountered while executing an event. Call [`source()`] or unpack this value to handle
    /// it directly.
    ///
    /// [`source()`]: #method.source
    BadExecution(Box<dyn std::error::Error + Send + Sync + 'static>),
}

impl PartialEq for Error {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Error::BadExecution(e1), Error::BadExecution(e2)) => {
                let e1: *const dyn std::error::Error = e1.as_ref();
                let e2: *const dyn std::error::Error = e2.as_ref();
                std::ptr::eq(e1, e2)
            },
            (Error::MissingInput { field: f1 }, Error::MissingInput { field: f2 }) => f1 == f2,
            (Error::InvalidInput { field: f1, value: v1 }, Error::InvalidInput { field: f2, value: v2 }) => {
                f1 == f2 && v1 == v2
            },
            (Error::BadExecution(_), _) | (Error::MissingInput { .. }, _) | (Error::InvalidInput { .. }, _) => false,
            _ => std::mem::discriminant(self) == std::mem::discriminant(other),
        }
    }
}

impl Eq for Error {}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::BackInTime => write!(f, "event execution time is less than current simulation time"),
            Self::EmptyQueue => write!(f, "ran out of events before the simulation completed"),
            Self::EmptyLine => write!(f, "waiting line is unexpectedly empty"),
            Self::NoUnitAvailable => write!(f, "no service unit available when needed"),
            Self::InvalidRelease => write!(f, "attempt to release a unit that is not held"),
            Self::UnitNotHeld => write!(f, "customer assigned to a unit that is idle or already serving"),
            Self::NoCustomerInService => write!(f, "no customer in service when expected"),
            Self::InvalidPoolSize => write!(f, "resource pool needs at least one unit"),
            Self::UndefinedStatistic => write!(f, "statistic is not yet available"),
            Self::InvalidTime => write!(f, "time value is not a number"),
            Self::MissingInput { field } => write!(f, "input ended before {field} was read"),
            Self::InvalidInput { field, value } => write!(f, "invalid value {value:?} for {field}"),
            Self::BadExecution(e) => write!(f, "error while executing event: {e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::BadExecution(e) => Some(e.as_ref()),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::BadExecution(Box::new(e))
    }
}

/// [`std::result::Result`]`<T, `[`forecourt::Error`]`>`, with `T` defaulting to `()`.
///
/// A type alias that simplifies the signatures of various functions in forecourt.
///
/// [`forecourt::Error`]: Error
pub type Result<T = ()> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn unit_variants_compare_by_kind() {
        assert_eq!(Error::EmptyLine, Error::EmptyLine);
        assert_ne!(Error::EmptyLine, Error::EmptyQueue);
        assert_ne!(
            Error::MissingInput { field: "end time" },
            Error::MissingInput { field: "report interval" }
        );
    }

    #[test]
    fn input_errors_compare_by_field_and_value() {
        assert_eq!(
            Error::MissingInput { field: "end time" },
            Error::MissingInput { field: "end time" }
        );
        let invalid = |field, value: &str| Error::InvalidInput {
            field,
            value: value.to_owned(),
        };
        assert_eq!(invalid("number of pumps", "x"), invalid("number of pumps", "x"));
        assert_ne!(invalid("number of pumps", "x"), invalid("number of pumps", "-1"));
        assert_ne!(invalid("number of pumps", "x"), invalid("end time", "x"));
        assert_ne!(invalid("end time", ""), Error::MissingInput { field: "end time" });
    }

    #[test]
    fn bad_execution_exposes_source() {
        let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed");
        let error = Error::from(io);
        assert!(error.source().is_some(), "wrapped error should be reachable");
        assert!(error.to_string().contains("closed"));
    }
}
