use super::{Customer, Time};
use crate::Error;

use std::collections::VecDeque;

/// First-come, first-served lineup of customers waiting for a pump.
///
/// The line also measures how long it has spent with nobody in it. Rather than store the start of the current empty
/// stretch, the running total is debited by the clock when the line empties and credited by the clock when it fills
/// again, so that while the line is non-empty the total is exact and while it is empty adding the current clock
/// closes the open interval. The line starts empty at time zero.
#[derive(Debug, Default)]
pub struct WaitingLine {
    customers: VecDeque<Customer>,
    empty_time: f64,
}

impl WaitingLine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a customer to the back of the line at time `now`.
    pub fn enqueue(&mut self, customer: Customer, now: Time) {
        if self.customers.is_empty() {
            self.empty_time += now.into_inner();
        }
        self.customers.push_back(customer);
    }

    /// Remove the customer at the front of the line at time `now`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyLine`] if nobody is waiting.
    pub fn dequeue_front(&mut self, now: Time) -> crate::Result<Customer> {
        let customer = self.customers.pop_front().ok_or(Error::EmptyLine)?;
        if self.customers.is_empty() {
            self.empty_time -= now.into_inner();
        }
        Ok(customer)
    }

    pub fn len(&self) -> usize {
        self.customers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.customers.is_empty()
    }

    /// Total time up to `now` during which nobody was waiting.
    pub fn empty_time_so_far(&self, now: Time) -> f64 {
        if self.customers.is_empty() {
            self.empty_time + now.into_inner()
        } else {
            self.empty_time
        }
    }
}
