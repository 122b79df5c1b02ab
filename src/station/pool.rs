use super::Customer;
use crate::Error;

/// Handle to one unit of a [`ResourcePool`].
///
/// Only the pool hands these out, so a handle always names a unit that exists in the pool that created it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UnitId(usize);

impl UnitId {
    /// Zero-based position of the unit within its pool.
    pub fn index(self) -> usize {
        self.0
    }
}

/// The fixed set of interchangeable pumps.
///
/// Every unit is either idle, waiting on the idle stack, or occupied, in which case the caller that took it holds its
/// [`UnitId`]. An occupied unit may have a [`Customer`] bound to it with [`assign()`]. Idle units are handed out in
/// stack order, so the unit released most recently is the next one taken; which pump serves a car carries no meaning
/// in the model.
///
/// [`assign()`]: ResourcePool::assign
#[derive(Debug)]
pub struct ResourcePool {
    units: Vec<Option<Customer>>,
    idle: Vec<UnitId>,
}

impl ResourcePool {
    /// Build a pool of `capacity` units, all of them idle.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPoolSize`] if `capacity` is zero.
    pub fn new(capacity: usize) -> crate::Result<Self> {
        if capacity == 0 {
            return Err(Error::InvalidPoolSize);
        }

        Ok(Self {
            units: vec![None; capacity],
            idle: (0..capacity).map(UnitId).collect(),
        })
    }

    pub fn capacity(&self) -> usize {
        self.units.len()
    }

    pub fn idle_count(&self) -> usize {
        self.idle.len()
    }

    pub fn occupied_count(&self) -> usize {
        self.capacity() - self.idle_count()
    }

    pub fn is_unit_available(&self) -> bool {
        !self.idle.is_empty()
    }

    /// Take an idle unit out of the pool.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoUnitAvailable`] if every unit is occupied. Call [`is_unit_available()`] first.
    ///
    /// [`is_unit_available()`]: ResourcePool::is_unit_available
    pub fn take_unit(&mut self) -> crate::Result<UnitId> {
        self.idle.pop().ok_or(Error::NoUnitAvailable)
    }

    /// Return an occupied unit to the idle stack.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRelease`] if the unit is already idle, still has a customer bound to it, or lies outside
    /// this pool.
    pub fn release(&mut self, unit: UnitId) -> crate::Result {
        match self.units.get(unit.0) {
            Some(None) if !self.idle.contains(&unit) => {
                self.idle.push(unit);
                Ok(())
            },
            _ => Err(Error::InvalidRelease),
        }
    }

    /// Bind `customer` to an occupied unit.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnitNotHeld`] if the unit is idle, already serving a customer, or lies outside this pool. The
    /// customer is dropped in that case.
    pub fn assign(&mut self, unit: UnitId, customer: Customer) -> crate::Result {
        if self.idle.contains(&unit) {
            return Err(Error::UnitNotHeld);
        }
        match self.units.get_mut(unit.0) {
            Some(slot) if slot.is_none() => {
                *slot = Some(customer);
                Ok(())
            },
            _ => Err(Error::UnitNotHeld),
        }
    }

    /// Detach and return the customer bound to `unit`. The unit stays occupied until it is released.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoCustomerInService`] if no customer is bound to the unit.
    pub fn finish(&mut self, unit: UnitId) -> crate::Result<Customer> {
        self.units
            .get_mut(unit.0)
            .and_then(Option::take)
            .ok_or(Error::NoCustomerInService)
    }

    /// The customer currently bound to `unit`, if any.
    pub fn customer_at(&self, unit: UnitId) -> Option<&Customer> {
        self.units.get(unit.0).and_then(Option::as_ref)
    }

    /// Number of units with a customer bound to them.
    pub fn customers_in_service(&self) -> usize {
        self.units.iter().filter(|unit| unit.is_some()).count()
    }
}
