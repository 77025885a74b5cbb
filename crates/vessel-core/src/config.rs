//! Growth configuration for reallocating containers.

use crate::error::AllocError;

/// How much storage a full container asks for when it must grow.
///
/// The next capacity is `max(min_capacity, len * factor)`. Both values
/// are validated at construction and immutable afterwards: `factor` must
/// be at least 2 (anything less would not grow a full container
/// geometrically) and `min_capacity` at least 1 (so growth from empty
/// makes progress).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GrowthPolicy {
    factor: usize,
    min_capacity: usize,
}

impl GrowthPolicy {
    /// Default multiplicative growth factor.
    pub const DEFAULT_FACTOR: usize = 2;

    /// Default capacity of the first allocation made by growth.
    pub const DEFAULT_MIN_CAPACITY: usize = 1;

    /// Doubling growth with a first allocation of one slot.
    pub const DOUBLING: Self = Self::new(Self::DEFAULT_FACTOR, Self::DEFAULT_MIN_CAPACITY);

    /// Create a growth policy.
    ///
    /// # Panics
    ///
    /// Panics if `factor < 2` or `min_capacity == 0`.
    pub const fn new(factor: usize, min_capacity: usize) -> Self {
        assert!(factor >= 2, "growth factor must be at least 2");
        assert!(min_capacity >= 1, "minimum capacity must be at least 1");
        Self {
            factor,
            min_capacity,
        }
    }

    /// Multiplicative growth factor.
    pub const fn factor(&self) -> usize {
        self.factor
    }

    /// Capacity of the first allocation made by growth.
    pub const fn min_capacity(&self) -> usize {
        self.min_capacity
    }

    /// Capacity to allocate when a container holding `len` elements is full.
    ///
    /// Returns [`AllocError::CapacityOverflow`] if `len * factor` does not
    /// fit in `usize`.
    pub fn next_capacity(&self, len: usize) -> Result<usize, AllocError> {
        let grown = len
            .checked_mul(self.factor)
            .ok_or(AllocError::CapacityOverflow { requested: len })?;
        Ok(grown.max(self.min_capacity))
    }
}

impl Default for GrowthPolicy {
    fn default() -> Self {
        Self::DOUBLING
    }
}
