//! Growth policy for [`DynamicArray`](crate::DynamicArray).

use weft_core::SeqError;

/// Controls how a [`DynamicArray`](crate::DynamicArray) sizes its buffer.
///
/// Growth is 1.5x the current capacity, or the requested minimum if that
/// is larger. Two limits apply: a soft `ceiling` a few slots below
/// `max_capacity`, used while growing geometrically, and `max_capacity`
/// itself, which is only handed out when a caller explicitly needs more
/// than the ceiling. Repeated 1.5x growth from a huge base therefore
/// saturates at the ceiling instead of wrapping around.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GrowthPolicy {
    /// Capacity applied on the first growth of a default-constructed array.
    ///
    /// Default: 10.
    pub default_capacity: usize,

    /// Largest element count the array may ever hold.
    ///
    /// Default: the platform limit for the element type, see
    /// [`GrowthPolicy::platform_max`].
    pub max_capacity: usize,
}

impl GrowthPolicy {
    /// Default lazily-applied capacity.
    pub const DEFAULT_CAPACITY: usize = 10;

    /// Distance between the growth ceiling and the absolute maximum.
    pub const CEILING_HEADROOM: usize = 8;

    /// Policy with default values for element type `T`.
    pub fn for_element<T>() -> Self {
        Self {
            default_capacity: Self::DEFAULT_CAPACITY,
            max_capacity: Self::platform_max::<T>(),
        }
    }

    /// Replace the lazily-applied default capacity.
    pub fn with_default_capacity(mut self, default_capacity: usize) -> Self {
        self.default_capacity = default_capacity;
        self
    }

    /// Lower the maximum capacity. Values above the platform limit are
    /// kept as given; the allocator will reject them when reached.
    pub fn with_max_capacity(mut self, max_capacity: usize) -> Self {
        self.max_capacity = max_capacity;
        self
    }

    /// Largest element count a single allocation of `T` can describe.
    pub fn platform_max<T>() -> usize {
        match std::mem::size_of::<T>() {
            0 => usize::MAX,
            size => isize::MAX as usize / size,
        }
    }

    /// Soft limit for geometric growth.
    pub fn ceiling(&self) -> usize {
        self.max_capacity.saturating_sub(Self::CEILING_HEADROOM)
    }

    /// Capacity to grow to from `current` when at least `minimum` slots
    /// are needed.
    ///
    /// Returns `Err(SeqError::CapacityExceeded)` when `minimum` itself is
    /// above `max_capacity`.
    pub fn grown_capacity(&self, current: usize, minimum: usize) -> Result<usize, SeqError> {
        let mut candidate = current.saturating_add(current / 2);
        if candidate < minimum {
            candidate = minimum;
        }
        if candidate > self.ceiling() {
            candidate = self.huge_capacity(minimum)?;
        }
        Ok(candidate)
    }

    fn huge_capacity(&self, minimum: usize) -> Result<usize, SeqError> {
        if minimum > self.max_capacity {
            return Err(SeqError::CapacityExceeded {
                requested: minimum,
                max: self.max_capacity,
            });
        }
        Ok(if minimum > self.ceiling() {
            self.max_capacity
        } else {
            self.ceiling()
        })
    }
}
