//! Map construction parameters.

use crate::LongMap;
use log::warn;
use snafu::{ensure, Snafu};

/// Bucket count used by [`LongMap::new`] and restored by [`LongMap::clear`].
pub const DEFAULT_CAPACITY: usize = 1 << 4;

/// Upper bound for the bucket count.
pub const MAX_CAPACITY: usize = 1 << 30;

#[derive(Debug, Snafu)]
pub enum Error {
    #[snafu(display("Illegal initial capacity: {}", capacity))]
    InvalidArgument { capacity: i64 },
}

/// Checks a requested bucket count and turns it into a usable one.
///
/// Negative values are rejected. Values above [`MAX_CAPACITY`] are clamped, and
/// zero is raised to a single bucket; both cases are reported with a warning.
pub fn validate_capacity(capacity: i64) -> Result<usize, Error> {
    ensure!(capacity >= 0, InvalidArgument { capacity });

    if capacity as u64 > MAX_CAPACITY as u64 {
        warn!(
            "Requested capacity {} exceeds the maximum, using {} instead",
            capacity, MAX_CAPACITY
        );
        Ok(MAX_CAPACITY)
    } else if capacity == 0 {
        warn!("Requested capacity is zero, using a single bucket");
        Ok(1)
    } else {
        Ok(capacity as usize)
    }
}

/// Builder for a [`LongMap`].
///
/// ```rust
/// use long_map::{LongMap, LongMapConfig};
///
/// let map: LongMap<&str> = LongMapConfig::default()
///     .initial_capacity(128)
///     .shrink_enabled(true)
///     .build()
///     .unwrap();
/// assert_eq!(map.capacity(), 128);
/// assert!(map.shrink_enabled());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LongMapConfig {
    pub initial_capacity: i64,
    pub shrink_enabled: bool,
}

impl Default for LongMapConfig {
    fn default() -> Self {
        Self {
            initial_capacity: DEFAULT_CAPACITY as i64,
            shrink_enabled: false,
        }
    }
}

impl LongMapConfig {
    /// Sets the starting length of the bucket array.
    pub fn initial_capacity(mut self, capacity: i64) -> Self {
        self.initial_capacity = capacity;
        self
    }

    /// Enables or disables halving the bucket array after removals.
    pub fn shrink_enabled(mut self, enabled: bool) -> Self {
        self.shrink_enabled = enabled;
        self
    }

    /// Validates the configuration and creates an empty map.
    pub fn build<V>(self) -> Result<LongMap<V>, Error> {
        let capacity = validate_capacity(self.initial_capacity)?;
        Ok(LongMap::with_validated(capacity, self.shrink_enabled))
    }
}
