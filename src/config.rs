//! Resize policy knobs for [`HashTable`](crate::HashTable)

use std::fmt;

/// Base capacity a table starts with and never shrinks below by default
pub const DEFAULT_MIN_BASE_SIZE: usize = 53;
/// Load (percent) above which an insert grows the table
pub const DEFAULT_GROW_LOAD_PERCENT: usize = 70;
/// Load (percent) below which a delete shrinks the table
pub const DEFAULT_SHRINK_LOAD_PERCENT: usize = 10;

/// Resize policy of a table
///
/// ```rust
/// use primehash::{HashTable, TableConfig};
///
/// let config = TableConfig::new().with_min_base_size(11).with_grow_load_percent(60);
/// let table = HashTable::with_config(config).unwrap();
/// assert_eq!(table.capacity(), 11);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableConfig {
    /// Initial base capacity and the floor for shrinking
    pub min_base_size: usize,
    /// Grow when `count * 100 / size` exceeds this
    pub grow_load_percent: usize,
    /// Shrink when `count * 100 / size` falls below this; 0 disables shrinking
    pub shrink_load_percent: usize,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl TableConfig {
    /// Default policy: floor of 53, grow above 70%, shrink below 10%
    #[must_use]
    pub const fn new() -> Self {
        Self {
            min_base_size: DEFAULT_MIN_BASE_SIZE,
            grow_load_percent: DEFAULT_GROW_LOAD_PERCENT,
            shrink_load_percent: DEFAULT_SHRINK_LOAD_PERCENT,
        }
    }

    /// Sets the initial base capacity and shrink floor
    #[must_use]
    pub const fn with_min_base_size(mut self, min_base_size: usize) -> Self {
        self.min_base_size = min_base_size;
        self
    }

    /// Sets the grow threshold
    #[must_use]
    pub const fn with_grow_load_percent(mut self, percent: usize) -> Self {
        self.grow_load_percent = percent;
        self
    }

    /// Sets the shrink threshold
    #[must_use]
    pub const fn with_shrink_load_percent(mut self, percent: usize) -> Self {
        self.shrink_load_percent = percent;
        self
    }

    /// Checks that the thresholds describe a policy that cannot oscillate or fill up
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] naming the first offending setting.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_base_size < 2 {
            return Err(ConfigError::MinBaseSizeTooSmall(self.min_base_size));
        }
        if !(1..=99).contains(&self.grow_load_percent) {
            return Err(ConfigError::GrowThresholdOutOfRange(self.grow_load_percent));
        }
        // a shrink halves the table, doubling its load; it must land below the grow threshold
        if self.shrink_load_percent.saturating_mul(2) >= self.grow_load_percent {
            return Err(ConfigError::ShrinkNotBelowGrow {
                shrink: self.shrink_load_percent,
                grow: self.grow_load_percent,
            });
        }
        Ok(())
    }
}

/// Invalid [`TableConfig`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// The floor capacity must be at least 2
    MinBaseSizeTooSmall(usize),
    /// The grow threshold must be within `1..=99`
    GrowThresholdOutOfRange(usize),
    /// Twice the shrink threshold must stay below the grow threshold
    ShrinkNotBelowGrow {
        /// Configured shrink threshold
        shrink: usize,
        /// Configured grow threshold
        grow: usize,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MinBaseSizeTooSmall(size) => {
                write!(f, "minimum base size {size} is below 2")
            }
            Self::GrowThresholdOutOfRange(percent) => {
                write!(f, "grow threshold {percent}% is outside 1..=99")
            }
            Self::ShrinkNotBelowGrow { shrink, grow } => {
                write!(f, "shrink threshold {shrink}% is too close to grow threshold {grow}%")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
