//! Parameters of random board generation

use crate::error::{Error, Result};

/// Parameters of random board generation.
///
/// Every heap is drawn uniformly from `min_value..=max_value` and the whole board is redrawn
/// until it holds at least `min_distinct` different heap sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GenerationConfig {
    /// Smallest initial heap size
    pub min_value: u32,

    /// Largest initial heap size
    pub max_value: u32,

    /// Minimal number of different heap sizes on a fresh board
    pub min_distinct: usize,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            min_value: 1,
            max_value: 10,
            min_distinct: 3,
        }
    }
}

impl GenerationConfig {
    /// Number of different values a single heap can be drawn with
    pub const fn distinct_values(&self) -> u32 {
        self.max_value
            .saturating_sub(self.min_value)
            .saturating_add(1)
    }

    /// Check that the config is consistent and that generating `heap_count` heaps with it
    /// terminates.
    ///
    /// # Errors
    /// - `min_value` is greater than `max_value`
    /// - `min_distinct` distinct values cannot be reached with `heap_count` heaps
    pub fn validate(&self, heap_count: usize) -> Result<()> {
        if self.min_value > self.max_value {
            return Err(Error::InvalidConfig {
                message: format!(
                    "min_value ({}) is greater than max_value ({})",
                    self.min_value, self.max_value
                ),
            });
        }

        let reachable = heap_count.min(self.distinct_values() as usize);
        if reachable < self.min_distinct {
            return Err(Error::NonTerminatingGeneration {
                heap_count,
                distinct_values: self.distinct_values(),
                min_distinct: self.min_distinct,
            });
        }

        Ok(())
    }
}
