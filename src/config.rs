//! Table construction options.

use crate::error::TableError;

pub const DEFAULT_CAPACITY: usize = 8;

/// Smallest accepted `max_load_factor`. Anything lower would turn a single
/// insert into a huge bucket array.
pub const MIN_LOAD_FACTOR: f64 = 0.1;

/// Options for building a `ChainedHashTable`.
///
/// Automatic growth is off unless `max_load_factor` is set. When it is set,
/// inserting a new key that pushes `len / capacity` above the threshold
/// doubles the capacity before `insert` returns.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TableConfig {
    pub initial_capacity: usize,
    pub max_load_factor: Option<f64>,
}

impl TableConfig {
    pub fn new(initial_capacity: usize) -> Self {
        Self {
            initial_capacity,
            max_load_factor: None,
        }
    }

    pub fn with_max_load_factor(mut self, factor: f64) -> Self {
        self.max_load_factor = Some(factor);
        self
    }

    pub(crate) fn validate(&self) -> Result<(), TableError> {
        if self.initial_capacity == 0 {
            return Err(TableError::ZeroCapacity);
        }
        match self.max_load_factor {
            Some(f) if !f.is_finite() || f < MIN_LOAD_FACTOR => {
                Err(TableError::InvalidLoadFactor(f))
            }
            _ => Ok(()),
        }
    }
}

impl Default for TableConfig {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_manual_growth() {
        let c = TableConfig::default();
        assert_eq!(c.initial_capacity, DEFAULT_CAPACITY);
        assert_eq!(c.max_load_factor, None);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn rejects_zero_capacity() {
        assert_eq!(TableConfig::new(0).validate(), Err(TableError::ZeroCapacity));
    }

    #[test]
    fn rejects_bad_load_factors() {
        for f in [0.0, -1.0, f64::NAN, f64::INFINITY, 0.09, 1e-7, f64::MIN_POSITIVE] {
            let res = TableConfig::new(4).with_max_load_factor(f).validate();
            assert!(matches!(res, Err(TableError::InvalidLoadFactor(_))), "{f}");
        }
        assert!(TableConfig::new(4).with_max_load_factor(0.75).validate().is_ok());
        assert!(TableConfig::new(4)
            .with_max_load_factor(MIN_LOAD_FACTOR)
            .validate()
            .is_ok());
    }
}
