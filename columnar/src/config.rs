use std::num::NonZeroUsize;

use serde::{Deserialize, Serialize};

use crate::ColumnarError;

const DEFAULT_CHECKPOINT_INTERVAL: NonZeroUsize = match NonZeroUsize::new(4) {
    Some(n) => n,
    None => unreachable!(),
};

/// Settings of a [`crate::DeltaColumn`], fixed when the column is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeltaConfig {
    /// An absolute checkpoint is stored every `checkpoint_interval` rows, so
    /// reconstructing a row sums at most this many deltas.
    pub checkpoint_interval: NonZeroUsize,
}

impl Default for DeltaConfig {
    fn default() -> Self {
        Self {
            checkpoint_interval: DEFAULT_CHECKPOINT_INTERVAL,
        }
    }
}

impl DeltaConfig {
    pub fn with_checkpoint_interval(interval: usize) -> Result<Self, ColumnarError> {
        let checkpoint_interval = NonZeroUsize::new(interval).ok_or_else(|| {
            ColumnarError::InvalidConfig("checkpoint interval must be positive".to_string())
        })?;
        Ok(Self {
            checkpoint_interval,
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn default_interval() {
        assert_eq!(DeltaConfig::default().checkpoint_interval.get(), 4);
    }

    #[test]
    fn zero_interval_rejected() {
        assert!(matches!(
            DeltaConfig::with_checkpoint_interval(0),
            Err(ColumnarError::InvalidConfig(_))
        ));
        let config = DeltaConfig::with_checkpoint_interval(16).unwrap();
        assert_eq!(config.checkpoint_interval.get(), 16);
    }
}
