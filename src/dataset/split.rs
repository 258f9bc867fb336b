use std::fmt;

use rand::Rng;

use crate::foundation::error::{CardsceneError, CardsceneResult};

/// Dataset partition a scene is written to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Split {
    Train,
    Val,
    Test,
}

impl Split {
    pub const ALL: [Split; 3] = [Split::Train, Split::Val, Split::Test];

    pub fn as_str(self) -> &'static str {
        match self {
            Split::Train => "train",
            Split::Val => "val",
            Split::Test => "test",
        }
    }
}

impl fmt::Display for Split {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Relative weights of the three partitions. They need not sum to one.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SplitRatios {
    pub train: f64,
    pub val: f64,
    pub test: f64,
}

impl Default for SplitRatios {
    fn default() -> Self {
        Self {
            train: 0.8,
            val: 0.1,
            test: 0.1,
        }
    }
}

impl SplitRatios {
    pub fn validate(&self) -> CardsceneResult<()> {
        let parts = [self.train, self.val, self.test];
        if parts.iter().any(|r| !r.is_finite() || *r < 0.0) {
            return Err(CardsceneError::validation(
                "split ratios must be finite and >= 0",
            ));
        }
        if self.total() <= 0.0 {
            return Err(CardsceneError::validation(
                "split ratios must not all be zero",
            ));
        }
        Ok(())
    }

    pub fn total(&self) -> f64 {
        self.train + self.val + self.test
    }

    /// Partition for a point `u` in `[0, 1)` along the cumulative weights.
    pub fn pick(&self, u: f64) -> Split {
        let x = u * self.total();
        if x < self.train {
            Split::Train
        } else if x < self.train + self.val {
            Split::Val
        } else if self.test > 0.0 {
            Split::Test
        } else if self.val > 0.0 {
            Split::Val
        } else {
            Split::Train
        }
    }

    pub fn assign<R: Rng + ?Sized>(&self, rng: &mut R) -> Split {
        self.pick(rng.random::<f64>())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/dataset/split.rs"]
mod tests;
