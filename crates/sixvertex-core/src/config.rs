//! Construction inputs (§6) and their validation.

use crate::error::ConfigError;
use crate::vertex::ALL;

/// Which extremal Domain Wall Boundary Condition to build from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InitialState {
    /// DWBC High (I2).
    High,
    /// DWBC Low (I3).
    Low,
}

/// Positive weight assigned to each of the six vertex types, indexed by
/// [`crate::vertex::VertexType::index`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Weights(pub [f64; 6]);

impl Weights {
    /// All six weights set to `1.0`.
    #[must_use]
    pub const fn uniform() -> Self {
        Self([1.0; 6])
    }

    /// Validates positivity and finiteness for every weight (§7 `ConfigError`).
    ///
    /// # Errors
    /// Returns [`ConfigError::NonPositiveWeight`] or
    /// [`ConfigError::NonFiniteWeight`] for the first offending entry.
    pub fn validate(&self) -> Result<(), ConfigError> {
        const NAMES: [&str; 6] = ["a1", "a2", "b1", "b2", "c1", "c2"];
        for ty in ALL {
            let value = self.0[ty.index()];
            let vertex = NAMES[ty.index()];
            if !value.is_finite() {
                return Err(ConfigError::NonFiniteWeight { vertex, value });
            }
            if value <= 0.0 {
                return Err(ConfigError::NonPositiveWeight { vertex, value });
            }
        }
        Ok(())
    }
}

impl std::ops::Index<crate::vertex::VertexType> for Weights {
    type Output = f64;
    fn index(&self, ty: crate::vertex::VertexType) -> &f64 {
        &self.0[ty.index()]
    }
}

/// Construction inputs for a single [`crate::chain::Chain`] (§6).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Config {
    /// Lattice side length, `N >= 2`.
    pub n: usize,
    /// Which extremal state to build the lattice from.
    pub initial_state: InitialState,
    /// Per-type vertex weights.
    pub weights: Weights,
    /// 64-bit PRNG seed.
    pub seed: u64,
    /// Batching hint for the host's run loop; not enforced by `Chain` itself.
    pub steps_per_batch: usize,
}

impl Config {
    /// Validates `N`, the weights, and the batch hint.
    ///
    /// # Errors
    /// See [`ConfigError`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.n < 2 {
            return Err(ConfigError::SizeTooSmall(self.n));
        }
        if self.steps_per_batch == 0 {
            return Err(ConfigError::ZeroBatch);
        }
        self.weights.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_tiny_lattice() {
        let cfg = Config {
            n: 1,
            initial_state: InitialState::High,
            weights: Weights::uniform(),
            seed: 1,
            steps_per_batch: 100,
        };
        assert_eq!(cfg.validate(), Err(ConfigError::SizeTooSmall(1)));
    }

    #[test]
    fn rejects_nonpositive_weight() {
        let mut weights = Weights::uniform();
        weights.0[2] = 0.0;
        let cfg = Config {
            n: 4,
            initial_state: InitialState::High,
            weights,
            seed: 1,
            steps_per_batch: 100,
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn rejects_nonfinite_weight() {
        let mut weights = Weights::uniform();
        weights.0[4] = f64::NAN;
        assert!(weights.validate().is_err());
    }

    #[test]
    fn accepts_sane_config() {
        let cfg = Config {
            n: 8,
            initial_state: InitialState::Low,
            weights: Weights::uniform(),
            seed: 7777,
            steps_per_batch: 100,
        };
        assert!(cfg.validate().is_ok());
    }
}
