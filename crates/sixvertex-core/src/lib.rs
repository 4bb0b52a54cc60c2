//! Deterministic Monte Carlo simulation kernel for the six-vertex model on a
//! finite square lattice under Domain Wall Boundary Conditions.
//!
//! The kernel is a pure, synchronous state machine: a [`chain::Chain`] owns
//! a [`lattice::Lattice`] and a [`prng::Prng`], and advances by drawing
//! random plaquette flips through the [`flip::FlipEngine`] under a
//! ρ-calibrated heat-bath acceptance rule. [`driver::DualDriver`] couples
//! two chains started from the two extremal boundary states and tracks
//! whether their height functions have coalesced.

pub mod chain;
pub mod config;
pub mod driver;
pub mod dwbc;
pub mod error;
pub mod flip;
pub mod lattice;
pub mod observables;
pub mod prng;
pub mod vertex;

pub use chain::{Chain, ChainState, ChainStats};
pub use config::{Config, InitialState, Weights};
pub use driver::{Convergence, DualDriver, HISTORY_MAX, MIN_HISTORY, THETA};
pub use error::{ChainError, ConfigError, DriverError};
pub use flip::{Direction, FlipEngine, FlipRecord};
pub use lattice::Lattice;
pub use prng::Prng;
pub use vertex::VertexType;
