//! Single Metropolis/heat-bath Markov chain over one lattice (C5).

use tracing::trace;

use crate::config::Config;
use crate::dwbc;
use crate::error::ChainError;
use crate::flip::{Direction, FlipEngine};
use crate::lattice::Lattice;
use crate::prng::Prng;
use crate::vertex::ALL;

/// Lifecycle state of a [`Chain`] (§4.5).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainState {
    /// Constructed, no step taken yet.
    Idle,
    /// At least one step has been taken and the chain is not paused.
    Running,
    /// Stepping is suspended under caller control.
    Paused,
}

/// Point-in-time statistics snapshot (§6 `stats` payload).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChainStats {
    /// Monotone count of steps taken.
    pub step: u64,
    /// Count of sites where at least one direction was flippable.
    pub proposals: u64,
    /// Count of proposals that resulted in an applied flip.
    pub accepts: u64,
    /// `accepts / proposals`, or `0.0` when no proposals have occurred.
    pub acceptance_rate: f64,
    /// Histogram of vertex types across the lattice, indexed by
    /// [`crate::vertex::VertexType::index`].
    pub vertex_counts: [u64; 6],
    /// Height-function volume (§3).
    pub height: i64,
    /// `-sum(log(W[type]) * count[type])` over the lattice.
    pub energy: f64,
}

/// A single chain: a [`Lattice`], a calibrated [`FlipEngine`], a [`Prng`],
/// and the counters needed to report [`ChainStats`] (§4.5).
///
/// Grounded on `rmg-core::engine_impl::Engine`: a struct owning the mutable
/// store plus counters and a monotone step index, with fallible public
/// operations returning `Result<_, ChainError>` and `#[must_use]` read-only
/// accessors.
#[derive(Debug)]
pub struct Chain {
    lattice: Lattice,
    engine: FlipEngine,
    rng: Prng,
    state: ChainState,
    step_index: u64,
    proposals: u64,
    accepts: u64,
}

impl Chain {
    /// Builds a chain from `cfg`, assumed already validated by
    /// [`Config::validate`].
    #[must_use]
    pub fn new(cfg: &Config) -> Self {
        let buffer = match cfg.initial_state {
            crate::config::InitialState::High => dwbc::build_high(cfg.n),
            crate::config::InitialState::Low => dwbc::build_low(cfg.n),
        };
        Self {
            lattice: Lattice::from_buffer(cfg.n, buffer),
            engine: FlipEngine::new(cfg.weights),
            rng: Prng::from_seed(cfg.seed),
            state: ChainState::Idle,
            step_index: 0,
            proposals: 0,
            accepts: 0,
        }
    }

    /// Current lifecycle state.
    #[must_use]
    pub const fn state(&self) -> ChainState {
        self.state
    }

    /// Suspends stepping; `step`/`run` are no-ops-with-error while paused is
    /// left to the caller's discretion — `pause` only updates the reported
    /// state.
    pub fn pause(&mut self) {
        if self.state == ChainState::Running {
            self.state = ChainState::Paused;
        }
    }

    /// Resumes a paused chain.
    pub fn resume(&mut self) {
        if self.state == ChainState::Paused {
            self.state = ChainState::Running;
        }
    }

    /// Performs one Markov step (§4.5, steps 1-6).
    ///
    /// # Errors
    /// Returns [`ChainError::InvariantViolation`] if an applied flip somehow
    /// leaves a corrupt cell code in the lattice buffer; this indicates a
    /// bug in the flip engine, never ordinary user input.
    pub fn step(&mut self) -> Result<(), ChainError> {
        let n = self.lattice.size();
        let r = self.rng.draw_range(0, n as u32) as usize;
        let c = self.rng.draw_range(0, n as u32) as usize;

        let up_ok = self.engine.is_flippable(&self.lattice, r, c, Direction::Up);
        let dn_ok = self.engine.is_flippable(&self.lattice, r, c, Direction::Down);

        if !up_ok && !dn_ok {
            self.state = ChainState::Running;
            self.step_index += 1;
            return Ok(());
        }

        self.proposals += 1;

        let applied = match (up_ok, dn_ok) {
            (true, false) => {
                let p_up = self.engine.weight_ratio(&self.lattice, r, c, Direction::Up);
                self.rng.draw_unit() < p_up
                    && self
                        .engine
                        .apply_flip(&mut self.lattice, r, c, Direction::Up)
                        .is_some()
            }
            (false, true) => {
                let p_dn = self.engine.weight_ratio(&self.lattice, r, c, Direction::Down);
                self.rng.draw_unit() < p_dn
                    && self
                        .engine
                        .apply_flip(&mut self.lattice, r, c, Direction::Down)
                        .is_some()
            }
            (true, true) => {
                let p_up = self.engine.weight_ratio(&self.lattice, r, c, Direction::Up);
                let p_dn = self.engine.weight_ratio(&self.lattice, r, c, Direction::Down);
                let u = self.rng.draw_unit();
                if u < p_up {
                    self.engine
                        .apply_flip(&mut self.lattice, r, c, Direction::Up)
                        .is_some()
                } else if u < p_up + p_dn {
                    self.engine
                        .apply_flip(&mut self.lattice, r, c, Direction::Down)
                        .is_some()
                } else {
                    false
                }
            }
            (false, false) => unreachable!("filtered above"),
        };

        if applied {
            self.accepts += 1;
        }

        self.state = ChainState::Running;
        self.step_index += 1;
        trace!(step = self.step_index, r, c, applied, "chain step");
        Ok(())
    }

    /// Performs `n` steps in a tight loop with no per-step event emission
    /// (§4.5).
    ///
    /// # Errors
    /// Propagates the first [`ChainError`] raised by an inner [`Self::step`].
    pub fn run(&mut self, n: u64) -> Result<(), ChainError> {
        for _ in 0..n {
            self.step()?;
        }
        Ok(())
    }

    /// Rebuilds the lattice from its original DWBC state and clears all
    /// counters, returning to [`ChainState::Idle`].
    pub fn reset(&mut self, cfg: &Config) {
        let buffer = match cfg.initial_state {
            crate::config::InitialState::High => dwbc::build_high(cfg.n),
            crate::config::InitialState::Low => dwbc::build_low(cfg.n),
        };
        self.lattice.reset_to(buffer);
        self.rng = Prng::from_seed(cfg.seed);
        self.state = ChainState::Idle;
        self.step_index = 0;
        self.proposals = 0;
        self.accepts = 0;
    }

    /// Clears only the running acceptance statistics, leaving the lattice
    /// and step index untouched.
    pub fn reset_stats(&mut self) {
        self.proposals = 0;
        self.accepts = 0;
    }

    /// Replaces the weight vector and recalibrates ρ (§4.5: "the running
    /// acceptance statistics are typically reset by the caller (policy, not
    /// enforced here)" — this method does not reset them).
    pub fn update_weights(&mut self, weights: crate::config::Weights) {
        self.engine.set_weights(weights);
    }

    /// Deep-copied buffer of the live lattice (§6 snapshot payload).
    #[must_use]
    pub fn snapshot_state(&self) -> Vec<u8> {
        self.lattice.snapshot()
    }

    /// Current statistics snapshot.
    #[must_use]
    pub fn snapshot_stats(&self) -> ChainStats {
        let mut vertex_counts = [0u64; 6];
        let n = self.lattice.size();
        for r in 0..n {
            for c in 0..n {
                vertex_counts[self.lattice.at(r, c).index()] += 1;
            }
        }
        let weights = self.engine.weights();
        let energy = -ALL
            .iter()
            .map(|&ty| (vertex_counts[ty.index()] as f64) * weights[ty].ln())
            .sum::<f64>();
        let acceptance_rate = if self.proposals == 0 {
            0.0
        } else {
            self.accepts as f64 / self.proposals as f64
        };
        ChainStats {
            step: self.step_index,
            proposals: self.proposals,
            accepts: self.accepts,
            acceptance_rate,
            vertex_counts,
            height: self.lattice.volume(),
            energy,
        }
    }

    /// Height-function volume of the live lattice.
    #[must_use]
    pub const fn get_height(&self) -> i64 {
        self.lattice.volume()
    }

    /// Read-only access to the live lattice, for the dual driver and CLI.
    #[must_use]
    pub const fn lattice(&self) -> &Lattice {
        &self.lattice
    }

    /// Canonical BLAKE3 digest of the live lattice, for cross-run identity
    /// checks without shipping the full buffer.
    #[cfg(feature = "telemetry")]
    #[must_use]
    pub fn telemetry_hash(&self) -> [u8; 32] {
        self.lattice.telemetry_hash()
    }
}
