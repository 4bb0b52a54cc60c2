//! Plaquette flip detection, weight ratios, and ρ calibration (C4).

use crate::config::Weights;
use crate::lattice::Lattice;
use crate::vertex::VertexType;

/// The two plaquette orientations (§4.4).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Anchored quadruple `(base@(r,c), @(r,c+1), @(r-1,c+1), @(r-1,c))`.
    Up,
    /// Anchored quadruple `(@(r+1,c-1), @(r+1,c), base@(r,c), @(r,c-1))`.
    Down,
}

/// The four cells touched by an accepted flip, in row-major `(row, col)`
/// order, for downstream consumers (§4.4: "a small record of changed
/// cells").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlipRecord {
    /// Cells mutated by the flip, always exactly four.
    pub cells: [(usize, usize); 4],
    /// Direction that was applied.
    pub direction: Direction,
}

use VertexType::{A1, A2, B1, B2, C1, C2};

/// Coordinates and direction resolved for a plaquette anchor, with the
/// anchor-relative positions named per §4.4.
struct Plaquette {
    base: (usize, usize),
    other_a: (usize, usize),
    other_b: (usize, usize),
    other_c: (usize, usize),
}

fn plaquette_for(r: usize, c: usize, n: usize, dir: Direction) -> Option<Plaquette> {
    match dir {
        Direction::Up => {
            if r == 0 || c >= n - 1 {
                return None;
            }
            Some(Plaquette {
                base: (r, c),
                other_a: (r, c + 1),     // "right"
                other_b: (r - 1, c + 1), // "upper-right"
                other_c: (r - 1, c),     // "upper"
            })
        }
        Direction::Down => {
            if r >= n - 1 || c == 0 {
                return None;
            }
            Some(Plaquette {
                base: (r, c),
                other_a: (r + 1, c - 1), // "lower-left"
                other_b: (r + 1, c),     // "lower"
                other_c: (r, c - 1),     // "left"
            })
        }
    }
}

/// Detects flippability and performs ρ-calibrated plaquette flips against a
/// fixed weight vector. ρ is recomputed only when weights change (§4.4
/// design note: "enumerate the fixed finite table of admissible transitions;
/// no runtime search is needed during stepping").
#[derive(Debug, Clone, Copy)]
pub struct FlipEngine {
    weights: Weights,
    rho: f64,
}

impl FlipEngine {
    /// Builds an engine for the given weights, calibrating ρ once.
    #[must_use]
    pub fn new(weights: Weights) -> Self {
        let rho = calibrate_rho(&weights);
        Self { weights, rho }
    }

    /// Current ρ.
    #[must_use]
    pub const fn rho(&self) -> f64 {
        self.rho
    }

    /// Current weights.
    #[must_use]
    pub const fn weights(&self) -> Weights {
        self.weights
    }

    /// Replaces the weight vector and recalibrates ρ.
    pub fn set_weights(&mut self, weights: Weights) {
        self.rho = calibrate_rho(&weights);
        self.weights = weights;
    }

    /// Returns `true` iff the plaquette anchored at `(r, c)` in direction
    /// `dir` matches one of the fixed admissible source patterns (§4.4).
    #[must_use]
    pub fn is_flippable(&self, lattice: &Lattice, r: usize, c: usize, dir: Direction) -> bool {
        admissible_image(lattice, r, c, dir).is_some()
    }

    /// Heat-bath acceptance numerator: the weight product of the plaquette's
    /// *post-flip* image, scaled by ρ (glossary: "Metropolis-like rule where
    /// each proposal's acceptance probability equals (Π weights of image) /
    /// ρ"). Returns `0.0` when the site is not flippable in this direction.
    #[must_use]
    pub fn weight_ratio(&self, lattice: &Lattice, r: usize, c: usize, dir: Direction) -> f64 {
        match admissible_image(lattice, r, c, dir) {
            Some(image) => image_weight_product(&self.weights, image) / self.rho,
            None => 0.0,
        }
    }

    /// Applies the flip if admissible; a no-op (returning `None`) otherwise,
    /// per §4.4 failure semantics: a rejected proposal MUST NOT mutate
    /// state.
    pub fn apply_flip(
        &self,
        lattice: &mut Lattice,
        r: usize,
        c: usize,
        dir: Direction,
    ) -> Option<FlipRecord> {
        let image = admissible_image(lattice, r, c, dir)?;
        let p = plaquette_for(r, c, lattice.size(), dir)?;
        lattice.set(p.base.0, p.base.1, image[0]);
        lattice.set(p.other_a.0, p.other_a.1, image[1]);
        lattice.set(p.other_b.0, p.other_b.1, image[2]);
        lattice.set(p.other_c.0, p.other_c.1, image[3]);
        let delta = match dir {
            Direction::Up => -1,
            Direction::Down => 1,
        };
        lattice.adjust_volume(delta);
        Some(FlipRecord {
            cells: [p.base, p.other_a, p.other_b, p.other_c],
            direction: dir,
        })
    }
}

/// Returns the post-flip `[base, other_a, other_b, other_c]` image if the
/// current plaquette at `(r, c, dir)` matches an admissible source pattern,
/// `None` otherwise.
fn admissible_image(
    lattice: &Lattice,
    r: usize,
    c: usize,
    dir: Direction,
) -> Option<[VertexType; 4]> {
    let p = plaquette_for(r, c, lattice.size(), dir)?;
    let base = lattice.at(p.base.0, p.base.1);
    let a = lattice.at(p.other_a.0, p.other_a.1);
    let b = lattice.at(p.other_b.0, p.other_b.1);
    let cc = lattice.at(p.other_c.0, p.other_c.1);

    match dir {
        // base, right(a), upper-right(b), upper(c)
        Direction::Up => {
            if base == A1 && b == A2 && a == B2 && cc == B1 {
                Some([C1, C2, C1, C2])
            } else if base == C2 && b == C2 && a == C1 && cc == C1 {
                Some([A2, B1, A1, B2])
            } else {
                None
            }
        }
        // base, lower-left(a), lower(b), left(c)
        Direction::Down => {
            if base == C1 && a == C1 && b == C2 && cc == C2 {
                Some([A2, A1, B2, B1])
            } else if base == A1 && a == A2 && b == B1 && cc == B2 {
                Some([C2, C2, C1, C1])
            } else {
                None
            }
        }
    }
}

fn image_weight_product(w: &Weights, image: [VertexType; 4]) -> f64 {
    image.iter().map(|&ty| w[ty]).product()
}

/// The two distinct image weight products reachable by *either* direction's
/// admissible transitions (UP and DOWN share the same pair of images, since
/// DOWN is the mirrored move of UP — see `DESIGN.md`).
fn candidate_image_products(w: &Weights) -> (f64, f64) {
    let p = w[C1] * w[C1] * w[C2] * w[C2];
    let q = w[A1] * w[A2] * w[B1] * w[B2];
    (p, q)
}

/// Computes ρ as the maximum simultaneous UP+DOWN acceptance numerator
/// (§4.4: "the maximum over all admissible flip-image weight products,
/// including biflip sums"). Because UP and DOWN draw from the same pair of
/// image products, this is `2 * max(p, q)`.
fn calibrate_rho(w: &Weights) -> f64 {
    let (p, q) = candidate_image_products(w);
    2.0 * p.max(q)
}
