//! Dense vertex-type grid with incremental height/volume accounting.

use crate::vertex::VertexType;

/// An N×N grid of vertex-type codes plus the running height-function volume.
///
/// The buffer is the sole canonical representation (§9 re-architecture
/// guidance: no redundant edge arrays are stored). `set` is crate-private;
/// only [`crate::flip::FlipEngine`] mutates cells, which keeps the ice rule
/// and I4 flip-locality invariant enforceable in one place.
#[derive(Debug, Clone)]
pub struct Lattice {
    n: usize,
    cells: Vec<u8>,
    volume: i64,
}

impl Lattice {
    pub(crate) fn from_buffer(n: usize, cells: Vec<u8>) -> Self {
        debug_assert_eq!(cells.len(), n * n);
        let mut lattice = Self { n, cells, volume: 0 };
        lattice.volume = lattice.recompute_volume();
        lattice
    }

    /// Side length `N`.
    #[must_use]
    pub const fn size(&self) -> usize {
        self.n
    }

    /// Reads the vertex type at `(r, c)`.
    ///
    /// # Panics
    /// Panics if `r` or `c` is out of bounds.
    #[must_use]
    pub fn at(&self, r: usize, c: usize) -> VertexType {
        let code = self.cells[self.index(r, c)];
        VertexType::from_code(code).unwrap_or_else(|| unreachable!("corrupt cell code {code}"))
    }

    pub(crate) fn set(&mut self, r: usize, c: usize, ty: VertexType) {
        let idx = self.index(r, c);
        self.cells[idx] = ty.code();
    }

    fn index(&self, r: usize, c: usize) -> usize {
        assert!(r < self.n && c < self.n, "cell ({r}, {c}) out of bounds for N={}", self.n);
        r * self.n + c
    }

    /// Current incremental volume (sum of the height function over all
    /// corners).
    #[must_use]
    pub const fn volume(&self) -> i64 {
        self.volume
    }

    /// Applies the fixed ±1 volume delta of an accepted flip (§3, §4.4).
    ///
    /// `delta` is `+1` for a `DOWN` flip and `-1` for an `UP` flip.
    pub(crate) fn adjust_volume(&mut self, delta: i64) {
        self.volume += delta;
    }

    /// Deep-copied snapshot of the flat buffer, in the bit-exact code
    /// mapping (§6): never an alias into the live array.
    #[must_use]
    pub fn snapshot(&self) -> Vec<u8> {
        self.cells.clone()
    }

    /// Replaces the buffer wholesale and recomputes volume from scratch.
    ///
    /// # Panics
    /// Panics if `buffer.len() != size() * size()`.
    pub fn reset_to(&mut self, buffer: Vec<u8>) {
        assert_eq!(buffer.len(), self.n * self.n, "buffer length mismatch");
        self.cells = buffer;
        self.volume = self.recompute_volume();
    }

    /// Canonical BLAKE3 digest of the live buffer, keyed by `N` and the
    /// incremental volume so two lattices with the same cells but different
    /// accounting state never collide.
    ///
    /// Grounded on `rmg-core::snapshot::compute_snapshot_hash`: hash a fixed,
    /// ordered byte encoding of the canonical state rather than deriving an
    /// identity from pointers or insertion order.
    #[cfg(feature = "telemetry")]
    #[must_use]
    pub fn telemetry_hash(&self) -> [u8; 32] {
        let mut hasher = blake3::Hasher::new();
        hasher.update(&(self.n as u64).to_le_bytes());
        hasher.update(&self.volume.to_le_bytes());
        hasher.update(&self.cells);
        hasher.finalize().into()
    }

    /// Full O(N²) recomputation of the height-function volume, used at
    /// construction and for validating the incrementally-tracked value
    /// (§9 design note: "do a full recomputation only on reset or snapshot
    /// validation").
    #[must_use]
    pub fn recompute_volume(&self) -> i64 {
        let n = self.n;
        // Corner heights, row-major, (N+1) x (N+1).
        let mut h = vec![0i64; (n + 1) * (n + 1)];
        let idx = |i: usize, j: usize| i * (n + 1) + j;

        for j in 0..n {
            h[idx(0, j + 1)] = h[idx(0, j)] + self.at(0, j).delta_top();
        }
        for i in 0..n {
            h[idx(i + 1, 0)] = h[idx(i, 0)] + self.at(i, 0).delta_left();
        }
        for i in 0..n {
            for j in 0..n {
                h[idx(i + 1, j + 1)] = h[idx(i + 1, j)] + self.at(i, j).delta_bottom();
            }
        }
        h.iter().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dwbc;

    #[test]
    fn incremental_volume_matches_recompute_at_construction() {
        for n in [2, 3, 4, 8] {
            let high = Lattice::from_buffer(n, dwbc::build_high(n));
            assert_eq!(high.volume(), high.recompute_volume());
            let low = Lattice::from_buffer(n, dwbc::build_low(n));
            assert_eq!(low.volume(), low.recompute_volume());
        }
    }

    #[test]
    fn snapshot_is_not_aliased() {
        let lattice = Lattice::from_buffer(4, dwbc::build_high(4));
        let mut snap = lattice.snapshot();
        snap[0] = 255;
        assert_ne!(lattice.snapshot()[0], 255);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn at_panics_out_of_bounds() {
        let lattice = Lattice::from_buffer(4, dwbc::build_high(4));
        let _ = lattice.at(4, 0);
    }

    #[cfg(feature = "telemetry")]
    #[test]
    fn telemetry_hash_is_deterministic_and_sensitive_to_state() {
        let high = Lattice::from_buffer(4, dwbc::build_high(4));
        let high_again = Lattice::from_buffer(4, dwbc::build_high(4));
        assert_eq!(high.telemetry_hash(), high_again.telemetry_hash());

        let low = Lattice::from_buffer(4, dwbc::build_low(4));
        assert_ne!(high.telemetry_hash(), low.telemetry_hash());
    }
}
