//! Derived quantities computed from a lattice snapshot, not tracked live by
//! the chain (C7).

use crate::lattice::Lattice;
use crate::vertex::{VertexType, ALL};

/// 6-bucket histogram of vertex types across the lattice, indexed by
/// [`VertexType::index`]. O(N²).
#[must_use]
pub fn vertex_histogram(lattice: &Lattice) -> [u64; 6] {
    let mut counts = [0u64; 6];
    let n = lattice.size();
    for r in 0..n {
        for c in 0..n {
            counts[lattice.at(r, c).index()] += 1;
        }
    }
    counts
}

/// Fraction of vertices in the `[c1, c2]` family, used by rendering to
/// highlight the disordered "arctic" region.
///
/// # Panics
/// Panics if `size` is even (a c-density window must have a well-defined
/// center) or is zero.
#[must_use]
pub fn c_density_field(lattice: &Lattice, kernel_size: usize) -> Vec<Vec<f64>> {
    assert!(kernel_size % 2 == 1 && kernel_size > 0, "kernel_size must be a positive odd number");
    let n = lattice.size();
    let half = kernel_size / 2;
    let mut field = vec![vec![0.0f64; n]; n];
    if n < kernel_size {
        return field;
    }
    for r in half..(n - half) {
        for c in half..(n - half) {
            let mut c_count = 0u64;
            for dr in 0..kernel_size {
                for dc in 0..kernel_size {
                    let rr = r + dr - half;
                    let cc = c + dc - half;
                    if matches!(lattice.at(rr, cc), VertexType::C1 | VertexType::C2) {
                        c_count += 1;
                    }
                }
            }
            let window_area = (kernel_size * kernel_size) as f64;
            field[r][c] = c_count as f64 / window_area;
        }
    }
    field
}

/// `-sum(log(W[type]) * count[type])` over the lattice (§4.5 `energy`).
#[must_use]
pub fn energy(lattice: &Lattice, weights: &crate::config::Weights) -> f64 {
    let counts = vertex_histogram(lattice);
    -ALL.iter()
        .map(|&ty| (counts[ty.index()] as f64) * weights[ty].ln())
        .sum::<f64>()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Weights;
    use crate::dwbc;

    #[test]
    fn histogram_sums_to_n_squared() {
        let lattice = Lattice::from_buffer(8, dwbc::build_high(8));
        let hist = vertex_histogram(&lattice);
        assert_eq!(hist.iter().sum::<u64>(), 64);
    }

    #[test]
    fn high_dwbc_has_no_a_type_vertices() {
        let lattice = Lattice::from_buffer(6, dwbc::build_high(6));
        let hist = vertex_histogram(&lattice);
        assert_eq!(hist[VertexType::A1.index()], 0);
        assert_eq!(hist[VertexType::A2.index()], 0);
    }

    #[test]
    fn c_density_is_between_zero_and_one() {
        let lattice = Lattice::from_buffer(12, dwbc::build_low(12));
        let field = c_density_field(&lattice, 3);
        for row in &field {
            for &v in row {
                assert!((0.0..=1.0).contains(&v));
            }
        }
    }

    #[test]
    fn c_density_along_the_main_diagonal_is_nonzero_for_low_dwbc() {
        // DWBC Low places c2 on the main diagonal, so a window centered
        // there should register at least one c-type hit.
        let lattice = Lattice::from_buffer(12, dwbc::build_low(12));
        let field = c_density_field(&lattice, 3);
        assert!(field[6][6] > 0.0);
    }

    #[test]
    #[should_panic(expected = "kernel_size")]
    fn rejects_even_kernel_size() {
        let lattice = Lattice::from_buffer(8, dwbc::build_high(8));
        let _ = c_density_field(&lattice, 4);
    }

    #[test]
    fn energy_is_finite_for_uniform_weights() {
        let lattice = Lattice::from_buffer(8, dwbc::build_high(8));
        let e = energy(&lattice, &Weights::uniform());
        assert!(e.is_finite());
        // log(1.0) == 0.0 for every type under uniform weights.
        assert_eq!(e, 0.0);
    }
}
