//! Pure constructors for the two extremal Domain Wall Boundary Condition
//! configurations.

use crate::vertex::VertexType;

/// Builds the DWBC "High" configuration for an `n x n` grid (I2): `b1` in
/// the strict upper-left triangle, `c2` on the anti-diagonal, `b2` in the
/// strict lower-right triangle. Returns a row-major buffer of wire codes.
#[must_use]
pub fn build_high(n: usize) -> Vec<u8> {
    let mut buf = vec![0u8; n * n];
    for r in 0..n {
        for c in 0..n {
            let ty = match (r + c).cmp(&(n - 1)) {
                std::cmp::Ordering::Less => VertexType::B1,
                std::cmp::Ordering::Equal => VertexType::C2,
                std::cmp::Ordering::Greater => VertexType::B2,
            };
            buf[r * n + c] = ty.code();
        }
    }
    buf
}

/// Builds the DWBC "Low" configuration for an `n x n` grid (I3): `c2` on the
/// main diagonal, `a1` in the strict upper-right triangle, `a2` in the
/// strict lower-left triangle.
#[must_use]
pub fn build_low(n: usize) -> Vec<u8> {
    let mut buf = vec![0u8; n * n];
    for r in 0..n {
        for c in 0..n {
            let ty = match c.cmp(&r) {
                std::cmp::Ordering::Greater => VertexType::A1,
                std::cmp::Ordering::Equal => VertexType::C2,
                std::cmp::Ordering::Less => VertexType::A2,
            };
            buf[r * n + c] = ty.code();
        }
    }
    buf
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lattice::Lattice;

    fn code_at(buf: &[u8], n: usize, r: usize, c: usize) -> u8 {
        buf[r * n + c]
    }

    #[test]
    fn s1_build_high_n4_exact_layout() {
        let n = 4;
        let buf = build_high(n);
        let c2_cells = [(0, 3), (1, 2), (2, 1), (3, 0)];
        let b1_cells = [(0, 0), (0, 1), (0, 2), (1, 0), (1, 1), (2, 0)];
        let b2_cells = [(3, 3), (3, 2), (3, 1), (2, 3), (2, 2), (1, 3)];
        for &(r, c) in &c2_cells {
            assert_eq!(code_at(&buf, n, r, c), VertexType::C2.code());
        }
        for &(r, c) in &b1_cells {
            assert_eq!(code_at(&buf, n, r, c), VertexType::B1.code());
        }
        for &(r, c) in &b2_cells {
            assert_eq!(code_at(&buf, n, r, c), VertexType::B2.code());
        }
    }

    #[test]
    fn s2_build_low_n6_exact_layout() {
        let n = 6;
        let buf = build_low(n);
        for i in 0..n {
            assert_eq!(code_at(&buf, n, i, i), VertexType::C2.code());
        }
        for r in 0..n {
            for c in (r + 1)..n {
                assert_eq!(code_at(&buf, n, r, c), VertexType::A1.code());
            }
        }
        for r in 0..n {
            for c in 0..r {
                assert_eq!(code_at(&buf, n, r, c), VertexType::A2.code());
            }
        }
    }

    #[test]
    fn p4_extremal_states_satisfy_ice_rule_for_several_sizes() {
        for n in [2, 3, 4, 5, 8, 16] {
            for buf in [build_high(n), build_low(n)] {
                for &code in &buf {
                    assert!(VertexType::from_code(code).is_some());
                }
            }
        }
    }

    #[test]
    fn high_attains_greater_volume_than_low() {
        for n in [2, 3, 4, 6, 8] {
            let high = Lattice::from_buffer(n, build_high(n));
            let low = Lattice::from_buffer(n, build_low(n));
            assert!(
                high.volume() > low.volume(),
                "N={n}: high={} low={}",
                high.volume(),
                low.volume()
            );
        }
    }
}
