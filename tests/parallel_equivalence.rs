//! The parallel product must be bit-identical to the sequential one — the
//! fixed per-cell summation order makes this an exact equality, not an
//! epsilon comparison.

use glyph_nn::{par_dot, Matrix};
use rand::SeedableRng;
use rand::rngs::StdRng;

#[test]
fn parallel_dot_matches_sequential_on_non_square_shapes() {
    let mut rng = StdRng::seed_from_u64(77);
    for (m, k, n) in [(1, 1, 1), (1, 17, 4), (9, 3, 31), (64, 128, 16)] {
        let a = Matrix::gaussian(m, k, 0.0, 1.0, &mut rng);
        let b = Matrix::gaussian(k, n, 0.0, 1.0, &mut rng);
        assert_eq!(
            par_dot(&a, &b).unwrap(),
            a.dot(&b).unwrap(),
            "mismatch on {m}x{k} · {k}x{n}"
        );
    }
}

#[test]
fn parallel_dot_matches_sequential_on_a_600_by_600_case() {
    let mut rng = StdRng::seed_from_u64(600);
    let a = Matrix::gaussian(600, 600, 0.0, 1.0, &mut rng);
    let b = Matrix::gaussian(600, 600, 0.0, 1.0, &mut rng);
    assert_eq!(par_dot(&a, &b).unwrap(), a.dot(&b).unwrap());
}
