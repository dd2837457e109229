use std::time::Instant;

use glyph_nn::{par_dot, Matrix};
use rand::SeedableRng;
use rand::rngs::StdRng;

// One 600x600 product is 600^3 = 216 million multiply-adds; the parallel
// variant splits the 360 000 output cells across the rayon pool.
const SIZE: usize = 600;
const ROUNDS: usize = 5;

fn main() {
    let mut rng = StdRng::seed_from_u64(600);

    println!("sequential dot, {SIZE}x{SIZE}:");
    for _ in 0..ROUNDS {
        let a = Matrix::gaussian(SIZE, SIZE, 0.0, 1.0, &mut rng);
        let b = Matrix::gaussian(SIZE, SIZE, 0.0, 1.0, &mut rng);
        let start = Instant::now();
        let _ = a.dot(&b).unwrap();
        println!("  {:.1} ms", start.elapsed().as_secs_f64() * 1000.0);
    }

    println!("parallel dot, {SIZE}x{SIZE}:");
    for _ in 0..ROUNDS {
        let a = Matrix::gaussian(SIZE, SIZE, 0.0, 1.0, &mut rng);
        let b = Matrix::gaussian(SIZE, SIZE, 0.0, 1.0, &mut rng);
        let start = Instant::now();
        let _ = par_dot(&a, &b).unwrap();
        println!("  {:.1} ms", start.elapsed().as_secs_f64() * 1000.0);
    }
}
