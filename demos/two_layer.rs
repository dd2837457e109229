use glyph_nn::{Matrix, Network};
use rand::SeedableRng;
use rand::rngs::StdRng;

// The training rule drags the output toward the input signal (its error term
// is input - output), so a 3-5-3 network trained on a fixed sample should
// reproduce that sample's values at its output.
fn main() {
    let mut rng = StdRng::seed_from_u64(1);
    let mut network = Network::new(3, 5, 3, 0.5, &mut rng);

    let sample = Matrix::row(vec![0.9, 0.2, 0.6]);

    let before = network.query(&sample).unwrap();
    println!("before: {:?}", before.as_slice());

    for _ in 0..2000 {
        network.train(&sample, &sample).unwrap();
    }

    let after = network.query(&sample).unwrap();
    println!("after:  {:?}", after.as_slice());
    println!("target: {:?}", sample.as_slice());
}
