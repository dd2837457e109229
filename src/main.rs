// This binary crate is intentionally minimal.
// All matrix and network logic lives in the library (src/lib.rs and its modules).
// Run demos with:
//   cargo run --release --example parallel_dot
//   cargo run --example two_layer
fn main() {
    println!("glyph-nn: a from-scratch dense-matrix core and two-layer network in Rust.");
    println!("Run `cargo run --release --example parallel_dot` to benchmark the parallel product.");
}
