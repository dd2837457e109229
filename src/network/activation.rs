use std::f64::consts::E;

/// Logistic sigmoid `1 / (1 + e^-x)`, range (0, 1).
///
/// The only activation the two-layer network models; it is stored in the
/// network as a plain function pointer.
pub fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + E.powf(-x))
}
