pub mod dataset;
pub mod error;
pub mod math;
pub mod network;

// Convenience re-exports
pub use error::{MatrixError, Result};
pub use math::matrix::Matrix;
pub use math::parallel::par_dot;
pub use network::network::Network;
