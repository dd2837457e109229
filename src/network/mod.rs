pub mod activation;
pub mod network;

pub use network::Network;
