pub mod activation;

pub use activation::{clamp_activation, sigmoid};
