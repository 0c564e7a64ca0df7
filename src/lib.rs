pub mod activation;
pub mod layers;
pub mod network;
pub mod driver;
pub mod error;

// Convenience re-exports
pub use activation::{sigmoid, clamp_activation};
pub use layers::{Layer, LayerKind, Neuron, NeuronId};
pub use network::{Connection, ConnectionSet, Network, NetworkSnapshot, Topology};
pub use driver::{Driver, DriverConfig, Frame};
pub use error::{NetworkError, Result};
