pub mod layer;

pub use layer::{Layer, LayerKind, Neuron, NeuronId};
