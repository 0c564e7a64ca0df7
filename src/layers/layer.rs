use std::fmt;

use serde::{Deserialize, Serialize};

use crate::activation::clamp_activation;

/// Position of a layer in the fixed input → hidden → output stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayerKind {
    Input,
    Hidden,
    Output,
}

impl fmt::Display for LayerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LayerKind::Input => "input",
            LayerKind::Hidden => "hidden",
            LayerKind::Output => "output",
        };
        f.write_str(name)
    }
}

/// Identity of a neuron: the layer it lives in plus its index there.
///
/// Connections refer to neurons through this value rather than holding
/// them, so an external renderer is free to lay neurons out however it likes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NeuronId {
    pub layer: LayerKind,
    pub index: usize,
}

impl NeuronId {
    pub fn new(layer: LayerKind, index: usize) -> NeuronId {
        NeuronId { layer, index }
    }
}

impl fmt::Display for NeuronId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]", self.layer, self.index)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Neuron {
    id: NeuronId,
    activation: f64,
}

impl Neuron {
    pub fn new(id: NeuronId) -> Neuron {
        Neuron { id, activation: 0.0 }
    }

    pub fn id(&self) -> NeuronId {
        self.id
    }

    pub fn activation(&self) -> f64 {
        self.activation
    }

    /// Stores `value` clamped to [0.0, 1.0]. Never fails.
    pub fn set_activation(&mut self, value: f64) {
        self.activation = clamp_activation(value);
    }
}

/// Fixed-length, ordered store of neuron activations.
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    kind: LayerKind,
    neurons: Vec<Neuron>,
}

impl Layer {
    /// Builds `size` neurons with activation 0.0. The length never changes afterwards.
    pub fn new(kind: LayerKind, size: usize) -> Layer {
        let neurons = (0..size)
            .map(|index| Neuron::new(NeuronId::new(kind, index)))
            .collect();
        Layer { kind, neurons }
    }

    pub fn kind(&self) -> LayerKind {
        self.kind
    }

    pub fn len(&self) -> usize {
        self.neurons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.neurons.is_empty()
    }

    pub fn neuron(&self, index: usize) -> Option<&Neuron> {
        self.neurons.get(index)
    }

    pub fn neurons(&self) -> &[Neuron] {
        &self.neurons
    }

    /// Activation of neuron `index`. Panics if `index` is out of range.
    pub fn activation(&self, index: usize) -> f64 {
        self.neurons[index].activation
    }

    pub fn activations(&self) -> Vec<f64> {
        self.neurons.iter().map(Neuron::activation).collect()
    }

    /// Only the owning network writes layer activations.
    pub(crate) fn set_activation(&mut self, index: usize, value: f64) {
        self.neurons[index].set_activation(value);
    }

    pub(crate) fn set_activations(&mut self, values: &[f64]) {
        debug_assert_eq!(values.len(), self.neurons.len());
        for (neuron, &value) in self.neurons.iter_mut().zip(values) {
            neuron.set_activation(value);
        }
    }
}
