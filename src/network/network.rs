use rand::Rng;

use crate::activation::sigmoid;
use crate::error::{NetworkError, Result};
use crate::layers::{Layer, LayerKind, NeuronId};
use crate::network::connection::ConnectionSet;
use crate::network::snapshot::NetworkSnapshot;
use crate::network::topology::Topology;

/// Fixed 3-layer fully connected network.
///
/// Owns its three layers and both connection sets exclusively. All state is
/// changed through `feed_forward` and `create_connections*`; everything else
/// hands out shared references or copies.
#[derive(Debug, Clone)]
pub struct Network {
    topology: Topology,
    input: Layer,
    hidden: Layer,
    output: Layer,
    input_to_hidden: ConnectionSet,
    hidden_to_output: ConnectionSet,
}

impl Network {
    /// Builds a network with weights drawn from the thread-local RNG.
    pub fn new(input_size: usize, hidden_size: usize, output_size: usize) -> Result<Network> {
        Network::from_topology(Topology::new(input_size, hidden_size, output_size)?)
    }

    pub fn from_topology(topology: Topology) -> Result<Network> {
        Network::with_rng(topology, &mut rand::thread_rng())
    }

    /// Builds a network whose weights come from `rng`; a seeded RNG gives a
    /// reproducible network.
    pub fn with_rng<R: Rng + ?Sized>(topology: Topology, rng: &mut R) -> Result<Network> {
        topology.validate()?;
        let input_to_hidden = ConnectionSet::initialize(
            LayerKind::Input,
            LayerKind::Hidden,
            topology.input_size,
            topology.hidden_size,
            rng,
        );
        let hidden_to_output = ConnectionSet::initialize(
            LayerKind::Hidden,
            LayerKind::Output,
            topology.hidden_size,
            topology.output_size,
            rng,
        );
        Ok(Network::assemble(topology, input_to_hidden, hidden_to_output))
    }

    /// Builds a network with pinned weights, each slice in connection-index
    /// order (`target * source_size + source`).
    pub fn with_weights(
        topology: Topology,
        input_to_hidden: &[f64],
        hidden_to_output: &[f64],
    ) -> Result<Network> {
        topology.validate()?;
        let input_to_hidden = ConnectionSet::from_weights(
            LayerKind::Input,
            LayerKind::Hidden,
            topology.input_size,
            topology.hidden_size,
            input_to_hidden,
        )?;
        let hidden_to_output = ConnectionSet::from_weights(
            LayerKind::Hidden,
            LayerKind::Output,
            topology.hidden_size,
            topology.output_size,
            hidden_to_output,
        )?;
        Ok(Network::assemble(topology, input_to_hidden, hidden_to_output))
    }

    fn assemble(
        topology: Topology,
        input_to_hidden: ConnectionSet,
        hidden_to_output: ConnectionSet,
    ) -> Network {
        Network {
            topology,
            input: Layer::new(LayerKind::Input, topology.input_size),
            hidden: Layer::new(LayerKind::Hidden, topology.hidden_size),
            output: Layer::new(LayerKind::Output, topology.output_size),
            input_to_hidden,
            hidden_to_output,
        }
    }

    /// Redraws every weight from a fresh thread-local RNG.
    pub fn create_connections(&mut self) {
        self.create_connections_with(&mut rand::thread_rng());
    }

    /// Replaces both connection sets with weights drawn from `rng`.
    /// Counts and ordering are unchanged; activations are not touched.
    pub fn create_connections_with<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let t = self.topology;
        self.input_to_hidden = ConnectionSet::initialize(
            LayerKind::Input,
            LayerKind::Hidden,
            t.input_size,
            t.hidden_size,
            rng,
        );
        self.hidden_to_output = ConnectionSet::initialize(
            LayerKind::Hidden,
            LayerKind::Output,
            t.hidden_size,
            t.output_size,
            rng,
        );
    }

    /// Forward pass: clamps `input` into the input layer, then fills the
    /// hidden and output layers with `sigmoid(weighted sum)`.
    ///
    /// Returns the output activations in neuron order. On a length mismatch
    /// nothing is mutated.
    pub fn feed_forward(&mut self, input: &[f64]) -> Result<Vec<f64>> {
        if input.len() != self.topology.input_size {
            return Err(NetworkError::InputSizeMismatch {
                expected: self.topology.input_size,
                actual: input.len(),
            });
        }

        self.input.set_activations(input);
        propagate(&self.input_to_hidden, &self.input, &mut self.hidden);
        propagate(&self.hidden_to_output, &self.hidden, &mut self.output);

        Ok(self.output.activations())
    }

    pub fn topology(&self) -> Topology {
        self.topology
    }

    pub fn input_layer(&self) -> &Layer {
        &self.input
    }

    pub fn hidden_layer(&self) -> &Layer {
        &self.hidden
    }

    pub fn output_layer(&self) -> &Layer {
        &self.output
    }

    pub fn layer(&self, kind: LayerKind) -> &Layer {
        match kind {
            LayerKind::Input => &self.input,
            LayerKind::Hidden => &self.hidden,
            LayerKind::Output => &self.output,
        }
    }

    pub fn input_to_hidden(&self) -> &ConnectionSet {
        &self.input_to_hidden
    }

    pub fn hidden_to_output(&self) -> &ConnectionSet {
        &self.hidden_to_output
    }

    /// Activation of the neuron named by `id`, if it exists.
    pub fn activation(&self, id: NeuronId) -> Option<f64> {
        self.layer(id.layer).neuron(id.index).map(|n| n.activation())
    }

    /// Owned copy of the current activations and weights for observers.
    pub fn snapshot(&self) -> NetworkSnapshot {
        NetworkSnapshot::capture(self)
    }
}

fn propagate(connections: &ConnectionSet, source: &Layer, target: &mut Layer) {
    for i in 0..target.len() {
        let sum = connections.weighted_sum(i, source);
        target.set_activation(i, sigmoid(sum));
    }
}
