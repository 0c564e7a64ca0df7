use rand::Rng;

use crate::error::{NetworkError, Result};
use crate::layers::{Layer, LayerKind, NeuronId};

/// Directed, weighted edge between two neurons of adjacent layers.
///
/// The weight is fixed for the lifetime of the connection; a network only
/// changes weights by replacing its whole `ConnectionSet`.
#[derive(Debug, Clone, PartialEq)]
pub struct Connection {
    source: NeuronId,
    target: NeuronId,
    weight: f64,
}

impl Connection {
    pub fn source(&self) -> NeuronId {
        self.source
    }

    pub fn target(&self) -> NeuronId {
        self.target
    }

    pub fn source_index(&self) -> usize {
        self.source.index
    }

    pub fn target_index(&self) -> usize {
        self.target.index
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }
}

/// Full bipartite set of connections between a source and a target layer.
///
/// Connections are stored target-major, source-minor: index
/// `i * source_size + j` is the edge from source neuron `j` to target
/// neuron `i`. The incoming edges of any target neuron are therefore one
/// contiguous slice, and no adjacency lists are kept.
#[derive(Debug, Clone, PartialEq)]
pub struct ConnectionSet {
    source_size: usize,
    target_size: usize,
    connections: Vec<Connection>,
}

impl ConnectionSet {
    /// Draws every weight uniformly from [-1.0, 1.0] using `rng`.
    pub fn initialize<R: Rng + ?Sized>(
        source: LayerKind,
        target: LayerKind,
        source_size: usize,
        target_size: usize,
        rng: &mut R,
    ) -> ConnectionSet {
        let mut connections = Vec::with_capacity(source_size * target_size);
        for i in 0..target_size {
            for j in 0..source_size {
                connections.push(Connection {
                    source: NeuronId::new(source, j),
                    target: NeuronId::new(target, i),
                    weight: rng.gen_range(-1.0..=1.0),
                });
            }
        }

        ConnectionSet { source_size, target_size, connections }
    }

    /// Builds a set from pinned weights given in connection-index order.
    ///
    /// Fails if the count is not `source_size * target_size` or a weight is
    /// outside [-1.0, 1.0].
    pub fn from_weights(
        source: LayerKind,
        target: LayerKind,
        source_size: usize,
        target_size: usize,
        weights: &[f64],
    ) -> Result<ConnectionSet> {
        let expected = source_size * target_size;
        if weights.len() != expected {
            return Err(NetworkError::Configuration(format!(
                "{source}->{target} needs {expected} weights, got {}",
                weights.len()
            )));
        }
        if let Some((index, w)) = weights
            .iter()
            .enumerate()
            .find(|(_, w)| !(-1.0..=1.0).contains(*w))
        {
            return Err(NetworkError::Configuration(format!(
                "{source}->{target} weight {index} is {w}, outside [-1, 1]"
            )));
        }

        let connections = weights
            .iter()
            .enumerate()
            .map(|(index, &weight)| Connection {
                source: NeuronId::new(source, index % source_size),
                target: NeuronId::new(target, index / source_size),
                weight,
            })
            .collect();

        Ok(ConnectionSet { source_size, target_size, connections })
    }

    pub fn source_size(&self) -> usize {
        self.source_size
    }

    pub fn target_size(&self) -> usize {
        self.target_size
    }

    pub fn len(&self) -> usize {
        self.connections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.connections.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Connection> {
        self.connections.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Connection> {
        self.connections.iter()
    }

    pub fn index_of(&self, target: usize, source: usize) -> usize {
        target * self.source_size + source
    }

    /// All connections feeding target neuron `target`, ordered by source index.
    pub fn incoming(&self, target: usize) -> &[Connection] {
        let start = self.index_of(target, 0);
        &self.connections[start..start + self.source_size]
    }

    /// `Σ_j weight(target, j) * source_layer[j].activation`
    pub fn weighted_sum(&self, target: usize, source_layer: &Layer) -> f64 {
        self.incoming(target)
            .iter()
            .map(|c| c.weight * source_layer.activation(c.source.index))
            .sum()
    }

    pub fn weights(&self) -> Vec<f64> {
        self.connections.iter().map(Connection::weight).collect()
    }
}

impl<'a> IntoIterator for &'a ConnectionSet {
    type Item = &'a Connection;
    type IntoIter = std::slice::Iter<'a, Connection>;

    fn into_iter(self) -> Self::IntoIter {
        self.connections.iter()
    }
}
