use serde::Serialize;

use crate::error::Result;
use crate::layers::{Layer, LayerKind};
use crate::network::connection::ConnectionSet;
use crate::network::network::Network;
use crate::network::topology::Topology;

/// Owned, read-only copy of a network's state after a propagation call.
///
/// Renderers consume this instead of borrowing the network, so a host can
/// hand frames to another thread while the network keeps running. Snapshots
/// are one-way: nothing turns them back into a `Network`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NetworkSnapshot {
    pub topology: Topology,
    /// Input, hidden, output, in that order.
    pub layers: Vec<LayerSnapshot>,
    /// Input→hidden, then hidden→output.
    pub connections: Vec<ConnectionSetSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayerSnapshot {
    pub kind: LayerKind,
    pub activations: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConnectionSetSnapshot {
    pub source: LayerKind,
    pub target: LayerKind,
    /// Same order as the live set: `target_index * source_size + source_index`.
    pub edges: Vec<EdgeSnapshot>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EdgeSnapshot {
    pub source_index: usize,
    pub target_index: usize,
    pub weight: f64,
}

impl NetworkSnapshot {
    pub fn capture(network: &Network) -> NetworkSnapshot {
        NetworkSnapshot {
            topology: network.topology(),
            layers: vec![
                LayerSnapshot::capture(network.input_layer()),
                LayerSnapshot::capture(network.hidden_layer()),
                LayerSnapshot::capture(network.output_layer()),
            ],
            connections: vec![
                ConnectionSetSnapshot::capture(LayerKind::Input, LayerKind::Hidden, network.input_to_hidden()),
                ConnectionSetSnapshot::capture(LayerKind::Hidden, LayerKind::Output, network.hidden_to_output()),
            ],
        }
    }

    /// Per-layer activations, input first.
    pub fn activations(&self) -> Vec<Vec<f64>> {
        self.layers.iter().map(|l| l.activations.clone()).collect()
    }

    pub fn layer(&self, kind: LayerKind) -> Option<&LayerSnapshot> {
        self.layers.iter().find(|l| l.kind == kind)
    }

    /// Single-line JSON, one frame per line.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

impl LayerSnapshot {
    fn capture(layer: &Layer) -> LayerSnapshot {
        LayerSnapshot { kind: layer.kind(), activations: layer.activations() }
    }
}

impl ConnectionSetSnapshot {
    fn capture(source: LayerKind, target: LayerKind, set: &ConnectionSet) -> ConnectionSetSnapshot {
        let edges = set
            .iter()
            .map(|c| EdgeSnapshot {
                source_index: c.source_index(),
                target_index: c.target_index(),
                weight: c.weight(),
            })
            .collect();
        ConnectionSetSnapshot { source, target, edges }
    }
}
