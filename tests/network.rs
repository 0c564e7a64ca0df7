//! End-to-end checks of the public network API.

use ferrite_ffn::{sigmoid, LayerKind, Network, NetworkError, Neuron, NeuronId, Topology};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn all_activations(net: &Network) -> Vec<Vec<f64>> {
    [LayerKind::Input, LayerKind::Hidden, LayerKind::Output]
        .iter()
        .map(|&kind| net.layer(kind).activations())
        .collect()
}

#[test]
fn test_clamping_invariant() {
    let mut neuron = Neuron::new(NeuronId::new(LayerKind::Hidden, 0));
    let mut rng = StdRng::seed_from_u64(2024);

    for _ in 0..1000 {
        let v: f64 = rng.gen_range(-1e6..1e6);
        neuron.set_activation(v);
        let a = neuron.activation();
        assert!((0.0..=1.0).contains(&a), "set_activation({v}) stored {a}");
    }

    neuron.set_activation(5.0);
    assert_eq!(neuron.activation(), 1.0);
    neuron.set_activation(-3.0);
    assert_eq!(neuron.activation(), 0.0);
    neuron.set_activation(0.4);
    assert_eq!(neuron.activation(), 0.4);
}

#[test]
fn test_connection_cardinality() {
    let mut net = Network::new(2, 3, 1).unwrap();
    net.create_connections();

    assert_eq!(net.input_to_hidden().len(), 6);
    assert_eq!(net.hidden_to_output().len(), 3);
    for c in net.input_to_hidden().iter().chain(net.hidden_to_output().iter()) {
        assert!((-1.0..=1.0).contains(&c.weight()));
    }
}

#[test]
fn test_unit_weights_are_deterministic() {
    let topology = Topology::new(2, 3, 1).unwrap();
    let mut net = Network::with_weights(topology, &[1.0; 6], &[1.0; 3]).unwrap();

    let first = net.feed_forward(&[0.2, 0.8]).unwrap();
    let hidden = sigmoid(1.0);
    for a in net.hidden_layer().activations() {
        assert!((a - hidden).abs() < 1e-6);
    }
    assert!((first[0] - sigmoid(3.0 * hidden)).abs() < 1e-6);

    let second = net.feed_forward(&[0.2, 0.8]).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_input_size_validation() {
    let mut net = Network::new(2, 3, 1).unwrap();
    net.feed_forward(&[0.5, 0.3]).unwrap();
    let before = all_activations(&net);

    match net.feed_forward(&[0.1]) {
        Err(NetworkError::InputSizeMismatch { expected, actual }) => {
            assert_eq!((expected, actual), (2, 1));
        }
        other => panic!("expected InputSizeMismatch, got {other:?}"),
    }
    assert_eq!(all_activations(&net), before);

    // Recoverable: a corrected input goes through.
    assert!(net.feed_forward(&[0.1, 0.9]).is_ok());
}

#[test]
fn test_reinitialization_independence() {
    let mut net = Network::new(2, 3, 1).unwrap();
    net.feed_forward(&[0.7, 0.9]).unwrap();
    let activations = all_activations(&net);

    net.create_connections();
    let first = (net.input_to_hidden().clone(), net.hidden_to_output().clone());
    net.create_connections();
    let second = (net.input_to_hidden().clone(), net.hidden_to_output().clone());

    assert_eq!(first.0.len(), second.0.len());
    assert_eq!(first.1.len(), second.1.len());
    for (a, b) in first.0.iter().zip(second.0.iter()) {
        assert_eq!((a.source(), a.target()), (b.source(), b.target()));
    }
    assert_ne!(first.0.weights(), second.0.weights());
    assert_eq!(all_activations(&net), activations);
}

#[test]
fn test_output_bounds() {
    let mut rng = StdRng::seed_from_u64(17);
    for _ in 0..50 {
        let topology = Topology::new(rng.gen_range(1..8), rng.gen_range(1..8), rng.gen_range(1..8)).unwrap();
        let mut net = Network::with_rng(topology, &mut rng).unwrap();
        let input: Vec<f64> = (0..topology.input_size).map(|_| rng.gen_range(-2.0..2.0)).collect();

        let output = net.feed_forward(&input).unwrap();
        assert_eq!(output.len(), topology.output_size);
        assert!(output.iter().all(|&y| y > 0.0 && y < 1.0), "{output:?}");
    }
}

#[test]
fn test_seeded_networks_match() {
    let topology = Topology::new(3, 4, 2).unwrap();
    let mut a = Network::with_rng(topology, &mut StdRng::seed_from_u64(8)).unwrap();
    let mut b = Network::with_rng(topology, &mut StdRng::seed_from_u64(8)).unwrap();

    assert_eq!(a.input_to_hidden(), b.input_to_hidden());
    assert_eq!(
        a.feed_forward(&[0.1, 0.2, 0.3]).unwrap(),
        b.feed_forward(&[0.1, 0.2, 0.3]).unwrap()
    );
}

#[test]
fn test_snapshot_edges_rederive_neighbours() {
    let mut net = Network::new(3, 2, 2).unwrap();
    net.feed_forward(&[0.3, 0.6, 0.9]).unwrap();
    let snap = net.snapshot();

    let source_size = snap.topology.input_size;
    for (index, edge) in snap.connections[0].edges.iter().enumerate() {
        assert_eq!(index, edge.target_index * source_size + edge.source_index);
    }
    assert_eq!(snap.layer(LayerKind::Output).unwrap().activations, net.output_layer().activations());
}
