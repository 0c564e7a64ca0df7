use serde::{Deserialize, Serialize};

use crate::error::{NetworkError, Result};

/// Layer sizes of the fixed input → hidden → output network.
///
/// Fields:
/// - `input_size` : number of values `feed_forward` accepts
/// - `hidden_size`: neurons in the single hidden layer
/// - `output_size`: number of values `feed_forward` returns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topology {
    pub input_size: usize,
    pub hidden_size: usize,
    pub output_size: usize,
}

impl Topology {
    /// Builds and validates a topology; every size must be at least 1.
    pub fn new(input_size: usize, hidden_size: usize, output_size: usize) -> Result<Topology> {
        let topology = Topology { input_size, hidden_size, output_size };
        topology.validate()?;
        Ok(topology)
    }

    pub fn validate(&self) -> Result<()> {
        let sizes = [
            ("input", self.input_size),
            ("hidden", self.hidden_size),
            ("output", self.output_size),
        ];
        for (name, size) in sizes {
            if size == 0 {
                return Err(NetworkError::Configuration(format!(
                    "{name} layer size must be at least 1"
                )));
            }
        }
        Ok(())
    }

    pub fn input_to_hidden_len(&self) -> usize {
        self.input_size * self.hidden_size
    }

    pub fn hidden_to_output_len(&self) -> usize {
        self.hidden_size * self.output_size
    }
}

impl Default for Topology {
    /// The 2-3-1 network the demo driver runs.
    fn default() -> Self {
        Topology { input_size: 2, hidden_size: 3, output_size: 1 }
    }
}
