use log::{debug, info};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::error::{NetworkError, Result};
use crate::network::{Network, NetworkSnapshot, Topology};

/// Settings for a `Driver` run.
///
/// # Fields
/// - `topology`    : layer sizes of the driven network
/// - `samples`     : input vectors fed round-robin, one per step
/// - `steps`       : number of steps `run()` performs
/// - `reinit_every`: redraw all weights before every n-th step (never before
///                 step 0); `0` keeps the initial weights for the whole run
/// - `seed`        : RNG seed; `None` seeds from OS entropy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriverConfig {
    pub topology: Topology,
    pub samples: Vec<Vec<f64>>,
    pub steps: usize,
    pub reinit_every: usize,
    pub seed: Option<u64>,
}

impl Default for DriverConfig {
    fn default() -> Self {
        DriverConfig {
            topology: Topology::default(),
            samples: vec![vec![0.2, 0.8], vec![0.5, 0.3], vec![0.7, 0.9]],
            steps: 9,
            reinit_every: 1,
            seed: None,
        }
    }
}

impl DriverConfig {
    pub fn validate(&self) -> Result<()> {
        self.topology.validate()?;
        if self.samples.is_empty() {
            return Err(NetworkError::Configuration("at least one sample is required".into()));
        }
        if let Some((index, sample)) = self
            .samples
            .iter()
            .enumerate()
            .find(|(_, s)| s.len() != self.topology.input_size)
        {
            return Err(NetworkError::Configuration(format!(
                "sample {index} has {} values, input layer has {}",
                sample.len(),
                self.topology.input_size
            )));
        }
        Ok(())
    }

    /// Serializes the config to a pretty-printed JSON file.
    pub fn save_json(&self, path: &str) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Reads a config previously written by `save_json`. Missing fields take
    /// their default values.
    pub fn load_json(path: &str) -> Result<DriverConfig> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        Ok(serde_json::from_reader(reader)?)
    }
}

/// Result of one driver step.
#[derive(Debug, Clone, Serialize)]
pub struct Frame {
    pub step: usize,
    pub sample_index: usize,
    pub input: Vec<f64>,
    pub output: Vec<f64>,
    /// True when the weights were redrawn right before this step's forward pass.
    pub reinitialized: bool,
    pub snapshot: NetworkSnapshot,
}

/// Host loop around a `Network`: feeds the configured samples in rotation
/// and periodically redraws the weights.
pub struct Driver {
    config: DriverConfig,
    network: Network,
    rng: StdRng,
    step: usize,
}

impl Driver {
    pub fn new(config: DriverConfig) -> Result<Driver> {
        config.validate()?;
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let network = Network::with_rng(config.topology, &mut rng)?;
        info!(
            "network {}-{}-{} ready, {} samples",
            config.topology.input_size,
            config.topology.hidden_size,
            config.topology.output_size,
            config.samples.len()
        );

        Ok(Driver { config, network, rng, step: 0 })
    }

    pub fn config(&self) -> &DriverConfig {
        &self.config
    }

    pub fn network(&self) -> &Network {
        &self.network
    }

    /// Number of steps taken so far.
    pub fn steps_taken(&self) -> usize {
        self.step
    }

    pub fn step(&mut self) -> Result<Frame> {
        let step = self.step;
        let every = self.config.reinit_every;
        let reinitialized = every > 0 && step > 0 && step % every == 0;
        if reinitialized {
            self.network.create_connections_with(&mut self.rng);
            info!("step {step}: weights redrawn");
        }

        let sample_index = step % self.config.samples.len();
        let input = self.config.samples[sample_index].clone();
        let output = self.network.feed_forward(&input)?;
        debug!("step {step}: sample {sample_index} {input:?} -> {output:?}");

        self.step += 1;
        Ok(Frame {
            step,
            sample_index,
            input,
            output,
            reinitialized,
            snapshot: self.network.snapshot(),
        })
    }

    /// Runs `config.steps` steps and returns every frame.
    pub fn run(&mut self) -> Result<Vec<Frame>> {
        let frames = (0..self.config.steps)
            .map(|_| self.step())
            .collect::<Result<Vec<_>>>()?;
        info!("run finished after {} steps", frames.len());
        Ok(frames)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded(reinit_every: usize) -> DriverConfig {
        DriverConfig { reinit_every, seed: Some(99), ..DriverConfig::default() }
    }

    #[test]
    fn default_config_is_valid() {
        DriverConfig::default().validate().unwrap();
    }

    #[test]
    fn rejects_empty_samples() {
        let config = DriverConfig { samples: vec![], ..DriverConfig::default() };
        assert!(matches!(Driver::new(config), Err(NetworkError::Configuration(_))));
    }

    #[test]
    fn rejects_sample_of_wrong_width() {
        let config = DriverConfig {
            samples: vec![vec![0.1, 0.2], vec![0.3]],
            ..DriverConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("sample 1"));
    }

    #[test]
    fn samples_rotate_round_robin() {
        let mut driver = Driver::new(seeded(0)).unwrap();
        let frames = driver.run().unwrap();
        let order: Vec<usize> = frames.iter().map(|f| f.sample_index).collect();
        assert_eq!(order, vec![0, 1, 2, 0, 1, 2, 0, 1, 2]);
        assert_eq!(driver.steps_taken(), 9);
    }

    #[test]
    fn reinit_schedule_skips_first_step() {
        let mut driver = Driver::new(DriverConfig { steps: 7, ..seeded(3) }).unwrap();
        let flags: Vec<bool> = driver.run().unwrap().iter().map(|f| f.reinitialized).collect();
        assert_eq!(flags, vec![false, false, false, true, false, false, true]);
    }

    #[test]
    fn fixed_weights_repeat_outputs_per_sample() {
        let mut driver = Driver::new(seeded(0)).unwrap();
        let frames = driver.run().unwrap();
        assert_eq!(frames[0].output, frames[3].output);
        assert_eq!(frames[1].output, frames[7].output);
    }

    #[test]
    fn same_seed_same_run() {
        let a = Driver::new(seeded(1)).unwrap().run().unwrap();
        let b = Driver::new(seeded(1)).unwrap().run().unwrap();
        let outputs = |frames: &[Frame]| frames.iter().map(|f| f.output.clone()).collect::<Vec<_>>();
        assert_eq!(outputs(&a), outputs(&b));
    }

    #[test]
    fn frames_carry_post_propagation_snapshot() {
        let mut driver = Driver::new(seeded(1)).unwrap();
        let frame = driver.step().unwrap();
        assert_eq!(frame.snapshot.layers[0].activations, frame.input);
        assert_eq!(frame.snapshot.layers[2].activations, frame.output);
    }

    #[test]
    fn config_json_round_trip_through_file() {
        let path = std::env::temp_dir().join("ferrite_ffn_driver_config.json");
        let path = path.to_str().unwrap();
        let config = DriverConfig { steps: 4, seed: Some(5), ..DriverConfig::default() };
        config.save_json(path).unwrap();
        assert_eq!(DriverConfig::load_json(path).unwrap(), config);
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn partial_config_fills_defaults() {
        let config: DriverConfig = serde_json::from_str(r#"{"steps": 2}"#).unwrap();
        assert_eq!(config.steps, 2);
        assert_eq!(config.samples, DriverConfig::default().samples);
    }

    #[test]
    fn missing_config_file_is_io_error() {
        let err = DriverConfig::load_json("/nonexistent/ferrite-ffn.json").unwrap_err();
        assert!(matches!(err, NetworkError::Io(_)));
    }
}
