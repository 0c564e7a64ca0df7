//! ferrite-ffn driver
//!
//! Feeds a rotating set of sample inputs through a 3-layer network and
//! redraws the weights on a schedule, printing one line (or one JSON frame)
//! per step for an external renderer to pick up.
//!
//! Run with:
//!   cargo run -- --steps 12 --seed 7
//!   cargo run -- --config driver.json --json

use std::process::ExitCode;

use clap::Parser;
use ferrite_ffn::{Driver, DriverConfig};

#[derive(Parser)]
#[command(name = "ferrite-ffn")]
#[command(version)]
#[command(about = "Drive a 3-layer sigmoid network with rotating sample inputs")]
struct Cli {
    /// Driver configuration file (JSON); defaults are used when omitted
    #[arg(short, long)]
    config: Option<String>,

    /// Number of steps to run
    #[arg(short, long)]
    steps: Option<usize>,

    /// Random seed for reproducible weights
    #[arg(long)]
    seed: Option<u64>,

    /// Redraw weights before every n-th step (0 = never)
    #[arg(long)]
    reinit_every: Option<usize>,

    /// Print each frame as a JSON line instead of a summary line
    #[arg(long)]
    json: bool,

    /// Write the effective configuration to this file and exit
    #[arg(long)]
    write_config: Option<String>,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = match &cli.config {
        Some(path) => DriverConfig::load_json(path)?,
        None => DriverConfig::default(),
    };
    if let Some(steps) = cli.steps {
        config.steps = steps;
    }
    if let Some(seed) = cli.seed {
        config.seed = Some(seed);
    }
    if let Some(every) = cli.reinit_every {
        config.reinit_every = every;
    }

    if let Some(path) = &cli.write_config {
        config.validate()?;
        config.save_json(path)?;
        log::info!("configuration written to {path}");
        return Ok(());
    }

    let mut driver = Driver::new(config)?;
    for _ in 0..driver.config().steps {
        let frame = driver.step()?;
        if cli.json {
            println!("{}", serde_json::to_string(&frame)?);
        } else {
            let marker = if frame.reinitialized { " *" } else { "" };
            println!(
                "step {:>3}  input {:?}  ->  output {:.4?}{}",
                frame.step, frame.input, frame.output, marker
            );
        }
    }

    Ok(())
}
