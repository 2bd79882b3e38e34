use anyhow::{Context, Result};
use clap::Parser;
use conatus_actor::GoalSelector;
use conatus_core::{ConatusConfig, SignalSource};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod synthetic;

use synthetic::SyntheticSource;

#[derive(Parser, Debug)]
#[command(name = "conatus", author, version, about, long_about = None)]
struct Args {
    /// Path to the TOML config file
    #[arg(short, long, default_value = "conatus.toml", env = "CONATUS_CONFIG")]
    config: PathBuf,

    /// Number of addressable features (overrides config)
    #[arg(short = 'n', long)]
    features: Option<usize>,

    /// Number of steps to run (overrides config)
    #[arg(short, long)]
    steps: Option<u64>,

    /// Seed for tie-breaking and synthetic signals (overrides config)
    #[arg(long)]
    seed: Option<u64>,

    /// Print one JSON goal snapshot per step instead of text
    #[arg(long)]
    json: bool,

    /// Emit logs as JSON
    #[arg(long)]
    log_json: bool,
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    // Logs go to stderr so stdout stays machine-readable.
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.log_json);

    let mut config = ConatusConfig::load_or_default(&args.config);
    if let Some(n) = args.features {
        config.run.n_features = n;
    }
    if let Some(steps) = args.steps {
        config.run.steps = steps;
    }
    if args.seed.is_some() {
        config.run.seed = args.seed;
    }

    let mut selector = GoalSelector::with_config(config.run.n_features, &config.actor);
    let (mut rng, source_rng) = match config.run.seed {
        Some(seed) => (
            StdRng::seed_from_u64(seed),
            StdRng::seed_from_u64(seed.wrapping_add(1)),
        ),
        None => (StdRng::from_entropy(), StdRng::from_entropy()),
    };
    let mut source = SyntheticSource::new(selector.size(), source_rng);

    info!(
        "Running {} steps: {} features, {} slots, decay_rate={}, source={}",
        config.run.steps,
        selector.n_features(),
        selector.size(),
        selector.decay_rate(),
        source.name(),
    );

    for step in 0..config.run.steps {
        let observation = source.observe(step)?;
        let signals = source.candidates(step)?;
        let choice = selector
            .step(&observation, &signals, &mut rng)
            .with_context(|| format!("Goal selection failed at step {}", step))?;

        if args.json {
            println!("{}", serde_json::to_string(&selector.snapshot())?);
        } else {
            let outstanding: f32 = selector.activation().iter().sum();
            println!(
                "step {:>5}: goal {:>3}  outstanding={:.3}",
                step, choice.index, outstanding
            );
        }
    }

    info!("Done after {} steps", selector.steps());
    Ok(())
}
