use std::process;

use clap::Parser;

use xornet::data::xor;
use xornet::{export, train_step, Config, Model, StepCounter};

/// Builds the configured XOR model, optionally trains it on random
/// truth-table batches, and exports the artifact.
#[derive(Parser, Debug)]
#[command(name = "xornet")]
struct Args {
    /// JSON configuration for the model, export directory and tags.
    #[arg(long)]
    config: String,

    /// Training steps to run before exporting; 0 exports the freshly
    /// initialized model.
    #[arg(long, default_value_t = 0)]
    steps: u64,

    /// Samples per training batch.
    #[arg(long, default_value_t = 5)]
    batch_size: usize,

    /// Log the training loss every this many steps.
    #[arg(long, default_value_t = 1000)]
    log_every: u64,
}

fn main() {
    env_logger::init();
    let args = Args::parse();
    if let Err(e) = run(&args) {
        eprintln!("error: {e}");
        let mut source = std::error::Error::source(&e);
        while let Some(s) = source {
            eprintln!("caused by: {s}");
            source = s.source();
        }
        process::exit(1);
    }
}

fn run(args: &Args) -> xornet::Result<()> {
    let config = Config::from_json(&args.config)?;

    let mut model = Model::build(&config.model, true)?;
    let counter = StepCounter::new();

    let mut rng = rand::thread_rng();
    for _ in 0..args.steps {
        let (inputs, labels) = xor::sample_batch(&mut rng, args.batch_size);
        let out = train_step(&mut model, &counter, &inputs, &labels)?;
        if args.log_every > 0 && out.step as u64 % args.log_every == 0 {
            log::info!("step: {}, loss: {:.6}", out.step, out.loss);
        }
    }

    export::export(&model.network, counter.read(), &config.export_dir, &config.tags)?;
    Ok(())
}
