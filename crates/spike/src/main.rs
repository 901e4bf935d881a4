use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use verdigris_core::config::WorldConfig;
use verdigris_core::world::World;

const WARMUP_STEPS: usize = 10;
const BENCHMARK_STEPS: usize = 200;

#[derive(Parser)]
#[command(name = "verdigris")]
#[command(about = "Copper-creature oxidation simulation CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a headless simulation from a config file
    Run {
        /// Path to config file (JSON)
        #[arg(long)]
        config: PathBuf,

        /// Output directory for the run summary (optional)
        #[arg(long)]
        out: Option<PathBuf>,

        /// Number of simulation steps to run
        #[arg(long, default_value_t = 10_000)]
        steps: usize,
    },
    /// Run the step-throughput benchmark suite
    Benchmark,
    /// Dump the default configuration to stdout
    DumpDefaultConfig,
}

fn run_benchmark(num_creatures: usize, seed: u64) -> Result<()> {
    let config = WorldConfig {
        num_creatures,
        seed,
        ambient_tick_chance: 1.0,
        ..WorldConfig::default()
    };
    config.validate().context("benchmark config invalid")?;
    let mut world = World::new(config).context("failed to initialize world")?;

    for _ in 0..WARMUP_STEPS {
        world.step();
    }

    let mut total_movement = 0u64;
    let mut total_spatial = 0u64;
    let mut total_contagion = 0u64;
    let mut total_time = 0u64;
    for _ in 0..BENCHMARK_STEPS {
        let timings = world.step();
        total_movement += timings.movement_us;
        total_spatial += timings.spatial_build_us;
        total_contagion += timings.contagion_us;
        total_time += timings.total_us;
    }

    let avg_step_us = total_time as f64 / BENCHMARK_STEPS as f64;
    let steps_per_sec = 1_000_000.0 / avg_step_us.max(f64::MIN_POSITIVE);
    println!("--- {num_creatures} creatures ---");
    println!("  Avg step:  {avg_step_us:.0} us ({steps_per_sec:.1} steps/sec)");
    println!(
        "  Breakdown: movement={:.0} us, spatial={:.0} us, contagion={:.0} us",
        total_movement as f64 / BENCHMARK_STEPS as f64,
        total_spatial as f64 / BENCHMARK_STEPS as f64,
        total_contagion as f64 / BENCHMARK_STEPS as f64,
    );
    println!();
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::DumpDefaultConfig => {
            let config = WorldConfig::default();
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
        Commands::Benchmark => {
            if cfg!(debug_assertions) {
                eprintln!("WARNING: running in debug mode. Results are not representative.");
                eprintln!("         Use: cargo run -p verdigris-cli --release -- benchmark");
                eprintln!();
            }
            for num_creatures in [16, 256, 2048, 16_384] {
                run_benchmark(num_creatures, 42)?;
            }
        }
        Commands::Run { config, out, steps } => {
            let file = File::open(&config).context("failed to open config file")?;
            let reader = BufReader::new(file);
            let world_config: WorldConfig =
                serde_json::from_reader(reader).context("failed to parse config")?;
            world_config.validate().context("config validation error")?;

            println!("Loaded config from {:?}", config);
            println!(
                "Simulating {} creatures for {} steps...",
                world_config.num_creatures, steps
            );

            let mut world = World::new(world_config).context("failed to initialize world")?;
            let summary = world.run(steps);

            if let Some(out_dir) = out {
                std::fs::create_dir_all(&out_dir).context("failed to create output directory")?;
                let summary_path = out_dir.join("summary.json");
                let file = File::create(&summary_path).context("failed to create summary file")?;
                serde_json::to_writer_pretty(file, &summary).context("failed to write summary")?;
                println!("Run complete. Summary saved to {:?}", summary_path);
            } else {
                println!(
                    "Run complete. Stages [unaffected, exposed, weathered, oxidized]: {:?}",
                    summary.stage_counts
                );
                println!(
                    "Dormant: {}, waxed: {}",
                    summary.dormant_count, summary.waxed_count
                );
            }
        }
    }
    Ok(())
}
