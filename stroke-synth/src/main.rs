//! Stroke Synth - sigma-lognormal pointer trajectory synthesis
//!
//! Generates human-like pointer movements and serializes them as compact
//! event logs.

use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io::Read;
use std::path::{Path, PathBuf};
use stroke_synth::app::cli::{Cli, Commands, ConfigAction};
use stroke_synth::app::config::Config;
use stroke_synth::plan::{Point, StrokePlan, Targets};
use stroke_synth::service::{GenerationRequest, SynthesisService};
use stroke_synth::workflow::{synthesize_batch, BatchSpec, MovementSet};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    // Parse CLI arguments first so we can use --verbose to set log level
    let cli = Cli::parse_args();

    // Initialize tracing (--verbose enables debug-level output)
    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    // Load config
    let config = if let Some(path) = &cli.config {
        Config::load(path)?
    } else {
        Config::load_default()?
    };

    // Execute command
    match cli.command {
        Commands::Generate {
            duration,
            x0,
            y0,
            strokes,
            targets_x,
            targets_y,
            seed,
            json,
            output,
        } => {
            let targets = Targets::from_axes(
                Cli::target_axis(&targets_x),
                Cli::target_axis(&targets_y),
                strokes,
            )?;
            let plan = StrokePlan::with_settings(Some(duration), Point::new(x0, y0), strokes, targets, config.plan)?;
            run_generate(&plan, seed.or(config.seed), json, output.as_deref(), &config)?;
        }
        Commands::Batch {
            count,
            workers,
            duration,
            strokes,
            origin_min,
            origin_max,
            seed,
            output,
        } => {
            let spec = BatchSpec {
                count,
                duration,
                strokes,
                origin_range: (origin_min, origin_max),
                seed: seed.or(config.seed),
            };
            run_batch(&spec, workers, output, &config)?;
        }
        Commands::Inspect { input, movement } => {
            run_inspect(&input, movement)?;
        }
        Commands::Handle { input } => {
            run_handle(input.as_deref(), &config)?;
        }
        Commands::Init { force } => {
            run_init(force, &config)?;
        }
        Commands::Config { action } => {
            run_config(action, &config)?;
        }
    }

    Ok(())
}

fn rng_for(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

fn run_generate(
    plan: &StrokePlan,
    seed: Option<u64>,
    json: bool,
    output: Option<&Path>,
    config: &Config,
) -> anyhow::Result<()> {
    let mut rng = rng_for(seed);
    let synthesis = match config.synthesizer().synthesize(plan, &mut rng) {
        Ok(synthesis) => synthesis,
        Err(e) => {
            if let Some(state) = e.diagnostic_state() {
                error!("Solver state at failure:\n{}", state.to_json_pretty()?);
            }
            return Err(e.into());
        }
    };

    let rendered = if json {
        serde_json::to_string_pretty(&synthesis)?
    } else {
        synthesis.sensor_data()
    };

    match output {
        Some(path) => {
            std::fs::write(path, rendered)?;
            info!(
                samples = synthesis.path.len(),
                "Wrote movement to {}",
                path.display()
            );
        }
        None => println!("{}", rendered),
    }

    Ok(())
}

fn run_batch(spec: &BatchSpec, workers: Option<usize>, output: Option<PathBuf>, config: &Config) -> anyhow::Result<()> {
    let output = output.unwrap_or_else(|| {
        PathBuf::from(format!(
            "movements_{}.json",
            chrono::Local::now().format("%Y%m%d_%H%M%S")
        ))
    });
    let name = output
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "movements".to_string());

    // Zero threads lets rayon pick the available parallelism
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers.unwrap_or(0))
        .build()?;
    let synthesizer = config.synthesizer();
    let set = pool.install(|| synthesize_batch(&synthesizer, config.plan, spec, name))?;
    set.save(&output)?;

    println!(
        "Wrote {} movements ({} failed) to {}",
        set.metadata.movement_count,
        set.metadata.failed_count,
        output.display()
    );

    Ok(())
}

fn run_inspect(input: &Path, movement: Option<usize>) -> anyhow::Result<()> {
    let set = MovementSet::load(input)?;

    if let Some(index) = movement {
        let Some(selected) = set.movements.get(index) else {
            anyhow::bail!("Movement {} not found; the set holds {}", index, set.len());
        };
        println!("{}", selected.sensor_data);
        return Ok(());
    }

    let metadata = &set.metadata;
    println!("Movement set: {} ({})", metadata.name, metadata.id);
    println!("  Format version: {}", metadata.format_version);
    println!("  Created: {}", metadata.created_at);
    if let Some(completed) = metadata.completed_at {
        println!("  Completed: {}", completed);
    }
    if let Some(seed) = metadata.seed {
        println!("  Seed: {}", seed);
    }
    println!(
        "  Movements: {} ({} failed)",
        metadata.movement_count, metadata.failed_count
    );
    for (index, m) in set.movements.iter().enumerate() {
        println!(
            "  [{}] origin ({:.1}, {:.1}), {} samples, peak {:.1} px/s",
            index,
            m.origin.x,
            m.origin.y,
            m.synthesis.path.len(),
            m.synthesis.path.peak_velocity()
        );
    }

    Ok(())
}

fn run_handle(input: Option<&Path>, config: &Config) -> anyhow::Result<()> {
    let content = match input {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };
    let request: GenerationRequest = serde_json::from_str(&content)?;

    let service = SynthesisService::new(config.service.clone(), config.plan, config.synthesizer());
    let response = service.handle(&request);
    println!("{}", serde_json::to_string_pretty(&response)?);

    Ok(())
}

fn run_init(force: bool, config: &Config) -> anyhow::Result<()> {
    let config_path = Config::default_path();

    if config_path.exists() && !force {
        anyhow::bail!(
            "Config already exists at {:?}. Use --force to overwrite.",
            config_path
        );
    }

    config.save_default()?;
    println!("Created config at {:?}", config_path);
    println!("\nConfig content:\n{}", config.to_toml()?);

    if config.service.auth_token.is_none() {
        println!("\nNo service.auth_token set: 'handle' will deny every request until one is configured.");
    }

    Ok(())
}

fn run_config(action: ConfigAction, config: &Config) -> anyhow::Result<()> {
    match action {
        ConfigAction::Show => {
            let toml_str = config.to_toml()?;
            println!("Configuration ({:?}):\n", Config::default_path());
            println!("{}", toml_str);
        }
        ConfigAction::Get { key } => match config.get(&key)? {
            Some(value) => println!("{} = {}", key, value),
            None => anyhow::bail!("Configuration key '{}' not found", key),
        },
        ConfigAction::Reset { force } => {
            let config_path = Config::default_path();

            if config_path.exists() && !force {
                println!("Config exists at {:?}", config_path);
                println!("Use --force to reset to defaults");
                return Ok(());
            }

            Config::default().save_default()?;
            println!("Configuration reset to defaults at {:?}", config_path);
        }
    }

    Ok(())
}
