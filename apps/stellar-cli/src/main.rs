use clap::{Parser, Subcommand};
use std::path::PathBuf;
use stellar_common::PlanetBranch;
use stellar_kernel::{LinearGravity, SpawnOrigin};
use stellar_mutation::MutationCatalog;
use stellar_progression::{GameConfig, ProgressionCoordinator, RecordingUi};
use stellar_tools::RegistryInspector;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "stellar-cli", about = "Headless driver for the stellar progression core")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print crate versions
    Info,
    /// List the stock mutation catalog
    Catalog,
    /// Seed a world and run population maintenance
    Simulate {
        /// Number of ticks to run
        #[arg(short, long, default_value = "600")]
        ticks: u64,
        /// Seconds per tick
        #[arg(long, default_value = "0.016")]
        dt: f32,
        /// RNG seed (overrides the config file)
        #[arg(short, long)]
        seed: Option<u64>,
        /// YAML or JSON config file
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Destroy the oldest environmental body every N ticks (0 = never)
        #[arg(long, default_value = "0")]
        destroy_every: u64,
    },
    /// Offer mutations to the player and accept the first one
    Offer {
        /// RNG seed
        #[arg(short, long, default_value = "42")]
        seed: u64,
        /// Commit the player to a branch first (frost or war)
        #[arg(short, long)]
        branch: Option<PlanetBranch>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Info => {
            println!("stellar-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("kernel: {}", stellar_kernel::crate_info());
            println!("mutation: {}", stellar_mutation::crate_info());
            println!("population: {}", stellar_population::crate_info());
            println!("progression: {}", stellar_progression::crate_info());
            println!("tools: {}", stellar_tools::crate_info());
        }
        Commands::Catalog => {
            let catalog = MutationCatalog::standard();
            for (id, m) in catalog.iter() {
                println!("{:>2} {:<18} {:<16} {}", id.0, m.name, m.category, m.description);
            }
        }
        Commands::Simulate {
            ticks,
            dt,
            seed,
            config,
            destroy_every,
        } => {
            let mut game = match config {
                Some(path) => GameConfig::load(&path)?,
                None => GameConfig::default(),
            };
            if seed.is_some() {
                game.seed = seed;
            }

            let mut coordinator = ProgressionCoordinator::from_config(game)?
                .with_derive_hook(Box::new(LinearGravity::default()));
            let startup = coordinator.start();
            println!(
                "Startup: player={}, seeded={}",
                startup.player.is_some(),
                startup.seeded
            );

            let mut spawned = 0;
            let mut pruned = 0;
            let mut events = coordinator.drain_events().len();
            for tick in 1..=ticks {
                if destroy_every > 0 && tick % destroy_every == 0 {
                    let victim = coordinator
                        .registry()
                        .iter()
                        .find(|(_, b)| b.origin != SpawnOrigin::Player)
                        .map(|(h, _)| h);
                    if let Some(victim) = victim {
                        coordinator.notify_destroyed(victim);
                    }
                }
                let report = coordinator.tick(dt);
                spawned += report.spawned();
                pruned += report.pruned;
                events += coordinator.drain_events().len();
            }

            tracing::debug!(ticks, spawned, pruned, events, "simulation finished");
            let registry = coordinator.registry();
            println!(
                "Ran {ticks} ticks ({:.1}s): spawned={spawned}, pruned={pruned}",
                coordinator.maintainer().elapsed()
            );
            println!("{}", RegistryInspector::summary(registry));
            for (origin, count) in RegistryInspector::census(registry) {
                println!("  {origin:?}: {count}");
            }
            for handle in RegistryInspector::heaviest(registry, 3) {
                if let Some(info) = RegistryInspector::inspect_body(registry, handle) {
                    println!("  {info}");
                }
            }
        }
        Commands::Offer { seed, branch } => {
            let game = GameConfig {
                seed: Some(seed),
                ..GameConfig::default()
            };
            let mut coordinator = ProgressionCoordinator::from_config(game)?
                .with_ui(Box::new(RecordingUi::new()));
            coordinator.start();
            let player = coordinator
                .player()
                .ok_or_else(|| anyhow::anyhow!("no player was spawned"))?;

            if let Some(branch) = branch {
                coordinator.request_branch_selection(player);
                coordinator.assign_branch(player, branch)?;
            }
            if let Some(info) = RegistryInspector::inspect_body(coordinator.registry(), player) {
                println!("Before: {info}");
            }

            let offered = coordinator.request_mutation_selection(player);
            for id in &offered {
                if let Some(m) = coordinator.catalog().get(*id) {
                    println!("  offer {:>2}: {} ({}) - {}", id.0, m.name, m.category, m.description);
                }
            }

            match offered.first() {
                Some(&choice) => {
                    coordinator.accept_mutation(player, choice)?;
                    if let Some(info) =
                        RegistryInspector::inspect_body(coordinator.registry(), player)
                    {
                        println!("After:  {info}");
                    }
                }
                None => println!("No mutations available"),
            }
        }
    }

    Ok(())
}
