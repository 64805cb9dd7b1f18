//! Looper Tend Keeper
//!
//! Off-chain service that polls leveraged positions, evaluates their tend
//! trigger and tends the most urgent ones first. Runs against the simulated
//! market in paper mode.

mod config;
mod health;
mod position;
mod priority_queue;
mod snapshot;

use anyhow::{Context, Result};
use config::Config;
use health::format_wad;
use looper_strategy::Address;
use position::ManagedPosition;
use priority_queue::TendQueue;
use std::collections::HashMap;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tokio::time;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Starting Looper Tend Keeper");

    if std::env::args().nth(1).as_deref() == Some("--write-default") {
        return Config::write_default("keeper-config.toml");
    }

    // Load configuration
    let config = Config::load().unwrap_or_else(|e| {
        log::warn!("Failed to load config ({}), using default paper config", e);
        Config::default_paper()
    });

    let keeper = Address::new(config.keeper.clone());
    let mut positions = open_positions(&config, &keeper)?;
    log::info!("Keeper {} managing {} positions", keeper, positions.len());

    let mut queue = TendQueue::new();
    let mut interval = time::interval(Duration::from_secs(config.poll_interval_secs));

    loop {
        interval.tick().await;

        if let Err(e) = process_tends(&mut queue, &mut positions, &config, &keeper) {
            log::error!("Error processing tends: {}", e);
        }

        if let Some(path) = &config.snapshot_path {
            let snapshots: Vec<_> = positions.values().map(ManagedPosition::snapshot).collect();
            if let Err(e) = snapshot::save(path, &snapshots) {
                log::error!("Failed to save snapshot: {:#}", e);
            }
        }

        if let Some(next) = queue.peek() {
            log::debug!("Tend queue size: {}, next: {} ({:?})", queue.len(), next.name, next.status);
        }
    }
}

/// Build every configured position, restoring from the snapshot when present
fn open_positions(config: &Config, keeper: &Address) -> Result<HashMap<String, ManagedPosition>> {
    let snapshots = match &config.snapshot_path {
        Some(path) => snapshot::load(path).context("Failed to load paper snapshot")?,
        None => Vec::new(),
    };

    let mut positions = HashMap::new();
    for position_config in &config.positions {
        let restored = snapshots.iter().find(|s| s.name == position_config.name);
        let position = ManagedPosition::open(position_config, keeper, restored)?;
        positions.insert(position.name.clone(), position);
    }
    Ok(positions)
}

fn unix_now() -> Result<u64> {
    let elapsed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .context("System clock before unix epoch")?;
    Ok(elapsed.as_secs())
}

/// Assess every position and tend the most urgent ones
fn process_tends(
    queue: &mut TendQueue,
    positions: &mut HashMap<String, ManagedPosition>,
    config: &Config,
    keeper: &Address,
) -> Result<()> {
    let now = unix_now()?;
    let gas_price = config.gas_price as u128;

    for position in positions.values_mut() {
        position.accrue();
        queue.push(health::assess(&position.name, &position.strategy, gas_price, now));
    }

    if queue.is_empty() {
        log::debug!("No positions need a tend");
        return Ok(());
    }

    log::info!("Found {} positions needing a tend", queue.len());

    let mut tended = 0;
    while tended < config.max_tends_per_cycle {
        let Some(health) = queue.pop() else {
            break;
        };
        let Some(position) = positions.get_mut(&health.name) else {
            continue;
        };

        log::info!(
            "Tending {} ({:?}, leverage {}, ltv {})",
            health.name,
            health.status,
            format_wad(health.leverage),
            format_wad(health.ltv)
        );

        match position.strategy.tend(keeper, now) {
            Ok(()) => {
                log::info!(
                    "Tended {}: leverage now {}",
                    health.name,
                    format_wad(position.strategy.current_leverage_ratio())
                );
            }
            Err(e) => {
                log::error!("Failed to tend {}: {}", health.name, e);
            }
        }
        tended += 1;
    }

    Ok(())
}
