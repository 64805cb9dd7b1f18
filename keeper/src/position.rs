//! Paper-mode positions driven by the keeper

use crate::config::{tokens_to_wad, PositionConfig};
use crate::snapshot::PositionSnapshot;
use anyhow::{Context, Result};
use looper_sim::{SimLendingMarket, SimSwap};
use looper_strategy::{Address, LendingAdapter, LeverageStrategy, Roles};

pub type PaperStrategy = LeverageStrategy<SimLendingMarket, SimSwap>;

pub struct ManagedPosition {
    pub name: String,
    pub strategy: PaperStrategy,
    pub interest_bps_per_cycle: u128,
}

impl ManagedPosition {
    /// Build a position, deploying the configured deposit unless a snapshot
    /// restores an existing one
    pub fn open(
        config: &PositionConfig,
        keeper: &Address,
        snapshot: Option<&PositionSnapshot>,
    ) -> Result<Self> {
        let mut market = SimLendingMarket::new(format!("{}-market", config.name), config.market_config());
        let swap = SimSwap::new(market.oracle_price(), config.market.swap_fee_bps as u128);

        let last_tend = snapshot.map(|s| s.last_tend_timestamp).unwrap_or(0);
        if let Some(snapshot) = snapshot {
            market.set_position(snapshot.collateral, snapshot.debt);
        }

        // paper mode: keeper doubles as management and emergency admin
        let roles = Roles::new(keeper.clone(), keeper.clone(), keeper.clone());
        let mut strategy = LeverageStrategy::new(
            market,
            swap,
            roles,
            config.leverage_params(),
            config.runtime_limits(last_tend),
        )
        .context(format!("Invalid configuration for position {}", config.name))?;

        match snapshot {
            Some(snapshot) => {
                strategy.receive_asset(snapshot.idle_assets);
                log::info!(
                    "Restored {}: collateral {} debt {}",
                    config.name,
                    snapshot.collateral,
                    snapshot.debt
                );
            }
            None => {
                let deposit = tokens_to_wad(config.deposit);
                strategy.receive_asset(deposit);
                strategy
                    .deploy_funds(deposit)
                    .context(format!("Failed to deploy deposit for {}", config.name))?;
                log::info!("Opened {} with deposit {}", config.name, deposit);
            }
        }

        Ok(Self {
            name: config.name.clone(),
            strategy,
            interest_bps_per_cycle: config.market.interest_bps_per_cycle as u128,
        })
    }

    /// Advance the simulated market by one poll
    pub fn accrue(&mut self) {
        if self.interest_bps_per_cycle > 0 {
            self.strategy.lending_mut().accrue_interest(self.interest_bps_per_cycle);
        }
    }

    pub fn snapshot(&self) -> PositionSnapshot {
        PositionSnapshot {
            name: self.name.clone(),
            collateral: self.strategy.lending().collateral_balance(),
            debt: self.strategy.lending().debt(),
            idle_assets: self.strategy.idle_assets(),
            last_tend_timestamp: self.strategy.limits().last_tend_timestamp,
        }
    }
}
