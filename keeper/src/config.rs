//! Keeper configuration
//!
//! Amounts are whole tokens and ratios are basis points so the file stays
//! readable; they are scaled to WAD when a position is built.

use anyhow::{Context, Result};
use looper_sim::MarketConfig;
use looper_strategy::{DepositorPolicy, LeverageParams, RuntimeLimits};
use model_leverage::math::{mul_div, BPS, WAD};
use model_leverage::UNBOUNDED;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Identity the keeper signs tends with
    pub keeper: String,

    /// Polling interval in seconds
    pub poll_interval_secs: u64,

    /// Host execution cost reported to the tend trigger
    pub gas_price: u64,

    /// Maximum tends executed per poll
    pub max_tends_per_cycle: usize,

    /// JSON file the paper-mode positions are restored from and saved to
    pub snapshot_path: Option<String>,

    pub positions: Vec<PositionConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PositionConfig {
    pub name: String,

    /// Initial deposit in whole asset tokens
    pub deposit: u64,

    pub target_leverage_bps: u64,
    pub leverage_buffer_bps: u64,
    pub max_leverage_bps: u64,

    pub slippage_bps: u64,
    pub min_tend_interval_secs: u64,
    pub max_gas_price_to_tend: u64,

    pub market: MarketSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketSettings {
    /// Asset per collateral unit in basis points
    pub price_bps: u64,
    pub liquidation_threshold_bps: u64,
    pub max_ltv_bps: u64,
    pub flash_premium_bps: u64,
    pub swap_fee_bps: u64,

    /// Debt growth applied every poll in paper mode
    pub interest_bps_per_cycle: u64,
}

/// Scale a basis point figure to WAD
pub fn bps_to_wad(bps: u64) -> u128 {
    mul_div(bps as u128, WAD, BPS)
}

/// Scale whole tokens to WAD-denominated native units
pub fn tokens_to_wad(tokens: u64) -> u128 {
    (tokens as u128).saturating_mul(WAD)
}

impl PositionConfig {
    pub fn leverage_params(&self) -> LeverageParams {
        LeverageParams::new(
            bps_to_wad(self.target_leverage_bps),
            bps_to_wad(self.leverage_buffer_bps),
            bps_to_wad(self.max_leverage_bps),
        )
    }

    pub fn runtime_limits(&self, last_tend_timestamp: u64) -> RuntimeLimits {
        RuntimeLimits {
            slippage_bps: self.slippage_bps as u128,
            max_gas_price_to_tend: self.max_gas_price_to_tend as u128,
            min_tend_interval: self.min_tend_interval_secs,
            last_tend_timestamp,
            depositors: DepositorPolicy::Open,
            ..RuntimeLimits::default()
        }
    }

    pub fn market_config(&self) -> MarketConfig {
        MarketConfig {
            price: bps_to_wad(self.market.price_bps),
            liquidation_threshold: bps_to_wad(self.market.liquidation_threshold_bps),
            max_ltv: bps_to_wad(self.market.max_ltv_bps),
            borrow_liquidity: UNBOUNDED,
            flash_liquidity: UNBOUNDED,
            flash_premium_bps: self.market.flash_premium_bps as u128,
            supply_cap: UNBOUNDED,
        }
    }
}

impl Config {
    /// Load configuration from TOML file
    pub fn load() -> Result<Self> {
        let config_path = std::env::var("LOOPER_KEEPER_CONFIG")
            .unwrap_or_else(|_| "keeper-config.toml".to_string());

        let config_str = std::fs::read_to_string(&config_path)
            .context(format!("Failed to read config file: {}", config_path))?;

        let config: Config = toml::from_str(&config_str)
            .context("Failed to parse config TOML")?;

        Ok(config)
    }

    /// One 3x position on a par market
    pub fn default_paper() -> Self {
        Self {
            keeper: "keeper".to_string(),
            poll_interval_secs: 5,
            gas_price: 10,
            max_tends_per_cycle: 4,
            snapshot_path: Some("~/.looper/paper-snapshot.json".to_string()),
            positions: vec![PositionConfig {
                name: "steth-eth-3x".to_string(),
                deposit: 100,
                target_leverage_bps: 30_000,
                leverage_buffer_bps: 2_500,
                max_leverage_bps: 50_000,
                slippage_bps: 50,
                min_tend_interval_secs: 60,
                max_gas_price_to_tend: 100,
                market: MarketSettings {
                    price_bps: 10_000,
                    liquidation_threshold_bps: 9_000,
                    max_ltv_bps: 8_500,
                    flash_premium_bps: 0,
                    swap_fee_bps: 0,
                    interest_bps_per_cycle: 5, // 0.05% per poll
                },
            }],
        }
    }

    /// Write default config to file
    pub fn write_default(path: &str) -> Result<()> {
        let config = Self::default_paper();
        let toml_str = toml::to_string_pretty(&config)
            .context("Failed to serialize config")?;

        std::fs::write(path, toml_str)
            .context(format!("Failed to write config to {}", path))?;

        log::info!("Created default config at {}", path);
        Ok(())
    }
}
