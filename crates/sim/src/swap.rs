//! Simulated swap venue
//!
//! Fills at a fixed price less a fee, with unlimited depth.

use looper_strategy::{AdapterError, Checkpoint, ConversionAdapter};
use model_leverage::math::{haircut_bps, BPS, WAD};
use model_leverage::{asset_to_collateral, collateral_to_asset};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SimSwap {
    /// Asset per collateral unit (WAD)
    pub price: u128,
    /// Fee taken from every output
    pub fee_bps: u128,
}

impl SimSwap {
    pub fn new(price: u128, fee_bps: u128) -> Self {
        Self { price, fee_bps }
    }

    /// Par venue: 1:1, no fee
    pub fn par() -> Self {
        Self::new(WAD, 0)
    }

    pub fn set_price(&mut self, price: u128) {
        self.price = price;
    }

    pub fn set_fee_bps(&mut self, fee_bps: u128) {
        self.fee_bps = fee_bps.min(BPS);
    }

    fn fill(&self, gross: u128, min_out: u128) -> Result<u128, AdapterError> {
        let out = haircut_bps(gross, self.fee_bps);
        if out < min_out {
            return Err(AdapterError::SlippageExceeded { min_out, out });
        }
        Ok(out)
    }
}

impl Checkpoint for SimSwap {
    type Snapshot = SimSwap;

    fn checkpoint(&self) -> Self::Snapshot {
        self.clone()
    }

    fn rollback(&mut self, snapshot: Self::Snapshot) {
        *self = snapshot;
    }
}

impl ConversionAdapter for SimSwap {
    fn convert_asset_to_collateral(&mut self, amount: u128, min_out: u128) -> Result<u128, AdapterError> {
        if amount == 0 {
            return Err(AdapterError::InvalidAmount);
        }
        self.fill(asset_to_collateral(amount, self.price), min_out)
    }

    fn convert_collateral_to_asset(&mut self, amount: u128, min_out: u128) -> Result<u128, AdapterError> {
        if amount == 0 {
            return Err(AdapterError::InvalidAmount);
        }
        self.fill(collateral_to_asset(amount, self.price), min_out)
    }
}
