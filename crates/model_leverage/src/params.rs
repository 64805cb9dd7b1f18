//! Leverage parameters and their validation

use crate::math::*;
use crate::position::implied_max_ltv;
use thiserror::Error;

/// Smallest non-zero leverage buffer (0.01x)
pub const MIN_LEVERAGE_BUFFER: u128 = WAD / 100;

/// Target / buffer / ceiling leverage, all WAD
///
/// `target == 0 && buffer == 0` is idle mode: the position should carry no debt.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LeverageParams {
    pub target_leverage_ratio: u128,
    pub leverage_buffer: u128,
    pub max_leverage_ratio: u128,
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamsError {
    #[error("buffer must be zero when target is zero")]
    BufferWithoutTarget,

    #[error("target leverage below 1x")]
    TargetBelowOne,

    #[error("leverage buffer below minimum granularity")]
    BufferTooSmall,

    #[error("leverage buffer must be smaller than target")]
    BufferNotBelowTarget,

    #[error("max leverage below target plus buffer")]
    MaxBelowUpperBound,

    #[error("max leverage implies LTV {implied_ltv} at or above liquidation threshold {liquidation_threshold}")]
    MaxAboveLiquidation {
        implied_ltv: u128,
        liquidation_threshold: u128,
    },
}

impl LeverageParams {
    pub fn new(target: u128, buffer: u128, max: u128) -> Self {
        Self {
            target_leverage_ratio: target,
            leverage_buffer: buffer,
            max_leverage_ratio: max,
        }
    }

    /// Idle mode: no leverage wanted
    pub fn is_idle(&self) -> bool {
        self.target_leverage_ratio == 0
    }

    /// Lower edge of the tolerance band
    pub fn lower_bound(&self) -> u128 {
        sub_u128(self.target_leverage_ratio, self.leverage_buffer)
    }

    /// Upper edge of the tolerance band
    pub fn upper_bound(&self) -> u128 {
        add_u128(self.target_leverage_ratio, self.leverage_buffer)
    }

    /// Check every invariant against a market liquidation threshold (WAD LTV)
    pub fn validate(&self, liquidation_threshold: u128) -> Result<(), ParamsError> {
        let target = self.target_leverage_ratio;
        let buffer = self.leverage_buffer;

        if target == 0 {
            if buffer != 0 {
                return Err(ParamsError::BufferWithoutTarget);
            }
        } else {
            if target < WAD {
                return Err(ParamsError::TargetBelowOne);
            }
            if buffer < MIN_LEVERAGE_BUFFER {
                return Err(ParamsError::BufferTooSmall);
            }
            if buffer >= target {
                return Err(ParamsError::BufferNotBelowTarget);
            }
        }

        if self.max_leverage_ratio < self.upper_bound() {
            return Err(ParamsError::MaxBelowUpperBound);
        }

        let implied_ltv = implied_max_ltv(self.max_leverage_ratio);
        if implied_ltv >= liquidation_threshold {
            return Err(ParamsError::MaxAboveLiquidation {
                implied_ltv,
                liquidation_threshold,
            });
        }

        Ok(())
    }
}
