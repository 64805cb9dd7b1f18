//! Simulated lending market
//!
//! Tracks one borrower: collateral, debt and the pools that back borrows and
//! flash borrows. Withdrawals and borrows are refused when the resulting LTV
//! would reach the borrow limit.

use looper_strategy::{AdapterError, Address, Checkpoint, FlashLoan, LendingAdapter};
use model_leverage::math::{add_u128, mul_div, mul_div_up, sub_u128, BPS, WAD};
use model_leverage::{ltv, UNBOUNDED};

/// Market settings used to build a [`SimLendingMarket`]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MarketConfig {
    pub price: u128,
    pub liquidation_threshold: u128,
    /// Highest LTV a borrow or withdrawal may leave behind (WAD)
    pub max_ltv: u128,
    /// Asset the market can lend through `borrow`
    pub borrow_liquidity: u128,
    /// Asset available to flash borrow
    pub flash_liquidity: u128,
    pub flash_premium_bps: u128,
    /// Total collateral the market accepts
    pub supply_cap: u128,
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            price: WAD,
            liquidation_threshold: 9 * WAD / 10,
            max_ltv: 85 * WAD / 100,
            borrow_liquidity: UNBOUNDED,
            flash_liquidity: UNBOUNDED,
            flash_premium_bps: 0,
            supply_cap: UNBOUNDED,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SimLendingMarket {
    id: Address,
    config: MarketConfig,
    collateral: u128,
    debt: u128,
    supply_paused: bool,
    borrow_paused: bool,
    outstanding_flash: Option<u128>,
}

impl SimLendingMarket {
    pub fn new(id: impl Into<String>, config: MarketConfig) -> Self {
        Self {
            id: Address::new(id),
            config,
            collateral: 0,
            debt: 0,
            supply_paused: false,
            borrow_paused: false,
            outstanding_flash: None,
        }
    }

    pub fn config(&self) -> &MarketConfig {
        &self.config
    }

    /// Oracle move; the swap venue is repriced separately
    pub fn set_price(&mut self, price: u128) {
        log::debug!("{}: price {} -> {}", self.id, self.config.price, price);
        self.config.price = price;
    }

    pub fn set_paused(&mut self, supply: bool, borrow: bool) {
        self.supply_paused = supply;
        self.borrow_paused = borrow;
    }

    pub fn set_flash_liquidity(&mut self, amount: u128) {
        self.config.flash_liquidity = amount;
    }

    pub fn set_borrow_liquidity(&mut self, amount: u128) {
        self.config.borrow_liquidity = amount;
    }

    pub fn set_supply_cap(&mut self, cap: u128) {
        self.config.supply_cap = cap;
    }

    /// Grow debt by `bps` of itself, rounding up
    pub fn accrue_interest(&mut self, bps: u128) {
        let interest = mul_div_up(self.debt, bps, BPS);
        self.debt = add_u128(self.debt, interest);
    }

    /// Force the position's balances, bypassing health checks
    pub fn set_position(&mut self, collateral: u128, debt: u128) {
        self.collateral = collateral;
        self.debt = debt;
    }

    fn ltv_after(&self, collateral: u128, debt: u128) -> u128 {
        ltv(mul_div(collateral, self.config.price, WAD), debt)
    }

    fn ensure_healthy(&self, collateral: u128, debt: u128) -> Result<(), AdapterError> {
        if debt == 0 {
            return Ok(());
        }
        let ltv = self.ltv_after(collateral, debt);
        if ltv >= self.config.max_ltv {
            return Err(AdapterError::Unhealthy {
                ltv,
                threshold: self.config.max_ltv,
            });
        }
        Ok(())
    }
}

impl Checkpoint for SimLendingMarket {
    type Snapshot = SimLendingMarket;

    fn checkpoint(&self) -> Self::Snapshot {
        self.clone()
    }

    fn rollback(&mut self, snapshot: Self::Snapshot) {
        *self = snapshot;
    }
}

impl LendingAdapter for SimLendingMarket {
    fn id(&self) -> &Address {
        &self.id
    }

    fn collateral_balance(&self) -> u128 {
        self.collateral
    }

    fn debt(&self) -> u128 {
        self.debt
    }

    fn oracle_price(&self) -> u128 {
        self.config.price
    }

    fn liquidation_threshold(&self) -> u128 {
        self.config.liquidation_threshold
    }

    fn is_supply_paused(&self) -> bool {
        self.supply_paused
    }

    fn is_borrow_paused(&self) -> bool {
        self.borrow_paused
    }

    fn max_collateral_capacity(&self) -> u128 {
        if self.supply_paused {
            return 0;
        }
        sub_u128(self.config.supply_cap, self.collateral)
    }

    fn max_borrow_capacity(&self) -> u128 {
        if self.borrow_paused {
            return 0;
        }
        self.config.borrow_liquidity
    }

    fn max_flash_borrow(&self) -> u128 {
        if self.outstanding_flash.is_some() {
            return 0;
        }
        self.config.flash_liquidity
    }

    fn flash_premium(&self, amount: u128) -> u128 {
        mul_div_up(amount, self.config.flash_premium_bps, BPS)
    }

    fn supply_collateral(&mut self, amount: u128) -> Result<(), AdapterError> {
        if self.supply_paused {
            return Err(AdapterError::Paused);
        }
        if amount == 0 {
            return Err(AdapterError::InvalidAmount);
        }
        let available = self.max_collateral_capacity();
        if amount > available {
            return Err(AdapterError::CapacityExceeded {
                requested: amount,
                available,
            });
        }
        self.collateral += amount;
        Ok(())
    }

    fn withdraw_collateral(&mut self, amount: u128) -> Result<(), AdapterError> {
        if amount == 0 {
            return Err(AdapterError::InvalidAmount);
        }
        if amount > self.collateral {
            return Err(AdapterError::InsufficientCollateral {
                requested: amount,
                supplied: self.collateral,
            });
        }
        let remaining = self.collateral - amount;
        self.ensure_healthy(remaining, self.debt)?;
        self.collateral = remaining;
        Ok(())
    }

    fn borrow(&mut self, amount: u128) -> Result<(), AdapterError> {
        if self.borrow_paused {
            return Err(AdapterError::Paused);
        }
        if amount == 0 {
            return Err(AdapterError::InvalidAmount);
        }
        let available = self.config.borrow_liquidity;
        if amount > available {
            return Err(AdapterError::InsufficientLiquidity {
                requested: amount,
                available,
            });
        }
        let debt = add_u128(self.debt, amount);
        self.ensure_healthy(self.collateral, debt)?;
        self.debt = debt;
        self.config.borrow_liquidity = sub_u128(available, amount);
        Ok(())
    }

    fn repay(&mut self, amount: u128) -> Result<(), AdapterError> {
        if amount == 0 || amount > self.debt {
            return Err(AdapterError::InvalidAmount);
        }
        self.debt -= amount;
        self.config.borrow_liquidity = add_u128(self.config.borrow_liquidity, amount);
        Ok(())
    }

    fn open_flash_borrow(&mut self, amount: u128) -> Result<FlashLoan, AdapterError> {
        if self.outstanding_flash.is_some() {
            return Err(AdapterError::FlashBorrowOutstanding);
        }
        if amount == 0 {
            return Err(AdapterError::InvalidAmount);
        }
        let available = self.config.flash_liquidity;
        if amount > available {
            return Err(AdapterError::InsufficientLiquidity {
                requested: amount,
                available,
            });
        }
        self.config.flash_liquidity = available - amount;
        self.outstanding_flash = Some(amount);
        Ok(FlashLoan {
            lender: self.id.clone(),
            amount,
            premium: self.flash_premium(amount),
        })
    }

    fn close_flash_borrow(&mut self, loan: FlashLoan, repayment: u128) -> Result<(), AdapterError> {
        if self.outstanding_flash != Some(loan.amount) {
            return Err(AdapterError::InvalidAmount);
        }
        let owed = loan.owed();
        if repayment < owed {
            return Err(AdapterError::FlashBorrowNotRepaid { owed, repaid: repayment });
        }
        self.config.flash_liquidity = add_u128(self.config.flash_liquidity, repayment);
        self.outstanding_flash = None;
        Ok(())
    }
}
