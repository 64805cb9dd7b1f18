//! Flash borrow issue and callback dispatch
//!
//! A flash borrow is one inline sequence: mark in flight, open the loan, run
//! the callback body, repay from the wallet, close the loan, clear the mark.
//! A failure anywhere aborts the enclosing atomic operation.

use super::LeverageStrategy;
use crate::adapters::{ConversionAdapter, LendingAdapter};
use crate::error::{StrategyError, StrategyResult};
use crate::flash::{FlashBorrowRequest, FlashOperation};
use crate::types::Address;
use model_leverage::math::{add_u128, min_u128};

impl<L: LendingAdapter, C: ConversionAdapter> LeverageStrategy<L, C> {
    pub(crate) fn flash_borrow(
        &mut self,
        request: FlashBorrowRequest,
        amount: u128,
    ) -> StrategyResult<()> {
        self.flash.enter(amount)?;
        let result = self.run_flash_borrow(request, amount);
        self.flash.exit();
        result
    }

    fn run_flash_borrow(&mut self, request: FlashBorrowRequest, amount: u128) -> StrategyResult<()> {
        let payload = request.encode();

        let loan = self.lending.open_flash_borrow(amount)?;
        self.wallet.credit_asset(loan.amount);

        let lender = loan.lender.clone();
        self.on_flash_borrow(&lender, loan.amount, loan.premium, &payload)?;

        let owed = loan.owed();
        if self.wallet.asset < owed {
            return Err(StrategyError::FlashLoanNotRepaid {
                owed,
                available: self.wallet.asset,
            });
        }
        self.wallet.debit_asset(owed)?;
        self.lending.close_flash_borrow(loan, owed)?;
        Ok(())
    }

    /// Flash borrow callback entry point
    ///
    /// Honoured only from the trusted lending adapter while a self-issued
    /// borrow of exactly `amount` is outstanding.
    pub fn on_flash_borrow(
        &mut self,
        caller: &Address,
        amount: u128,
        premium: u128,
        data: &[u8],
    ) -> StrategyResult<()> {
        if caller != self.lending.id() {
            log::warn!("Rejected flash callback from untrusted caller {}", caller);
            return Err(StrategyError::UntrustedCallback);
        }
        if !self.flash.expects(amount) {
            log::warn!("Rejected flash callback with no matching borrow in flight");
            return Err(StrategyError::UntrustedCallback);
        }

        let request = FlashBorrowRequest::decode(data)?;
        match request.operation {
            FlashOperation::Leverage => self.on_leverage(request.amount, amount, premium),
            FlashOperation::Deleverage => self.on_deleverage(request.amount, amount),
        }
    }

    /// Convert deposit + borrowed, supply, borrow back what the flash owes
    fn on_leverage(&mut self, deposit: u128, borrowed: u128, premium: u128) -> StrategyResult<()> {
        self.convert_and_supply(add_u128(deposit, borrowed))?;
        self.borrow(add_u128(borrowed, premium))?;

        let leverage = self.current_leverage_ratio();
        let max = self.params.max_leverage_ratio;
        if leverage >= max {
            return Err(StrategyError::LeverageAboveMax { leverage, max });
        }
        log::debug!("flash leverage done: leverage {}", leverage);
        Ok(())
    }

    /// Repay with the borrowed funds, withdraw collateral, convert it back
    fn on_deleverage(&mut self, collateral_to_free: u128, borrowed: u128) -> StrategyResult<()> {
        let before = self.current_leverage_ratio();

        self.repay(min_u128(borrowed, self.lending.debt()))?;
        let collateral = min_u128(collateral_to_free, self.lending.collateral_balance());
        self.withdraw_and_convert(collateral)?;

        let leverage = self.current_leverage_ratio();
        let max = self.params.max_leverage_ratio;
        if leverage >= max && leverage > before {
            return Err(StrategyError::LeverageAboveMax { leverage, max });
        }
        log::debug!("flash deleverage done: leverage {} -> {}", before, leverage);
        Ok(())
    }
}
