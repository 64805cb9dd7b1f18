//! Flash borrow payload
//!
//! Layout (17 bytes):
//! - `[0]` operation tag: 0 = leverage, 1 = deleverage
//! - `[1..17]` amount, u128 little-endian
//!
//! For leverage the amount is the asset deposit converted together with the
//! borrowed funds. For deleverage it is the collateral to withdraw.

use crate::error::StrategyError;

pub const FLASH_REQUEST_LEN: usize = 17;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum FlashOperation {
    Leverage = 0,
    Deleverage = 1,
}

impl TryFrom<u8> for FlashOperation {
    type Error = StrategyError;

    fn try_from(tag: u8) -> Result<Self, Self::Error> {
        match tag {
            0 => Ok(FlashOperation::Leverage),
            1 => Ok(FlashOperation::Deleverage),
            _ => Err(StrategyError::InvalidFlashPayload),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FlashBorrowRequest {
    pub operation: FlashOperation,
    pub amount: u128,
}

impl FlashBorrowRequest {
    pub fn leverage(deposit: u128) -> Self {
        Self {
            operation: FlashOperation::Leverage,
            amount: deposit,
        }
    }

    pub fn deleverage(collateral_to_free: u128) -> Self {
        Self {
            operation: FlashOperation::Deleverage,
            amount: collateral_to_free,
        }
    }

    pub fn encode(&self) -> [u8; FLASH_REQUEST_LEN] {
        let mut data = [0u8; FLASH_REQUEST_LEN];
        data[0] = self.operation as u8;
        data[1..].copy_from_slice(&self.amount.to_le_bytes());
        data
    }

    pub fn decode(data: &[u8]) -> Result<Self, StrategyError> {
        let mut reader = PayloadReader::new(data);
        let operation = FlashOperation::try_from(reader.read_u8()?)?;
        let amount = reader.read_u128()?;
        if reader.remaining() != 0 {
            return Err(StrategyError::InvalidFlashPayload);
        }
        Ok(Self { operation, amount })
    }
}

/// Payload reader with tracked offset
struct PayloadReader<'a> {
    data: &'a [u8],
    offset: usize,
}

impl<'a> PayloadReader<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, offset: 0 }
    }

    fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.offset)
    }

    fn read_u8(&mut self) -> Result<u8, StrategyError> {
        let byte = *self
            .data
            .get(self.offset)
            .ok_or(StrategyError::InvalidFlashPayload)?;
        self.offset += 1;
        Ok(byte)
    }

    fn read_u128(&mut self) -> Result<u128, StrategyError> {
        let end = self.offset + 16;
        if end > self.data.len() {
            return Err(StrategyError::InvalidFlashPayload);
        }
        let mut bytes = [0u8; 16];
        bytes.copy_from_slice(&self.data[self.offset..end]);
        self.offset = end;
        Ok(u128::from_le_bytes(bytes))
    }
}
