//! Wallet balances.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An amount of a single denomination held by an address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WalletAmount {
    /// Bech32 account address.
    pub address: String,
    /// Denomination, e.g. `uatom` or an `ibc/<hash>` voucher.
    pub denom: String,
    /// Amount in the smallest unit of `denom`.
    pub amount: u128,
}

impl WalletAmount {
    pub fn new(address: impl Into<String>, denom: impl Into<String>, amount: u128) -> Self {
        Self {
            address: address.into(),
            denom: denom.into(),
            amount,
        }
    }
}

impl fmt::Display for WalletAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{} @ {}", self.amount, self.denom, self.address)
    }
}
