//! Wire types for Cosmos SDK REST responses.

use blockpoll_types::ProposalResponse;
use serde::Deserialize;

/// Response from `/cosmos/base/tendermint/v1beta1/blocks/latest`.
#[derive(Debug, Deserialize)]
pub struct LatestBlockResponse {
    pub block: Block,
}

#[derive(Debug, Deserialize)]
pub struct Block {
    pub header: BlockHeader,
}

#[derive(Debug, Deserialize)]
pub struct BlockHeader {
    /// Decimal string, as encoded by the gateway.
    pub height: String,
}

/// Response from `/cosmos/bank/v1beta1/balances/{address}/by_denom`.
#[derive(Debug, Deserialize)]
pub struct BalanceResponse {
    /// Absent when the account has never held the denom.
    #[serde(default)]
    pub balance: Option<CoinAmount>,
}

#[derive(Debug, Deserialize)]
pub struct CoinAmount {
    pub denom: String,
    pub amount: String,
}

/// Response from `/cosmos/gov/v1beta1/proposals/{id}`.
#[derive(Debug, Deserialize)]
pub struct ProposalEnvelope {
    pub proposal: ProposalResponse,
}
