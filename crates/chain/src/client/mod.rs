//! HTTP client for Cosmos SDK REST (LCD) gateways.

mod config;
mod types;

pub use config::ClientConfig;

use crate::{ChainError, ChainQuerier};
use async_trait::async_trait;
use blockpoll_types::{BlockHeight, ProposalResponse};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tracing::trace;
use types::{BalanceResponse, LatestBlockResponse, ProposalEnvelope};

const LATEST_BLOCK_PATH: &str = "/cosmos/base/tendermint/v1beta1/blocks/latest";
const BALANCES_PATH: &str = "/cosmos/bank/v1beta1/balances";
const PROPOSALS_PATH: &str = "/cosmos/gov/v1beta1/proposals";

/// [`ChainQuerier`] backed by a REST gateway.
#[derive(Debug, Clone)]
pub struct RestChainClient {
    name: String,
    base_url: String,
    http: reqwest::Client,
}

impl RestChainClient {
    /// Build a client from configuration.
    pub fn new(config: ClientConfig) -> Result<Self, ChainError> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;
        Ok(Self {
            name: config.name,
            base_url: config.endpoint.trim_end_matches('/').to_string(),
            http,
        })
    }

    /// Base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<R: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<R, ChainError> {
        let url = format!("{}{}", self.base_url, path);
        trace!(chain = %self.name, %url, "GET");

        let response = self.http.get(&url).query(query).send().await?;
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(ChainError::NotFound(url));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ChainError::Status {
                status: status.as_u16(),
                url,
                body,
            });
        }

        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes)
            .map_err(|e| ChainError::Malformed(format!("{}: {}", url, e)))
    }
}

#[async_trait]
impl ChainQuerier for RestChainClient {
    fn name(&self) -> &str {
        &self.name
    }

    async fn height(&self) -> Result<BlockHeight, ChainError> {
        let latest: LatestBlockResponse = self.get_json(LATEST_BLOCK_PATH, &[]).await?;
        let raw = latest.block.header.height;
        raw.parse::<u64>()
            .map(BlockHeight)
            .map_err(|e| ChainError::Malformed(format!("height {:?}: {}", raw, e)))
    }

    async fn balance(&self, address: &str, denom: &str) -> Result<u128, ChainError> {
        let path = format!("{}/{}/by_denom", BALANCES_PATH, address);
        let response: BalanceResponse = self.get_json(&path, &[("denom", denom)]).await?;
        let Some(coin) = response.balance else {
            return Ok(0);
        };
        if coin.amount.is_empty() {
            return Ok(0);
        }
        coin.amount.parse::<u128>().map_err(|e| {
            ChainError::Malformed(format!("amount {:?} of {}: {}", coin.amount, coin.denom, e))
        })
    }

    async fn proposal(&self, proposal_id: &str) -> Result<ProposalResponse, ChainError> {
        let path = format!("{}/{}", PROPOSALS_PATH, proposal_id);
        let envelope: ProposalEnvelope = self.get_json(&path, &[]).await?;
        Ok(envelope.proposal)
    }
}
