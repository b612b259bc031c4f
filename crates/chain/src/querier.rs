//! Chain query abstraction.

use crate::ChainError;
use async_trait::async_trait;
use blockpoll_poller::{HeightError, HeightSource};
use blockpoll_types::{BlockHeight, ProposalResponse};

/// The state queries convergence checks run against a chain.
#[async_trait]
pub trait ChainQuerier: Send + Sync {
    /// Human-readable chain name, used in logs and errors.
    fn name(&self) -> &str;

    /// Latest committed height.
    async fn height(&self) -> Result<BlockHeight, ChainError>;

    /// Amount of `denom` held by `address`. Zero when the account holds none.
    async fn balance(&self, address: &str, denom: &str) -> Result<u128, ChainError>;

    /// Governance proposal by id.
    async fn proposal(&self, proposal_id: &str) -> Result<ProposalResponse, ChainError>;
}

/// Exposes a chain's height as a [`HeightSource`].
pub struct ChainHeight<'a, C: ?Sized> {
    chain: &'a C,
}

impl<'a, C: ChainQuerier + ?Sized> ChainHeight<'a, C> {
    pub fn new(chain: &'a C) -> Self {
        Self { chain }
    }
}

#[async_trait]
impl<'a, C: ChainQuerier + ?Sized> HeightSource for ChainHeight<'a, C> {
    async fn current_height(&self) -> Result<BlockHeight, HeightError> {
        self.chain.height().await.map_err(|e| match e {
            ChainError::Http(e) => HeightError::Unavailable(e.to_string()),
            ChainError::Malformed(reason) => HeightError::Malformed(reason),
            other => HeightError::query(other),
        })
    }
}
