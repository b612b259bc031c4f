//! Chain queries and convergence polls.
//!
//! This crate connects the poll engine to chains:
//!
//! - [`ChainQuerier`] - the queries a convergence check needs from a chain
//! - [`ChainHeight`] - adapts any querier into a height source
//! - [`poll_for_balance`] / [`poll_for_proposal_status`] - wait for a
//!   balance or a governance proposal to reach an expected value
//! - [`wait_for_blocks`] / [`wait_for_height`] - wait for block production
//! - [`RestChainClient`] - querier for Cosmos SDK REST endpoints

mod client;
mod convergence;
mod error;
mod querier;
mod wait;

pub use client::{ClientConfig, RestChainClient};
pub use convergence::{poll_for_balance, poll_for_proposal_status};
pub use error::ChainError;
pub use querier::{ChainHeight, ChainQuerier};
pub use wait::{wait_for_blocks, wait_for_height};
