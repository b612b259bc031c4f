//! Height-synchronized polling engine.
//!
//! After a test issues an action against a chain (a transfer, a vote), the
//! resulting state change shows up some blocks later. This crate repeatedly
//! evaluates a caller-supplied check as new blocks are produced, until the
//! check passes, the allowed height window is used up, or the caller cancels.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                      BlockPoller                         │
//! │                                                          │
//! │   1. validate PollWindow (start <= max)                  │
//! │   2. HeightSource::current_height()                      │
//! │        error / no new height ──► sleep ⟷ cancel ──┐      │
//! │   3. check(height)                                │      │
//! │        Ok(value)          ──► return value        │      │
//! │        Mismatch, h < max  ──► loop ◄──────────────┘      │
//! │        Mismatch, h >= max ──► Exhausted                  │
//! │        Permanent          ──► Rejected                   │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! The engine holds no state between polls. Any number of polls may share one
//! height source.
//!
//! # Example
//!
//! ```ignore
//! use blockpoll_poller::{poll, PollFailure};
//! use blockpoll_types::BlockHeight;
//! use tokio_util::sync::CancellationToken;
//!
//! let cancel = CancellationToken::new();
//! let record = poll(&cancel, &chain_height, BlockHeight(10), BlockHeight(25), |_height| async {
//!     let record = query_record().await.map_err(PollFailure::mismatch)?;
//!     if record.status != "PASSED" {
//!         return Err(PollFailure::mismatch(format!("status is {}", record.status)));
//!     }
//!     Ok(record)
//! })
//! .await?;
//! ```

mod config;
mod engine;
mod error;
mod source;

pub use config::PollConfig;
pub use engine::{poll, BlockPoller};
pub use error::{PollError, PollFailure};
pub use source::{height_fn, FnHeightSource, HeightError, HeightSource};
