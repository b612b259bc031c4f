//! Height sources.

use async_trait::async_trait;
use blockpoll_types::BlockHeight;
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use thiserror::Error;

/// Transient failure to read the current height.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HeightError {
    /// The source could not be reached.
    #[error("Height source unavailable: {0}")]
    Unavailable(String),

    /// The source answered with something that is not a height.
    #[error("Malformed height: {0}")]
    Malformed(String),

    /// The query failed for another reason.
    #[error("Height query failed: {0}")]
    Query(String),
}

impl HeightError {
    pub fn query(reason: impl fmt::Display) -> Self {
        HeightError::Query(reason.to_string())
    }
}

/// Supplier of the current height of some chain.
///
/// Implementations must not block indefinitely; a read that cannot complete
/// should return an error, which the poller treats as "no progress yet".
#[async_trait]
pub trait HeightSource: Send + Sync {
    /// Read the current height.
    async fn current_height(&self) -> Result<BlockHeight, HeightError>;
}

#[async_trait]
impl<T: HeightSource + ?Sized> HeightSource for &T {
    async fn current_height(&self) -> Result<BlockHeight, HeightError> {
        (**self).current_height().await
    }
}

#[async_trait]
impl<T: HeightSource + ?Sized> HeightSource for Arc<T> {
    async fn current_height(&self) -> Result<BlockHeight, HeightError> {
        (**self).current_height().await
    }
}

/// Height source backed by a closure.
pub struct FnHeightSource<F> {
    read: F,
}

/// Wrap a closure returning a height future as a [`HeightSource`].
pub fn height_fn<F, Fut>(read: F) -> FnHeightSource<F>
where
    F: Fn() -> Fut + Send + Sync,
    Fut: Future<Output = Result<BlockHeight, HeightError>> + Send,
{
    FnHeightSource { read }
}

#[async_trait]
impl<F, Fut> HeightSource for FnHeightSource<F>
where
    F: Fn() -> Fut + Send + Sync,
    Fut: Future<Output = Result<BlockHeight, HeightError>> + Send,
{
    async fn current_height(&self) -> Result<BlockHeight, HeightError> {
        (self.read)().await
    }
}
