use std::future::Future;

use async_trait::async_trait;

use crate::errors::HandlerError;

/// User-supplied message processing callback.
///
/// Called once per decoded message body, concurrently across workers (at most
/// once per worker at a time). Implementations must be idempotent: a message
/// whose handler failed, or whose acknowledgment was lost, is redelivered by
/// the queue service and handled again.
///
/// Returning `Ok` acknowledges the message (it joins the cycle's batch
/// delete); returning `Err` leaves it on the queue for redelivery.
#[async_trait]
pub trait MessageHandler: Send + Sync {
    async fn handle(&self, body: &str) -> Result<(), HandlerError>;
}

/// Plain async functions and closures over an owned body are handlers.
#[async_trait]
impl<F, Fut> MessageHandler for F
where
    F: Fn(String) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<(), HandlerError>> + Send + 'static,
{
    async fn handle(&self, body: &str) -> Result<(), HandlerError> {
        (self)(body.to_string()).await
    }
}
