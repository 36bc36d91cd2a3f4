use thiserror::Error;

/// Error type for a boxed handler failure.
///
/// Handlers report failure with whatever error type suits them; the consumer
/// only logs and reports the failure, so a boxed trait object is enough.
pub type HandlerError = Box<dyn std::error::Error + Send + Sync>;

/// Error types for SQS consumer operations.
///
/// Every variant is transient from the worker loop's point of view: the
/// current cycle is abandoned and the next one retries from the top. Nothing
/// here terminates a worker.
#[derive(Debug, Error)]
pub enum ConsumerError {
    /// The client-side receive budget elapsed before the long poll returned.
    ///
    /// This is the expected quiet outcome of an idle queue, not a failure:
    /// callers treat it exactly like an empty batch and must not log it as
    /// an error.
    #[error("long-poll receive budget elapsed")]
    PollExpired,

    /// The receive call failed for a reason other than the quiet timeout.
    ///
    /// Client construction itself cannot fail with the AWS SDK; bad
    /// credentials or an unreachable endpoint surface here on first use.
    #[error("receive message failed: {0}")]
    Receive(String),

    /// The batch delete call failed; every handle in the batch remains
    /// unacknowledged and will be redelivered by SQS.
    #[error("delete message batch failed: {0}")]
    DeleteBatch(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_cause() {
        let err = ConsumerError::Receive("connection reset".to_string());
        assert_eq!(err.to_string(), "receive message failed: connection reset");
    }

    #[test]
    fn poll_expired_has_no_cause() {
        assert_eq!(
            ConsumerError::PollExpired.to_string(),
            "long-poll receive budget elapsed"
        );
    }

    #[test]
    fn delete_batch_display_includes_cause() {
        let err = ConsumerError::DeleteBatch("throttled".to_string());
        assert_eq!(err.to_string(), "delete message batch failed: throttled");
    }
}
