use tracing::warn;

/// Identity of the reporting process, supplied by the embedding application
/// at construction time. Included verbatim in every emitted event.
#[derive(Debug, Clone, Default)]
pub struct ProcessIdentity {
    pub server_id: String,
    pub host_ip: String,
}

/// A failed queue or handler operation.
#[derive(Debug, Clone)]
pub struct FailureEvent {
    /// ARN of the queue the consumer is attached to.
    pub queue_arn: String,
    /// Operation that failed, e.g. `"receive"`, `"handle"`, `"delete_batch"`.
    pub operation: String,
    /// Error description.
    pub error: String,
}

/// A handler call that succeeded but exceeded the slow-call threshold.
#[derive(Debug, Clone)]
pub struct SlowOperation {
    pub queue_arn: String,
    pub operation: String,
    pub elapsed_ms: u64,
}

/// Sink for consumer failure and slow-operation events.
///
/// Implementations must be cheap and non-blocking; events are emitted from
/// inside worker loops. Reporting never affects message acknowledgment.
pub trait Reporter: Send + Sync {
    fn failure(&self, event: FailureEvent);
    fn slow_operation(&self, event: SlowOperation);
}

/// Reporter that emits events as structured log records, tagged with the
/// process identity it was constructed with.
pub struct LogReporter {
    identity: ProcessIdentity,
}

impl LogReporter {
    pub fn new(identity: ProcessIdentity) -> Self {
        LogReporter { identity }
    }
}

impl Reporter for LogReporter {
    fn failure(&self, event: FailureEvent) {
        warn!(
            event = "consumer_failure",
            queue_arn = %event.queue_arn,
            operation = %event.operation,
            error = %event.error,
            server_id = %self.identity.server_id,
            host_ip = %self.identity.host_ip,
        );
    }

    fn slow_operation(&self, event: SlowOperation) {
        warn!(
            event = "consumer_slow_operation",
            queue_arn = %event.queue_arn,
            operation = %event.operation,
            elapsed_ms = event.elapsed_ms,
            server_id = %self.identity.server_id,
            host_ip = %self.identity.host_ip,
        );
    }
}

/// Reporter that drops every event. Useful when no sink is wired up.
pub struct NoopReporter;

impl Reporter for NoopReporter {
    fn failure(&self, _event: FailureEvent) {}
    fn slow_operation(&self, _event: SlowOperation) {}
}
