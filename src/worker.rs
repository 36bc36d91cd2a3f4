use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, error, info, warn};

use crate::config::ConsumerOptions;
use crate::envelope::{self, Decoded};
use crate::errors::ConsumerError;
use crate::handler::MessageHandler;
use crate::reporting::{FailureEvent, Reporter, SlowOperation};
use crate::shutdown::ShutdownToken;
use crate::transport::{AckHandle, QueueMessage, QueueTransport};

/// One consumer worker: drives receive → decode → invoke → batch-delete,
/// forever, independently of every other worker. Owns its transport
/// exclusively; nothing here is shared mutable state.
pub(crate) struct Worker<T> {
    pub(crate) id: usize,
    pub(crate) queue_arn: String,
    pub(crate) transport: T,
    pub(crate) options: ConsumerOptions,
    pub(crate) handler: Option<Arc<dyn MessageHandler>>,
    pub(crate) reporter: Arc<dyn Reporter>,
    pub(crate) shutdown: ShutdownToken,
}

impl<T: QueueTransport> Worker<T> {
    /// Runs cycles until shutdown is signaled. The token is raced against
    /// the blocking receive only: a signal interrupts the long poll, but a
    /// batch that was already received is drained (handlers run, staged acks
    /// are delivered) before the worker stops.
    pub(crate) async fn run(mut self) {
        info!(worker = self.id, queue_arn = %self.queue_arn, "consumer worker started");

        let mut stop = self.shutdown.clone();
        loop {
            if stop.is_shutdown() {
                break;
            }
            let outcome = tokio::select! {
                _ = stop.wait() => break,
                outcome = self
                    .transport
                    .receive(self.options.max_messages, self.options.wait_time_seconds) => outcome,
            };
            self.process(outcome).await;
        }

        info!(worker = self.id, queue_arn = %self.queue_arn, "consumer worker stopped");
    }

    /// Finishes one poll-process-acknowledge cycle from the receive outcome.
    /// Every failure path returns early; the next cycle retries from the
    /// top. Nothing aborts the worker.
    async fn process(&mut self, outcome: Result<Vec<QueueMessage>, ConsumerError>) {
        let messages = match outcome {
            Ok(messages) => messages,
            Err(ConsumerError::PollExpired) => {
                // Quiet long-poll expiry, identical to an empty batch.
                debug!(worker = self.id, "long poll expired with no messages");
                return;
            }
            Err(err) => {
                error!(
                    worker = self.id,
                    queue_arn = %self.queue_arn,
                    error = %err,
                    "receive failed",
                );
                self.report_failure("receive", &err.to_string());
                return;
            }
        };

        if messages.is_empty() {
            return;
        }
        debug!(worker = self.id, count = messages.len(), "received messages");

        let mut acks: Vec<AckHandle> = Vec::new();
        for message in &messages {
            let Some(body) = message.body.as_deref() else {
                continue;
            };

            let payload = match envelope::decode(self.options.mode, body) {
                Decoded::Payload(payload) => payload,
                Decoded::Poison { error } => {
                    // Deleted without reaching the handler, so a malformed
                    // payload cannot loop through redelivery forever.
                    error!(
                        worker = self.id,
                        queue_arn = %self.queue_arn,
                        message_id = %message.id,
                        error = %error,
                        body,
                        "unparseable envelope, deleting poison message",
                    );
                    acks.push(message.ack_handle());
                    continue;
                }
            };

            // No handler configured: the message is received but never
            // acknowledged and will be redelivered indefinitely.
            let Some(handler) = self.handler.as_ref() else {
                continue;
            };

            let started = Instant::now();
            match handler.handle(&payload).await {
                Ok(()) => {
                    let elapsed = started.elapsed();
                    if elapsed >= self.options.slow_handler_threshold {
                        let elapsed_ms = elapsed.as_millis() as u64;
                        warn!(
                            worker = self.id,
                            queue_arn = %self.queue_arn,
                            message_id = %message.id,
                            elapsed_ms,
                            "slow handler",
                        );
                        self.reporter.slow_operation(SlowOperation {
                            queue_arn: self.queue_arn.clone(),
                            operation: "handle".to_string(),
                            elapsed_ms,
                        });
                    }
                    acks.push(message.ack_handle());
                }
                Err(err) => {
                    error!(
                        worker = self.id,
                        queue_arn = %self.queue_arn,
                        message_id = %message.id,
                        error = %err,
                        body = %payload,
                        "handler failed, message left for redelivery",
                    );
                    self.report_failure("handle", &err.to_string());
                }
            }
        }

        if acks.is_empty() {
            return;
        }

        if let Err(err) = self.transport.delete_batch(acks).await {
            error!(
                worker = self.id,
                queue_arn = %self.queue_arn,
                error = %err,
                "delete batch failed, batch will be redelivered",
            );
            self.report_failure("delete_batch", &err.to_string());
        }
    }

    fn report_failure(&self, operation: &str, error: &str) {
        self.reporter.failure(FailureEvent {
            queue_arn: self.queue_arn.clone(),
            operation: operation.to_string(),
            error: error.to_string(),
        });
    }
}
