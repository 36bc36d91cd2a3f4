use std::time::Duration;

use async_trait::async_trait;
use aws_sdk_sqs::types::DeleteMessageBatchRequestEntry;
use tokio::time::timeout;
use tracing::{info, warn};

use crate::client;
use crate::config::SqsConfig;
use crate::errors::ConsumerError;

/// Client-side budget for one batch delete call.
const DELETE_BUDGET: Duration = Duration::from_secs(1);

/// One message as returned by the queue service.
#[derive(Debug, Clone)]
pub struct QueueMessage {
    pub id: String,
    /// Opaque receipt token required to delete this delivery.
    pub receipt_handle: String,
    /// Raw body. Absent bodies are skipped by the worker, not treated as
    /// errors.
    pub body: Option<String>,
}

impl QueueMessage {
    pub fn ack_handle(&self) -> AckHandle {
        AckHandle {
            id: self.id.clone(),
            receipt_handle: self.receipt_handle.clone(),
        }
    }
}

/// A message staged for the cycle's batch delete. Created when a handler
/// succeeds or a message is classified poison, consumed by the delete call,
/// then discarded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AckHandle {
    pub id: String,
    pub receipt_handle: String,
}

/// The queue operations a worker loop needs.
///
/// Each worker owns exactly one transport; implementations are never shared
/// across workers and need no internal synchronization.
#[async_trait]
pub trait QueueTransport: Send {
    /// Receives up to `max_messages` messages, long-polling for
    /// `wait_time_seconds`. Returns [`ConsumerError::PollExpired`] when the
    /// client-side budget elapses first; callers treat that as an empty
    /// batch.
    async fn receive(
        &mut self,
        max_messages: i32,
        wait_time_seconds: i32,
    ) -> Result<Vec<QueueMessage>, ConsumerError>;

    /// Deletes every staged handle in one batch call. Failure leaves the
    /// whole batch unacknowledged; the queue service redelivers per its
    /// visibility timeout. No local retry.
    async fn delete_batch(&mut self, handles: Vec<AckHandle>) -> Result<(), ConsumerError>;
}

/// [`QueueTransport`] backed by the AWS SQS SDK.
///
/// The SDK client is built lazily on first use and cached for the lifetime
/// of the transport. Construction itself cannot fail; bad credentials or an
/// unreachable endpoint surface as [`ConsumerError::Receive`] or
/// [`ConsumerError::DeleteBatch`] on first use. The client is never rebuilt
/// once built, so one whose session later becomes permanently invalid is not
/// recovered without restarting the process.
pub struct SqsTransport {
    config: SqsConfig,
    client: Option<aws_sdk_sqs::Client>,
}

impl SqsTransport {
    pub fn new(config: SqsConfig) -> Self {
        SqsTransport {
            config,
            client: None,
        }
    }

    async fn ensure_client(&mut self) -> aws_sdk_sqs::Client {
        if let Some(existing) = &self.client {
            return existing.clone();
        }
        let built = client::build_client(&self.config).await;
        info!(queue_arn = %self.config.arn, "sqs session initialized");
        self.client = Some(built.clone());
        built
    }

    /// Converts SDK messages, dropping (with a log line) any delivery that
    /// lacks the id or receipt handle needed to acknowledge it.
    fn convert_messages(
        queue_arn: &str,
        raw: Vec<aws_sdk_sqs::types::Message>,
    ) -> Vec<QueueMessage> {
        let mut messages = Vec::with_capacity(raw.len());
        for message in raw {
            match (message.message_id, message.receipt_handle) {
                (Some(id), Some(receipt_handle)) => messages.push(QueueMessage {
                    id,
                    receipt_handle,
                    body: message.body,
                }),
                _ => warn!(
                    queue_arn = %queue_arn,
                    "dropping delivery without message id or receipt handle",
                ),
            }
        }
        messages
    }
}

#[async_trait]
impl QueueTransport for SqsTransport {
    async fn receive(
        &mut self,
        max_messages: i32,
        wait_time_seconds: i32,
    ) -> Result<Vec<QueueMessage>, ConsumerError> {
        let client = self.ensure_client().await;

        // One second of slack beyond the service-side wait, so the long poll
        // can expire before the client-side budget does.
        let budget = Duration::from_secs(wait_time_seconds as u64 + 1);
        let call = client
            .receive_message()
            .queue_url(&self.config.queue_url)
            .max_number_of_messages(max_messages)
            .wait_time_seconds(wait_time_seconds)
            .send();

        let output = match timeout(budget, call).await {
            Ok(Ok(output)) => output,
            Ok(Err(err)) => return Err(ConsumerError::Receive(err.to_string())),
            Err(_) => return Err(ConsumerError::PollExpired),
        };

        Ok(Self::convert_messages(
            &self.config.arn,
            output.messages.unwrap_or_default(),
        ))
    }

    async fn delete_batch(&mut self, handles: Vec<AckHandle>) -> Result<(), ConsumerError> {
        if handles.is_empty() {
            return Ok(());
        }
        let client = self.ensure_client().await;

        let mut entries = Vec::with_capacity(handles.len());
        for handle in handles {
            let entry = DeleteMessageBatchRequestEntry::builder()
                .id(handle.id)
                .receipt_handle(handle.receipt_handle)
                .build()
                .map_err(|err| ConsumerError::DeleteBatch(err.to_string()))?;
            entries.push(entry);
        }

        let call = client
            .delete_message_batch()
            .queue_url(&self.config.queue_url)
            .set_entries(Some(entries))
            .send();

        let output = timeout(DELETE_BUDGET, call)
            .await
            .map_err(|_| ConsumerError::DeleteBatch("delete budget elapsed".to_string()))?
            .map_err(|err| ConsumerError::DeleteBatch(err.to_string()))?;

        // Per-entry failures are surfaced in the logs but never retried
        // locally; those messages come back through redelivery.
        for failed in output.failed() {
            warn!(
                queue_arn = %self.config.arn,
                entry_id = %failed.id(),
                error = failed.message().unwrap_or_default(),
                "delete batch entry failed; message will be redelivered",
            );
        }

        Ok(())
    }
}
