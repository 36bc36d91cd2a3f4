use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::envelope::EnvelopeMode;

/// Static configuration for one SQS queue, as loaded from application config.
///
/// The credential pair is optional: when either half is missing or empty the
/// client falls back to the ambient AWS credential chain (environment, IAM
/// role, profile).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SqsConfig {
    /// Topic/queue ARN. Used for log and report context only, never for
    /// addressing the queue.
    pub arn: String,

    /// AWS region the queue lives in.
    pub region: String,

    /// Static access key id; empty or absent means ambient credentials.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Static secret key; empty or absent means ambient credentials.
    #[serde(default)]
    pub secret_key: Option<String>,

    /// Full queue URL, the address used for receive and delete calls.
    pub queue_url: String,

    /// FIFO message group id, if the queue is FIFO. Group ordering is the
    /// queue service's concern; the consumer never inspects this.
    #[serde(default)]
    pub message_group_id: Option<String>,

    /// Number of independent consumer workers to start. Zero is valid and
    /// starts none.
    #[serde(default)]
    pub consumer_count: usize,

    /// Producer concurrency, carried for config parity with the publishing
    /// side. Unused by the consumer.
    #[serde(default)]
    pub producer_count: usize,
}

impl SqsConfig {
    /// Whether a usable static credential pair was configured.
    pub fn has_static_credentials(&self) -> bool {
        matches!(
            (self.api_key.as_deref(), self.secret_key.as_deref()),
            (Some(key), Some(secret)) if !key.is_empty() && !secret.is_empty()
        )
    }
}

/// Per-consumer poll tuning and envelope mode, fixed at construction.
#[derive(Debug, Clone)]
pub struct ConsumerOptions {
    /// How message bodies are interpreted before reaching the handler.
    pub mode: EnvelopeMode,

    /// The maximum number of messages to receive in a single request.
    pub max_messages: i32,

    /// The wait time for long polling, in seconds. The client-side receive
    /// budget is this plus one second of slack.
    pub wait_time_seconds: i32,

    /// Successful handler calls slower than this are reported as slow
    /// operations. Has no effect on acknowledgment.
    pub slow_handler_threshold: Duration,
}

impl ConsumerOptions {
    /// Options for queues fed through a notification envelope (SNS → SQS).
    pub fn wrapped() -> Self {
        ConsumerOptions {
            mode: EnvelopeMode::Wrapped,
            max_messages: 10,
            wait_time_seconds: 20,
            slow_handler_threshold: Duration::from_secs(1),
        }
    }

    /// Options for queues carrying bare payloads (SQS → SQS). Uses a shorter
    /// long-poll wait.
    pub fn raw() -> Self {
        ConsumerOptions {
            wait_time_seconds: 5,
            ..ConsumerOptions::wrapped().with_mode(EnvelopeMode::Raw)
        }
    }

    pub fn with_mode(mut self, mode: EnvelopeMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_wait_time_seconds(mut self, seconds: i32) -> Self {
        self.wait_time_seconds = seconds;
        self
    }

    pub fn with_max_messages(mut self, max: i32) -> Self {
        self.max_messages = max;
        self
    }

    pub fn with_slow_handler_threshold(mut self, threshold: Duration) -> Self {
        self.slow_handler_threshold = threshold;
        self
    }

    /// Client-side budget for one receive call: the long-poll wait plus one
    /// second of slack so the service-side wait can expire first.
    pub fn receive_budget(&self) -> Duration {
        Duration::from_secs(self.wait_time_seconds as u64 + 1)
    }
}

impl Default for ConsumerOptions {
    fn default() -> Self {
        ConsumerOptions::wrapped()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> SqsConfig {
        serde_json::from_str(
            r#"{
                "arn": "arn:aws:sqs:us-east-1:123456789012:orders",
                "region": "us-east-1",
                "queue_url": "https://sqs.us-east-1.amazonaws.com/123456789012/orders",
                "consumer_count": 2
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn missing_credentials_mean_ambient() {
        let config = base_config();
        assert!(!config.has_static_credentials());
        assert_eq!(config.consumer_count, 2);
        assert_eq!(config.producer_count, 0);
        assert!(config.message_group_id.is_none());
    }

    #[test]
    fn empty_credential_strings_mean_ambient() {
        let mut config = base_config();
        config.api_key = Some(String::new());
        config.secret_key = Some("secret".to_string());
        assert!(!config.has_static_credentials());
    }

    #[test]
    fn full_pair_means_static() {
        let mut config = base_config();
        config.api_key = Some("AKIA...".to_string());
        config.secret_key = Some("secret".to_string());
        assert!(config.has_static_credentials());
    }

    #[test]
    fn receive_budget_adds_one_second_of_slack() {
        assert_eq!(
            ConsumerOptions::wrapped().receive_budget(),
            Duration::from_secs(21)
        );
        assert_eq!(ConsumerOptions::raw().receive_budget(), Duration::from_secs(6));
    }

    #[test]
    fn raw_preset_uses_short_wait() {
        let options = ConsumerOptions::raw();
        assert_eq!(options.mode, EnvelopeMode::Raw);
        assert_eq!(options.wait_time_seconds, 5);
        assert_eq!(options.max_messages, 10);
    }
}
