//! # SQS Consumer
//!
//! An asynchronous AWS SQS long-poll consumer pool: fetch batches of
//! messages, hand each to a user handler, and batch-delete only the messages
//! whose handler succeeded.
//!
//! ## Features
//!
//! - N independent worker loops, one lazily-built SQS client each
//! - Partial-batch acknowledgment: one failed message never blocks the rest
//! - Optional notification-envelope unwrapping (SNS → SQS fan-out) with
//!   poison-message deletion for unparseable payloads
//! - Budgeted calls: long-poll wait plus one second for receive, one second
//!   for batch delete; quiet long-poll expiry is not an error
//! - Slow-handler and failure events to a pluggable reporting sink
//! - Explicit shutdown signal honored during the blocking receive
//! - Continue-on-error semantics: no failure terminates a worker
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use sqs_consumer::{ConsumerOptions, NoopReporter, SqsConfig, SqsConsumer};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = SqsConfig {
//!         arn: "arn:aws:sqs:us-east-1:123456789012:orders".to_string(),
//!         region: "us-east-1".to_string(),
//!         api_key: None,
//!         secret_key: None,
//!         queue_url: "https://sqs.us-east-1.amazonaws.com/123456789012/orders".to_string(),
//!         message_group_id: None,
//!         consumer_count: 4,
//!         producer_count: 0,
//!     };
//!
//!     let handler = |body: String| async move {
//!         println!("processing: {body}");
//!         Ok::<(), sqs_consumer::HandlerError>(())
//!     };
//!
//!     let consumer = SqsConsumer::start(
//!         config,
//!         ConsumerOptions::wrapped(),
//!         Some(Arc::new(handler)),
//!         Arc::new(NoopReporter),
//!     );
//!
//!     tokio::signal::ctrl_c().await.ok();
//!     consumer.shutdown().await;
//! }
//! ```
//!
//! Handlers must be idempotent: a message whose handler failed, or whose
//! acknowledgment was lost, is redelivered by SQS and handled again.

pub mod client;
pub mod config;
pub mod consumer;
pub mod envelope;
pub mod errors;
pub mod handler;
pub mod reporting;
pub mod shutdown;
pub mod transport;

mod worker;

pub use config::{ConsumerOptions, SqsConfig};
pub use consumer::SqsConsumer;
pub use envelope::EnvelopeMode;
pub use errors::{ConsumerError, HandlerError};
pub use handler::MessageHandler;
pub use reporting::{
    FailureEvent, LogReporter, NoopReporter, ProcessIdentity, Reporter, SlowOperation,
};
pub use transport::{AckHandle, QueueMessage, QueueTransport, SqsTransport};
