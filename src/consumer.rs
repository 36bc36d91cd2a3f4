use std::sync::Arc;

use futures::future::join_all;
use tokio::task::JoinHandle;
use tracing::info;

use crate::config::{ConsumerOptions, SqsConfig};
use crate::handler::MessageHandler;
use crate::reporting::Reporter;
use crate::shutdown::{ShutdownSender, shutdown_channel};
use crate::transport::{QueueTransport, SqsTransport};
use crate::worker::Worker;

/// A pool of independent SQS consumer workers.
///
/// Construction spawns `consumer_count` workers, each owning its own
/// transport (and therefore its own lazily-built SQS client). Workers share
/// nothing mutable; only the read-only config, the handler, and the reporter
/// handles are shared.
pub struct SqsConsumer {
    shutdown: ShutdownSender,
    workers: Vec<JoinHandle<()>>,
}

impl SqsConsumer {
    /// Starts a consumer pool against AWS SQS.
    ///
    /// A `None` handler is accepted: messages are then received (and decoded)
    /// but never acknowledged, so the queue service redelivers them forever.
    /// That is valid but almost certainly not what you want outside of
    /// draining experiments.
    pub fn start(
        config: SqsConfig,
        options: ConsumerOptions,
        handler: Option<Arc<dyn MessageHandler>>,
        reporter: Arc<dyn Reporter>,
    ) -> Self {
        let transport_config = config.clone();
        Self::start_with_transports(&config, options, handler, reporter, move |_| {
            SqsTransport::new(transport_config.clone())
        })
    }

    /// Starts a consumer pool over an arbitrary transport, one instance per
    /// worker. This is the seam used by tests and by non-AWS backends.
    pub fn start_with_transports<T, F>(
        config: &SqsConfig,
        options: ConsumerOptions,
        handler: Option<Arc<dyn MessageHandler>>,
        reporter: Arc<dyn Reporter>,
        mut make_transport: F,
    ) -> Self
    where
        T: QueueTransport + 'static,
        F: FnMut(usize) -> T,
    {
        let (sender, token) = shutdown_channel();

        let mut workers = Vec::with_capacity(config.consumer_count);
        for id in 0..config.consumer_count {
            let worker = Worker {
                id,
                queue_arn: config.arn.clone(),
                transport: make_transport(id),
                options: options.clone(),
                handler: handler.clone(),
                reporter: Arc::clone(&reporter),
                shutdown: token.clone(),
            };
            workers.push(tokio::spawn(worker.run()));
        }

        info!(
            queue_arn = %config.arn,
            workers = workers.len(),
            "sqs consumer started",
        );

        SqsConsumer {
            shutdown: sender,
            workers,
        }
    }

    /// Number of workers this pool spawned.
    pub fn worker_count(&self) -> usize {
        self.workers.len()
    }

    /// Signals every worker to stop and waits for them to finish. Workers
    /// notice the signal during the blocking receive or at the top of their
    /// next cycle, whichever comes first; a batch already received is
    /// drained, acks included, before the worker exits.
    pub async fn shutdown(self) {
        self.shutdown.shutdown();
        join_all(self.workers).await;
    }
}
