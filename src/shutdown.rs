use tokio::sync::watch;

/// Stop signal handed to each worker. Checked at the top of every cycle and
/// raced against the blocking receive, so shutdown does not wait out a full
/// long poll.
#[derive(Clone)]
pub struct ShutdownToken {
    rx: watch::Receiver<bool>,
}

impl ShutdownToken {
    /// Whether shutdown has been requested.
    pub fn is_shutdown(&self) -> bool {
        *self.rx.borrow()
    }

    /// Resolves once shutdown is requested.
    pub async fn wait(&mut self) {
        while !*self.rx.borrow() {
            if self.rx.changed().await.is_err() {
                // Sender dropped without signaling; treat as shutdown.
                return;
            }
        }
    }
}

/// Sender half owned by the consumer pool.
pub struct ShutdownSender {
    tx: watch::Sender<bool>,
}

impl ShutdownSender {
    /// Signals every worker to stop after its current cycle step.
    pub fn shutdown(&self) {
        let _ = self.tx.send(true);
    }
}

/// Creates a connected shutdown sender/token pair.
pub fn shutdown_channel() -> (ShutdownSender, ShutdownToken) {
    let (tx, rx) = watch::channel(false);
    (ShutdownSender { tx }, ShutdownToken { rx })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn token_observes_signal() {
        let (sender, mut token) = shutdown_channel();
        assert!(!token.is_shutdown());

        sender.shutdown();
        token.wait().await;
        assert!(token.is_shutdown());
    }

    #[tokio::test]
    async fn dropped_sender_releases_waiters() {
        let (sender, mut token) = shutdown_channel();
        drop(sender);
        token.wait().await;
    }
}
