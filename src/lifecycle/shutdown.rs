//! Shutdown coordination.

use std::future::Future;

use tokio::sync::broadcast;

/// Trigger for stopping one or more running servers.
///
/// Each call to [`Shutdown::signalled`] yields a future that resolves once
/// [`Shutdown::trigger`] is called, or once the coordinator is dropped.
#[derive(Debug, Clone)]
pub struct Shutdown {
    tx: broadcast::Sender<()>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self { tx }
    }

    /// Future to hand to `HttpServer::run`.
    pub fn signalled(&self) -> impl Future<Output = ()> + Send + 'static {
        let mut rx = self.tx.subscribe();
        async move {
            let _ = rx.recv().await;
        }
    }

    pub fn trigger(&self) {
        let _ = self.tx.send(());
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}
