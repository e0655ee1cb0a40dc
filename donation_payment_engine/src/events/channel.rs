//! Simple stateless pub-sub event handler
//!
//! This module provides a small hook system that lets components subscribe to engine events and
//! react to them. The handler is stateless: subscribers receive the event itself and nothing
//! else. Handlers can be async, and each event is processed on its own task so that one slow
//! notification (a sluggish mail API, say) cannot back up the others.
use std::{future::Future, pin::Pin, sync::Arc};

use log::*;
use tokio::{sync::mpsc, task::JoinSet};

pub type Handler<E> = Arc<dyn Fn(E) -> Pin<Box<dyn Future<Output = ()> + Send>> + Send + Sync>;

pub struct EventHandler<E: Send + Sync + 'static> {
    listener: mpsc::Receiver<E>,
    sender: mpsc::Sender<E>,
    handler: Handler<E>,
}

impl<E: Send + Sync + 'static> EventHandler<E> {
    pub fn new(buffer_size: usize, handler: Handler<E>) -> Self {
        let (sender, receiver) = mpsc::channel(buffer_size);
        Self { listener: receiver, sender, handler }
    }

    pub fn subscribe(&self) -> EventProducer<E> {
        EventProducer::new(self.sender.clone())
    }

    /// Run the dispatch loop until every producer has been dropped, then drain the in-flight
    /// jobs. Each event runs on its own task.
    pub async fn start_handler(mut self) {
        debug!("📬️ Starting event handler");
        // drop the internal sender so that when the last subscriber is dropped, the handler shuts
        // down automatically
        drop(self.sender);
        let mut jobs = JoinSet::new();
        loop {
            tokio::select! {
                maybe_ev = self.listener.recv() => match maybe_ev {
                    Some(ev) => {
                        trace!("📬️ Handling event");
                        let handler = Arc::clone(&self.handler);
                        jobs.spawn(async move {
                            (handler)(ev).await;
                            trace!("📬️ Event handled");
                        });
                    },
                    None => break,
                },
                Some(finished) = jobs.join_next() => {
                    if let Err(e) = finished {
                        warn!("📬️ An event handler job panicked: {e}");
                    }
                },
            }
        }
        debug!("📬️ Event channel closed. Waiting for in-flight jobs to complete");
        while let Some(finished) = jobs.join_next().await {
            if let Err(e) = finished {
                warn!("📬️ An event handler job panicked: {e}");
            }
        }
        debug!("📬️ Event handler has shut down");
    }
}

#[derive(Clone)]
pub struct EventProducer<E: Send + Sync> {
    sender: mpsc::Sender<E>,
}

impl<E: Send + Sync> EventProducer<E> {
    pub fn new(sender: mpsc::Sender<E>) -> Self {
        Self { sender }
    }

    pub async fn publish_event(&self, event: E) {
        if let Err(e) = self.sender.send(event).await {
            error!("📬️ Failed to send event: {e}");
        }
    }
}

#[cfg(test)]
mod test {
    use std::sync::atomic::{AtomicU64, Ordering};

    use super::*;

    #[tokio::test]
    async fn every_published_event_reaches_the_handler() {
        let _ = env_logger::try_init();
        let total = Arc::new(AtomicU64::new(0));
        let t2 = total.clone();
        let handler = Arc::new(move |v: u64| {
            let total = total.clone();
            Box::pin(async move {
                debug!("Handler received {v}");
                // Stagger the jobs so several are in flight when the channel closes
                tokio::time::sleep(tokio::time::Duration::from_millis(10 * (v % 4))).await;
                total.fetch_add(v, Ordering::SeqCst);
            }) as Pin<Box<dyn Future<Output = ()> + Send>>
        });
        let event_handler = EventHandler::new(2, handler);
        let producer_1 = event_handler.subscribe();
        let producer_2 = event_handler.subscribe();
        tokio::spawn(async move {
            for v in 1..=10u64 {
                producer_1.publish_event(v).await;
            }
        });
        tokio::spawn(async move {
            for v in 11..=20u64 {
                producer_2.publish_event(v).await;
            }
        });

        event_handler.start_handler().await;
        assert_eq!(t2.load(Ordering::SeqCst), (1..=20).sum::<u64>());
    }
}
