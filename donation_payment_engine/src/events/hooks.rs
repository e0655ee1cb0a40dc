use std::{future::Future, pin::Pin, sync::Arc};

use crate::events::{DonationReceivedEvent, EventHandler, EventProducer, Handler};

#[derive(Default, Clone)]
pub struct EventProducers {
    pub donation_received_producer: Vec<EventProducer<DonationReceivedEvent>>,
}

pub struct EventHandlers {
    pub on_donation_received: Option<EventHandler<DonationReceivedEvent>>,
}

impl EventHandlers {
    pub fn new(buffer_size: usize, hooks: EventHooks) -> Self {
        let on_donation_received = hooks.on_donation_received.map(|f| EventHandler::new(buffer_size, f));
        Self { on_donation_received }
    }

    pub fn producers(&self) -> EventProducers {
        let mut result = EventProducers::default();
        if let Some(handler) = &self.on_donation_received {
            result.donation_received_producer.push(handler.subscribe());
        }
        result
    }

    pub async fn start_handlers(self) {
        if let Some(handler) = self.on_donation_received {
            tokio::spawn(async move {
                handler.start_handler().await;
            });
        }
    }
}

#[derive(Default, Clone)]
pub struct EventHooks {
    pub on_donation_received: Option<Handler<DonationReceivedEvent>>,
}

impl EventHooks {
    pub fn on_donation_received<F>(&mut self, f: F) -> &mut Self
    where F: (Fn(DonationReceivedEvent) -> Pin<Box<dyn Future<Output = ()> + Send>>) + Send + Sync + 'static {
        self.on_donation_received = Some(Arc::new(f));
        self
    }
}
