//! Topic-based event bus.

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use super::types::{ModeChangedEvent, TelemetryEvent, TrainingEvent};

/// Topics consumers can subscribe to independently.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Topic {
    /// Per-tick guard readouts.
    Telemetry,
    /// Mode transitions.
    Mode,
    /// Sample logging and model swaps.
    Training,
}

const TOPICS: [Topic; 3] = [Topic::Telemetry, Topic::Mode, Topic::Training];

/// Event wrapper carrying its topic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    Telemetry(TelemetryEvent),
    Mode(ModeChangedEvent),
    Training(TrainingEvent),
}

impl Event {
    pub fn topic(&self) -> Topic {
        match self {
            Event::Telemetry(_) => Topic::Telemetry,
            Event::Mode(_) => Topic::Mode,
            Event::Training(_) => Topic::Training,
        }
    }
}

/// Broadcast bus with one channel per topic.
///
/// Publication is best-effort and one-way: the core never waits on or hears
/// back from consumers. Channels are created up front, so publishing is
/// lock-free.
#[derive(Clone)]
pub struct EventBus {
    channels: Arc<HashMap<Topic, broadcast::Sender<Event>>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::with_capacity(128)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let channels = TOPICS
            .into_iter()
            .map(|topic| (topic, broadcast::channel(capacity).0))
            .collect();
        Self {
            channels: Arc::new(channels),
        }
    }

    /// Publishes an event to its topic. A topic without subscribers simply
    /// drops the event.
    pub fn publish(&self, event: Event) {
        if let Some(tx) = self.channels.get(&event.topic())
            && tx.send(event).is_err()
        {
            tracing::trace!("no subscribers for topic");
        }
    }

    /// Subscribes to one topic.
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        // All topics are created in the constructor; an unknown topic is
        // unreachable with the closed Topic enum.
        self.channels[&topic].subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use warden_core::{GuardId, GuardMode, Position, Tick};

    #[tokio::test]
    async fn subscribers_only_see_their_topic() {
        let bus = EventBus::new();
        let mut mode_rx = bus.subscribe(Topic::Mode);

        bus.publish(Event::Telemetry(TelemetryEvent {
            tick: Tick(1),
            guard: GuardId(0),
            position: Position::ORIGIN,
            mode: GuardMode::Patrol,
            suspicion: 0.0,
        }));
        bus.publish(Event::Mode(ModeChangedEvent {
            tick: Tick(1),
            guard: GuardId(0),
            from: GuardMode::Patrol,
            to: GuardMode::Chase,
        }));

        match mode_rx.recv().await.unwrap() {
            Event::Mode(event) => assert_eq!(event.to, GuardMode::Chase),
            other => panic!("unexpected event {other:?}"),
        }
        assert!(mode_rx.try_recv().is_err());
    }
}
