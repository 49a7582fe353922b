//! Unit events and the synchronous topic-based event bus.
//!
//! Units never call observers directly; every mutation that other systems care
//! about is emitted as a [`UnitEvent`] into an [`EventSink`] passed by the
//! caller. Delivery is synchronous and in emission order.

use crate::state::{DamageKind, StatusEffectData, UnitId};

/// Topics for event routing.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Topic {
    Damage,
    Healing,
    Defeat,
    StatusApplied,
    StatusRemoved,
}

impl Topic {
    pub const ALL: [Topic; 5] = [
        Topic::Damage,
        Topic::Healing,
        Topic::Defeat,
        Topic::StatusApplied,
        Topic::StatusRemoved,
    ];
}

/// Observable change on a single unit.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UnitEvent {
    DamageTaken {
        unit: UnitId,
        amount: u32,
        kind: DamageKind,
    },
    HealingReceived {
        unit: UnitId,
        amount: u32,
    },
    /// Emitted exactly once, on the transition from alive to defeated.
    Defeated {
        unit: UnitId,
    },
    StatusApplied {
        unit: UnitId,
        effect: StatusEffectData,
    },
    StatusRemoved {
        unit: UnitId,
        effect: StatusEffectData,
    },
}

impl UnitEvent {
    pub fn topic(&self) -> Topic {
        match self {
            UnitEvent::DamageTaken { .. } => Topic::Damage,
            UnitEvent::HealingReceived { .. } => Topic::Healing,
            UnitEvent::Defeated { .. } => Topic::Defeat,
            UnitEvent::StatusApplied { .. } => Topic::StatusApplied,
            UnitEvent::StatusRemoved { .. } => Topic::StatusRemoved,
        }
    }

    pub fn unit(&self) -> UnitId {
        match self {
            UnitEvent::DamageTaken { unit, .. }
            | UnitEvent::HealingReceived { unit, .. }
            | UnitEvent::Defeated { unit }
            | UnitEvent::StatusApplied { unit, .. }
            | UnitEvent::StatusRemoved { unit, .. } => *unit,
        }
    }
}

/// Receiver for unit events.
pub trait EventSink {
    fn emit(&mut self, event: UnitEvent);
}

/// Recording sink, convenient for tests and batch consumers.
impl EventSink for Vec<UnitEvent> {
    fn emit(&mut self, event: UnitEvent) {
        self.push(event);
    }
}

/// Handle returned by [`EventBus::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq)]
pub struct SubscriptionId(u64);

type Handler = Box<dyn FnMut(&UnitEvent)>;

struct Subscriber {
    id: SubscriptionId,
    /// `None` subscribes to every topic.
    topics: Option<Vec<Topic>>,
    handler: Handler,
}

impl Subscriber {
    fn wants(&self, topic: Topic) -> bool {
        self.topics
            .as_ref()
            .is_none_or(|topics| topics.contains(&topic))
    }
}

/// Topic-based event bus.
///
/// Subscribers are invoked synchronously, in subscription order, for every
/// event on a topic they registered for.
#[derive(Default)]
pub struct EventBus {
    subscribers: Vec<Subscriber>,
    next_id: u64,
    published: u64,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe to the given topics.
    pub fn subscribe<F>(&mut self, topics: &[Topic], handler: F) -> SubscriptionId
    where
        F: FnMut(&UnitEvent) + 'static,
    {
        self.register(Some(topics.to_vec()), Box::new(handler))
    }

    /// Subscribe to every topic.
    pub fn subscribe_all<F>(&mut self, handler: F) -> SubscriptionId
    where
        F: FnMut(&UnitEvent) + 'static,
    {
        self.register(None, Box::new(handler))
    }

    /// Removes a subscription. Returns true if it existed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|s| s.id != id);
        self.subscribers.len() != before
    }

    /// Publish an event to every subscriber of its topic.
    pub fn publish(&mut self, event: &UnitEvent) {
        let topic = event.topic();
        self.published += 1;

        let mut delivered = 0usize;
        for subscriber in self.subscribers.iter_mut().filter(|s| s.wants(topic)) {
            (subscriber.handler)(event);
            delivered += 1;
        }

        if delivered == 0 {
            // No subscribers for this topic - this is normal, not an error
            tracing::trace!("No subscribers for topic {:?}", topic);
        }
    }

    /// Total number of events published since creation.
    pub fn published(&self) -> u64 {
        self.published
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    fn register(&mut self, topics: Option<Vec<Topic>>, handler: Handler) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscribers.push(Subscriber {
            id,
            topics,
            handler,
        });
        id
    }
}

impl EventSink for EventBus {
    fn emit(&mut self, event: UnitEvent) {
        self.publish(&event);
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("subscribers", &self.subscribers.len())
            .field("published", &self.published)
            .finish()
    }
}
