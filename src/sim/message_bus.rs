//! Message bus: in-tick delivery of user and pet messages.
//!
//! Pull-based: messages queue per recipient and the model drains them into
//! agent inboxes at the start of each tick. Delivery is best-effort; a
//! message for an unknown recipient is dropped with a warning.

use crate::sim::message::Message;
use crate::types::PetId;
use std::collections::{BTreeMap, BTreeSet, VecDeque};
use tracing::warn;

/// Result of a delivery attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryStatus {
    Ok,
    /// Recipient unknown; the message was discarded.
    Dropped,
}

/// Transport for messages addressed to pets.
pub trait MessageBus {
    /// Queues a message for its recipient.
    fn deliver(&mut self, message: Message) -> DeliveryStatus;

    /// Removes and returns all queued messages for one recipient, FIFO.
    fn drain(&mut self, recipient: &PetId) -> Vec<Message>;
}

/// The standard in-process bus.
#[derive(Debug, Default)]
pub struct InMemoryMessageBus {
    recipients: BTreeSet<PetId>,
    queues: BTreeMap<PetId, VecDeque<Message>>,
}

impl InMemoryMessageBus {
    /// Creates an empty bus.
    #[must_use]
    pub fn new() -> Self {
        InMemoryMessageBus::default()
    }

    /// Registers a recipient; messages for unregistered pets are dropped.
    pub fn register(&mut self, recipient: PetId) {
        self.recipients.insert(recipient);
    }

    /// Unregisters a recipient and discards its queue.
    pub fn unregister(&mut self, recipient: &PetId) {
        self.recipients.remove(recipient);
        self.queues.remove(recipient);
    }

    /// Number of queued messages across all recipients.
    #[must_use]
    pub fn queued_len(&self) -> usize {
        self.queues.values().map(VecDeque::len).sum()
    }
}

impl MessageBus for InMemoryMessageBus {
    fn deliver(&mut self, message: Message) -> DeliveryStatus {
        if !self.recipients.contains(&message.recipient) {
            warn!(recipient = %message.recipient, "dropping message for unknown recipient");
            return DeliveryStatus::Dropped;
        }
        self.queues
            .entry(message.recipient.clone())
            .or_default()
            .push_back(message);
        DeliveryStatus::Ok
    }

    fn drain(&mut self, recipient: &PetId) -> Vec<Message> {
        self.queues
            .get_mut(recipient)
            .map(|queue| queue.drain(..).collect())
            .unwrap_or_default()
    }
}
