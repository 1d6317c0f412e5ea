//! Notifications from the game to whoever is displaying it
use std::sync::mpsc::{channel, Receiver, Sender};
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum GameEvent {
    ScoreChanged(u32),
    TimeChanged(Duration),
    PauseChanged(bool),
    GameOver(GameSummary),
}

/// Final results of a finished game
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct GameSummary {
    pub(crate) score: u32,
    pub(crate) survival_time: Duration,

    /// Whether `score` beat the stored high score
    pub(crate) new_high_score: bool,

    /// Whether `survival_time` beat the stored longest survival time
    pub(crate) new_best_time: bool,
}

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub(crate) struct SubscriberId(u64);

/// A list of subscribers, each fed by its own channel.
///
/// Subscribers whose receiving end has been dropped are pruned on the next
/// publish, so forgetting to unsubscribe doesn't leak.
#[derive(Debug, Default)]
pub(crate) struct EventBus {
    next_id: u64,
    subscribers: Vec<(SubscriberId, Sender<GameEvent>)>,
}

impl EventBus {
    pub(crate) fn new() -> EventBus {
        EventBus::default()
    }

    pub(crate) fn subscribe(&mut self) -> (SubscriberId, Receiver<GameEvent>) {
        let id = SubscriberId(self.next_id);
        self.next_id += 1;
        let (sender, receiver) = channel();
        self.subscribers.push((id, sender));
        (id, receiver)
    }

    /// Remove a subscriber.  Returns `false` if `id` was not subscribed, as
    /// happens when unsubscribing twice.
    pub(crate) fn unsubscribe(&mut self, id: SubscriberId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|&(sid, _)| sid != id);
        self.subscribers.len() != before
    }

    #[cfg(test)]
    pub(crate) fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    pub(crate) fn publish(&mut self, event: GameEvent) {
        self.subscribers
            .retain(|(_, sender)| sender.send(event).is_ok());
    }
}
