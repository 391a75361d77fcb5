//! Push notifications for playback changes

use slotmap::{new_key_type, SlotMap};
use stepwise_core::Step;

use crate::Phase;

new_key_type! {
    /// Handle returned by `subscribe`, used to unsubscribe.
    pub struct SubscriptionId;
}

/// What produced an update.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UpdateCause {
    Play,
    Pause,
    Reset,
    /// A timer fired and moved the cursor.
    Advance,
    Jump,
    TraceReplaced,
}

/// Delivered to subscribers after every cursor or phase change.
#[derive(Debug)]
pub struct PlaybackUpdate<'a, P> {
    pub phase: Phase,
    pub cursor: usize,
    pub step: &'a Step<P>,
    pub cause: UpdateCause,
}

/// Update handler function type
pub type UpdateHandler<P> = Box<dyn FnMut(&PlaybackUpdate<'_, P>) + Send>;

/// Registered update handlers, called in subscription order.
pub struct Subscribers<P> {
    handlers: SlotMap<SubscriptionId, UpdateHandler<P>>,
}

impl<P> Subscribers<P> {
    pub fn new() -> Self {
        Self {
            handlers: SlotMap::with_key(),
        }
    }

    pub fn subscribe<F>(&mut self, handler: F) -> SubscriptionId
    where
        F: FnMut(&PlaybackUpdate<'_, P>) + Send + 'static,
    {
        self.handlers.insert(Box::new(handler))
    }

    /// Returns false if `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.handlers.remove(id).is_some()
    }

    pub fn dispatch(&mut self, update: &PlaybackUpdate<'_, P>) {
        for handler in self.handlers.values_mut() {
            handler(update);
        }
    }

    pub fn clear(&mut self) {
        self.handlers.clear();
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl<P> Default for Subscribers<P> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use parking_lot::Mutex;

    fn step(index: usize) -> Step<&'static str> {
        Step {
            index,
            payload: "state",
            label: format!("step {index}"),
            is_terminal: false,
        }
    }

    #[test]
    fn test_dispatch_reaches_every_handler() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut subs: Subscribers<&'static str> = Subscribers::new();
        for tag in ["a", "b"] {
            let seen = seen.clone();
            subs.subscribe(move |u| seen.lock().push((tag, u.cursor)));
        }

        let step = step(3);
        subs.dispatch(&PlaybackUpdate {
            phase: Phase::Playing,
            cursor: 3,
            step: &step,
            cause: UpdateCause::Advance,
        });
        assert_eq!(*seen.lock(), vec![("a", 3), ("b", 3)]);
    }

    #[test]
    fn test_unsubscribe() {
        let count = Arc::new(Mutex::new(0));
        let mut subs: Subscribers<&'static str> = Subscribers::new();
        let id = {
            let count = count.clone();
            subs.subscribe(move |_| *count.lock() += 1)
        };

        assert!(subs.unsubscribe(id));
        assert!(!subs.unsubscribe(id));
        assert!(subs.is_empty());

        let step = step(0);
        subs.dispatch(&PlaybackUpdate {
            phase: Phase::Idle,
            cursor: 0,
            step: &step,
            cause: UpdateCause::Reset,
        });
        assert_eq!(*count.lock(), 0);
    }
}
