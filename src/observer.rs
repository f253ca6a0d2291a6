//! Subscription registry shared by the identity signal and the managers.
//!
//! Callbacks are invoked synchronously, in registration order, on the thread
//! that performed the mutation. The UI layer decides how to marshal updates
//! from there.

/// Handle returned by `subscribe`, used to unsubscribe later.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubscriptionId(u64);

pub struct Subscribers<V> {
    next_id: u64,
    entries: Vec<(u64, Box<dyn Fn(&V) + Send>)>,
}

impl<V> Subscribers<V> {
    pub fn new() -> Self {
        Self {
            next_id: 0,
            entries: Vec::new(),
        }
    }

    pub fn subscribe(&mut self, callback: Box<dyn Fn(&V) + Send>) -> SubscriptionId {
        self.next_id += 1;
        let id = self.next_id;
        self.entries.push((id, callback));
        SubscriptionId(id)
    }

    /// Removes a subscriber. Unknown ids are a no-op.
    pub fn unsubscribe(&mut self, id: SubscriptionId) {
        self.entries.retain(|(entry_id, _)| *entry_id != id.0);
    }

    pub fn notify(&self, value: &V) {
        for (_, callback) in &self.entries {
            callback(value);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

impl<V> Default for Subscribers<V> {
    fn default() -> Self {
        Self::new()
    }
}
