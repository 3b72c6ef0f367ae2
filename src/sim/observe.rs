//! Change notification for kinematic state
//!
//! Subscribers register interest in position, velocity, or both. Writes are
//! grouped into commits; a subscriber runs at most once per commit, and only
//! if a quantity it watches actually changed.

use std::fmt;

use super::state::Kinematics;

/// Which quantity a subscriber watches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Watch {
    Position,
    Velocity,
    /// Either quantity
    Any,
}

/// Quantities that changed during one commit
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Changes {
    pub position: bool,
    pub velocity: bool,
}

impl Changes {
    /// Diff two snapshots
    pub fn between(before: &Kinematics, after: &Kinematics) -> Self {
        Self {
            position: before.pos != after.pos,
            velocity: before.vel != after.vel,
        }
    }

    pub fn is_empty(&self) -> bool {
        !self.position && !self.velocity
    }

    /// Whether a subscriber with the given interest should run
    pub fn matches(&self, watch: Watch) -> bool {
        match watch {
            Watch::Position => self.position,
            Watch::Velocity => self.velocity,
            Watch::Any => !self.is_empty(),
        }
    }
}

/// Handle returned by [`Observers::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Callback invoked with the committed state
pub type Callback = Box<dyn FnMut(&Kinematics)>;

struct Subscriber {
    id: SubscriptionId,
    watch: Watch,
    callback: Callback,
}

/// Subscriber registry (stable iteration order: subscription order)
#[derive(Default)]
pub struct Observers {
    subscribers: Vec<Subscriber>,
    next_id: u64,
}

impl fmt::Debug for Observers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observers")
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

impl Observers {
    pub fn subscribe(&mut self, watch: Watch, callback: Callback) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscribers.push(Subscriber {
            id,
            watch,
            callback,
        });
        id
    }

    /// Remove a subscriber. Returns false if the id was unknown.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|s| s.id != id);
        self.subscribers.len() != before
    }

    pub fn len(&self) -> usize {
        self.subscribers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }

    /// Run every subscriber interested in `changes` exactly once
    pub fn notify(&mut self, changes: Changes, state: &Kinematics) {
        if changes.is_empty() {
            return;
        }
        for sub in &mut self.subscribers {
            if changes.matches(sub.watch) {
                (sub.callback)(state);
            }
        }
    }
}
