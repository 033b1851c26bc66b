// Copyright 2026 the Veld contributors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Provides the FIFO buffer between input capture and frame-boundary dispatch.

use std::cell::Cell;

use crate::event::InputEvent;

/// A FIFO buffer of input events awaiting dispatch.
///
/// Events move through the queue by value: the producer hands ownership to
/// `push` and the consumer takes it back from `pop`, so every event has a
/// single owner at any point in its life.
///
/// The queue starts inactive. While inactive, `push` drops the event and
/// `pop` returns `None`, but events queued while active survive a later
/// deactivation and can be drained once the queue is reactivated.
#[derive(Debug)]
pub struct EventQueue {
    sender: flume::Sender<InputEvent>,
    receiver: flume::Receiver<InputEvent>,
    active: Cell<bool>,
}

impl EventQueue {
    /// Creates a new, inactive queue with unbounded capacity.
    pub fn new() -> Self {
        let (sender, receiver) = flume::unbounded();
        log::info!("EventQueue initialized (inactive).");
        Self {
            sender,
            receiver,
            active: Cell::new(false),
        }
    }

    /// Activates or deactivates the queue. Already-queued events are kept
    /// either way.
    pub fn set_activate(&self, active: bool) {
        log::trace!("EventQueue activation set to {active}.");
        self.active.set(active);
    }

    /// Returns `true` while the queue accepts pushes and serves pops.
    #[inline]
    pub fn is_activated(&self) -> bool {
        self.active.get()
    }

    /// Appends an event to the back of the queue. Dropped silently while the
    /// queue is inactive.
    pub fn push(&self, event: InputEvent) {
        if !self.active.get() {
            log::trace!("EventQueue inactive, dropping pushed event.");
            return;
        }
        if let Err(e) = self.sender.send(event) {
            log::error!("Failed to queue event: {e}. Receiver likely disconnected.");
        }
    }

    /// Removes and returns the oldest queued event, or `None` when the queue
    /// is empty or inactive.
    pub fn pop(&self) -> Option<InputEvent> {
        if !self.active.get() {
            return None;
        }
        self.receiver.try_recv().ok()
    }

    /// Returns the number of events waiting in the queue.
    #[inline]
    pub fn len(&self) -> usize {
        self.receiver.len()
    }

    /// Returns `true` if no events are waiting.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.receiver.is_empty()
    }
}

impl Default for EventQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{Modifiers, MouseEvent, MouseEventKind};
    use crate::math::Vec3;

    fn dummy_event(kind: MouseEventKind) -> InputEvent {
        InputEvent::mouse(
            Modifiers::empty(),
            MouseEvent {
                kind,
                position: Vec3::new(0.5, 0.5, 0.5),
                relative: Vec3::ZERO,
                button: Modifiers::empty(),
                click_count: 0,
            },
        )
    }

    #[test]
    fn starts_inactive_and_drops_pushes() {
        let queue = EventQueue::new();
        assert!(!queue.is_activated());
        queue.push(dummy_event(MouseEventKind::Moved));
        assert!(queue.is_empty());
    }

    #[test]
    fn fifo_order_while_active() {
        let queue = EventQueue::new();
        queue.set_activate(true);
        queue.push(dummy_event(MouseEventKind::Pressed));
        queue.push(dummy_event(MouseEventKind::Moved));
        queue.push(dummy_event(MouseEventKind::Released));
        assert_eq!(queue.len(), 3);

        let kinds: Vec<_> = std::iter::from_fn(|| queue.pop())
            .map(|e| e.as_mouse().unwrap().kind)
            .collect();
        assert_eq!(
            kinds,
            vec![
                MouseEventKind::Pressed,
                MouseEventKind::Moved,
                MouseEventKind::Released
            ]
        );
    }

    #[test]
    fn queued_events_survive_deactivation() {
        let queue = EventQueue::new();
        queue.set_activate(true);
        queue.push(dummy_event(MouseEventKind::Pressed));

        queue.set_activate(false);
        // Inactive: the event stays buffered but cannot be popped.
        assert_eq!(queue.len(), 1);
        assert!(queue.pop().is_none());

        queue.set_activate(true);
        let event = queue.pop().expect("event should have survived");
        assert_eq!(event.as_mouse().unwrap().kind, MouseEventKind::Pressed);
    }

    #[test]
    fn pop_empty_returns_none() {
        let queue = EventQueue::new();
        queue.set_activate(true);
        assert!(queue.pop().is_none());
    }
}
