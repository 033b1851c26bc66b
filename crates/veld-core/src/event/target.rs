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

//! Capability contracts for spatially-addressable event receivers, plus the
//! listener-set helpers concrete targets embed.
//!
//! A concrete UI element implements [`PositionTarget`] and composes one
//! helper per event family it cares about ([`MouseTarget`],
//! [`MouseMotionTarget`], [`KeyTarget`]). The helpers own the listener sets
//! and handle the fan-out bookkeeping, so an element's `process_event` is
//! usually a couple of forwarding calls.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::event::listener::{KeyListener, MouseListener, MouseMotionListener};
use crate::event::{InputEvent, KeyEventKind, MouseEventKind};

/// Anything that can receive a routed input event.
pub trait EventTarget {
    /// Delivers an event to this target's listener sets.
    fn process_event(&self, event: &InputEvent);
}

/// A spatially-addressable event receiver.
///
/// The parent back-reference is a lookup relationship only, never ownership;
/// it exists to walk up the coordinate chain.
pub trait PositionTarget: EventTarget {
    /// The target's left edge in its parent's coordinate space.
    fn left(&self) -> f32;
    /// The target's top edge in its parent's coordinate space.
    fn top(&self) -> f32;
    /// The enclosing target, if any.
    fn parent(&self) -> Option<Rc<dyn PositionTarget>>;
    /// Whether this target accepts keyboard focus.
    fn is_key_enabled(&self) -> bool;
}

/// External collaborator performing hit-testing for a dispatcher.
pub trait TargetManager {
    /// Returns the target under the given normalized coordinates, if any.
    fn position_target_at(&self, x: f32, y: f32) -> Option<Rc<dyn PositionTarget>>;
}

/// Compares two targets by identity rather than by value.
#[inline]
pub fn same_target(a: &Rc<dyn PositionTarget>, b: &Rc<dyn PositionTarget>) -> bool {
    Rc::ptr_eq(a, b)
}

/// A listener set with removal deferred to the next notification pass.
///
/// Removing a listener from within its own callback must not disturb the
/// pass in flight, so removals are parked in a side list and purged when the
/// next pass starts. Delivery iterates over a snapshot of the live list, so
/// additions mid-pass also take effect only from the next pass onward.
struct ListenerSet<L: ?Sized> {
    live: RefCell<Vec<Rc<L>>>,
    removed: RefCell<Vec<Rc<L>>>,
}

impl<L: ?Sized> ListenerSet<L> {
    fn new() -> Self {
        Self {
            live: RefCell::new(Vec::new()),
            removed: RefCell::new(Vec::new()),
        }
    }

    fn add(&self, listener: Rc<L>) {
        self.live.borrow_mut().push(listener);
    }

    fn remove(&self, listener: &Rc<L>) {
        self.removed.borrow_mut().push(Rc::clone(listener));
    }

    /// Purges parked removals, then returns a snapshot to iterate over.
    fn begin_pass(&self) -> Vec<Rc<L>> {
        let mut removed = self.removed.borrow_mut();
        if !removed.is_empty() {
            let mut live = self.live.borrow_mut();
            live.retain(|l| !removed.iter().any(|r| Rc::ptr_eq(l, r)));
            removed.clear();
        }
        self.live.borrow().clone()
    }
}

/// Listener-set helper for mouse button and enter/exit events.
///
/// Also tracks whether the pointer is currently within the owning target,
/// updated by the enter and exit events the dispatcher routes here, drag
/// variants included.
pub struct MouseTarget {
    listeners: ListenerSet<dyn MouseListener>,
    mouse_within: Cell<bool>,
}

impl MouseTarget {
    /// Creates an empty helper with the pointer considered outside.
    pub fn new() -> Self {
        Self {
            listeners: ListenerSet::new(),
            mouse_within: Cell::new(false),
        }
    }

    /// Registers a listener, effective from the next notification pass.
    pub fn add_listener(&self, listener: Rc<dyn MouseListener>) {
        self.listeners.add(listener);
    }

    /// Unregisters a listener, effective from the next notification pass.
    pub fn remove_listener(&self, listener: &Rc<dyn MouseListener>) {
        self.listeners.remove(listener);
    }

    /// Returns `true` while the pointer is within the owning target.
    #[inline]
    pub fn is_mouse_within(&self) -> bool {
        self.mouse_within.get()
    }

    /// Fans a mouse event out to the registered listeners.
    /// Non-button mouse events (motion) are ignored here.
    pub fn process_mouse_event(&self, event: &InputEvent) {
        let Some(mouse) = event.as_mouse() else {
            return;
        };
        let snapshot = self.listeners.begin_pass();
        match mouse.kind {
            MouseEventKind::Entered => {
                self.mouse_within.set(true);
                for l in &snapshot {
                    l.mouse_entered(event);
                }
            }
            MouseEventKind::Exited => {
                self.mouse_within.set(false);
                for l in &snapshot {
                    l.mouse_exited(event);
                }
            }
            MouseEventKind::Clicked => {
                for l in &snapshot {
                    l.mouse_clicked(event);
                }
            }
            MouseEventKind::Pressed => {
                for l in &snapshot {
                    l.mouse_pressed(event);
                }
            }
            MouseEventKind::Released => {
                for l in &snapshot {
                    l.mouse_released(event);
                }
            }
            MouseEventKind::DragEntered => {
                self.mouse_within.set(true);
                for l in &snapshot {
                    l.mouse_drag_entered(event);
                }
            }
            MouseEventKind::DragExited => {
                self.mouse_within.set(false);
                for l in &snapshot {
                    l.mouse_drag_exited(event);
                }
            }
            MouseEventKind::DragDropped => {
                for l in &snapshot {
                    l.mouse_drag_dropped(event);
                }
            }
            MouseEventKind::Moved | MouseEventKind::Dragged | MouseEventKind::DragMoved => {}
        }
    }
}

impl Default for MouseTarget {
    fn default() -> Self {
        Self::new()
    }
}

/// Listener-set helper for pointer motion events.
pub struct MouseMotionTarget {
    listeners: ListenerSet<dyn MouseMotionListener>,
}

impl MouseMotionTarget {
    /// Creates an empty helper.
    pub fn new() -> Self {
        Self {
            listeners: ListenerSet::new(),
        }
    }

    /// Registers a listener, effective from the next notification pass.
    pub fn add_listener(&self, listener: Rc<dyn MouseMotionListener>) {
        self.listeners.add(listener);
    }

    /// Unregisters a listener, effective from the next notification pass.
    pub fn remove_listener(&self, listener: &Rc<dyn MouseMotionListener>) {
        self.listeners.remove(listener);
    }

    /// Fans a motion event out to the registered listeners.
    /// Non-motion mouse events are ignored here.
    pub fn process_mouse_motion_event(&self, event: &InputEvent) {
        let Some(mouse) = event.as_mouse() else {
            return;
        };
        let snapshot = self.listeners.begin_pass();
        match mouse.kind {
            MouseEventKind::Moved => {
                for l in &snapshot {
                    l.mouse_moved(event);
                }
            }
            MouseEventKind::Dragged => {
                for l in &snapshot {
                    l.mouse_dragged(event);
                }
            }
            MouseEventKind::DragMoved => {
                for l in &snapshot {
                    l.mouse_drag_moved(event);
                }
            }
            _ => {}
        }
    }
}

impl Default for MouseMotionTarget {
    fn default() -> Self {
        Self::new()
    }
}

/// Listener-set helper for keyboard events.
pub struct KeyTarget {
    listeners: ListenerSet<dyn KeyListener>,
}

impl KeyTarget {
    /// Creates an empty helper.
    pub fn new() -> Self {
        Self {
            listeners: ListenerSet::new(),
        }
    }

    /// Registers a listener, effective from the next notification pass.
    pub fn add_listener(&self, listener: Rc<dyn KeyListener>) {
        self.listeners.add(listener);
    }

    /// Unregisters a listener, effective from the next notification pass.
    pub fn remove_listener(&self, listener: &Rc<dyn KeyListener>) {
        self.listeners.remove(listener);
    }

    /// Fans a keyboard event out to the registered listeners.
    pub fn process_key_event(&self, event: &InputEvent) {
        let Some(key) = event.as_key() else {
            return;
        };
        let snapshot = self.listeners.begin_pass();
        match key.kind {
            KeyEventKind::Clicked => {
                for l in &snapshot {
                    l.key_clicked(event);
                }
            }
            KeyEventKind::Pressed => {
                for l in &snapshot {
                    l.key_pressed(event);
                }
            }
            KeyEventKind::Released => {
                for l in &snapshot {
                    l.key_released(event);
                }
            }
            KeyEventKind::FocusIn => {
                for l in &snapshot {
                    l.key_focus_in(event);
                }
            }
            KeyEventKind::FocusOut => {
                for l in &snapshot {
                    l.key_focus_out(event);
                }
            }
        }
    }
}

impl Default for KeyTarget {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{Modifiers, MouseEvent};
    use crate::math::Vec3;
    use std::rc::Weak;

    fn mouse_event(kind: MouseEventKind) -> InputEvent {
        InputEvent::mouse(
            Modifiers::empty(),
            MouseEvent {
                kind,
                position: Vec3::new(0.5, 0.5, 0.5),
                relative: Vec3::ZERO,
                button: Modifiers::BUTTON0,
                click_count: 1,
            },
        )
    }

    /// Records which listener instance saw how many presses, and optionally
    /// removes itself from its target mid-callback.
    struct CountingListener {
        name: &'static str,
        presses: Cell<u32>,
        target: Weak<MouseTarget>,
        this: RefCell<Weak<CountingListener>>,
        remove_self_on_press: bool,
        order_log: Rc<RefCell<Vec<&'static str>>>,
    }

    impl CountingListener {
        fn new(
            name: &'static str,
            target: &Rc<MouseTarget>,
            remove_self_on_press: bool,
            order_log: Rc<RefCell<Vec<&'static str>>>,
        ) -> Rc<Self> {
            let listener = Rc::new(Self {
                name,
                presses: Cell::new(0),
                target: Rc::downgrade(target),
                this: RefCell::new(Weak::new()),
                remove_self_on_press,
                order_log,
            });
            *listener.this.borrow_mut() = Rc::downgrade(&listener);
            listener
        }
    }

    impl MouseListener for CountingListener {
        fn mouse_clicked(&self, _event: &InputEvent) {}
        fn mouse_entered(&self, _event: &InputEvent) {}
        fn mouse_exited(&self, _event: &InputEvent) {}
        fn mouse_released(&self, _event: &InputEvent) {}

        fn mouse_pressed(&self, _event: &InputEvent) {
            self.presses.set(self.presses.get() + 1);
            self.order_log.borrow_mut().push(self.name);
            if self.remove_self_on_press {
                if let (Some(target), Some(me)) =
                    (self.target.upgrade(), self.this.borrow().upgrade())
                {
                    let me: Rc<dyn MouseListener> = me;
                    target.remove_listener(&me);
                }
            }
        }
    }

    #[test]
    fn mouse_within_follows_enter_exit() {
        let target = MouseTarget::new();
        assert!(!target.is_mouse_within());
        target.process_mouse_event(&mouse_event(MouseEventKind::Entered));
        assert!(target.is_mouse_within());
        target.process_mouse_event(&mouse_event(MouseEventKind::Exited));
        assert!(!target.is_mouse_within());
    }

    #[test]
    fn mouse_within_follows_drag_enter_exit() {
        // During a drag-and-drop gesture the hovered target receives the
        // drag variants instead of the plain pair; the flag tracks both.
        let target = MouseTarget::new();
        target.process_mouse_event(&mouse_event(MouseEventKind::DragEntered));
        assert!(target.is_mouse_within());
        target.process_mouse_event(&mouse_event(MouseEventKind::DragExited));
        assert!(!target.is_mouse_within());
    }

    #[test]
    fn removal_mid_callback_keeps_current_pass_intact() {
        let target = Rc::new(MouseTarget::new());
        let log = Rc::new(RefCell::new(Vec::new()));
        let first = CountingListener::new("first", &target, true, Rc::clone(&log));
        let second = CountingListener::new("second", &target, false, Rc::clone(&log));
        target.add_listener(first.clone() as Rc<dyn MouseListener>);
        target.add_listener(second.clone() as Rc<dyn MouseListener>);

        // First pass: "first" removes itself mid-callback, but "second"
        // must still be called afterwards, in registration order.
        target.process_mouse_event(&mouse_event(MouseEventKind::Pressed));
        assert_eq!(*log.borrow(), vec!["first", "second"]);

        // Second pass: the removal has taken effect.
        target.process_mouse_event(&mouse_event(MouseEventKind::Pressed));
        assert_eq!(first.presses.get(), 1);
        assert_eq!(second.presses.get(), 2);
    }

    #[test]
    fn motion_events_ignored_by_button_target() {
        let target = Rc::new(MouseTarget::new());
        let log = Rc::new(RefCell::new(Vec::new()));
        let listener = CountingListener::new("only", &target, false, Rc::clone(&log));
        target.add_listener(listener.clone() as Rc<dyn MouseListener>);

        target.process_mouse_event(&mouse_event(MouseEventKind::Moved));
        target.process_mouse_event(&mouse_event(MouseEventKind::Dragged));
        assert_eq!(listener.presses.get(), 0);
        assert!(log.borrow().is_empty());
    }
}
